//! MediCare - a terminal client for booking doctor appointments
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod auth;
pub mod booking;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod widgets;
