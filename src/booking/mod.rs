//! The booking sequence and the review flow.
//!
//! Both are plain async functions over [`ApiClient`](crate::api::ApiClient)
//! so they can be driven from the TUI, the CLI, or tests alike.

mod confirm;
mod review;
mod schedule;

pub use confirm::{confirm_booking, BookingError, BookingReceipt};
pub use review::{submit_review, ReviewDraft, ReviewError, MAX_RATING};
pub use schedule::{available_dates, first_free_index, slots_on};
pub(crate) use schedule::{parse_date, parse_time};
