//! AppMessage enum for async communication within the application.
//!
//! Every fetch or submission runs in a spawned task and reports back here.
//! Results are addressed to the [`ScreenId`] that started them; a result
//! whose screen is no longer mounted is dropped.

use crate::api::ApiError;
use crate::auth::{AuthFlowError, IdentityClaims, OAuthError};
use crate::booking::{BookingError, BookingReceipt, ReviewError};
use crate::models::{
    AppointmentDetail, AppointmentSummary, Doctor, DoctorDetails, SlotBooking, Specialty,
    UserProfile,
};

use super::navigation::ScreenId;
use super::screen_state::{Schedule, SpecialtyDoctors};

/// Messages received from async operations
#[derive(Debug)]
pub enum AppMessage {
    /// Specialty list, for the home screen or the specialties screen
    Specialties {
        screen: ScreenId,
        result: Result<Vec<Specialty>, ApiError>,
    },
    SpecialtyDoctors {
        screen: ScreenId,
        result: Result<SpecialtyDoctors, ApiError>,
    },
    Doctors {
        screen: ScreenId,
        result: Result<Vec<Doctor>, ApiError>,
    },
    Doctor {
        screen: ScreenId,
        result: Result<DoctorDetails, ApiError>,
    },
    /// Doctor details and slots, joined
    Schedule {
        screen: ScreenId,
        result: Result<Schedule, ApiError>,
    },
    SlotDetail {
        screen: ScreenId,
        result: Result<SlotBooking, ApiError>,
    },
    Appointment {
        screen: ScreenId,
        result: Result<AppointmentDetail, ApiError>,
    },
    Profile {
        screen: ScreenId,
        result: Result<UserProfile, ApiError>,
    },
    ProfileAppointments {
        screen: ScreenId,
        result: Result<Vec<AppointmentSummary>, ApiError>,
    },
    BookingFinished {
        screen: ScreenId,
        result: Result<BookingReceipt, BookingError>,
    },
    ReviewFinished {
        screen: ScreenId,
        result: Result<(), ReviewError>,
    },
    LoginFinished {
        screen: ScreenId,
        result: Result<(), AuthFlowError>,
    },
    SignupFinished {
        screen: ScreenId,
        result: Result<(), AuthFlowError>,
    },
    GoogleFinished {
        screen: ScreenId,
        result: Result<(), OAuthError>,
    },
    /// Claims of the current session, for the header
    Identity(Option<IdentityClaims>),
    /// The session was cleared
    LoggedOut,
}

impl AppMessage {
    /// The screen this result belongs to, if it belongs to one.
    pub fn screen(&self) -> Option<ScreenId> {
        match self {
            AppMessage::Specialties { screen, .. }
            | AppMessage::SpecialtyDoctors { screen, .. }
            | AppMessage::Doctors { screen, .. }
            | AppMessage::Doctor { screen, .. }
            | AppMessage::Schedule { screen, .. }
            | AppMessage::SlotDetail { screen, .. }
            | AppMessage::Appointment { screen, .. }
            | AppMessage::Profile { screen, .. }
            | AppMessage::ProfileAppointments { screen, .. }
            | AppMessage::BookingFinished { screen, .. }
            | AppMessage::ReviewFinished { screen, .. }
            | AppMessage::LoginFinished { screen, .. }
            | AppMessage::SignupFinished { screen, .. }
            | AppMessage::GoogleFinished { screen, .. } => Some(*screen),
            AppMessage::Identity(_) | AppMessage::LoggedOut => None,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppMessage::Specialties { .. } => "Specialties",
            AppMessage::SpecialtyDoctors { .. } => "SpecialtyDoctors",
            AppMessage::Doctors { .. } => "Doctors",
            AppMessage::Doctor { .. } => "Doctor",
            AppMessage::Schedule { .. } => "Schedule",
            AppMessage::SlotDetail { .. } => "SlotDetail",
            AppMessage::Appointment { .. } => "Appointment",
            AppMessage::Profile { .. } => "Profile",
            AppMessage::ProfileAppointments { .. } => "ProfileAppointments",
            AppMessage::BookingFinished { .. } => "BookingFinished",
            AppMessage::ReviewFinished { .. } => "ReviewFinished",
            AppMessage::LoginFinished { .. } => "LoginFinished",
            AppMessage::SignupFinished { .. } => "SignupFinished",
            AppMessage::GoogleFinished { .. } => "GoogleFinished",
            AppMessage::Identity(_) => "Identity",
            AppMessage::LoggedOut => "LoggedOut",
        }
    }
}
