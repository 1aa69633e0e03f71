//! Request and response bodies for write endpoints.

use serde::{Deserialize, Serialize};

/// `POST /api/mobile/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/users/sign-up`
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// `POST /api/mobile/oauth`
#[derive(Debug, Clone, Serialize)]
pub struct OAuthExchangeRequest {
    pub email: String,
    pub name: String,
    pub image: Option<String>,
}

/// Body returned by the login and OAuth exchange endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// `POST /api/appointments`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub slot_id: String,
    pub reason: String,
    pub status: String,
}

/// `PUT /api/time-slots/{id}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSlotBookedRequest {
    pub is_booked: bool,
}

/// `POST /api/reviews`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub rating: u8,
    pub comment: String,
}
