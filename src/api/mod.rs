//! Client for the MediCare backend REST API.
//!
//! One method per endpoint, each a single request with a JSON body. The
//! bearer token is read from the session on every call and attached when
//! present. There is no retry, caching or pagination.

mod error;

pub use error::ApiError;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

use crate::auth::session::SessionStore;
use crate::models::{
    AppointmentDetail, AppointmentSummary, CreateAppointmentRequest, CreateReviewRequest,
    Doctor, DoctorDetails, LoginRequest, MarkSlotBookedRequest, OAuthExchangeRequest,
    SignupRequest, SlotBooking, Specialty, SpecialtyDoctor, TimeSlot, TokenResponse,
    UserProfile,
};
use crate::traits::{Headers, HttpClient, Response};

#[derive(Debug, Clone, Copy)]
enum Method {
    Post,
    Put,
}

/// Client for the MediCare backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
    session: Option<SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.session.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `base_url` without authentication.
    pub fn new(base_url: impl Into<String>, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            session: None,
        }
    }

    /// Attach the session whose token is sent as a bearer credential.
    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn headers(&self, with_body: bool) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if with_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(session) = &self.session {
            if let Some(token) = session.get().await {
                headers.insert("Authorization".to_string(), format!("Bearer {}", token));
            }
        }
        headers
    }

    fn check_status(response: Response) -> Result<Response, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        let status = response.status;
        let message = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::Server { status, message })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let headers = self.headers(false).await;
        let response = self
            .http
            .get(&url, &headers)
            .await
            .map_err(|source| ApiError::Http {
                url: url.clone(),
                source,
            })?;
        let response = Self::check_status(response)?;
        Ok(response.json()?)
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        let body = serde_json::to_string(body)?;
        let headers = self.headers(true).await;
        let result = match method {
            Method::Post => self.http.post(&url, &body, &headers).await,
            Method::Put => self.http.put(&url, &body, &headers).await,
        };
        let response = result.map_err(|source| ApiError::Http {
            url: url.clone(),
            source,
        })?;
        Self::check_status(response)
    }

    /// POST /api/mobile/login
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        let response = self
            .send_json(Method::Post, "/api/mobile/login", request)
            .await?;
        Ok(response.json()?)
    }

    /// POST /api/users/sign-up
    pub async fn sign_up(&self, request: &SignupRequest) -> Result<(), ApiError> {
        self.send_json(Method::Post, "/api/users/sign-up", request)
            .await?;
        Ok(())
    }

    /// POST /api/mobile/oauth
    pub async fn oauth_exchange(
        &self,
        request: &OAuthExchangeRequest,
    ) -> Result<TokenResponse, ApiError> {
        let response = self
            .send_json(Method::Post, "/api/mobile/oauth", request)
            .await?;
        Ok(response.json()?)
    }

    /// GET /api/doctors
    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        self.get_json("/api/doctors").await
    }

    /// GET /api/doctors/{id}
    pub async fn doctor(&self, id: &str) -> Result<DoctorDetails, ApiError> {
        self.get_json(&format!("/api/doctors/{}", urlencoding::encode(id)))
            .await
    }

    /// GET /api/specialties
    pub async fn list_specialties(&self) -> Result<Vec<Specialty>, ApiError> {
        self.get_json("/api/specialties").await
    }

    /// GET /api/specialties/{id}
    pub async fn specialty(&self, id: &str) -> Result<Specialty, ApiError> {
        self.get_json(&format!("/api/specialties/{}", urlencoding::encode(id)))
            .await
    }

    /// GET /api/specialties/{id}/doctors
    pub async fn specialty_doctors(&self, id: &str) -> Result<Vec<SpecialtyDoctor>, ApiError> {
        self.get_json(&format!(
            "/api/specialties/{}/doctors",
            urlencoding::encode(id)
        ))
        .await
    }

    /// GET /api/time-slots/{doctorId}
    pub async fn doctor_slots(&self, doctor_id: &str) -> Result<Vec<TimeSlot>, ApiError> {
        self.get_json(&format!("/api/time-slots/{}", urlencoding::encode(doctor_id)))
            .await
    }

    /// GET /api/time-slots/book/{slotId}
    pub async fn slot_booking(&self, slot_id: &str) -> Result<SlotBooking, ApiError> {
        self.get_json(&format!(
            "/api/time-slots/book/{}",
            urlencoding::encode(slot_id)
        ))
        .await
    }

    /// PUT /api/time-slots/{slotId} with `{"isBooked": true}`
    pub async fn mark_slot_booked(&self, slot_id: &str) -> Result<(), ApiError> {
        self.send_json(
            Method::Put,
            &format!("/api/time-slots/{}", urlencoding::encode(slot_id)),
            &MarkSlotBookedRequest { is_booked: true },
        )
        .await?;
        Ok(())
    }

    /// POST /api/appointments
    ///
    /// Returns the new appointment's id when the backend echoes one back.
    pub async fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Option<String>, ApiError> {
        let response = self
            .send_json(Method::Post, "/api/appointments", request)
            .await?;
        Ok(created_id(&response))
    }

    /// GET /api/appointments/{id}
    pub async fn appointment(&self, id: &str) -> Result<AppointmentDetail, ApiError> {
        self.get_json(&format!("/api/appointments/{}", urlencoding::encode(id)))
            .await
    }

    /// GET /api/appointments/patient/{patientId}
    pub async fn patient_appointments(
        &self,
        patient_id: &str,
    ) -> Result<Vec<AppointmentSummary>, ApiError> {
        self.get_json(&format!(
            "/api/appointments/patient/{}",
            urlencoding::encode(patient_id)
        ))
        .await
    }

    /// POST /api/reviews
    pub async fn create_review(&self, request: &CreateReviewRequest) -> Result<(), ApiError> {
        self.send_json(Method::Post, "/api/reviews", request)
            .await?;
        Ok(())
    }

    /// GET /api/profile/{id}
    pub async fn profile(&self, id: &str) -> Result<UserProfile, ApiError> {
        self.get_json(&format!("/api/profile/{}", urlencoding::encode(id)))
            .await
    }

    /// GET /api/profile/user-appointments/{id}
    pub async fn profile_appointments(
        &self,
        id: &str,
    ) -> Result<Vec<AppointmentSummary>, ApiError> {
        self.get_json(&format!(
            "/api/profile/user-appointments/{}",
            urlencoding::encode(id)
        ))
        .await
    }
}

/// The `id` (or `appointmentId`) of a created record, if the body has one.
fn created_id(response: &Response) -> Option<String> {
    let value: serde_json::Value = response.json().ok()?;
    let object = value
        .get("appointment")
        .filter(|v| v.is_object())
        .unwrap_or(&value);
    ["id", "appointmentId"]
        .iter()
        .find_map(|key| match object.get(*key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
