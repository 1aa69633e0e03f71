use crate::api::{ApiClient, ApiError};
use crate::models::{CreateAppointmentRequest, SlotBooking};

/// Status sent with every new appointment.
const CONFIRMED: &str = "confirmed";

/// A completed booking.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingReceipt {
    /// Id of the created appointment, when the backend returned one
    pub appointment_id: Option<String>,
    pub slot_id: String,
}

/// Why a booking did not complete.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("User Id required")]
    NotAuthenticated,

    #[error("Appointment details required")]
    MissingSlotDetail,

    /// Creating the appointment failed; nothing was written.
    #[error("could not create appointment: {0}")]
    AppointmentFailed(#[source] ApiError),

    /// The appointment exists but the slot is still marked free.
    #[error("appointment {} created but slot {slot_id} was not reserved: {source}", .appointment_id.as_deref().unwrap_or("(unknown id)"))]
    SlotNotReserved {
        appointment_id: Option<String>,
        slot_id: String,
        #[source]
        source: ApiError,
    },
}

impl BookingError {
    /// True when nothing reached the backend.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            BookingError::NotAuthenticated | BookingError::MissingSlotDetail
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            BookingError::NotAuthenticated => "Please sign in to book an appointment.".to_string(),
            BookingError::MissingSlotDetail => {
                "Appointment details are still loading. Please try again.".to_string()
            }
            BookingError::AppointmentFailed(e) => match e {
                ApiError::Server { .. } => e.user_message(),
                _ => "Could not confirm appointment".to_string(),
            },
            BookingError::SlotNotReserved { .. } => {
                "Your appointment was created, but the time slot could not be reserved. \
                 Please contact the clinic to make sure it is held for you."
                    .to_string()
            }
        }
    }
}

/// Book `slot` for `patient_id`.
///
/// Creates the appointment, then marks the slot booked. The second call is
/// only made once the first has succeeded. If it then fails the appointment
/// is left in place and [`BookingError::SlotNotReserved`] is returned.
pub async fn confirm_booking(
    api: &ApiClient,
    patient_id: Option<&str>,
    slot: Option<&SlotBooking>,
    reason: &str,
) -> Result<BookingReceipt, BookingError> {
    let patient_id = patient_id
        .filter(|id| !id.is_empty())
        .ok_or(BookingError::NotAuthenticated)?;
    let slot = slot.ok_or(BookingError::MissingSlotDetail)?;

    let request = CreateAppointmentRequest {
        patient_id: patient_id.to_string(),
        doctor_id: slot.doctor_id.clone(),
        slot_id: slot.id.clone(),
        reason: reason.trim().to_string(),
        status: CONFIRMED.to_string(),
    };

    let appointment_id = api
        .create_appointment(&request)
        .await
        .map_err(BookingError::AppointmentFailed)?;
    tracing::info!(
        "Created appointment {:?} for slot {}",
        appointment_id,
        slot.id
    );

    if let Err(source) = api.mark_slot_booked(&slot.id).await {
        tracing::error!(
            "Appointment {:?} created but slot {} was not marked booked: {}",
            appointment_id,
            slot.id,
            source
        );
        return Err(BookingError::SlotNotReserved {
            appointment_id,
            slot_id: slot.id.clone(),
            source,
        });
    }

    Ok(BookingReceipt {
        appointment_id,
        slot_id: slot.id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use serde_json::json;
    use std::sync::Arc;

    const BASE: &str = "http://api.test";

    fn slot(id: &str, doctor_id: &str) -> SlotBooking {
        SlotBooking {
            id: id.to_string(),
            date: "2025-03-02".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:30".to_string(),
            doctor_id: doctor_id.to_string(),
            doctor_name: Some("Dr. Osei".to_string()),
            doctor_image: None,
            doctor_qualifications: None,
            doctor_specialty: None,
        }
    }

    fn api(mock: &MockHttpClient) -> ApiClient {
        ApiClient::new(BASE, Arc::new(mock.clone()))
    }

    #[tokio::test]
    async fn test_posts_then_puts() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/api/appointments",
            MockResponse::json(201, json!({"id": "a1"})),
        );
        mock.set_response(
            "http://api.test/api/time-slots/17",
            MockResponse::json(200, json!({"id": "17", "isBooked": true})),
        );

        let receipt = confirm_booking(&api(&mock), Some("42"), Some(&slot("17", "5")), " Checkup ")
            .await
            .unwrap();

        assert_eq!(receipt.appointment_id.as_deref(), Some("a1"));
        assert_eq!(receipt.slot_id, "17");

        let requests = mock.get_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(
            requests[0].json_body(),
            Some(json!({
                "patientId": "42",
                "doctorId": "5",
                "slotId": "17",
                "reason": "Checkup",
                "status": "confirmed"
            }))
        );
        assert_eq!(requests[1].method, "PUT");
        assert_eq!(requests[1].url, "http://api.test/api/time-slots/17");
        assert_eq!(requests[1].json_body(), Some(json!({"isBooked": true})));
    }

    #[tokio::test]
    async fn test_without_identity_makes_no_request() {
        let mock = MockHttpClient::new();

        let err = confirm_booking(&api(&mock), None, Some(&slot("17", "5")), "")
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::NotAuthenticated));
        assert!(err.is_local());
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_without_slot_detail_makes_no_request() {
        let mock = MockHttpClient::new();

        let err = confirm_booking(&api(&mock), Some("42"), None, "")
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::MissingSlotDetail));
        assert!(mock.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_post_failure_skips_put() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/api/appointments",
            MockResponse::json(500, json!({"message": "db down"})),
        );

        let err = confirm_booking(&api(&mock), Some("42"), Some(&slot("17", "5")), "")
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::AppointmentFailed(_)));
        assert_eq!(err.user_message(), "db down");
        assert!(mock.requests_with_method("PUT").is_empty());
    }

    #[tokio::test]
    async fn test_put_failure_is_reported_as_partial() {
        let mock = MockHttpClient::new();
        mock.set_response(
            "http://api.test/api/appointments",
            MockResponse::json(201, json!({"id": 7})),
        );
        mock.set_response(
            "http://api.test/api/time-slots/17",
            MockResponse::json(500, json!({})),
        );

        let err = confirm_booking(&api(&mock), Some("42"), Some(&slot("17", "5")), "")
            .await
            .unwrap_err();

        match &err {
            BookingError::SlotNotReserved {
                appointment_id,
                slot_id,
                ..
            } => {
                assert_eq!(appointment_id.as_deref(), Some("7"));
                assert_eq!(slot_id, "17");
            }
            other => panic!("expected SlotNotReserved, got {:?}", other),
        }
        assert!(err.user_message().contains("could not be reserved"));
        assert_eq!(mock.get_requests().len(), 2);
    }
}
