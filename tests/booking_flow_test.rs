//! Booking flow tests: appointment creation followed by the slot update.
//!
//! Covers the write ordering and what the patient sees when either write
//! fails, both through `confirm_booking` and through the app.

mod common;

use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use medicare::adapters::InMemoryTokenStore;
use medicare::app::{NavAction, Route, ScreenState};
use medicare::booking::{confirm_booking, BookingError};
use medicare::models::SlotBooking;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn slot_17() -> SlotBooking {
    serde_json::from_value(slot_booking_json("17", "5")).unwrap()
}

async fn mount_slot_detail(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/time-slots/book/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(slot_booking_json("17", "5")))
        .mount(server)
        .await;
}

fn enter() -> KeyEvent {
    KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
}

#[tokio::test]
async fn test_booking_creates_appointment_then_reserves_slot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appointments"))
        .and(body_json(json!({
            "patientId": "42",
            "doctorId": "5",
            "slotId": "17",
            "reason": "Checkup",
            "status": "confirmed"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 99})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/time-slots/17"))
        .and(body_json(json!({"isBooked": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = api_for(&server, &InMemoryTokenStore::new());
    let receipt = confirm_booking(&api, Some("42"), Some(&slot_17()), "  Checkup ")
        .await
        .unwrap();

    assert_eq!(receipt.appointment_id.as_deref(), Some("99"));
    assert_eq!(receipt.slot_id, "17");

    let requests = server.received_requests().await.unwrap();
    let order: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(order, vec!["POST", "PUT"]);
}

#[tokio::test]
async fn test_failed_appointment_never_touches_slot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Slot taken"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (api, _) = api_for(&server, &InMemoryTokenStore::new());
    let err = confirm_booking(&api, Some("42"), Some(&slot_17()), "")
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::AppointmentFailed(_)));
    assert_eq!(err.user_message(), "Slot taken");
}

#[tokio::test]
async fn test_failed_slot_update_reports_partial_booking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"appointmentId": "99"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/time-slots/17"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (api, _) = api_for(&server, &InMemoryTokenStore::new());
    let err = confirm_booking(&api, Some("42"), Some(&slot_17()), "")
        .await
        .unwrap_err();

    match err {
        BookingError::SlotNotReserved {
            appointment_id,
            slot_id,
            ..
        } => {
            assert_eq!(appointment_id.as_deref(), Some("99"));
            assert_eq!(slot_id, "17");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_signed_out_booking_makes_no_requests() {
    let server = MockServer::start().await;
    let (api, _) = api_for(&server, &InMemoryTokenStore::new());

    let err = confirm_booking(&api, None, Some(&slot_17()), "")
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::NotAuthenticated));
    assert!(err.is_local());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_app_confirms_and_lands_on_confirmation() {
    let server = MockServer::start().await;
    mount_slot_detail(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 99})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/time-slots/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = TestApp::new(&server).signed_in().build();
    app.navigate(NavAction::Push(Route::ConfirmBooking {
        slot_id: "17".to_string(),
    }));
    settle(&mut app).await;

    let screen = render_to_string(&app, 80, 24);
    assert!(screen.contains("Tuesday, March 4, 2025"));
    assert!(screen.contains("Confirm Appointment"));

    app.handle_key(enter());
    settle(&mut app).await;

    let alert = app.alert.clone().expect("success alert");
    assert_eq!(alert.title, "Success");
    assert_eq!(alert.message, "Appointment confirmed successfully!");

    app.handle_key(enter());
    assert_eq!(app.current_route(), &Route::Confirmed);
    assert!(matches!(app.router.current().state, ScreenState::Confirmed));
}

#[tokio::test]
async fn test_app_shows_error_when_appointment_fails() {
    let server = MockServer::start().await;
    mount_slot_detail(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/appointments"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut app = TestApp::new(&server).signed_in().build();
    app.navigate(NavAction::Push(Route::ConfirmBooking {
        slot_id: "17".to_string(),
    }));
    settle(&mut app).await;
    app.handle_key(enter());
    settle(&mut app).await;

    let alert = app.alert.clone().expect("error alert");
    assert_eq!(alert.title, "Error");
    assert!(alert.then.is_none());

    app.handle_key(enter());
    assert!(matches!(app.current_route(), Route::ConfirmBooking { .. }));
}

#[tokio::test]
async fn test_missing_slot_detail_shows_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/time-slots/book/17"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut app = TestApp::new(&server).signed_in().build();
    app.navigate(NavAction::Push(Route::ConfirmBooking {
        slot_id: "17".to_string(),
    }));
    settle(&mut app).await;

    let alert = app.alert.clone().expect("fetch failure alert");
    assert_eq!(alert.message, "Could not fetch appointment details");

    app.handle_key(enter());
    let screen = render_to_string(&app, 80, 24);
    assert!(screen.contains("Appointment details not found"));
}
