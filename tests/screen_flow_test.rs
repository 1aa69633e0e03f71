//! Browsing flows driven through key events and checked on the rendered
//! screen.

mod common;

use std::time::Duration;

use common::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use medicare::app::{App, FetchState, NavAction, Route, ScreenState};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn press(app: &mut App, c: char) {
    app.handle_key(key(KeyCode::Char(c)));
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_home_lists_specialties_and_articles() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/specialties",
        json!([
            {"id": 1, "specialty": "Cardiology"},
            {"id": 2, "specialty": "Dermatology"}
        ]),
    )
    .await;

    let mut app = TestApp::new(&server).build();
    app.start();
    settle(&mut app).await;

    let screen = render_to_string(&app, 100, 40);
    assert!(screen.contains("Welcome back!"));
    assert!(screen.contains("Consult Specialized Doctors"));
    assert!(screen.contains("Cardiology"));
    assert!(screen.contains("Health Articles"));
    assert!(screen.contains("Not signed in"));
}

#[tokio::test]
async fn test_home_survives_specialties_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/specialties"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut app = TestApp::new(&server).build();
    app.start();
    settle(&mut app).await;

    assert!(app.alert.is_none());
    let screen = render_to_string(&app, 100, 40);
    assert!(screen.contains("Specialties unavailable"));
    assert!(screen.contains("Health Articles"));
}

#[tokio::test]
async fn test_browse_specialty_to_doctor() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/specialties", json!([{"id": 3, "specialty": "Neurology"}])).await;
    mount_json(
        &server,
        "/api/specialties/3",
        json!({"id": 3, "specialty": "Neurology", "description": "Brain and nerves"}),
    )
    .await;
    mount_json(
        &server,
        "/api/specialties/3/doctors",
        json!([{"id": 9, "name": "Dr. Lee", "qualifications": "MBBS", "yearsExperience": 7}]),
    )
    .await;
    mount_json(
        &server,
        "/api/doctors/9",
        json!({"id": 9, "name": "Dr. Lee", "bio": "Treats headaches.", "specialty": "Neurology"}),
    )
    .await;

    let mut app = TestApp::new(&server).build();
    app.start();
    settle(&mut app).await;

    press(&mut app, 's');
    settle(&mut app).await;
    assert_eq!(app.current_route(), &Route::Specialties);
    assert!(render_to_string(&app, 80, 24).contains("Neurology"));

    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;
    assert_eq!(
        app.current_route(),
        &Route::SpecialtyDoctors { id: "3".to_string() }
    );
    let screen = render_to_string(&app, 80, 24);
    assert!(screen.contains("Brain and nerves"));
    assert!(screen.contains("MBBS · 7 years experience"));

    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;
    let screen = render_to_string(&app, 80, 24);
    assert!(screen.contains("Treats headaches."));
    assert!(screen.contains("Book Appointment"));

    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Esc));
    assert_eq!(app.current_route(), &Route::Home);
}

#[tokio::test]
async fn test_unknown_doctor_shows_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/doctors/77"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut app = TestApp::new(&server).build();
    app.navigate(NavAction::Push(Route::DoctorDetail {
        id: "77".to_string(),
    }));
    settle(&mut app).await;

    assert!(render_to_string(&app, 80, 24).contains("Doctor not found"));
}

#[tokio::test]
async fn test_booked_slots_cannot_be_chosen() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/doctors/5", json!({"id": 5, "name": "Dr. Rao"})).await;
    mount_json(
        &server,
        "/api/time-slots/5",
        json!([
            {"id": 1, "doctorId": 5, "date": "2025-03-04", "startTime": "09:00", "endTime": "09:30", "isBooked": true},
            {"id": 2, "doctorId": 5, "date": "2025-03-04", "startTime": "10:00", "endTime": "10:30", "isBooked": false}
        ]),
    )
    .await;
    mount_json(&server, "/api/time-slots/book/2", slot_booking_json("2", "5")).await;

    let mut app = TestApp::new(&server).build();
    app.navigate(NavAction::Push(Route::BookAppointment {
        doctor_id: "5".to_string(),
    }));
    settle(&mut app).await;

    let screen = render_to_string(&app, 100, 30);
    assert!(screen.contains("Tue, Mar 4, 2025"));
    assert!(screen.contains("9:00 AM - 9:30 AM  Booked"));

    // The first free slot is preselected
    app.handle_key(key(KeyCode::Tab));
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(
        app.current_route(),
        &Route::ConfirmBooking {
            slot_id: "2".to_string()
        }
    );

    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Up));
    app.handle_key(key(KeyCode::Enter));
    assert!(matches!(app.current_route(), Route::BookAppointment { .. }));
}

#[tokio::test]
async fn test_profile_without_appointments() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/profile/42",
        json!({"id": 42, "name": "Ann", "email": "ann@example.com"}),
    )
    .await;
    mount_json(&server, "/api/profile/user-appointments/42", json!([])).await;
    mount_json(&server, "/api/specialties", json!([])).await;

    let mut app = TestApp::new(&server).signed_in().build();
    app.start();
    settle(&mut app).await;

    press(&mut app, 'p');
    settle(&mut app).await;
    assert_eq!(app.current_route(), &Route::Profile { id: "42".to_string() });

    let screen = render_to_string(&app, 80, 24);
    assert!(screen.contains("ann@example.com"));
    assert!(screen.contains("No appointments found"));
}

#[tokio::test]
async fn test_review_for_completed_appointment() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/appointments/7",
        json!({
            "id": 7, "doctorId": 5, "doctorName": "Dr. Rao", "specialty": "Cardiology",
            "appointmentDate": "2025-03-04", "appointmentTime": "09:00", "status": "completed"
        }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/reviews"))
        .and(wiremock::matchers::body_json(json!({
            "patientId": "42",
            "doctorId": "5",
            "rating": 4,
            "comment": "Great"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let mut app = TestApp::new(&server).signed_in().build();
    app.navigate(NavAction::Push(Route::AppointmentDetail {
        id: "7".to_string(),
    }));
    settle(&mut app).await;
    assert!(render_to_string(&app, 80, 30).contains("Rate your visit"));

    app.handle_key(key(KeyCode::Enter));
    assert_eq!(
        app.alert.as_ref().map(|a| a.message.as_str()),
        Some("Please select a rating")
    );
    app.handle_key(key(KeyCode::Enter));

    for _ in 0..4 {
        app.handle_key(key(KeyCode::Right));
    }
    for c in "Great".chars() {
        press(&mut app, c);
    }
    app.handle_key(key(KeyCode::Enter));
    settle(&mut app).await;

    assert_eq!(
        app.alert.as_ref().map(|a| a.message.as_str()),
        Some("Thank you for your review!")
    );
    let ScreenState::AppointmentDetail(state) = &app.router.current().state else {
        panic!("expected appointment detail");
    };
    assert_eq!(state.review.rating, 0);
    assert!(state.comment.value().is_empty());
}

#[tokio::test]
async fn test_result_for_closed_screen_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/doctors"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": 1, "name": "Dr. Slow"}]))
                .set_delay(Duration::from_millis(150)),
        )
        .mount(&server)
        .await;
    mount_json(&server, "/api/specialties", json!([])).await;

    let mut app = TestApp::new(&server).build();
    app.navigate(NavAction::Push(Route::Doctors));
    app.navigate(NavAction::Back);
    app.navigate(NavAction::Push(Route::Specialties));
    settle(&mut app).await;

    let ScreenState::Specialties(list) = &app.router.current().state else {
        panic!("expected specialties");
    };
    assert!(matches!(list.items, FetchState::Loaded(ref items) if items.is_empty()));
}

#[tokio::test]
async fn test_refresh_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/doctors"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_json(&server, "/api/doctors", json!([{"id": 1, "name": "Dr. Back"}])).await;

    let mut app = TestApp::new(&server).build();
    app.navigate(NavAction::Push(Route::Doctors));
    settle(&mut app).await;
    assert!(render_to_string(&app, 80, 24).contains("Press r to try again"));

    press(&mut app, 'r');
    settle(&mut app).await;
    assert!(render_to_string(&app, 80, 24).contains("Dr. Back"));
}

#[tokio::test]
async fn test_article_reader() {
    let server = MockServer::start().await;
    let mut app = TestApp::new(&server).build();

    press(&mut app, 'b');
    assert_eq!(app.current_route(), &Route::Blogs);
    app.handle_key(key(KeyCode::Enter));
    assert!(matches!(app.current_route(), Route::BlogDetail { .. }));
    assert!(render_to_string(&app, 80, 24).contains("by "));

    app.navigate(NavAction::Push(Route::BlogDetail { id: 9999 }));
    assert!(render_to_string(&app, 80, 24).contains("Blog not found"));
}
