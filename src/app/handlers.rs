//! Message handling for the App.

use tracing::{debug, error, info, warn};

use crate::auth::OAuthError;
use crate::booking::BookingError;

use super::navigation::{NavAction, Route};
use super::screen_state::{LoadError, ScreenState, SubmitState};
use super::{Alert, App, AppMessage};

/// What to do once the screen state has been updated.
enum FollowUp {
    None,
    Alert(Alert),
    Navigate(NavAction),
}

impl App {
    /// Handle an incoming async message.
    /// All message handlers mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();

        match msg {
            AppMessage::Identity(claims) => {
                debug!("Identity: {:?}", claims.as_ref().and_then(|c| c.sub.as_deref()));
                self.identity = claims;
                return;
            }
            AppMessage::LoggedOut => {
                self.identity = None;
                self.navigate(NavAction::Reset);
                return;
            }
            _ => {}
        }

        let Some(screen) = msg.screen() else {
            return;
        };
        let kind = msg.kind();
        let Some(entry) = self.router.get_mut(screen) else {
            debug!("Discarding {} for unmounted {}", kind, screen);
            return;
        };

        let follow_up = match (msg, &mut entry.state) {
            (AppMessage::Specialties { result, .. }, ScreenState::Home(state)) => {
                if let Err(e) = &result {
                    error!("Error fetching specialties: {}", e);
                }
                state.specialties.finish(result.map_err(LoadError::from));
                FollowUp::None
            }
            (AppMessage::Specialties { result, .. }, ScreenState::Specialties(state)) => {
                state.finish(result.map_err(log_load_error("specialties")));
                FollowUp::None
            }
            (AppMessage::SpecialtyDoctors { result, .. }, ScreenState::SpecialtyDoctors(state)) => {
                state
                    .data
                    .finish(result.map_err(log_load_error("specialty doctors")));
                let count = state.data.value().map_or(0, |d| d.doctors.len());
                state.selected = state.selected.min(count.saturating_sub(1));
                FollowUp::None
            }
            (AppMessage::Doctors { result, .. }, ScreenState::Doctors(state)) => {
                state.finish(result.map_err(log_load_error("doctors")));
                FollowUp::None
            }
            (AppMessage::Doctor { result, .. }, ScreenState::DoctorDetail(state)) => {
                state.doctor.finish(result.map_err(log_load_error("doctor")));
                FollowUp::None
            }
            (AppMessage::Schedule { result, .. }, ScreenState::BookAppointment(state)) => {
                state.finish(result.map_err(log_load_error("schedule")));
                FollowUp::None
            }
            (AppMessage::SlotDetail { result, .. }, ScreenState::ConfirmBooking(state)) => {
                let failed = result.is_err();
                state
                    .detail
                    .finish(result.map_err(log_load_error("appointment details")));
                if failed {
                    FollowUp::Alert(Alert::error("Could not fetch appointment details"))
                } else {
                    FollowUp::None
                }
            }
            (AppMessage::Appointment { result, .. }, ScreenState::AppointmentDetail(state)) => {
                state
                    .appointment
                    .finish(result.map_err(log_load_error("appointment")));
                FollowUp::None
            }
            (AppMessage::Profile { result, .. }, ScreenState::Profile(state)) => {
                state.profile.finish(result.map_err(log_load_error("profile")));
                FollowUp::None
            }
            (AppMessage::ProfileAppointments { result, .. }, ScreenState::Profile(state)) => {
                state
                    .appointments
                    .finish(result.map_err(log_load_error("appointments")));
                FollowUp::None
            }
            (AppMessage::BookingFinished { result, .. }, ScreenState::ConfirmBooking(state)) => {
                state.submit = SubmitState::Idle;
                match result {
                    Ok(receipt) => {
                        info!("Booked slot {}", receipt.slot_id);
                        state.reason.clear();
                        FollowUp::Alert(
                            Alert::new("Success", "Appointment confirmed successfully!")
                                .then(NavAction::PopReplace(Route::Confirmed)),
                        )
                    }
                    Err(e) => FollowUp::Alert(booking_alert(&e)),
                }
            }
            (AppMessage::ReviewFinished { result, .. }, ScreenState::AppointmentDetail(state)) => {
                state.submit = SubmitState::Idle;
                match result {
                    Ok(()) => {
                        info!("Review submitted");
                        state.clear_review();
                        FollowUp::Alert(Alert::new("Success", "Thank you for your review!"))
                    }
                    Err(e) => {
                        warn!("Review not submitted: {}", e);
                        FollowUp::Alert(Alert::error(e.user_message()))
                    }
                }
            }
            (AppMessage::LoginFinished { result, .. }, ScreenState::Login(state)) => {
                state.submit = SubmitState::Idle;
                match result {
                    Ok(()) => {
                        state.password.clear();
                        FollowUp::Navigate(NavAction::Reset)
                    }
                    Err(e) => {
                        warn!("Login failed: {}", e);
                        FollowUp::Alert(Alert::new("Login failed", e.user_message()))
                    }
                }
            }
            (AppMessage::SignupFinished { result, .. }, ScreenState::Signup(state)) => {
                state.submit = SubmitState::Idle;
                match result {
                    Ok(()) => FollowUp::Alert(
                        Alert::new("Success", "Account created. Please log in.")
                            .then(NavAction::PopReplace(Route::Login)),
                    ),
                    Err(e) => {
                        warn!("Sign up failed: {}", e);
                        FollowUp::Alert(Alert::error(e.user_message()))
                    }
                }
            }
            (AppMessage::GoogleFinished { result, .. }, ScreenState::Login(state)) => {
                state.google = SubmitState::Idle;
                match result {
                    Ok(()) => FollowUp::Navigate(NavAction::Reset),
                    Err(e) => {
                        warn!("Google sign-in failed: {}", e);
                        FollowUp::Alert(google_alert(&e))
                    }
                }
            }
            (msg, state) => {
                warn!(
                    "Unexpected {} for screen in state {:?}",
                    msg.kind(),
                    std::mem::discriminant(state)
                );
                FollowUp::None
            }
        };

        match follow_up {
            FollowUp::None => {}
            FollowUp::Alert(alert) => self.show_alert(alert),
            FollowUp::Navigate(action) => self.navigate(action),
        }
    }
}

fn log_load_error(what: &'static str) -> impl Fn(crate::api::ApiError) -> LoadError {
    move |e| {
        error!("Error fetching {}: {}", what, e);
        LoadError::from(e)
    }
}

fn booking_alert(err: &BookingError) -> Alert {
    match err {
        BookingError::SlotNotReserved { .. } => {
            Alert::new("Booking incomplete", err.user_message())
        }
        _ => {
            if !err.is_local() {
                error!("Booking failed: {}", err);
            }
            Alert::error(err.user_message())
        }
    }
}

fn google_alert(err: &OAuthError) -> Alert {
    let title = match err {
        OAuthError::MissingToken => "Login Failed",
        _ => "Login Error",
    };
    Alert::new(title, err.user_message())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::super::test_support::*;
    use super::*;
    use crate::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse};
    use crate::api::ApiError;
    use crate::auth::AuthFlowError;
    use serde_json::json;

    fn app() -> (App, Arc<MockHttpClient>, InMemoryTokenStore) {
        let http = Arc::new(MockHttpClient::new());
        http.set_default_response(MockResponse::json(200, json!([])));
        let store = InMemoryTokenStore::new();
        (app_with(http.clone(), store.clone()), http, store)
    }

    #[tokio::test]
    async fn test_result_for_unmounted_screen_is_discarded() {
        let (mut app, _, _) = app();
        app.navigate(NavAction::Push(Route::Doctors));
        let stale = app.router.current().id;
        app.navigate(NavAction::Back);

        app.handle_message(AppMessage::Doctors {
            screen: stale,
            result: Ok(vec![]),
        });
        assert_eq!(app.current_route(), &Route::Home);
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn test_home_specialty_failure_only_logged() {
        let (mut app, _, _) = app();
        let home = app.router.current().id;
        app.handle_message(AppMessage::Specialties {
            screen: home,
            result: Err(ApiError::Server {
                status: 500,
                message: String::new(),
            }),
        });
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn test_slot_detail_failure_alerts() {
        let (mut app, _, _) = app();
        app.navigate(NavAction::Push(Route::ConfirmBooking {
            slot_id: "17".to_string(),
        }));
        let screen = app.router.current().id;
        app.handle_message(AppMessage::SlotDetail {
            screen,
            result: Err(ApiError::Server {
                status: 404,
                message: String::new(),
            }),
        });
        let alert = app.alert.as_ref().expect("alert shown");
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, "Could not fetch appointment details");
    }

    #[tokio::test]
    async fn test_login_success_resets_to_home() {
        let (mut app, _, _) = app();
        app.navigate(NavAction::Push(Route::Doctors));
        app.navigate(NavAction::Push(Route::Login));
        let screen = app.router.current().id;

        app.handle_message(AppMessage::LoginFinished {
            screen,
            result: Ok(()),
        });
        assert_eq!(app.router.depth(), 1);
        assert_eq!(app.current_route(), &Route::Home);
    }

    #[tokio::test]
    async fn test_login_failure_uses_server_text() {
        let (mut app, _, _) = app();
        app.navigate(NavAction::Push(Route::Login));
        let screen = app.router.current().id;

        app.handle_message(AppMessage::LoginFinished {
            screen,
            result: Err(AuthFlowError::Login(ApiError::Server {
                status: 401,
                message: "User not found".to_string(),
            })),
        });
        let alert = app.alert.as_ref().expect("alert shown");
        assert_eq!(alert.title, "Login failed");
        assert_eq!(alert.message, "User not found");
        assert_eq!(app.current_route(), &Route::Login);
    }

    #[tokio::test]
    async fn test_signup_success_then_login() {
        let (mut app, _, _) = app();
        app.navigate(NavAction::Push(Route::Login));
        app.navigate(NavAction::Push(Route::Signup));
        let screen = app.router.current().id;

        app.handle_message(AppMessage::SignupFinished {
            screen,
            result: Ok(()),
        });
        assert_eq!(
            app.alert.as_ref().map(|a| a.message.as_str()),
            Some("Account created. Please log in.")
        );

        app.dismiss_alert();
        let routes: Vec<Route> = app.router.routes().into_iter().cloned().collect();
        assert_eq!(routes, vec![Route::Home, Route::Login]);
    }

    #[tokio::test]
    async fn test_google_missing_token_alert() {
        let (mut app, _, _) = app();
        app.navigate(NavAction::Push(Route::Login));
        let screen = app.router.current().id;

        app.handle_message(AppMessage::GoogleFinished {
            screen,
            result: Err(OAuthError::MissingToken),
        });
        let alert = app.alert.as_ref().expect("alert shown");
        assert_eq!(alert.title, "Login Failed");
        assert_eq!(alert.message, "Invalid token from server");
    }

    #[tokio::test]
    async fn test_logged_out_clears_identity() {
        let (mut app, _, store) = app();
        store.set_token(Some(token_for(json!({"sub": "42"}))));
        app.identity = Some(crate::auth::IdentityClaims {
            sub: Some("42".to_string()),
            ..Default::default()
        });
        app.navigate(NavAction::Push(Route::Profile {
            id: "42".to_string(),
        }));

        app.logout();
        settle(&mut app).await;

        assert!(app.identity.is_none());
        assert!(store.token().is_none());
        assert_eq!(app.current_route(), &Route::Home);
    }
}
