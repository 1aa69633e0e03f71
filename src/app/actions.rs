//! Fetch and submit actions for the App.
//!
//! Every network call runs in a spawned task that sends one
//! [`AppMessage`] back. Tasks started for a screen are tracked by its
//! entry, so they are aborted if the screen is unmounted first.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::auth::{self, oauth};
use crate::booking;

use super::navigation::{NavAction, Route, ScreenId};
use super::screen_state::{Schedule, ScreenState, SpecialtyDoctors, SubmitState};
use super::{Alert, App, AppMessage};

impl App {
    // ========================================================================
    // Task plumbing
    // ========================================================================

    /// Run `task` and deliver its message, tied to `screen`'s lifetime.
    fn spawn_for<F>(&mut self, screen: ScreenId, task: F)
    where
        F: Future<Output = AppMessage> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        let handle = tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
        match self.router.get_mut(screen) {
            Some(entry) => entry.track(handle),
            None => handle.abort(),
        }
    }

    /// Run `task` and deliver its message, independent of any screen.
    fn spawn_detached<F>(&self, task: F)
    where
        F: Future<Output = AppMessage> + Send + 'static,
    {
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    // ========================================================================
    // Fetches
    // ========================================================================

    /// Start the fetches `screen` needs for its route.
    pub(super) fn load(&mut self, screen: ScreenId) {
        let Some(entry) = self.router.get_mut(screen) else {
            return;
        };
        let route = entry.route.clone();
        let api = self.services.api.clone();
        debug!("Loading {} for {:?}", screen, route);

        match route {
            Route::Home => {
                self.refresh_identity();
                self.spawn_for(screen, async move {
                    AppMessage::Specialties {
                        screen,
                        result: api.list_specialties().await,
                    }
                });
            }
            Route::Specialties => {
                self.spawn_for(screen, async move {
                    AppMessage::Specialties {
                        screen,
                        result: api.list_specialties().await,
                    }
                });
            }
            Route::SpecialtyDoctors { id } => {
                self.spawn_for(screen, async move {
                    let (specialty, doctors) =
                        tokio::join!(api.specialty(&id), api.specialty_doctors(&id));
                    let specialty = specialty
                        .map_err(|e| warn!("Could not load specialty {}: {}", id, e))
                        .ok();
                    AppMessage::SpecialtyDoctors {
                        screen,
                        result: doctors.map(|doctors| SpecialtyDoctors { specialty, doctors }),
                    }
                });
            }
            Route::Doctors => {
                self.spawn_for(screen, async move {
                    AppMessage::Doctors {
                        screen,
                        result: api.list_doctors().await,
                    }
                });
            }
            Route::DoctorDetail { id } => {
                self.spawn_for(screen, async move {
                    AppMessage::Doctor {
                        screen,
                        result: api.doctor(&id).await,
                    }
                });
            }
            Route::BookAppointment { doctor_id } => {
                self.spawn_for(screen, async move {
                    let (doctor, slots) =
                        tokio::join!(api.doctor(&doctor_id), api.doctor_slots(&doctor_id));
                    let result = doctor.and_then(|doctor| {
                        slots.map(|slots| Schedule { doctor, slots })
                    });
                    AppMessage::Schedule { screen, result }
                });
            }
            Route::ConfirmBooking { slot_id } => {
                self.spawn_for(screen, async move {
                    AppMessage::SlotDetail {
                        screen,
                        result: api.slot_booking(&slot_id).await,
                    }
                });
            }
            Route::AppointmentDetail { id } => {
                self.spawn_for(screen, async move {
                    AppMessage::Appointment {
                        screen,
                        result: api.appointment(&id).await,
                    }
                });
            }
            Route::Profile { id } => {
                let profile_api = api.clone();
                let profile_id = id.clone();
                self.spawn_for(screen, async move {
                    AppMessage::Profile {
                        screen,
                        result: profile_api.profile(&profile_id).await,
                    }
                });
                self.spawn_for(screen, async move {
                    AppMessage::ProfileAppointments {
                        screen,
                        result: api.profile_appointments(&id).await,
                    }
                });
            }
            Route::Confirmed
            | Route::Login
            | Route::Signup
            | Route::Blogs
            | Route::BlogDetail { .. } => {}
        }
    }

    /// Re-fetch the current screen. A screen with data keeps showing it
    /// while refreshing; a failed screen goes back to loading.
    pub fn refresh(&mut self) {
        let entry = self.router.current_mut();
        let screen = entry.id;
        let refreshable = match &mut entry.state {
            ScreenState::Home(s) => {
                s.specialties.begin_refresh();
                true
            }
            ScreenState::Specialties(s) => {
                s.items.begin_refresh();
                true
            }
            ScreenState::SpecialtyDoctors(s) => {
                s.data.begin_refresh();
                true
            }
            ScreenState::Doctors(s) => {
                s.items.begin_refresh();
                true
            }
            ScreenState::DoctorDetail(s) => {
                s.doctor.begin_refresh();
                true
            }
            ScreenState::BookAppointment(s) => {
                s.schedule.begin_refresh();
                true
            }
            ScreenState::ConfirmBooking(s) => {
                s.detail.begin_refresh();
                true
            }
            ScreenState::AppointmentDetail(s) => {
                s.appointment.begin_refresh();
                true
            }
            ScreenState::Profile(s) => {
                s.profile.begin_refresh();
                s.appointments.items.begin_refresh();
                true
            }
            ScreenState::Confirmed
            | ScreenState::Login(_)
            | ScreenState::Signup(_)
            | ScreenState::Blogs(_)
            | ScreenState::BlogDetail(_) => false,
        };
        if refreshable {
            self.mark_dirty();
            self.load(screen);
        }
    }

    /// Re-read the session and update the header.
    pub fn refresh_identity(&self) {
        let session = self.services.session.clone();
        self.spawn_detached(async move {
            AppMessage::Identity(auth::current_identity(&session).await)
        });
    }

    // ========================================================================
    // Submissions
    // ========================================================================

    /// Book the slot shown on the confirm screen.
    pub fn submit_booking(&mut self) {
        let entry = self.router.current_mut();
        let screen = entry.id;
        let ScreenState::ConfirmBooking(state) = &mut entry.state else {
            return;
        };
        if state.submit.is_submitting() {
            return;
        }
        state.submit = SubmitState::Submitting;
        let slot = state.detail.value().cloned();
        let reason = state.reason.value().to_string();

        let api = self.services.api.clone();
        let session = self.services.session.clone();
        self.mark_dirty();
        // Not tied to the screen: the two writes must not be cut apart.
        self.spawn_detached(async move {
            let patient_id = auth::current_user_id(&session).await;
            let result =
                booking::confirm_booking(&api, patient_id.as_deref(), slot.as_ref(), &reason)
                    .await;
            AppMessage::BookingFinished { screen, result }
        });
    }

    /// Send the review typed on the appointment screen.
    ///
    /// An unrated or empty draft is rejected here without a request.
    pub fn submit_review(&mut self) {
        let entry = self.router.current_mut();
        let screen = entry.id;
        let ScreenState::AppointmentDetail(state) = &mut entry.state else {
            return;
        };
        if state.submit.is_submitting() || !state.accepts_review() {
            return;
        }
        let draft = state.draft();
        if let Err(e) = draft.validate() {
            self.show_alert(Alert::error(e.user_message()));
            return;
        }
        state.submit = SubmitState::Submitting;
        let appointment = state.appointment.value().cloned();

        let api = self.services.api.clone();
        let session = self.services.session.clone();
        self.mark_dirty();
        self.spawn_for(screen, async move {
            let patient_id = auth::current_user_id(&session).await;
            let result = booking::submit_review(
                &api,
                patient_id.as_deref(),
                appointment.as_ref(),
                &draft,
            )
            .await;
            AppMessage::ReviewFinished { screen, result }
        });
    }

    pub fn submit_login(&mut self) {
        let entry = self.router.current_mut();
        let screen = entry.id;
        let ScreenState::Login(state) = &mut entry.state else {
            return;
        };
        if state.is_busy() {
            return;
        }
        state.submit = SubmitState::Submitting;
        let email = state.email.value().to_string();
        let password = state.password.value().to_string();

        let api = self.services.api.clone();
        let session = self.services.session.clone();
        self.mark_dirty();
        self.spawn_for(screen, async move {
            let result = auth::login(&api, &session, &email, &password).await;
            AppMessage::LoginFinished { screen, result }
        });
    }

    pub fn submit_signup(&mut self) {
        let entry = self.router.current_mut();
        let screen = entry.id;
        let ScreenState::Signup(state) = &mut entry.state else {
            return;
        };
        if state.submit.is_submitting() {
            return;
        }
        state.submit = SubmitState::Submitting;
        let name = state.name.value().to_string();
        let email = state.email.value().to_string();
        let password = state.password.value().to_string();

        let api = self.services.api.clone();
        self.mark_dirty();
        self.spawn_for(screen, async move {
            let result = auth::sign_up(&api, &name, &email, &password).await;
            AppMessage::SignupFinished { screen, result }
        });
    }

    /// Start the browser sign-in. Needs a configured Google client id.
    pub fn start_google_sign_in(&mut self) {
        let Some(config) = self.services.config.oauth() else {
            self.show_alert(Alert::new(
                "Login Error",
                oauth::OAuthError::NotConfigured.user_message(),
            ));
            return;
        };

        let entry = self.router.current_mut();
        let screen = entry.id;
        let ScreenState::Login(state) = &mut entry.state else {
            return;
        };
        if state.is_busy() {
            return;
        }
        state.google = SubmitState::Submitting;

        let api = self.services.api.clone();
        let session = self.services.session.clone();
        let http = self.services.http.clone();
        info!("Starting Google sign-in");
        self.mark_dirty();
        self.spawn_for(screen, async move {
            let result =
                oauth::sign_in_with_google(&api, &session, http, &config, oauth::open_in_browser)
                    .await;
            AppMessage::GoogleFinished { screen, result }
        });
    }

    /// Clear the session, then return home.
    pub fn logout(&mut self) {
        let session = self.services.session.clone();
        self.spawn_detached(async move {
            auth::logout(&session).await;
            AppMessage::LoggedOut
        });
    }

    /// Open the signed-in user's profile, or the login screen.
    pub fn open_account(&mut self) {
        let route = match self.user_id() {
            Some(id) => Route::Profile { id: id.to_string() },
            None => Route::Login,
        };
        self.navigate(NavAction::Push(route));
    }
}
