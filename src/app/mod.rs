//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Router`] - The stack of mounted screens
//! - [`ScreenState`] - View state of one screen
//! - [`Alert`] - Modal messages
//! - [`AppMessage`] - Messages for async communication

mod actions;
mod handlers;
mod keys;
mod messages;
pub mod navigation;
pub mod screen_state;
mod types;

pub use messages::AppMessage;
pub use navigation::{NavAction, Route, Router, ScreenEntry, ScreenId};
pub use screen_state::{FetchState, LoadError, ScreenState, SubmitState};
pub use types::Alert;

use tokio::sync::mpsc;

use crate::auth::IdentityClaims;
use crate::services::Services;

/// Main application state
pub struct App {
    pub services: Services,
    pub router: Router<ScreenState>,
    /// Modal shown above the current screen
    pub alert: Option<Alert>,
    /// Claims of the signed-in user, for the header
    pub identity: Option<IdentityClaims>,
    /// Flag to quit the application
    pub should_quit: bool,
    /// Receiver for async messages
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Tick counter for animations
    pub tick_count: u64,
    /// Dirty flag: when true, the UI needs to be redrawn.
    /// Set on state mutations, cleared after each draw.
    pub needs_redraw: bool,
}

impl App {
    /// Create the app on the home screen. Nothing is fetched until
    /// [`start`](Self::start).
    pub fn new(services: Services) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            services,
            router: Router::new(Route::Home, ScreenState::for_route(&Route::Home)),
            alert: None,
            identity: None,
            should_quit: false,
            message_rx: Some(message_rx),
            message_tx,
            tick_count: 0,
            needs_redraw: true,
        }
    }

    /// Kick off the home screen's fetches. Must run inside a tokio runtime.
    pub fn start(&mut self) {
        let id = self.router.current().id;
        self.load(id);
    }

    /// Apply a navigation request, mounting and loading any new screen.
    pub fn navigate(&mut self, action: NavAction) {
        self.mark_dirty();
        tracing::debug!("Navigate: {:?}", action);
        let mounted = match action {
            NavAction::Push(route) => {
                let state = ScreenState::for_route(&route);
                Some(self.router.push(route, state))
            }
            NavAction::Replace(route) => {
                let state = ScreenState::for_route(&route);
                Some(self.router.replace(route, state))
            }
            NavAction::Back => {
                self.router.back();
                None
            }
            NavAction::Reset => Some(
                self.router
                    .reset(Route::Home, ScreenState::for_route(&Route::Home)),
            ),
            NavAction::PopReplace(route) => {
                self.router.back();
                let state = ScreenState::for_route(&route);
                Some(self.router.replace(route, state))
            }
        };
        if let Some(id) = mounted {
            self.load(id);
        }
    }

    /// The route on top of the stack.
    pub fn current_route(&self) -> &Route {
        &self.router.current().route
    }

    /// The signed-in user's id, from the header identity.
    pub fn user_id(&self) -> Option<&str> {
        self.identity
            .as_ref()
            .and_then(|claims| claims.sub.as_deref())
            .filter(|sub| !sub.is_empty())
    }

    /// Show `alert`, replacing any alert already open.
    pub fn show_alert(&mut self, alert: Alert) {
        tracing::debug!("Alert: {} - {}", alert.title, alert.message);
        self.alert = Some(alert);
        self.mark_dirty();
    }

    /// Close the open alert and run its follow-up navigation.
    pub fn dismiss_alert(&mut self) {
        if let Some(alert) = self.alert.take() {
            self.mark_dirty();
            if let Some(action) = alert.then {
                self.navigate(action);
            }
        }
    }

    /// Whether the current screen is waiting on the network.
    pub fn is_busy(&self) -> bool {
        self.router.current().state.is_busy()
    }

    /// Increment tick counter. Redraws while something is loading so the
    /// spinner animates.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_busy() {
            self.mark_dirty();
        }
    }

    /// Mark the UI as needing a redraw.
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::test_support::*;
    use super::*;
    use crate::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse};
    use serde_json::json;

    fn app() -> (App, Arc<MockHttpClient>) {
        let http = Arc::new(MockHttpClient::new());
        let app = app_with(http.clone(), InMemoryTokenStore::new());
        (app, http)
    }

    #[tokio::test]
    async fn test_starts_on_home() {
        let (app, _) = app();
        assert_eq!(app.current_route(), &Route::Home);
        assert!(app.needs_redraw);
        assert!(app.alert.is_none());
    }

    #[tokio::test]
    async fn test_push_and_back() {
        let (mut app, http) = app();
        http.set_response(&format!("{BASE}/api/doctors"), MockResponse::json(200, json!([])));

        app.navigate(NavAction::Push(Route::Doctors));
        assert_eq!(app.current_route(), &Route::Doctors);

        app.navigate(NavAction::Back);
        assert_eq!(app.current_route(), &Route::Home);
    }

    #[tokio::test]
    async fn test_pop_replace() {
        let (mut app, _) = app();
        app.navigate(NavAction::Push(Route::Blogs));
        app.navigate(NavAction::Push(Route::BlogDetail { id: 1 }));
        app.navigate(NavAction::PopReplace(Route::Confirmed));

        let routes: Vec<Route> = app.router.routes().into_iter().cloned().collect();
        assert_eq!(routes, vec![Route::Home, Route::Confirmed]);
    }

    #[tokio::test]
    async fn test_reset_returns_home() {
        let (mut app, _) = app();
        app.navigate(NavAction::Push(Route::Login));
        app.navigate(NavAction::Push(Route::Signup));
        app.navigate(NavAction::Reset);
        assert_eq!(app.router.depth(), 1);
        assert_eq!(app.current_route(), &Route::Home);
    }

    #[tokio::test]
    async fn test_dismiss_alert_runs_follow_up() {
        let (mut app, _) = app();
        app.navigate(NavAction::Push(Route::Signup));
        app.show_alert(Alert::new("Success", "Done").then(NavAction::Replace(Route::Login)));

        app.dismiss_alert();
        assert!(app.alert.is_none());
        assert_eq!(app.current_route(), &Route::Login);
    }

    #[tokio::test]
    async fn test_tick_redraws_while_loading() {
        let (mut app, _) = app();
        app.needs_redraw = false;
        app.tick();
        assert_eq!(app.tick_count, 1);
        // Home starts in the loading state
        assert!(app.needs_redraw);

        app.router.current_mut().state = ScreenState::Confirmed;
        app.needs_redraw = false;
        app.tick();
        assert!(!app.needs_redraw);
    }

    #[tokio::test]
    async fn test_user_id_ignores_empty_sub() {
        let (mut app, _) = app();
        app.identity = Some(IdentityClaims {
            sub: Some(String::new()),
            ..Default::default()
        });
        assert!(app.user_id().is_none());

        app.identity = Some(IdentityClaims {
            sub: Some("42".to_string()),
            ..Default::default()
        });
        assert_eq!(app.user_id(), Some("42"));
    }
}
