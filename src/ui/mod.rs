//! UI rendering for MediCare
//!
//! Every frame is three bands:
//! - Header with the app name, the current screen and who is signed in
//! - Body drawn from the current screen's [`ScreenState`]
//! - Footer with the keys that work on this screen
//!
//! An open [`Alert`](crate::app::Alert) is drawn over everything.
//!
//! Render functions are pure: they read state and never mutate the app.

mod alert;
mod appointment;
mod articles;
mod auth;
mod browse;
mod components;
mod doctor;
mod home;
pub mod helpers;
mod layout;
mod profile;
mod theme;

pub use layout::{breakpoints, LayoutContext};

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Route, ScreenState};
use crate::auth::IdentityClaims;
use theme::{COLOR_ACCENT, COLOR_DIM, COLOR_HEADER, COLOR_MUTED};

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the whole UI for the current screen.
pub fn render(frame: &mut Frame, app: &App) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let entry = app.router.current();
    render_header(frame, header, &entry.route, app.identity.as_ref());
    render_body(frame, body, app);
    frame.render_widget(
        Paragraph::new(footer_line(&entry.route, &entry.state)),
        footer,
    );

    if let Some(alert) = &app.alert {
        alert::render_alert(frame, frame.area(), alert);
    }
}

fn render_header(frame: &mut Frame, area: Rect, route: &Route, identity: Option<&IdentityClaims>) {
    let left = Line::from(vec![
        Span::styled(
            " MediCare",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" · ", Style::default().fg(COLOR_DIM)),
        Span::styled(route.title(), Style::default().fg(COLOR_HEADER)),
    ]);
    frame.render_widget(Paragraph::new(left), area);

    let right = identity_label(identity);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{} ", right),
            Style::default().fg(COLOR_MUTED),
        )))
        .right_aligned(),
        area,
    );
}

/// Who the header says is signed in.
pub fn identity_label(identity: Option<&IdentityClaims>) -> String {
    match identity {
        Some(claims) => match claims.display_name() {
            Some(name) => format!("● {}", name),
            None => "● Signed in".to_string(),
        },
        None => "Not signed in".to_string(),
    }
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let tick = app.tick_count;
    let entry = app.router.current();
    match &entry.state {
        ScreenState::Home(state) => {
            home::render_home(frame, area, state, app.identity.as_ref(), tick)
        }
        ScreenState::Specialties(state) => browse::render_specialties(frame, area, state, tick),
        ScreenState::SpecialtyDoctors(state) => {
            browse::render_specialty_doctors(frame, area, state, tick)
        }
        ScreenState::Doctors(state) => browse::render_doctors(frame, area, state, tick),
        ScreenState::DoctorDetail(state) => doctor::render_doctor_detail(frame, area, state, tick),
        ScreenState::BookAppointment(state) => {
            doctor::render_book_appointment(frame, area, state, tick)
        }
        ScreenState::ConfirmBooking(state) => {
            doctor::render_confirm_booking(frame, area, state, tick)
        }
        ScreenState::Confirmed => doctor::render_confirmed(frame, area),
        ScreenState::AppointmentDetail(state) => {
            appointment::render_appointment_detail(frame, area, state, tick)
        }
        ScreenState::Profile(state) => profile::render_profile(frame, area, state, tick),
        ScreenState::Login(state) => auth::render_login(frame, area, state, tick),
        ScreenState::Signup(state) => auth::render_signup(frame, area, state, tick),
        ScreenState::Blogs(state) => articles::render_blogs(frame, area, state),
        ScreenState::BlogDetail(state) => {
            let id = match &entry.route {
                Route::BlogDetail { id } => *id,
                _ => 0,
            };
            articles::render_blog_detail(frame, area, id, state)
        }
    }
}

// ============================================================================
// Footer
// ============================================================================

fn keybinds(route: &Route, state: &ScreenState) -> Vec<(&'static str, &'static str)> {
    let mut binds = match state {
        ScreenState::Home(_) => vec![
            ("j/k", "move"),
            ("Enter", "open"),
            ("d", "doctors"),
            ("s", "specialties"),
            ("b", "articles"),
            ("p", "account"),
        ],
        ScreenState::Specialties(_)
        | ScreenState::SpecialtyDoctors(_)
        | ScreenState::Doctors(_)
        | ScreenState::Blogs(_) => vec![("j/k", "move"), ("Enter", "open")],
        ScreenState::DoctorDetail(_) => vec![("Enter", "book")],
        ScreenState::BookAppointment(_) => vec![
            ("←/→", "date"),
            ("↑/↓", "move"),
            ("Tab", "switch"),
            ("Enter", "choose"),
        ],
        ScreenState::ConfirmBooking(_) => vec![("Enter", "confirm")],
        ScreenState::Confirmed => vec![("Enter", "home")],
        ScreenState::AppointmentDetail(state) if state.accepts_review() => {
            vec![("←/→", "rating"), ("Enter", "submit review")]
        }
        ScreenState::AppointmentDetail(_) => vec![],
        ScreenState::Profile(_) => vec![("j/k", "move"), ("Enter", "open"), ("o", "log out")],
        ScreenState::Login(_) | ScreenState::Signup(_) => {
            vec![("Tab", "next field"), ("Enter", "select")]
        }
        ScreenState::BlogDetail(_) => vec![("j/k", "scroll"), ("Space", "page")],
    };

    if !route.takes_text_input() {
        binds.push(("r", "refresh"));
    }
    if !matches!(route, Route::Home) {
        binds.push(("Esc", "back"));
    }
    if !route.takes_text_input() {
        binds.push(("q", "quit"));
    }
    binds
}

fn footer_line(route: &Route, state: &ScreenState) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in keybinds(route, state).into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_DIM)));
        }
        spans.push(Span::styled(
            key,
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(COLOR_DIM),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::screen_state::HomeState;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_identity_label() {
        assert_eq!(identity_label(None), "Not signed in");
        let claims = IdentityClaims {
            name: Some("Ann".to_string()),
            ..Default::default()
        };
        assert_eq!(identity_label(Some(&claims)), "● Ann");
    }

    #[test]
    fn test_footer_hides_quit_on_text_screens() {
        let login = footer_line(
            &Route::Login,
            &ScreenState::for_route(&Route::Login),
        )
        .to_string();
        assert!(!login.contains("quit"));
        assert!(login.contains("Esc back"));

        let home = footer_line(&Route::Home, &ScreenState::Home(HomeState::default())).to_string();
        assert!(home.contains("q quit"));
        assert!(!home.contains("Esc back"));
    }

    #[test]
    fn test_header_renders_route_title() {
        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal
            .draw(|f| render_header(f, f.area(), &Route::Doctors, None))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let row: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 0)].symbol().to_string())
            .collect();
        assert!(row.contains("MediCare · Doctors"));
        assert!(row.trim_end().ends_with("Not signed in"));
    }
}
