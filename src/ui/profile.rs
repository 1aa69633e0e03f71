//! Profile card and appointment history.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::screen_state::ProfileState;
use crate::app::FetchState;
use crate::models::{AppointmentSummary, UserProfile};

use super::appointment::status_style;
use super::components::{render_selectable_list, render_status, status_lines, ListRow, StatusView};
use super::helpers::{format_date, format_time, spinner_frame};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_MUTED};

const NO_APPOINTMENTS: &str = "No appointments found";

fn profile_lines(profile: &FetchState<UserProfile>, tick: u64) -> Vec<Line<'static>> {
    match profile {
        FetchState::Loaded(profile) | FetchState::Refreshing(profile) => vec![Line::from(vec![
            Span::styled(
                format!(" {} ", profile.initial()),
                Style::default()
                    .fg(COLOR_HEADER)
                    .bg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                profile.name.clone(),
                Style::default()
                    .fg(COLOR_HEADER)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", profile.email),
                Style::default().fg(COLOR_MUTED),
            ),
        ])],
        FetchState::Loading => vec![Line::from(Span::styled(
            format!("{} Loading profile...", spinner_frame(tick)),
            Style::default().fg(COLOR_DIM),
        ))],
        FetchState::Failed(error) => status_lines(&StatusView::Failed(error))
            .into_iter()
            .skip(1)
            .take(1)
            .collect(),
    }
}

pub(crate) fn appointment_row(appointment: &AppointmentSummary) -> ListRow {
    let when = format!(
        "{} at {}",
        format_date(&appointment.appointment_date),
        format_time(&appointment.appointment_time)
    );
    let subtitle = if appointment.specialty.is_empty() {
        when
    } else {
        format!("{} · {}", appointment.specialty, when)
    };
    ListRow::new(appointment.doctor_name.clone())
        .subtitle(subtitle)
        .badge(Span::styled(
            appointment.status.as_str().to_string(),
            status_style(&appointment.status),
        ))
}

pub fn render_profile(frame: &mut Frame, area: Rect, state: &ProfileState, tick: u64) {
    let [card_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let card = Paragraph::new(profile_lines(&state.profile, tick)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(COLOR_BORDER)),
    );
    frame.render_widget(card, card_area);

    match &state.appointments.items {
        FetchState::Loading => render_status(frame, list_area, &StatusView::Loading { tick }),
        FetchState::Failed(error) => render_status(frame, list_area, &StatusView::Failed(error)),
        FetchState::Loaded(items) | FetchState::Refreshing(items) if items.is_empty() => {
            render_status(frame, list_area, &StatusView::Empty(NO_APPOINTMENTS))
        }
        FetchState::Loaded(items) | FetchState::Refreshing(items) => {
            let rows: Vec<ListRow> = items.iter().map(appointment_row).collect();
            render_selectable_list(
                frame,
                list_area,
                "My Appointments",
                &rows,
                state.appointments.selected,
            );
        }
    }
}
