//! Appointment detail, with the review form for completed visits.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::screen_state::AppointmentDetailState;
use crate::app::FetchState;
use crate::models::{AppointmentDetail, AppointmentStatus};
use crate::widgets::TextFieldWidget;

use super::components::{render_status, StatusView};
use super::helpers::{format_long_date, format_time, spinner_frame, star_line};
use super::theme::{
    COLOR_ACCENT, COLOR_BOOKED, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_MUTED,
    COLOR_STAR, COLOR_SUCCESS,
};

/// Color for an appointment status label.
pub fn status_style(status: &AppointmentStatus) -> Style {
    let color = match status {
        AppointmentStatus::Confirmed => COLOR_ACCENT,
        AppointmentStatus::Completed => COLOR_SUCCESS,
        AppointmentStatus::Cancelled => COLOR_ERROR,
        AppointmentStatus::Other(_) => COLOR_BOOKED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn appointment_lines(appointment: &AppointmentDetail) -> Vec<Line<'static>> {
    let label =
        |text: &str| Span::styled(format!("{:<10}", text), Style::default().fg(COLOR_MUTED));
    let value = |text: String| Span::styled(text, Style::default().fg(COLOR_HEADER));

    let mut lines = vec![
        Line::from(Span::styled(
            appointment.doctor_name.clone(),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            appointment.specialty.clone(),
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        Line::from(vec![
            label("Date"),
            value(format_long_date(&appointment.appointment_date)),
        ]),
        Line::from(vec![
            label("Time"),
            value(format_time(&appointment.appointment_time)),
        ]),
        Line::from(vec![
            label("Status"),
            Span::styled(
                capitalize(appointment.status.as_str()),
                status_style(&appointment.status),
            ),
        ]),
    ];
    if let Some(reason) = appointment.reason.as_ref().filter(|r| !r.is_empty()) {
        lines.push(Line::from(vec![label("Reason"), value(reason.clone())]));
    }
    lines
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn render_appointment_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppointmentDetailState,
    tick: u64,
) {
    let appointment = match &state.appointment {
        FetchState::Loading => return render_status(frame, area, &StatusView::Loading { tick }),
        FetchState::Failed(error) => {
            return render_status(frame, area, &StatusView::Failed(error));
        }
        FetchState::Loaded(appointment) | FetchState::Refreshing(appointment) => appointment,
    };

    let details = appointment_lines(appointment);
    let details_height = details.len() as u16 + 2;
    let block = Block::default()
        .title(" Appointment ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));

    if !state.accepts_review() {
        frame.render_widget(
            Paragraph::new(details)
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
        return;
    }

    let [details_area, _, heading_area, stars_area, comment_area, button_area, _] =
        Layout::vertical([
            Constraint::Length(details_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

    frame.render_widget(Paragraph::new(details).block(block), details_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Rate your visit",
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        ))),
        heading_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(star_line(state.review.rating), Style::default().fg(COLOR_STAR)),
            Span::styled("  ←/→ to rate", Style::default().fg(COLOR_DIM)),
        ])),
        stars_area,
    );
    frame.render_widget(
        TextFieldWidget::new(&state.comment, " Your review ", true),
        comment_area,
    );

    let button = if state.submit.is_submitting() {
        Line::from(Span::styled(
            format!("{} Submitting...", spinner_frame(tick)),
            Style::default().fg(COLOR_DIM),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                "[ Submit Review ]",
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enter", Style::default().fg(COLOR_DIM)),
        ])
    };
    frame.render_widget(Paragraph::new(button), button_area);
}
