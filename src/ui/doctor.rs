//! Doctor profile and the booking flow: pick a slot, confirm it, done.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::screen_state::{
    BookAppointmentState, BookingFocus, ConfirmBookingState, DoctorDetailState,
};
use crate::app::FetchState;
use crate::error::ErrorCategory;
use crate::models::{DoctorDetails, SlotBooking, TimeSlot};
use crate::widgets::TextFieldWidget;

use super::components::{render_status, StatusView};
use super::helpers::{
    experience_text, format_date, format_long_date, format_time, format_time_range, spinner_frame,
};
use super::layout::LayoutContext;
use super::theme::{
    COLOR_ACCENT, COLOR_BOOKED, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_MUTED,
    COLOR_SELECTED_BG, COLOR_SUCCESS,
};

const DOCTOR_NOT_FOUND: &str = "Doctor not found";
const DETAILS_NOT_FOUND: &str = "Appointment details not found";

fn bordered(title: &str, focused: bool) -> Block<'static> {
    let color = if focused { COLOR_ACCENT } else { COLOR_BORDER };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

/// Name, specialty, qualifications and experience.
pub fn doctor_lines(doctor: &DoctorDetails) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        doctor.name.clone(),
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    ))];

    let mut facts = Vec::new();
    if let Some(specialty) = doctor.specialty.as_ref().filter(|s| !s.is_empty()) {
        facts.push(specialty.clone());
    }
    if let Some(qualifications) = doctor.qualifications.as_ref().filter(|q| !q.is_empty()) {
        facts.push(qualifications.clone());
    }
    if let Some(experience) = experience_text(doctor.experience) {
        facts.push(experience);
    }
    if !facts.is_empty() {
        lines.push(Line::from(Span::styled(
            facts.join(" · "),
            Style::default().fg(COLOR_MUTED),
        )));
    }
    if doctor.available == Some(false) {
        lines.push(Line::from(Span::styled(
            "Not accepting appointments",
            Style::default().fg(COLOR_BOOKED),
        )));
    }
    lines
}

pub fn render_doctor_detail(frame: &mut Frame, area: Rect, state: &DoctorDetailState, tick: u64) {
    let doctor = match &state.doctor {
        FetchState::Loading => return render_status(frame, area, &StatusView::Loading { tick }),
        FetchState::Failed(error) if error.category == ErrorCategory::Network => {
            return render_status(frame, area, &StatusView::Failed(error));
        }
        FetchState::Failed(_) => {
            return render_status(frame, area, &StatusView::Empty(DOCTOR_NOT_FOUND));
        }
        FetchState::Loaded(doctor) | FetchState::Refreshing(doctor) => doctor,
    };

    let mut lines = doctor_lines(doctor);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "About",
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    )));
    let bio = doctor
        .bio
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or("No biography available.");
    lines.push(Line::from(bio.to_string()));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("[ Book Appointment ]", Style::default().fg(COLOR_ACCENT)),
        Span::styled("  Enter", Style::default().fg(COLOR_DIM)),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(bordered("Doctor", false))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Slot picker
// ============================================================================

fn date_item(date: &str, selected: bool) -> ListItem<'static> {
    let style = if selected {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_HEADER)
    };
    ListItem::new(Line::from(Span::styled(format_date(date), style)))
}

/// One slot row; booked slots are greyed out and tagged.
pub fn slot_line(slot: &TimeSlot) -> Line<'static> {
    let time = format_time_range(&slot.start_time, &slot.end_time);
    if slot.is_booked {
        Line::from(vec![
            Span::styled(time, Style::default().fg(COLOR_BOOKED)),
            Span::styled("  Booked", Style::default().fg(COLOR_DIM)),
        ])
    } else {
        Line::from(Span::styled(time, Style::default().fg(COLOR_HEADER)))
    }
}

fn render_picker_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: Vec<ListItem<'static>>,
    selected: usize,
    focused: bool,
) {
    let highlight = if focused {
        Style::default().fg(COLOR_ACCENT).bg(COLOR_SELECTED_BG)
    } else {
        Style::default().fg(COLOR_ACCENT)
    };
    let len = items.len();
    let list = List::new(items)
        .block(bordered(title, focused))
        .highlight_style(highlight)
        .highlight_symbol("▌ ");
    let mut list_state = ListState::default();
    if len > 0 {
        list_state.select(Some(selected.min(len - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn render_book_appointment(
    frame: &mut Frame,
    area: Rect,
    state: &BookAppointmentState,
    tick: u64,
) {
    let schedule = match &state.schedule {
        FetchState::Loading => return render_status(frame, area, &StatusView::Loading { tick }),
        FetchState::Failed(error) => {
            return render_status(frame, area, &StatusView::Failed(error));
        }
        FetchState::Loaded(schedule) | FetchState::Refreshing(schedule) => schedule,
    };

    let mut header = doctor_lines(&schedule.doctor);
    if state.schedule.is_refreshing() {
        header.push(Line::from(Span::styled(
            format!("{} Refreshing slots...", spinner_frame(tick)),
            Style::default().fg(COLOR_DIM),
        )));
    }
    let [header_area, body] =
        Layout::vertical([Constraint::Length(header.len() as u16 + 1), Constraint::Min(0)])
            .areas(area);
    frame.render_widget(Paragraph::new(header), header_area);

    let dates = state.dates();
    if dates.is_empty() {
        render_status(
            frame,
            body,
            &StatusView::Empty("No available slots for this doctor"),
        );
        return;
    }

    let ctx = LayoutContext::from_rect(body);
    let [dates_area, slots_area] = if ctx.should_stack_panels() {
        let dates_height = (dates.len() as u16 + 2).min(body.height / 2);
        Layout::vertical([Constraint::Length(dates_height), Constraint::Min(0)]).areas(body)
    } else {
        let (left, right) = ctx.slot_picker_columns();
        Layout::horizontal([Constraint::Length(left), Constraint::Length(right)]).areas(body)
    };

    let date_items = dates
        .iter()
        .enumerate()
        .map(|(i, date)| date_item(date, i == state.date_index))
        .collect();
    render_picker_list(
        frame,
        dates_area,
        "Select Date",
        date_items,
        state.date_index,
        state.focus == BookingFocus::Dates,
    );

    let slots = state.visible_slots();
    let slot_title = match state.selected_date() {
        Some(date) => format!("Available Times · {}", format_date(&date)),
        None => "Available Times".to_string(),
    };
    let slot_items = slots
        .iter()
        .map(|slot| ListItem::new(slot_line(slot)))
        .collect();
    render_picker_list(
        frame,
        slots_area,
        &slot_title,
        slot_items,
        state.slot_index,
        state.focus == BookingFocus::Slots,
    );
}

// ============================================================================
// Confirmation
// ============================================================================

/// Summary of the slot about to be booked.
pub fn booking_summary_lines(detail: &SlotBooking) -> Vec<Line<'static>> {
    let label =
        |text: &str| Span::styled(format!("{:<10}", text), Style::default().fg(COLOR_MUTED));
    let value = |text: String| Span::styled(text, Style::default().fg(COLOR_HEADER));

    let mut lines = Vec::new();
    let doctor = detail
        .doctor_name
        .clone()
        .unwrap_or_else(|| "Doctor".to_string());
    lines.push(Line::from(Span::styled(
        doctor,
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    )));
    let facts: Vec<String> = [
        detail.doctor_specialty.clone(),
        detail.doctor_qualifications.clone(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.is_empty())
    .collect();
    if !facts.is_empty() {
        lines.push(Line::from(Span::styled(
            facts.join(" · "),
            Style::default().fg(COLOR_MUTED),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        label("Date"),
        value(format_long_date(&detail.date)),
    ]));
    lines.push(Line::from(vec![
        label("Time"),
        value(format_time(&detail.start_time)),
        Span::styled(
            format!(" to {}", format_time(&detail.end_time)),
            Style::default().fg(COLOR_MUTED),
        ),
    ]));
    lines
}

pub fn render_confirm_booking(
    frame: &mut Frame,
    area: Rect,
    state: &ConfirmBookingState,
    tick: u64,
) {
    let detail = match &state.detail {
        FetchState::Loading => return render_status(frame, area, &StatusView::Loading { tick }),
        FetchState::Failed(_) => {
            return render_status(frame, area, &StatusView::Empty(DETAILS_NOT_FOUND));
        }
        FetchState::Loaded(detail) | FetchState::Refreshing(detail) => detail,
    };

    let summary = booking_summary_lines(detail);
    let [summary_area, reason_area, _, button_area, _] = Layout::vertical([
        Constraint::Length(summary.len() as u16 + 2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(summary).block(bordered("Appointment", false)),
        summary_area,
    );
    frame.render_widget(
        TextFieldWidget::new(&state.reason, " Reason for visit (optional) ", true),
        reason_area,
    );

    let button = if state.submit.is_submitting() {
        Line::from(Span::styled(
            format!("{} Booking...", spinner_frame(tick)),
            Style::default().fg(COLOR_DIM),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                "[ Confirm Appointment ]",
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enter", Style::default().fg(COLOR_DIM)),
        ])
    };
    frame.render_widget(Paragraph::new(button), button_area);
}

pub fn render_confirmed(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "✓",
            Style::default()
                .fg(COLOR_SUCCESS)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Appointment Confirmed",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your appointment has been booked successfully.",
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to return home",
            Style::default().fg(COLOR_DIM),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booked_slot_is_tagged() {
        let slot = TimeSlot {
            id: "1".to_string(),
            start_time: "09:00".to_string(),
            end_time: "09:30".to_string(),
            is_booked: true,
            ..Default::default()
        };
        let line = slot_line(&slot).to_string();
        assert!(line.contains("9:00 AM"));
        assert!(line.ends_with("Booked"));

        let free = TimeSlot {
            is_booked: false,
            ..slot
        };
        assert!(!slot_line(&free).to_string().contains("Booked"));
    }

    #[test]
    fn test_summary_uses_long_date() {
        let detail = SlotBooking {
            id: "17".to_string(),
            date: "2025-03-04".to_string(),
            start_time: "14:00".to_string(),
            end_time: "14:30".to_string(),
            doctor_name: Some("Dr. Rao".to_string()),
            doctor_specialty: Some("Cardiology".to_string()),
            ..Default::default()
        };
        let text: Vec<String> = booking_summary_lines(&detail)
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(text[0], "Dr. Rao");
        assert_eq!(text[1], "Cardiology");
        assert!(text.iter().any(|l| l.contains("Tuesday, March 4, 2025")));
        assert!(text.iter().any(|l| l.contains("2:00 PM to 2:30 PM")));
    }

    #[test]
    fn test_unavailable_doctor_is_flagged() {
        let doctor = DoctorDetails {
            id: "5".to_string(),
            name: "Dr. Lee".to_string(),
            available: Some(false),
            ..Default::default()
        };
        let lines = doctor_lines(&doctor);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].to_string(), "Not accepting appointments");
    }
}
