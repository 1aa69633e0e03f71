//! Specialty and doctor lists.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::screen_state::{ListState, SpecialtyDoctorsState};
use crate::app::FetchState;
use crate::models::{Doctor, Specialty, SpecialtyDoctor};

use super::components::{render_selectable_list, render_status, ListRow, StatusView};
use super::helpers::{experience_text, spinner_frame};
use super::theme::{COLOR_ACCENT, COLOR_HEADER, COLOR_MUTED, COLOR_STAR};

/// Render a fetched list, or its loading/failed/empty placeholder.
#[allow(clippy::too_many_arguments)]
fn render_fetched<T>(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &FetchState<Vec<T>>,
    selected: usize,
    tick: u64,
    empty: &str,
    row: impl Fn(&T) -> ListRow,
) {
    match items {
        FetchState::Loading => render_status(frame, area, &StatusView::Loading { tick }),
        FetchState::Failed(error) => render_status(frame, area, &StatusView::Failed(error)),
        FetchState::Loaded(values) | FetchState::Refreshing(values) => {
            if values.is_empty() {
                render_status(frame, area, &StatusView::Empty(empty));
                return;
            }
            let title = if items.is_refreshing() {
                format!("{} {}", title, spinner_frame(tick))
            } else {
                title.to_string()
            };
            let rows: Vec<ListRow> = values.iter().map(row).collect();
            render_selectable_list(frame, area, &title, &rows, selected);
        }
    }
}

pub(crate) fn specialty_row(specialty: &Specialty) -> ListRow {
    let row = ListRow::new(specialty.specialty.clone());
    match &specialty.description {
        Some(description) if !description.is_empty() => row.subtitle(description.clone()),
        _ => row,
    }
}

pub(crate) fn doctor_row(doctor: &Doctor) -> ListRow {
    let mut details = Vec::new();
    if let Some(specialty) = &doctor.specialty {
        details.push(specialty.clone());
    }
    if let Some(qualification) = doctor.qualification_text() {
        details.push(qualification.to_string());
    }
    if let Some(experience) = experience_text(doctor.experience) {
        details.push(experience);
    }

    let mut row = ListRow::new(doctor.name.clone());
    if !details.is_empty() {
        row = row.subtitle(details.join(" · "));
    }
    if let Some(rating) = doctor.rating {
        row = row.badge(Span::styled(
            format!("★ {:.1}", rating),
            Style::default().fg(COLOR_STAR),
        ));
    }
    row
}

pub(crate) fn specialty_doctor_row(doctor: &SpecialtyDoctor) -> ListRow {
    let details: Vec<String> = [
        doctor.qualifications.clone(),
        experience_text(doctor.years_experience),
    ]
    .into_iter()
    .flatten()
    .collect();

    let row = ListRow::new(doctor.name.clone());
    if details.is_empty() {
        row
    } else {
        row.subtitle(details.join(" · "))
    }
}

pub fn render_specialties(
    frame: &mut Frame,
    area: Rect,
    state: &ListState<Specialty>,
    tick: u64,
) {
    render_fetched(
        frame,
        area,
        "Specialties",
        &state.items,
        state.selected,
        tick,
        "No specialties found",
        specialty_row,
    );
}

pub fn render_doctors(frame: &mut Frame, area: Rect, state: &ListState<Doctor>, tick: u64) {
    render_fetched(
        frame,
        area,
        "Doctors",
        &state.items,
        state.selected,
        tick,
        "No doctors found",
        doctor_row,
    );
}

/// Specialty header above its doctors.
pub fn render_specialty_doctors(
    frame: &mut Frame,
    area: Rect,
    state: &SpecialtyDoctorsState,
    tick: u64,
) {
    let data = match &state.data {
        FetchState::Loading => {
            return render_status(frame, area, &StatusView::Loading { tick });
        }
        FetchState::Failed(error) => {
            return render_status(frame, area, &StatusView::Failed(error));
        }
        FetchState::Loaded(data) | FetchState::Refreshing(data) => data,
    };

    let mut header = Vec::new();
    if let Some(specialty) = &data.specialty {
        header.push(Line::from(Span::styled(
            specialty.specialty.clone(),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(description) = &specialty.description {
            header.push(Line::from(Span::styled(
                description.clone(),
                Style::default().fg(COLOR_MUTED),
            )));
        }
    }

    let header_height = if header.is_empty() {
        0
    } else {
        (header.len() as u16 + 1).min(area.height / 2)
    };
    let [header_area, list_area] =
        Layout::vertical([Constraint::Length(header_height), Constraint::Min(0)]).areas(area);

    if !header.is_empty() {
        frame.render_widget(
            Paragraph::new(header)
                .style(Style::default().fg(COLOR_HEADER))
                .wrap(Wrap { trim: true }),
            header_area,
        );
    }

    if data.doctors.is_empty() {
        render_status(
            frame,
            list_area,
            &StatusView::Empty("No doctors found for this specialty"),
        );
        return;
    }

    let title = match &data.specialty {
        Some(specialty) => format!("{} Doctors", specialty.specialty),
        None => "Doctors".to_string(),
    };
    let rows: Vec<ListRow> = data.doctors.iter().map(specialty_doctor_row).collect();
    render_selectable_list(frame, list_area, &title, &rows, state.selected);
}
