//! Home screen: greeting, shortcuts, specialties and featured articles.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::screen_state::{HomeItem, HomeState};
use crate::auth::IdentityClaims;
use crate::content;

use super::helpers::{spinner_frame, truncate_string};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_MUTED};

/// Build the home screen lines. Returns them with the index of the line
/// holding the selected item.
pub fn home_lines(
    state: &HomeState,
    identity: Option<&IdentityClaims>,
    tick: u64,
    width: usize,
) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let greeting = match identity.and_then(|c| c.display_name()) {
        Some(name) => format!("Welcome back, {}!", name),
        None => "Welcome back!".to_string(),
    };
    lines.push(Line::from(Span::styled(
        greeting,
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        "Find your perfect doctor",
        Style::default().fg(COLOR_MUTED),
    )));
    lines.push(Line::from(""));

    let mut selected_line = 0;
    let items = state.items();
    for (index, item) in items.iter().enumerate() {
        match item {
            HomeItem::Specialty { .. }
                if !matches!(items[index - 1], HomeItem::Specialty { .. }) =>
            {
                lines.push(Line::from(""));
                lines.push(section("Consult Specialized Doctors"));
            }
            HomeItem::Articles => {
                if !state.specialties.value().is_some_and(|s| !s.is_empty()) {
                    lines.push(Line::from(""));
                    lines.push(section("Consult Specialized Doctors"));
                    lines.push(specialties_placeholder(state, tick));
                }
                lines.push(Line::from(""));
                lines.push(section("Health Articles"));
            }
            _ => {}
        }

        let is_selected = index == state.selected;
        if is_selected {
            selected_line = lines.len();
        }
        lines.push(item_line(item, is_selected, width));
    }

    (lines, selected_line)
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn specialties_placeholder(state: &HomeState, tick: u64) -> Line<'static> {
    let text = if state.specialties.is_busy() {
        format!("  {} Loading specialties...", spinner_frame(tick))
    } else if state.specialties.error().is_some() {
        "  Specialties unavailable (r to retry)".to_string()
    } else {
        "  No specialties yet".to_string()
    };
    Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)))
}

fn item_line(item: &HomeItem, selected: bool, width: usize) -> Line<'static> {
    let (label, detail) = match item {
        HomeItem::Doctors => ("Find a Doctor".to_string(), Some("Browse all doctors")),
        HomeItem::Specialties => (
            "Search Top Departments".to_string(),
            Some("All specialties"),
        ),
        HomeItem::Specialty { name, .. } => (name.clone(), None),
        HomeItem::Articles => ("View All".to_string(), Some("Every article")),
        HomeItem::Article { title, .. } => (title.clone(), None),
    };

    let marker = if selected { "▌ " } else { "  " };
    let label_style = if selected {
        Style::default()
            .fg(COLOR_ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_HEADER)
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
        Span::styled(truncate_string(&label, width.saturating_sub(4)), label_style),
    ];
    if let Some(detail) = detail {
        spans.push(Span::styled(
            format!("  {}", detail),
            Style::default().fg(COLOR_DIM),
        ));
    }
    if let HomeItem::Article { id, .. } = item {
        if let Some(post) = content::find(*id) {
            spans.push(Span::styled(
                format!("  {}", post.category),
                Style::default().fg(COLOR_DIM),
            ));
        }
    }
    Line::from(spans)
}

pub fn render_home(
    frame: &mut Frame,
    area: Rect,
    state: &HomeState,
    identity: Option<&IdentityClaims>,
    tick: u64,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (lines, selected_line) = home_lines(state, identity, tick, inner.width as usize);
    let visible = inner.height as usize;
    let scroll = selected_line.saturating_sub(visible.saturating_sub(2));
    let paragraph = Paragraph::new(lines).scroll((scroll as u16, 0));
    frame.render_widget(paragraph, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::FetchState;
    use crate::models::Specialty;

    fn specialty(id: &str, name: &str) -> Specialty {
        Specialty {
            id: id.to_string(),
            specialty: name.to_string(),
            description: None,
            icon_url: None,
        }
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_greeting_uses_name() {
        let claims = IdentityClaims {
            name: Some("Ann".to_string()),
            ..Default::default()
        };
        let (lines, _) = home_lines(&HomeState::default(), Some(&claims), 0, 80);
        assert_eq!(lines[0].to_string(), "Welcome back, Ann!");
    }

    #[test]
    fn test_loading_specialties_placeholder() {
        let (lines, _) = home_lines(&HomeState::default(), None, 0, 80);
        let rendered = text(&lines);
        assert!(rendered.iter().any(|l| l.contains("Loading specialties")));
        assert!(rendered.iter().any(|l| l.contains("Health Articles")));
    }

    #[test]
    fn test_specialties_listed_under_section() {
        let state = HomeState {
            specialties: FetchState::Loaded(vec![
                specialty("1", "Cardiology"),
                specialty("2", "Dermatology"),
            ]),
            selected: 2,
        };
        let (lines, selected) = home_lines(&state, None, 0, 80);
        let rendered = text(&lines);
        let section = rendered
            .iter()
            .position(|l| l == "Consult Specialized Doctors")
            .unwrap();
        assert!(rendered[section + 1].contains("Cardiology"));
        assert_eq!(selected, section + 1);
        assert!(rendered[selected].starts_with("▌"));
    }
}
