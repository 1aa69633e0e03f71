//! Selectable List Component
//!
//! Two-line rows (title and subtitle) with the selected row highlighted
//! and the view scrolled to keep it visible.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::ui::helpers::truncate_string;
use crate::ui::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_HEADER, COLOR_MUTED, COLOR_SELECTED_BG,
};

/// One row of a selectable list
#[derive(Debug, Clone, Default)]
pub struct ListRow {
    pub title: String,
    pub subtitle: Option<String>,
    /// Short text shown after the title (status, rating)
    pub badge: Option<Span<'static>>,
}

impl ListRow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn badge(mut self, badge: Span<'static>) -> Self {
        self.badge = Some(badge);
        self
    }
}

/// Render `rows` in a bordered block titled `title`.
pub fn render_selectable_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[ListRow],
    selected: usize,
) {
    let text_width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let mut title_spans = vec![Span::styled(
                truncate_string(&row.title, text_width),
                Style::default()
                    .fg(COLOR_HEADER)
                    .add_modifier(Modifier::BOLD),
            )];
            if let Some(badge) = &row.badge {
                title_spans.push(Span::raw("  "));
                title_spans.push(badge.clone());
            }
            let mut lines = vec![Line::from(title_spans)];
            if let Some(subtitle) = &row.subtitle {
                lines.push(Line::from(Span::styled(
                    truncate_string(subtitle, text_width),
                    Style::default().fg(COLOR_MUTED),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(COLOR_BORDER)),
        )
        .highlight_style(Style::default().fg(COLOR_ACCENT).bg(COLOR_SELECTED_BG))
        .highlight_symbol("▌ ");

    let mut state =
        ListState::default().with_selected(Some(selected.min(rows.len().saturating_sub(1))));
    frame.render_stateful_widget(list, area, &mut state);
}
