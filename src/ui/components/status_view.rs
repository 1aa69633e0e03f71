//! Status View Component
//!
//! Full-panel placeholders for the states a fetched screen can be in
//! besides showing data: loading, failed (with try again), and empty.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::app::LoadError;
use crate::ui::helpers::spinner_frame;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_MUTED};

/// What to show in place of a screen's content
#[derive(Debug, Clone)]
pub enum StatusView<'a> {
    Loading { tick: u64 },
    Failed(&'a LoadError),
    Empty(&'a str),
}

/// Lines for `view`, vertically padded.
pub fn status_lines(view: &StatusView) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("")];
    match view {
        StatusView::Loading { tick } => {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", spinner_frame(*tick)),
                    Style::default().fg(COLOR_ACCENT),
                ),
                Span::styled("Loading...", Style::default().fg(COLOR_MUTED)),
            ]));
        }
        StatusView::Failed(error) => {
            lines.push(Line::from(vec![
                Span::styled("\u{2717} ", Style::default().fg(COLOR_ERROR)),
                Span::styled(
                    error.message.clone(),
                    Style::default()
                        .fg(COLOR_ERROR)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(""));
            let hint = if error.category.is_retryable() {
                "Press r to try again"
            } else {
                "Press Esc to go back"
            };
            lines.push(Line::from(Span::styled(hint, Style::default().fg(COLOR_DIM))));
        }
        StatusView::Empty(message) => {
            lines.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(COLOR_MUTED),
            )));
        }
    }
    lines
}

/// Render `view` centered in `area`.
pub fn render_status(frame: &mut Frame, area: Rect, view: &StatusView) {
    let paragraph = Paragraph::new(status_lines(view))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loading_shows_spinner() {
        let lines = status_lines(&StatusView::Loading { tick: 0 });
        assert!(text(&lines).contains("⠋ Loading..."));
    }

    #[test]
    fn test_retryable_failure_offers_try_again() {
        let error = LoadError::new("Unable to connect", ErrorCategory::Network);
        let rendered = text(&status_lines(&StatusView::Failed(&error)));
        assert!(rendered.contains("Unable to connect"));
        assert!(rendered.contains("try again"));
    }

    #[test]
    fn test_decode_failure_offers_back() {
        let error = LoadError::new("Unexpected response", ErrorCategory::Decode);
        let rendered = text(&status_lines(&StatusView::Failed(&error)));
        assert!(rendered.contains("Esc to go back"));
    }

    #[test]
    fn test_empty_message() {
        let rendered = text(&status_lines(&StatusView::Empty("No appointments found")));
        assert!(rendered.contains("No appointments found"));
    }
}
