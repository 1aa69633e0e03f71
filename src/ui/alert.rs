//! Modal alert overlay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::Alert;

use super::components::{dialog_frame_width, render_dialog_frame, DialogFrameConfig};
use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_SUCCESS};

const DISMISS_HINT: &str = "Press Enter to continue";

/// Rows needed for `message` wrapped at `width` columns.
fn wrapped_height(message: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    message
        .lines()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum::<usize>()
        .max(1) as u16
}

/// Frame colour from the alert title: green for success, red for failures.
fn border_color(title: &str) -> Color {
    let title = title.to_lowercase();
    if title == "success" {
        COLOR_SUCCESS
    } else if ["error", "failed", "incomplete"].iter().any(|w| title.contains(w)) {
        COLOR_ERROR
    } else {
        COLOR_ACCENT
    }
}

pub fn render_alert(frame: &mut Frame, area: Rect, alert: &Alert) {
    let sizing = DialogFrameConfig::new(&alert.title, 0);
    let text_width = dialog_frame_width(area, &sizing).saturating_sub(2);
    let content_height = wrapped_height(&alert.message, text_width) + 2;
    let config =
        DialogFrameConfig::new(&alert.title, content_height).border(border_color(&alert.title));
    let inner = render_dialog_frame(frame, area, &config);

    let lines = vec![
        Line::from(Span::styled(
            alert.message.clone(),
            Style::default().fg(COLOR_HEADER),
        )),
        Line::from(""),
        Line::from(Span::styled(DISMISS_HINT, Style::default().fg(COLOR_DIM))),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_color_follows_title() {
        assert_eq!(border_color("Success"), COLOR_SUCCESS);
        assert_eq!(border_color("Error"), COLOR_ERROR);
        assert_eq!(border_color("Login failed"), COLOR_ERROR);
        assert_eq!(border_color("Booking incomplete"), COLOR_ERROR);
        assert_eq!(border_color("Login Error"), COLOR_ERROR);
        assert_eq!(border_color("Google sign-in"), COLOR_ACCENT);
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("short", 10), 1);
        assert_eq!(wrapped_height("exactly ten", 10), 2);
        assert_eq!(wrapped_height("one\ntwo", 10), 2);
    }
}
