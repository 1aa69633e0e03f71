//! Dialog Frame Component
//!
//! A centered dialog frame with rounded borders. Clears what is behind it
//! and sizes itself to the terminal.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Clear},
    Frame,
};

use crate::ui::helpers::centered_rect;
use crate::ui::layout::LayoutContext;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIALOG_BG, COLOR_HEADER};

/// Configuration for rendering a dialog frame
#[derive(Debug, Clone)]
pub struct DialogFrameConfig<'a> {
    /// Title displayed in the border
    pub title: &'a str,
    /// Content height (not including borders)
    pub content_height: u16,
    pub min_width: u16,
    pub max_width: u16,
    /// Border colour, accent unless set
    pub border: Color,
}

impl<'a> DialogFrameConfig<'a> {
    pub fn new(title: &'a str, content_height: u16) -> Self {
        Self {
            title,
            content_height,
            min_width: 30,
            max_width: 60,
            border: COLOR_ACCENT,
        }
    }

    pub fn border(mut self, color: Color) -> Self {
        self.border = color;
        self
    }

    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }
}

/// Dialog width for the terminal size and configuration.
pub(crate) fn dialog_width(ctx: &LayoutContext, config: &DialogFrameConfig, area_width: u16) -> u16 {
    let width = if ctx.is_extra_small() {
        area_width.saturating_sub(4).min(config.max_width)
    } else if ctx.is_narrow() {
        ctx.bounded_width(80, config.min_width, config.max_width)
    } else {
        ctx.bounded_width(50, config.min_width, config.max_width)
    };
    width.min(area_width)
}

/// Outer width a dialog with `config` takes up in `area`.
pub fn dialog_frame_width(area: Rect, config: &DialogFrameConfig) -> u16 {
    dialog_width(&LayoutContext::from_rect(area), config, area.width)
}

/// Render a dialog frame and return the inner content area.
pub fn render_dialog_frame(frame: &mut Frame, area: Rect, config: &DialogFrameConfig) -> Rect {
    let width = dialog_frame_width(area, config);
    let dialog_area = centered_rect(width, config.content_height + 2, area);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", config.title),
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(config.border))
        .style(Style::default().bg(COLOR_DIALOG_BG));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);
    inner
}
