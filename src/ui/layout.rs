//! Sizing rules shared by the screens.
//!
//! `LayoutContext` wraps an area's dimensions and answers the questions
//! render functions ask: how wide is a dialog or form, and do the date and
//! time pickers sit side by side or stack.

use ratatui::layout::Rect;

/// Terminal size breakpoints
pub mod breakpoints {
    /// Below this width dialogs take the full width
    pub const XS_WIDTH: u16 = 60;
    /// Below this width the slot pickers stack
    pub const SM_WIDTH: u16 = 80;
    /// Below this height dialogs take the full width
    pub const XS_HEIGHT: u16 = 16;
}

/// Widest date label, "Wed, Sep 24, 2025" plus borders and highlight.
const DATE_COLUMN_MIN: u16 = 24;
const DATE_COLUMN_MAX: u16 = 36;

#[derive(Debug, Clone, Copy)]
pub struct LayoutContext {
    pub width: u16,
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.width, rect.height)
    }

    /// `percentage` of the width clamped to `min..=max`, never wider than
    /// the area itself.
    pub fn bounded_width(&self, percentage: u16, min: u16, max: u16) -> u16 {
        let share = (self.width as u32 * percentage as u32 / 100) as u16;
        share.clamp(min, max.max(min)).min(self.width)
    }

    pub fn is_narrow(&self) -> bool {
        self.width < breakpoints::SM_WIDTH
    }

    pub fn is_extra_small(&self) -> bool {
        self.width < breakpoints::XS_WIDTH || self.height < breakpoints::XS_HEIGHT
    }

    /// Put the date list above the time list.
    pub fn should_stack_panels(&self) -> bool {
        self.is_narrow()
    }

    /// `(dates, times)` column widths for the slot picker.
    pub fn slot_picker_columns(&self) -> (u16, u16) {
        let dates = self.bounded_width(35, DATE_COLUMN_MIN, DATE_COLUMN_MAX);
        (dates, self.width - dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_width_clamps() {
        assert_eq!(LayoutContext::new(200, 40).bounded_width(30, 20, 50), 50);
        assert_eq!(LayoutContext::new(40, 40).bounded_width(30, 20, 50), 20);
        assert_eq!(LayoutContext::new(15, 40).bounded_width(30, 20, 50), 15);
    }

    #[test]
    fn test_size_classes() {
        assert!(LayoutContext::new(70, 40).is_narrow());
        assert!(LayoutContext::new(70, 40).should_stack_panels());
        assert!(!LayoutContext::new(120, 40).is_narrow());
        assert!(LayoutContext::new(50, 40).is_extra_small());
        assert!(LayoutContext::new(120, 12).is_extra_small());
    }

    #[test]
    fn test_slot_picker_columns() {
        for width in [80, 100, 160, 240] {
            let (dates, times) = LayoutContext::new(width, 40).slot_picker_columns();
            assert_eq!(dates + times, width);
            assert!((DATE_COLUMN_MIN..=DATE_COLUMN_MAX).contains(&dates));
        }
    }
}
