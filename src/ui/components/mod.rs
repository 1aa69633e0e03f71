//! Reusable UI Components
//!
//! - `DialogFrame` - Centered dialog overlay with rounded borders
//! - `StatusView` - Loading, failed and empty placeholders
//! - `selectable_list` - Bordered list with a highlighted row

mod dialog_frame;
mod selectable_list;
mod status_view;

pub use dialog_frame::{dialog_frame_width, render_dialog_frame, DialogFrameConfig};
pub use selectable_list::{render_selectable_list, ListRow};
pub use status_view::{render_status, status_lines, StatusView};
