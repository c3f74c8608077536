//! TUI dialog components

mod confirm;
mod filter;
mod task_form;

pub use confirm::ConfirmDialog;
pub use filter::{FilterAction, FilterDialog};
pub use task_form::{FormMode, TaskFormData, TaskFormDialog};

use ratatui::layout::Rect;

pub enum DialogResult<T> {
    Continue,
    Cancel,
    Submit(T),
}

/// A `width` x `height` rectangle centered in `area`, clamped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
