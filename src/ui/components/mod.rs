//! Widgets shared by the dialog renderer.

/// List row construction for results and history entries.
pub mod rows;
/// Status row with the loading indicator and footer.
pub mod status;

pub use rows::{RowStyle, display_locator, display_title, history_item, result_item};
pub use status::{Status, StatusContext, render_status};
