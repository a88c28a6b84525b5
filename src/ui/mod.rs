//! Interactive terminal dialog for searching the documentation.
//!
//! The [`builder`] module exposes the public-facing [`SearchUi`] builder. The
//! remaining submodules implement the event loop, rendering, key handling and
//! the widgets and styles the dialog is drawn with.

mod actions;
mod builder;
pub mod components;
mod config;
pub mod input;
mod render;
mod runtime;
mod search;
mod state;
pub mod style;

pub use builder::SearchUi;
pub use config::UiConfig;
pub use runtime::run;
pub use state::{App, HistoryStore, View};
