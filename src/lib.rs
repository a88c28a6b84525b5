//! Core crate exports for the `docseek` documentation search dialog.
//!
//! The root module re-exports the pieces an embedder needs to wire a search
//! gateway and a history store into the terminal dialog without digging
//! through the module hierarchy.

pub mod app_dirs;
pub mod gateway;
pub mod history;
pub mod logging;
pub mod search;
pub mod session;
pub mod text;
pub mod types;
pub mod ui;

pub use gateway::{AtlasConfig, AtlasGateway, GatewayError, SearchGateway, StaticGateway};
pub use history::{FileStorage, MemoryStorage, SearchHistory, Storage};
pub use session::{QueryChange, QuerySession, SearchResponse, SearchTicket};
pub use text::{TruncationStyle, render_highlight, truncate};
pub use types::{HistoryEntry, Highlight, SearchOutcome, SearchResult, SearchSelection, TextSpan};
pub use ui::style::Theme;
pub use ui::{SearchUi, UiConfig, run};
