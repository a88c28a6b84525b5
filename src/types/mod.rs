//! Types shared across the user interface, history store and search gateway.

mod outcome;
mod result;

pub use outcome::{SearchOutcome, SearchSelection};
pub use result::{HistoryEntry, Highlight, SearchResult, SpanKind, TextSpan};
