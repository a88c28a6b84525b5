//! Presentation helpers for remote result text: truncation and hit rendering.

mod highlight;
mod truncate;

pub use highlight::{
	CONTEXT_BUDGET, HighlightParts, RenderedHighlight, decode_entities, render_highlight,
};
pub use truncate::{
	DEFAULT_MAX_LENGTH, DEFAULT_PLACEHOLDER, TruncateOptions, TruncationStyle, truncate,
	truncate_default,
};
