use super::{HistoryEntry, SearchResult};

/// Captures the outcome of a search interaction.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
	pub accepted: bool,
	pub selection: Option<SearchSelection>,
	pub query: String,
}

/// The row the user confirmed when the search ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchSelection {
	/// A live result from the current query.
	Result(SearchResult),
	/// An entry picked from the recent-history list.
	History(HistoryEntry),
}

impl SearchSelection {
	/// Document locator of the selected row.
	#[must_use]
	pub fn id(&self) -> &str {
		match self {
			Self::Result(result) => &result.id,
			Self::History(entry) => entry.id(),
		}
	}

	#[must_use]
	pub fn title(&self) -> &str {
		match self {
			Self::Result(result) => &result.title,
			Self::History(entry) => entry.title(),
		}
	}

	#[must_use]
	pub fn is_history(&self) -> bool {
		matches!(self, Self::History(_))
	}
}

impl SearchOutcome {
	/// Outcome for a search the user dismissed.
	#[must_use]
	pub fn cancelled(query: impl Into<String>) -> Self {
		Self {
			accepted: false,
			selection: None,
			query: query.into(),
		}
	}

	/// Return the locator of the confirmed selection, if any.
	#[must_use]
	pub fn selected_id(&self) -> Option<&str> {
		self.selection.as_ref().map(SearchSelection::id)
	}
}
