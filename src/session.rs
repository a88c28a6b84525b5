//! Query state for one search dialog.
//!
//! [`QuerySession`] owns the query text, the latest results and the
//! loading/no-results flags. Each search it starts gets a fresh generation id,
//! and a response is only applied when its id matches the newest generation.
//! A slow response to an old query can therefore never replace the results of
//! a newer one.

use tracing::{debug, trace};

use crate::gateway::GatewayError;
use crate::types::SearchResult;

/// A search the caller should dispatch to the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
	pub id: u64,
	pub query: String,
}

/// What happened to the session after a query edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryChange {
	/// The text did not change; nothing to do.
	Unchanged,
	/// The query became blank; results were dropped and no search is needed.
	Cleared,
	/// A new search must be dispatched.
	Search(SearchTicket),
}

/// A gateway answer tagged with the generation that requested it.
#[derive(Debug)]
pub struct SearchResponse {
	pub id: u64,
	pub query: String,
	pub outcome: Result<Vec<SearchResult>, GatewayError>,
}

#[derive(Debug, Default)]
pub struct QuerySession {
	query: String,
	results: Vec<SearchResult>,
	generation: u64,
	loading: bool,
	no_results: bool,
	last_error: Option<String>,
}

impl QuerySession {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn results(&self) -> &[SearchResult] {
		&self.results
	}

	/// `true` while the newest search has not answered yet.
	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.loading
	}

	/// `true` when the newest search finished with nothing to show, either
	/// because nothing matched or because the call failed.
	#[must_use]
	pub fn no_results(&self) -> bool {
		self.no_results
	}

	/// Message from the most recent failed search, if the newest one failed.
	#[must_use]
	pub fn last_error(&self) -> Option<&str> {
		self.last_error.as_deref()
	}

	/// Generation id of the newest search issued.
	#[must_use]
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// `true` when the query is blank and the history view should be shown.
	#[must_use]
	pub fn is_idle(&self) -> bool {
		self.query.trim().is_empty()
	}

	/// Replace the query text and decide whether a search is needed.
	pub fn set_query(&mut self, query: impl Into<String>) -> QueryChange {
		let query = query.into();
		if query == self.query {
			return QueryChange::Unchanged;
		}
		self.query = query;
		self.restart()
	}

	/// Start a search for the current text even if it did not change.
	pub fn refresh(&mut self) -> QueryChange {
		self.restart()
	}

	fn restart(&mut self) -> QueryChange {
		// Bumping the generation also orphans any search still in flight.
		self.generation = self.generation.wrapping_add(1);
		self.no_results = false;
		self.last_error = None;

		if self.is_idle() {
			self.loading = false;
			self.results.clear();
			trace!(generation = self.generation, "query cleared");
			return QueryChange::Cleared;
		}

		self.loading = true;
		QueryChange::Search(SearchTicket {
			id: self.generation,
			query: self.query.clone(),
		})
	}

	/// Apply a gateway response. Returns `false` when it was stale and ignored.
	pub fn apply(&mut self, response: SearchResponse) -> bool {
		if response.id != self.generation || !self.loading {
			debug!(
				response_id = response.id,
				current = self.generation,
				"dropping stale search response"
			);
			return false;
		}

		self.loading = false;
		match response.outcome {
			Ok(results) => {
				self.no_results = results.is_empty();
				self.results = results;
				self.last_error = None;
			}
			Err(err) => {
				self.results.clear();
				self.no_results = true;
				self.last_error = Some(err.to_string());
			}
		}
		true
	}
}
