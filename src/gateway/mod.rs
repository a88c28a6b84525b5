//! Boundary to the remote search function.
//!
//! Ranking and indexing live in the hosted service. The widget only needs a
//! way to turn a query string into a list of [`SearchResult`]s, which is what
//! [`SearchGateway`] captures.

mod atlas;
mod error;

use std::collections::HashMap;

pub use atlas::{
	AtlasConfig, AtlasGateway, DEFAULT_BASE_URL, DEFAULT_FUNCTION, DEFAULT_TIMEOUT,
	parse_search_response,
};
pub use error::GatewayError;

use crate::types::SearchResult;

/// A remote search backend.
///
/// Calls may fail or return nothing. Callers must not assume ordering or
/// latency between separate calls.
pub trait SearchGateway: Send {
	fn search(&mut self, query: &str) -> Result<Vec<SearchResult>, GatewayError>;
}

impl<G: SearchGateway + ?Sized> SearchGateway for Box<G> {
	fn search(&mut self, query: &str) -> Result<Vec<SearchResult>, GatewayError> {
		(**self).search(query)
	}
}

/// In-memory gateway with canned responses.
///
/// Queries with an exact canned entry get that entry. Anything else falls back
/// to a case-insensitive substring match over titles, which is enough for
/// offline demos.
#[derive(Debug, Clone, Default)]
pub struct StaticGateway {
	documents: Vec<SearchResult>,
	canned: HashMap<String, Vec<SearchResult>>,
	failing: bool,
}

impl StaticGateway {
	#[must_use]
	pub fn new(documents: Vec<SearchResult>) -> Self {
		Self {
			documents,
			..Self::default()
		}
	}

	/// Answer `query` with exactly `results`.
	#[must_use]
	pub fn with_response(mut self, query: impl Into<String>, results: Vec<SearchResult>) -> Self {
		self.canned.insert(query.into(), results);
		self
	}

	/// Make every call fail, for exercising error paths.
	#[must_use]
	pub fn failing(mut self) -> Self {
		self.failing = true;
		self
	}
}

impl SearchGateway for StaticGateway {
	fn search(&mut self, query: &str) -> Result<Vec<SearchResult>, GatewayError> {
		if self.failing {
			return Err(GatewayError::Api {
				status: 503,
				message: "static gateway configured to fail".into(),
			});
		}
		if let Some(results) = self.canned.get(query) {
			return Ok(results.clone());
		}
		let needle = query.to_lowercase();
		Ok(self
			.documents
			.iter()
			.filter(|doc| doc.title.to_lowercase().contains(&needle))
			.cloned()
			.collect())
	}
}
