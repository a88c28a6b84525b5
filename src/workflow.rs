use anyhow::{Context, Result};
use docseek::gateway::{AtlasGateway, SearchGateway, StaticGateway};
use docseek::history::{FileStorage, SearchHistory, Storage};
use docseek::types::{Highlight, TextSpan};
use docseek::ui::HistoryStore;
use docseek::{SearchOutcome, SearchResult, SearchUi, UiConfig};
use tracing::info;

use crate::settings::{HistorySettings, ResolvedConfig, SearchSettings};

/// Coordinates building and running the interactive search experience.
pub(crate) struct SearchWorkflow {
	search_ui: SearchUi,
}

impl SearchWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let search_ui = SearchUiFactory::build(config)?;
		Ok(Self { search_ui })
	}

	pub(crate) fn run(self) -> Result<SearchOutcome> {
		self.search_ui.run()
	}
}

/// Open the history store described by `settings`.
pub(crate) fn open_history(settings: &HistorySettings) -> Result<HistoryStore> {
	let storage: Box<dyn Storage> = Box::new(FileStorage::new(settings.dir.clone()));
	SearchHistory::with_options(storage, settings.key.clone(), settings.max_size)
		.context("failed to open search history")
}

/// Helper for translating resolved configuration into a configured `SearchUi`.
struct SearchUiFactory {
	search_ui: SearchUi,
}

impl SearchUiFactory {
	fn build(config: ResolvedConfig) -> Result<SearchUi> {
		let ResolvedConfig {
			search,
			history,
			initial_query,
			theme,
			ui,
		} = config;

		let builder = Self::new(&search, &history)?
			.with_ui_config(ui)
			.with_initial_query(initial_query)
			.with_theme(theme);

		Ok(builder.finish())
	}

	fn new(search: &SearchSettings, history: &HistorySettings) -> Result<Self> {
		let gateway = connect_gateway(search)?;
		let search_ui = SearchUi::new(gateway, open_history(history)?);
		Ok(Self { search_ui })
	}

	fn with_ui_config(mut self, config: UiConfig) -> Self {
		self.search_ui = self.search_ui.with_ui_config(config);
		self
	}

	fn with_initial_query(mut self, query: String) -> Self {
		self.search_ui = self.search_ui.with_initial_query(query);
		self
	}

	fn with_theme(mut self, theme: Option<String>) -> Self {
		if let Some(theme) = theme {
			self.search_ui = self.search_ui.with_theme_name(&theme);
		}
		self
	}

	fn finish(self) -> SearchUi {
		self.search_ui
	}
}

/// Log in before the terminal is taken over so failures print normally.
fn connect_gateway(search: &SearchSettings) -> Result<Box<dyn SearchGateway>> {
	if search.offline {
		info!("using the offline page list");
		return Ok(Box::new(offline_gateway()));
	}
	let config = search.atlas_config()?;
	let gateway = AtlasGateway::connect(config)
		.context("anonymous login to App Services failed")?;
	Ok(Box::new(gateway))
}

fn offline_gateway() -> StaticGateway {
	let pages = vec![
		SearchResult::new(
			"https://www.mongodb.com/docs/atlas/atlas-search/",
			"Atlas Search",
		),
		SearchResult::new(
			"https://www.mongodb.com/docs/atlas/atlas-vector-search/vector-search-overview/",
			"Atlas Vector Search Overview",
		),
		SearchResult::new(
			"https://www.mongodb.com/docs/manual/aggregation/",
			"Aggregation Operations",
		),
		SearchResult::new(
			"https://www.mongodb.com/docs/manual/indexes/",
			"Indexes",
		),
		SearchResult::new(
			"https://www.mongodb.com/docs/manual/core/transactions/",
			"Transactions",
		),
		SearchResult::new(
			"https://www.mongodb.com/docs/atlas/app-services/functions/",
			"Atlas Functions",
		),
	];
	let highlighted = SearchResult::new(
		"https://www.mongodb.com/docs/atlas/atlas-search/",
		"Atlas Search",
	)
	.with_highlight(Highlight::new(vec![
		TextSpan::plain("Atlas Search is an embedded "),
		TextSpan::hit("full-text search"),
		TextSpan::plain(" in MongoDB Atlas"),
	]));
	StaticGateway::new(pages).with_response("full-text search", vec![highlighted])
}

#[cfg(test)]
mod tests {
	use tempfile::tempdir;

	use super::*;

	#[test]
	fn offline_gateway_matches_titles() {
		let mut gateway = offline_gateway();
		let results = gateway.search("index").unwrap();
		assert_eq!(results.len(), 1);
		assert_eq!(results[0].title, "Indexes");

		let highlighted = gateway.search("full-text search").unwrap();
		assert!(highlighted[0].primary_highlight().is_some());
	}

	#[test]
	fn history_store_uses_configured_limits() {
		let dir = tempdir().unwrap();
		let settings = HistorySettings {
			key: "custom_history".into(),
			max_size: 2,
			dir: dir.path().to_path_buf(),
		};
		let history = open_history(&settings).unwrap();
		for id in ["a", "b", "c"] {
			history.record(&SearchResult::new(id, id)).unwrap();
		}
		assert_eq!(history.list().unwrap().len(), 2);
		assert!(dir.path().join("custom_history.json").exists());
	}
}
