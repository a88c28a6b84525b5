use anyhow::Result;

use super::App;
use super::config::UiConfig;
use super::state::HistoryStore;
use super::style::{self, Theme};
use crate::gateway::SearchGateway;
use crate::history::{SearchHistory, Storage};
use crate::types::SearchOutcome;

/// A small builder for configuring the interactive search dialog before
/// running it.
pub struct SearchUi {
	gateway: Box<dyn SearchGateway>,
	history: HistoryStore,
	initial_query: String,
	input_title: Option<String>,
	ui_config: Option<UiConfig>,
	theme: Option<Theme>,
}

impl SearchUi {
	/// Create a dialog backed by `gateway` and persisting through `history`.
	pub fn new<G>(gateway: G, history: HistoryStore) -> Self
	where
		G: SearchGateway + 'static,
	{
		Self {
			gateway: Box::new(gateway),
			history,
			initial_query: String::new(),
			input_title: None,
			ui_config: None,
			theme: None,
		}
	}

	/// Create a dialog whose history lives in `storage` with default limits.
	pub fn with_storage<G, S>(gateway: G, storage: S) -> Self
	where
		G: SearchGateway + 'static,
		S: Storage + 'static,
	{
		let storage: Box<dyn Storage> = Box::new(storage);
		Self::new(gateway, SearchHistory::new(storage))
	}

	pub fn with_input_title(mut self, title: impl Into<String>) -> Self {
		self.input_title = Some(title.into());
		self
	}

	pub fn with_ui_config(mut self, config: UiConfig) -> Self {
		self.ui_config = Some(config);
		self
	}

	pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
		self.initial_query = query.into();
		self
	}

	/// Use a built-in theme. Unknown names keep the current theme.
	pub fn with_theme_name(mut self, name: &str) -> Self {
		if let Some(theme) = style::by_name(name) {
			self.theme = Some(theme);
		}
		self
	}

	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = Some(theme);
		self
	}

	fn into_app(self) -> App<'static> {
		let mut app = App::new(self.gateway, self.history);
		let mut ui = self.ui_config.unwrap_or_default();
		if let Some(title) = self.input_title {
			ui.input_title = title;
		}
		app.set_ui_config(ui);
		if let Some(theme) = self.theme {
			app.set_theme(theme);
		}
		app.set_initial_query(self.initial_query);
		app
	}

	/// Run the interactive dialog with the configured options.
	pub fn run(self) -> Result<SearchOutcome> {
		self.into_app().run()
	}
}
