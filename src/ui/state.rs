//! Core state container for the search dialog.
//!
//! [`App`] bundles the query session, the history store, the text input and
//! the list selection. The event loop, key handling and rendering live in
//! sibling modules and operate on this struct.

use std::time::Duration;

use ratatui::widgets::ListState;
use throbber_widgets_tui::ThrobberState;
use tracing::warn;

use crate::gateway::SearchGateway;
use crate::history::{SearchHistory, Storage};
use crate::search;
use crate::session::QuerySession;
use crate::types::{HistoryEntry, SearchSelection};
use crate::ui::config::UiConfig;
use crate::ui::input::SearchInput;
use crate::ui::style::Theme;

mod search_runtime;

pub(crate) use search_runtime::SearchRuntime;

/// History store used by the dialog, type-erased over its backend.
pub type HistoryStore = SearchHistory<Box<dyn Storage>>;

/// Which list the dialog is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
	/// Blank query: recently opened results.
	History,
	/// Non-blank query: live search results.
	Results,
}

impl Drop for App<'_> {
	fn drop(&mut self) {
		self.search.shutdown();
	}
}

pub struct App<'a> {
	pub session: QuerySession,
	pub search_input: SearchInput<'a>,
	pub list_state: ListState,
	pub theme: Theme,
	pub(crate) ui: UiConfig,
	pub(crate) history: HistoryStore,
	pub(crate) history_entries: Vec<HistoryEntry>,
	pub(crate) notice: Option<String>,
	pub(crate) throbber_state: ThrobberState,
	pub(in crate::ui) search: SearchRuntime,
	pub(crate) initial_results_timeout: Option<Duration>,
}

impl<'a> App<'a> {
	/// Spawn the search worker for `gateway` and load the stored history.
	pub fn new<G>(gateway: G, history: HistoryStore) -> Self
	where
		G: SearchGateway + 'static,
	{
		let search = SearchRuntime::new(search::spawn(gateway));
		let mut app = Self {
			session: QuerySession::new(),
			search_input: SearchInput::default(),
			list_state: ListState::default(),
			theme: Theme::default(),
			ui: UiConfig::default(),
			history,
			history_entries: Vec::new(),
			notice: None,
			throbber_state: ThrobberState::default(),
			search,
			initial_results_timeout: Some(Duration::from_millis(250)),
		};
		app.style_input();
		app.reload_history();
		app
	}

	pub fn set_theme(&mut self, theme: Theme) {
		self.theme = theme;
		self.style_input();
	}

	pub fn set_ui_config(&mut self, ui: UiConfig) {
		self.ui = ui;
		self.style_input();
	}

	/// Seed the input. The search for it is issued when the loop starts.
	pub fn set_initial_query(&mut self, query: impl Into<String>) {
		self.search_input = SearchInput::new(query);
		self.style_input();
	}

	fn style_input(&mut self) {
		self.search_input
			.set_placeholder(self.ui.placeholder.clone(), self.theme.muted);
		self.search_input.set_style(self.theme.text);
	}

	/// How long the loop waits for the seeded query before the first draw.
	pub fn set_initial_results_timeout(&mut self, timeout: Option<Duration>) {
		self.initial_results_timeout = timeout;
	}

	pub fn history_entries(&self) -> &[HistoryEntry] {
		&self.history_entries
	}

	pub(crate) fn view(&self) -> View {
		if self.session.is_idle() {
			View::History
		} else {
			View::Results
		}
	}

	/// Number of selectable rows in the current view.
	pub(crate) fn visible_len(&self) -> usize {
		match self.view() {
			View::History => self.history_entries.len(),
			View::Results if self.session.is_loading() => 0,
			View::Results => self.session.results().len(),
		}
	}

	/// Keep the selection inside the visible rows.
	pub(crate) fn ensure_selection(&mut self) {
		let len = self.visible_len();
		if len == 0 {
			self.list_state.select(None);
		} else if let Some(selected) = self.list_state.selected() {
			if selected >= len {
				self.list_state.select(Some(len - 1));
			}
		} else {
			self.list_state.select(Some(0));
		}
	}

	/// Reset the selection to the first visible row.
	pub(crate) fn reset_selection(&mut self) {
		self.list_state.select(None);
		self.ensure_selection();
	}

	pub(crate) fn current_selection(&self) -> Option<SearchSelection> {
		let index = self.list_state.selected()?;
		match self.view() {
			View::History => self
				.history_entries
				.get(index)
				.cloned()
				.map(SearchSelection::History),
			View::Results if self.session.is_loading() => None,
			View::Results => self
				.session
				.results()
				.get(index)
				.cloned()
				.map(SearchSelection::Result),
		}
	}

	/// Re-read the history list from storage.
	pub(crate) fn reload_history(&mut self) {
		match self.history.list() {
			Ok(entries) => self.history_entries = entries,
			Err(err) => {
				warn!(error = %err, "failed to load search history");
				self.history_entries.clear();
				self.notice = Some(format!("History unavailable: {err}"));
			}
		}
		self.ensure_selection();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gateway::StaticGateway;
	use crate::history::MemoryStorage;
	use crate::types::SearchResult;

	fn store() -> HistoryStore {
		SearchHistory::new(Box::new(MemoryStorage::new()) as Box<dyn Storage>)
	}

	#[test]
	fn blank_query_shows_history() {
		let history = store();
		history
			.record(&SearchResult::new("https://www.x.io/a", "Alpha"))
			.unwrap();
		let app = App::new(StaticGateway::new(Vec::new()), history);
		assert_eq!(app.view(), View::History);
		assert_eq!(app.visible_len(), 1);
		assert_eq!(app.list_state.selected(), Some(0));
		assert!(matches!(
			app.current_selection(),
			Some(SearchSelection::History(_))
		));
	}

	#[test]
	fn empty_history_has_no_selection() {
		let app = App::new(StaticGateway::new(Vec::new()), store());
		assert_eq!(app.visible_len(), 0);
		assert_eq!(app.current_selection(), None);
	}
}
