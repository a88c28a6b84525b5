use std::sync::mpsc::TryRecvError;

use tracing::trace;

use super::App;
use crate::session::{QueryChange, SearchResponse};

impl<'a> App<'a> {
	/// Sync the session with the input text and dispatch whatever it decides.
	pub(crate) fn sync_query(&mut self) {
		let change = self.session.set_query(self.search_input.text().to_string());
		self.request_search(change);
	}

	/// Act on a session query change.
	pub(crate) fn request_search(&mut self, change: QueryChange) {
		match change {
			QueryChange::Unchanged => return,
			QueryChange::Cleared => {
				self.search.supersede(self.session.generation());
				self.reload_history();
			}
			QueryChange::Search(ticket) => {
				trace!(id = ticket.id, query = %ticket.query, "issuing search");
				self.search.issue(ticket);
			}
		}
		self.notice = None;
		self.reset_selection();
	}

	/// Drain any search responses waiting on the receiver channel.
	pub(crate) fn pump_search_results(&mut self) {
		loop {
			match self.search.try_recv() {
				Ok(response) => self.handle_search_response(response),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => break,
			}
		}
	}

	fn handle_search_response(&mut self, response: SearchResponse) {
		if self.session.apply(response) {
			self.reset_selection();
		}
	}
}

#[cfg(test)]
mod tests {
	use std::thread;
	use std::time::{Duration, Instant};

	use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

	use super::*;
	use crate::gateway::StaticGateway;
	use crate::history::{MemoryStorage, SearchHistory, Storage};
	use crate::types::SearchResult;

	fn app(gateway: StaticGateway) -> App<'static> {
		let history = SearchHistory::new(Box::new(MemoryStorage::new()) as Box<dyn Storage>);
		App::new(gateway, history)
	}

	fn wait_for_results(app: &mut App<'_>) {
		let deadline = Instant::now() + Duration::from_secs(2);
		while app.session.is_loading() && Instant::now() < deadline {
			app.pump_search_results();
			thread::sleep(Duration::from_millis(5));
		}
	}

	fn type_text(app: &mut App<'_>, text: &str) {
		for ch in text.chars() {
			app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE))
				.unwrap();
		}
	}

	#[test]
	fn typing_issues_a_search_and_applies_results() {
		let gateway = StaticGateway::new(vec![
			SearchResult::new("https://www.x.io/atlas", "Atlas Search"),
			SearchResult::new("https://www.x.io/charts", "Charts"),
		]);
		let mut app = app(gateway);
		type_text(&mut app, "atlas");
		assert!(app.session.is_loading());

		wait_for_results(&mut app);
		assert!(!app.session.is_loading());
		assert_eq!(app.session.results().len(), 1);
		assert_eq!(app.list_state.selected(), Some(0));
	}

	#[test]
	fn clearing_the_query_returns_to_history() {
		let mut app = app(StaticGateway::new(Vec::new()));
		type_text(&mut app, "x");
		app.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE))
			.unwrap();
		assert!(app.session.is_idle());
		assert!(!app.session.is_loading());
	}
}
