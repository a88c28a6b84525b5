use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use super::App;
use super::state::View;
use crate::types::{SearchOutcome, SearchSelection};

impl<'a> App<'a> {
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Result<Option<SearchOutcome>> {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Esc => {
				return Ok(Some(SearchOutcome::cancelled(self.search_input.text())));
			}
			KeyCode::Char('c') if ctrl => {
				return Ok(Some(SearchOutcome::cancelled(self.search_input.text())));
			}
			KeyCode::Enter => return Ok(self.accept_selection()),
			KeyCode::Up => self.move_selection_up(),
			KeyCode::Char('p') if ctrl => self.move_selection_up(),
			KeyCode::Down => self.move_selection_down(),
			KeyCode::Char('n') if ctrl => self.move_selection_down(),
			KeyCode::Char('d') if ctrl => self.clear_history(),
			_ => {
				if self.search_input.input(key) {
					self.sync_query();
				}
			}
		}
		Ok(None)
	}

	/// Open the highlighted row. Live results are recorded in the history
	/// first; reopening a history entry leaves the history untouched.
	fn accept_selection(&mut self) -> Option<SearchOutcome> {
		let selection = self.current_selection()?;
		if let SearchSelection::Result(result) = &selection {
			if let Err(err) = self.history.record(result) {
				warn!(id = %result.id, error = %err, "failed to record search history");
			}
		}
		Some(SearchOutcome {
			accepted: true,
			selection: Some(selection),
			query: self.search_input.text().to_string(),
		})
	}

	fn clear_history(&mut self) {
		if self.view() != View::History {
			return;
		}
		match self.history.clear() {
			Ok(()) => self.notice = Some("History cleared".to_string()),
			Err(err) => {
				warn!(error = %err, "failed to clear search history");
				self.notice = Some(format!("Could not clear history: {err}"));
			}
		}
		self.reload_history();
	}

	fn move_selection_up(&mut self) {
		if let Some(selected) = self.list_state.selected() {
			if selected > 0 {
				self.list_state.select(Some(selected - 1));
			}
		}
	}

	fn move_selection_down(&mut self) {
		if let Some(selected) = self.list_state.selected() {
			if selected + 1 < self.visible_len() {
				self.list_state.select(Some(selected + 1));
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use std::thread;
	use std::time::{Duration, Instant};

	use super::*;
	use crate::gateway::StaticGateway;
	use crate::history::{MemoryStorage, SearchHistory, Storage};
	use crate::types::SearchResult;

	fn press(code: KeyCode) -> KeyEvent {
		KeyEvent::new(code, KeyModifiers::NONE)
	}

	fn ctrl(ch: char) -> KeyEvent {
		KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
	}

	fn seeded_app() -> App<'static> {
		let history = SearchHistory::new(Box::new(MemoryStorage::new()) as Box<dyn Storage>);
		history
			.record(&SearchResult::new("https://www.x.io/old", "Old"))
			.unwrap();
		let gateway = StaticGateway::new(vec![
			SearchResult::new("https://www.x.io/one", "Index one").with_doc_text("body"),
			SearchResult::new("https://www.x.io/two", "Index two"),
		]);
		App::new(gateway, history)
	}

	fn search(app: &mut App<'_>, text: &str) {
		for ch in text.chars() {
			app.handle_key(press(KeyCode::Char(ch))).unwrap();
		}
		let deadline = Instant::now() + Duration::from_secs(2);
		while app.session.is_loading() && Instant::now() < deadline {
			app.pump_search_results();
			thread::sleep(Duration::from_millis(5));
		}
	}

	#[test]
	fn escape_cancels_with_current_query() {
		let mut app = seeded_app();
		app.handle_key(press(KeyCode::Char('q'))).unwrap();
		let outcome = app.handle_key(press(KeyCode::Esc)).unwrap().unwrap();
		assert!(!outcome.accepted);
		assert_eq!(outcome.query, "q");
		assert!(outcome.selection.is_none());
	}

	#[test]
	fn enter_on_result_records_history() {
		let mut app = seeded_app();
		search(&mut app, "index");
		app.handle_key(press(KeyCode::Down)).unwrap();

		let outcome = app.handle_key(press(KeyCode::Enter)).unwrap().unwrap();
		assert!(outcome.accepted);
		assert_eq!(outcome.selected_id(), Some("https://www.x.io/two"));

		let stored = app.history.list().unwrap();
		assert_eq!(stored[0].id(), "https://www.x.io/two");
		assert_eq!(stored.len(), 2);
	}

	#[test]
	fn enter_on_history_does_not_reorder() {
		let mut app = seeded_app();
		let outcome = app.handle_key(press(KeyCode::Enter)).unwrap().unwrap();
		assert!(outcome.selection.as_ref().is_some_and(SearchSelection::is_history));
		assert_eq!(app.history.list().unwrap().len(), 1);
	}

	#[test]
	fn enter_without_rows_does_nothing() {
		let mut app = seeded_app();
		search(&mut app, "nothing matches");
		assert!(app.handle_key(press(KeyCode::Enter)).unwrap().is_none());
	}

	#[test]
	fn ctrl_d_clears_history_only_when_idle() {
		let mut app = seeded_app();
		search(&mut app, "index");
		app.handle_key(ctrl('d')).unwrap();
		assert_eq!(app.history.list().unwrap().len(), 1);

		app.search_input = crate::ui::input::SearchInput::default();
		app.sync_query();
		app.handle_key(ctrl('d')).unwrap();
		assert!(app.history_entries().is_empty());
		assert_eq!(app.notice.as_deref(), Some("History cleared"));
	}

	#[test]
	fn selection_stays_in_bounds() {
		let mut app = seeded_app();
		search(&mut app, "index");
		for _ in 0..5 {
			app.handle_key(press(KeyCode::Down)).unwrap();
		}
		assert_eq!(app.list_state.selected(), Some(1));
		for _ in 0..5 {
			app.handle_key(ctrl('p')).unwrap();
		}
		assert_eq!(app.list_state.selected(), Some(0));
	}
}
