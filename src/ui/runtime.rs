use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::debug;

use super::App;
use super::state::HistoryStore;
use crate::gateway::SearchGateway;
use crate::types::SearchOutcome;

/// Construct an [`App`] for `gateway` and `history` and run it to completion.
pub fn run<G>(gateway: G, history: HistoryStore) -> Result<SearchOutcome>
where
	G: SearchGateway + 'static,
{
	let mut app = App::new(gateway, history);
	app.run()
}

impl<'a> App<'a> {
	/// Pump the terminal event loop until the user exits with a result.
	pub fn run(&mut self) -> Result<SearchOutcome> {
		let mut terminal = ratatui::init();
		terminal.clear()?;

		self.hydrate_initial_results();

		let (event_tx, event_rx) = mpsc::channel();
		let event_loop_running = Arc::new(AtomicBool::new(true));
		let event_loop_flag = Arc::clone(&event_loop_running);

		let event_thread = thread::spawn(move || -> Result<()> {
			while event_loop_flag.load(Ordering::Relaxed) {
				if event::poll(Duration::from_millis(50))? {
					let event = event::read()?;
					if event_tx.send(event).is_err() {
						break;
					}
				}
			}
			Ok(())
		});

		let mut pending_events = VecDeque::new();

		let result: Result<SearchOutcome> = 'event_loop: loop {
			self.pump_search_results();
			if self.session.is_loading() {
				self.throbber_state.calc_next();
			}

			loop {
				match event_rx.try_recv() {
					Ok(Event::Resize(_, _)) => {}
					Ok(event) => pending_events.push_back(event),
					Err(mpsc::TryRecvError::Empty) => break,
					Err(mpsc::TryRecvError::Disconnected) => {
						break 'event_loop Err(anyhow!("input event channel disconnected"));
					}
				}
			}

			if let Err(err) = terminal.draw(|frame| self.draw(frame)) {
				break 'event_loop Err(err.into());
			}

			let mut maybe_outcome = None;
			while let Some(event) = pending_events.pop_front() {
				if let Event::Key(key) = event {
					if key.kind != KeyEventKind::Press {
						continue;
					}
					match self.handle_key(key) {
						Ok(Some(outcome)) => {
							maybe_outcome = Some(outcome);
							break;
						}
						Ok(None) => {}
						Err(err) => break 'event_loop Err(err),
					}
				}
			}

			if let Some(outcome) = maybe_outcome {
				break Ok(outcome);
			}

			thread::sleep(Duration::from_millis(16));
		};

		ratatui::restore();

		event_loop_running.store(false, Ordering::Relaxed);
		match event_thread.join() {
			Ok(join_result) => join_result?,
			Err(err) => std::panic::resume_unwind(err),
		}

		result
	}

	/// Issue the search for a seeded query and give it a moment to land
	/// before the first frame.
	pub(crate) fn hydrate_initial_results(&mut self) {
		if self.search.has_issued_query() {
			return;
		}
		self.sync_query();
		if !self.session.is_loading() {
			return;
		}

		if let Some(timeout) = self.initial_results_timeout {
			let deadline = Instant::now() + timeout;
			while Instant::now() < deadline {
				self.pump_search_results();
				if !self.session.is_loading() {
					break;
				}
				thread::sleep(Duration::from_millis(10));
			}
			debug!(
				loading = self.session.is_loading(),
				"initial results hydration finished"
			);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use crate::gateway::StaticGateway;
	use crate::history::{MemoryStorage, SearchHistory, Storage};
	use crate::types::SearchResult;
	use crate::ui::App;

	fn app(gateway: StaticGateway) -> App<'static> {
		let history = SearchHistory::new(Box::new(MemoryStorage::new()) as Box<dyn Storage>);
		App::new(gateway, history)
	}

	#[test]
	fn seeded_query_is_searched_before_first_frame() {
		let mut app = app(StaticGateway::new(vec![SearchResult::new(
			"https://www.x.io/charts",
			"Charts",
		)]));
		app.set_initial_query("chart");
		app.set_initial_results_timeout(Some(Duration::from_secs(2)));
		app.hydrate_initial_results();

		assert!(!app.session.is_loading());
		assert_eq!(app.session.query(), "chart");
		assert_eq!(app.session.results().len(), 1);
	}

	#[test]
	fn blank_seed_stays_on_history() {
		let mut app = app(StaticGateway::new(Vec::new()));
		app.hydrate_initial_results();
		assert!(app.session.is_idle());
		assert!(!app.session.is_loading());
	}
}
