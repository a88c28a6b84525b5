use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, trace, warn};

use super::commands::SearchCommand;
use crate::gateway::SearchGateway;
use crate::session::SearchResponse;

/// Channels and shared state connecting the UI to the search worker.
pub struct WorkerHandle {
	pub commands: Sender<SearchCommand>,
	pub responses: Receiver<SearchResponse>,
	pub latest_query_id: Arc<AtomicU64>,
	pub thread: JoinHandle<()>,
}

/// Launches the background search worker thread and returns communication channels.
pub fn spawn<G>(gateway: G) -> WorkerHandle
where
	G: SearchGateway + 'static,
{
	let (command_tx, command_rx) = mpsc::channel();
	let (response_tx, response_rx) = mpsc::channel();
	let latest_query_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_query_id);

	let thread = thread::spawn(move || {
		let mut gateway = gateway;
		worker_loop(&mut gateway, command_rx, response_tx, thread_latest);
	});

	WorkerHandle {
		commands: command_tx,
		responses: response_rx,
		latest_query_id,
		thread,
	}
}

fn worker_loop<G: SearchGateway>(
	gateway: &mut G,
	command_rx: Receiver<SearchCommand>,
	response_tx: Sender<SearchResponse>,
	latest_query_id: Arc<AtomicU64>,
) {
	while let Ok(command) = command_rx.recv() {
		if !handle_command(gateway, &response_tx, &latest_query_id, command) {
			break;
		}
	}
	debug!("search worker stopped");
}

fn handle_command<G: SearchGateway>(
	gateway: &mut G,
	response_tx: &Sender<SearchResponse>,
	latest_query_id: &AtomicU64,
	command: SearchCommand,
) -> bool {
	match command {
		SearchCommand::Query { id, query } => {
			// Queries queue up while a slow call is running; only the newest matters.
			if id < latest_query_id.load(Ordering::Acquire) {
				trace!(id, "skipping superseded query");
				return true;
			}
			let outcome = gateway.search(&query);
			if let Err(err) = &outcome {
				warn!(id, error = %err, "search request failed");
			}
			response_tx
				.send(SearchResponse { id, query, outcome })
				.is_ok()
		}
		SearchCommand::Shutdown => false,
	}
}
