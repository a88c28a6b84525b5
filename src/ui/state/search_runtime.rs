use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

use crate::search::{SearchCommand, WorkerHandle};
use crate::session::{SearchResponse, SearchTicket};

/// UI-side end of the search worker channels.
pub(crate) struct SearchRuntime {
	tx: Sender<SearchCommand>,
	rx: Receiver<SearchResponse>,
	latest_query_id: Arc<AtomicU64>,
	issued: u64,
}

impl SearchRuntime {
	pub(crate) fn new(handle: WorkerHandle) -> Self {
		// The worker thread is detached; it exits once it sees `Shutdown` or the
		// command channel closes, even if a request is still in flight.
		let WorkerHandle {
			commands,
			responses,
			latest_query_id,
			thread: _,
		} = handle;
		Self {
			tx: commands,
			rx: responses,
			latest_query_id,
			issued: 0,
		}
	}

	pub(crate) fn shutdown(&self) {
		let _ = self.tx.send(SearchCommand::Shutdown);
	}

	pub(crate) fn issue(&mut self, ticket: SearchTicket) {
		self.supersede(ticket.id);
		self.issued = self.issued.saturating_add(1);
		let _ = self.tx.send(SearchCommand::Query {
			id: ticket.id,
			query: ticket.query,
		});
	}

	/// Mark every query older than `generation` as obsolete for the worker.
	pub(crate) fn supersede(&self, generation: u64) {
		self.latest_query_id.store(generation, AtomicOrdering::Release);
	}

	pub(crate) fn has_issued_query(&self) -> bool {
		self.issued > 0
	}

	pub(crate) fn try_recv(&mut self) -> Result<SearchResponse, TryRecvError> {
		self.rx.try_recv()
	}
}
