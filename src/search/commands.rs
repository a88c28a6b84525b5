/// Commands understood by the background search worker.
#[derive(Debug)]
pub enum SearchCommand {
	/// Run a remote search for the provided query.
	Query {
		/// Generation id that lets the UI correlate the response with its query.
		id: u64,
		/// User supplied query string.
		query: String,
	},
	/// Stop the background worker thread.
	Shutdown,
}
