use anyhow::Result;
use docseek::text::decode_entities;
use docseek::{HistoryEntry, SearchOutcome, SearchSelection};
use serde_json::json;

/// Print a plain-text representation of the search outcome.
pub(crate) fn print_plain(outcome: &SearchOutcome) {
	if !outcome.accepted {
		println!("Search cancelled (query: '{}')", outcome.query);
		return;
	}

	match &outcome.selection {
		Some(selection) => println!("{}", selection.id()),
		None => println!("No selection"),
	}
}

/// Format the search outcome as a JSON string.
pub(crate) fn format_outcome_json(outcome: &SearchOutcome) -> Result<String> {
	let selection = match &outcome.selection {
		Some(selection @ SearchSelection::Result(_)) => json!({
			"type": "result",
			"id": selection.id(),
			"title": decode_entities(selection.title()),
		}),
		Some(selection @ SearchSelection::History(_)) => json!({
			"type": "history",
			"id": selection.id(),
			"title": decode_entities(selection.title()),
		}),
		None => serde_json::Value::Null,
	};

	let payload = json!({
		"accepted": outcome.accepted,
		"query": outcome.query,
		"selection": selection,
	});

	Ok(serde_json::to_string_pretty(&payload)?)
}

/// Print the JSON representation of the search outcome.
pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
	println!("{}", format_outcome_json(outcome)?);
	Ok(())
}

/// Print stored history entries, newest first.
pub(crate) fn print_history(entries: &[HistoryEntry], json: bool) -> Result<()> {
	if json {
		println!("{}", serde_json::to_string_pretty(entries)?);
		return Ok(());
	}
	if entries.is_empty() {
		println!("No search history");
		return Ok(());
	}
	for entry in entries {
		println!("{}\t{}", decode_entities(entry.title()), entry.id());
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use docseek::SearchResult;
	use serde_json::Value;

	use super::*;

	#[test]
	fn json_format_includes_result_selection() {
		let outcome = SearchOutcome {
			accepted: true,
			query: "atlas".into(),
			selection: Some(SearchSelection::Result(SearchResult::new(
				"https://www.x.io/a",
				"Q&amp;A",
			))),
		};

		let json = format_outcome_json(&outcome).expect("json");
		let value: Value = serde_json::from_str(&json).expect("parse");
		assert_eq!(value["selection"]["type"], "result");
		assert_eq!(value["selection"]["id"], "https://www.x.io/a");
		assert_eq!(value["selection"]["title"], "Q&A");
	}

	#[test]
	fn json_format_marks_history_and_cancellation() {
		let entry = HistoryEntry::from_result(&SearchResult::new("id", "Title"));
		let outcome = SearchOutcome {
			accepted: true,
			query: String::new(),
			selection: Some(SearchSelection::History(entry)),
		};
		let value: Value =
			serde_json::from_str(&format_outcome_json(&outcome).unwrap()).unwrap();
		assert_eq!(value["selection"]["type"], "history");

		let cancelled = SearchOutcome::cancelled("q");
		let value: Value =
			serde_json::from_str(&format_outcome_json(&cancelled).unwrap()).unwrap();
		assert_eq!(value["accepted"], false);
		assert!(value["selection"].is_null());
	}
}
