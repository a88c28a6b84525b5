use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Whether a span of highlighted text matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
	/// Surrounding context. Atlas Search spells this `"text"`.
	#[serde(rename = "text", alias = "plain")]
	Plain,
	/// A run that matched the query.
	Hit,
}

/// One annotated run of text inside a [`Highlight`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
	#[serde(rename = "type")]
	pub kind: SpanKind,
	pub value: String,
}

impl TextSpan {
	#[must_use]
	pub fn plain(value: impl Into<String>) -> Self {
		Self {
			kind: SpanKind::Plain,
			value: value.into(),
		}
	}

	#[must_use]
	pub fn hit(value: impl Into<String>) -> Self {
		Self {
			kind: SpanKind::Hit,
			value: value.into(),
		}
	}

	#[must_use]
	pub fn is_hit(&self) -> bool {
		self.kind == SpanKind::Hit
	}
}

/// A highlighted excerpt returned by the remote search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Highlight {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	#[serde(default)]
	pub texts: Vec<TextSpan>,
	#[serde(
		default,
		deserialize_with = "lenient_number",
		skip_serializing_if = "Option::is_none"
	)]
	pub score: Option<f64>,
}

/// Accept plain JSON numbers as well as the extended-JSON wrappers
/// (`{"$numberDouble": "1.5"}`) that App Services functions emit. Anything
/// else is dropped rather than failing the whole response.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.as_ref().and_then(number_from_value))
}

fn number_from_value(value: &Value) -> Option<f64> {
	match value {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.parse().ok(),
		Value::Object(map) => ["$numberDouble", "$numberInt", "$numberLong", "$numberDecimal"]
			.iter()
			.find_map(|key| map.get(*key))
			.and_then(number_from_value),
		_ => None,
	}
}

impl Highlight {
	#[must_use]
	pub fn new(texts: Vec<TextSpan>) -> Self {
		Self {
			path: None,
			texts,
			score: None,
		}
	}
}

/// A single document returned by the remote search function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
	/// Opaque document locator, usually the page URL.
	#[serde(rename = "_id")]
	pub id: String,
	#[serde(default)]
	pub title: String,
	#[serde(rename = "doc_text", default)]
	pub doc_text: String,
	#[serde(default)]
	pub highlights: Vec<Highlight>,
}

impl SearchResult {
	#[must_use]
	pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			doc_text: String::new(),
			highlights: Vec::new(),
		}
	}

	#[must_use]
	pub fn with_doc_text(mut self, doc_text: impl Into<String>) -> Self {
		self.doc_text = doc_text.into();
		self
	}

	#[must_use]
	pub fn with_highlight(mut self, highlight: Highlight) -> Self {
		self.highlights.push(highlight);
		self
	}

	/// The highlight shown in the result list. Only the first one is rendered.
	#[must_use]
	pub fn primary_highlight(&self) -> Option<&Highlight> {
		self.highlights.first().filter(|h| !h.texts.is_empty())
	}
}

/// A previously opened result with its bulky text fields stripped.
///
/// Serialises exactly like a [`SearchResult`] so history files stay readable
/// by anything that understands the search response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryEntry(SearchResult);

impl HistoryEntry {
	/// Copy `result` and clear `doc_text` and `highlights`.
	#[must_use]
	pub fn from_result(result: &SearchResult) -> Self {
		Self(SearchResult::new(result.id.clone(), result.title.clone()))
	}

	#[must_use]
	pub fn id(&self) -> &str {
		&self.0.id
	}

	#[must_use]
	pub fn title(&self) -> &str {
		&self.0.title
	}

	#[must_use]
	pub fn as_result(&self) -> &SearchResult {
		&self.0
	}

	/// Re-apply sanitisation to an entry loaded from storage.
	pub(crate) fn sanitized(self) -> Self {
		Self::from_result(&self.0)
	}
}

impl From<&SearchResult> for HistoryEntry {
	fn from(result: &SearchResult) -> Self {
		Self::from_result(result)
	}
}
