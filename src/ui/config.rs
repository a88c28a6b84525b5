/// Text used by the dialog when rendering its frame, headers and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiConfig {
	pub input_title: String,
	pub placeholder: String,
	pub results_title: String,
	pub history_title: String,
	pub footer: String,
	pub empty_message: String,
	pub loading_message: String,
}

impl Default for UiConfig {
	fn default() -> Self {
		Self {
			input_title: "Search docs".to_string(),
			placeholder: "Search...".to_string(),
			results_title: "Results".to_string(),
			history_title: "Recent".to_string(),
			footer: "Powered by MongoDB Atlas".to_string(),
			empty_message: "No results".to_string(),
			loading_message: "Searching".to_string(),
		}
	}
}

impl UiConfig {
	#[must_use]
	pub fn with_input_title(mut self, title: impl Into<String>) -> Self {
		self.input_title = title.into();
		self
	}

	#[must_use]
	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	#[must_use]
	pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
		self.footer = footer.into();
		self
	}

	#[must_use]
	pub fn with_results_title(mut self, title: impl Into<String>) -> Self {
		self.results_title = title.into();
		self
	}

	#[must_use]
	pub fn with_history_title(mut self, title: impl Into<String>) -> Self {
		self.history_title = title.into();
		self
	}
}
