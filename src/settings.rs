use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

use docseek::app_dirs;
use docseek::gateway::{AtlasConfig, DEFAULT_BASE_URL, DEFAULT_FUNCTION, DEFAULT_TIMEOUT};
use docseek::history::{SEARCH_HISTORY_KEY, SEARCH_HISTORY_MAX_SIZE, validate_key};
use docseek::ui::style;
use docseek::UiConfig;

use crate::cli::CliArgs;

mod errors;

pub(crate) use errors::ConfigError;

const ENV_PREFIX: &str = "docseek";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	search: SearchSection,
	history: HistorySection,
	ui: UiSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SearchSection {
	app_id: Option<String>,
	base_url: Option<String>,
	function: Option<String>,
	timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct HistorySection {
	key: Option<String>,
	max_size: Option<usize>,
	dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	input_title: Option<String>,
	placeholder: Option<String>,
	initial_query: Option<String>,
	theme: Option<String>,
	footer: Option<String>,
	results_title: Option<String>,
	history_title: Option<String>,
}

/// Remote search settings after defaults are applied.
pub struct SearchSettings {
	pub app_id: Option<String>,
	pub base_url: String,
	pub function: String,
	pub timeout: Duration,
	pub offline: bool,
}

impl SearchSettings {
	/// Build the gateway configuration. Fails when no app id is configured.
	pub fn atlas_config(&self) -> Result<AtlasConfig> {
		let app_id = self.app_id.clone().ok_or_else(|| {
			anyhow!(
				"no App Services app id configured; pass --app-id, set DOCSEEK_APP_ID, \
				 or add search.app_id to the config file"
			)
		})?;
		Ok(AtlasConfig::new(app_id)
			.with_base_url(self.base_url.clone())
			.with_function(self.function.clone())
			.with_timeout(self.timeout))
	}
}

pub struct HistorySettings {
	pub key: String,
	pub max_size: usize,
	pub dir: PathBuf,
}

pub struct ResolvedConfig {
	pub search: SearchSettings,
	pub history: HistorySettings,
	pub initial_query: String,
	pub theme: Option<String>,
	pub ui: UiConfig,
}

impl ResolvedConfig {
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!(
			"  App id: {}",
			self.search.app_id.as_deref().unwrap_or("(not set)")
		);
		println!("  Base URL: {}", self.search.base_url);
		println!("  Function: {}", self.search.function);
		println!("  Timeout: {}s", self.search.timeout.as_secs());
		println!("  Offline: {}", bool_to_word(self.search.offline));
		println!("  History key: {}", self.history.key);
		println!("  History size: {}", self.history.max_size);
		println!("  History dir: {}", self.history.dir.display());
		println!(
			"  UI theme: {}",
			self.theme.as_deref().unwrap_or("(use the library default)")
		);
		println!("  Prompt title: {}", self.ui.input_title);
		if !self.initial_query.is_empty() {
			println!("  Initial query: {}", self.initial_query);
		}
	}
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli.offline)
}

fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix(ENV_PREFIX)
			.separator("__")
			.try_parsing(true),
	);

	builder
		.build()
		.context("failed to load configuration sources")
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".docseek.toml"));
		files.push(current_dir.join("docseek.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(app_id) = cli.app_id.clone() {
			self.search.app_id = Some(app_id);
		}
		if let Some(base_url) = cli.base_url.clone() {
			self.search.base_url = Some(base_url);
		}
		if let Some(function) = cli.function.clone() {
			self.search.function = Some(function);
		}
		if let Some(size) = cli.history_size {
			self.history.max_size = Some(size);
		}
		if let Some(dir) = cli.history_dir.clone() {
			self.history.dir = Some(dir);
		}
		if let Some(query) = cli.initial_query.clone() {
			self.ui.initial_query = Some(query);
		}
		if let Some(theme) = cli.theme.clone() {
			self.ui.theme = Some(theme);
		}
	}

	fn resolve(self, offline: bool) -> Result<ResolvedConfig> {
		let search = resolve_search(self.search, offline)?;
		let history = resolve_history(self.history)?;

		let theme = match self.ui.theme {
			Some(name) if name.trim().is_empty() => None,
			Some(name) => {
				if style::by_name(&name).is_none() {
					let known = style::names().join(", ");
					return Err(
						ConfigError::invalid("ui.theme", name, format!("expected one of {known}"))
							.into(),
					);
				}
				Some(name)
			}
			None => None,
		};

		let mut ui = UiConfig::default();
		if let Some(title) = self.ui.input_title {
			ui.input_title = title;
		}
		if let Some(placeholder) = self.ui.placeholder {
			ui.placeholder = placeholder;
		}
		if let Some(footer) = self.ui.footer {
			ui.footer = footer;
		}
		if let Some(title) = self.ui.results_title {
			ui.results_title = title;
		}
		if let Some(title) = self.ui.history_title {
			ui.history_title = title;
		}

		Ok(ResolvedConfig {
			search,
			history,
			initial_query: self.ui.initial_query.unwrap_or_default(),
			theme,
			ui,
		})
	}
}

fn resolve_search(section: SearchSection, offline: bool) -> Result<SearchSettings> {
	let app_id = section
		.app_id
		.map(|id| id.trim().to_string())
		.filter(|id| !id.is_empty());

	let base_url = section
		.base_url
		.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
	let trimmed = base_url.trim().trim_end_matches('/').to_string();
	if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
		return Err(
			ConfigError::invalid("search.base_url", base_url, "must be an http(s) URL").into(),
		);
	}

	let function = section
		.function
		.unwrap_or_else(|| DEFAULT_FUNCTION.to_string());
	if function.trim().is_empty() {
		return Err(ConfigError::invalid("search.function", function, "must not be empty").into());
	}

	let timeout = match section.timeout_secs {
		Some(0) => {
			return Err(ConfigError::invalid("search.timeout_secs", "0", "must be positive").into());
		}
		Some(secs) => Duration::from_secs(secs),
		None => DEFAULT_TIMEOUT,
	};

	Ok(SearchSettings {
		app_id,
		base_url: trimmed,
		function: function.trim().to_string(),
		timeout,
		offline,
	})
}

fn resolve_history(section: HistorySection) -> Result<HistorySettings> {
	let key = section
		.key
		.unwrap_or_else(|| SEARCH_HISTORY_KEY.to_string());
	if let Err(err) = validate_key(&key) {
		return Err(ConfigError::invalid("history.key", key, err.to_string()).into());
	}

	let max_size = section.max_size.unwrap_or(SEARCH_HISTORY_MAX_SIZE);
	if max_size == 0 {
		return Err(ConfigError::invalid("history.max_size", "0", "must be at least 1").into());
	}

	let mut dir = match section.dir {
		Some(dir) => dir,
		None => app_dirs::get_data_dir()?,
	};
	if dir.is_relative() {
		dir = env::current_dir()
			.context("failed to resolve current directory for history dir")?
			.join(dir);
	}

	Ok(HistorySettings { key, max_size, dir })
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
