use std::fmt::Write;
use std::path::PathBuf;

use clap::{
	ArgAction, ColorChoice, CommandFactory, FromArgMatches, Parser, ValueEnum,
	builder::{
		Styles,
		styling::{AnsiColor, Effects},
	},
};
use docseek::app_dirs;

/// Produce the full version banner including config and data directories.
fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let data_dir = match app_dirs::get_data_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("docseek {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "data directory: {data_dir}");

	Box::leak(details.into_boxed_str())
}

fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}

/// Parse command line arguments into the strongly typed [`CliArgs`] structure.
pub(crate) fn parse_cli() -> CliArgs {
	let mut matches = CliArgs::command().get_matches();
	CliArgs::from_arg_matches_mut(&mut matches).unwrap_or_else(|err| err.exit())
}

#[derive(Parser, Debug)]
#[command(
	name = "docseek",
	version,
	long_version = long_version(),
	about = "Search documentation pages from the terminal",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
/// Command-line arguments accepted by the `docseek` binary.
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "DOCSEEK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long = "app-id",
		value_name = "ID",
		env = "DOCSEEK_APP_ID",
		help = "App Services application id hosting the search function"
	)]
	pub(crate) app_id: Option<String>,
	#[arg(
		long = "base-url",
		value_name = "URL",
		help = "App Services base URL (default: https://realm.mongodb.com)"
	)]
	pub(crate) base_url: Option<String>,
	#[arg(
		long,
		value_name = "NAME",
		help = "Name of the remote search function (default: searchPageContents)"
	)]
	pub(crate) function: Option<String>,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Provide an initial search query (default: empty)"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		long,
		value_name = "THEME",
		help = "Select a theme by name (default: default)"
	)]
	pub(crate) theme: Option<String>,
	#[arg(
		long = "history-size",
		value_name = "NUM",
		help = "Number of opened results to remember (default: 8)"
	)]
	pub(crate) history_size: Option<usize>,
	#[arg(
		long = "history-dir",
		value_name = "PATH",
		help = "Directory holding the history file (default: data directory)"
	)]
	pub(crate) history_dir: Option<PathBuf>,
	#[arg(
		long = "offline",
		help = "Search a small built-in page list instead of the remote service (default: disabled)"
	)]
	pub(crate) offline: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'l',
		long = "list-themes",
		help = "List supported themes and exit (default: disabled)"
	)]
	pub(crate) list_themes: bool,
	#[arg(
		long = "list-history",
		help = "Print the stored search history and exit (default: disabled)"
	)]
	pub(crate) list_history: bool,
	#[arg(
		long = "clear-history",
		conflicts_with = "list_history",
		help = "Delete the stored search history and exit (default: disabled)"
	)]
	pub(crate) clear_history: bool,
	#[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Plain, help = "Choose how to print the result")]
	pub(crate) output: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
/// Output formats supported by the CLI utility.
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
		let mut matches = CliArgs::command().try_get_matches_from(args)?;
		CliArgs::from_arg_matches_mut(&mut matches)
	}

	#[test]
	fn command_definition_is_consistent() {
		CliArgs::command().debug_assert();
	}

	#[test]
	fn parse_cli_accepts_default_arguments() {
		let parsed = parse(&["docseek"]).expect("parses");
		assert_eq!(parsed.output, OutputFormat::Plain);
		assert!(!parsed.offline);
		assert!(parsed.initial_query.is_none());
	}

	#[test]
	fn parses_search_and_history_flags() {
		let parsed = parse(&[
			"docseek",
			"--app-id",
			"docs-abc",
			"-q",
			"atlas",
			"--history-size",
			"3",
			"-o",
			"json",
		])
		.expect("parses");
		assert_eq!(parsed.app_id.as_deref(), Some("docs-abc"));
		assert_eq!(parsed.initial_query.as_deref(), Some("atlas"));
		assert_eq!(parsed.history_size, Some(3));
		assert_eq!(parsed.output, OutputFormat::Json);
	}

	#[test]
	fn history_actions_conflict() {
		assert!(parse(&["docseek", "--list-history", "--clear-history"]).is_err());
	}
}
