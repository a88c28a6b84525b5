mod cli;
mod settings;
mod workflow;

use anyhow::{Context, Result};
use cli::{CliArgs, OutputFormat, parse_cli, print_history, print_json, print_plain};
use docseek::{app_dirs, logging};
use settings::ResolvedConfig;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in docseek::ui::style::names() {
			println!("{name}");
		}
		return Ok(());
	}

	init_logging();

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	if cli.list_history || cli.clear_history {
		return manage_history(&cli, &resolved);
	}

	run_search(cli.output, resolved)
}

/// Logging is best effort; a read-only data dir must not block searching.
fn init_logging() {
	let result = app_dirs::get_data_dir().and_then(|dir| logging::initialize(&dir));
	if let Err(err) = result {
		eprintln!("warning: logging disabled: {err:#}");
	}
}

fn manage_history(cli: &CliArgs, settings: &ResolvedConfig) -> Result<()> {
	let history = workflow::open_history(&settings.history)?;
	if cli.clear_history {
		history.clear().context("failed to clear search history")?;
		println!("Search history cleared");
		return Ok(());
	}
	let entries = history.list().context("failed to read search history")?;
	print_history(&entries, cli.output == OutputFormat::Json)
}

/// Execute the search workflow and print output in the chosen format.
fn run_search(format: OutputFormat, settings: ResolvedConfig) -> Result<()> {
	let workflow = SearchWorkflow::from_config(settings)?;
	let outcome = workflow.run()?;

	match format {
		OutputFormat::Plain => print_plain(&outcome),
		OutputFormat::Json => print_json(&outcome)?,
	}

	Ok(())
}
