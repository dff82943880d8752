use std::path::PathBuf;

use anyhow::Context;
use branchstats::render::{self, Format};
use branchstats::{analyze, AnalyzeArgs, GroupBy, Repo};
use chrono::Local;
use clap::Parser;
use tracing::{error, info, Level};

/// Per-branch, per-author contribution report of a git repository
#[derive(Parser, Debug)]
#[command(name = "branchstats", version, long_about = None)]
struct Cli {
	/// Path to the git repository
	#[arg(long)]
	repository: PathBuf,

	/// Pathspec restricting the counted files (e.g. '*.go'). Optional
	#[arg(long, default_value = "")]
	filter: String,

	/// Name of the main branch used for merge-base
	#[arg(long, default_value = "main")]
	mainbranch: String,

	/// Group commit dates by week or month
	#[arg(long, value_enum, default_value_t = GroupBy::Month)]
	groupby: GroupBy,

	/// Report format
	#[arg(long, value_enum, default_value_t = Format::Text)]
	format: Format,

	/// Report file (default: report_<repository>_<timestamp>.<format>)
	#[arg(short, long)]
	output: Option<PathBuf>,

	/// Print the report instead of writing a file
	#[arg(long, conflicts_with = "output")]
	stdout: bool,

	/// Increase log verbosity (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

fn init_log(verbose: u8) -> anyhow::Result<()> {
	let level = match verbose {
		0 => Level::INFO,
		1 => Level::DEBUG,
		_ => Level::TRACE,
	};
	let subscriber = tracing_subscriber::fmt()
		.compact()
		.with_file(false)
		.with_line_number(false)
		.with_target(false)
		.with_max_level(level)
		.with_thread_ids(false)
		.with_thread_names(false)
		.finish();
	tracing::subscriber::set_global_default(subscriber).context("failed to install log subscriber")
}

fn run(cli: Cli) -> anyhow::Result<()> {
	branchstats::git_executable()?;

	let repo = Repo::open(&cli.repository)?;
	let repo_name = repo.name();
	info!("analyzing repository: {repo_name}");

	let args = AnalyzeArgs::builder()
		.main_branch(&cli.mainbranch)
		.group_by(cli.groupby)
		.file_filter(&cli.filter)
		.build()?;
	info!("main branch: {}, group by: {}", args.main_branch(), args.group_by());

	let report = analyze(&repo, &repo_name, &args).context("error analyzing git history")?;
	info!("{report}");

	let rendered = render::render(&report, cli.format).context("error rendering report")?;

	if cli.stdout {
		println!("{rendered}");
		return Ok(());
	}

	let filename = cli.output.unwrap_or_else(|| {
		PathBuf::from(format!(
			"report_{}_{}.{}",
			repo_name,
			Local::now().format("%Y-%m-%d_%H%M%S"),
			cli.format.extension()
		))
	});
	std::fs::write(&filename, rendered).with_context(|| format!("error writing report to {filename:?}"))?;
	info!("report generated: {filename:?}");
	Ok(())
}

fn main() {
	let cli = Cli::parse();
	let logging = init_log(cli.verbose);
	if let Err(err) = &logging {
		eprintln!("{err:#}");
	}

	if let Err(err) = run(cli) {
		match logging {
			Ok(()) => error!("{err:#}"),
			Err(_) => eprintln!("{err:#}"),
		}
		std::process::exit(1);
	}
}
