use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::{AnalyzeArgs, BranchReport, GitQuery, HistoryParser, LogRange, ReportData, Result};

/// Range of commits a branch owns relative to `main_branch`: `merge-base..branch`.
///
/// The main branch itself, and any branch whose merge-base cannot be resolved,
/// gets its whole history instead.
pub fn resolve_range<G: GitQuery + ?Sized>(git: &G, main_branch: &str, branch: &str) -> LogRange {
	if branch == main_branch {
		return LogRange::Branch(branch.to_string());
	}

	match git.merge_base(main_branch, branch) {
		Ok(base) => LogRange::Unique {
			base,
			branch: branch.to_string(),
		},
		Err(err) => {
			let range = LogRange::Branch(branch.to_string());
			info!("merge-base of '{main_branch}' and '{branch}' failed: {err}");
			info!("using default log range: {range}");
			range
		}
	}
}

/// Build the per-branch contribution report of a repository.
///
/// Only a failure to list branches is fatal. A branch whose log cannot be read, or
/// which yields no commits, is left out of the report.
///
/// The resolved range only narrows the query when a file filter is set; unfiltered
/// queries walk the whole branch history.
pub fn analyze<G: GitQuery + ?Sized>(git: &G, repo_name: &str, args: &AnalyzeArgs) -> Result<ReportData> {
	let branches = git.list_branches()?;
	debug!("found {} branches", branches.len());

	let parser = HistoryParser::new(args.group_by());
	let mut reports: BTreeMap<String, BranchReport> = BTreeMap::new();

	for branch in branches {
		let range = resolve_range(git, args.main_branch(), &branch);
		let report = reports.entry(branch.clone()).or_insert_with(|| BranchReport::new(&branch));

		let output = match args.file_filter() {
			Some(filter) => {
				info!("applying filter '{filter}' on branch '{branch}'");
				git.log(&range, Some(filter))
			}
			None => git.log(&LogRange::Branch(branch.clone()), None),
		};

		match output {
			Ok(stream) => parser.parse_into(&stream, report),
			Err(err) => info!("git log for branch '{branch}' failed: {err}"),
		}
	}

	reports.retain(|name, report| {
		if report.is_empty() {
			debug!("dropping branch '{name}': no contributions");
		}
		!report.is_empty()
	});

	Ok(ReportData {
		repo_name: repo_name.to_string(),
		file_filter: args.file_filter().unwrap_or_default().to_string(),
		branches: reports,
	})
}
