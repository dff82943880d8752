use comfy_table::Table;
use itertools::Itertools;

use crate::{BranchReport, Contribution, ReportData, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
	#[default]
	Text,
	Json,
}

impl Format {
	pub fn extension(&self) -> &'static str {
		match self {
			Format::Text => "txt",
			Format::Json => "json",
		}
	}
}

pub fn render(report: &ReportData, format: Format) -> Result<String> {
	match format {
		Format::Text => Ok(to_text(report)),
		Format::Json => Ok(serde_json::to_string_pretty(report)?),
	}
}

/// Contributions ordered by lines added, most first; ties by email.
pub fn ranked(branch: &BranchReport) -> Vec<&Contribution> {
	branch
		.contributions()
		.iter()
		.sorted_by(|a, b| b.lines_added.cmp(&a.lines_added).then_with(|| a.email.cmp(&b.email)))
		.collect()
}

fn timeline(contribution: &Contribution) -> String {
	contribution
		.timeline
		.iter()
		.sorted_by_key(|(key, _)| key.to_string())
		.map(|(key, count)| format!("{key}: {count}"))
		.join("\n")
}

pub fn to_text(report: &ReportData) -> String {
	let mut out = String::new();
	out.push_str(&format!("Repository: {}\n", report.repo_name));
	out.push_str(&format!("File filter: {}\n", report.file_filter));

	for (name, branch) in report.branches.iter() {
		let mut table = Table::new();
		table.set_header(["Email", "Commits", "Timeline", "Lines Added", "Lines Removed", "Lines Edited", "File Filter"]);

		for contribution in ranked(branch) {
			table.add_row([
				contribution.email.clone(),
				contribution.commit_count.to_string(),
				timeline(contribution),
				contribution.lines_added.to_string(),
				contribution.lines_removed.to_string(),
				contribution.lines_edited().to_string(),
				report.file_filter.clone(),
			]);
		}

		out.push_str(&format!("\nBranch: {name}\n{table}\n"));
	}
	out
}
