use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use serde::Serialize;

pub use analyzer::{analyze, resolve_range};
pub use error::{Error, Result};
pub use impls::DEFAULT_MAIN_BRANCH;
pub use parser::HistoryParser;
pub use repo::git_executable;
pub use traits::GitQuery;

mod analyzer;
mod error;
mod impls;
mod parser;
pub mod render;
mod repo;
mod traits;

/// A local git repository, queried through the `git` executable.
#[derive(Debug, Clone)]
pub struct Repo {
	inner: PathBuf,
}

/// Revision range passed to `git log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogRange {
	/// The whole history reachable from the branch.
	Branch(String),
	/// Commits reachable from `branch` but not from `base`, i.e. `base..branch`.
	Unique { base: String, branch: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
	/// ISO week, `YYYY-WW`
	Week,
	/// calendar month, `YYYY-MON`
	#[default]
	Month,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnalyzeArgs {
	main_branch: String,
	group_by: GroupBy,
	file_filter: Option<String>,
}

pub struct AnalyzeArgsBuilder(AnalyzeArgs);

/// Accumulated contribution of one author within one branch.
///
/// `lines_edited` is never stored: it is always `lines_added + lines_removed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contribution {
	pub email: String,
	pub commit_count: usize,
	pub lines_added: u64,
	pub lines_removed: u64,
	pub timeline: HashMap<String, usize>,
}

/// Contributions of every author seen on a branch.
///
/// Records live in a vector owned by the branch; `index` maps an author email to its slot.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BranchReport {
	pub name: String,
	contributions: Vec<Contribution>,
	#[serde(skip)]
	index: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
	pub repo_name: String,
	pub file_filter: String,
	pub branches: BTreeMap<String, BranchReport>,
}
