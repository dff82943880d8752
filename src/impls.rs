use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::{AnalyzeArgs, AnalyzeArgsBuilder, BranchReport, Contribution, Error, GroupBy, LogRange, ReportData};

pub const DEFAULT_MAIN_BRANCH: &str = "main";

// region LogRange

impl Display for LogRange {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			LogRange::Branch(branch) => write!(f, "{branch}"),
			LogRange::Unique { base, branch } => write!(f, "{base}..{branch}"),
		}
	}
}

// endregion LogRange

// region GroupBy

impl GroupBy {
	/// Timeline key of `date`: `YYYY-WW` using the ISO week-year, or `YYYY-MON`.
	pub fn bucket(&self, date: NaiveDate) -> String {
		match self {
			GroupBy::Week => {
				let week = date.iso_week();
				format!("{:04}-{:02}", week.year(), week.week())
			}
			GroupBy::Month => format!("{:04}-{}", date.year(), date.format("%b").to_string().to_uppercase()),
		}
	}
}

impl FromStr for GroupBy {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"week" => Ok(GroupBy::Week),
			"month" => Ok(GroupBy::Month),
			other => Err(Error::InvalidArgs(format!("expected 'week' or 'month' for group by, got '{other}'"))),
		}
	}
}

impl Display for GroupBy {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			GroupBy::Week => write!(f, "week"),
			GroupBy::Month => write!(f, "month"),
		}
	}
}

// endregion GroupBy

// region AnalyzeArgs

impl AnalyzeArgsBuilder {
	pub fn main_branch(mut self, value: &str) -> Self {
		self.0.main_branch = value.trim().to_string();
		self
	}

	pub fn group_by(mut self, value: GroupBy) -> Self {
		self.0.group_by = value;
		self
	}

	/// Pathspec handed to `git log --`. An empty value means no filter.
	pub fn file_filter(mut self, value: &str) -> Self {
		self.0.file_filter = Some(value.trim().to_string()).filter(|v| !v.is_empty());
		self
	}

	pub fn build(self) -> crate::Result<AnalyzeArgs> {
		self.0.validate()?;
		Ok(self.0)
	}
}

impl AnalyzeArgs {
	pub fn builder() -> AnalyzeArgsBuilder {
		AnalyzeArgsBuilder(Default::default())
	}

	pub fn main_branch(&self) -> &str {
		&self.main_branch
	}

	pub fn group_by(&self) -> GroupBy {
		self.group_by
	}

	pub fn file_filter(&self) -> Option<&str> {
		self.file_filter.as_deref()
	}

	pub(crate) fn validate(&self) -> crate::Result<()> {
		if self.main_branch.is_empty() {
			return Err(Error::InvalidArgs("main branch name cannot be empty".to_string()));
		}
		Ok(())
	}
}

impl Default for AnalyzeArgs {
	fn default() -> Self {
		AnalyzeArgs {
			main_branch: DEFAULT_MAIN_BRANCH.to_string(),
			group_by: GroupBy::default(),
			file_filter: None,
		}
	}
}

// endregion AnalyzeArgs

// region Contribution

impl Contribution {
	pub fn new<T: Into<String>>(email: T) -> Self {
		Contribution {
			email: email.into(),
			..Default::default()
		}
	}

	pub fn lines_edited(&self) -> u64 {
		self.lines_added.saturating_add(self.lines_removed)
	}

	pub fn add_lines(&mut self, added: u64, removed: u64) {
		self.lines_added = self.lines_added.saturating_add(added);
		self.lines_removed = self.lines_removed.saturating_add(removed);
	}
}

impl Serialize for Contribution {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("Contribution", 6)?;
		state.serialize_field("email", &self.email)?;
		state.serialize_field("commit_count", &self.commit_count)?;
		state.serialize_field("lines_added", &self.lines_added)?;
		state.serialize_field("lines_removed", &self.lines_removed)?;
		state.serialize_field("lines_edited", &self.lines_edited())?;
		state.serialize_field("timeline", &self.timeline)?;
		state.end()
	}
}

impl Display for Contribution {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}: commits: {}, lines added: {}, lines removed: {}, lines edited: {}",
			self.email,
			self.commit_count,
			self.lines_added,
			self.lines_removed,
			self.lines_edited()
		)
	}
}

// endregion Contribution

// region BranchReport

impl BranchReport {
	pub fn new<T: Into<String>>(name: T) -> Self {
		BranchReport {
			name: name.into(),
			..Default::default()
		}
	}

	/// Slot of `email`, creating an empty contribution on first sight.
	pub(crate) fn slot(&mut self, email: &str) -> usize {
		if let Some(slot) = self.index.get(email) {
			return *slot;
		}
		let slot = self.contributions.len();
		self.contributions.push(Contribution::new(email));
		self.index.insert(email.to_string(), slot);
		slot
	}

	pub(crate) fn at_mut(&mut self, slot: usize) -> &mut Contribution {
		&mut self.contributions[slot]
	}

	pub fn get(&self, email: &str) -> Option<&Contribution> {
		self.index.get(email).map(|slot| &self.contributions[*slot])
	}

	/// Contributions in first-seen order.
	pub fn contributions(&self) -> &[Contribution] {
		&self.contributions
	}

	pub fn len(&self) -> usize {
		self.contributions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contributions.is_empty()
	}
}

// endregion BranchReport

// region ReportData

impl ReportData {
	pub fn branch(&self, name: &str) -> Option<&BranchReport> {
		self.branches.get(name)
	}

	pub fn total_commits(&self) -> usize {
		self.branches.values().flat_map(|b| b.contributions()).map(|c| c.commit_count).sum()
	}
}

impl Display for ReportData {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"repository: {}, branches: {}, commits: {}",
			self.repo_name,
			self.branches.len(),
			self.total_commits()
		)
	}
}

// endregion ReportData
