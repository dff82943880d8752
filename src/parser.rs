use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{BranchReport, GroupBy};

lazy_static! {
	static ref SHORT_DATE_RE: Regex = Regex::new("^\\d{4}-\\d{2}-\\d{2}$").unwrap();
}

/// Numstat marker git prints instead of a count for binary files.
const BINARY_MARKER: &str = "-";

/// One line of `git log --pretty=format:%ae,%ad,%H --date=short --numstat` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogLine<'a> {
	Header(CommitHeader<'a>),
	Numstat(Numstat),
	Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CommitHeader<'a> {
	pub email: &'a str,
	pub date: &'a str,
	pub hash: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Numstat {
	Binary,
	Text { added: u64, removed: u64 },
}

/// Classify a line by its shape alone.
///
/// Any line holding both `@` and `,` is taken as a commit header, so a numstat path
/// containing both is misread as one. The log format is ours, so this is accepted.
pub(crate) fn classify(line: &str) -> LogLine<'_> {
	if line.contains('@') && line.contains(',') {
		let mut fields = line.split(',');
		return match (fields.next(), fields.next(), fields.next()) {
			(Some(email), Some(date), Some(hash)) => LogLine::Header(CommitHeader { email, date, hash }),
			_ => LogLine::Other,
		};
	}

	if line.contains('\t') {
		let fields = line.split('\t').collect::<Vec<_>>();
		if fields.len() != 3 {
			return LogLine::Other;
		}
		if fields[0] == BINARY_MARKER || fields[1] == BINARY_MARKER {
			return LogLine::Numstat(Numstat::Binary);
		}
		return LogLine::Numstat(Numstat::Text {
			added: fields[0].parse::<u64>().unwrap_or(0),
			removed: fields[1].parse::<u64>().unwrap_or(0),
		});
	}

	LogLine::Other
}

/// Parse a `YYYY-MM-DD` date, as printed by `--date=short`.
pub(crate) fn parse_short_date(value: &str) -> Option<NaiveDate> {
	if !SHORT_DATE_RE.is_match(value) {
		return None;
	}
	NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Folds a branch's log stream into per-author contributions.
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryParser {
	group_by: GroupBy,
}

impl HistoryParser {
	pub fn new(group_by: GroupBy) -> Self {
		HistoryParser { group_by }
	}

	pub fn parse(&self, branch: &str, stream: &str) -> BranchReport {
		let mut report = BranchReport::new(branch);
		self.parse_into(stream, &mut report);
		report
	}

	/// Every header counts a commit for its author, even when its date is unreadable;
	/// such a commit just gets no timeline bucket. Numstat lines are only taken while
	/// inside a commit with a hash.
	pub fn parse_into(&self, stream: &str, report: &mut BranchReport) {
		let mut current: Option<usize> = None;

		for line in stream.lines() {
			match classify(line) {
				LogLine::Header(header) => {
					let slot = report.slot(header.email);
					let contribution = report.at_mut(slot);
					contribution.commit_count += 1;

					match parse_short_date(header.date) {
						Some(date) => *contribution.timeline.entry(self.group_by.bucket(date)).or_default() += 1,
						None => trace!("unparsable date {:?} in commit {:?}", header.date, header.hash),
					}

					current = if header.hash.is_empty() { None } else { Some(slot) };
				}
				LogLine::Numstat(numstat) => {
					let Some(slot) = current else {
						continue;
					};
					match numstat {
						Numstat::Text { added, removed } => report.at_mut(slot).add_lines(added, removed),
						Numstat::Binary => trace!("skipping binary numstat line: {line}"),
					}
				}
				LogLine::Other => {}
			}
		}
	}
}
