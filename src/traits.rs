use crate::{LogRange, Result};

/// The version-control queries the aggregation engine depends on.
///
/// [`crate::Repo`] answers them by running `git`; tests substitute canned output.
pub trait GitQuery {
	/// Local branch short-names, in the order git lists them.
	///
	/// Entries are trimmed and blank ones dropped.
	fn list_branches(&self) -> Result<Vec<String>>;

	/// Best common ancestor of `a` and `b`.
	fn merge_base(&self, a: &str, b: &str) -> Result<String>;

	/// Raw `git log` output for `range`: a header line `email,date,hash` per commit,
	/// each followed by its numstat lines.
	///
	/// # Examples:
	/// ```text
	/// a@x.com,2024-01-10,0d1f3c
	/// 3	1	src/main.rs
	/// -	-	logo.png
	/// ```
	fn log(&self, range: &LogRange, path_filter: Option<&str>) -> Result<String>;
}
