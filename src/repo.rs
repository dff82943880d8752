use std::ffi::{OsStr, OsString};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::Output;

use simple_cmd::CommandBuilder;
use tracing::debug;

use crate::{Error, GitQuery, LogRange, Repo, Result};

const LOG_FORMAT: &str = "--pretty=format:%ae,%ad,%H";

/// Locate the `git` executable on PATH.
pub fn git_executable() -> Result<PathBuf> {
	Ok(which::which("git")?)
}

impl Repo {
	pub fn new<S: AsRef<OsStr> + ?Sized>(s: &S) -> Self {
		Repo { inner: PathBuf::from(s) }
	}

	/// Like [`Repo::new`], but fails unless the path is a readable directory.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		if !path.exists() {
			return Err(Error::RepositoryNotFound(path.to_path_buf()));
		}
		if !path.is_dir() {
			return Err(Error::NotADirectory(path.to_path_buf()));
		}
		std::fs::read_dir(path)?;
		Ok(Repo::new(path))
	}

	pub fn to_str(&self) -> Option<&str> {
		self.inner.to_str()
	}

	/// Display name of the repository: the last component of its canonical path.
	pub fn name(&self) -> String {
		let path = self.inner.canonicalize().unwrap_or_else(|_| self.inner.clone());
		path.file_name()
			.map(|name| name.to_string_lossy().to_string())
			.unwrap_or_else(|| path.to_string_lossy().to_string())
	}

	fn git(&self) -> CommandBuilder {
		CommandBuilder::new("git").current_dir(&self.inner).with_debug(true)
	}

	fn run(&self, args: Vec<OsString>) -> Result<String> {
		let command = format!("git {}", args.iter().map(|a| a.to_string_lossy()).collect::<Vec<_>>().join(" "));
		debug!("running {command} in {}", self);

		let output = self
			.git()
			.with_args(args)
			.build()
			.output()
			.map_err(|err| Error::Command {
				command: command.clone(),
				message: err.to_string(),
			})?;
		check_status(command, output)
	}
}

fn check_status(command: String, output: Output) -> Result<String> {
	if !output.status.success() {
		return Err(Error::Command {
			command,
			message: format!("{}: {}", output.status, String::from_utf8_lossy(&output.stderr).trim()),
		});
	}
	Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl GitQuery for Repo {
	fn list_branches(&self) -> Result<Vec<String>> {
		let output = self.run(vec!["branch".into(), "--format=%(refname:short)".into()])?;
		Ok(parse_branch_list(&output))
	}

	fn merge_base(&self, a: &str, b: &str) -> Result<String> {
		let command = vec!["merge-base".into(), a.into(), b.into()];
		let output = self.run(command)?;
		let hash = output.trim();
		if hash.is_empty() {
			return Err(Error::Command {
				command: format!("git merge-base {a} {b}"),
				message: "no common ancestor".to_string(),
			});
		}
		Ok(hash.to_string())
	}

	fn log(&self, range: &LogRange, path_filter: Option<&str>) -> Result<String> {
		let mut args: Vec<OsString> = vec![
			"log".into(),
			LOG_FORMAT.into(),
			"--date=short".into(),
			"--numstat".into(),
			range.to_string().into(),
		];
		if let Some(filter) = path_filter {
			args.push("--".into());
			args.push(filter.into());
		}
		self.run(args)
	}
}

/// Trimmed, non-blank branch names, without detached HEAD pseudo entries such as
/// `(HEAD detached at ..)` or `(no branch, rebasing ..)`.
pub(crate) fn parse_branch_list(output: &str) -> Vec<String> {
	output
		.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.filter(|line| *line != "HEAD" && !line.starts_with('(') && !line.contains("HEAD ->"))
		.map(str::to_string)
		.collect()
}

impl<'a, T: ?Sized + AsRef<OsStr>> From<&'a T> for Repo {
	fn from(s: &'a T) -> Self {
		Repo::new(s)
	}
}

impl Display for Repo {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.inner)
	}
}
