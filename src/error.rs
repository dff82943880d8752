use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	#[error("git is not installed or not found in PATH")]
	GitNotFound(#[from] which::Error),
	#[error("repository path does not exist: {0:?}")]
	RepositoryNotFound(PathBuf),
	#[error("repository path is not a directory: {0:?}")]
	NotADirectory(PathBuf),
	#[error("command `{command}` failed: {message}")]
	Command { command: String, message: String },
	#[error("invalid arguments: {0}")]
	InvalidArgs(String),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("serialization error: {0}")]
	Json(#[from] serde_json::Error),
}
