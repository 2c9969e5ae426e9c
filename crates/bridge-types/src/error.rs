//! Error taxonomy shared by the services and the store adapters.

use std::fmt;

pub type BrResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Key or id absent. Recoverable: drives the provisioning create path.
	NotFound,
	/// Unique-constraint violation. Recoverable: retry the lookup instead.
	Duplicate,
	/// Constraint failure on create/save. Surfaced to the caller, not retried.
	Validation(String),
	/// Invalid service configuration.
	Config(String),
	/// Any other persistence failure.
	DbError,

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::Duplicate => write!(f, "duplicate key"),
			Error::Validation(msg) => write!(f, "validation error: {}", msg),
			Error::Config(msg) => write!(f, "config error: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

// vim: ts=4
