//! Error types for cargo-ws-audit with contextual messages and exit codes
//!
//! Every failure aborts the audit. A manifest that is missing and a manifest
//! that is malformed both surface as the same kind of fatal error; the
//! variants only exist so the message and help text can be specific.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cargo-ws-audit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (manifests, config)
  User = 1,
  /// System error (I/O outside the manifest set)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cargo-ws-audit
#[derive(Debug)]
pub enum AuditError {
  /// A manifest could not be read or understood
  Manifest(ManifestError),

  /// Configuration errors
  Config(ConfigError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl AuditError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    AuditError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    AuditError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      AuditError::Message { message, context, help } => AuditError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      AuditError::Manifest(_) => ExitCode::User,
      AuditError::Config(_) => ExitCode::User,
      AuditError::Io(_) => ExitCode::System,
      AuditError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      AuditError::Manifest(e) => e.help_message(),
      AuditError::Config(e) => e.help_message(),
      AuditError::Message { help, .. } => help.clone(),
      AuditError::Io(_) => None,
    }
  }
}

impl fmt::Display for AuditError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AuditError::Manifest(e) => write!(f, "{}", e),
      AuditError::Config(e) => write!(f, "{}", e),
      AuditError::Io(e) => write!(f, "I/O error: {}", e),
      AuditError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for AuditError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      AuditError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for AuditError {
  fn from(err: io::Error) -> Self {
    AuditError::Io(err)
  }
}

impl From<ManifestError> for AuditError {
  fn from(err: ManifestError) -> Self {
    AuditError::Manifest(err)
  }
}

impl From<ConfigError> for AuditError {
  fn from(err: ConfigError) -> Self {
    AuditError::Config(err)
  }
}

impl From<glob::PatternError> for AuditError {
  fn from(err: glob::PatternError) -> Self {
    AuditError::with_help(
      format!("Invalid glob pattern: {}", err),
      "Fix the pattern in `workspace.members` of the root Cargo.toml.",
    )
  }
}

impl From<String> for AuditError {
  fn from(msg: String) -> Self {
    AuditError::message(msg)
  }
}

impl From<&str> for AuditError {
  fn from(msg: &str) -> Self {
    AuditError::message(msg)
  }
}

/// Manifest errors: the single fatal condition of an audit run
#[derive(Debug)]
pub enum ManifestError {
  /// The manifest file does not exist
  NotFound { path: PathBuf },

  /// The file exists but could not be read (permissions, not UTF-8, ...)
  Unreadable { path: PathBuf, reason: String },

  /// The file is not valid TOML
  Malformed { path: PathBuf, reason: String },

  /// A table the audit requires is absent
  MissingTable { path: PathBuf, table: String },
}

impl ManifestError {
  /// A directory walked while expanding a `workspace.members` glob could not be read
  pub fn from_glob(err: &glob::GlobError) -> Self {
    ManifestError::from_io(err.path(), err.error())
  }

  /// Classify a read failure for `path`
  pub fn from_io(path: impl Into<PathBuf>, err: &io::Error) -> Self {
    let path = path.into();
    if err.kind() == io::ErrorKind::NotFound {
      ManifestError::NotFound { path }
    } else {
      ManifestError::Unreadable {
        path,
        reason: err.to_string(),
      }
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      ManifestError::NotFound { .. } => Some(
        "Check the `members` list in ws-audit.toml or `workspace.members` in the root Cargo.toml.".to_string(),
      ),
      ManifestError::MissingTable { table, .. } if table == "workspace.dependencies" => {
        Some("Declare shared versions under [workspace.dependencies] in the root Cargo.toml.".to_string())
      }
      ManifestError::MissingTable { table, .. } => {
        Some(format!("Add an (empty) [{}] table to the manifest.", table))
      }
      _ => None,
    }
  }
}

impl fmt::Display for ManifestError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ManifestError::NotFound { path } => write!(f, "Manifest not found: {}", path.display()),
      ManifestError::Unreadable { path, reason } => {
        write!(f, "Failed to read manifest {}: {}", path.display(), reason)
      }
      ManifestError::Malformed { path, reason } => {
        write!(f, "Failed to parse manifest {}:\n{}", path.display(), reason)
      }
      ManifestError::MissingTable { path, table } => {
        write!(f, "Manifest {} has no [{}] table", path.display(), table)
      }
    }
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// ws-audit.toml exists but cannot be read or deserialized
  Malformed { path: PathBuf, reason: String },

  /// A field holds an unusable value
  Invalid { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::Malformed { .. } => {
        Some("Known keys are `members`, `target-prefix` and `include-root-package`.".to_string())
      }
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::Malformed { path, reason } => {
        write!(f, "Invalid configuration in {}:\n{}", path.display(), reason)
      }
      ConfigError::Invalid { field, reason } => write!(f, "Invalid value for `{}`: {}", field, reason),
    }
  }
}

/// Result type alias for cargo-ws-audit
pub type AuditResult<T> = Result<T, AuditError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> AuditResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> AuditResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<AuditError>,
{
  fn context(self, ctx: impl Into<String>) -> AuditResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> AuditResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Print an error to stderr with its help text
pub fn print_error(error: &AuditError) {
  eprintln!("\nerror: {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("help: {}\n", help);
  }
}
