//! Variable overrides from the environment.
//!
//! Spin reads application variable overrides from `SPIN_VARIABLE_<NAME>`
//! entries. This module extracts them from either the process environment
//! or a `.env` file:
//!
//! ```text
//! # Overrides for local runs
//! SPIN_VARIABLE_API_TOKEN=abc123
//! SPIN_VARIABLE_LOG_LEVEL=debug
//! PATH=/usr/bin            (ignored: no prefix)
//! ```
//!
//! produces `{api_token: abc123, log_level: debug}`.
//!
//! Each line is handled by its own scoped thread; results are merged into
//! one map behind a mutex. Keys derived from distinct lines are disjoint,
//! so the result does not depend on scheduling. Lines that differ only in
//! the case of the name collapse to one key and the last writer wins.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;

use crate::error::{BlueprintError, Result};
use crate::variables::ResolvedVariables;

/// Prefix marking an environment entry as a variable override.
pub const VARIABLE_PREFIX: &str = "SPIN_VARIABLE_";

/// Suffix an explicit environment file must carry.
pub const ENV_FILE_SUFFIX: &str = ".env";

/// Where variable overrides are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvSource {
    /// The current process environment
    Process,
    /// A `KEY=VALUE` file ending in `.env`
    File(PathBuf),
}

impl EnvSource {
    /// Pick the file source when a path is given, the process environment otherwise.
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::File(path.to_path_buf()),
            _ => Self::Process,
        }
    }

    /// Collect the candidate `KEY=VALUE` lines of this source.
    ///
    /// File sources skip blank lines and `#` comments; the process
    /// environment has no comment concept.
    ///
    /// # Errors
    ///
    /// Returns `EnvSourceError` if the file name lacks the `.env` suffix
    /// or the file cannot be read.
    pub fn lines(&self) -> Result<Vec<String>> {
        match self {
            Self::Process => Ok(std::env::vars_os()
                .filter_map(|(key, value)| {
                    Some(format!("{}={}", key.to_str()?, value.to_str()?))
                })
                .collect()),
            Self::File(path) => read_env_file(path),
        }
    }
}

fn read_env_file(path: &Path) -> Result<Vec<String>> {
    if !path.to_string_lossy().ends_with(ENV_FILE_SUFFIX) {
        return Err(BlueprintError::EnvSourceError {
            path: path.to_path_buf(),
            message: format!(
                "the path provided appears not to be a \"{}\" file",
                ENV_FILE_SUFFIX
            ),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| BlueprintError::EnvSourceError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Load the variable overrides carried by a source.
///
/// # Example
///
/// ```no_run
/// use blueprint::variables::{load_variables, EnvSource};
///
/// let overrides = load_variables(&EnvSource::Process).unwrap();
/// for (name, value) in &overrides {
///     println!("{} = {}", name, value);
/// }
/// ```
pub fn load_variables(source: &EnvSource) -> Result<ResolvedVariables> {
    let lines = source.lines()?;
    tracing::debug!("Scanning {} environment entries from {:?}", lines.len(), source);
    resolve_lines(lines)
}

/// Extract overrides from `KEY=VALUE` lines, one worker per line.
///
/// Lines without `=` or without the prefix are ignored.
///
/// # Errors
///
/// Returns `Io` if a worker thread cannot be spawned.
pub fn resolve_lines<I>(lines: I) -> Result<ResolvedVariables>
where
    I: IntoIterator<Item = String>,
{
    let resolved = Mutex::new(ResolvedVariables::new());

    thread::scope(|scope| -> Result<()> {
        for line in lines {
            let resolved = &resolved;
            thread::Builder::new().spawn_scoped(scope, move || {
                if let Some((name, value)) = parse_assignment(&line) {
                    let mut map = resolved.lock().unwrap_or_else(|e| e.into_inner());
                    map.insert(name, value);
                }
            })?;
        }
        Ok(())
    })?;

    let resolved = resolved.into_inner().unwrap_or_else(|e| e.into_inner());
    tracing::debug!("Resolved {} variable overrides", resolved.len());
    Ok(resolved)
}

/// Turn one `SPIN_VARIABLE_NAME=value` line into `("name", "value")`.
///
/// The prefix match is case-sensitive; the remaining name is lower-cased.
/// The value is kept verbatim, including any further `=`.
pub fn parse_assignment(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let name = key.strip_prefix(VARIABLE_PREFIX)?;
    if name.is_empty() {
        return None;
    }
    Some((name.to_lowercase(), value.to_string()))
}
