//! Reading a channel's persisted log back from the host

use super::error::{LoggerError, Result};
use super::unwind::CatchUnwind;
use crate::host::{ExtensionContext, Host};
use serde::{Deserialize, Serialize};
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;

/// Outcome of a persisted log read. Never an `Err`: failures are described
/// in `error`, and `file_path` is set once the log file was located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogContents {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
}

impl LogContents {
    pub fn read(contents: String, file_path: PathBuf) -> Self {
        Self {
            success: true,
            contents: Some(contents),
            error: None,
            file_path: Some(file_path),
        }
    }

    pub fn failed(error: &LoggerError) -> Self {
        Self {
            success: false,
            contents: None,
            error: Some(error.to_string()),
            file_path: error.file_path().cloned(),
        }
    }

    pub fn into_result(self) -> std::result::Result<String, String> {
        match (self.success, self.contents, self.error) {
            (true, Some(contents), _) => Ok(contents),
            (_, _, Some(error)) => Err(error),
            _ => Err("log contents unavailable".to_string()),
        }
    }
}

impl From<Result<(String, PathBuf)>> for LogContents {
    fn from(result: Result<(String, PathBuf)>) -> Self {
        match result {
            Ok((contents, path)) => LogContents::read(contents, path),
            Err(e) => LogContents::failed(&e),
        }
    }
}

/// Locate and read `<log_dir>/<channel_name>.log` through the host's file
/// system. Bytes that are not valid UTF-8 are replaced. A panicking host
/// file system is reported as an error, never propagated.
pub(crate) async fn read_channel_log(
    host: &dyn Host,
    context: Option<&ExtensionContext>,
    channel_name: &str,
) -> Result<(String, PathBuf)> {
    let fs = catch_unwind(AssertUnwindSafe(|| host.file_system()))
        .map_err(|payload| LoggerError::host_panic("opening file system", payload.as_ref()))?
        .ok_or(LoggerError::FileSystemUnavailable)?;
    let context = context.ok_or(LoggerError::MissingContext)?;
    let path = context
        .log_file_for(channel_name)
        .ok_or_else(|| LoggerError::MissingLogDirectory {
            extension_id: context.extension_id.clone(),
        })?;

    let stat = match CatchUnwind(fs.stat(&path)).await {
        Ok(Ok(stat)) => stat,
        Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => {
            return Err(LoggerError::LogFileNotFound { path });
        }
        Ok(Err(e)) => return Err(LoggerError::io_operation("inspecting", path, e)),
        Err(payload) => {
            return Err(LoggerError::file_system_panic("inspecting", path, payload.as_ref()));
        }
    };
    if !stat.is_file() {
        return Err(LoggerError::NotAFile { path });
    }

    let bytes = match CatchUnwind(fs.read_file(&path)).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => return Err(LoggerError::io_operation("reading", path, e)),
        Err(payload) => {
            return Err(LoggerError::file_system_panic("reading", path, payload.as_ref()));
        }
    };

    Ok((String::from_utf8_lossy(&bytes).into_owned(), path))
}
