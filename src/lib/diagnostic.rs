// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum NmcDiagnosticKind {
    /// Directory found where only files are expected
    UnexpectedDirectory,
    /// File without the expected extension
    UnexpectedFile,
    /// Profile not named after any declared interface, installed as is
    UnmatchedProfile,
    /// Destination already written by another profile of the same run,
    /// not installed
    DuplicateDestination,
}

/// Non-fatal condition noticed during a run. The entry has been skipped or
/// handled without renaming and the run continued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NmcDiagnostic {
    pub kind: NmcDiagnosticKind,
    pub path: PathBuf,
    pub msg: String,
}

impl NmcDiagnostic {
    /// Create the diagnostic and emit it as warning log.
    pub(crate) fn warn(
        kind: NmcDiagnosticKind,
        path: &Path,
        msg: String,
    ) -> Self {
        log::warn!("{msg}: {}", path.display());
        Self {
            kind,
            path: path.to_path_buf(),
            msg,
        }
    }
}

impl std::fmt::Display for NmcDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.msg, self.path.display())
    }
}
