// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ErrorKind {
    /// Please report this as bug to upstream
    Bug,
    /// None of the preconfigured hosts has a NIC present on this machine
    NoMatchingHost,
    /// Reading, writing or changing permission of a file failed
    IoFailure,
    /// Invalid argument
    InvalidArgument,
    /// Malformed NetworkManager connection profile
    InvalidProfile,
    /// Output of the network state compiler is not in expected shape
    InvalidCompiledResult,
    /// Declarative network state is not usable for host mapping
    InvalidNetState,
    /// Network state compiler failed
    CompilerFailure,
    /// Querying the network interfaces of running kernel failed
    NicQueryFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::NoMatchingHost => "no-matching-host",
            Self::IoFailure => "io-failure",
            Self::InvalidArgument => "invalid-argument",
            Self::InvalidProfile => "invalid-profile",
            Self::InvalidCompiledResult => "invalid-compiled-result",
            Self::InvalidNetState => "invalid-net-state",
            Self::CompilerFailure => "compiler-failure",
            Self::NicQueryFailure => "nic-query-failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Try not implement From for NmcError here unless you are sure this
// error should always convert to certain type of ErrorKind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct NmcError {
    pub kind: ErrorKind,
    pub msg: String,
}

impl std::fmt::Display for NmcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl NmcError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }

    /// I/O failure carrying the failed operation and the path involved.
    pub(crate) fn io(action: &str, path: &Path, e: std::io::Error) -> Self {
        Self::new(
            ErrorKind::IoFailure,
            format!("Failed to {action} {}: {e}", path.display()),
        )
    }
}

impl std::error::Error for NmcError {}
