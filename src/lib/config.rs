// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File extension of NetworkManager keyfile connection profiles.
pub const CONNECTION_FILE_EXT: &str = "nmconnection";
/// Host mapping file stored at the root of the generated configuration.
pub const HOST_MAPPING_FILE: &str = "host_config.yaml";
/// Directory holding profiles shared by every host.
pub const ALL_HOSTS_DIR: &str = "_all";
/// State file which, when alone in the config directory, applies to every
/// host.
pub const ALL_HOSTS_FILE: &str = "_all.yaml";

pub const DEFAULT_SOURCE_DIR: &str = "/config";
pub const DEFAULT_DESTINATION_DIR: &str =
    "/etc/NetworkManager/system-connections";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
#[non_exhaustive]
pub struct NmcConfig {
    /// Root of the generated configuration: host mapping file plus one
    /// profile directory per host.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Where the profiles get installed.
    #[serde(default = "default_destination_dir")]
    pub destination_dir: PathBuf,
}

impl Default for NmcConfig {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            destination_dir: default_destination_dir(),
        }
    }
}

impl NmcConfig {
    pub fn new(source_dir: PathBuf, destination_dir: PathBuf) -> Self {
        Self {
            source_dir,
            destination_dir,
        }
    }
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_DIR)
}

fn default_destination_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DESTINATION_DIR)
}
