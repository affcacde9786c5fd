// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use nm_configurator::{
    config::{DEFAULT_DESTINATION_DIR, DEFAULT_SOURCE_DIR},
    InterfaceInventory, NmcConfig,
};

use super::CliError;

pub(crate) struct CommandApply;

impl CommandApply {
    pub(crate) const CMD: &str = "apply";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("apply")
            .alias("a")
            .about("Install the connection profiles matching this machine")
            .arg(
                clap::Arg::new("SOURCE_DIR")
                    .long("source-dir")
                    .short('s')
                    .default_value(DEFAULT_SOURCE_DIR)
                    .help("Directory holding host mapping and host profiles"),
            )
            .arg(
                clap::Arg::new("DESTINATION_DIR")
                    .long("destination-dir")
                    .short('d')
                    .default_value(DEFAULT_DESTINATION_DIR)
                    .help("NetworkManager connection profile directory"),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let source_dir = matches
            .get_one::<String>("SOURCE_DIR")
            .ok_or(CliError::from("Undefined source directory"))?;
        let destination_dir = matches
            .get_one::<String>("DESTINATION_DIR")
            .ok_or(CliError::from("Undefined destination directory"))?;
        let config = NmcConfig::new(
            PathBuf::from(source_dir),
            PathBuf::from(destination_dir),
        );

        let inventory = InterfaceInventory::retrieve()?;
        let diagnostics = nm_configurator::apply(&config, &inventory)?;
        if !diagnostics.is_empty() {
            log::info!(
                "Profiles installed with {} entries ignored",
                diagnostics.len()
            );
        }
        Ok(())
    }
}
