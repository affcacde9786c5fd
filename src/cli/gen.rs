// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use nm_configurator::NmstateCompiler;

use super::CliError;

const DEFAULT_OUTPUT_DIR: &str = "_out";

pub(crate) struct CommandGen;

impl CommandGen {
    pub(crate) const CMD: &str = "gen";

    pub(crate) fn new_cmd() -> clap::Command {
        clap::Command::new("gen")
            .alias("g")
            .about("Generate connection profiles from network states")
            .arg_required_else_help(true)
            .subcommand(
                clap::Command::new("all")
                    .alias("a")
                    .about(
                        "Generate profiles and host mapping for every \
                         network state file in a directory",
                    )
                    .arg(
                        clap::Arg::new("CONFIG_DIR")
                            .required(true)
                            .index(1)
                            .help("Directory of per-host network states"),
                    )
                    .arg(output_dir_arg()),
            )
            .subcommand(
                clap::Command::new("host")
                    .alias("h")
                    .about("Generate profiles of a single host")
                    .arg(
                        clap::Arg::new("HOSTNAME")
                            .required(true)
                            .index(1)
                            .help("Host name, used as output directory"),
                    )
                    .arg(
                        clap::Arg::new("STATE_FILE")
                            .required(true)
                            .index(2)
                            .help("Network state file"),
                    )
                    .arg(output_dir_arg()),
            )
    }

    pub(crate) fn handle(matches: &clap::ArgMatches) -> Result<(), CliError> {
        let compiler = NmstateCompiler::new();
        if let Some(matches) = matches.subcommand_matches("all") {
            let config_dir = get_arg(matches, "CONFIG_DIR")?;
            let output_dir = get_arg(matches, "OUTPUT_DIR")?;
            nm_configurator::generate_all(
                &compiler,
                Path::new(config_dir),
                Path::new(output_dir),
            )?;
            Ok(())
        } else if let Some(matches) = matches.subcommand_matches("host") {
            nm_configurator::generate(
                &compiler,
                get_arg(matches, "HOSTNAME")?,
                Path::new(get_arg(matches, "STATE_FILE")?),
                Path::new(get_arg(matches, "OUTPUT_DIR")?),
            )?;
            Ok(())
        } else {
            Err("Invalid sub-command for nmc gen".into())
        }
    }
}

fn output_dir_arg() -> clap::Arg {
    clap::Arg::new("OUTPUT_DIR")
        .long("output-dir")
        .short('o')
        .default_value(DEFAULT_OUTPUT_DIR)
        .help("Directory to store generated profiles")
}

fn get_arg<'a>(
    matches: &'a clap::ArgMatches,
    name: &str,
) -> Result<&'a str, CliError> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| CliError::from(format!("Undefined {name}")))
}
