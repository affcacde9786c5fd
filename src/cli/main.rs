// SPDX-License-Identifier: Apache-2.0

mod apply;
mod error;
mod gen;

pub(crate) use self::error::CliError;
use self::{apply::CommandApply, gen::CommandGen};

fn main() -> Result<(), CliError> {
    let mut cli_cmd = clap::Command::new("nmc")
        .about("NetworkManager profile generator and installer")
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            clap::Arg::new("quiet")
                .short('q')
                .action(clap::ArgAction::SetTrue)
                .help("Disable logging")
                .global(true),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .action(clap::ArgAction::Count)
                .help("Increase verbose level")
                .global(true),
        )
        .subcommand(CommandApply::new_cmd())
        .subcommand(CommandGen::new_cmd());

    let matches = cli_cmd.get_matches_mut();

    let (log_groups, log_level) = match matches.get_count("verbose") {
        0 => (vec!["nm_configurator", "nmc"], log::LevelFilter::Info),
        1 => (vec!["nm_configurator", "nmc"], log::LevelFilter::Debug),
        2 => (vec!["nm_configurator", "nmc"], log::LevelFilter::Trace),
        _ => (vec![], log::LevelFilter::Trace),
    };

    if !matches.get_flag("quiet") {
        let mut log_builder = env_logger::Builder::new();
        if log_groups.is_empty() {
            log_builder.filter(None, log_level);
        } else {
            for log_group in log_groups {
                log_builder.filter(Some(log_group), log_level);
            }
        }
        log_builder.init();
    }

    log::debug!("nmc version: {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = call_subcommand(&matches) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    Ok(())
}

fn call_subcommand(matches: &clap::ArgMatches) -> Result<(), CliError> {
    if let Some(matches) = matches.subcommand_matches(CommandApply::CMD) {
        CommandApply::handle(matches)
    } else if let Some(matches) = matches.subcommand_matches(CommandGen::CMD)
    {
        CommandGen::handle(matches)
    } else {
        Err(CliError::from("Unknown command"))
    }
}
