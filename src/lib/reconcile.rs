// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::{
    config::CONNECTION_FILE_EXT, ErrorKind, Host, InterfaceInventory,
    NmKeyFile, NmcDiagnostic, NmcDiagnosticKind, NmcError,
};

/// Install the connection profiles of `host` from `source_dir` into
/// `destination_dir`.
///
/// When the NIC of a declared interface got a different name from the
/// kernel, every value in the profile equal to the logical name is changed
/// to the live name and the profile is stored as `<live name>.nmconnection`.
/// Other profiles are installed untouched.
///
/// When two profiles end up with the same destination file, the first one
/// in file name order is installed and the other is reported.
///
/// Stops at the first failure without removing the files already
/// installed.
pub fn reconcile(
    host: &Host,
    inventory: &InterfaceInventory,
    source_dir: &Path,
    destination_dir: &Path,
) -> Result<Vec<NmcDiagnostic>, NmcError> {
    install_profiles(Some((host, inventory)), source_dir, destination_dir)
}

/// Install every profile of `source_dir` untouched.
pub fn install_all(
    source_dir: &Path,
    destination_dir: &Path,
) -> Result<Vec<NmcDiagnostic>, NmcError> {
    install_profiles(None, source_dir, destination_dir)
}

fn install_profiles(
    rename_ctx: Option<(&Host, &InterfaceInventory)>,
    source_dir: &Path,
    destination_dir: &Path,
) -> Result<Vec<NmcDiagnostic>, NmcError> {
    let mut diagnostics = Vec::new();
    let mut installed: HashSet<PathBuf> = HashSet::new();

    for path in sorted_dir_entries(source_dir)? {
        let metadata = std::fs::metadata(&path)
            .map_err(|e| NmcError::io("query metadata of", &path, e))?;
        if metadata.is_dir() {
            diagnostics.push(NmcDiagnostic::warn(
                NmcDiagnosticKind::UnexpectedDirectory,
                &path,
                "Ignoring unexpected directory".to_string(),
            ));
            continue;
        }
        if path.extension().and_then(OsStr::to_str)
            != Some(CONNECTION_FILE_EXT)
        {
            diagnostics.push(NmcDiagnostic::warn(
                NmcDiagnosticKind::UnexpectedFile,
                &path,
                "Ignoring unexpected file".to_string(),
            ));
            continue;
        }

        let mut keyfile = NmKeyFile::load(&path)?;

        let stem =
            path.file_stem().and_then(OsStr::to_str).ok_or_else(|| {
                NmcError::new(
                    ErrorKind::InvalidProfile,
                    format!("Invalid profile file name {}", path.display()),
                )
            })?;
        let mut dst_name = stem.to_string();

        if let Some((host, inventory)) = rename_ctx {
            match host.interface_by_logical_name(stem) {
                Some(iface) => {
                    if let Some(live_name) = inventory
                        .get(&iface.mac_address)
                        .filter(|n| *n != iface.logical_name)
                    {
                        log::info!(
                            "Using name '{live_name}' for interface with MAC \
                             address '{}' instead of the preconfigured '{}'",
                            iface.mac_address,
                            iface.logical_name
                        );
                        let count = keyfile
                            .replace_value(&iface.logical_name, live_name);
                        log::debug!(
                            "Changed {count} references of {} in {}",
                            iface.logical_name,
                            path.display()
                        );
                        dst_name = live_name.to_string();
                    }
                }
                None => {
                    diagnostics.push(NmcDiagnostic::warn(
                        NmcDiagnosticKind::UnmatchedProfile,
                        &path,
                        format!(
                            "No interface named {stem} declared for host {}, \
                             installing profile as is",
                            host.name
                        ),
                    ));
                }
            }
        }

        let destination = destination_dir
            .join(format!("{dst_name}.{CONNECTION_FILE_EXT}"));
        if installed.contains(&destination) {
            diagnostics.push(NmcDiagnostic::warn(
                NmcDiagnosticKind::DuplicateDestination,
                &path,
                format!(
                    "{} already installed from another profile, skipping",
                    destination.display()
                ),
            ));
            continue;
        }
        log::info!(
            "Installing {} as {}",
            path.display(),
            destination.display()
        );
        keyfile.save(&destination)?;
        installed.insert(destination);
    }

    Ok(diagnostics)
}

pub(crate) fn sorted_dir_entries(
    dir: &Path,
) -> Result<Vec<PathBuf>, NmcError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .map_err(|e| NmcError::io("read directory", dir, e))?
    {
        let entry =
            entry.map_err(|e| NmcError::io("read directory", dir, e))?;
        paths.push(entry.path());
    }
    paths.sort();
    Ok(paths)
}
