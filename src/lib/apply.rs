// SPDX-License-Identifier: Apache-2.0

use crate::{
    config::{ALL_HOSTS_DIR, HOST_MAPPING_FILE},
    install_all, reconcile, resolve, HostCatalog, InterfaceInventory,
    NmcConfig, NmcDiagnostic, NmcError,
};

/// Install the connection profiles matching this machine.
///
/// Profiles shared by all hosts (`<source_dir>/_all`) take precedence and
/// are installed untouched. Otherwise the host is identified from the host
/// mapping file and its profiles are installed under the NIC names found in
/// `inventory`.
pub fn apply(
    config: &NmcConfig,
    inventory: &InterfaceInventory,
) -> Result<Vec<NmcDiagnostic>, NmcError> {
    std::fs::create_dir_all(&config.destination_dir).map_err(|e| {
        NmcError::io("create directory", &config.destination_dir, e)
    })?;

    let all_hosts_dir = config.source_dir.join(ALL_HOSTS_DIR);
    if all_hosts_dir.is_dir() {
        log::info!(
            "Installing profiles shared by all hosts from {}",
            all_hosts_dir.display()
        );
        return install_all(&all_hosts_dir, &config.destination_dir);
    }

    let catalog =
        HostCatalog::load(&config.source_dir.join(HOST_MAPPING_FILE))?;
    log::debug!("Loaded hosts config: {catalog:?}");

    let host = resolve(&catalog, inventory)?;
    log::info!("Identified host: {}", host.name);

    reconcile(
        host,
        inventory,
        &host.source_dir(&config.source_dir),
        &config.destination_dir,
    )
}
