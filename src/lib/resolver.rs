// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, Host, HostCatalog, InterfaceInventory, NmcError};

/// Identify the preconfigured host by matching the MAC address of at least
/// one of the local network interfaces.
///
/// Hosts are checked in catalog order and interfaces in declaration order.
/// The first hit wins, there is no scoring between hosts matching several
/// NICs: catalog authors control the tie-break by ordering.
pub fn resolve<'a>(
    catalog: &'a HostCatalog,
    inventory: &InterfaceInventory,
) -> Result<&'a Host, NmcError> {
    for host in catalog {
        for iface in host.interfaces.iter() {
            if let Some(live_name) = inventory.get(&iface.mac_address) {
                log::debug!(
                    "Host {} matched by MAC address {} of {live_name}",
                    host.name,
                    iface.mac_address
                );
                return Ok(host);
            }
        }
    }
    Err(NmcError::new(
        ErrorKind::NoMatchingHost,
        "None of the preconfigured hosts match local NICs".to_string(),
    ))
}
