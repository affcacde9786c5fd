// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;

use crate::{host::normalize_mac, ErrorKind, NmcError};

const NULL_MAC: &str = "00:00:00:00:00:00";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// MAC address to the interface name currently assigned by the kernel.
/// MAC addresses are case insensitive.
pub struct InterfaceInventory {
    mac_to_name: HashMap<String, String>,
}

impl InterfaceInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query the running kernel for NICs holding a MAC address.
    pub fn retrieve() -> Result<Self, NmcError> {
        let mut filter = nispor::NetStateFilter::minimum();
        filter.iface = Some(nispor::NetStateIfaceFilter::minimum());
        let np_state =
            nispor::NetState::retrieve_with_filter(&filter).map_err(|e| {
                nic_query_error(&e.kind.to_string(), &e.msg)
            })?;

        let mut ret = Self::new();
        for np_iface in np_state.ifaces.values() {
            if np_iface.mac_address.is_empty()
                || np_iface.mac_address == NULL_MAC
            {
                continue;
            }
            if let Some(existing) = ret.get(&np_iface.mac_address) {
                // VLAN, bond and bridge share the MAC of their port,
                // prefer the ethernet NIC
                if np_iface.iface_type != nispor::IfaceType::Ethernet {
                    log::debug!(
                        "Ignoring {} sharing MAC address {} with {existing}",
                        np_iface.name,
                        np_iface.mac_address
                    );
                    continue;
                }
            }
            ret.insert(&np_iface.mac_address, &np_iface.name);
        }
        log::debug!("Retrieved network interfaces: {ret:?}");
        Ok(ret)
    }

    pub fn insert(&mut self, mac_address: &str, name: &str) {
        self.mac_to_name
            .insert(normalize_mac(mac_address), name.to_string());
    }

    /// Live interface name of the NIC holding specified MAC address.
    pub fn get(&self, mac_address: &str) -> Option<&str> {
        self.mac_to_name
            .get(&normalize_mac(mac_address))
            .map(String::as_str)
    }

    pub fn contains(&self, mac_address: &str) -> bool {
        self.get(mac_address).is_some()
    }

    pub fn len(&self) -> usize {
        self.mac_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mac_to_name.is_empty()
    }
}

impl<M, N> FromIterator<(M, N)> for InterfaceInventory
where
    M: AsRef<str>,
    N: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (M, N)>>(iter: I) -> Self {
        let mut ret = Self::new();
        for (mac, name) in iter {
            ret.insert(mac.as_ref(), name.as_ref());
        }
        ret
    }
}

pub(crate) fn nic_query_error(kind: &str, msg: &str) -> NmcError {
    NmcError::new(
        ErrorKind::NicQueryFailure,
        format!("Failed to retrieve network interfaces: {kind}: {msg}"),
    )
}
