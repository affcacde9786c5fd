// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{ErrorKind, NmcError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
/// Preconfigured machine: the NICs it is expected to have and where its
/// connection profiles are stored.
pub struct Host {
    #[serde(rename = "hostname")]
    pub name: String,
    /// Profile directory relative to the configuration root, defaults to
    /// the host name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<HostInterface>,
}

impl Host {
    pub fn new(name: &str, interfaces: Vec<HostInterface>) -> Self {
        Self {
            name: name.to_string(),
            source_dir: None,
            interfaces,
        }
    }

    pub fn source_dir(&self, root: &Path) -> PathBuf {
        root.join(self.source_dir.as_deref().unwrap_or(self.name.as_str()))
    }

    /// Declared interface whose profile file would be named
    /// `<logical_name>.nmconnection`.
    pub fn interface_by_logical_name(
        &self,
        logical_name: &str,
    ) -> Option<&HostInterface> {
        self.interfaces
            .iter()
            .find(|i| i.logical_name == logical_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[non_exhaustive]
pub struct HostInterface {
    pub logical_name: String,
    pub mac_address: String,
}

impl HostInterface {
    pub fn new(logical_name: &str, mac_address: &str) -> Self {
        Self {
            logical_name: logical_name.to_string(),
            mac_address: normalize_mac(mac_address),
        }
    }
}

pub(crate) fn normalize_mac(mac: &str) -> String {
    mac.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
#[non_exhaustive]
/// Ordered list of preconfigured hosts. The order is significant: host
/// resolution picks the first host with a NIC present on this machine.
pub struct HostCatalog {
    pub hosts: Vec<Host>,
}

impl HostCatalog {
    pub fn new(hosts: Vec<Host>) -> Result<Self, NmcError> {
        let mut catalog = Self { hosts };
        catalog.sanitize()?;
        Ok(catalog)
    }

    pub fn from_yaml(content: &str) -> Result<Self, NmcError> {
        let hosts: Vec<Host> = serde_yaml::from_str(content).map_err(|e| {
            NmcError::new(
                ErrorKind::InvalidArgument,
                format!("Invalid host mapping: {e}"),
            )
        })?;
        Self::new(hosts)
    }

    pub fn load(path: &Path) -> Result<Self, NmcError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| NmcError::io("read host mapping", path, e))?;
        Self::from_yaml(&content).map_err(|e| {
            NmcError::new(e.kind, format!("{}: {}", path.display(), e.msg))
        })
    }

    pub fn to_yaml(&self) -> Result<String, NmcError> {
        serde_yaml::to_string(&self.hosts).map_err(|e| {
            NmcError::new(
                ErrorKind::Bug,
                format!("Failed to serialize host mapping: {e}"),
            )
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Host> {
        self.hosts.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    fn sanitize(&mut self) -> Result<(), NmcError> {
        for host in self.hosts.iter_mut() {
            for iface in host.interfaces.iter_mut() {
                iface.mac_address = normalize_mac(&iface.mac_address);
            }
        }
        let mut names: HashSet<&str> = HashSet::new();
        for host in self.hosts.iter() {
            if !names.insert(host.name.as_str()) {
                return Err(NmcError::new(
                    ErrorKind::InvalidArgument,
                    format!("Host {} is defined more than once", host.name),
                ));
            }
            let mut macs: HashSet<&str> = HashSet::new();
            for iface in host.interfaces.iter() {
                if !macs.insert(iface.mac_address.as_str()) {
                    return Err(NmcError::new(
                        ErrorKind::InvalidArgument,
                        format!(
                            "Host {} has MAC address {} declared more than \
                             once",
                            host.name, iface.mac_address
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a HostCatalog {
    type Item = &'a Host;
    type IntoIter = std::slice::Iter<'a, Host>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}
