// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;

use serde::Deserialize;

use crate::{
    config::{ALL_HOSTS_DIR, ALL_HOSTS_FILE, HOST_MAPPING_FILE},
    host::normalize_mac,
    keyfile::write_private_file,
    reconcile::sorted_dir_entries,
    ErrorKind, Host, HostCatalog, HostInterface, NetStateCompiler,
    NmcDiagnostic, NmcDiagnosticKind, NmcError,
};

/// Generated profiles: `Vec<(file_name, content)>`
pub type NetworkConfig = Vec<(String, String)>;

const IFACE_TYPE_ETHERNET: &str = "ethernet";
const IFACE_TYPE_LOOPBACK: &str = "loopback";

#[derive(Debug, Deserialize)]
struct CompiledNetConf {
    #[serde(rename = "NetworkManager")]
    network_manager: Vec<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct StateInterfaces {
    #[serde(default)]
    interfaces: Vec<StateInterface>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct StateInterface {
    pub(crate) name: String,
    #[serde(rename = "type", default)]
    pub(crate) iface_type: Option<String>,
    #[serde(default)]
    pub(crate) mac_address: Option<String>,
}

/// Generate the NetworkManager profiles of `host_name` from the network
/// state stored in `state_file` into the new directory
/// `<output_dir>/<host_name>`.
///
/// The output directory must not exist yet. Profiles are only written once
/// the whole compiler output has been validated.
pub fn generate<C: NetStateCompiler + ?Sized>(
    compiler: &C,
    host_name: &str,
    state_file: &Path,
    output_dir: &Path,
) -> Result<(), NmcError> {
    validate_file_name(host_name).map_err(|reason| {
        NmcError::new(
            ErrorKind::InvalidArgument,
            format!("Invalid host name '{host_name}': {reason}"),
        )
    })?;
    log::info!(
        "Generating config of host {host_name} from {}",
        state_file.display()
    );
    let content = std::fs::read_to_string(state_file)
        .map_err(|e| NmcError::io("read network state", state_file, e))?;
    let config = compile_state(compiler, &content)?;
    store_network_config(output_dir, host_name, &config)
}

/// Generate profiles for every network state file in `config_dir` and the
/// host mapping file used by [crate::apply()].
///
/// A config directory holding only `_all.yaml` produces profiles shared by
/// every host under `<output_dir>/_all` and no host mapping.
pub fn generate_all<C: NetStateCompiler + ?Sized>(
    compiler: &C,
    config_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<NmcDiagnostic>, NmcError> {
    let entries = sorted_dir_entries(config_dir)?;
    if entries.is_empty() {
        return Err(NmcError::new(
            ErrorKind::InvalidArgument,
            "Empty config directory".to_string(),
        ));
    }

    if entries.len() == 1
        && entries[0].file_name() == Some(OsStr::new(ALL_HOSTS_FILE))
        && entries[0].is_file()
    {
        let path = &entries[0];
        log::info!(
            "Generating config shared by all hosts from {}",
            path.display()
        );
        let content = std::fs::read_to_string(path)
            .map_err(|e| NmcError::io("read network state", path, e))?;
        let config = compile_state(compiler, &content)?;
        store_network_config(output_dir, ALL_HOSTS_DIR, &config)?;
        return Ok(Vec::new());
    }

    let mut diagnostics = Vec::new();
    let mut hosts = Vec::new();
    for path in entries {
        if path.is_dir() {
            diagnostics.push(NmcDiagnostic::warn(
                NmcDiagnosticKind::UnexpectedDirectory,
                &path,
                "Ignoring unexpected directory".to_string(),
            ));
            continue;
        }
        let host_name = extract_hostname(&path)
            .and_then(OsStr::to_str)
            .ok_or_else(|| {
                NmcError::new(
                    ErrorKind::InvalidArgument,
                    format!("Invalid file path {}", path.display()),
                )
            })?
            .to_string();

        log::info!("Generating config from {}", path.display());
        let content = std::fs::read_to_string(&path)
            .map_err(|e| NmcError::io("read network state", &path, e))?;

        let interfaces = extract_interfaces(&content).and_then(|ifaces| {
            validate_interfaces(&ifaces)?;
            Ok(ifaces)
        });
        let interfaces = interfaces.map_err(|e| {
            NmcError::new(e.kind, format!("{}: {}", path.display(), e.msg))
        })?;

        let config = compile_state(compiler, &content)?;
        store_network_config(output_dir, &host_name, &config)?;
        hosts.push(Host::new(&host_name, host_interfaces(&interfaces)));
    }

    let catalog = HostCatalog::new(hosts)?;
    let mapping_path = output_dir.join(HOST_MAPPING_FILE);
    std::fs::write(&mapping_path, catalog.to_yaml()?)
        .map_err(|e| NmcError::io("write host mapping", &mapping_path, e))?;
    log::info!("Host mapping stored to {}", mapping_path.display());

    Ok(diagnostics)
}

/// Parse the output of [NetStateCompiler::compile].
pub fn parse_compiled_conf(content: &str) -> Result<NetworkConfig, NmcError> {
    let conf: CompiledNetConf = serde_yaml::from_str(content).map_err(|e| {
        NmcError::new(
            ErrorKind::InvalidCompiledResult,
            format!("Invalid NetworkManager configuration: {e}"),
        )
    })?;

    let mut ret = Vec::new();
    for entry in conf.network_manager {
        let (file_name, content) = match <[String; 2]>::try_from(entry) {
            Ok([file_name, content]) => (file_name, content),
            Err(entry) => {
                return Err(NmcError::new(
                    ErrorKind::InvalidCompiledResult,
                    format!(
                        "Invalid NetworkManager configuration: expecting \
                         [file_name, content] pair, got {} elements",
                        entry.len()
                    ),
                ));
            }
        };
        validate_file_name(&file_name).map_err(|reason| {
            NmcError::new(
                ErrorKind::InvalidCompiledResult,
                format!(
                    "Invalid NetworkManager configuration file name \
                     '{file_name}': {reason}"
                ),
            )
        })?;
        ret.push((file_name, content));
    }
    Ok(ret)
}

fn compile_state<C: NetStateCompiler + ?Sized>(
    compiler: &C,
    content: &str,
) -> Result<NetworkConfig, NmcError> {
    let compiled = compiler.compile(content)?;
    log::trace!("Compiled network state: {compiled}");
    parse_compiled_conf(&compiled)
}

fn store_network_config(
    output_dir: &Path,
    host_name: &str,
    config: &[(String, String)],
) -> Result<(), NmcError> {
    std::fs::create_dir_all(output_dir)
        .map_err(|e| NmcError::io("create directory", output_dir, e))?;
    let host_dir = output_dir.join(host_name);
    std::fs::create_dir(&host_dir)
        .map_err(|e| NmcError::io("create directory", &host_dir, e))?;

    for (file_name, content) in config {
        let path = host_dir.join(file_name);
        log::debug!("Storing {}", path.display());
        write_private_file(&path, content.as_bytes())?;
    }
    Ok(())
}

fn validate_file_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        Err("empty name")
    } else if name == "." || name == ".." {
        Err("reserved name")
    } else if name.contains('/') || name.contains('\0') {
        Err("contains path separator or NUL")
    } else {
        Ok(())
    }
}

pub(crate) fn extract_hostname(path: &Path) -> Option<&OsStr> {
    if path
        .extension()
        .is_some_and(|ext| ext == "yml" || ext == "yaml")
    {
        path.file_stem()
    } else {
        path.file_name()
    }
}

/// Non-loopback interfaces declared in a network state document.
pub(crate) fn extract_interfaces(
    content: &str,
) -> Result<Vec<StateInterface>, NmcError> {
    let state: StateInterfaces = serde_yaml::from_str(content).map_err(|e| {
        NmcError::new(
            ErrorKind::InvalidNetState,
            format!("Invalid network state: {e}"),
        )
    })?;
    Ok(state
        .interfaces
        .into_iter()
        .filter(|i| i.iface_type.as_deref() != Some(IFACE_TYPE_LOOPBACK))
        .collect())
}

pub(crate) fn validate_interfaces(
    interfaces: &[StateInterface],
) -> Result<(), NmcError> {
    let ethernet_ifaces: Vec<&StateInterface> = interfaces
        .iter()
        .filter(|i| i.iface_type.as_deref() == Some(IFACE_TYPE_ETHERNET))
        .collect();

    if ethernet_ifaces.is_empty() {
        return Err(NmcError::new(
            ErrorKind::InvalidNetState,
            "No Ethernet interfaces were provided".to_string(),
        ));
    }

    let no_mac_ifaces: Vec<&str> = ethernet_ifaces
        .iter()
        .filter(|i| i.mac_address.is_none())
        .map(|i| i.name.as_str())
        .collect();
    if !no_mac_ifaces.is_empty() {
        return Err(NmcError::new(
            ErrorKind::InvalidNetState,
            format!(
                "Detected Ethernet interfaces without a MAC address: {}",
                no_mac_ifaces.join(", ")
            ),
        ));
    }
    Ok(())
}

// Controllers and VLANs may reuse the MAC address of their port, only the
// first interface declaring a MAC address is kept.
fn host_interfaces(interfaces: &[StateInterface]) -> Vec<HostInterface> {
    let mut macs: HashSet<String> = HashSet::new();
    let mut ret = Vec::new();
    for iface in interfaces {
        if let Some(mac) = iface.mac_address.as_deref() {
            if macs.insert(normalize_mac(mac)) {
                ret.push(HostInterface::new(&iface.name, mac));
            } else {
                log::debug!(
                    "Not mapping {} as its MAC address {mac} is already used",
                    iface.name
                );
            }
        }
    }
    ret
}
