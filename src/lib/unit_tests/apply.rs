// SPDX-License-Identifier: Apache-2.0

use super::testlib::{dir_file_names, file_mode, TestDir, ETH0_PROFILE};
use crate::{apply, ErrorKind, InterfaceInventory, NmcConfig};

const HOST_MAPPING: &str = r#"
- hostname: node1
  interfaces:
    - logical_name: eth0
      mac_address: FE:C4:05:42:8B:01
- hostname: node2
  interfaces:
    - logical_name: eth0
      mac_address: FE:C4:05:42:8B:02
"#;

fn setup(dir: &TestDir) -> NmcConfig {
    dir.write("config/host_config.yaml", HOST_MAPPING);
    dir.write("config/node1/eth0.nmconnection", ETH0_PROFILE);
    dir.write(
        "config/node2/eth0.nmconnection",
        &ETH0_PROFILE.replace("method=auto", "method=manual"),
    );
    NmcConfig::new(
        dir.path().join("config"),
        dir.path().join("system-connections"),
    )
}

#[test]
fn test_apply_identified_host() {
    let dir = TestDir::new("apply-host");
    let config = setup(&dir);
    let inventory: InterfaceInventory = [
        ("52:54:00:00:00:01", "enp1s0"),
        ("fe:c4:05:42:8b:02", "enp7s0"),
    ]
    .into_iter()
    .collect();

    let diagnostics = apply(&config, &inventory).unwrap();

    assert!(diagnostics.is_empty());
    assert_eq!(
        dir_file_names(&config.destination_dir),
        vec!["enp7s0.nmconnection"]
    );
    let installed = std::fs::read_to_string(
        config.destination_dir.join("enp7s0.nmconnection"),
    )
    .unwrap();
    assert!(installed.contains("method=manual"));
    assert!(installed.contains("interface-name=enp7s0\n"));
    assert_eq!(
        file_mode(&config.destination_dir.join("enp7s0.nmconnection")),
        0o600
    );
}

#[test]
fn test_apply_no_matching_host() {
    let dir = TestDir::new("apply-no-host");
    let config = setup(&dir);
    let inventory: InterfaceInventory =
        [("52:54:00:00:00:01", "enp1s0")].into_iter().collect();

    let e = apply(&config, &inventory).unwrap_err();

    assert_eq!(e.kind(), ErrorKind::NoMatchingHost);
    assert!(dir_file_names(&config.destination_dir).is_empty());
}

#[test]
fn test_apply_missing_host_mapping() {
    let dir = TestDir::new("apply-no-mapping");
    let config = NmcConfig::new(
        dir.mkdir("config"),
        dir.path().join("system-connections"),
    );

    let e = apply(&config, &InterfaceInventory::new()).unwrap_err();

    assert_eq!(e.kind(), ErrorKind::IoFailure);
    assert!(e.msg().contains("host_config.yaml"));
}

#[test]
fn test_apply_shared_by_all_hosts() {
    let dir = TestDir::new("apply-all");
    dir.write("config/_all/eth0.nmconnection", ETH0_PROFILE);
    let config = NmcConfig::new(
        dir.path().join("config"),
        dir.path().join("system-connections"),
    );
    // No host mapping needed, no renaming done
    let inventory: InterfaceInventory =
        [("fe:c4:05:42:8b:01", "enp1s0")].into_iter().collect();

    apply(&config, &inventory).unwrap();

    assert_eq!(
        std::fs::read_to_string(
            config.destination_dir.join("eth0.nmconnection")
        )
        .unwrap(),
        ETH0_PROFILE
    );
}

#[test]
fn test_nmc_config_defaults() {
    let config: NmcConfig = serde_yaml::from_str("source-dir: /tmp/config")
        .unwrap();

    assert_eq!(config.source_dir, std::path::Path::new("/tmp/config"));
    assert_eq!(
        config.destination_dir,
        NmcConfig::default().destination_dir
    );
}
