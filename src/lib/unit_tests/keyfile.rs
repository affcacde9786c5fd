// SPDX-License-Identifier: Apache-2.0

use super::testlib::{file_mode, TestDir, ETH0_PROFILE};
use crate::{ErrorKind, NmKeyFile};

#[test]
fn test_keyfile_sections_and_entries() {
    let keyfile = NmKeyFile::parse(ETH0_PROFILE).unwrap();

    assert_eq!(keyfile.sections(), vec!["connection", "ipv4", "ipv6"]);
    assert_eq!(
        keyfile.entries("connection"),
        vec![
            ("id", "eth0"),
            ("uuid", "dfd202f5-562f-5f07-8f2a-a7717756fb70"),
            ("type", "ethernet"),
            ("interface-name", "eth0"),
            ("autoconnect", "true"),
        ]
    );
    assert_eq!(keyfile.get("ipv4", "method"), Some("auto"));
    assert_eq!(keyfile.get("ipv4", "address1"), None);
    assert_eq!(keyfile.get("ethernet", "method"), None);
}

#[test]
fn test_keyfile_values_outlive_section_name() {
    let keyfile = NmKeyFile::parse(ETH0_PROFILE).unwrap();

    let (entries, method) = {
        let section = String::from("ipv4");
        (keyfile.entries(&section), keyfile.get(&section, "method"))
    };

    assert_eq!(entries, vec![("method", "auto")]);
    assert_eq!(method, Some("auto"));
}

#[test]
fn test_keyfile_preserve_untouched_content() {
    let content = "# generated\r\n[connection]\r\nid = eth0\r\n\r\n\
                   ; note\n[ethernet]\nmtu=1500";
    let keyfile = NmKeyFile::parse(content).unwrap();

    assert_eq!(keyfile.to_string(), content);
    assert_eq!(keyfile.get("connection", "id"), Some("eth0"));
    assert_eq!(keyfile.get("ethernet", "mtu"), Some("1500"));
}

#[test]
fn test_keyfile_replace_exact_value_only() {
    let mut keyfile = NmKeyFile::parse(
        r#"[connection]
id=eth0
interface-name = eth0
master=eth0.100

[vlan]
parent=eth0
egress-priority-map=eth0:1
"#,
    )
    .unwrap();

    assert_eq!(keyfile.replace_value("eth0", "enp1s0"), 3);
    assert_eq!(
        keyfile.to_string(),
        r#"[connection]
id=enp1s0
interface-name = enp1s0
master=eth0.100

[vlan]
parent=enp1s0
egress-priority-map=eth0:1
"#
    );
}

#[test]
fn test_keyfile_set() {
    let mut keyfile = NmKeyFile::parse(ETH0_PROFILE).unwrap();

    assert!(keyfile.set("ipv4", "method", "manual"));
    assert!(!keyfile.set("ipv4", "address1", "192.0.2.1/24"));
    assert_eq!(keyfile.get("ipv4", "method"), Some("manual"));
    assert_eq!(keyfile.get("ipv6", "method"), Some("disabled"));
}

#[test]
fn test_keyfile_empty_value() {
    let mut keyfile = NmKeyFile::parse("[ipv4]\ndns-search=\n").unwrap();

    assert_eq!(keyfile.get("ipv4", "dns-search"), Some(""));
    assert!(keyfile.set("ipv4", "dns-search", "example.org"));
    assert_eq!(keyfile.to_string(), "[ipv4]\ndns-search=example.org\n");
}

#[test]
fn test_keyfile_key_before_section() {
    let e = NmKeyFile::parse("id=eth0\n[connection]\n").unwrap_err();

    assert_eq!(e.kind(), ErrorKind::InvalidProfile);
    assert_eq!(e.msg(), "line 1: key defined before any section");
}

#[test]
fn test_keyfile_unterminated_section() {
    let e = NmKeyFile::parse("[connection]\nid=eth0\n[ipv4\n").unwrap_err();

    assert_eq!(e.kind(), ErrorKind::InvalidProfile);
    assert_eq!(e.msg(), "line 3: unterminated section header");
}

#[test]
fn test_keyfile_line_without_value() {
    let e = NmKeyFile::parse("[connection]\nid\n").unwrap_err();

    assert_eq!(e.kind(), ErrorKind::InvalidProfile);
    assert_eq!(e.msg(), "line 2: expecting key=value");
}

#[test]
fn test_keyfile_save_owner_only() {
    let dir = TestDir::new("keyfile-save");
    let path = dir.write("eth0.nmconnection", "");
    std::fs::set_permissions(
        &path,
        std::os::unix::fs::PermissionsExt::from_mode(0o644),
    )
    .unwrap();

    NmKeyFile::parse(ETH0_PROFILE).unwrap().save(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), ETH0_PROFILE);
    assert_eq!(file_mode(&path), 0o600);
}

#[test]
fn test_keyfile_load_invalid_utf8() {
    let dir = TestDir::new("keyfile-utf8");
    let path = dir.path().join("eth0.nmconnection");
    std::fs::write(&path, b"[connection]\nid=\xff\n").unwrap();

    let e = NmKeyFile::load(&path).unwrap_err();

    assert_eq!(e.kind(), ErrorKind::InvalidProfile);
}
