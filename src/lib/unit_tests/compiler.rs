// SPDX-License-Identifier: Apache-2.0

use crate::{
    parse_compiled_conf, ErrorKind, NetStateCompiler, NmKeyFile,
    NmstateCompiler,
};

const ETH0_STATE: &str = r#"---
interfaces:
  - name: eth0
    type: ethernet
    state: up
    mac-address: FE:C4:05:42:8B:AA
    ipv4:
      enabled: true
      dhcp: true
"#;

#[test]
fn test_nmstate_compile_ethernet() {
    let compiled = NmstateCompiler::new().compile(ETH0_STATE).unwrap();
    let config = parse_compiled_conf(&compiled).unwrap();

    assert_eq!(config.len(), 1);
    let (file_name, content) = &config[0];
    assert_eq!(file_name, "eth0.nmconnection");
    let keyfile = NmKeyFile::parse(content).unwrap();
    assert_eq!(keyfile.get("connection", "interface-name"), Some("eth0"));
    assert_eq!(keyfile.get("connection", "type"), Some("ethernet"));
}

#[test]
fn test_nmstate_compile_invalid_yaml() {
    let e = NmstateCompiler::new()
        .compile("interfaces:\n  - name: [eth0\n")
        .unwrap_err();

    assert_eq!(e.kind(), ErrorKind::CompilerFailure);
}
