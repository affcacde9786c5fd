// SPDX-License-Identifier: Apache-2.0

use crate::{inventory::nic_query_error, ErrorKind, InterfaceInventory};

#[test]
fn test_inventory_mac_case_insensitive() {
    let inventory: InterfaceInventory =
        [("FE:C4:05:42:8B:AA", "enp1s0")].into_iter().collect();

    assert_eq!(inventory.get("fe:c4:05:42:8b:aa"), Some("enp1s0"));
    assert!(inventory.contains(" FE:c4:05:42:8b:AA "));
    assert_eq!(inventory.len(), 1);
}

#[test]
fn test_inventory_query_failure_kind() {
    let e = nic_query_error("PermissionDeny", "Operation not permitted");

    assert_eq!(e.kind(), ErrorKind::NicQueryFailure);
    assert_eq!(
        e.msg(),
        "Failed to retrieve network interfaces: PermissionDeny: \
         Operation not permitted"
    );
    assert_eq!(e.kind().to_string(), "nic-query-failure");
}
