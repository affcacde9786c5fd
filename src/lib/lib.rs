// SPDX-License-Identifier: Apache-2.0

//! Install pre-generated NetworkManager connection profiles on the machine
//! they were generated for, under the interface names assigned by the
//! running kernel.
//!
//! Build time: [generate()] or [generate_all()] compile declarative network
//! states into `*.nmconnection` profiles, one directory per host.
//!
//! Boot time: [apply()] identifies the host through the MAC addresses of
//! local NICs and installs its profiles, renaming interfaces when the kernel
//! named them differently.

mod apply;
mod compiler;
pub mod config;
mod diagnostic;
mod error;
mod generate;
mod host;
mod inventory;
mod keyfile;
mod reconcile;
mod resolver;

pub use self::apply::apply;
pub use self::compiler::{NetStateCompiler, NmstateCompiler};
pub use self::config::NmcConfig;
pub use self::diagnostic::{NmcDiagnostic, NmcDiagnosticKind};
pub use self::error::{ErrorKind, NmcError};
pub use self::generate::{
    generate, generate_all, parse_compiled_conf, NetworkConfig,
};
pub use self::host::{Host, HostCatalog, HostInterface};
pub use self::inventory::InterfaceInventory;
pub use self::keyfile::NmKeyFile;
pub use self::reconcile::{install_all, reconcile};
pub use self::resolver::resolve;
