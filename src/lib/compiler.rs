// SPDX-License-Identifier: Apache-2.0

use crate::{ErrorKind, NmcError};

/// Compile a declarative network state document into the connection
/// profiles of network backends.
///
/// The returned document is YAML holding a `NetworkManager` list of
/// `[file_name, content]` pairs, the same output as `nmstatectl gc`.
pub trait NetStateCompiler {
    fn compile(&self, net_state: &str) -> Result<String, NmcError>;
}

/// Compiler backed by the nmstate library.
#[derive(Debug, Clone, Copy, Default)]
pub struct NmstateCompiler;

impl NmstateCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl NetStateCompiler for NmstateCompiler {
    fn compile(&self, net_state: &str) -> Result<String, NmcError> {
        let net_state = nmstate::NetworkState::new_from_yaml(net_state)
            .map_err(|e| {
                NmcError::new(
                    ErrorKind::CompilerFailure,
                    format!("Invalid network state: {e}"),
                )
            })?;
        let confs = net_state.gen_conf().map_err(|e| {
            NmcError::new(
                ErrorKind::CompilerFailure,
                format!("Failed to generate configuration: {e}"),
            )
        })?;
        serde_yaml::to_string(&confs).map_err(|e| {
            NmcError::new(
                ErrorKind::Bug,
                format!("Failed to serialize generated configuration: {e}"),
            )
        })
    }
}
