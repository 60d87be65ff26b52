mod persistence;

#[cfg(test)]
mod persistence_test;

pub use persistence::*;

use std::net::Ipv4Addr;
use std::path::PathBuf;

use ipnetwork::Ipv4Network;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigLoadError;

pub const DEFAULT_IP_COMMAND: &str = "/opt/homebrew/bin/ip";

/// Tunnel devices on macOS are named `utunN`.
pub const DEFAULT_TUNNEL_MARKER: &str = "utun";

pub const DEFAULT_LOCAL_INTERFACE: &str = "en0";

/// Settings of a check run. Every field is optional in the file and falls back to the built-in default.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// `ip` binary speaking JSON (`-j`), e.g. iproute2mac.
    pub ip_command: PathBuf,
    /// Substring identifying tunnel interface names.
    pub tunnel_marker: String,
    /// Physical interface whose IPv6 networks count as local.
    pub local_interface: String,
    /// Local networks behind the LAN gateway. Re-added via the gateway by `--fix`.
    pub gateway_networks: Vec<Ipv4Network>,
    /// Directly attached networks. Only their tunnel routes are deleted.
    pub direct_networks: Vec<Ipv4Network>,
}

impl Default for Config {
    fn default() -> Self {
        let v4 = |a, b, c| Ipv4Network::new(Ipv4Addr::new(a, b, c, 0), 24).unwrap();
        Self {
            ip_command: DEFAULT_IP_COMMAND.into(),
            tunnel_marker: DEFAULT_TUNNEL_MARKER.into(),
            local_interface: DEFAULT_LOCAL_INTERFACE.into(),
            gateway_networks: vec![v4(192, 168, 1), v4(192, 168, 2), v4(192, 168, 3)],
            direct_networks: vec![v4(10, 211, 55)],
        }
    }
}

impl Config {
    /// No gateway network may overlap a direct network.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        for &gateway in &self.gateway_networks {
            if let Some(&direct) = self.direct_networks.iter().find(|direct| overlaps(gateway, **direct)) {
                return Err(ConfigLoadError::Overlapping { gateway, direct });
            }
        }
        Ok(())
    }
}

/// Either network contains the base address of the other. Host bits are ignored.
fn overlaps(a: Ipv4Network, b: Ipv4Network) -> bool {
    a.contains(b.network()) || b.contains(a.network())
}
