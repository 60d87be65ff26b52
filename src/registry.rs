use ipnetwork::{IpNetwork, Ipv4Network};
use serde::Serialize;

use crate::prefix::NetworkPrefix;

/// Networks reachable without the tunnel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalNetworkRegistry {
    /// Reached through the LAN gateway. Re-added after deleting tunnel routes.
    pub gateway_v4: Vec<NetworkPrefix>,
    /// Directly attached. Deleting the tunnel route is enough.
    pub direct_v4: Vec<NetworkPrefix>,
    pub local_v6: Vec<NetworkPrefix>,
}

impl LocalNetworkRegistry {
    pub fn new(gateway_v4: &[Ipv4Network], direct_v4: &[Ipv4Network], local_v6: Vec<NetworkPrefix>) -> Self {
        let v4 = |nets: &[Ipv4Network]| -> Vec<NetworkPrefix> { nets.iter().map(|&net| NetworkPrefix::from(IpNetwork::V4(net))).collect() };
        Self { gateway_v4: v4(gateway_v4), direct_v4: v4(direct_v4), local_v6 }
    }

    /// Gateway networks followed by direct networks.
    pub fn local_v4(&self) -> Vec<NetworkPrefix> {
        self.gateway_v4.iter().chain(&self.direct_v4).copied().collect()
    }
}
