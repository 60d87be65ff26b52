use std::net::IpAddr;

use crate::ip_tool::InterfaceRecord;
use crate::prefix::NetworkPrefix;

/// Longest prefix kept for a discovered local IPv6 network.
pub const MAX_LOCAL_V6_PREFIX: u8 = 64;

/// Prefix length assumed when the tool omits `prefixlen`.
const DEFAULT_V6_PREFIX: u8 = 64;

/// Name of the first interface containing `marker` with more than one address. A tunnel with a single address isn't the VPN in use.
pub fn resolve_tunnel_interface(interfaces: &[InterfaceRecord], marker: &str) -> Option<String> {
    interfaces
        .iter()
        .filter_map(|interface| Some((interface.ifname.as_deref()?, interface)))
        .find(|(name, interface)| name.contains(marker) && interface.addr_info.len() > 1)
        .map(|(name, _)| name.to_string())
}

/// Local IPv6 networks from an address listing, in listing order without duplicates.
///
/// Link-local and non-IPv6 addresses are skipped. Prefixes longer than /64 are shortened to /64, shorter ones are kept.
pub fn local_ipv6_networks(interfaces: &[InterfaceRecord]) -> Vec<NetworkPrefix> {
    let mut networks: Vec<NetworkPrefix> = Vec::new();
    for addr_info in interfaces.iter().flat_map(|interface| &interface.addr_info) {
        let Some(local) = addr_info.local.as_deref().filter(|local| !local.is_empty()) else {
            continue;
        };
        let ip = match local.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => ip,
            Ok(IpAddr::V4(_)) => continue,
            Err(error) => {
                tracing::debug!(?error, local, "skipping unparsable address");
                continue;
            }
        };
        if ip.is_unicast_link_local() {
            continue;
        }
        let prefixlen = match &addr_info.prefixlen {
            None => DEFAULT_V6_PREFIX,
            Some(prefixlen) => match prefixlen.get() {
                Some(prefixlen) => prefixlen,
                None => {
                    tracing::debug!(?prefixlen, local, "skipping invalid address prefix");
                    continue;
                }
            },
        }
        .min(MAX_LOCAL_V6_PREFIX);
        let network = match NetworkPrefix::new(ip.into(), prefixlen) {
            Ok(network) => network,
            Err(error) => {
                tracing::debug!(?error, local, prefixlen, "skipping invalid address prefix");
                continue;
            }
        };
        if !networks.contains(&network) {
            networks.push(network);
        }
    }
    networks
}
