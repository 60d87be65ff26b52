use std::collections::BTreeSet;
use std::net::Ipv6Addr;

use ipnetwork::{IpNetwork, Ipv6Network};

use crate::prefix::{AddrFamily, Destination, NetworkPrefix};
use crate::route::Route;

/// The two halves of the IPv6 address space. VPNs install both to take over IPv6 traffic without touching the default route, even when the tunnel carries no IPv6.
pub const HALF_DEFAULTS: [NetworkPrefix; 2] = [
    NetworkPrefix::from_normalized(IpNetwork::V6(Ipv6Network::new_checked(Ipv6Addr::new(0x0000, 0, 0, 0, 0, 0, 0, 0), 1).unwrap())),
    NetworkPrefix::from_normalized(IpNetwork::V6(Ipv6Network::new_checked(Ipv6Addr::new(0x8000, 0, 0, 0, 0, 0, 0, 0), 1).unwrap())),
];

/// True if `dst` lies entirely within a local network of its own family. Default routes and unparsable destinations are never local.
pub fn is_local_route(dst: &Destination, local_v4: &[NetworkPrefix], local_v6: &[NetworkPrefix]) -> bool {
    let Some(prefix) = dst.prefix() else {
        return false;
    };
    let local = match prefix.family() {
        AddrFamily::V4 => local_v4,
        AddrFamily::V6 => local_v6,
    };
    local.iter().any(|network| network.contains_network(prefix))
}

/// Indices of `networks` containing the destination of at least one route.
pub fn covered_indices(routes: &[Route], networks: &[NetworkPrefix]) -> BTreeSet<usize> {
    let mut covered = BTreeSet::new();
    for prefix in routes.iter().filter_map(|route| route.destination.prefix()) {
        for (i, network) in networks.iter().enumerate() {
            if network.family() == prefix.family() && network.contains_network(prefix) {
                covered.insert(i);
            }
        }
    }
    covered
}

/// Entries of `networks` whose index isn't in `covered`.
pub fn uncovered(networks: &[NetworkPrefix], covered: &BTreeSet<usize>) -> Vec<NetworkPrefix> {
    networks
        .iter()
        .enumerate()
        .filter(|(i, _)| !covered.contains(i))
        .map(|(_, network)| *network)
        .collect()
}

/// IPv6 routes to exactly `::/1` or `8000::/1`. Narrower routes inside either half don't count.
pub fn half_default_routes(routes: &[Route]) -> Vec<Route> {
    routes
        .iter()
        .filter(|route| route.addr_family == AddrFamily::V6)
        .filter(|route| route.destination.prefix().is_some_and(|prefix| HALF_DEFAULTS.contains(prefix)))
        .cloned()
        .collect()
}
