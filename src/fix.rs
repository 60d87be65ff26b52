//! Shell commands that move local networks back off the tunnel.

use std::fmt;

use crate::prefix::{AddrFamily, NetworkPrefix};
use crate::route::{DefaultGateway, Route};

const IP: &str = "ip";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixCommand {
    DeleteRoute { addr_family: AddrFamily, dst: String, dev: String },
    AddRoute { network: NetworkPrefix, gateway: String, dev: String },
}

impl FixCommand {
    pub fn argv(&self) -> Vec<String> {
        let rendered;
        let argv: Vec<&str> = match self {
            Self::DeleteRoute { addr_family, dst, dev } => {
                let mut argv = vec![IP];
                if *addr_family == AddrFamily::V6 {
                    argv.push("-6");
                }
                argv.extend(["route", "del", dst.as_str(), "dev", dev.as_str()]);
                argv
            }
            Self::AddRoute { network, gateway, dev } => {
                rendered = network.to_string();
                vec![IP, "route", "add", rendered.as_str(), "via", gateway.as_str(), "dev", dev.as_str()]
            }
        };
        argv.into_iter().map(str::to_string).collect()
    }
}

impl fmt::Display for FixCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv().join(" "))
    }
}

/// Strips the host mask (`/32` or `/128`) that `ip route del` expects to be left out.
pub fn normalize_dst(dst: &str, addr_family: AddrFamily) -> &str {
    let host_suffix = match addr_family {
        AddrFamily::V4 => "/32",
        AddrFamily::V6 => "/128",
    };
    dst.strip_suffix(host_suffix).unwrap_or(dst)
}

fn delete(route: &Route, addr_family: AddrFamily, tunnel: &str) -> FixCommand {
    FixCommand::DeleteRoute {
        addr_family,
        dst: normalize_dst(&route.dst, route.addr_family).to_string(),
        dev: tunnel.to_string(),
    }
}

/// Deletions for captured local routes, then for half-default routes, then re-additions of every gateway network via `gateway`.
///
/// Direct networks are never re-added. Without a gateway no additions are emitted.
pub fn fix_commands(
    local_routes: &[Route],
    half_defaults: &[Route],
    tunnel: &str,
    gateway: Option<&DefaultGateway>,
    gateway_networks: &[NetworkPrefix],
) -> Vec<FixCommand> {
    let deletions = local_routes
        .iter()
        .map(|route| delete(route, route.addr_family, tunnel))
        .chain(half_defaults.iter().map(|route| delete(route, AddrFamily::V6, tunnel)));
    let additions = gateway.into_iter().flat_map(|gateway| {
        gateway_networks.iter().map(move |network| FixCommand::AddRoute {
            network: *network,
            gateway: gateway.gateway.clone(),
            dev: gateway.dev.clone(),
        })
    });
    deletions.chain(additions).collect()
}
