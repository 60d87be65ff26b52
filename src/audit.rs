use serde::Serialize;

use crate::classify::{covered_indices, half_default_routes, is_local_route, uncovered};
use crate::command::CommandRunner;
use crate::config::Config;
use crate::errors::ResolveError;
use crate::fix::{fix_commands, FixCommand};
use crate::interface::{local_ipv6_networks, resolve_tunnel_interface};
use crate::ip_tool::IpTool;
use crate::prefix::{AddrFamily, NetworkPrefix};
use crate::registry::LocalNetworkRegistry;
use crate::route::{default_gateway, tunnel_routes, DefaultGateway, Route};

/// Everything read from the system in one run.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub tunnel: String,
    /// Full IPv4 table, needed to find the default gateway.
    pub routes_v4: Vec<Route>,
    pub routes_v6: Vec<Route>,
    pub local_v6: Vec<NetworkPrefix>,
}

impl Snapshot {
    /// Queries the system. `netif` skips tunnel interface resolution.
    pub fn collect<R: CommandRunner>(ip: &IpTool<R>, config: &Config, netif: Option<&str>) -> Result<Self, ResolveError> {
        let tunnel = match netif {
            Some(netif) => netif.to_string(),
            None => resolve_tunnel_interface(&ip.addresses(), &config.tunnel_marker).ok_or(ResolveError::NoTunnelInterface)?,
        };
        tracing::debug!(tunnel = %tunnel, "using tunnel interface");
        let local_v6 = local_ipv6_networks(&ip.ipv6_addresses(&config.local_interface));
        Ok(Self { tunnel, routes_v4: ip.routes(AddrFamily::V4), routes_v6: ip.routes(AddrFamily::V6), local_v6 })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub tunnel: String,
    pub registry: LocalNetworkRegistry,
    pub tunnel_route_count: usize,
    /// Tunnel routes to local networks.
    pub local_routes: Vec<Route>,
    pub uncovered_v4: Vec<NetworkPrefix>,
    pub uncovered_v6: Vec<NetworkPrefix>,
    pub half_defaults: Vec<Route>,
    pub default_gateway: Option<DefaultGateway>,
}

pub fn audit(snapshot: Snapshot, config: &Config) -> AuditReport {
    let Snapshot { tunnel, routes_v4, routes_v6, local_v6 } = snapshot;
    let registry = LocalNetworkRegistry::new(&config.gateway_networks, &config.direct_networks, local_v6);
    let default_gateway = default_gateway(&routes_v4, &tunnel);

    let captured = tunnel_routes(routes_v4.into_iter().chain(routes_v6), &tunnel);
    let local_v4 = registry.local_v4();
    let local_routes: Vec<Route> = captured
        .iter()
        .filter(|route| is_local_route(&route.destination, &local_v4, &registry.local_v6))
        .cloned()
        .collect();
    tracing::debug!(captured = captured.len(), local = local_routes.len(), "classified tunnel routes");

    let uncovered_v4 = uncovered(&registry.gateway_v4, &covered_indices(&local_routes, &registry.gateway_v4));
    let uncovered_v6 = uncovered(&registry.local_v6, &covered_indices(&local_routes, &registry.local_v6));

    AuditReport {
        half_defaults: half_default_routes(&captured),
        tunnel_route_count: captured.len(),
        tunnel,
        registry,
        local_routes,
        uncovered_v4,
        uncovered_v6,
        default_gateway,
    }
}

impl AuditReport {
    pub fn count(&self, family: AddrFamily) -> usize {
        self.local_routes.iter().filter(|route| route.addr_family == family).count()
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "{} Dst Found (IPv4: {}, IPv6: {})",
            self.local_routes.len(),
            self.count(AddrFamily::V4),
            self.count(AddrFamily::V6)
        )];
        if !self.half_defaults.is_empty() {
            lines.push(format!("IPv6 half-default routes via FXZ: {} (use --fix to remove)", self.half_defaults.len()));
        }
        lines
    }

    pub fn debug_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("FXZ interface = {}", self.tunnel),
            format!("Local IPv4 networks = {}", list(&self.registry.local_v4())),
            format!("Local IPv6 networks = {}", list(&self.registry.local_v6)),
            format!("FXZ routes total: {}", self.tunnel_route_count),
            format!("Local routes to fix: {}", self.local_routes.len()),
        ];
        lines.extend(self.local_routes.iter().map(|route| {
            format!(
                "  {} dev {} ({})",
                route.dst,
                route.dev.as_deref().unwrap_or("-"),
                route.addr_family.as_static_str()
            )
        }));
        if !self.uncovered_v4.is_empty() {
            lines.push(format!("Uncovered IPv4 networks (need route add): {}", list(&self.uncovered_v4)));
        }
        if !self.uncovered_v6.is_empty() {
            lines.push(format!("Uncovered IPv6 networks (need route add): {}", list(&self.uncovered_v6)));
        }
        match &self.default_gateway {
            Some(gateway) => lines.push(format!("Default gateway = {} dev {}", gateway.gateway, gateway.dev)),
            None => lines.push("Default gateway = none (route add commands omitted)".to_string()),
        }
        lines
    }

    pub fn fix_commands(&self) -> Vec<FixCommand> {
        fix_commands(
            &self.local_routes,
            &self.half_defaults,
            &self.tunnel,
            self.default_gateway.as_ref(),
            &self.registry.gateway_v4,
        )
    }
}

fn list(networks: &[NetworkPrefix]) -> String {
    let networks: Vec<String> = networks.iter().map(ToString::to_string).collect();
    format!("[{}]", networks.join(", "))
}
