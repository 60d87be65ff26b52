use serde::Serialize;

use crate::ip_tool::RouteRecord;
use crate::prefix::{AddrFamily, Destination};

/// A routing table entry observed in this run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// `dst` as printed by the routing tool, empty if absent.
    pub dst: String,
    #[serde(skip)]
    pub destination: Destination,
    pub dev: Option<String>,
    pub gateway: Option<String>,
    pub addr_family: AddrFamily,
}

impl Route {
    pub fn new(dst: impl Into<String>, dev: Option<&str>, gateway: Option<&str>, addr_family: AddrFamily) -> Self {
        let dst = dst.into();
        Self {
            destination: Destination::parse(&dst),
            dst,
            dev: dev.map(str::to_string),
            gateway: gateway.map(str::to_string),
            addr_family,
        }
    }

    pub fn from_record(record: RouteRecord, addr_family: AddrFamily) -> Self {
        let dst = record.dst.unwrap_or_default();
        Self { destination: Destination::parse(&dst), dst, dev: record.dev, gateway: record.gateway, addr_family }
    }

    pub fn is_via(&self, dev: &str) -> bool {
        self.dev.as_deref() == Some(dev)
    }
}

/// Routes egressing through `tunnel`.
pub fn tunnel_routes(routes: impl IntoIterator<Item = Route>, tunnel: &str) -> Vec<Route> {
    routes.into_iter().filter(|route| route.is_via(tunnel)).collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DefaultGateway {
    pub gateway: String,
    pub dev: String,
}

/// First IPv4 default route that doesn't go through `tunnel` and names both a gateway and a device.
pub fn default_gateway(routes_v4: &[Route], tunnel: &str) -> Option<DefaultGateway> {
    routes_v4
        .iter()
        .filter(|route| route.destination.is_default() && !route.is_via(tunnel))
        .find_map(|route| {
            let gateway = route.gateway.as_deref().filter(|gateway| !gateway.is_empty())?;
            let dev = route.dev.as_deref().filter(|dev| !dev.is_empty())?;
            Some(DefaultGateway { gateway: gateway.to_string(), dev: dev.to_string() })
        })
}
