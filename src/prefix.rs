use derive_more::{Deref, Display};
use ipnetwork::{IpNetwork, IpNetworkError};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use strum::{EnumIs, IntoStaticStr};

/// Routing table a route was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr)]
pub enum AddrFamily {
    #[serde(rename = "ip_v4")]
    #[strum(serialize = "ip_v4")]
    V4,
    #[serde(rename = "ip_v6")]
    #[strum(serialize = "ip_v6")]
    V6,
}

impl AddrFamily {
    pub fn as_static_str(&self) -> &'static str {
        self.into()
    }

    /// Flag selecting the table in `ip -j <flag> route`.
    pub fn ip_flag(&self) -> &'static str {
        match self {
            Self::V4 => "-4",
            Self::V6 => "-6",
        }
    }

    pub fn of(ip: IpAddr) -> Self {
        match ip {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }
}

/// A network with its host bits cleared. Equal only if family, base address and length match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display("{_0}")]
#[serde(from = "IpNetwork", into = "IpNetwork")]
pub struct NetworkPrefix(IpNetwork);

impl From<IpNetwork> for NetworkPrefix {
    fn from(net: IpNetwork) -> Self {
        Self(IpNetwork::new(net.network(), net.prefix()).unwrap_or(net))
    }
}

impl From<NetworkPrefix> for IpNetwork {
    fn from(prefix: NetworkPrefix) -> Self {
        prefix.0
    }
}

impl NetworkPrefix {
    /// Wraps a network whose host bits are already clear.
    pub(crate) const fn from_normalized(net: IpNetwork) -> Self {
        Self(net)
    }

    pub fn new(ip: IpAddr, prefix: u8) -> Result<Self, IpNetworkError> {
        IpNetwork::new(ip, prefix).map(Self::from)
    }

    /// Host prefix (`/32` or `/128`) for a single address.
    pub fn host(ip: IpAddr) -> Self {
        Self(IpNetwork::from(ip))
    }

    pub fn family(&self) -> AddrFamily {
        AddrFamily::of(self.0.ip())
    }

    pub fn first_address(&self) -> IpAddr {
        self.0.network()
    }

    pub fn last_address(&self) -> IpAddr {
        match self.0 {
            IpNetwork::V4(net) => Ipv4Addr::from(u32::from(net.network()) | !u32::from(net.mask())).into(),
            IpNetwork::V6(net) => Ipv6Addr::from(u128::from(net.network()) | !u128::from(net.mask())).into(),
        }
    }

    /// True if every address of `other` lies inside `self`. Networks of different families never contain each other.
    pub fn contains_network(&self, other: &NetworkPrefix) -> bool {
        self.family() == other.family() && self.0.contains(other.first_address()) && self.0.contains(other.last_address())
    }
}

impl FromStr for NetworkPrefix {
    type Err = IpNetworkError;

    /// Accepts `addr/len` with host bits set and bare addresses. An IPv6 zone (`fe80::1%en0`) is dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (addr, len) = match s.split_once('/') {
            Some((addr, len)) => (addr, Some(len)),
            None => (s, None),
        };
        let addr = addr.split_once('%').map_or(addr, |(addr, _zone)| addr);
        let ip = IpAddr::from_str(addr).map_err(|_| IpNetworkError::InvalidAddr(s.to_string()))?;
        match len {
            None => Ok(Self::host(ip)),
            Some(len) => {
                let len = len.parse::<u8>().map_err(|_| IpNetworkError::InvalidPrefix)?;
                Self::new(ip, len)
            }
        }
    }
}

/// Literal used by the routing tool for the default route.
pub const DEFAULT_DESTINATION: &str = "default";

/// Parsed `dst` field of a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIs, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Destination {
    Default,
    Prefix(NetworkPrefix),
    Unparsed,
}

impl Destination {
    pub fn parse(dst: &str) -> Self {
        if dst == DEFAULT_DESTINATION {
            return Self::Default;
        }
        match dst.parse::<NetworkPrefix>() {
            Ok(prefix) => Self::Prefix(prefix),
            Err(error) => {
                tracing::debug!(?error, dst, "unparsable route destination");
                Self::Unparsed
            }
        }
    }

    /// The destination network, unless this is the default route or unparsable.
    pub fn prefix(&self) -> Option<&NetworkPrefix> {
        match self {
            Self::Prefix(prefix) => Some(prefix),
            Self::Default | Self::Unparsed => None,
        }
    }
}
