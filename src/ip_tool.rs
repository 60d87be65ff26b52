//! JSON output of `ip -j` (iproute2 or iproute2mac) and the queries that produce it.

use std::path::PathBuf;

use serde::Deserialize;

use crate::command::{query_json_rows, CommandRunner};
use crate::prefix::AddrFamily;
use crate::route::Route;

/// One element of `ip -j addr`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct InterfaceRecord {
    #[serde(default)]
    pub ifname: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_safe::deserialize_each")]
    pub addr_info: Vec<AddrInfo>,
}

/// An unreadable field decodes as `None` instead of failing the whole interface.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AddrInfo {
    #[serde(default, deserialize_with = "crate::serde_safe::deserialize")]
    pub local: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_safe::deserialize")]
    pub prefixlen: Option<PrefixLen>,
}

/// `prefixlen` as a number or a numeric string.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PrefixLen {
    Number(u64),
    Text(String),
}

impl PrefixLen {
    /// The prefix length, unless it is out of range or not a number.
    pub fn get(&self) -> Option<u8> {
        match self {
            Self::Number(n) => u8::try_from(*n).ok(),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<u8> for PrefixLen {
    fn from(n: u8) -> Self {
        Self::Number(n.into())
    }
}

/// One element of `ip -j route`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RouteRecord {
    #[serde(default)]
    pub dst: Option<String>,
    #[serde(default)]
    pub dev: Option<String>,
    #[serde(default)]
    pub gateway: Option<String>,
}

pub struct IpTool<R> {
    runner: R,
    program: PathBuf,
}

impl<R: CommandRunner> IpTool<R> {
    pub fn new(runner: R, program: impl Into<PathBuf>) -> Self {
        Self { runner, program: program.into() }
    }

    /// `ip -j addr`: every interface with all of its addresses.
    pub fn addresses(&self) -> Vec<InterfaceRecord> {
        query_json_rows(&self.runner, &self.program, &["-j", "addr"])
    }

    /// `ip -j -6 addr show <interface>`.
    pub fn ipv6_addresses(&self, interface: &str) -> Vec<InterfaceRecord> {
        query_json_rows(&self.runner, &self.program, &["-j", "-6", "addr", "show", interface])
    }

    /// `ip -j -4 route` or `ip -j -6 route`, tagged with `family`.
    pub fn routes(&self, family: AddrFamily) -> Vec<Route> {
        query_json_rows::<RouteRecord>(&self.runner, &self.program, &["-j", family.ip_flag(), "route"])
            .into_iter()
            .map(|record| Route::from_record(record, family))
            .collect()
    }
}
