use std::io;
use std::process::ExitStatus;

use ipnetwork::Ipv4Network;
use strum::IntoStaticStr;
use thiserror::Error;

/// A single external query failed. Callers recover with an empty result.
#[derive(Debug, Error, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum QueryError {
    #[error("could not run {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("{program} exited with {status}")]
    ExitStatus { program: String, status: ExitStatus },
    #[error("could not parse output of {program}: {source}")]
    Json { program: String, source: serde_json::Error },
}

impl QueryError {
    pub fn as_static_str(&self) -> &'static str {
        self.into()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No FXZ interface found.")]
    NoTunnelInterface,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("could not read config: {0}")]
    Read(io::Error),
    #[error("could not deserialize config: {0}")]
    Deserialize(serde_json::Error),
    #[error("gateway network {gateway} overlaps direct network {direct}")]
    Overlapping { gateway: Ipv4Network, direct: Ipv4Network },
}
