pub mod audit;
pub mod classify;
pub mod command;
pub mod config;
pub mod errors;
pub mod fix;
pub mod interface;
pub mod ip_tool;
pub mod logging;
pub mod prefix;
pub mod registry;
pub mod route;
pub mod serde_safe;

#[cfg(test)]
mod classify_test;
#[cfg(test)]
mod test_util;
