use std::fs;
use std::path::Path;

use ipnetwork::Ipv4Network;
use tempfile::tempdir;

use crate::config::load;
use crate::config::Config;
use crate::errors::ConfigLoadError;

#[test]
fn load_without_path() {
    assert_eq!(load(None).unwrap(), Config::default());
}

#[test]
fn load_no_config() {
    let path = Path::new("/var/empty/check-fxz.json");
    assert_eq!(load(Some(path)).unwrap(), Config::default());
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.ip_command, Path::new("/opt/homebrew/bin/ip"));
    assert_eq!(config.tunnel_marker, "utun");
    assert_eq!(config.local_interface, "en0");
    let gateway: Vec<String> = config.gateway_networks.iter().map(ToString::to_string).collect();
    assert_eq!(gateway, vec!["192.168.1.0/24", "192.168.2.0/24", "192.168.3.0/24"]);
    assert_eq!(config.direct_networks, vec!["10.211.55.0/24".parse::<Ipv4Network>().unwrap()]);
}

#[test]
fn load_partial_config() {
    let dir = tempdir().unwrap();
    let file = dir.as_ref().join("check-fxz.json");
    fs::write(&file, r#"{"localInterface": "en1", "gatewayNetworks": ["172.16.0.0/16"]}"#).unwrap();

    let config = load(Some(&file)).unwrap();
    assert_eq!(config.local_interface, "en1");
    assert_eq!(config.gateway_networks, vec!["172.16.0.0/16".parse::<Ipv4Network>().unwrap()]);
    // Fields missing from the file keep their defaults.
    assert_eq!(config.tunnel_marker, "utun");
    assert_eq!(config.direct_networks, Config::default().direct_networks);
}

#[test]
fn load_round_trips_saved_json() {
    let dir = tempdir().unwrap();
    let file = dir.as_ref().join("check-fxz.json");
    let config = Config { ip_command: "/usr/sbin/ip".into(), tunnel_marker: "wg".into(), ..Default::default() };
    fs::write(&file, serde_json::to_vec_pretty(&config).unwrap()).unwrap();
    assert_eq!(load(Some(&file)).unwrap(), config);
}

#[test]
fn load_invalid_json() {
    let dir = tempdir().unwrap();
    let file = dir.as_ref().join("check-fxz.json");
    fs::write(&file, "{").unwrap();
    assert!(matches!(load(Some(&file)), Err(ConfigLoadError::Deserialize(_))));
}

#[test]
fn load_invalid_network() {
    let dir = tempdir().unwrap();
    let file = dir.as_ref().join("check-fxz.json");
    fs::write(&file, r#"{"directNetworks": ["fd00::/64"]}"#).unwrap();
    assert!(matches!(load(Some(&file)), Err(ConfigLoadError::Deserialize(_))));
}

#[test]
fn load_directory_fails() {
    let dir = tempdir().unwrap();
    assert!(load(Some(dir.as_ref())).is_err());
}

#[test]
fn load_rejects_overlapping_lists() {
    let dir = tempdir().unwrap();
    let file = dir.as_ref().join("check-fxz.json");
    fs::write(&file, r#"{"gatewayNetworks": ["192.168.1.0/24"], "directNetworks": ["192.168.1.0/24"]}"#).unwrap();
    let error = load(Some(&file)).unwrap_err();
    assert!(matches!(error, ConfigLoadError::Overlapping { .. }));
    assert_eq!(error.to_string(), "gateway network 192.168.1.0/24 overlaps direct network 192.168.1.0/24");
}

fn config(gateway: &[&str], direct: &[&str]) -> Config {
    let nets = |nets: &[&str]| -> Vec<Ipv4Network> { nets.iter().map(|net| net.parse().unwrap()).collect() };
    Config { gateway_networks: nets(gateway), direct_networks: nets(direct), ..Default::default() }
}

#[test]
fn validate_rejects_nested_networks() {
    assert!(matches!(
        config(&["192.168.0.0/16"], &["192.168.1.0/24"]).validate(),
        Err(ConfigLoadError::Overlapping { .. })
    ));
    assert!(matches!(
        config(&["192.168.1.0/24"], &["192.168.0.0/16"]).validate(),
        Err(ConfigLoadError::Overlapping { .. })
    ));
}

#[test]
fn validate_ignores_host_bits() {
    let error = config(&["192.168.1.5/24"], &["192.168.1.0/24"]).validate().unwrap_err();
    assert_eq!(error.to_string(), "gateway network 192.168.1.5/24 overlaps direct network 192.168.1.0/24");
}

#[test]
fn validate_accepts_disjoint_networks() {
    assert!(config(&["192.168.1.0/24", "192.168.2.0/24"], &["192.168.3.0/24", "10.211.55.0/24"]).validate().is_ok());
    assert!(Config::default().validate().is_ok());
}
