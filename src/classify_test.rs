use std::collections::BTreeSet;

use crate::classify::{covered_indices, half_default_routes, is_local_route, uncovered, HALF_DEFAULTS};
use crate::prefix::{Destination, NetworkPrefix};
use crate::test_util::{net, v4, v6};

fn local_v4() -> Vec<NetworkPrefix> {
    vec![net("192.168.1.0/24"), net("192.168.2.0/24"), net("10.211.55.0/24")]
}

fn local_v6() -> Vec<NetworkPrefix> {
    vec![net("2001:db8:1::/64")]
}

fn is_local(dst: &str) -> bool {
    is_local_route(&Destination::parse(dst), &local_v4(), &local_v6())
}

#[test]
fn local_routes() {
    assert!(is_local("192.168.1.0/24"));
    assert!(is_local("192.168.2.128/25"));
    assert!(is_local("10.211.55.5/32"));
    assert!(is_local("10.211.55.5"));
    assert!(is_local("2001:db8:1::42/128"));
}

#[test]
fn non_local_routes() {
    assert!(!is_local("192.168.0.0/16"));
    assert!(!is_local("192.168.3.0/24"));
    assert!(!is_local("8.8.8.8/32"));
    assert!(!is_local("2001:db8:2::/64"));
    assert!(!is_local("2001:db8::/32"));
}

#[test]
fn default_is_never_local() {
    let everything = vec![net("0.0.0.0/0")];
    let everything_v6 = vec![net("::/0")];
    assert!(!is_local_route(&Destination::parse("default"), &everything, &everything_v6));
    assert!(!is_local_route(&Destination::Default, &local_v4(), &local_v6()));
}

#[test]
fn unparsable_is_never_local() {
    assert!(!is_local(""));
    assert!(!is_local("192.168.1"));
    assert!(!is_local("link#14"));
}

#[test]
fn families_never_mix() {
    // Only IPv6 networks registered, IPv4 routes can't match and vice versa.
    assert!(!is_local_route(&Destination::parse("10.0.0.1/32"), &[], &[net("::/0")]));
    assert!(!is_local_route(&Destination::parse("::1/128"), &[net("0.0.0.0/0")], &[]));
}

#[test]
fn no_local_ipv6_means_no_local_ipv6_routes() {
    for dst in ["2001:db8:1::/64", "::/1", "fd00::1/128", "::/0"] {
        assert!(!is_local_route(&Destination::parse(dst), &local_v4(), &[]), "{dst}");
    }
}

#[test]
fn covered_by_gateway_networks() {
    let gateway = vec![net("192.168.1.0/24")];
    let routes = vec![v4("192.168.1.0/24", "utun3"), v4("10.211.55.5/32", "utun3")];
    assert_eq!(covered_indices(&routes, &gateway), BTreeSet::from([0]));
}

#[test]
fn covered_by_narrower_routes() {
    let networks = local_v4();
    let routes = vec![v4("192.168.2.17/32", "utun3"), v4("10.211.55.0/25", "utun3")];
    assert_eq!(covered_indices(&routes, &networks), BTreeSet::from([1, 2]));
    assert_eq!(uncovered(&networks, &BTreeSet::from([1, 2])), vec![net("192.168.1.0/24")]);
}

#[test]
fn covered_skips_wider_and_unparsable_routes() {
    let routes = vec![v4("192.0.0.0/3", "utun3"), v4("default", "utun3"), v4("garbage", "utun3")];
    assert!(covered_indices(&routes, &local_v4()).is_empty());
}

#[test]
fn covered_never_crosses_families() {
    let networks = vec![net("0.0.0.0/0"), net("::/0")];
    assert_eq!(covered_indices(&[v6("2001:db8::/64", "utun3")], &networks), BTreeSet::from([1]));
    assert_eq!(covered_indices(&[v4("10.0.0.0/8", "utun3")], &networks), BTreeSet::from([0]));
}

#[test]
fn half_default_constants() {
    assert_eq!(HALF_DEFAULTS, [net("::/1"), net("8000::/1")]);
}

#[test]
fn half_defaults_require_exact_match() {
    let routes = vec![
        v6("::/1", "utun3"),
        v6("8000::/1", "utun3"),
        v6("4000::/2", "utun3"),
        v6("::/0", "utun3"),
        v6("default", "utun3"),
        v4("0.0.0.0/1", "utun3"),
    ];
    let found: Vec<String> = half_default_routes(&routes).into_iter().map(|route| route.dst).collect();
    assert_eq!(found, vec!["::/1", "8000::/1"]);
}

#[test]
fn half_defaults_ignore_ipv4_table() {
    // Tagged by the table it came from, not by the parsed address.
    assert!(half_default_routes(&[v4("::/1", "utun3")]).is_empty());
}
