#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use fluxrpc_core::FluxError;
use fluxrpc_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
pools:
  - name: "default"
    capacityy: 8 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, FluxError::Config(_)));
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
pools:
  - name: "default"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.default_pool, "default");
    assert_eq!(cfg.pools[0].capacity, 64);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
server:
  default_pool: "general"
pools:
  - name: "general"
    capacity: 32
  - name: "bulk"
    capacity: 4
routes:
  - method: "report.run"
    pool: "bulk"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.pools.len(), 2);
    assert_eq!(cfg.routes[0].pool, "bulk");
}

#[test]
fn rejects_bad_version() {
    let bad = r#"
version: 2
pools:
  - name: "default"
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_empty_pools() {
    let bad = "version: 1\n";
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_out_of_range_capacity() {
    let bad = r#"
version: 1
pools:
  - name: "default"
    capacity: 0
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_duplicate_pool_names() {
    let bad = r#"
version: 1
pools:
  - name: "default"
  - name: "default"
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_route_to_undeclared_pool() {
    let bad = r#"
version: 1
pools:
  - name: "default"
routes:
  - method: "user.get"
    pool: "nope"
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_undeclared_default_pool() {
    let bad = r#"
version: 1
server:
  default_pool: "nope"
pools:
  - name: "default"
"#;
    config::load_from_str(bad).expect_err("must fail");
}

#[test]
fn rejects_duplicate_route_methods() {
    let bad = r#"
version: 1
pools:
  - name: "default"
routes:
  - method: "user.get"
    pool: "default"
  - method: "user.get"
    pool: "default"
"#;
    config::load_from_str(bad).expect_err("must fail");
}
