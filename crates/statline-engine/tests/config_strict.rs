#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use statline_core::{ReductionKind, ReductionMask};
use statline_engine::config::{self, QUEUE_CAPACITY_FLOOR};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
engine:
  interval_ms: 1000
keys:
  - group: "auth"
    name: "login"
    kindz: [rate] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.engine.interval_ms, 1000);
    assert_eq!(cfg.engine.signal_capacity, 10);
    assert!(cfg.engine.watch);
    assert!(cfg.keys.is_empty());
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn interval_out_of_range() {
    let bad = r#"
version: 1
engine:
  interval_ms: 5
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "BAD_CONFIG");
}

#[test]
fn queue_capacity_floor_applied() {
    let cfg = config::load_from_str(
        r#"
version: 1
engine:
  queue_capacity: 16
"#,
    )
    .unwrap();
    assert_eq!(cfg.engine.effective_queue_capacity(), QUEUE_CAPACITY_FLOOR);

    let cfg = config::load_from_str(
        r#"
version: 1
engine:
  queue_capacity: 50000
"#,
    )
    .unwrap();
    assert_eq!(cfg.engine.effective_queue_capacity(), 50_000);
}

#[test]
fn keys_become_metric_keys() {
    let cfg = config::load_from_str(
        r#"
version: 1
keys:
  - group: auth
    name: login
    kinds: [rate, sum]
    display: { rate: log, sum: LOGIN }
  - group: gateway
    name: close
    kinds: [peak_rate]
"#,
    )
    .unwrap();

    let keys = cfg.metric_keys();
    assert_eq!(keys.len(), 2);
    assert_eq!(
        keys[0].mask,
        ReductionMask::from(ReductionKind::Rate).with(ReductionKind::Sum)
    );
    assert_eq!(keys[0].display_name(ReductionKind::Rate), "log");
    assert_eq!(keys[0].display_name(ReductionKind::Sum), "LOGIN");
    assert_eq!(keys[1].display_name(ReductionKind::PeakRate), "close_qpk");
}

#[test]
fn key_without_name_rejected() {
    let bad = r#"
version: 1
keys:
  - group: auth
    name: ""
    kinds: [sum]
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_KEY");
}
