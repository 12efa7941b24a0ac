#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use statline_core::{
    CounterTable, MetricKey, ReductionKind, ReductionMask, Registry, ResultTable, Window,
};

#[test]
fn peak_rate_implies_rate() {
    let mask = ReductionMask::from(ReductionKind::PeakRate).normalized();
    assert!(mask.contains(ReductionKind::Rate));
    assert!(mask.contains(ReductionKind::PeakRate));
    assert_eq!(
        mask.kinds().collect::<Vec<_>>(),
        vec![ReductionKind::Rate, ReductionKind::PeakRate]
    );
}

#[test]
fn value_is_exclusive() {
    let mask: ReductionMask = [ReductionKind::Sum, ReductionKind::Value, ReductionKind::PeakRate]
        .into_iter()
        .collect();
    assert_eq!(mask.normalized(), ReductionMask::from(ReductionKind::Value));
}

#[test]
fn empty_group_or_name_rejected() {
    let mut reg = Registry::new();
    let err = reg
        .register(MetricKey::new("", "c").with(ReductionKind::Sum))
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_KEY");

    let err = reg
        .register(MetricKey::new("g", "").with(ReductionKind::Sum))
        .expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_KEY");
    assert_eq!(reg.groups().count(), 0);
}

#[test]
fn first_registration_fixes_mask() {
    let mut reg = Registry::new();
    assert!(reg
        .register(MetricKey::new("g", "c").with(ReductionKind::Sum))
        .unwrap()
        .is_some());
    assert!(reg
        .register(MetricKey::new("g", "c").with(ReductionKind::Rate))
        .unwrap()
        .is_none());

    let key = reg.key("g", "c").unwrap();
    assert_eq!(key.mask, ReductionMask::from(ReductionKind::Sum));
    assert!(reg.names("g", ReductionKind::Rate).is_empty());
    assert_eq!(reg.names("g", ReductionKind::Sum), vec!["c"]);
}

#[test]
fn names_and_groups_sorted() {
    let mut reg = Registry::new();
    for (g, n) in [("net", "tx"), ("cpu", "user"), ("net", "rx"), ("net", "err")] {
        reg.register(MetricKey::new(g, n).with(ReductionKind::Rate)).unwrap();
    }
    assert_eq!(reg.groups().collect::<Vec<_>>(), vec!["cpu", "net"]);
    assert_eq!(reg.names("net", ReductionKind::Rate), vec!["err", "rx", "tx"]);
}

#[test]
fn result_tables_typed_by_kind() {
    let mut reg = Registry::new();
    reg.register(
        MetricKey::new("g", "c")
            .with(ReductionKind::PeakRate)
            .with(ReductionKind::Sum),
    )
    .unwrap();

    assert!(matches!(reg.results("g", ReductionKind::Rate), Some(ResultTable::Float(_))));
    assert!(matches!(reg.results("g", ReductionKind::PeakRate), Some(ResultTable::Float(_))));
    assert!(matches!(reg.results("g", ReductionKind::Sum), Some(ResultTable::Int(_))));
    assert!(reg.results("g", ReductionKind::Value).is_none());
}

#[test]
fn display_names_and_watch_series() {
    let mut reg = Registry::new();
    reg.register(
        MetricKey::new("auth", "login")
            .with(ReductionKind::Rate)
            .with(ReductionKind::Sum)
            .display_as(ReductionKind::Rate, "log"),
    )
    .unwrap();

    let key = reg.key("auth", "login").unwrap();
    assert_eq!(key.display_name(ReductionKind::Rate), "log");
    assert_eq!(key.display_name(ReductionKind::Sum), "login_sum");

    // Created at registration, empty until the first tick.
    assert!(reg.series("auth", "log").unwrap().is_empty());
    assert!(reg.series("auth", "login_sum").unwrap().is_empty());
    assert!(reg.series("auth", "login_qps").is_none());
}

#[test]
fn structured_before_first_tick_has_empty_tables() {
    let mut reg = Registry::new();
    reg.register(MetricKey::new("g", "c").with(ReductionKind::Sum)).unwrap();
    let s = reg.structured();
    assert!(s["g"]["sum"].is_empty());
}

#[test]
fn degenerate_window_changes_nothing() {
    let mut reg = Registry::new();
    let mut current = CounterTable::new();
    reg.register(MetricKey::new("g", "c").with(ReductionKind::Rate)).unwrap();
    current.declare("g", "c", false);
    current.apply("g", "c", 10).unwrap();

    let previous = CounterTable::new();
    let out = reg.reduce(&Window {
        tick_start: &current,
        previous: &previous,
        elapsed_secs: 0.0,
    });
    assert!(out.is_none());
    assert!(reg.result("g", ReductionKind::Rate, "c").is_none());
    assert!(reg.series("g", "c_qps").unwrap().is_empty());
}

#[test]
fn late_registration_joins_next_tick() {
    let mut reg = Registry::new();
    let mut current = CounterTable::new();
    let previous = CounterTable::new();
    reg.register(MetricKey::new("g", "a").with(ReductionKind::Sum)).unwrap();
    current.declare("g", "a", false);

    reg.reduce(&Window {
        tick_start: &current,
        previous: &previous,
        elapsed_secs: 1.0,
    })
    .unwrap();

    reg.register(MetricKey::new("g", "b").with(ReductionKind::Sum)).unwrap();
    current.declare("g", "b", false);
    current.apply("g", "b", 4).unwrap();

    let lines = reg
        .reduce(&Window {
            tick_start: &current,
            previous: &previous,
            elapsed_secs: 1.0,
        })
        .unwrap();
    assert_eq!(lines[0].line, "g: a_sum=0, b_sum=4");
}

#[test]
fn watch_disabled_records_nothing() {
    let mut reg = Registry::new().with_watch(false);
    let mut current = CounterTable::new();
    reg.register(MetricKey::new("g", "c").with(ReductionKind::Sum)).unwrap();
    current.declare("g", "c", false);

    reg.reduce(&Window {
        tick_start: &current,
        previous: &CounterTable::new(),
        elapsed_secs: 1.0,
    })
    .unwrap();
    assert!(reg.series("g", "c_sum").unwrap().is_empty());
    assert!(reg.result("g", ReductionKind::Sum, "c").is_some());
}

#[test]
fn unregistered_counter_fault() {
    let mut current = CounterTable::new();
    current.declare("g", "c", false);
    let err = current.apply("g", "nope", 1).expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNREGISTERED_KEY");
    assert_eq!(current.get("g", "c"), 0);
}

#[test]
fn gauge_overwrites_counter_accumulates() {
    let mut t = CounterTable::new();
    t.declare("g", "v", true);
    t.declare("g", "c", false);
    for x in [10, 3] {
        t.apply("g", "v", x).unwrap();
        t.apply("g", "c", x).unwrap();
    }
    assert_eq!(t.get("g", "v"), 3);
    assert_eq!(t.get("g", "c"), 13);

    // Re-declaring keeps the accumulated value.
    t.declare("g", "c", false);
    assert_eq!(t.get("g", "c"), 13);
}
