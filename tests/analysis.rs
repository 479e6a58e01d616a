//! End-to-end checks of the DC analyzer on hand-built circuits.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use dcnet_core::components::{Component, PowerRating, Resistor, Switch, VoltageSource};
use dcnet_core::{analyze, AnalysisResult, DcNetError};

fn vsrc(id: &str, pos: &str, neg: &str, volts: f64) -> Component {
    Component::VoltageSource(VoltageSource::new(id, pos, neg, volts))
}

fn res(id: &str, a: &str, b: &str, ohms: f64, rating: PowerRating) -> Component {
    Component::Resistor(Resistor::new(id, a, b, ohms, rating))
}

fn switch(id: &str, a: &str, b: &str, is_open: bool) -> Component {
    Component::Switch(Switch::new(id, a, b, is_open))
}

fn ladder() -> Vec<Component> {
    vec![
        vsrc("V1", "1", "0", 9.0),
        res("R1", "1", "2", 1000.0, PowerRating::QuarterWatt),
        res("R2", "2", "0", 2000.0, PowerRating::QuarterWatt),
        res("R3", "2", "3", 500.0, PowerRating::EighthWatt),
        res("R4", "3", "0", 1000.0, PowerRating::QuarterWatt),
    ]
}

/// Net current leaving `node` through all incident branches.
fn net_current_out(components: &[Component], result: &AnalysisResult, node: &str) -> f64 {
    components
        .iter()
        .zip(&result.branch_results)
        .map(|(c, b)| {
            let i = b.current.unwrap_or(0.0);
            let mut out = 0.0;
            if c.start_node().as_str() == node {
                out += i;
            }
            if c.end_node().as_str() == node {
                out -= i;
            }
            out
        })
        .sum()
}

fn assert_kcl(components: &[Component], result: &AnalysisResult, ground: &str) {
    for nv in &result.node_voltages {
        if nv.node_id.as_str() == ground {
            continue;
        }
        let net = net_current_out(components, result, nv.node_id.as_str());
        assert_abs_diff_eq!(net, 0.0, epsilon = 1e-9);
    }
}

#[test]
fn single_resistor_across_source() {
    let components = vec![
        vsrc("V1", "1", "0", 9.0),
        res("R1", "1", "0", 1000.0, PowerRating::QuarterWatt),
    ];
    let result = analyze(&components, "0").unwrap();

    let r1 = result.branch("R1").unwrap();
    assert_relative_eq!(r1.current.unwrap(), 0.009, epsilon = 1e-12);
    assert_relative_eq!(r1.power.unwrap(), 0.081, epsilon = 1e-12);
    assert_eq!(r1.warning, None);
}

#[test]
fn eighth_watt_rating_not_exceeded() {
    let components = vec![
        vsrc("V1", "1", "0", 9.0),
        res("R1", "1", "0", 1000.0, PowerRating::EighthWatt),
    ];
    let result = analyze(&components, "0").unwrap();
    assert_eq!(result.branch("R1").unwrap().warning, None);
}

#[test]
fn overload_warning_reports_power_and_rating() {
    let components = vec![
        vsrc("V1", "1", "0", 12.0),
        res("R1", "1", "0", 100.0, PowerRating::OneWatt),
    ];
    let result = analyze(&components, "0").unwrap();
    let r1 = result.branch("R1").unwrap();
    assert_relative_eq!(r1.power.unwrap(), 1.44, epsilon = 1e-9);
    assert_eq!(
        r1.warning.as_deref(),
        Some("Thermal overload! Power (1.440W) > Rating (1W)")
    );
    assert!(result.has_warnings());
}

#[test]
fn missing_ground_is_a_configuration_error() {
    let components = ladder();
    let err = analyze(&components, "5").unwrap_err();
    assert!(matches!(err, DcNetError::GroundNodeNotFound { ref node } if node == "5"));
    assert!(err.to_string().contains("\"5\""));
}

#[test]
fn conflicting_parallel_sources_are_unsolvable() {
    let components = vec![
        vsrc("V1", "1", "0", 5.0),
        vsrc("V2", "1", "0", 6.0),
        res("R1", "1", "0", 100.0, PowerRating::OneWatt),
    ];
    let err = analyze(&components, "0").unwrap_err();
    assert!(matches!(err, DcNetError::UnsolvableCircuit));
}

#[test]
fn floating_subnetwork_is_unsolvable() {
    let components = vec![
        vsrc("V1", "1", "0", 5.0),
        res("R1", "1", "0", 100.0, PowerRating::OneWatt),
        res("R2", "a", "b", 100.0, PowerRating::OneWatt),
    ];
    assert!(matches!(
        analyze(&components, "0"),
        Err(DcNetError::UnsolvableCircuit)
    ));
}

#[test]
fn empty_circuit_succeeds() {
    let result = analyze(&[], "0").unwrap();
    assert!(result.node_voltages.is_empty());
    assert!(result.branch_results.is_empty());
}

#[test]
fn ladder_matches_hand_calculation() {
    let components = ladder();
    let result = analyze(&components, "0").unwrap();

    // R_total = 1k + 2k || (500 + 1k) = 13000/7 ohm
    assert_relative_eq!(result.voltage("1").unwrap(), 9.0, epsilon = 1e-9);
    assert_relative_eq!(result.voltage("2").unwrap(), 54.0 / 13.0, epsilon = 1e-9);
    assert_relative_eq!(result.voltage("3").unwrap(), 36.0 / 13.0, epsilon = 1e-9);

    let current = |id: &str| result.branch(id).unwrap().current.unwrap();
    assert_relative_eq!(current("R1"), 63.0 / 13000.0, epsilon = 1e-12);
    assert_relative_eq!(current("R2"), 27.0 / 13000.0, epsilon = 1e-12);
    assert_relative_eq!(current("R3"), 36.0 / 13000.0, epsilon = 1e-12);
    assert_relative_eq!(current("R4"), 36.0 / 13000.0, epsilon = 1e-12);
    assert_relative_eq!(current("V1"), -63.0 / 13000.0, epsilon = 1e-12);

    assert!(result.branch("V1").unwrap().power.is_none());
    assert!(!result.has_warnings());

    // Output order follows component order; ground listed first
    let ids: Vec<&str> = result
        .branch_results
        .iter()
        .map(|b| b.component_id.as_str())
        .collect();
    assert_eq!(ids, vec!["V1", "R1", "R2", "R3", "R4"]);
    let nodes: Vec<&str> = result
        .node_voltages
        .iter()
        .map(|n| n.node_id.as_str())
        .collect();
    assert_eq!(nodes, vec!["0", "1", "2", "3"]);
}

#[test]
fn ground_is_exactly_zero_for_any_reference() {
    let components = ladder();
    for ground in ["0", "1", "2", "3"] {
        let result = analyze(&components, ground).unwrap();
        assert_eq!(result.node_voltages[0].node_id.as_str(), ground);
        assert_eq!(result.voltage(ground), Some(0.0));
        assert_kcl(&components, &result, ground);
    }

    // Moving the reference shifts every voltage by the same amount
    let a = analyze(&components, "0").unwrap();
    let b = analyze(&components, "2").unwrap();
    let shift = a.voltage("2").unwrap();
    for node in ["0", "1", "3"] {
        assert_abs_diff_eq!(
            a.voltage(node).unwrap() - shift,
            b.voltage(node).unwrap(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn kcl_holds_with_multiple_sources_and_switches() {
    let components = vec![
        vsrc("V1", "a", "gnd", 12.0),
        vsrc("V2", "c", "gnd", -5.0),
        res("R1", "a", "b", 330.0, PowerRating::HalfWatt),
        res("R2", "b", "c", 470.0, PowerRating::HalfWatt),
        res("R3", "b", "gnd", 1000.0, PowerRating::QuarterWatt),
        switch("S1", "b", "d", false),
        res("R4", "d", "gnd", 220.0, PowerRating::OneWatt),
        switch("S2", "a", "c", true),
    ];
    let result = analyze(&components, "gnd").unwrap();
    assert_kcl(&components, &result, "gnd");

    // Source polarity: start node sits `voltage` above end node
    assert_relative_eq!(result.voltage("a").unwrap(), 12.0, epsilon = 1e-9);
    assert_relative_eq!(result.voltage("c").unwrap(), -5.0, epsilon = 1e-9);
}

#[test]
fn closed_switch_behaves_like_a_short() {
    let with_switch = vec![
        vsrc("V1", "1", "0", 10.0),
        res("R1", "1", "2", 1000.0, PowerRating::QuarterWatt),
        switch("S1", "2", "3", false),
        res("R2", "3", "0", 1000.0, PowerRating::QuarterWatt),
    ];
    let shorted = vec![
        vsrc("V1", "1", "0", 10.0),
        res("R1", "1", "2", 1000.0, PowerRating::QuarterWatt),
        res("R2", "2", "0", 1000.0, PowerRating::QuarterWatt),
    ];

    let a = analyze(&with_switch, "0").unwrap();
    let b = analyze(&shorted, "0").unwrap();
    assert_abs_diff_eq!(a.voltage("2").unwrap(), b.voltage("2").unwrap(), epsilon = 1e-4);
    assert_abs_diff_eq!(a.voltage("3").unwrap(), b.voltage("2").unwrap(), epsilon = 1e-4);

    // Closed switches get current and power but never a thermal warning
    let s1 = a.branch("S1").unwrap();
    assert!(s1.current.is_some() && s1.power.is_some());
    assert!(s1.warning.is_none());
}

#[test]
fn open_switch_behaves_like_a_removed_branch() {
    let with_switch = vec![
        vsrc("V1", "1", "0", 10.0),
        res("R1", "1", "2", 1000.0, PowerRating::QuarterWatt),
        res("R2", "2", "0", 1000.0, PowerRating::QuarterWatt),
        switch("S1", "2", "3", true),
        res("R3", "3", "0", 100.0, PowerRating::QuarterWatt),
    ];
    let removed = vec![
        vsrc("V1", "1", "0", 10.0),
        res("R1", "1", "2", 1000.0, PowerRating::QuarterWatt),
        res("R2", "2", "0", 1000.0, PowerRating::QuarterWatt),
    ];

    let a = analyze(&with_switch, "0").unwrap();
    let b = analyze(&removed, "0").unwrap();
    assert_abs_diff_eq!(a.voltage("2").unwrap(), b.voltage("2").unwrap(), epsilon = 1e-4);
    assert_abs_diff_eq!(a.branch("S1").unwrap().current.unwrap(), 0.0, epsilon = 1e-8);
}

#[test]
fn self_loop_branches_carry_nothing() {
    let components = vec![
        vsrc("V1", "1", "0", 9.0),
        res("R1", "1", "0", 1000.0, PowerRating::QuarterWatt),
        res("R2", "1", "1", 47.0, PowerRating::EighthWatt),
        switch("S1", "0", "0", false),
    ];
    let result = analyze(&components, "0").unwrap();

    assert_relative_eq!(result.voltage("1").unwrap(), 9.0, epsilon = 1e-12);
    assert_relative_eq!(result.branch("R1").unwrap().current.unwrap(), 9e-3, epsilon = 1e-12);
    for id in ["R2", "S1"] {
        let b = result.branch(id).unwrap();
        assert_eq!(b.current, Some(0.0));
        assert_eq!(b.power, Some(0.0));
        assert!(b.warning.is_none());
    }
    assert_kcl(&components, &result, "0");
}

#[test]
fn same_node_source_keeps_last_stamp() {
    // The -1 entry overwrites the +1 entry, leaving -V(1) = 5
    let components = vec![
        vsrc("V1", "1", "1", 5.0),
        res("R1", "1", "0", 100.0, PowerRating::OneWatt),
    ];
    let result = analyze(&components, "0").unwrap();

    assert_relative_eq!(result.voltage("1").unwrap(), -5.0, epsilon = 1e-12);
    assert_relative_eq!(result.branch("R1").unwrap().current.unwrap(), -0.05, epsilon = 1e-12);
    assert_relative_eq!(result.branch("V1").unwrap().current.unwrap(), -0.05, epsilon = 1e-12);
    assert!(result.branch("V1").unwrap().power.is_none());
}

#[test]
fn analysis_is_idempotent() {
    let components = ladder();
    let first = analyze(&components, "0").unwrap();
    let second = analyze(&components, "0").unwrap();
    assert_eq!(first, second);
}

#[test]
fn engine_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Component>();
    assert_send_sync::<AnalysisResult>();
    assert_send_sync::<DcNetError>();

    let components = ladder();
    let handle = std::thread::spawn(move || analyze(&components, "0").map(|r| r.voltage("3")));
    let v3 = handle.join().unwrap().unwrap().unwrap();
    assert_relative_eq!(v3, 36.0 / 13.0, epsilon = 1e-9);
}
