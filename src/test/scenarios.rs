//! Cross-discipline properties: the three schedulers must agree on work
//! conservation, sample counts, and clock bounds for any shared input.

use crate::sched::{Drr, Gps, RoundRobin, Scheduler};
use crate::sim::{Packet, RunReport};

fn arrivals(specs: &[(u64, f64, f64)]) -> Vec<Packet> {
    specs
        .iter()
        .map(|&(flow, size, t)| Packet::new(flow, size, t))
        .collect()
}

fn run_all(specs: &[(u64, f64, f64)], capacity: f64, quantum: f64) -> Vec<(&'static str, RunReport)> {
    let mut gps = Gps::new(arrivals(specs), capacity).expect("valid config");
    let mut rr = RoundRobin::new(arrivals(specs), capacity).expect("valid config");
    let mut drr = Drr::new(arrivals(specs), capacity, quantum).expect("valid config");
    gps.run();
    rr.run();
    drr.run();
    vec![
        (gps.label(), gps.into_report()),
        (rr.label(), rr.into_report()),
        (drr.label(), drr.into_report()),
    ]
}

#[test]
fn every_discipline_sends_every_packet_exactly_once() {
    let specs = [
        (0, 100.0, 0.0),
        (1, 50.0, 0.0),
        (0, 25.0, 10.0),
        (2, 75.0, 12.0),
        (1, 5.0, 60.0),
        (2, 10.0, 60.0),
    ];
    let total: f64 = specs.iter().map(|(_, size, _)| size).sum();
    let max_arrival = 60.0;

    for (label, report) in run_all(&specs, 2.0, 500.0) {
        assert!(
            (report.total_sent_bits() - total).abs() < 1e-9,
            "{label}: sent {} of {total}",
            report.total_sent_bits()
        );
        assert_eq!(report.flow(0).expect("flow 0").delays.len(), 2, "{label}");
        assert_eq!(report.flow(1).expect("flow 1").delays.len(), 2, "{label}");
        assert_eq!(report.flow(2).expect("flow 2").delays.len(), 2, "{label}");
        assert!(report.final_clock >= max_arrival, "{label}");
        for (flow, m) in &report.flows {
            for d in &m.delays {
                assert!(*d >= -1e-9, "{label}: structurally negative delay {d} on flow {flow}");
            }
        }
    }
}

#[test]
fn all_disciplines_start_the_clock_at_the_first_arrival() {
    for (label, report) in run_all(&[(0, 10.0, 7.0)], 1.0, 500.0) {
        assert_eq!(report.final_clock, 17.0, "{label}");
        assert_eq!(report.flow(0).expect("flow 0").delays, vec![0.0], "{label}");
    }
}

#[test]
fn concrete_two_flow_scenario_matches_worked_example() {
    let specs = [(0, 100.0, 0.0), (1, 100.0, 0.0)];
    for (label, report) in run_all(&specs, 1.0, 500.0) {
        assert_eq!(report.final_clock, 200.0, "{label}");
        let d0 = &report.flow(0).expect("flow 0").delays;
        let d1 = &report.flow(1).expect("flow 1").delays;
        match label {
            "GPS" => {
                assert_eq!(d0, &vec![99.0]);
                assert_eq!(d1, &vec![100.0]);
            }
            _ => {
                assert_eq!(d0, &vec![0.0], "{label}");
                assert_eq!(d1, &vec![100.0], "{label}");
            }
        }
    }
}

#[test]
fn gps_average_delays_converge_for_symmetric_flows() {
    // Two flows, ten equal packets each, all arriving together: unit-quantized
    // GPS keeps the flows' mean delays within one serialization unit.
    let mut specs = Vec::new();
    for _ in 0..10 {
        specs.push((0, 10.0, 0.0));
        specs.push((1, 10.0, 0.0));
    }
    let capacity = 1.0;
    let mut gps = Gps::new(arrivals(&specs), capacity).expect("valid config");
    gps.run();
    let report = gps.into_report();

    let mean = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
    let m0 = mean(&report.flow(0).expect("flow 0").delays);
    let m1 = mean(&report.flow(1).expect("flow 1").delays);
    assert!(
        (m0 - m1).abs() <= 1.0 / capacity + 1e-9,
        "mean delays diverged: {m0} vs {m1}"
    );
}

#[test]
fn late_lone_arrival_completes_at_arrival_plus_serialization_time() {
    let specs = [(1, 50.0, 0.0), (0, 100.0, 1000.0)];
    for (label, report) in run_all(&specs, 1.0, 500.0) {
        assert_eq!(report.final_clock, 1100.0, "{label}");
        assert_eq!(report.flow(0).expect("flow 0").delays, vec![0.0], "{label}");
    }
}
