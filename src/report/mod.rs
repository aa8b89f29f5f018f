//! Result aggregation and artifact rendering.
//!
//! Consumes the [`RunReport`]s produced by the schedulers and derives the
//! summary document (JSON), the raw per-flow delay samples (JSON input for a
//! box-plot front-end), and LaTeX tables. None of this feeds back into the
//! engine; it is a pure read of the accumulated metrics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sim::RunReport;

/// Fixed rendering order with the short names used by the LaTeX tables,
/// paired with the full labels the schedulers report under.
pub const DISCIPLINE_ORDER: &[(&str, &str)] = &[
    ("GPS", "GPS"),
    ("RR", "Round robin (RR)"),
    ("DRR", "Deficit round robin (DRR)"),
];

/// Summary for one discipline on one trace. JSON object keys are flow ids
/// (serialized as strings, in numeric order).
#[derive(Debug, Clone, Serialize)]
pub struct DisciplineSummary {
    pub time: f64,
    pub sent_bits_per_flow: BTreeMap<u64, f64>,
    pub throughput_per_flow: BTreeMap<u64, f64>,
    pub average_delay_per_flow: BTreeMap<u64, f64>,
    pub standard_deviation_per_flow: BTreeMap<u64, f64>,
}

impl DisciplineSummary {
    pub fn from_report(report: &RunReport) -> Self {
        let time = report.final_clock;
        let mut sent_bits_per_flow = BTreeMap::new();
        let mut throughput_per_flow = BTreeMap::new();
        let mut average_delay_per_flow = BTreeMap::new();
        let mut standard_deviation_per_flow = BTreeMap::new();
        for (flow, m) in &report.flows {
            sent_bits_per_flow.insert(*flow, m.sent_bits);
            throughput_per_flow.insert(*flow, m.sent_bits / time);
            average_delay_per_flow.insert(*flow, mean(&m.delays));
            standard_deviation_per_flow.insert(*flow, std_dev(&m.delays));
        }
        Self {
            time,
            sent_bits_per_flow,
            throughput_per_flow,
            average_delay_per_flow,
            standard_deviation_per_flow,
        }
    }
}

/// Raw per-flow delay samples for one discipline, in completion order.
#[derive(Debug, Clone, Serialize)]
pub struct RawDelays {
    pub packet_delays_per_flow: BTreeMap<u64, Vec<f64>>,
}

impl RawDelays {
    pub fn from_report(report: &RunReport) -> Self {
        let packet_delays_per_flow = report
            .flows
            .iter()
            .map(|(flow, m)| (*flow, m.delays.clone()))
            .collect();
        Self {
            packet_delays_per_flow,
        }
    }
}

/// trace file name -> discipline label -> summary
pub type ResultsDoc = BTreeMap<String, BTreeMap<String, DisciplineSummary>>;
/// trace file name -> discipline label -> raw delay samples
pub type RawDoc = BTreeMap<String, BTreeMap<String, RawDelays>>;

/// Arithmetic mean. The engine guarantees every registered flow completed
/// at least one packet, so empty input is a caller bug.
pub fn mean(xs: &[f64]) -> f64 {
    assert!(!xs.is_empty(), "mean of empty sample set");
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation (matching `numpy.std` defaults).
pub fn std_dev(xs: &[f64]) -> f64 {
    let m = mean(xs);
    let var = xs.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / xs.len() as f64;
    var.sqrt()
}

fn fmt_round4(x: f64) -> String {
    format!("{}", (x * 10_000.0).round() / 10_000.0)
}

fn fmt_round0(x: f64) -> String {
    format!("{}", x.round() as i64)
}

/// Render one LaTeX `tabular` per trace: flows as columns, three metric rows
/// (throughput, average delay, delay standard deviation) per discipline.
pub fn latex_tables(results: &ResultsDoc) -> String {
    // aligns continuation rows under the \multirow column
    const INDENT: &str = "                     ";
    let mut out = String::new();
    for (trace, disciplines) in results {
        let Some(first) = disciplines.values().next() else {
            continue;
        };
        let flow_ids: Vec<u64> = first.throughput_per_flow.keys().copied().collect();
        out.push_str(&format!("Trace: {trace}\n"));
        out.push_str(&format!(
            "\\begin{{tabular}}{{ll|{}|}}\n",
            "l".repeat(flow_ids.len())
        ));
        let header: Vec<String> = flow_ids.iter().map(|f| format!("Flow {f}")).collect();
        out.push_str(&format!("{INDENT}& & {} \\\\\n", header.join(" & ")));
        out.push_str(&format!("{INDENT}\\hline\n"));
        for (short, full) in DISCIPLINE_ORDER {
            let Some(summary) = disciplines.get(*full) else {
                continue;
            };
            out.push_str(&format!("{:<21}", format!("\\multirow{{3}}{{*}}{{{short}}} ")));
            let row = |values: &BTreeMap<u64, f64>, fmt: fn(f64) -> String| -> String {
                flow_ids
                    .iter()
                    .map(|f| fmt(values.get(f).copied().unwrap_or(0.0)))
                    .collect::<Vec<_>>()
                    .join(" & ")
            };
            out.push_str(&format!(
                "& Throughput & {} \\\\\n",
                row(&summary.throughput_per_flow, fmt_round4)
            ));
            out.push_str(&format!(
                "{INDENT}& Avg. Delay & {} \\\\\n",
                row(&summary.average_delay_per_flow, fmt_round0)
            ));
            out.push_str(&format!(
                "{INDENT}& Std. Dev. & {} \\\\\n",
                row(&summary.standard_deviation_per_flow, fmt_round0)
            ));
            out.push_str(&format!("{INDENT}\\hline\n"));
        }
        out.push_str("\\end{tabular}\n\n");
    }
    out
}
