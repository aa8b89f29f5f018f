use clap::Parser;
use fqsim_rs::report::{DisciplineSummary, RawDelays, RawDoc, ResultsDoc, latex_tables};
use fqsim_rs::sched::{DEFAULT_QUANTUM, DeficitPolicy, Drr, Gps, RoundRobin, Scheduler};
use fqsim_rs::sim::RunReport;
use fqsim_rs::trace::{find_traces, load_trace};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "trace-sim",
    about = "Replay packet arrival traces through GPS/RR/DRR link schedulers"
)]
struct Args {
    /// Directory containing trace files
    #[arg(long, default_value = "traces")]
    traces: PathBuf,

    /// Link capacity in service units per time unit
    #[arg(long, default_value_t = 1.0)]
    capacity: f64,

    /// DRR quantum in service units (should be >= the largest packet size)
    #[arg(long, default_value_t = DEFAULT_QUANTUM)]
    quantum: f64,

    /// DRR deficit handling on queue drain: reset-on-empty or retain
    #[arg(long, default_value = "reset-on-empty")]
    deficit_policy: String,

    /// Output summary JSON file
    #[arg(long)]
    results_json: Option<PathBuf>,

    /// Output raw per-flow delay samples JSON (box-plot front-end input)
    #[arg(long)]
    raw_json: Option<PathBuf>,

    /// Output LaTeX tables file
    #[arg(long)]
    latex: Option<PathBuf>,
}

fn parse_policy(raw: &str) -> DeficitPolicy {
    match raw {
        "retain" => DeficitPolicy::Retain,
        _ => DeficitPolicy::ResetOnEmpty,
    }
}

fn run_one<S: Scheduler>(mut sched: S) -> (&'static str, RunReport) {
    let label = sched.label();
    sched.run();
    (label, sched.into_report())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let policy = parse_policy(&args.deficit_policy);

    let traces = find_traces(&args.traces).expect("list trace files");
    info!(dir = %args.traces.display(), count = traces.len(), "发现轨迹文件");

    let mut results: ResultsDoc = ResultsDoc::new();
    let mut raw: RawDoc = RawDoc::new();

    for path in traces {
        let name = path
            .file_name()
            .expect("trace path has a file name")
            .to_string_lossy()
            .into_owned();
        info!(trace = %name, "📄 加载轨迹文件");
        let arrivals = load_trace(&path).expect("parse trace file");
        debug!(packets = arrivals.len(), "轨迹解析完成");

        let runs = vec![
            run_one(Gps::new(arrivals.clone(), args.capacity).expect("configure GPS")),
            run_one(RoundRobin::new(arrivals.clone(), args.capacity).expect("configure RR")),
            run_one(
                Drr::with_policy(arrivals.clone(), args.capacity, args.quantum, policy)
                    .expect("configure DRR"),
            ),
        ];

        for (label, report) in runs {
            println!(
                "trace={} discipline={:?} final_clock={} packets={} sent_bits={}",
                name,
                label,
                report.final_clock,
                report.total_packets(),
                report.total_sent_bits()
            );
            raw.entry(name.clone())
                .or_default()
                .insert(label.to_string(), RawDelays::from_report(&report));
            results
                .entry(name.clone())
                .or_default()
                .insert(label.to_string(), DisciplineSummary::from_report(&report));
        }
    }

    if let Some(path) = &args.results_json {
        let json = serde_json::to_string_pretty(&results).expect("serialize results");
        fs::write(path, json).expect("write results json");
        info!(path = %path.display(), "✅ 已写出汇总结果");
    }

    if let Some(path) = &args.raw_json {
        let json = serde_json::to_string_pretty(&raw).expect("serialize raw delays");
        fs::write(path, json).expect("write raw delays json");
        info!(path = %path.display(), "✅ 已写出逐包时延样本");
    }

    if let Some(path) = &args.latex {
        fs::write(path, latex_tables(&results)).expect("write latex tables");
        info!(path = %path.display(), "✅ 已写出 LaTeX 表格");
    }
}
