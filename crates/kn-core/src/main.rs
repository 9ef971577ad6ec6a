//! kn-core CLI - availability and redundancy planning.
//!
//! Two commands over the engine's call surface:
//! - `solve`: steady-state uptime plus the birth-death diagram data
//! - `optimize`: grid search for the cost-minimizing (n, r)
//!
//! Payloads go to stdout (JSON by default); logs go to stderr.

use clap::{Args, Parser, Subcommand};
use kn_common::{OutputFormat, Result, StructuredError};
use kn_core::exit_codes::ExitCode;
use kn_core::logging::init_logging;
use kn_core::model::{StandbyMode, SystemConfig};
use kn_core::optimize::{optimize, CostWeights, OptimalResult};
use kn_core::solver::{solve, SolveOutcome};
use kn_core::TransitionEdge;
use serde::Serialize;

/// Steady-state availability of k-out-of-n repairable systems
#[derive(Parser)]
#[command(name = "kn-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// System parameters shared by both commands
#[derive(Args, Debug)]
struct SystemArgs {
    /// Per-component failure rate (lambda, > 0)
    #[arg(long, allow_negative_numbers = true)]
    failure_rate: f64,

    /// Per-repairman repair rate (mu, > 0)
    #[arg(long, allow_negative_numbers = true)]
    repair_rate: f64,

    /// Total number of components (n)
    #[arg(short = 'n', long)]
    components: u32,

    /// Working components required for the system to be up (k)
    #[arg(short = 'k', long)]
    threshold: u32,

    /// Number of repairmen (r)
    #[arg(short = 'r', long)]
    repairmen: u32,

    /// Standby mode for idle components
    #[arg(long, value_enum, default_value_t = StandbyMode::Warm)]
    standby: StandbyMode,
}

impl SystemArgs {
    fn to_config(&self) -> Result<SystemConfig> {
        SystemConfig::new(
            self.failure_rate,
            self.repair_rate,
            self.components,
            self.threshold,
            self.repairmen,
            self.standby,
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute steady-state uptime for one configuration
    Solve {
        #[command(flatten)]
        system: SystemArgs,
    },

    /// Find the cost-minimizing (n, r) over candidate grids
    Optimize {
        #[command(flatten)]
        system: SystemArgs,

        /// Candidate component counts, comma-separated (e.g. 2,3,4)
        #[arg(long, value_delimiter = ',', required = true)]
        n_values: Vec<u32>,

        /// Candidate repairman counts, comma-separated (e.g. 1,2)
        #[arg(long, value_delimiter = ',', required = true)]
        r_values: Vec<u32>,

        /// Cost per installed component
        #[arg(long)]
        cost_component: f64,

        /// Cost per staffed repairman
        #[arg(long)]
        cost_repairman: f64,

        /// Downtime cost, weighted by the unavailable fraction
        #[arg(long)]
        cost_downtime: f64,
    },
}

/// One node of the birth-death diagram.
#[derive(Serialize)]
struct StateNode {
    /// Failed-component count.
    state: usize,
    working: u32,
    up: bool,
}

/// Diagram data for the presentation layer: nodes plus directed
/// failure/repair edges taken straight from the solved generator.
#[derive(Serialize)]
struct Diagram {
    nodes: Vec<StateNode>,
    edges: Vec<TransitionEdge>,
}

#[derive(Serialize)]
struct SolveReport {
    config: SystemConfig,
    uptime: f64,
    stationary: Vec<f64>,
    diagram: Diagram,
}

impl SolveReport {
    fn new(config: SystemConfig, outcome: &SolveOutcome) -> Self {
        let nodes = (0..outcome.generator.states())
            .map(|state| StateNode {
                state,
                working: config.n - state as u32,
                up: outcome.generator.is_up(state),
            })
            .collect();
        Self {
            config,
            uptime: outcome.uptime,
            stationary: outcome.stationary.clone(),
            diagram: Diagram {
                nodes,
                edges: outcome.generator.edges(),
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose, cli.global.quiet);
    let format = cli.global.format;

    if let Err(err) = run(cli) {
        match serde_json::to_string(&StructuredError::from(&err)) {
            Ok(json) if format == OutputFormat::Json => eprintln!("{json}"),
            _ => eprintln!("✗ {}\n  Reason: {err}\n  Fix: {}", err.headline(), err.remediation()),
        }
        std::process::exit(ExitCode::from(&err).into());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Solve { system } => {
            let config = system.to_config()?;
            let outcome = solve(&config)?;
            match cli.global.format {
                OutputFormat::Json => {
                    let report = SolveReport::new(config, &outcome);
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Summary => {
                    println!(
                        "uptime={:.6} n={} k={} r={} standby={}",
                        outcome.uptime, config.n, config.k, config.r, config.standby
                    );
                }
            }
        }
        Commands::Optimize {
            system,
            n_values,
            r_values,
            cost_component,
            cost_repairman,
            cost_downtime,
        } => {
            let base = system.to_config()?;
            let costs = CostWeights {
                component: cost_component,
                repairman: cost_repairman,
                downtime: cost_downtime,
            };
            let result = optimize(&base, &n_values, &r_values, &costs)?;
            match cli.global.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                OutputFormat::Summary => print_optimize_summary(&result),
            }
        }
    }
    Ok(())
}

fn print_optimize_summary(result: &OptimalResult) {
    println!(
        "best n={} r={} uptime={:.6} cost={:.4} (evaluated={} skipped={})",
        result.best.n,
        result.best.r,
        result.best.uptime,
        result.best.expected_cost,
        result.records.len(),
        result.skipped.len()
    );
    for skip in &result.skipped {
        println!("skipped n={} r={}: {}", skip.n, skip.r, skip.reason);
    }
}
