use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rquad::{IntegrationConfig, Integrator, QuadError, Rule, pretty_integration_result};

#[derive(Parser, Debug)]
#[command(
    name = "rquad",
    version,
    about = "Approximate a definite integral with a fixed-step quadrature rule"
)]
struct Args {
    /// Formula in x, e.g. "2*x^3 - 5*x^2 - 4"
    #[arg(required_unless_present = "config")]
    formula: Option<String>,
    /// Lower bound
    #[arg(long, allow_hyphen_values = true, required_unless_present = "config")]
    start: Option<f64>,
    /// Upper bound
    #[arg(long, allow_hyphen_values = true, required_unless_present = "config")]
    end: Option<f64>,
    /// Number of subintervals
    #[arg(short = 'n', long, default_value_t = 1000)]
    intervals: usize,
    /// left, right, midpoint, trapezoidal or simpson
    #[arg(short, long, default_value = "trapezoidal")]
    rule: Rule,
    /// Run every rule on the same job
    #[arg(long, conflicts_with = "rule")]
    all: bool,
    /// Read jobs from a JSON file instead of the command line
    #[arg(long, conflicts_with_all = ["formula", "start", "end"])]
    config: Option<PathBuf>,
    /// Print the parsed formula and parameters with each result
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

// Ok(false) when at least one job failed after the others were reported.
fn run(args: &Args) -> Result<bool, QuadError> {
    let jobs = match &args.config {
        Some(path) => IntegrationConfig::from_path(path)?,
        None => command_line_jobs(args),
    };

    let mut all_ok = true;
    for job in &jobs {
        let integrator = match job.build() {
            Ok(integrator) => integrator,
            Err(err) if args.all && matches!(err, QuadError::Configuration(_)) => {
                println!("{}: skipped ({err})", job.rule);
                continue;
            }
            Err(err) => return Err(err),
        };
        all_ok &= report(&integrator, args.verbose, jobs.len() > 1);
    }
    Ok(all_ok)
}

fn command_line_jobs(args: &Args) -> Vec<IntegrationConfig> {
    let rules: Vec<Rule> = if args.all {
        Rule::ALL.to_vec()
    } else {
        vec![args.rule]
    };
    // clap guarantees these are present without --config.
    let formula = args.formula.clone().unwrap_or_default();
    let start = args.start.unwrap_or_default();
    let end = args.end.unwrap_or_default();

    rules
        .into_iter()
        .map(|rule| IntegrationConfig {
            rule,
            start,
            end,
            intervals: args.intervals,
            formula: formula.clone(),
        })
        .collect()
}

fn report(integrator: &Integrator, verbose: bool, labelled: bool) -> bool {
    let result = integrator.integrate();
    if verbose {
        for line in pretty_integration_result(integrator, &result) {
            println!("{line}");
        }
        return result.is_ok();
    }
    match &result {
        Ok(value) if labelled => println!("{}: {value}", integrator.rule()),
        Ok(value) => println!("{value}"),
        Err(err) => eprintln!("{}: {err}", integrator.rule()),
    }
    result.is_ok()
}
