use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::debug;

use trapezoid::configuration::Configuration;
use trapezoid::integrationproblem::IntegrationProblem;
use trapezoid::manager::manager::IManager;
use trapezoid::trapezoidmethod::{
    TrapezoidMethod,
    TrapezoidReport
};

const DEFAULT_FORMULA: &str = "1 / (1 + x ** 2)";
const DEFAULT_A: f64 = 0.0;
const DEFAULT_B: f64 = 5.0;
const DEFAULT_N: usize = 10;

/// 以 N 個等寬梯形估計 f(x) 在 [a, b] 上的定積分
#[derive(Parser)]
#[command(name = "trapezoid", version)]
struct Cli {
    /// Integrand in x, e.g. "np.exp(-x**2)"
    #[arg(short, long)]
    formula: Option<String>,

    /// Lower bound
    #[arg(short = 'a', allow_negative_numbers = true)]
    a: Option<f64>,

    /// Upper bound
    #[arg(short = 'b', allow_negative_numbers = true)]
    b: Option<f64>,

    /// Number of trapezoids
    #[arg(short = 'n')]
    n: Option<usize>,

    /// Start from a named problem; explicit flags override its fields
    #[arg(short, long)]
    preset: Option<String>,

    /// JSON configuration file with settings and extra problems
    #[arg(long)]
    config: Option<String>,

    /// Number of points on the reference curve
    #[arg(long)]
    reference_resolution: Option<usize>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Render f(x) in the summary as LaTeX
    #[arg(long)]
    latex: bool,

    /// Print every trapezoid after the summary
    #[arg(long)]
    strips: bool,

    /// List the available problems and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let configuration = Configuration::new();
    if let Some(path) = &cli.config {
        configuration.from_reader(path)?;
        debug!("loaded configuration from {}", path);
    }
    if let Some(resolution) = cli.reference_resolution {
        let settings = configuration.settings().with_reference_resolution(resolution);
        configuration.set_settings(settings);
    }

    if cli.list {
        for name in configuration.problem_manager().names() {
            let problem = configuration.problem_manager().get(&name)?;
            println!(
                "{:<16} {}  on [{}, {}], N = {}",
                problem.name(),
                problem.formula(),
                problem.a(),
                problem.b(),
                problem.n()
            );
        }
        return Ok(());
    }

    let problem = resolve_problem(cli, &configuration)?;
    let method = TrapezoidMethod::from_configuration(&configuration);
    let report = method.compute_problem(&problem)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let summary = if cli.latex { report.latex_summary() } else { report.summary() };
        println!("{}", summary);
        if cli.strips {
            print_strips(&report);
        }
    }
    Ok(())
}

fn resolve_problem(cli: &Cli, configuration: &Configuration) -> Result<IntegrationProblem, Box<dyn Error>> {
    let base = match &cli.preset {
        Some(name) => configuration.problem_manager().get(name)?,
        None => IntegrationProblem::new("cli", DEFAULT_FORMULA, DEFAULT_A, DEFAULT_B, DEFAULT_N),
    };
    Ok(IntegrationProblem::new(
        base.name(),
        cli.formula.as_deref().unwrap_or(base.formula()),
        cli.a.unwrap_or(base.a()),
        cli.b.unwrap_or(base.b()),
        cli.n.unwrap_or(base.n()),
    ))
}

fn print_strips(report: &TrapezoidReport) {
    println!();
    println!("{:>4} {:>12} {:>12} {:>12} {:>12} {:>12}", "i", "x_i", "x_i+1", "y_i", "y_i+1", "area");
    for (i, strip) in report.strips().iter().enumerate() {
        println!(
            "{:>4} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
            i,
            strip.left().x(),
            strip.right().x(),
            strip.left().y(),
            strip.right().y(),
            strip.area()
        );
    }
}
