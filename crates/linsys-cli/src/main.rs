use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use linsys::config::SolverKind;
use linsys_cli::commands::{run_fit, run_solve};
use linsys_cli::problem::{load_fit_problem, load_solve_problem};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("LINSYS_LOG", "error,linsys=info"))
        .init();

    let matches = Command::new("linsys")
        .version(clap::crate_version!())
        .about("Dense linear system and least-squares solver")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Solve a square linear system A x = b from a JSON problem file")
                .arg(
                    Arg::new("problem")
                        .help("Path to the JSON problem file (matrix, rhs, solver)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("solver")
                        .short('s')
                        .long("solver")
                        .help("Solver strategy. Overrides the solver kind in the problem file.")
                        .value_parser(["direct", "conjugate_gradient", "auto"])
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("fit")
                .about("Fit a least-squares model by pseudo-inverse and report test RMSE")
                .arg(
                    Arg::new("problem")
                        .help("Path to the JSON problem file (features, targets)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for the train/test shuffle. Overrides the problem file.")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("train_fraction")
                        .short('f')
                        .long("train-fraction")
                        .help("Share of rows used for training. Overrides the problem file.")
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .get_matches();

    let outcome = match matches.subcommand() {
        Some(("solve", sub_m)) => handle_solve(sub_m),
        Some(("fit", sub_m)) => handle_fit(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    };

    if let Err(e) = outcome {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn handle_solve(matches: &ArgMatches) -> Result<()> {
    let problem_path = matches
        .get_one::<PathBuf>("problem")
        .ok_or_else(|| anyhow::anyhow!("Missing problem file"))?;
    log::info!("[linsys::solve] Loading problem: {:?}", problem_path);

    let mut problem = load_solve_problem(problem_path)?;
    if let Some(kind) = matches.get_one::<String>("solver") {
        problem.solver.kind = SolverKind::from_str(kind).map_err(anyhow::Error::msg)?;
    }

    let report = run_solve(&problem)?;
    print!("{}", report);
    Ok(())
}

fn handle_fit(matches: &ArgMatches) -> Result<()> {
    let problem_path = matches
        .get_one::<PathBuf>("problem")
        .ok_or_else(|| anyhow::anyhow!("Missing problem file"))?;
    log::info!("[linsys::fit] Loading problem: {:?}", problem_path);

    let mut problem = load_fit_problem(problem_path)?;
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        problem.seed = Some(seed);
    }
    if let Some(&fraction) = matches.get_one::<f64>("train_fraction") {
        problem.train_fraction = fraction;
    }

    let report = run_fit(&problem)?;
    print!("{}", report);
    Ok(())
}
