use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, Command};
use pso_algorithms::travelling_salesman::swap_swarm::{self, ConvergenceHistory, Solver};
use pso_challenges::{benchmarks, travelling_salesman::*};
use pso_utils::{compress_obj, dejsonify, jsonify, read_json_arg, seed_from_str};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct OutputData {
    route: Vec<usize>,
    distance: f64,
    baseline_distance: f64,
    history: ConvergenceHistory,
}

#[derive(Serialize)]
struct Evaluation {
    name: &'static str,
    value: f64,
    in_domain: bool,
    domain: benchmarks::Domain,
}

fn cli() -> Command {
    Command::new("pso-runtime")
        .about("Solves travelling salesman instances with a discrete particle swarm")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("compute_solution")
                .about("Computes a tour for a city file")
                .arg(
                    arg!(<CITIES> "Path to a city file, one '<id> <x> <y>' per line")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--seed [SEED] "A string used in seed generation")
                        .default_value("0")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Hyperparameters json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the output data will be saved to this file path (default json)")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--compress [COMPRESS] "If output file is set, the output data will be compressed as zlib")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Checks a tour and compares it to the nearest-neighbour baseline")
                .arg(
                    arg!(<CITIES> "Path to a city file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("generate_instance")
                .about("Prints a random city file")
                .arg(arg!(<SIZE> "Number of cities").value_parser(clap::value_parser!(usize)))
                .arg(
                    arg!(--seed [SEED] "A string used in seed generation")
                        .default_value("0")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
        .subcommand(
            Command::new("evaluate_function")
                .about("Evaluates a benchmark function at a point")
                .arg(
                    arg!(<NAME> "Benchmark function name")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<X>... "Coordinates of the point")
                        .allow_negative_numbers(true)
                        .value_parser(clap::value_parser!(f64)),
                ),
        )
        .subcommand(
            Command::new("describe_hyperparameters").about("Lists the solver hyperparameters"),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("compute_solution", sub_m)) => compute_solution(
            sub_m.get_one::<PathBuf>("CITIES").unwrap(),
            sub_m.get_one::<String>("seed").unwrap(),
            sub_m.get_one::<String>("hyperparameters").map(String::as_str),
            sub_m.get_one::<PathBuf>("output").cloned(),
            sub_m.get_flag("compress"),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<PathBuf>("CITIES").unwrap(),
            sub_m.get_one::<String>("SOLUTION").unwrap(),
        ),
        Some(("generate_instance", sub_m)) => generate_instance(
            *sub_m.get_one::<usize>("SIZE").unwrap(),
            sub_m.get_one::<String>("seed").unwrap(),
        ),
        Some(("evaluate_function", sub_m)) => evaluate_function(
            sub_m.get_one::<String>("NAME").unwrap(),
            &sub_m.get_many::<f64>("X").unwrap().copied().collect::<Vec<f64>>(),
        ),
        Some(("describe_hyperparameters", _)) => {
            swap_swarm::help();
            Ok(())
        }
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

pub fn compute_solution(
    cities_path: &PathBuf,
    seed: &str,
    hyperparameters: Option<&str>,
    output_file: Option<PathBuf>,
    compress: bool,
) -> Result<()> {
    let challenge = load_challenge(cities_path, seed)?;
    let hyperparameters = hyperparameters.map(load_hyperparameters).transpose()?;

    let outcome = Solver::solve_challenge_instance(&challenge, &hyperparameters, None)?;
    let baseline_distance = challenge.route_distance(&challenge.compute_greedy_baseline().route);

    let output_data = OutputData {
        route: outcome.solution.route,
        distance: outcome.distance,
        baseline_distance,
        history: outcome.history,
    };
    if let Some(path) = output_file {
        if compress {
            fs::write(&path, compress_obj(&output_data)?)?;
        } else {
            fs::write(&path, jsonify(&output_data)?)?;
        }
        info!("output_data written to: {:?}", path);
    } else {
        println!("{}", jsonify(&output_data)?);
    }
    Ok(())
}

pub fn verify_solution(cities_path: &PathBuf, solution: &str) -> Result<()> {
    let challenge = load_challenge(cities_path, "0")?;
    let solution = dejsonify::<Solution>(&read_json_arg(solution)?)
        .map_err(|e| anyhow!("Failed to parse solution: {}", e))?;
    let quality = challenge
        .verify_solution(&solution)
        .map_err(|e| anyhow!("Invalid solution: {}", e))?;
    println!("{}", jsonify(&quality)?);
    Ok(())
}

pub fn generate_instance(num_nodes: usize, seed: &str) -> Result<()> {
    let challenge = Challenge::generate_instance(&seed_from_str(seed), &Difficulty { num_nodes })?;
    print!("{}", challenge.to_cities_string());
    Ok(())
}

pub fn evaluate_function(name: &str, x: &[f64]) -> Result<()> {
    let benchmark = benchmarks::lookup(name)?;
    let value = benchmark.try_evaluate(x)?;
    let domain = benchmark.domain(x.len())?;
    let evaluation = Evaluation {
        name: benchmark.name,
        value,
        in_domain: domain.contains(x),
        domain,
    };
    println!("{}", jsonify(&evaluation)?);
    Ok(())
}

fn load_challenge(cities_path: &PathBuf, seed: &str) -> Result<Challenge> {
    let text = fs::read_to_string(cities_path)
        .map_err(|e| anyhow!("Failed to read city file {:?}: {}", cities_path, e))?;
    Ok(Challenge::from_cities_str(&seed_from_str(seed), &text)?)
}

fn load_hyperparameters(arg: &str) -> Result<Map<String, Value>> {
    dejsonify::<Map<String, Value>>(&read_json_arg(arg)?)
        .map_err(|e| anyhow!("Failed to parse hyperparameters: {}", e))
}
