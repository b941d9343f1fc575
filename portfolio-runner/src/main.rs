use anyhow::{anyhow, Result};
use clap::{arg, Arg, Command};
use log::{debug, info, warn, LevelFilter};
use portfolio_algorithms::Algorithm;
use portfolio_challenges::portfolio::samples;
use portfolio_challenges::{Challenge, Solution, Track};
use serde::Serialize;
use std::{fs, time::Instant};

// `--algorithm all` leaves exhaustive out above this many items
const EXHAUSTIVE_MAX_ITEMS: usize = 25;

fn cli() -> Command {
    Command::new("portfolio")
        .about("Selects the most valuable projects that fit an hour budget")
        .arg_required_else_help(true)
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log verbosity, written to stderr")
                .default_value("warn")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .global(true),
        )
        .subcommand(
            Command::new("solve")
                .about("Solves an instance with one or all algorithms")
                .arg(
                    arg!(<INSTANCE> "Instance json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--algorithm [ALGORITHM] "Algorithm to run")
                        .default_value("all")
                        .value_parser(["all", "greedy", "exhaustive", "memoized"]),
                ),
        )
        .subcommand(
            Command::new("sample")
                .about("Solves the built-in sample instances with every algorithm")
                .arg(
                    arg!(--name [NAME] "Only run this sample")
                        .value_parser(samples::NAMES),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random instance")
                .arg(
                    arg!(<SEED> "A string used in seed generation")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    Arg::new("num_items")
                        .long("num-items")
                        .value_name("NUM_ITEMS")
                        .help("Number of projects")
                        .default_value("20")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("budget_pct")
                        .long("budget-pct")
                        .value_name("PCT")
                        .help("Budget as a percentage of the total hours of all projects")
                        .default_value("50")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Verifies a solution and prints its total value")
                .arg(
                    arg!(<INSTANCE> "Instance json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    let level = matches.get_one::<String>("log_level").unwrap();
    if let Err(e) = init_logger(level) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<String>("INSTANCE").unwrap(),
            sub_m.get_one::<String>("algorithm").unwrap(),
        ),
        Some(("sample", sub_m)) => sample(sub_m.get_one::<String>("name").cloned()),
        Some(("generate", sub_m)) => generate(
            sub_m.get_one::<String>("SEED").unwrap(),
            *sub_m.get_one::<usize>("num_items").unwrap(),
            *sub_m.get_one::<u32>("budget_pct").unwrap(),
        ),
        Some(("verify", sub_m)) => verify(
            sub_m.get_one::<String>("INSTANCE").unwrap(),
            sub_m.get_one::<String>("SOLUTION").unwrap(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logger(level: &str) -> Result<()> {
    let level_filter: LevelFilter = level
        .parse()
        .map_err(|e| anyhow!("Invalid log level '{}': {}", level, e))?;
    let epoch = Instant::now();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let elapsed = epoch.elapsed();
            out.finish(format_args!(
                "[{}] [{:>4}.{:03}s] <{}> {}",
                record.level(),
                elapsed.as_secs(),
                elapsed.subsec_millis(),
                record.target(),
                message
            ))
        })
        .level(level_filter)
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| anyhow!("Failed to initialize logger: {}", e))
}

#[derive(Serialize)]
struct Report<'a> {
    algorithm: &'a str,
    items: Vec<&'a str>,
    total_value: u64,
    total_cost: u64,
}

fn solve(instance: &str, algorithm: &str) -> Result<()> {
    let challenge = load_challenge(instance)?;
    let algorithms: Vec<Algorithm> = match algorithm {
        "all" if challenge.num_items() > EXHAUSTIVE_MAX_ITEMS => {
            warn!(
                "skipping exhaustive search over {} items, request it with --algorithm exhaustive",
                challenge.num_items()
            );
            Algorithm::ALL
                .into_iter()
                .filter(|algorithm| *algorithm != Algorithm::Exhaustive)
                .collect()
        }
        "all" => Algorithm::ALL.to_vec(),
        name => vec![name.parse::<Algorithm>()?],
    };
    run_algorithms(&challenge, &algorithms)
}

fn sample(name: Option<String>) -> Result<()> {
    let names: Vec<&str> = match &name {
        Some(name) => vec![name.as_str()],
        None => samples::NAMES.to_vec(),
    };
    for name in names {
        let challenge =
            samples::by_name(name).ok_or_else(|| anyhow!("Unknown sample '{}'", name))?;
        info!("sample {}", name);
        run_algorithms(&challenge, &Algorithm::ALL)?;
    }
    Ok(())
}

fn run_algorithms(challenge: &Challenge, algorithms: &[Algorithm]) -> Result<()> {
    info!(
        "{} items, budget {}, capacity {}",
        challenge.num_items(),
        challenge.budget(),
        challenge.capacity()
    );
    for algorithm in algorithms {
        if *algorithm == Algorithm::Exhaustive && challenge.num_items() > EXHAUSTIVE_MAX_ITEMS {
            warn!(
                "exhaustive search over {} items explores up to 2^{} branches",
                challenge.num_items(),
                challenge.num_items()
            );
        }
        let start = Instant::now();
        let solution = algorithm.solve(challenge)?;
        info!("{} finished in {:?}", algorithm, start.elapsed());

        let selection = challenge.selection(&solution)?;
        let report = Report {
            algorithm: algorithm.name(),
            items: selection.items.iter().map(|item| item.name()).collect(),
            total_value: selection.total_value,
            total_cost: selection.total_cost,
        };
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}

fn generate(seed: &str, num_items: usize, budget_pct: u32) -> Result<()> {
    let seed: [u8; 32] = blake3::hash(seed.as_bytes()).into();
    let track = Track {
        num_items,
        budget_pct,
    };
    let challenge = Challenge::generate_instance(&seed, &track)?;
    println!("{}", serde_json::to_string(&challenge)?);
    Ok(())
}

fn verify(instance: &str, solution: &str) -> Result<()> {
    let challenge = load_challenge(instance)?;
    let solution: Solution = serde_json::from_str(&load_input(solution)?)
        .map_err(|e| anyhow!("Failed to parse solution: {}", e))?;
    let total_value = challenge.evaluate_total_value(&solution)?;
    println!("{}", serde_json::json!({ "total_value": total_value }));
    Ok(())
}

fn load_challenge(instance: &str) -> Result<Challenge> {
    serde_json::from_str(&load_input(instance)?)
        .map_err(|e| anyhow!("Failed to parse instance: {}", e))
}

fn load_input(input: &str) -> Result<String> {
    if input.ends_with(".json") {
        debug!("reading {}", input);
        fs::read_to_string(input).map_err(|e| anyhow!("Failed to read {}: {}", input, e))
    } else {
        Ok(input.to_string())
    }
}
