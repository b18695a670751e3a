use bazaar_runner::{MarketReport, build_market, load_config, load_default_config};

fn print_help() {
    eprintln!(
        r#"Bazaar - multi-commodity economy simulator

USAGE:
    bazaar [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --rounds <N>        Rounds to simulate (overrides the config)
    --seed <N>          Random seed (overrides the config)
    --range <N>         Rounds averaged in the report (default: 10)
    --json              Print the report as JSON
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

EXAMPLES:
    # Run the built-in five-profession economy
    bazaar

    # Run a config file for 500 rounds
    bazaar --config economy.json --rounds 500
"#
    );
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let Some(value) = args.get(i) else {
        eprintln!("Error: {} requires a value", flag);
        std::process::exit(1);
    };
    match value.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: {} expects a number, got '{}'", flag, value);
            std::process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut rounds: Option<usize> = None;
    let mut seed: Option<u64> = None;
    let mut range = 10usize;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--rounds" | "-r" => {
                i += 1;
                rounds = Some(parse_number(&args, i, "--rounds"));
            }
            "--seed" | "-s" => {
                i += 1;
                seed = Some(parse_number(&args, i, "--seed"));
            }
            "--range" => {
                i += 1;
                range = parse_number(&args, i, "--range");
            }
            "--json" => json = true,
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = if let Some(path) = config_path {
        log::info!("Loading configuration from: {}", path);
        load_config(&path)?
    } else {
        log::info!("Using default configuration");
        load_default_config()?
    };
    if let Some(seed) = seed {
        config.seed = seed;
    }
    let rounds = rounds.unwrap_or(config.rounds);

    let mut market = build_market(&config)?;
    market.simulate(rounds)?;

    let report = MarketReport::from_market(&market, range)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    Ok(())
}
