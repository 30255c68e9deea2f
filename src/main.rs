//! Dispatch simulator entry point — CLI wiring and config-driven runs.

use std::path::Path;
use std::process;

use bess_sim::config::ScenarioConfig;
use bess_sim::error::SimError;
use bess_sim::forecast::{DemandForecaster, PersistenceForecast, TrendForecast};
use bess_sim::io::export::export_ledger_csv;
use bess_sim::policy::{ActionPolicy, SocContext};
use bess_sim::pricing::{DynamicPricingEngine, PricingContext};
use bess_sim::sim::dispatch::DispatchSimulator;
use bess_sim::sim::result::SimulationResult;
use bess_sim::sim::summary::RunReport;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    ledger_out: Option<String>,
}

fn print_help() {
    eprintln!("bess-sim — Battery energy-storage dispatch simulator");
    eprintln!();
    eprintln!("Usage: bess-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load scenario from TOML config file");
    eprintln!("  --preset <name>     Use a built-in preset (reference)");
    eprintln!("  --seed <u64>        Override the demand generator seed");
    eprintln!("  --ledger-out <path> Export the hourly dispatch ledger to CSV");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the reference preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        ledger_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--ledger-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --ledger-out requires a path argument");
                    process::exit(1);
                }
                cli.ledger_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Runs one dispatch simulation per configured candidate capacity.
fn run_simulation(cfg: &ScenarioConfig) -> Result<Vec<SimulationResult>, SimError> {
    let tariff = cfg.tariff()?;
    let demand = cfg.demand_profile()?;
    let simulator = DispatchSimulator::new(cfg.battery.max_charge_kwh_per_hour)?;
    simulator.simulate_fleet(&cfg.simulation.capacities_kwh, &demand, &tariff)
}

/// Runs the live decision pipeline: forecast the decision hour's demand,
/// quote a price for it, then pick the battery action.
fn print_decision(cfg: &ScenarioConfig) -> Result<(), SimError> {
    let tariff = cfg.tariff()?;
    let demand = cfg.demand_profile()?;
    let dec = &cfg.decision;

    let forecaster: Box<dyn DemandForecaster> = match dec.forecaster.as_str() {
        "persistence" => Box::new(PersistenceForecast::new(demand)),
        _ => Box::new(TrendForecast::fit(&demand)),
    };
    let predicted_kwh = forecaster.predict_demand(dec.hour);

    let slot = tariff.slot(dec.hour);
    let price = DynamicPricingEngine.price(&PricingContext {
        grid_cost: slot.grid_cost,
        predicted_demand: predicted_kwh,
        competitors: dec.competitors,
    })?;
    let action = ActionPolicy.decide(&SocContext {
        price,
        soc_pct: dec.soc_pct,
        period: slot.period,
    })?;

    println!("--- Next-Hour Decision ---");
    println!("Hour:            {} [{}]", dec.hour, slot.period);
    println!("Forecast demand: {predicted_kwh:.2} kWh ({})", dec.forecaster);
    println!("Quoted price:    {price:.2} €/kWh");
    println!("Battery at:      {:.0}% SOC", dec.soc_pct);
    println!("Action:          {action}");
    Ok(())
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then reference default
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::reference()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }

    // Validate
    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run one simulation per candidate capacity
    let results = match run_simulation(&scenario) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print per-hour ledgers
    for result in &results {
        println!("=== Capacity {:.0} kWh ===", result.capacity_kwh());
        for record in result.ledger() {
            println!("{record}");
        }
        println!();
    }

    // Print the comparison report
    println!("{}", RunReport::from_results(&results));
    println!();

    // Demonstrate the live decision pipeline
    if let Err(e) = print_decision(&scenario) {
        eprintln!("{e}");
        process::exit(1);
    }

    // Export CSV if requested
    if let Some(ref path) = cli.ledger_out {
        if let Err(e) = export_ledger_csv(&results, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Ledger written to {path}");
    }
}
