//! AOC CLI - run, list and scaffold Advent of Code solvers

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod inputs;
mod output;
mod scaffold;

// Import aoc-solutions to link the solver plugins
use aoc_solutions as _;

use aoc_solver::{SolverPlugin, SolverRegistryBuilder};
use clap::Parser;
use cli::{Args, Command, ListArgs, NewArgs};
use config::{Config, InputSource};
use error::CliError;
use executor::Executor;
use inputs::InputStore;
use output::OutputFormatter;
use scaffold::Scaffolder;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        None => run_solvers(Config::from_args(args.run)?),
        Some(Command::Run(run)) => run_solvers(Config::from_args(run)?),
        Some(Command::List(list)) => list_solvers(&list),
        Some(Command::New(new)) => new_day(new),
    }
}

fn run_solvers(config: Config) -> Result<(), CliError> {
    let registry = build_registry(&config.tags)?;

    let executor =
        Executor::new(registry, &config).map_err(|e| CliError::Config(e.to_string()))?;

    let work_items = executor.collect_work_items();
    if work_items.is_empty() {
        if !config.quiet {
            println!("No solvers found matching the specified filters.");
        }
        return Ok(());
    }

    let (work_items, missing) = executor.partition_by_input(work_items);
    for work in &missing {
        log::warn!(
            "no input for {}/{:02} at {}, skipping",
            work.year,
            work.day,
            executor.input_path(work).display()
        );
    }
    if work_items.is_empty() {
        return Ok(());
    }

    log::info!(
        "running {} solver(s), {} skipped for missing input",
        work_items.len(),
        missing.len()
    );
    run_executor(executor, work_items, config.quiet)
}

/// Run the executor and collect results
fn run_executor(
    executor: Executor,
    work_items: Vec<executor::WorkItem>,
    quiet: bool,
) -> Result<(), CliError> {
    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |p| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part: p,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();

    let executor_handle = std::thread::spawn(move || executor.execute(work_items, tx));

    // Print in (year, day, part) order as results become ready
    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        log::warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
        .map_err(CliError::Executor)?;

    formatter.print_summary(&results);

    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| has_tags(plugin, tags))?
    };

    Ok(builder.build())
}

fn has_tags(plugin: &SolverPlugin, tags: &[String]) -> bool {
    tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
}

fn list_solvers(args: &ListArgs) -> Result<(), CliError> {
    let mut plugins: Vec<&SolverPlugin> = aoc_solver::inventory::iter::<SolverPlugin>()
        .into_iter()
        .filter(|plugin| has_tags(plugin, &args.tags))
        .collect();
    plugins.sort_by_key(|plugin| (plugin.year, plugin.day));

    // Parts come from the registry so the listing matches what `run` would see
    let registry = build_registry(&args.tags)?;
    for plugin in plugins {
        let parts = registry
            .storage()
            .get_info(plugin.year, plugin.day)
            .map_or(0, |info| info.parts);
        println!(
            "{}/{:02} parts={} tags={}",
            plugin.year,
            plugin.day,
            parts,
            plugin.tags.join(",")
        );
    }
    Ok(())
}

fn new_day(args: NewArgs) -> Result<(), CliError> {
    let input_dir = config::resolve_input_dir(
        args.input_dir,
        std::env::var_os(config::INPUT_DIR_ENV),
    );
    let scaffolder = Scaffolder::new(
        config::expand_tilde(&args.solutions_dir),
        InputStore::new(InputSource::Dir(input_dir)),
    );

    let report = scaffolder.scaffold(args.year, args.day)?;
    println!("Created {}", report.day_file.display());
    println!("Updated {}", report.year_module.display());
    if let Some(input) = report.input_file {
        println!("Created {}", input.display());
    }
    Ok(())
}
