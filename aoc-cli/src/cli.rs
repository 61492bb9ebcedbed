//! CLI argument parsing using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for solver execution
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; execute all solvers sequentially in order
    Sequential,
    /// Parallelize across years; days and parts run sequentially within each year
    Year,
    /// Parallelize across year/day combinations; parts run sequentially (default)
    #[default]
    Day,
    /// Parallelize across all year/day/part combinations
    Part,
}

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(
    name = "aoc",
    about = "Run Advent of Code solvers",
    version,
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments for the implicit `run` command
    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run solvers (the default when no subcommand is given)
    Run(RunArgs),
    /// List registered solvers
    List(ListArgs),
    /// Scaffold a new day module and an empty input file
    New(NewArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Input file for a single day; requires --year and --day
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory holding `{year}_day{DD}.txt` inputs [env: AOC_INPUT_DIR, default: ./inputs]
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ListArgs {
    /// Only list solvers carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct NewArgs {
    /// Year of the new day
    #[arg(short, long)]
    pub year: u16,

    /// Day to scaffold
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: u8,

    /// Source directory of the solutions crate
    #[arg(long, default_value = "aoc-solutions/src")]
    pub solutions_dir: PathBuf,

    /// Directory receiving the empty input file [env: AOC_INPUT_DIR, default: ./inputs]
    #[arg(long)]
    pub input_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("aoc").chain(args.iter().copied()))
    }

    #[test]
    fn test_bare_invocation_runs() {
        let args = parse(&["-y", "2020", "-d", "1", "-q"]).unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.run.year, Some(2020));
        assert_eq!(args.run.day, Some(1));
        assert!(args.run.quiet);
        assert_eq!(args.run.parallelize_by, ParallelizeBy::Day);
    }

    #[test]
    fn test_run_subcommand() {
        let args = parse(&["run", "--input", "in.txt", "-y", "2020", "-d", "3"]).unwrap();
        let Some(Command::Run(run)) = args.command else {
            panic!("expected run command");
        };
        assert_eq!(run.input, Some(PathBuf::from("in.txt")));
        assert_eq!(run.day, Some(3));
    }

    #[test]
    fn test_tags_are_comma_separated() {
        let args = parse(&["-t", "2020,grid"]).unwrap();
        assert_eq!(args.run.tags, vec!["2020", "grid"]);
    }

    #[test]
    fn test_day_out_of_range_rejected() {
        assert!(parse(&["-d", "26"]).is_err());
        assert!(parse(&["new", "-y", "2020", "-d", "0"]).is_err());
        assert!(parse(&["-p", "3"]).is_err());
    }

    #[test]
    fn test_new_defaults() {
        let args = parse(&["new", "-y", "2021", "-d", "7"]).unwrap();
        let Some(Command::New(new)) = args.command else {
            panic!("expected new command");
        };
        assert_eq!(new.year, 2021);
        assert_eq!(new.day, 7);
        assert_eq!(new.solutions_dir, PathBuf::from("aoc-solutions/src"));
        assert!(new.input_dir.is_none());
    }

    #[test]
    fn test_run_flags_conflict_with_subcommands() {
        assert!(parse(&["-y", "2020", "list"]).is_err());
    }
}
