//! Configuration resolution from CLI args

use crate::cli::{ParallelizeBy, RunArgs};
use crate::error::CliError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default input directory
pub const INPUT_DIR_ENV: &str = "AOC_INPUT_DIR";

/// Input directory used when neither the flag nor the environment names one
pub const DEFAULT_INPUT_DIR: &str = "inputs";

/// Where puzzle inputs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// One explicit file, used for the single selected day
    File(PathBuf),
    /// A directory of `{year}_day{DD}.txt` files
    Dir(PathBuf),
}

/// Resolved runtime configuration
pub struct Config {
    /// Year filter (None = all years)
    pub year_filter: Option<u16>,
    /// Day filter (None = all days)
    pub day_filter: Option<u8>,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags to filter solvers
    pub tags: Vec<String>,
    /// Input location
    pub input: InputSource,
    /// Number of threads for parallel execution
    pub thread_count: usize,
    /// Parallelization level
    pub parallelize_by: ParallelizeBy,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from run arguments and the process environment
    pub fn from_args(args: RunArgs) -> Result<Self, CliError> {
        Self::from_args_with_env(args, std::env::var_os(INPUT_DIR_ENV))
    }

    fn from_args_with_env(args: RunArgs, env_dir: Option<OsString>) -> Result<Self, CliError> {
        let input = match args.input {
            Some(file) => {
                if args.year.is_none() || args.day.is_none() {
                    return Err(CliError::Config(
                        "--input requires both --year and --day".to_string(),
                    ));
                }
                InputSource::File(expand_tilde(&file))
            }
            None => InputSource::Dir(resolve_input_dir(args.input_dir, env_dir)),
        };

        if args.threads == Some(0) {
            return Err(CliError::Config("--threads must be at least 1".to_string()));
        }
        let thread_count = args.threads.unwrap_or_else(num_cpus);

        Ok(Config {
            year_filter: args.year,
            day_filter: args.day,
            part_filter: args.part,
            tags: args.tags,
            input,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }
}

/// Pick the input directory: explicit flag, then environment, then `./inputs`
pub fn resolve_input_dir(explicit: Option<PathBuf>, env_dir: Option<OsString>) -> PathBuf {
    explicit
        .or_else(|| env_dir.filter(|d| !d.is_empty()).map(PathBuf::from))
        .map(|dir| expand_tilde(&dir))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR))
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
