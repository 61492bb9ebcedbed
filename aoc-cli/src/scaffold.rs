//! `aoc new`: scaffold a day module, wire it into its year, and create an
//! empty input file next to the others

use crate::error::CliError;
use crate::inputs::InputStore;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const DAY_TEMPLATE: &str = r#"use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = __YEAR__, day = __DAY__, tags = ["__YEAR__"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.lines().collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Err(SolveError::PartNotImplemented(1))
    }
}

impl PartSolver<2> for Solver {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Err(SolveError::PartNotImplemented(2))
    }
}
"#;

/// Files touched by a successful scaffold
#[derive(Debug)]
pub struct ScaffoldReport {
    pub day_file: PathBuf,
    pub year_module: PathBuf,
    /// `None` when an input file was already there
    pub input_file: Option<PathBuf>,
}

pub struct Scaffolder {
    solutions_dir: PathBuf,
    inputs: InputStore,
}

impl Scaffolder {
    pub fn new(solutions_dir: PathBuf, inputs: InputStore) -> Self {
        Self {
            solutions_dir,
            inputs,
        }
    }

    /// Create `year_{year}/day_{day}.rs` and register it; never overwrites a day
    pub fn scaffold(&self, year: u16, day: u8) -> Result<ScaffoldReport, CliError> {
        if !self.solutions_dir.is_dir() {
            return Err(CliError::Scaffold(format!(
                "solutions directory {} does not exist",
                self.solutions_dir.display()
            )));
        }

        let year_dir = self.solutions_dir.join(format!("year_{}", year));
        let day_file = year_dir.join(format!("day_{}.rs", day));
        if day_file.exists() {
            return Err(CliError::Scaffold(format!(
                "refusing to overwrite {}",
                day_file.display()
            )));
        }

        fs::create_dir_all(&year_dir)?;
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&day_file)?;
        file.write_all(render_day(year, day).as_bytes())?;

        let year_module = year_dir.join("mod.rs");
        let new_year = !year_module.exists();
        let source = read_or_default(&year_module, &format!("//! Advent of Code {}\n", year))?;
        match insert_day_module(&source, day) {
            Some(updated) => fs::write(&year_module, updated)?,
            None => log::warn!(
                "{} already declares day_{}, leaving it unchanged",
                year_module.display(),
                day
            ),
        }

        if new_year {
            self.register_year(year)?;
        }

        let input_file = if self.inputs.contains(year, day) {
            log::warn!(
                "input {} already exists, leaving it unchanged",
                self.inputs.input_path(year, day).display()
            );
            None
        } else {
            self.inputs.put(year, day, "")?;
            Some(self.inputs.input_path(year, day))
        };

        Ok(ScaffoldReport {
            day_file,
            year_module,
            input_file,
        })
    }

    fn register_year(&self, year: u16) -> Result<(), CliError> {
        let lib = self.solutions_dir.join("lib.rs");
        let source = match fs::read_to_string(&lib) {
            Ok(source) => source,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::warn!("{} not found, add `pub mod year_{};` by hand", lib.display(), year);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let declaration = format!("pub mod year_{};", year);
        if source.lines().any(|l| l.trim() == declaration) {
            return Ok(());
        }

        let mut updated = source;
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push('\n');
        updated.push_str(&declaration);
        updated.push('\n');
        fs::write(&lib, updated)?;
        Ok(())
    }
}

fn render_day(year: u16, day: u8) -> String {
    DAY_TEMPLATE
        .replace("__YEAR__", &year.to_string())
        .replace("__DAY__", &day.to_string())
}

fn read_or_default(path: &Path, default: &str) -> Result<String, CliError> {
    match fs::read_to_string(path) {
        Ok(source) => Ok(source),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(default.to_string()),
        Err(e) => Err(e.into()),
    }
}

fn declared_day(line: &str) -> Option<u8> {
    line.trim()
        .strip_prefix("pub mod day_")?
        .strip_suffix(';')?
        .parse()
        .ok()
}

/// Add `pub mod day_{day};` keeping day declarations in numeric order.
///
/// Returns `None` when the module is already declared.
fn insert_day_module(source: &str, day: u8) -> Option<String> {
    let mut lines: Vec<&str> = source.lines().collect();
    let declared: Vec<(usize, u8)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| declared_day(line).map(|d| (i, d)))
        .collect();

    if declared.iter().any(|&(_, d)| d == day) {
        return None;
    }

    let declaration = format!("pub mod day_{};", day);
    let at = match declared.iter().find(|&&(_, d)| d > day) {
        Some(&(i, _)) => i,
        None => match declared.last() {
            Some(&(i, _)) => i + 1,
            None => {
                // Leave a blank line after the module docs
                if lines.last().is_some_and(|l| !l.trim().is_empty()) {
                    lines.push("");
                }
                lines.len()
            }
        },
    };
    lines.insert(at, &declaration);

    let mut updated = lines.join("\n");
    updated.push('\n');
    Some(updated)
}
