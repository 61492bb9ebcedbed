//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError, InputError};
use crate::inputs::InputStore;
use aoc_solver::{DynSolver, ParseError, SolverError, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::io::ErrorKind;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Result from a single solver execution
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Time spent parsing; `None` when parsing never succeeded
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: SolverError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Parallel executor for running solvers
pub struct Executor {
    sync_executor_config: SyncExecutorConfig,
    thread_pool: rayon::ThreadPool,
}

pub struct SyncExecutorConfig {
    registry: SolverRegistry,
    inputs: InputStore,
    parallelize_by: ParallelizeBy,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            sync_executor_config: SyncExecutorConfig {
                registry,
                inputs: InputStore::new(config.input.clone()),
                parallelize_by: config.parallelize_by,
                year_filter: config.year_filter,
                day_filter: config.day_filter,
                part_filter: config.part_filter,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        let cfg = &self.sync_executor_config;
        cfg.registry
            .storage()
            .iter_info()
            .filter(|info| cfg.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| cfg.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: filter_parts(cfg.part_filter, info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Split work items into those with an input on disk and those without
    pub fn partition_by_input(&self, work_items: Vec<WorkItem>) -> (Vec<WorkItem>, Vec<WorkItem>) {
        let inputs = &self.sync_executor_config.inputs;
        work_items
            .into_iter()
            .partition(|w| inputs.contains(w.year, w.day))
    }

    /// Path the input for a work item is read from
    pub fn input_path(&self, work: &WorkItem) -> std::path::PathBuf {
        self.sync_executor_config
            .inputs
            .input_path(work.year, work.day)
    }

    /// Execute the given work items and send results to channel
    pub fn execute(
        &self,
        work_items: Vec<WorkItem>,
        tx: Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        log::info!(
            "executing {} solver(s) on {} thread(s), parallelized by {:?}",
            work_items.len(),
            self.thread_pool.current_num_threads(),
            self.sync_executor_config.parallelize_by
        );

        match self.sync_executor_config.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in work_items {
                    if let Err(e) = run_solver(&work, &tx, &self.sync_executor_config) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.execute_parallel_grouped(by_year, &tx)
            }
            // Part additionally splits each day inside run_solver
            ParallelizeBy::Day | ParallelizeBy::Part => self.execute_parallel(work_items, &tx),
        }
    }

    /// Execute work items in parallel, collecting errors
    fn execute_parallel(
        &self,
        work_items: Vec<WorkItem>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            work_items
                .into_par_iter()
                .map(|work| run_solver(&work, tx, sync_executor_config).err())
                .reduce(|| None, merge_errors)
                .map_or(Ok(()), Err)
        })
    }

    /// Execute grouped work items in parallel (for year-level parallelism)
    fn execute_parallel_grouped(
        &self,
        groups: Vec<Vec<WorkItem>>,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let sync_executor_config = &self.sync_executor_config;

        self.thread_pool.install(|| {
            groups
                .into_par_iter()
                .map(|items| {
                    let mut err = None;
                    for work in items {
                        if let Err(e) = run_solver(&work, tx, sync_executor_config) {
                            err = Some(ArcExecutorError::combine_opt(err, e))
                        }
                    }
                    err
                })
                .reduce(|| None, merge_errors)
                .map_or(Ok(()), Err)
        })
    }
}

/// Restrict `1..=max_parts` to the requested part
#[allow(clippy::reversed_empty_ranges)]
fn filter_parts(part_filter: Option<u8>, max_parts: u8) -> RangeInclusive<u8> {
    match part_filter {
        Some(p) if p <= max_parts => p..=p,
        Some(_) => 1..=0,
        None => 1..=max_parts,
    }
}

fn merge_errors(
    a: Option<ArcExecutorError>,
    b: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (a, b) {
        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
        (a, b) => a.or(b),
    }
}

/// Duplicate a parse-time error so every requested part can report it
fn replicate(error: &SolverError) -> SolverError {
    match error {
        SolverError::NotFound(year, day) => SolverError::NotFound(*year, *day),
        SolverError::InvalidYearDay(year, day) => SolverError::InvalidYearDay(*year, *day),
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::SolveError(e) => SolverError::ParseError(ParseError::Other(e.to_string())),
    }
}

fn send_failures(
    work: &WorkItem,
    error: &SolverError,
    tx: &Sender<SolverResult>,
) -> Result<(), ArcExecutorError> {
    for part in work.parts.clone() {
        tx.send(SolverResult::failed(work.year, work.day, part, replicate(error)))
            .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;
    }
    Ok(())
}

/// Read the input and solve one work item
fn run_solver(
    work: &WorkItem,
    tx: &Sender<SolverResult>,
    sync_executor_config: &SyncExecutorConfig,
) -> Result<(), ArcExecutorError> {
    let (year, day) = (work.year, work.day);

    let input = match sync_executor_config.inputs.get(year, day) {
        Ok(Some(input)) => input,
        Ok(None) => {
            // Vanished between planning and execution
            let path = sync_executor_config.inputs.input_path(year, day);
            log::warn!("input for {}/{:02} not found at {}", year, day, path.display());
            return Ok(());
        }
        Err(error) => {
            // An unreadable input fails that day only
            log::warn!("cannot use input for {}/{:02}: {}", year, day, error);
            let failure = match &error {
                InputError::Read { source, .. } if source.kind() == ErrorKind::InvalidData => {
                    ParseError::InvalidFormat(error.to_string())
                }
                _ => ParseError::MissingData(error.to_string()),
            };
            return send_failures(work, &SolverError::ParseError(failure), tx);
        }
    };

    if matches!(sync_executor_config.parallelize_by, ParallelizeBy::Part) {
        run_solver_parts_parallel(work, &input, tx, &sync_executor_config.registry)
    } else {
        run_solver_sequential(work, &input, tx, &sync_executor_config.registry)
    }
}

/// Run solver with part-level parallelism, buffering results to emit in order
fn run_solver_parts_parallel(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (result_tx, result_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);

    // Each part gets its own freshly parsed instance
    work.parts
        .clone()
        .into_par_iter()
        .for_each_with(result_tx, |rtx, part| {
            let result = match registry.create_solver(year, day, input) {
                Ok(mut solver) => solve_part_internal(year, day, part, &mut *solver),
                Err(e) => SolverResult::failed(year, day, part, e),
            };
            rtx.send(result).ok();
        });

    let start_part = *work.parts.start();
    let mut buffer: Vec<Option<SolverResult>> = work.parts.clone().map(|_| None).collect();
    let mut next_part = start_part;

    for result in result_rx {
        let idx = (result.part - start_part) as usize;
        if let Some(slot) = buffer.get_mut(idx) {
            *slot = Some(result);
        }
        while let Some(result) = buffer
            .get_mut((next_part - start_part) as usize)
            .and_then(Option::take)
        {
            tx.send(result)
                .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;
            next_part += 1;
        }
    }
    Ok(())
}

/// Parse once and solve the parts in order on a scoped worker, forwarding
/// results as they arrive
fn run_solver_sequential(
    work: &WorkItem,
    input: &str,
    tx: &Sender<SolverResult>,
    registry: &SolverRegistry,
) -> Result<(), ArcExecutorError> {
    let (solve_tx, solve_rx) = std::sync::mpsc::channel();
    let (year, day) = (work.year, work.day);
    let parts = work.parts.clone();

    std::thread::scope(|s| {
        s.spawn(move || {
            let mut solver = match registry.create_solver(year, day, input) {
                Ok(solver) => solver,
                Err(e) => {
                    for part in parts {
                        if solve_tx
                            .send(SolverResult::failed(year, day, part, replicate(&e)))
                            .is_err()
                        {
                            break;
                        }
                    }
                    return;
                }
            };
            for part in parts {
                if solve_tx
                    .send(solve_part_internal(year, day, part, &mut *solver))
                    .is_err()
                {
                    break;
                }
            }
        });

        for result in solve_rx {
            tx.send(result)
                .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))?;
        }
        Ok(())
    })
}

/// Solve a single part (free function)
fn solve_part_internal(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let parse_duration = Some(solver.parse_duration());
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration(),
            answer: Ok(solved.answer),
            parse_duration,
        },
        Err(e) => SolverResult {
            parse_duration,
            ..SolverResult::failed(year, day, part, e.into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InputSource;
    use aoc_solver::{AocParser, AocSolver, PartSolver, SolveError, SolverRegistryBuilder};
    use std::fs;
    use tempfile::TempDir;

    /// Sums numbers for part 1 and counts them for part 2
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Numbers;

    impl AocParser for Numbers {
        type SharedData<'a> = Vec<i64>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            input
                .lines()
                .map(|l| {
                    l.parse()
                        .map_err(|_| ParseError::InvalidFormat(l.to_string()))
                })
                .collect()
        }
    }

    impl PartSolver<1> for Numbers {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.iter().sum::<i64>().to_string())
        }
    }

    impl PartSolver<2> for Numbers {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.len().to_string())
        }
    }

    fn config(dir: &TempDir, parallelize_by: ParallelizeBy) -> Config {
        Config {
            year_filter: None,
            day_filter: None,
            part_filter: None,
            tags: Vec::new(),
            input: InputSource::Dir(dir.path().to_path_buf()),
            thread_count: 2,
            parallelize_by,
            quiet: true,
        }
    }

    fn executor(config: &Config) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Numbers>(2020, 1)
            .unwrap()
            .register_solver::<Numbers>(2020, 2)
            .unwrap()
            .register_solver::<Numbers>(2021, 1)
            .unwrap()
            .build();
        Executor::new(registry, config).unwrap()
    }

    fn run(executor: &Executor, items: Vec<WorkItem>) -> Vec<SolverResult> {
        let (tx, rx) = std::sync::mpsc::channel();
        executor.execute(items, tx).unwrap();
        rx.into_iter().collect()
    }

    #[test]
    fn test_collect_work_items_filters() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir, ParallelizeBy::Day);
        cfg.year_filter = Some(2020);
        cfg.part_filter = Some(2);

        let items = executor(&cfg).collect_work_items();
        assert_eq!(
            items,
            vec![
                WorkItem { year: 2020, day: 1, parts: 2..=2 },
                WorkItem { year: 2020, day: 2, parts: 2..=2 },
            ]
        );
    }

    #[test]
    fn test_filter_parts() {
        assert_eq!(filter_parts(None, 2), 1..=2);
        assert_eq!(filter_parts(Some(1), 2), 1..=1);
        assert!(filter_parts(Some(2), 1).is_empty());
    }

    #[test]
    fn test_partition_by_input() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2020_day02.txt"), "1\n2\n").unwrap();
        let cfg = config(&dir, ParallelizeBy::Day);
        let executor = executor(&cfg);

        let (present, missing) = executor.partition_by_input(executor.collect_work_items());
        assert_eq!(present.len(), 1);
        assert_eq!((present[0].year, present[0].day), (2020, 2));
        assert_eq!(missing.len(), 2);
    }

    #[test]
    fn test_every_mode_answers_all_parts() {
        for mode in [
            ParallelizeBy::Sequential,
            ParallelizeBy::Year,
            ParallelizeBy::Day,
            ParallelizeBy::Part,
        ] {
            let dir = TempDir::new().unwrap();
            fs::write(dir.path().join("2020_day01.txt"), "1\n2\n3\n").unwrap();
            fs::write(dir.path().join("2021_day01.txt"), "10\n").unwrap();
            let cfg = config(&dir, mode);
            let executor = executor(&cfg);
            let (present, _) = executor.partition_by_input(executor.collect_work_items());

            let mut results = run(&executor, present);
            results.sort_by_key(|r| (r.year, r.day, r.part));
            let answers: Vec<_> = results
                .iter()
                .map(|r| (r.year, r.part, r.answer.as_ref().unwrap().clone()))
                .collect();
            assert_eq!(
                answers,
                vec![
                    (2020, 1, "6".to_string()),
                    (2020, 2, "3".to_string()),
                    (2021, 1, "10".to_string()),
                    (2021, 2, "1".to_string()),
                ],
                "mode {:?}",
                mode
            );
            assert!(results.iter().all(|r| r.parse_duration.is_some()));
        }
    }

    #[test]
    fn test_parse_failure_reported_per_part() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2020_day01.txt"), "1\nabc\n").unwrap();
        for mode in [ParallelizeBy::Day, ParallelizeBy::Part] {
            let mut cfg = config(&dir, mode);
            cfg.year_filter = Some(2020);
            cfg.day_filter = Some(1);
            let executor = executor(&cfg);

            let results = run(&executor, executor.collect_work_items());
            assert_eq!(results.len(), 2);
            for result in &results {
                assert!(matches!(
                    &result.answer,
                    Err(SolverError::ParseError(ParseError::InvalidFormat(line))) if line == "abc"
                ));
                assert!(result.parse_duration.is_none());
            }
        }
    }

    #[test]
    fn test_missing_input_at_execution_is_skipped() {
        let dir = TempDir::new().unwrap();
        let mut cfg = config(&dir, ParallelizeBy::Sequential);
        cfg.day_filter = Some(2);
        let executor = executor(&cfg);

        assert!(run(&executor, executor.collect_work_items()).is_empty());
    }

    #[test]
    fn test_unreadable_input_fails_that_day_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("2020_day01.txt"), [0xff, 0xfe, b'\n']).unwrap();
        fs::write(dir.path().join("2020_day02.txt"), "4\n5\n").unwrap();
        for mode in [ParallelizeBy::Sequential, ParallelizeBy::Part] {
            let mut cfg = config(&dir, mode);
            cfg.year_filter = Some(2020);
            let executor = executor(&cfg);
            let (present, _) = executor.partition_by_input(executor.collect_work_items());

            let (tx, rx) = std::sync::mpsc::channel();
            assert!(executor.execute(present, tx).is_ok(), "mode {:?}", mode);
            let mut results: Vec<SolverResult> = rx.into_iter().collect();
            results.sort_by_key(|r| (r.day, r.part));

            assert_eq!(results.len(), 4);
            for result in &results[..2] {
                assert!(matches!(
                    &result.answer,
                    Err(SolverError::ParseError(ParseError::InvalidFormat(msg))) if msg.contains("2020_day01.txt")
                ));
            }
            let answers: Vec<_> = results[2..]
                .iter()
                .map(|r| r.answer.as_ref().unwrap().clone())
                .collect();
            assert_eq!(answers, vec!["9".to_string(), "2".to_string()]);
        }
    }
}
