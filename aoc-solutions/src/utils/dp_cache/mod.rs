//! Dynamic Programming Cache with Lazy Evaluation
//!
//! Memoization for values that depend on other values through a directed
//! acyclic graph: bag contents (2020 day 7) and adapter arrangements
//! (2020 day 10) both fit this shape.
//!
//! # Backend Types
//!
//! - [`VecBackend`]: dense `usize` indices (auto-growing)
//! - [`HashMapBackend`]: arbitrary hashable index types
//!
//! # Warning: Cycle Behavior
//!
//! **These caches do NOT support cycle detection.** A cyclic dependency graph
//! overflows the stack.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//! use std::collections::HashMap;
//!
//! /// Total number of nodes below each node of a tree
//! struct Descendants<'a>(HashMap<&'a str, Vec<&'a str>>);
//!
//! impl<'a> DpProblem<&'a str, usize> for Descendants<'a> {
//!     fn deps(&self, node: &&'a str) -> Vec<&'a str> {
//!         self.0.get(node).cloned().unwrap_or_default()
//!     }
//!
//!     fn compute(&self, _node: &&'a str, deps: Vec<usize>) -> usize {
//!         deps.iter().map(|d| d + 1).sum()
//!     }
//! }
//!
//! let tree = HashMap::from([("root", vec!["a", "b"]), ("a", vec!["c"])]);
//! let cache = DpCache::with_problem(HashMapBackend::new(), Descendants(tree));
//! assert_eq!(cache.get(&"root"), 3);
//! assert_eq!(cache.get(&"b"), 0);
//! ```

mod backend;
mod cache;
mod problem;

pub use backend::{Backend, HashMapBackend, VecBackend};
pub use cache::DpCache;
pub use problem::{ClosureProblem, DpProblem};

#[cfg(test)]
mod tests;
