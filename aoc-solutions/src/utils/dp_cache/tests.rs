//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use super::*;

/// fib(n) depends on fib(n-1) and fib(n-2)
struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

#[test]
fn test_linear_dependency_chain() {
    let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);

    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&90), 2_880_067_194_370_816_120);
}

#[test]
fn test_diamond_dependency_memoization() {
    // A(0) depends on B(1) and C(2), both depend on D(3)
    struct Diamond {
        count: Rc<Cell<i32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.count.set(self.count.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 10,
            }
        }
    }

    let count = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        VecBackend::new(),
        Diamond {
            count: Rc::clone(&count),
        },
    );

    assert_eq!(cache.get(&0), 50);
    assert_eq!(count.get(), 4);

    // Everything is cached now
    assert_eq!(cache.get(&3), 10);
    assert_eq!(cache.get(&0), 50);
    assert_eq!(count.get(), 4);
}

#[test]
fn test_hashmap_backend_with_string_keys() {
    let cache = DpCache::new(
        HashMapBackend::new(),
        |name: &String| match name.as_str() {
            "outer" => vec!["inner".to_string(), "inner".to_string()],
            "inner" => vec!["core".to_string()],
            _ => vec![],
        },
        |_: &String, deps: Vec<u32>| 1 + deps.iter().sum::<u32>(),
    );

    assert_eq!(cache.get(&"outer".to_string()), 5);
    assert_eq!(cache.get(&"core".to_string()), 1);
}

#[test]
fn test_vec_backend_sparse_insert() {
    let mut backend: VecBackend<u8> = VecBackend::with_capacity(4);
    assert_eq!(backend.get(&7), None);
    backend.insert(7, 1);
    assert_eq!(backend.get(&7), Some(&1));
    assert_eq!(backend.get(&3), None);
}
