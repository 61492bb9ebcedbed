use std::collections::{HashSet, VecDeque};

use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::{blocks, number};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 22, tags = ["2020", "simulation", "recursion"])]
pub struct Solver;

type Deck = VecDeque<u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Player {
    One,
    Two,
}

impl AocParser for Solver {
    type SharedData<'a> = (Deck, Deck);

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let sections = blocks(input);
        let deck = |idx: usize| -> Result<Deck, ParseError> {
            let header = format!("Player {}:", idx + 1);
            let section = sections
                .get(idx)
                .ok_or_else(|| ParseError::MissingData(header.clone()))?;
            match section.split_first() {
                Some((&first, cards)) if first == header => cards
                    .iter()
                    .map(|card| {
                        number(card, "card").map_err(|e| ParseError::InvalidFormat(e.to_string()))
                    })
                    .collect(),
                _ => Err(ParseError::InvalidFormat(format!("expected `{}`", header))),
            }
        };
        Ok((deck(0)?, deck(1)?))
    }
}

fn score(deck: &Deck) -> u64 {
    deck.iter()
        .rev()
        .zip(1..)
        .map(|(&card, weight)| card as u64 * weight)
        .sum()
}

fn combat(mut one: Deck, mut two: Deck) -> (Player, Deck) {
    while let (Some(a), Some(b)) = (one.front().copied(), two.front().copied()) {
        one.pop_front();
        two.pop_front();
        if a > b {
            one.extend([a, b]);
        } else {
            two.extend([b, a]);
        }
    }
    if two.is_empty() { (Player::One, one) } else { (Player::Two, two) }
}

fn recursive_combat(mut one: Deck, mut two: Deck) -> (Player, Deck) {
    let mut seen = HashSet::new();
    while !one.is_empty() && !two.is_empty() {
        // A repeated position ends this game in player one's favour
        if !seen.insert((one.clone(), two.clone())) {
            return (Player::One, one);
        }
        let (Some(a), Some(b)) = (one.pop_front(), two.pop_front()) else {
            break;
        };
        let winner = if one.len() >= a as usize && two.len() >= b as usize {
            let sub_one = one.iter().take(a as usize).copied().collect();
            let sub_two = two.iter().take(b as usize).copied().collect();
            recursive_combat(sub_one, sub_two).0
        } else if a > b {
            Player::One
        } else {
            Player::Two
        };
        match winner {
            Player::One => one.extend([a, b]),
            Player::Two => two.extend([b, a]),
        }
    }
    if two.is_empty() { (Player::One, one) } else { (Player::Two, two) }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, deck) = combat(shared.0.clone(), shared.1.clone());
        Ok(score(&deck).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, deck) = recursive_combat(shared.0.clone(), shared.1.clone());
        Ok(score(&deck).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const EXAMPLE: &str = "Player 1:\n9\n2\n6\n3\n1\n\nPlayer 2:\n5\n8\n4\n7\n10\n";

    #[test]
    fn test_example() {
        assert_eq!(solve_example::<Solver>(EXAMPLE, 1), "306");
        assert_eq!(solve_example::<Solver>(EXAMPLE, 2), "291");
    }

    #[test]
    fn test_repeated_position_ends_game() {
        let input = "Player 1:\n43\n19\n\nPlayer 2:\n2\n29\n14\n";
        let (one, two) = Solver::parse(input).unwrap();
        let (winner, deck) = recursive_combat(one, two);
        assert_eq!(winner, Player::One);
        assert_eq!(score(&deck), 105);
    }

    #[test]
    fn test_winners() {
        let (one, two) = Solver::parse(EXAMPLE).unwrap();
        assert_eq!(combat(one.clone(), two.clone()).0, Player::Two);
        assert_eq!(recursive_combat(one, two).0, Player::Two);
    }

    #[test]
    fn test_missing_player() {
        assert!(Solver::parse("Player 1:\n1\n2\n").is_err());
        assert!(Solver::parse("Player 1:\n1\n\nPlayer 3:\n2\n").is_err());
    }
}
