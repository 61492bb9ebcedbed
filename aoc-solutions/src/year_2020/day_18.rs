use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

use crate::utils::parse::parse_lines;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 18, tags = ["2020", "parsing"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Number(u64),
    Add,
    Mul,
    Open,
    Close,
}

fn tokenize(line: &str) -> anyhow::Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        let token = match c {
            ' ' => continue,
            '+' => Token::Add,
            '*' => Token::Mul,
            '(' => Token::Open,
            ')' => Token::Close,
            '0'..='9' => {
                let mut value = c.to_digit(10).unwrap_or_default() as u64;
                while let Some(digit) = chars.peek().and_then(|&(_, d)| d.to_digit(10)) {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(digit as u64))
                        .ok_or_else(|| anyhow::anyhow!("number at column {} is too large", idx + 1))?;
                    chars.next();
                }
                Token::Number(value)
            }
            _ => anyhow::bail!("unexpected {:?} at column {}", c, idx + 1),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

impl AocParser for Solver {
    /// One token stream per expression
    type SharedData<'a> = Vec<Vec<Token>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let expressions = parse_lines(input, tokenize)?;
        // Surface structural errors now rather than at solve time. Zeroed
        // operands keep overflow out of it; that is a solve-time failure.
        for (idx, tokens) in expressions.iter().enumerate() {
            let shape: Vec<Token> = tokens
                .iter()
                .map(|&token| match token {
                    Token::Number(_) => Token::Number(0),
                    token => token,
                })
                .collect();
            evaluate(&shape, |_| 1).map_err(|e| {
                ParseError::InvalidFormat(format!("(expression {}) {}", idx + 1, e))
            })?;
        }
        Ok(expressions)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_all(shared, |_| 1)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_all(shared, |op| if op == Token::Add { 2 } else { 1 })
    }
}

fn sum_all(expressions: &[Vec<Token>], precedence: fn(Token) -> u8) -> Result<String, SolveError> {
    expressions
        .iter()
        .try_fold(0u64, |total, tokens| {
            let value = evaluate(tokens, precedence).map_err(|e| SolveError::failed(e.to_string()))?;
            total
                .checked_add(value)
                .ok_or_else(|| SolveError::failed("sum of all expressions overflows"))
        })
        .map(|total| total.to_string())
}

/// Evaluate with the given operator precedence; equal precedence is
/// left-associative.
fn evaluate(tokens: &[Token], precedence: fn(Token) -> u8) -> anyhow::Result<u64> {
    let mut evaluator = Evaluator {
        tokens,
        pos: 0,
        precedence,
    };
    let value = evaluator.expression(0)?;
    match evaluator.tokens.get(evaluator.pos) {
        None => Ok(value),
        Some(token) => anyhow::bail!("unexpected {:?} at token {}", token, evaluator.pos + 1),
    }
}

struct Evaluator<'t> {
    tokens: &'t [Token],
    pos: usize,
    precedence: fn(Token) -> u8,
}

impl Evaluator<'_> {
    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied();
        self.pos += 1;
        token
    }

    fn operand(&mut self) -> anyhow::Result<u64> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::Open) => {
                let value = self.expression(0)?;
                match self.next() {
                    Some(Token::Close) => Ok(value),
                    _ => anyhow::bail!("unclosed parenthesis"),
                }
            }
            Some(token) => anyhow::bail!("expected a number, found {:?}", token),
            None => anyhow::bail!("expression ends early"),
        }
    }

    fn expression(&mut self, min_precedence: u8) -> anyhow::Result<u64> {
        let mut lhs = self.operand()?;
        while let Some(&(op @ (Token::Add | Token::Mul))) = self.tokens.get(self.pos) {
            let precedence = (self.precedence)(op);
            if precedence < min_precedence {
                break;
            }
            self.pos += 1;
            let rhs = self.expression(precedence + 1)?;
            lhs = match op {
                Token::Add => lhs.checked_add(rhs),
                _ => lhs.checked_mul(rhs),
            }
            .ok_or_else(|| anyhow::anyhow!("{:?} overflows at token {}", op, self.pos))?;
        }
        Ok(lhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::year_2020::solve_example;

    const CASES: [(&str, u64, u64); 6] = [
        ("1 + 2 * 3 + 4 * 5 + 6", 71, 231),
        ("1 + (2 * 3) + (4 * (5 + 6))", 51, 51),
        ("2 * 3 + (4 * 5)", 26, 46),
        ("5 + (8 * 3 + 9 + 3 * 4 * 3)", 437, 1445),
        ("5 * 9 * (7 * 3 * 3 + 9 * 3 + (8 + 6 * 4))", 12240, 669060),
        ("((2 + 4 * 9) * (6 + 9 * 8 + 6) + 6) + 2 + 4 * 2", 13632, 23340),
    ];

    #[test]
    fn test_each_expression() {
        for (expression, flat, additive_first) in CASES {
            assert_eq!(solve_example::<Solver>(expression, 1), flat.to_string(), "{}", expression);
            assert_eq!(
                solve_example::<Solver>(expression, 2),
                additive_first.to_string(),
                "{}",
                expression
            );
        }
    }

    #[test]
    fn test_sum_of_lines() {
        let input = CASES.map(|(expression, _, _)| expression).join("\n");
        let flat: u64 = CASES.iter().map(|c| c.1).sum();
        assert_eq!(solve_example::<Solver>(&input, 1), flat.to_string());
    }

    #[test]
    fn test_multi_digit_numbers() {
        assert_eq!(solve_example::<Solver>("12 + 30 * 2", 1), "84");
        assert_eq!(solve_example::<Solver>("2 * 12 + 30", 2), "84");
    }

    #[test]
    fn test_malformed_expressions() {
        assert!(Solver::parse("1 + (2 * 3").is_err());
        assert!(Solver::parse("1 + 2)").is_err());
        assert!(Solver::parse("1 +").is_err());
        assert!(Solver::parse("1 - 2").is_err());
    }

    #[test]
    fn test_oversized_number() {
        let err = Solver::parse("99999999999999999999 + 1").unwrap_err();
        assert!(err.to_string().contains("too large"));
        assert!(Solver::parse("18446744073709551615 + 1").is_ok());
    }

    #[test]
    fn test_overflowing_result_fails() {
        let mut expressions = Solver::parse("4294967296 * 4294967296").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut expressions).is_err());
        assert!(<Solver as PartSolver<2>>::solve(&mut expressions).is_err());

        let mut lines = Solver::parse("18446744073709551615\n1").unwrap();
        assert!(<Solver as PartSolver<1>>::solve(&mut lines).is_err());
    }
}
