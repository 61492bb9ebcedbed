//! Input-reading helpers shared by the day parsers

use aoc_solver::ParseError;

/// Parse every non-empty line with `f`, tagging failures with their line number.
///
/// Trailing blank lines are ignored, so a final newline never produces a
/// duplicate or empty record.
///
/// ```
/// use aoc_solutions::utils::parse::parse_lines;
///
/// let values = parse_lines("1\n2\n\n", |line| Ok(line.parse::<u8>()?)).unwrap();
/// assert_eq!(values, vec![1, 2]);
///
/// let err = parse_lines("1\nx", |line| Ok(line.parse::<u8>()?)).unwrap_err();
/// assert!(err.to_string().contains("(line 2)"));
/// ```
pub fn parse_lines<'a, T, F>(input: &'a str, mut f: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(line_idx, line)| f(line.trim_end()).map_err(|e| invalid_line(line_idx, e)))
        .collect()
}

/// Split the input into groups of lines separated by blank lines.
///
/// ```
/// use aoc_solutions::utils::parse::blocks;
///
/// let groups = blocks("a\nb\n\n\nc\n");
/// assert_eq!(groups, vec![vec!["a", "b"], vec!["c"]]);
/// ```
pub fn blocks(input: &str) -> Vec<Vec<&str>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for line in input.lines().map(str::trim_end) {
        if line.is_empty() {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Convert a line-level error into a [`ParseError`] pointing at `line_idx` (0-based).
pub fn invalid_line(line_idx: usize, error: impl std::fmt::Display) -> ParseError {
    ParseError::InvalidFormat(format!("(line {}) {}", line_idx + 1, error))
}

/// Parse `value` as a number, naming `what` in the error.
pub fn number<T>(value: &str, what: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid {} {:?}: {}", what, value, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_numbers_count_blank_lines() {
        let err = parse_lines("1\n\n3\nnope", |line| number::<u32>(line, "value")).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidFormat(
                "(line 4) invalid value \"nope\": invalid digit found in string".to_string()
            )
        );
    }

    #[test]
    fn crlf_input_is_accepted() {
        assert_eq!(blocks("a\r\nb\r\n\r\nc"), vec![vec!["a", "b"], vec!["c"]]);
        assert_eq!(
            parse_lines("4\r\n5\r\n", |line| number::<u32>(line, "value")).unwrap(),
            vec![4, 5]
        );
    }

    #[test]
    fn empty_input_has_no_blocks() {
        assert!(blocks("").is_empty());
        assert!(blocks("\n\n").is_empty());
    }
}
