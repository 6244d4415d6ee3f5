use itertools::Itertools;
use rustc_hash::FxHashSet;

use super::nonempty_lines;
use crate::{Error, Result};

pub fn solve(part: u8, input: &str) -> Result<String> {
    let changes = nonempty_lines(input)
        .map(|line| line.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()?;
    if part == 1 {return Ok(changes.iter().sum::<i64>().to_string())}
    first_repeat(&changes)
        .map(|freq| freq.to_string())
        .ok_or_else(|| Error::Unsolvable("the frequency never repeats".into()))
}

/// The first running total seen twice while cycling through `changes`.
///
/// Each pass shifts every total by the same drift, so once the drift has
/// carried the totals past their first-pass spread nothing new can repeat.
pub fn first_repeat(changes: &[i64]) -> Option<i64> {
    let drift: i64 = changes.iter().sum();
    let totals = changes.iter().scan(0, |f, c| {*f += c; Some(*f)});
    let (lo, hi) = std::iter::once(0).chain(totals).minmax().into_option()?;
    let passes = if drift == 0 {1} else {(hi - lo) / drift.abs() + 2};

    let mut seen = FxHashSet::default();
    seen.insert(0);
    let mut freq = 0;
    for change in changes.iter().cycle().take(passes as usize * changes.len()) {
        freq += change;
        if !seen.insert(freq) {return Some(freq)}
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_changes() {
        assert_eq!(solve(1, "+1\n-2\n+3\n+1\n").unwrap(), "3");
        assert_eq!(solve(1, "-1\n-2\n-3").unwrap(), "-6");
    }

    #[test]
    fn finds_first_repeat() {
        assert_eq!(solve(2, "+1\n-2\n+3\n+1\n").unwrap(), "2");
        assert_eq!(first_repeat(&[1, -1]), Some(0));
        assert_eq!(first_repeat(&[3, 3, 4, -2, -4]), Some(10));
        assert_eq!(first_repeat(&[-6, 3, 8, 5, -6]), Some(5));
        assert_eq!(first_repeat(&[7, 7, -2, -7, -4]), Some(14));
    }

    #[test]
    fn steady_drift_never_repeats() {
        assert_eq!(first_repeat(&[1]), None);
        assert!(matches!(solve(2, "+2\n+3"), Err(Error::Unsolvable(_))));
        assert!(solve(1, "+1\nfive").is_err());
    }
}
