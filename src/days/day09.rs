use super::numbers;
use crate::{Error, Result};

/// Winning score of the marble game. The circle is a doubly linked list
/// kept in two index arrays, one slot per marble.
pub fn high_score(players: usize, last_marble: usize) -> usize {
    if players == 0 {return 0}
    let mut scores = vec![0; players];
    let mut nexts = vec![0; last_marble + 1];
    let mut prevs = vec![0; last_marble + 1];
    let mut curr = 0;
    for t in 1 ..= last_marble {
        if t % 23 == 0 {
            for _ in 0 .. 6 {curr = prevs[curr];}
            let removed = prevs[curr];
            scores[t % players] += removed + t;
            prevs[curr] = prevs[removed];
            nexts[prevs[curr]] = curr;
        } else {
            let left = nexts[curr];
            let right = nexts[left];
            nexts[left] = t; prevs[t] = left;
            nexts[t] = right; prevs[right] = t;
            curr = t;
        }
    }
    scores.into_iter().max().unwrap_or(0)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let [players, last] = numbers(input)?[..] else {
        return Err(Error::parse("player count and last marble", input.trim()));
    };
    if players < 1 || last < 0 {return Err(Error::parse("positive player count and last marble", input.trim()))}
    let last = last as usize * if part == 1 {1} else {100};
    Ok(high_score(players as usize, last).to_string())
}
