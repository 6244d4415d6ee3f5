use crate::{Error, Result};

/// Polymer left after every adjacent same-type, opposite-polarity pair reacts.
pub fn react(units: impl IntoIterator<Item = u8>) -> Vec<u8> {
    let mut out = vec![];
    for c in units {
        if out.last() == Some(&(c ^ 0x20)) {out.pop();} else {out.push(c);}
    }
    out
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let polymer = input.trim().as_bytes();
    if let Some(&bad) = polymer.iter().find(|c| !c.is_ascii_alphabetic()) {
        return Err(Error::parse("polymer unit", (bad as char).to_string()));
    }
    let reacted = react(polymer.iter().copied());
    if part == 1 {return Ok(reacted.len().to_string())}

    let best = (b'a' ..= b'z').map(|unit|
        react(reacted.iter().copied().filter(|c| c.to_ascii_lowercase() != unit)).len()
    ).min().unwrap_or(0);
    Ok(best.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_reaction() {
        assert_eq!(react(*b"dabAcCaCBAcCcaDA"), b"dabCBAcaDA");
        assert_eq!(react(*b"abBA"), b"");
        assert_eq!(react(*b"aabAAB"), b"aabAAB");
        assert_eq!(solve(1, "dabAcCaCBAcCcaDA\n").unwrap(), "10");
    }

    #[test]
    fn best_unit_to_remove() {
        assert_eq!(solve(2, "dabAcCaCBAcCcaDA").unwrap(), "4");
    }
}
