use itertools::Itertools;

use super::nonempty_lines;
use crate::{Error, Result};

pub fn solve(part: u8, input: &str) -> Result<String> {
    let ids = nonempty_lines(input).map(str::trim).collect::<Vec<_>>();
    if part == 1 {
        Ok(checksum(&ids).to_string())
    } else {
        common_letters(&ids).ok_or_else(|| Error::Unsolvable("no two ids differ by one letter".into()))
    }
}

pub fn checksum(ids: &[&str]) -> usize {
    let (mut has_2, mut has_3) = (0, 0);
    for id in ids {
        let counts = id.chars().counts();
        has_2 += counts.values().any(|&n| n == 2) as usize;
        has_3 += counts.values().any(|&n| n == 3) as usize;
    }
    has_2 * has_3
}

/// Letters shared by the two ids that differ in exactly one position.
pub fn common_letters(ids: &[&str]) -> Option<String> {
    ids.iter().tuple_combinations().find_map(|(a, b)| {
        if a.len() != b.len() {return None}
        let same = a.chars().zip(b.chars()).filter(|(ca, cb)| ca == cb).map(|(c, _)| c).collect::<String>();
        if same.len() + 1 == a.len() {Some(same)} else {None}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_of_box_ids() {
        let ids = ["abcdef", "bababc", "abbcde", "abcccd", "aabcdd", "abcdee", "ababab"];
        assert_eq!(checksum(&ids), 12);
    }

    #[test]
    fn finds_the_close_pair() {
        let input = "abcde\nfghij\nklmno\npqrst\nfguij\naxcye\nwvxyz\n";
        assert_eq!(solve(2, input).unwrap(), "fgij");
        assert!(solve(2, "abc\nxyz").is_err());
    }
}
