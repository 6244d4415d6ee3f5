use regex::Regex;

use super::nonempty_lines;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub id: usize,
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Claim {
    fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.y .. self.y + self.h).flat_map(move |y| (self.x .. self.x + self.w).map(move |x| (x, y)))
    }
}

pub fn parse_claims(input: &str) -> Result<Vec<Claim>> {
    let re = Regex::new(r"^#(\d+) @ (\d+),(\d+): (\d+)x(\d+)$")?;
    nonempty_lines(input).map(|line| {
        let caps = re.captures(line.trim()).ok_or_else(|| Error::parse("claim", line))?;
        Ok(Claim {id: caps[1].parse()?, x: caps[2].parse()?, y: caps[3].parse()?, w: caps[4].parse()?, h: caps[5].parse()?})
    }).collect()
}

/// Claims per square inch, saturating at two.
fn fabric(claims: &[Claim]) -> Vec<Vec<u8>> {
    let width = claims.iter().map(|c| c.x + c.w).max().unwrap_or(0);
    let height = claims.iter().map(|c| c.y + c.h).max().unwrap_or(0);
    let mut fabric = vec![vec![0u8; width]; height];
    for claim in claims {
        for (x, y) in claim.cells() {if fabric[y][x] < 2 {fabric[y][x] += 1}}
    }
    fabric
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let claims = parse_claims(input)?;
    let fabric = fabric(&claims);
    if part == 1 {
        Ok(fabric.iter().flatten().filter(|&&c| c == 2).count().to_string())
    } else {
        claims.iter()
            .find(|claim| claim.cells().all(|(x, y)| fabric[y][x] == 1))
            .map(|claim| claim.id.to_string())
            .ok_or_else(|| Error::Unsolvable("every claim overlaps another".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLAIMS: &str = "#1 @ 1,3: 4x4\n#2 @ 3,1: 4x4\n#3 @ 5,5: 2x2\n";

    #[test]
    fn overlapping_area() {
        assert_eq!(solve(1, CLAIMS).unwrap(), "4");
    }

    #[test]
    fn intact_claim() {
        assert_eq!(solve(2, CLAIMS).unwrap(), "3");
    }

    #[test]
    fn rejects_malformed_claims() {
        assert!(matches!(parse_claims("#1 @ 1,3 4x4"), Err(Error::Parse {..})));
    }
}
