use log::debug;
use regex::Regex;

use super::nonempty_lines;
use crate::{Error, Result};

const SAND: u8 = b'.';
const CLAY: u8 = b'#';
const FLOWING: u8 = b'|';
const SETTLED: u8 = b'~';

const SPRING_X: usize = 500;

/// Ground slice around the spring. Column 0 is `left`, one left of the leftmost clay.
#[derive(Debug, Clone)]
pub struct Ground {
    grid: Vec<Vec<u8>>,
    left: usize,
    min_y: usize,
}

pub fn parse(input: &str) -> Result<Ground> {
    let re = Regex::new(r"^([xy])=(\d+), ([xy])=(\d+)\.\.(\d+)$")?;
    let mut clay = vec![];
    for line in nonempty_lines(input) {
        let line = line.trim();
        let caps = re.captures(line).ok_or_else(|| Error::parse("clay vein", line))?;
        if caps[1] == caps[3] {return Err(Error::parse("vein across both axes", line))}
        let (at, from, to): (usize, usize, usize) = (caps[2].parse()?, caps[4].parse()?, caps[5].parse()?);
        for along in from ..= to {
            clay.push(if &caps[1] == "x" {(at, along)} else {(along, at)});
        }
    }
    let (Some(min_x), Some(max_x)) = (clay.iter().map(|c| c.0).min(), clay.iter().map(|c| c.0).max())
        else {return Err(Error::parse("clay veins", input.trim()))};
    let (min_x, max_x) = (min_x.min(SPRING_X), max_x.max(SPRING_X));
    let (Some(min_y), Some(max_y)) = (clay.iter().map(|c| c.1).min(), clay.iter().map(|c| c.1).max())
        else {return Err(Error::parse("clay veins", input.trim()))};
    let left = min_x.saturating_sub(1);
    let mut grid = vec![vec![SAND; max_x + 2 - left]; max_y + 1];
    for (x, y) in clay {grid[y][x - left] = CLAY;}
    Ok(Ground {grid, left, min_y})
}

impl Ground {
    fn max_y(&self) -> usize {self.grid.len() - 1}

    fn supported(&self, x: usize, y: usize) -> bool {
        matches!(self.grid[y + 1][x], CLAY | SETTLED)
    }

    /// Walks sideways along a supported row. Returns the last square water
    /// reaches and whether clay stopped it, rather than a drop.
    fn edge(&self, x: usize, y: usize, right: bool) -> (usize, bool) {
        let mut x = x;
        loop {
            let next = if right {x + 1} else {x - 1};
            if self.grid[y][next] == CLAY {return (x, true)}
            x = next;
            if !self.supported(x, y) {return (x, false)}
        }
    }

    /// Water falling from `(x, top)`: drops to a floor, then fills and spills.
    /// Settled rows never rise above `top`; the caller rescans its own row.
    fn flow(&mut self, x: usize, top: usize) {
        let mut y = top;
        loop {
            self.grid[y][x] = FLOWING;
            if y == self.max_y() {return}
            match self.grid[y + 1][x] {
                SAND => y += 1,
                FLOWING => return,
                _ => break,
            }
        }
        let mut last = None;
        loop {
            let (l, walled_l) = self.edge(x, y, false);
            let (r, walled_r) = self.edge(x, y, true);
            if walled_l && walled_r {
                self.grid[y][l ..= r].fill(SETTLED);
                if y == top {return}
                y -= 1;
                last = None;
                continue;
            }
            if last == Some((l, r)) {return}
            last = Some((l, r));
            self.grid[y][l ..= r].fill(FLOWING);
            if !walled_l {self.flow(l, y)}
            if !walled_r {self.flow(r, y)}
        }
    }

    /// Runs the spring and counts (wet squares, settled squares) within the clay's rows.
    pub fn fill(mut self) -> (usize, usize) {
        self.flow(SPRING_X - self.left, 0);
        let rows = &self.grid[self.min_y ..];
        let count = |kind| rows.iter().flatten().filter(|&&c| c == kind).count();
        let (flowing, settled) = (count(FLOWING), count(SETTLED));
        debug!("{} flowing and {} settled squares", flowing, settled);
        (flowing + settled, settled)
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (wet, settled) = parse(input)?.fill();
    Ok((if part == 1 {wet} else {settled}).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN: &str = "\
x=495, y=2..7
y=7, x=495..501
x=501, y=3..7
x=498, y=2..4
x=506, y=1..2
x=498, y=10..13
x=504, y=10..13
y=13, x=498..504
";

    #[test]
    fn example_reservoirs() {
        assert_eq!(solve(1, SCAN).unwrap(), "57");
        assert_eq!(solve(2, SCAN).unwrap(), "29");
    }

    #[test]
    fn bucket_overflows_both_ways() {
        let (wet, settled) = parse("x=499, y=2..4\nx=503, y=2..4\ny=4, x=499..503").unwrap().fill();
        assert_eq!((wet, settled), (12, 6));
    }

    #[test]
    fn spill_into_a_wider_basin() {
        // The inner cup overflows into the outer one until the outer one is full too.
        let ground = parse("\
x=498, y=2..3
x=502, y=2..3
y=3, x=498..502
x=495, y=1..6
x=505, y=1..6
y=6, x=495..505
").unwrap();
        let (wet, settled) = ground.fill();
        assert_eq!(settled, 9 * 5 - 7);
        assert_eq!(wet, settled + 2 * 6);
    }

    #[test]
    fn rejects_bad_veins() {
        assert!(parse("x=1, x=2..3").is_err());
        assert!(parse("z=1, y=2..3").is_err());
        assert!(parse("").is_err());
    }
}
