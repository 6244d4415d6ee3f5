use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::numbers;
use crate::{Error, Result};

const MARGIN: usize = 100;
const SWITCH_MINUTES: u32 = 7;

/// Region types double as the one tool that cannot be used there:
/// rocky forbids neither, wet forbids the torch, narrow forbids the gear.
const TORCH: usize = 1;

pub struct Cave {
    target: (usize, usize),
    /// Erosion levels, indexed `[y][x]`, covering the target plus a margin.
    erosion: Vec<Vec<usize>>,
}

impl Cave {
    pub fn new(depth: usize, target: (usize, usize)) -> Cave {
        let (w, h) = (target.0 + MARGIN, target.1 + MARGIN);
        let mut erosion = vec![vec![0; w]; h];
        for y in 0 .. h {for x in 0 .. w {
            let geo = match (x, y) {
                (0, 0) => 0,
                _ if (x, y) == target => 0,
                (x, 0) => x * 16807,
                (0, y) => y * 48271,
                _ => erosion[y][x - 1] * erosion[y - 1][x],
            };
            erosion[y][x] = (geo + depth) % 20183;
        }}
        Cave {target, erosion}
    }

    pub fn region(&self, x: usize, y: usize) -> usize {self.erosion[y][x] % 3}

    pub fn risk_level(&self) -> usize {
        (0 ..= self.target.1).flat_map(|y| (0 ..= self.target.0).map(move |x| (x, y)))
            .map(|(x, y)| self.region(x, y))
            .sum()
    }

    /// Minutes to reach the target holding the torch, starting at the mouth
    /// with the torch. Moving takes a minute; switching tools takes seven.
    pub fn rescue_time(&self) -> Option<u32> {
        let (w, h) = (self.erosion[0].len(), self.erosion.len());
        let mut best = vec![vec![[u32::MAX; 3]; w]; h];
        let mut open = BinaryHeap::new();
        best[0][0][TORCH] = 0;
        open.push(Reverse((0, 0usize, 0usize, TORCH)));
        while let Some(Reverse((t, x, y, tool))) = open.pop() {
            if (x, y, tool) == (self.target.0, self.target.1, TORCH) {return Some(t)}
            if t > best[y][x][tool] {continue}
            let other = 3 - self.region(x, y) - tool;
            let mut moves = vec![(t + SWITCH_MINUTES, x, y, other)];
            for (nx, ny) in [(x.wrapping_sub(1), y), (x + 1, y), (x, y.wrapping_sub(1)), (x, y + 1)] {
                if nx < w && ny < h && self.region(nx, ny) != tool {moves.push((t + 1, nx, ny, tool));}
            }
            for (nt, nx, ny, ntool) in moves {
                if nt < best[ny][nx][ntool] {
                    best[ny][nx][ntool] = nt;
                    open.push(Reverse((nt, nx, ny, ntool)));
                }
            }
        }
        None
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let [depth, tx, ty] = numbers(input)?[..] else {return Err(Error::parse("depth and target", input.trim()))};
    if depth < 0 || tx < 0 || ty < 0 {return Err(Error::parse("non-negative depth and target", input.trim()))}
    let cave = Cave::new(depth as usize, (tx as usize, ty as usize));
    if part == 1 {return Ok(cave.risk_level().to_string())}
    cave.rescue_time().map(|t| t.to_string()).ok_or_else(|| Error::Unsolvable("the target is unreachable".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAVE: &str = "depth: 510\ntarget: 10,10\n";

    #[test]
    fn region_types() {
        let cave = Cave::new(510, (10, 10));
        assert_eq!(cave.erosion[0][0], 510);
        assert_eq!(cave.erosion[1][1], 1805);
        assert_eq!(cave.region(1, 0), 1);
        assert_eq!(cave.region(1, 1), 2);
        assert_eq!(cave.region(10, 10), 0);
    }

    #[test]
    fn risk_level() {
        assert_eq!(solve(1, CAVE).unwrap(), "114");
    }

    #[test]
    fn fastest_rescue() {
        assert_eq!(solve(2, CAVE).unwrap(), "45");
    }
}
