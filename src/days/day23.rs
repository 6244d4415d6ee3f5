use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{nonempty_lines, numbers};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bot {pub pos: [i64; 3], pub r: i64}

impl Bot {
    pub fn reaches(&self, p: [i64; 3]) -> bool {manhattan(self.pos, p) <= self.r}
}

fn manhattan(a: [i64; 3], b: [i64; 3]) -> i64 {
    (0 .. 3).map(|i| (a[i] - b[i]).abs()).sum()
}

pub fn parse_bots(input: &str) -> Result<Vec<Bot>> {
    nonempty_lines(input).map(|line| match numbers(line)?[..] {
        [x, y, z, r] if r >= 0 => Ok(Bot {pos: [x, y, z], r}),
        _ => Err(Error::parse("nanobot", line)),
    }).collect()
}

/// Bots in range of the one with the largest radius, itself included.
pub fn in_range_of_strongest(bots: &[Bot]) -> usize {
    let Some(strongest) = bots.iter().reduce(|best, b| if b.r > best.r {b} else {best}) else {return 0};
    bots.iter().filter(|b| strongest.reaches(b.pos)).count()
}

/// An axis-aligned cube `lo ..= lo + size - 1` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Cube {lo: [i64; 3], size: i64}

impl Cube {
    fn distance_to(&self, p: [i64; 3]) -> i64 {
        (0 .. 3).map(|i| {
            let hi = self.lo[i] + self.size - 1;
            if p[i] < self.lo[i] {self.lo[i] - p[i]} else if p[i] > hi {p[i] - hi} else {0}
        }).sum()
    }

    fn in_range(&self, bots: &[Bot]) -> usize {
        bots.iter().filter(|b| self.distance_to(b.pos) <= b.r).count()
    }

    fn octants(&self) -> impl Iterator<Item = Cube> + '_ {
        let half = self.size / 2;
        (0 .. 8).map(move |k| Cube {
            lo: [0, 1, 2].map(|i| self.lo[i] + if k >> i & 1 == 1 {half} else {0}),
            size: half,
        })
    }
}

/// Manhattan distance from the origin to the closest point in range of the
/// most bots. Best-first search over an octree: a cube is ranked by how many
/// bots reach any part of it, then by how close it gets to the origin, so
/// the first unit cube popped is the answer.
pub fn best_spot_distance(bots: &[Bot]) -> Option<i64> {
    let origin = [0; 3];
    let lo = [0, 1, 2].map(|i| bots.iter().map(|b| b.pos[i]).chain([0]).min().unwrap_or(0));
    let hi = [0, 1, 2].map(|i| bots.iter().map(|b| b.pos[i]).chain([0]).max().unwrap_or(0));
    let span = (0 .. 3).map(|i| hi[i] - lo[i] + 1).max()?;
    let mut size = 1;
    while size < span {size *= 2;}

    let root = Cube {lo, size};
    let mut open = BinaryHeap::new();
    open.push((root.in_range(bots), Reverse(root.distance_to(origin)), Reverse(size), root));
    while let Some((_, Reverse(dist), _, cube)) = open.pop() {
        if cube.size == 1 {return Some(dist)}
        for child in cube.octants() {
            open.push((child.in_range(bots), Reverse(child.distance_to(origin)), Reverse(child.size), child));
        }
    }
    None
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let bots = parse_bots(input)?;
    if part == 1 {return Ok(in_range_of_strongest(&bots).to_string())}
    best_spot_distance(&bots).map(|d| d.to_string()).ok_or_else(|| Error::Unsolvable("no nanobots".into()))
}
