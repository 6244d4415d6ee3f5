use log::debug;
use rustc_hash::FxHashMap;

use crate::{Error, Result};

/// A row of pots, trimmed to the first and last plant, with the number of
/// the first pot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pots {
    pub plants: Vec<bool>,
    pub offset: i64,
}

impl Pots {
    fn trimmed(plants: Vec<bool>, offset: i64) -> Pots {
        let Some(first) = plants.iter().position(|&p| p) else {return Pots {plants: vec![], offset: 0}};
        let last = plants.iter().rposition(|&p| p).unwrap_or(first);
        Pots {plants: plants[first ..= last].to_vec(), offset: offset + first as i64}
    }

    pub fn step(&self, rules: &[bool; 32]) -> Pots {
        if self.plants.is_empty() {return self.clone()}
        let padded = [false; 4].iter().chain(&self.plants).chain(&[false; 4]).copied().collect::<Vec<_>>();
        let mut next = vec![false; padded.len()];
        for i in 2 .. padded.len() - 2 {
            let ix = padded[i - 2 ..= i + 2].iter().fold(0, |a, &b| 2 * a + b as usize);
            next[i] = rules[ix];
        }
        Pots::trimmed(next, self.offset - 4)
    }

    pub fn sum(&self) -> i64 {
        (self.offset ..).zip(&self.plants).filter(|&(_, &p)| p).map(|(i, _)| i).sum()
    }
}

fn pot(c: u8) -> Result<bool> {
    match c {b'#' => Ok(true), b'.' => Ok(false), _ => Err(Error::parse("pot", (c as char).to_string()))}
}

pub fn parse(input: &str) -> Result<(Pots, [bool; 32])> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());
    let first = lines.next().unwrap_or_default();
    let initial = first.strip_prefix("initial state: ").ok_or_else(|| Error::parse("initial state", first))?;
    let pots = Pots::trimmed(initial.bytes().map(pot).collect::<Result<_>>()?, 0);
    let mut rules = [false; 32];
    for line in lines {
        let (from, to) = line.split_once(" => ").ok_or_else(|| Error::parse("rule", line))?;
        if from.len() != 5 || to.len() != 1 {return Err(Error::parse("rule", line))}
        let ix = from.bytes().map(pot).try_fold(0, |a, b| b.map(|b| 2 * a + b as usize))?;
        rules[ix] = pot(to.as_bytes()[0])?;
    }
    Ok((pots, rules))
}

/// The pots after `generations`. Once a trimmed pattern comes back the
/// remaining whole cycles are skipped by shifting the offset.
pub fn grow(mut pots: Pots, rules: &[bool; 32], generations: u64) -> Pots {
    let mut seen: FxHashMap<Vec<bool>, (u64, i64)> = FxHashMap::default();
    let mut gen = 0;
    while gen < generations {
        if let Some((prev_gen, prev_offset)) = seen.insert(pots.plants.clone(), (gen, pots.offset)) {
            let period = gen - prev_gen;
            debug!("generation {} repeats generation {} shifted by {}", gen, prev_gen, pots.offset - prev_offset);
            let cycles = (generations - gen) / period;
            pots.offset += (pots.offset - prev_offset) * cycles as i64;
            gen += cycles * period;
            seen.clear();
            if gen == generations {break}
        }
        pots = pots.step(rules);
        gen += 1;
    }
    pots
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (pots, rules) = parse(input)?;
    if rules[0] {return Err(Error::Unsolvable("empty pots sprout forever".into()))}
    let generations = if part == 1 {20} else {50_000_000_000};
    Ok(grow(pots, &rules, generations).sum().to_string())
}
