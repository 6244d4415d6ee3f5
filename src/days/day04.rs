use regex::Regex;
use rustc_hash::FxHashMap;

use super::nonempty_lines;
use crate::{Error, Result};

/// Minutes past midnight each guard spent asleep, tallied per minute.
pub fn sleep_tallies(input: &str) -> Result<FxHashMap<u32, [u32; 60]>> {
    let re = Regex::new(r"^\[\d+-\d+-\d+ \d+:(\d+)\] (?:Guard #(\d+) begins shift|(falls asleep)|(wakes up))$")?;
    let mut lines = nonempty_lines(input).map(str::trim).collect::<Vec<_>>();
    lines.sort_unstable();

    let mut guard = None;
    let mut fell_asleep = None;
    let mut tallies: FxHashMap<u32, [u32; 60]> = FxHashMap::default();
    for line in lines {
        let caps = re.captures(line).ok_or_else(|| Error::parse("guard record", line))?;
        let min: usize = caps[1].parse()?;
        if let Some(id) = caps.get(2) {
            guard = Some(id.as_str().parse()?);
        } else if caps.get(3).is_some() {
            fell_asleep = Some(min);
        } else {
            let (Some(id), Some(from)) = (guard, fell_asleep.take()) else {
                return Err(Error::parse("wake-up after a guard fell asleep", line));
            };
            let tally = tallies.entry(id).or_insert([0; 60]);
            for t in from .. min.min(60) {tally[t] += 1;}
        }
    }
    Ok(tallies)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let tallies = sleep_tallies(input)?;
    let sleepiest = if part == 1 {
        tallies.iter().max_by_key(|(_, tally)| tally.iter().sum::<u32>())
    } else {
        tallies.iter().max_by_key(|(_, tally)| tally.iter().max().copied())
    };
    let (id, tally) = sleepiest.ok_or_else(|| Error::Unsolvable("nobody ever slept".into()))?;
    let minute = (0 .. 60).max_by_key(|&min| (tally[min], std::cmp::Reverse(min))).unwrap_or(0);
    Ok((*id as usize * minute).to_string())
}
