use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use super::nonempty_lines;
use crate::{Error, Result};

/// Step to the steps that must finish before it.
pub type Requirements = BTreeMap<char, BTreeSet<char>>;

pub fn parse_requirements(input: &str) -> Result<Requirements> {
    let re = Regex::new(r"^Step ([A-Z]) must be finished before step ([A-Z]) can begin\.$")?;
    let mut reqs = Requirements::new();
    for line in nonempty_lines(input) {
        let caps = re.captures(line.trim()).ok_or_else(|| Error::parse("step requirement", line))?;
        let (before, after) = (caps[1].chars().next(), caps[2].chars().next());
        let (Some(before), Some(after)) = (before, after) else {continue};
        reqs.entry(before).or_default();
        reqs.entry(after).or_default().insert(before);
    }
    Ok(reqs)
}

fn available<'r>(reqs: &'r Requirements, done: &'r BTreeSet<char>) -> impl Iterator<Item = char> + 'r {
    reqs.iter().filter(|&(step, before)| !done.contains(step) && before.is_subset(done)).map(|(&step, _)| step)
}

/// Steps in the order a single worker does them, alphabetically among ready ones.
pub fn order(reqs: &Requirements) -> Result<String> {
    let mut done = BTreeSet::new();
    let mut out = String::with_capacity(reqs.len());
    loop {
        let Some(step) = available(reqs, &done).next() else {break};
        done.insert(step);
        out.push(step);
    }
    if out.len() < reqs.len() {return Err(Error::Unsolvable("the steps form a cycle".into()))}
    Ok(out)
}

/// Seconds for `workers` to finish every step, step `X` taking `base` plus
/// its position in the alphabet.
pub fn assembly_time(reqs: &Requirements, workers: usize, base: u32) -> Result<u32> {
    let mut done = BTreeSet::new();
    let mut ongoing: Vec<(u32, char)> = Vec::with_capacity(workers);
    let mut t = 0;
    loop {
        let ready = available(reqs, &done)
            .filter(|step| ongoing.iter().all(|&(_, s)| s != *step))
            .take(workers - ongoing.len())
            .collect::<Vec<_>>();
        for step in ready {
            ongoing.push((t + base + (step as u32 - 'A' as u32 + 1), step));
        }
        let Some(next_t) = ongoing.iter().map(|&(ot, _)| ot).min() else {break};
        t = next_t;
        ongoing.retain(|&(ot, step)| if ot == t {done.insert(step); false} else {true});
    }
    if done.len() < reqs.len() {return Err(Error::Unsolvable("the steps form a cycle".into()))}
    Ok(t)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let reqs = parse_requirements(input)?;
    if part == 1 {order(&reqs)} else {Ok(assembly_time(&reqs, 5, 60)?.to_string())}
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEPS: &str = "\
Step C must be finished before step A can begin.
Step C must be finished before step F can begin.
Step A must be finished before step B can begin.
Step A must be finished before step D can begin.
Step B must be finished before step E can begin.
Step D must be finished before step E can begin.
Step F must be finished before step E can begin.
";

    #[test]
    fn single_worker_order() {
        assert_eq!(solve(1, STEPS).unwrap(), "CABDFE");
    }

    #[test]
    fn ready_steps_go_alphabetically() {
        let reqs = parse_requirements("\
Step A must be finished before step D can begin.
Step B must be finished before step D can begin.
Step C must be finished before step E can begin.
Step D must be finished before step E can begin.
Step Z must be finished before step A can begin.
").unwrap();
        assert_eq!(order(&reqs).unwrap(), "BCZADE");
        assert_eq!(assembly_time(&reqs, 1, 0).unwrap(), 1 + 2 + 3 + 26 + 4 + 5);
    }

    #[test]
    fn two_workers_no_base() {
        assert_eq!(assembly_time(&parse_requirements(STEPS).unwrap(), 2, 0).unwrap(), 15);
    }

    #[test]
    fn cycles_are_reported() {
        let reqs = parse_requirements("Step A must be finished before step B can begin.\n\
                                       Step B must be finished before step A can begin.").unwrap();
        assert!(order(&reqs).is_err());
        assert!(assembly_time(&reqs, 2, 0).is_err());
    }
}
