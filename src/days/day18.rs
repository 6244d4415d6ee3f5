use log::debug;
use rustc_hash::FxHashMap;

use super::nonempty_lines;
use crate::{Error, Result};

const OPEN: u8 = b'.';
const TREES: u8 = b'|';
const LUMBERYARD: u8 = b'#';

pub type Area = Vec<Vec<u8>>;

pub fn parse(input: &str) -> Result<Area> {
    let area: Area = nonempty_lines(input).map(|line| line.trim().as_bytes().to_vec()).collect();
    for row in &area {
        if row.len() != area[0].len() {return Err(Error::parse("rectangular area", String::from_utf8_lossy(row)))}
        if let Some(&c) = row.iter().find(|&&c| ![OPEN, TREES, LUMBERYARD].contains(&c)) {
            return Err(Error::parse("acre", (c as char).to_string()));
        }
    }
    Ok(area)
}

/// One minute of growth; every acre changes based on its eight neighbours.
pub fn step(area: &Area) -> Area {
    let mut next = area.clone();
    for (y, row) in area.iter().enumerate() {
        for (x, &acre) in row.iter().enumerate() {
            let (mut trees, mut yards) = (0, 0);
            for ny in y.saturating_sub(1) ..= y + 1 {for nx in x.saturating_sub(1) ..= x + 1 {
                if (nx, ny) == (x, y) {continue}
                match area.get(ny).and_then(|r| r.get(nx)) {
                    Some(&TREES) => trees += 1,
                    Some(&LUMBERYARD) => yards += 1,
                    _ => {}
                }
            }}
            next[y][x] = match acre {
                OPEN if trees >= 3 => TREES,
                TREES if yards >= 3 => LUMBERYARD,
                LUMBERYARD if yards == 0 || trees == 0 => OPEN,
                same => same,
            };
        }
    }
    next
}

pub fn resource_value(area: &Area) -> usize {
    let count = |kind| area.iter().flatten().filter(|&&c| c == kind).count();
    count(TREES) * count(LUMBERYARD)
}

/// The area after `minutes`, jumping over whole cycles once a snapshot repeats.
pub fn after(mut area: Area, minutes: usize) -> Area {
    let mut seen: FxHashMap<Area, usize> = FxHashMap::default();
    let mut t = 0;
    while t < minutes {
        if let Some(prev) = seen.insert(area.clone(), t) {
            let period = t - prev;
            debug!("minute {} repeats minute {} (period {})", t, prev, period);
            t += (minutes - t) / period * period;
            seen.clear();
            if t == minutes {break}
        }
        area = step(&area);
        t += 1;
    }
    area
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let minutes = if part == 1 {10} else {1_000_000_000};
    Ok(resource_value(&after(parse(input)?, minutes)).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: &str = "\
.#.#...|#.
.....#|##|
.|..|...#.
..|#.....#
#.#|||#|#|
...#.||...
.|....|...
||...#|.#|
|.||||..|.
...#.|..|.
";

    #[test]
    fn ten_minutes() {
        assert_eq!(solve(1, AREA).unwrap(), "1147");
    }

    #[test]
    fn cycle_skip_matches_plain_simulation() {
        let start = parse(AREA).unwrap();
        let mut plain = start.clone();
        for _ in 0 .. 600 {plain = step(&plain);}
        assert_eq!(after(start, 600), plain);
    }

    #[test]
    fn rejects_unknown_acres() {
        assert!(parse("..x\n...").is_err());
        assert!(parse("...\n..").is_err());
    }
}
