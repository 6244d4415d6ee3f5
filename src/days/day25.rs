use super::{nonempty_lines, numbers};
use crate::{Error, Result};

type Star = [i64; 4];

pub fn parse_stars(input: &str) -> Result<Vec<Star>> {
    nonempty_lines(input).map(|line| {
        <Star>::try_from(numbers(line)?).map_err(|_| Error::parse("four coordinates", line))
    }).collect()
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// Groups of stars chained together by hops of Manhattan distance at most 3.
pub fn constellations(stars: &[Star]) -> usize {
    let mut parent = (0 .. stars.len()).collect::<Vec<_>>();
    let mut count = stars.len();
    for i in 0 .. stars.len() {
        for j in i + 1 .. stars.len() {
            let dist: i64 = (0 .. 4).map(|k| (stars[i][k] - stars[j][k]).abs()).sum();
            if dist > 3 {continue}
            let (a, b) = (find(&mut parent, i), find(&mut parent, j));
            if a != b {parent[a] = b; count -= 1;}
        }
    }
    count
}

pub fn solve(_part: u8, input: &str) -> Result<String> {
    Ok(constellations(&parse_stars(input)?).to_string())
}
