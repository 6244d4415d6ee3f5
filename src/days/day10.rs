use super::{nonempty_lines, numbers};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Star {pub x: i64, pub y: i64, pub vx: i64, pub vy: i64}

impl Star {
    fn at(&self, t: i64) -> (i64, i64) {(self.x + self.vx * t, self.y + self.vy * t)}
}

pub fn parse_stars(input: &str) -> Result<Vec<Star>> {
    nonempty_lines(input).map(|line| match numbers(line)?[..] {
        [x, y, vx, vy] => Ok(Star {x, y, vx, vy}),
        _ => Err(Error::parse("star", line)),
    }).collect()
}

fn extent(stars: &[Star], t: i64) -> Option<((i64, i64), (i64, i64))> {
    let pts = stars.iter().map(|s| s.at(t));
    let (minx, maxx) = (pts.clone().map(|p| p.0).min()?, pts.clone().map(|p| p.0).max()?);
    let (miny, maxy) = (pts.clone().map(|p| p.1).min()?, pts.map(|p| p.1).max()?);
    Some(((minx, miny), (maxx, maxy)))
}

fn height(stars: &[Star], t: i64) -> i64 {
    extent(stars, t).map_or(0, |((_, miny), (_, maxy))| maxy - miny)
}

/// The second at which the stars are packed tightest vertically.
pub fn message_time(stars: &[Star]) -> i64 {
    // Ballpark from the first star crossing the x axis, then walk downhill.
    let mut t = stars.iter().min().filter(|s| s.vy != 0).map_or(0, |s| (-s.y / s.vy).max(0));
    while t > 0 && height(stars, t - 1) <= height(stars, t) {t -= 1;}
    while height(stars, t + 1) < height(stars, t) {t += 1;}
    t
}

pub fn render(stars: &[Star], t: i64) -> String {
    let Some(((minx, miny), (maxx, maxy))) = extent(stars, t) else {return String::new()};
    let mut buf = vec![vec![b'.'; (maxx - minx + 1) as usize]; (maxy - miny + 1) as usize];
    for (x, y) in stars.iter().map(|s| s.at(t)) {
        buf[(y - miny) as usize][(x - minx) as usize] = b'#';
    }
    buf.into_iter().map(|row| row.into_iter().map(char::from).collect::<String>()).collect::<Vec<_>>().join("\n")
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let stars = parse_stars(input)?;
    let t = message_time(&stars);
    Ok(if part == 1 {render(&stars, t)} else {t.to_string()})
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARS: &str = "\
position=< 9,  1> velocity=< 0,  2>
position=< 7,  0> velocity=<-1,  0>
position=< 3, -2> velocity=<-1,  1>
position=< 6, 10> velocity=<-2, -1>
position=< 2, -4> velocity=< 2,  2>
position=<-6, 10> velocity=< 2, -2>
position=< 1,  8> velocity=< 1, -1>
position=< 1,  7> velocity=< 1,  0>
position=<-3, 11> velocity=< 1, -2>
position=< 7,  6> velocity=<-1, -1>
position=<-2,  3> velocity=< 1,  0>
position=<-4,  3> velocity=< 2,  0>
position=<10, -3> velocity=<-1,  1>
position=< 5, 11> velocity=< 1, -2>
position=< 4,  7> velocity=< 0, -1>
position=< 8, -2> velocity=< 0,  1>
position=<15,  0> velocity=<-2,  0>
position=< 1,  6> velocity=< 1,  0>
position=< 8,  9> velocity=< 0, -1>
position=< 3,  3> velocity=<-1,  1>
position=< 0,  5> velocity=< 0, -1>
position=<-2,  2> velocity=< 2,  0>
position=< 5, -2> velocity=< 1,  2>
position=< 1,  4> velocity=< 2,  1>
position=<-2,  7> velocity=< 2, -2>
position=< 3,  6> velocity=<-1, -1>
position=< 5,  0> velocity=< 1,  0>
position=<-6,  0> velocity=< 2,  0>
position=< 5,  9> velocity=< 1, -2>
position=<14,  7> velocity=<-2,  0>
position=<-3,  6> velocity=< 2, -1>
";

    const HI: &str = "\
#...#..###
#...#...#.
#...#...#.
#####...#.
#...#...#.
#...#...#.
#...#...#.
#...#..###";

    #[test]
    fn message_appears_after_three_seconds() {
        assert_eq!(solve(2, STARS).unwrap(), "3");
        assert_eq!(solve(1, STARS).unwrap(), HI);
    }
}
