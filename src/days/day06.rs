use super::{nonempty_lines, numbers};
use crate::{Error, Result};

type Point = (i64, i64);

pub fn parse_points(input: &str) -> Result<Vec<Point>> {
    nonempty_lines(input).map(|line| match numbers(line)?[..] {
        [x, y] => Ok((x, y)),
        _ => Err(Error::parse("coordinate pair", line)),
    }).collect()
}

fn bounds(points: &[Point]) -> Option<(Point, Point)> {
    let (minx, maxx) = (points.iter().map(|p| p.0).min()?, points.iter().map(|p| p.0).max()?);
    let (miny, maxy) = (points.iter().map(|p| p.1).min()?, points.iter().map(|p| p.1).max()?);
    Some(((minx, miny), (maxx, maxy)))
}

fn dist(a: Point, b: Point) -> i64 {(a.0 - b.0).abs() + (a.1 - b.1).abs()}

/// Size of the largest area closest to one point that does not reach the
/// bounding box edge. Ties belong to nobody.
pub fn largest_area(points: &[Point]) -> Option<usize> {
    let ((minx, miny), (maxx, maxy)) = bounds(points)?;
    let mut tallies = vec![0; points.len()];
    let mut infinite = vec![false; points.len()];
    for y in miny ..= maxy {for x in minx ..= maxx {
        let mut best = None;
        let mut best_dist = i64::MAX;
        for (i, &p) in points.iter().enumerate() {
            let d = dist(p, (x, y));
            if d < best_dist {best = Some(i); best_dist = d;} else if d == best_dist {best = None;}
        }
        if let Some(i) = best {
            tallies[i] += 1;
            if y == miny || y == maxy || x == minx || x == maxx {infinite[i] = true}
        }
    }}
    tallies.into_iter().zip(infinite).filter(|&(_, inf)| !inf).map(|(t, _)| t).max()
}

/// Cells whose total distance to every point is below `limit`.
pub fn region_size(points: &[Point], limit: i64) -> usize {
    let Some(((minx, miny), (maxx, maxy))) = bounds(points) else {return 0};
    (miny ..= maxy).flat_map(|y| (minx ..= maxx).map(move |x| (x, y)))
        .filter(|&cell| points.iter().map(|&p| dist(p, cell)).sum::<i64>() < limit)
        .count()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let points = parse_points(input)?;
    if part == 1 {
        largest_area(&points).map(|a| a.to_string()).ok_or_else(|| Error::Unsolvable("every area is infinite".into()))
    } else {
        Ok(region_size(&points, 10000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: &str = "1, 1\n1, 6\n8, 3\n3, 4\n5, 5\n8, 9\n";

    #[test]
    fn largest_finite_area() {
        assert_eq!(solve(1, POINTS).unwrap(), "17");
    }

    #[test]
    fn safe_region() {
        assert_eq!(region_size(&parse_points(POINTS).unwrap(), 32), 16);
    }
}
