//! Point-correspondence strategies.
//!
//! Both strategies pair subpaths by index. A subpath without a partner
//! collapses to (or grows from) its own centroid.

use keyshape_path_core::{centroid, signed_area, Path, PathCommand, Point, Subpath};

/// Resample open outlines and lerp point by point. Structurally identical
/// paths are lerped command by command instead, keeping their curves.
pub(crate) fn stroke(start: &Path, end: &Path, t: f64, samples: usize) -> Path {
    if let Ok(path) = start.interpolate(end, t) {
        return path;
    }
    let a = start.subpaths();
    let b = end.subpaths();
    let mut commands = Vec::new();
    for (pa, pb, closed) in pair(&a, &b, |s| s.resample_open(samples)) {
        emit(&lerp_points(&pa, &pb, t), closed, &mut commands);
    }
    Path::new(commands)
}

/// Resample closed rings, align winding and start vertex, then lerp.
pub(crate) fn shape(start: &Path, end: &Path, t: f64, samples: usize) -> Path {
    let a = start.subpaths();
    let b = end.subpaths();
    let mut commands = Vec::new();
    for (ra, rb, _) in pair(&a, &b, |s| s.resample_closed(samples)) {
        let rb = align_ring(&ra, rb);
        emit(&lerp_points(&ra, &rb, t), true, &mut commands);
    }
    Path::new(commands)
}

fn pair<F>(a: &[Subpath], b: &[Subpath], sample: F) -> Vec<(Vec<Point>, Vec<Point>, bool)>
where
    F: Fn(&Subpath) -> Vec<Point>,
{
    (0..a.len().max(b.len()))
        .map(|i| match (a.get(i), b.get(i)) {
            (Some(sa), Some(sb)) => (sample(sa), sample(sb), sa.closed && sb.closed),
            (Some(sa), None) => {
                let pts = sample(sa);
                let collapsed = vec![centroid(&pts); pts.len()];
                (pts, collapsed, sa.closed)
            }
            (None, Some(sb)) => {
                let pts = sample(sb);
                let seed = vec![centroid(&pts); pts.len()];
                (seed, pts, sb.closed)
            }
            (None, None) => (Vec::new(), Vec::new(), false),
        })
        .collect()
}

/// Match `target`'s winding to `reference` and rotate its start index to
/// minimise the summed squared distance between corresponding points.
pub(crate) fn align_ring(reference: &[Point], mut target: Vec<Point>) -> Vec<Point> {
    let n = target.len();
    if n < 2 || reference.len() != n {
        return target;
    }
    if signed_area(reference) * signed_area(&target) < 0.0 {
        target.reverse();
    }
    let best = (0..n)
        .map(|shift| {
            let cost: f64 = reference
                .iter()
                .enumerate()
                .map(|(i, p)| p.distance_squared(target[(i + shift) % n]))
                .sum();
            (shift, cost)
        })
        .min_by(|x, y| x.1.total_cmp(&y.1))
        .map(|(shift, _)| shift)
        .unwrap_or(0);
    target.rotate_left(best);
    target
}

fn lerp_points(a: &[Point], b: &[Point], t: f64) -> Vec<Point> {
    a.iter().zip(b).map(|(p, q)| p.lerp(*q, t)).collect()
}

fn emit(points: &[Point], closed: bool, out: &mut Vec<PathCommand>) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    out.push(PathCommand::move_to(first.x, first.y));
    out.extend(rest.iter().map(|p| PathCommand::line_to(p.x, p.y)));
    if closed {
        out.push(PathCommand::close());
    }
}
