//! Cubic segment math, subpaths and arc-length resampling.

use crate::point::Point;

/// Polyline steps used per cubic when measuring or resampling.
pub const FLATTEN_STEPS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

impl CubicSegment {
    pub fn new(p0: Point, p1: Point, p2: Point, p3: Point) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Straight cubic with control points at one and two thirds of the chord.
    pub fn line(from: Point, to: Point) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        Self {
            p0: from,
            p1: Point::new(from.x + dx / 3.0, from.y + dy / 3.0),
            p2: Point::new(from.x + 2.0 * dx / 3.0, from.y + 2.0 * dy / 3.0),
            p3: to,
        }
    }

    /// Degree elevation of a quadratic curve.
    pub fn from_quadratic(from: Point, control: Point, to: Point) -> Self {
        Self {
            p0: from,
            p1: from.lerp(control, 2.0 / 3.0),
            p2: to.lerp(control, 2.0 / 3.0),
            p3: to,
        }
    }

    pub fn point_at(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        Point::new(
            a * self.p0.x + b * self.p1.x + c * self.p2.x + d * self.p3.x,
            a * self.p0.y + b * self.p1.y + c * self.p2.y + d * self.p3.y,
        )
    }

    /// De Casteljau split at `t`.
    pub fn split(&self, t: f64) -> (CubicSegment, CubicSegment) {
        let q0 = self.p0.lerp(self.p1, t);
        let q1 = self.p1.lerp(self.p2, t);
        let q2 = self.p2.lerp(self.p3, t);
        let r0 = q0.lerp(q1, t);
        let r1 = q1.lerp(q2, t);
        let mid = r0.lerp(r1, t);
        (
            CubicSegment::new(self.p0, q0, r0, mid),
            CubicSegment::new(mid, r1, q2, self.p3),
        )
    }

    /// Points at `t = i / steps` for `i` in `1..=steps` (start excluded).
    pub fn flatten_into(&self, steps: usize, out: &mut Vec<Point>) {
        let steps = steps.max(1);
        for i in 1..steps {
            out.push(self.point_at(i as f64 / steps as f64));
        }
        out.push(self.p3);
    }

    pub fn approx_length(&self, steps: usize) -> f64 {
        let mut pts = Vec::with_capacity(steps + 1);
        pts.push(self.p0);
        self.flatten_into(steps, &mut pts);
        pts.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// One connected run of cubic segments starting at a move command.
#[derive(Debug, Clone, PartialEq)]
pub struct Subpath {
    pub start: Point,
    pub segments: Vec<CubicSegment>,
    pub closed: bool,
}

impl Subpath {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
            closed: false,
        }
    }

    pub fn end(&self) -> Point {
        self.segments.last().map(|s| s.p3).unwrap_or(self.start)
    }

    /// Polyline through the subpath, starting with `start`.
    pub fn flatten(&self, steps: usize) -> Vec<Point> {
        let mut pts = Vec::with_capacity(1 + self.segments.len() * steps);
        pts.push(self.start);
        for seg in &self.segments {
            seg.flatten_into(steps, &mut pts);
        }
        pts
    }

    pub fn length(&self) -> f64 {
        self.segments.iter().map(|s| s.approx_length(FLATTEN_STEPS)).sum()
    }

    /// `count` points spread evenly by arc length. Open subpaths include both
    /// end points; closed subpaths treat the outline as a ring and do not
    /// repeat the first point.
    pub fn resample(&self, count: usize) -> Vec<Point> {
        if self.closed {
            self.resample_closed(count)
        } else {
            self.resample_open(count)
        }
    }

    /// Ring resampling regardless of the `closed` flag.
    pub fn resample_closed(&self, count: usize) -> Vec<Point> {
        let mut pts = self.flatten(FLATTEN_STEPS);
        if pts.first() != pts.last() {
            pts.push(self.start);
        }
        resample_polyline(&pts, count, true)
    }

    pub fn resample_open(&self, count: usize) -> Vec<Point> {
        resample_polyline(&self.flatten(FLATTEN_STEPS), count, false)
    }
}

/// Evenly spaced points along a polyline. With `ring` set the last input
/// point is expected to equal the first and the output spans `[0, L)`.
pub fn resample_polyline(points: &[Point], count: usize, ring: bool) -> Vec<Point> {
    if count == 0 || points.is_empty() {
        return Vec::new();
    }
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for w in points.windows(2) {
        total += w[0].distance(w[1]);
        cumulative.push(total);
    }
    if total <= f64::EPSILON {
        return vec![points[0]; count];
    }

    let divisor = if ring || count == 1 { count as f64 } else { (count - 1) as f64 };
    let mut out = Vec::with_capacity(count);
    let mut seg = 0usize;
    for i in 0..count {
        let target = total * i as f64 / divisor;
        while seg + 2 < cumulative.len() && cumulative[seg + 1] < target {
            seg += 1;
        }
        let span = cumulative[seg + 1] - cumulative[seg];
        let local = if span > 0.0 {
            ((target - cumulative[seg]) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        out.push(points[seg].lerp(points[seg + 1], local));
    }
    if !ring && count > 1 {
        if let (Some(last_out), Some(last_in)) = (out.last_mut(), points.last()) {
            *last_out = *last_in;
        }
    }
    out
}

/// Signed area of a closed polygon (positive when counter-clockwise in a
/// y-up frame).
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        acc += a.x * b.y - b.x * a.y;
    }
    acc * 0.5
}

pub fn centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ORIGIN;
    }
    let n = points.len() as f64;
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sx / n, sy / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn split_halves_meet_on_curve() {
        let seg = CubicSegment::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        );
        let (a, b) = seg.split(0.5);
        assert_eq!(a.p3, b.p0);
        let on_curve = seg.point_at(0.5);
        assert_abs_diff_eq!(a.p3.x, on_curve.x, epsilon = 1e-12);
        assert_abs_diff_eq!(a.p3.y, on_curve.y, epsilon = 1e-12);
    }

    #[test]
    fn line_length_is_exact() {
        let seg = CubicSegment::line(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert_abs_diff_eq!(seg.approx_length(8), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn open_resample_keeps_ends() {
        let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let out = resample_polyline(&pts, 5, false);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], Point::new(0.0, 0.0));
        assert_eq!(out[4], Point::new(10.0, 0.0));
        assert_abs_diff_eq!(out[2].x, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn ring_resample_spreads_evenly() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ];
        let out = resample_polyline(&square, 8, true);
        assert_eq!(out.len(), 8);
        assert_abs_diff_eq!(out[1].x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[2].x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(out[4].y, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_polyline_repeats_point() {
        let p = Point::new(2.0, 2.0);
        assert_eq!(resample_polyline(&[p, p], 3, false), vec![p, p, p]);
    }

    #[test]
    fn signed_area_orientation() {
        let ccw = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        assert!(signed_area(&ccw) > 0.0);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert!(signed_area(&cw) < 0.0);
    }
}
