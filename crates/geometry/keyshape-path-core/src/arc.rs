//! Elliptical arc flattening into cubic Bezier segments.
//!
//! Uses the endpoint-to-center conversion: the chord midpoint is moved into the
//! ellipse's unrotated frame, the center is solved there, and the swept angle
//! is cut into pieces of at most 90 degrees. Each piece is approximated with
//! the circular-arc coefficient `k = 4/3 * tan(delta / 4)`.

use std::f64::consts::{FRAC_PI_2, TAU};

use tracing::debug;

use crate::command::PathCommand;
use crate::point::Point;
use crate::segment::CubicSegment;

/// Transient arc description. Rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub from: Point,
    pub rx: f64,
    pub ry: f64,
    pub rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub to: Point,
}

impl ArcSpec {
    pub fn new(from: Point, rx: f64, ry: f64, rotation: f64, large_arc: bool, sweep: bool, to: Point) -> Self {
        Self {
            from,
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to,
        }
    }
}

/// Flatten an arc into absolute cubic commands. Coincident endpoints yield no
/// commands; numeric failure yields a single straight cubic.
pub fn flatten_arc(spec: &ArcSpec) -> Vec<PathCommand> {
    flatten_arc_segments(spec)
        .into_iter()
        .map(|seg| PathCommand::cubic_to(seg.p1, seg.p2, seg.p3))
        .collect()
}

/// Like [`flatten_arc`] but keeps each segment's start point. The first start
/// is `spec.from` and the last end is `spec.to`, bit for bit.
pub fn flatten_arc_segments(spec: &ArcSpec) -> Vec<CubicSegment> {
    if spec.from == spec.to {
        return Vec::new();
    }
    match solve(spec) {
        Some(segments) => segments,
        None => {
            debug!(
                from = ?spec.from,
                to = ?spec.to,
                rx = spec.rx,
                ry = spec.ry,
                "arc flattening degenerated; emitting straight segment"
            );
            vec![CubicSegment::line(spec.from, spec.to)]
        }
    }
}

fn solve(spec: &ArcSpec) -> Option<Vec<CubicSegment>> {
    let mut rx = spec.rx.abs();
    let mut ry = spec.ry.abs();
    if rx == 0.0 || ry == 0.0 {
        return None;
    }

    let (sin_phi, cos_phi) = spec.rotation.to_radians().sin_cos();
    let (p1, p2) = (spec.from, spec.to);

    let dx2 = (p1.x - p2.x) / 2.0;
    let dy2 = (p1.y - p2.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    if den == 0.0 {
        return None;
    }
    let mut coef = (num.max(0.0) / den).sqrt();
    if spec.large_arc == spec.sweep {
        coef = -coef;
    }
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * -(ry * x1p / rx);

    let cx = cos_phi * cxp - sin_phi * cyp + (p1.x + p2.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (p1.y + p2.y) / 2.0;

    let theta1 = ((y1p - cyp) / ry).atan2((x1p - cxp) / rx);
    let theta2 = ((-y1p - cyp) / ry).atan2((-x1p - cxp) / rx);
    let mut delta = theta2 - theta1;
    if !spec.sweep && delta > 0.0 {
        delta -= TAU;
    } else if spec.sweep && delta < 0.0 {
        delta += TAU;
    }

    // The epsilon keeps an exact quarter turn from splitting on rounding noise.
    let count = ((delta.abs() / FRAC_PI_2 - 1e-9).ceil() as usize).max(1);
    let step = delta / count as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let to_world = |x: f64, y: f64| Point::new(cos_phi * x - sin_phi * y + cx, sin_phi * x + cos_phi * y + cy);

    let mut segments = Vec::with_capacity(count);
    let mut start = p1;
    for i in 0..count {
        let t1 = theta1 + i as f64 * step;
        let t2 = t1 + step;
        let (s1, c1) = t1.sin_cos();
        let (s2, c2) = t2.sin_cos();

        let ctrl1 = to_world(rx * c1 - k * rx * s1, ry * s1 + k * ry * c1);
        let ctrl2 = to_world(rx * c2 + k * rx * s2, ry * s2 - k * ry * c2);
        let end = if i + 1 == count { p2 } else { to_world(rx * c2, ry * s2) };

        if !(ctrl1.is_finite() && ctrl2.is_finite() && end.is_finite()) {
            return None;
        }
        segments.push(CubicSegment::new(start, ctrl1, ctrl2, end));
        start = end;
    }
    Some(segments)
}
