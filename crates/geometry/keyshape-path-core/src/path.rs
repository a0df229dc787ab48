//! Path value type.
//!
//! A [`Path`] is an ordered list of [`PathCommand`]s. It parses from and
//! serializes to the path mini-language, and serde uses that textual form so
//! paths embed in JSON documents as plain strings.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::arc::{flatten_arc_segments, ArcSpec};
use crate::command::PathCommand;
use crate::error::{PathError, Result};
use crate::parse::parse_commands;
use crate::point::Point;
use crate::segment::{CubicSegment, Subpath};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn parse(text: &str) -> Result<Self> {
        parse_commands(text).map(Self::new)
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate commands paired with their absolute form.
    fn walk(&self) -> impl Iterator<Item = (PathCommand, Point)> + '_ {
        let mut cursor = Point::ORIGIN;
        let mut subpath_start = Point::ORIGIN;
        self.commands.iter().map(move |cmd| {
            let abs = cmd.to_absolute(cursor);
            let before = cursor;
            cursor = abs.end_point(cursor, subpath_start);
            if let PathCommand::MoveTo { to, .. } = abs {
                subpath_start = to;
            }
            (abs, before)
        })
    }

    /// Same geometry with every command in absolute coordinates.
    pub fn to_absolute(&self) -> Path {
        Path::new(self.walk().map(|(abs, _)| abs).collect())
    }

    /// Same geometry using only move, cubic and close commands.
    pub fn to_cubic(&self) -> Path {
        let mut out = Vec::with_capacity(self.commands.len());
        for sub in self.subpaths() {
            out.push(PathCommand::MoveTo {
                to: sub.start,
                absolute: true,
            });
            out.extend(
                sub.segments
                    .iter()
                    .map(|s| PathCommand::cubic_to(s.p1, s.p2, s.p3)),
            );
            if sub.closed {
                out.push(PathCommand::ClosePath);
            }
        }
        Path::new(out)
    }

    /// Split into subpaths of cubic segments. A close command whose cursor is
    /// away from the subpath start contributes the closing line.
    pub fn subpaths(&self) -> Vec<Subpath> {
        let mut subs: Vec<Subpath> = Vec::new();
        let mut current: Option<Subpath> = None;
        let mut last_cubic_ctrl: Option<Point> = None;
        let mut last_quad_ctrl: Option<Point> = None;

        for (cmd, cursor) in self.walk() {
            let mut cubic_ctrl = None;
            let mut quad_ctrl = None;
            let segment = match cmd {
                PathCommand::MoveTo { to, .. } => {
                    if let Some(done) = current.take() {
                        if !done.segments.is_empty() {
                            subs.push(done);
                        }
                    }
                    current = Some(Subpath::new(to));
                    None
                }
                PathCommand::LineTo { to, .. } => Some(vec![CubicSegment::line(cursor, to)]),
                PathCommand::HorizontalTo { x, .. } => {
                    Some(vec![CubicSegment::line(cursor, Point::new(x, cursor.y))])
                }
                PathCommand::VerticalTo { y, .. } => {
                    Some(vec![CubicSegment::line(cursor, Point::new(cursor.x, y))])
                }
                PathCommand::CubicBezier {
                    control1,
                    control2,
                    to,
                    ..
                } => {
                    cubic_ctrl = Some(control2);
                    Some(vec![CubicSegment::new(cursor, control1, control2, to)])
                }
                PathCommand::SmoothCubic { control2, to, .. } => {
                    let control1 = last_cubic_ctrl
                        .map(|c| c.reflect_about(cursor))
                        .unwrap_or(cursor);
                    cubic_ctrl = Some(control2);
                    Some(vec![CubicSegment::new(cursor, control1, control2, to)])
                }
                PathCommand::QuadraticBezier { control, to, .. } => {
                    quad_ctrl = Some(control);
                    Some(vec![CubicSegment::from_quadratic(cursor, control, to)])
                }
                PathCommand::SmoothQuadratic { to, .. } => {
                    let control = last_quad_ctrl
                        .map(|c| c.reflect_about(cursor))
                        .unwrap_or(cursor);
                    quad_ctrl = Some(control);
                    Some(vec![CubicSegment::from_quadratic(cursor, control, to)])
                }
                PathCommand::Arc {
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                    ..
                } => Some(flatten_arc_segments(&ArcSpec::new(
                    cursor, rx, ry, rotation, large_arc, sweep, to,
                ))),
                PathCommand::ClosePath => {
                    if let Some(sub) = current.as_mut() {
                        if cursor != sub.start {
                            sub.segments.push(CubicSegment::line(cursor, sub.start));
                        }
                        sub.closed = true;
                    }
                    if let Some(done) = current.take() {
                        let start = done.start;
                        subs.push(done);
                        // Drawing after a close continues from the same start.
                        current = Some(Subpath::new(start));
                    }
                    None
                }
            };
            last_cubic_ctrl = cubic_ctrl;
            last_quad_ctrl = quad_ctrl;

            if let Some(segments) = segment {
                current
                    .get_or_insert_with(|| Subpath::new(cursor))
                    .segments
                    .extend(segments);
            }
        }
        if let Some(done) = current {
            if !done.segments.is_empty() || subs.is_empty() {
                subs.push(done);
            }
        }
        subs
    }

    pub fn start_point(&self) -> Option<Point> {
        self.walk().next().map(|(abs, cursor)| abs.end_point(cursor, cursor))
    }

    /// Final cursor position.
    pub fn end_point(&self) -> Option<Point> {
        let mut subpath_start = Point::ORIGIN;
        let mut end = None;
        for (abs, cursor) in self.walk() {
            let p = abs.end_point(cursor, subpath_start);
            if let PathCommand::MoveTo { to, .. } = abs {
                subpath_start = to;
            }
            end = Some(p);
        }
        end
    }

    /// Ends with a close command, or the end point sits within `tolerance` of
    /// the start point.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        if self.commands.last().is_some_and(PathCommand::is_close) {
            return true;
        }
        if self.commands.len() < 2 {
            return false;
        }
        match (self.start_point(), self.end_point()) {
            (Some(a), Some(b)) => a.distance(b) <= tolerance,
            _ => false,
        }
    }

    /// Command-wise interpolation of two identically structured paths.
    pub fn interpolate(&self, other: &Path, t: f64) -> Result<Path> {
        if self.commands.len() != other.commands.len() {
            return Err(PathError::incompatible(format!(
                "command counts differ ({} vs {})",
                self.commands.len(),
                other.commands.len()
            )));
        }
        self.commands
            .iter()
            .zip(&other.commands)
            .enumerate()
            .map(|(i, (a, b))| {
                a.lerp(b, t).ok_or_else(|| {
                    PathError::incompatible(format!(
                        "command {i} differs ('{}' vs '{}')",
                        a.letter(),
                        b.letter()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Path::new)
    }

    /// Same command kinds in the same order with every absolute coordinate
    /// within `epsilon`.
    pub fn geometry_eq(&self, other: &Path, epsilon: f64) -> bool {
        let a = self.to_absolute();
        let b = other.to_absolute();
        a.commands.len() == b.commands.len()
            && a.commands.iter().zip(&b.commands).all(|(x, y)| {
                x.letter() == y.letter() && {
                    let cx = coordinates(x);
                    let cy = coordinates(y);
                    cx.len() == cy.len()
                        && cx.iter().zip(&cy).all(|(p, q)| (p - q).abs() <= epsilon)
                }
            })
    }
}

fn coordinates(cmd: &PathCommand) -> Vec<f64> {
    match *cmd {
        PathCommand::MoveTo { to, .. }
        | PathCommand::LineTo { to, .. }
        | PathCommand::SmoothQuadratic { to, .. } => vec![to.x, to.y],
        PathCommand::HorizontalTo { x, .. } => vec![x],
        PathCommand::VerticalTo { y, .. } => vec![y],
        PathCommand::QuadraticBezier { control, to, .. } => vec![control.x, control.y, to.x, to.y],
        PathCommand::CubicBezier {
            control1,
            control2,
            to,
            ..
        } => vec![control1.x, control1.y, control2.x, control2.y, to.x, to.y],
        PathCommand::SmoothCubic { control2, to, .. } => vec![control2.x, control2.y, to.x, to.y],
        PathCommand::Arc {
            rx,
            ry,
            rotation,
            large_arc,
            sweep,
            to,
            ..
        } => vec![
            rx,
            ry,
            rotation,
            f64::from(u8::from(large_arc)),
            f64::from(u8::from(sweep)),
            to.x,
            to.y,
        ],
        PathCommand::ClosePath => Vec::new(),
    }
}

impl From<Vec<PathCommand>> for Path {
    fn from(commands: Vec<PathCommand>) -> Self {
        Path::new(commands)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Path::parse(&s).map_err(de::Error::custom)
    }
}
