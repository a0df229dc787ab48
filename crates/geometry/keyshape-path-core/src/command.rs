//! Path drawing commands.
//!
//! Every command remembers whether its coordinates are absolute or relative so
//! that a parsed path serializes back to the same command letters. Relative
//! coordinates are offsets from the running cursor.

use std::fmt;

use crate::point::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo {
        to: Point,
        absolute: bool,
    },
    LineTo {
        to: Point,
        absolute: bool,
    },
    HorizontalTo {
        x: f64,
        absolute: bool,
    },
    VerticalTo {
        y: f64,
        absolute: bool,
    },
    QuadraticBezier {
        control: Point,
        to: Point,
        absolute: bool,
    },
    /// Quadratic curve whose control point reflects the previous one.
    SmoothQuadratic {
        to: Point,
        absolute: bool,
    },
    CubicBezier {
        control1: Point,
        control2: Point,
        to: Point,
        absolute: bool,
    },
    /// Cubic curve whose first control point reflects the previous one.
    SmoothCubic {
        control2: Point,
        to: Point,
        absolute: bool,
    },
    Arc {
        rx: f64,
        ry: f64,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
        absolute: bool,
    },
    ClosePath,
}

impl PathCommand {
    pub fn move_to(x: f64, y: f64) -> Self {
        PathCommand::MoveTo {
            to: Point::new(x, y),
            absolute: true,
        }
    }

    pub fn line_to(x: f64, y: f64) -> Self {
        PathCommand::LineTo {
            to: Point::new(x, y),
            absolute: true,
        }
    }

    pub fn quad_to(cx: f64, cy: f64, x: f64, y: f64) -> Self {
        PathCommand::QuadraticBezier {
            control: Point::new(cx, cy),
            to: Point::new(x, y),
            absolute: true,
        }
    }

    pub fn cubic_to(c1: Point, c2: Point, to: Point) -> Self {
        PathCommand::CubicBezier {
            control1: c1,
            control2: c2,
            to,
            absolute: true,
        }
    }

    pub fn close() -> Self {
        PathCommand::ClosePath
    }

    /// Command letter as written in the mini-language.
    pub fn letter(&self) -> char {
        let upper = match self {
            PathCommand::MoveTo { .. } => 'M',
            PathCommand::LineTo { .. } => 'L',
            PathCommand::HorizontalTo { .. } => 'H',
            PathCommand::VerticalTo { .. } => 'V',
            PathCommand::QuadraticBezier { .. } => 'Q',
            PathCommand::SmoothQuadratic { .. } => 'T',
            PathCommand::CubicBezier { .. } => 'C',
            PathCommand::SmoothCubic { .. } => 'S',
            PathCommand::Arc { .. } => 'A',
            PathCommand::ClosePath => return 'Z',
        };
        if self.is_absolute() {
            upper
        } else {
            upper.to_ascii_lowercase()
        }
    }

    pub fn is_absolute(&self) -> bool {
        match *self {
            PathCommand::MoveTo { absolute, .. }
            | PathCommand::LineTo { absolute, .. }
            | PathCommand::HorizontalTo { absolute, .. }
            | PathCommand::VerticalTo { absolute, .. }
            | PathCommand::QuadraticBezier { absolute, .. }
            | PathCommand::SmoothQuadratic { absolute, .. }
            | PathCommand::CubicBezier { absolute, .. }
            | PathCommand::SmoothCubic { absolute, .. }
            | PathCommand::Arc { absolute, .. } => absolute,
            PathCommand::ClosePath => true,
        }
    }

    pub fn is_close(&self) -> bool {
        matches!(self, PathCommand::ClosePath)
    }

    /// Absolute end point of this command given the running cursor and the
    /// start of the current subpath (the target of a close command).
    pub fn end_point(&self, cursor: Point, subpath_start: Point) -> Point {
        match self.to_absolute(cursor) {
            PathCommand::MoveTo { to, .. }
            | PathCommand::LineTo { to, .. }
            | PathCommand::QuadraticBezier { to, .. }
            | PathCommand::SmoothQuadratic { to, .. }
            | PathCommand::CubicBezier { to, .. }
            | PathCommand::SmoothCubic { to, .. }
            | PathCommand::Arc { to, .. } => to,
            PathCommand::HorizontalTo { x, .. } => Point::new(x, cursor.y),
            PathCommand::VerticalTo { y, .. } => Point::new(cursor.x, y),
            PathCommand::ClosePath => subpath_start,
        }
    }

    /// Same command with every coordinate resolved against `cursor`.
    pub fn to_absolute(&self, cursor: Point) -> PathCommand {
        if self.is_absolute() {
            return *self;
        }
        let abs = |p: Point| p.offset(cursor.x, cursor.y);
        match *self {
            PathCommand::MoveTo { to, .. } => PathCommand::MoveTo {
                to: abs(to),
                absolute: true,
            },
            PathCommand::LineTo { to, .. } => PathCommand::LineTo {
                to: abs(to),
                absolute: true,
            },
            PathCommand::HorizontalTo { x, .. } => PathCommand::HorizontalTo {
                x: x + cursor.x,
                absolute: true,
            },
            PathCommand::VerticalTo { y, .. } => PathCommand::VerticalTo {
                y: y + cursor.y,
                absolute: true,
            },
            PathCommand::QuadraticBezier { control, to, .. } => PathCommand::QuadraticBezier {
                control: abs(control),
                to: abs(to),
                absolute: true,
            },
            PathCommand::SmoothQuadratic { to, .. } => PathCommand::SmoothQuadratic {
                to: abs(to),
                absolute: true,
            },
            PathCommand::CubicBezier {
                control1,
                control2,
                to,
                ..
            } => PathCommand::CubicBezier {
                control1: abs(control1),
                control2: abs(control2),
                to: abs(to),
                absolute: true,
            },
            PathCommand::SmoothCubic { control2, to, .. } => PathCommand::SmoothCubic {
                control2: abs(control2),
                to: abs(to),
                absolute: true,
            },
            PathCommand::Arc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
                ..
            } => PathCommand::Arc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to: abs(to),
                absolute: true,
            },
            PathCommand::ClosePath => PathCommand::ClosePath,
        }
    }

    /// Component-wise interpolation between two commands of the same kind and
    /// coordinate mode. Arc flags step at the halfway point. Returns `None`
    /// when the commands differ structurally.
    pub fn lerp(&self, other: &PathCommand, t: f64) -> Option<PathCommand> {
        if self.letter() != other.letter() {
            return None;
        }
        let s = |a: f64, b: f64| a + (b - a) * t;
        let cmd = match (*self, *other) {
            (
                PathCommand::MoveTo { to: a, absolute },
                PathCommand::MoveTo { to: b, .. },
            ) => PathCommand::MoveTo {
                to: a.lerp(b, t),
                absolute,
            },
            (
                PathCommand::LineTo { to: a, absolute },
                PathCommand::LineTo { to: b, .. },
            ) => PathCommand::LineTo {
                to: a.lerp(b, t),
                absolute,
            },
            (
                PathCommand::HorizontalTo { x: a, absolute },
                PathCommand::HorizontalTo { x: b, .. },
            ) => PathCommand::HorizontalTo {
                x: s(a, b),
                absolute,
            },
            (
                PathCommand::VerticalTo { y: a, absolute },
                PathCommand::VerticalTo { y: b, .. },
            ) => PathCommand::VerticalTo {
                y: s(a, b),
                absolute,
            },
            (
                PathCommand::QuadraticBezier {
                    control: c1,
                    to: a,
                    absolute,
                },
                PathCommand::QuadraticBezier {
                    control: c2, to: b, ..
                },
            ) => PathCommand::QuadraticBezier {
                control: c1.lerp(c2, t),
                to: a.lerp(b, t),
                absolute,
            },
            (
                PathCommand::SmoothQuadratic { to: a, absolute },
                PathCommand::SmoothQuadratic { to: b, .. },
            ) => PathCommand::SmoothQuadratic {
                to: a.lerp(b, t),
                absolute,
            },
            (
                PathCommand::CubicBezier {
                    control1: a1,
                    control2: a2,
                    to: a,
                    absolute,
                },
                PathCommand::CubicBezier {
                    control1: b1,
                    control2: b2,
                    to: b,
                    ..
                },
            ) => PathCommand::CubicBezier {
                control1: a1.lerp(b1, t),
                control2: a2.lerp(b2, t),
                to: a.lerp(b, t),
                absolute,
            },
            (
                PathCommand::SmoothCubic {
                    control2: a2,
                    to: a,
                    absolute,
                },
                PathCommand::SmoothCubic {
                    control2: b2, to: b, ..
                },
            ) => PathCommand::SmoothCubic {
                control2: a2.lerp(b2, t),
                to: a.lerp(b, t),
                absolute,
            },
            (
                PathCommand::Arc {
                    rx: rx1,
                    ry: ry1,
                    rotation: rot1,
                    large_arc: l1,
                    sweep: s1,
                    to: a,
                    absolute,
                },
                PathCommand::Arc {
                    rx: rx2,
                    ry: ry2,
                    rotation: rot2,
                    large_arc: l2,
                    sweep: s2,
                    to: b,
                    ..
                },
            ) => {
                let first = t < 0.5;
                PathCommand::Arc {
                    rx: s(rx1, rx2),
                    ry: s(ry1, ry2),
                    rotation: s(rot1, rot2),
                    large_arc: if first { l1 } else { l2 },
                    sweep: if first { s1 } else { s2 },
                    to: a.lerp(b, t),
                    absolute,
                }
            }
            (PathCommand::ClosePath, PathCommand::ClosePath) => PathCommand::ClosePath,
            _ => return None,
        };
        Some(cmd)
    }
}

fn flag(b: bool) -> u8 {
    u8::from(b)
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = self.letter();
        match *self {
            PathCommand::MoveTo { to, .. }
            | PathCommand::LineTo { to, .. }
            | PathCommand::SmoothQuadratic { to, .. } => write!(f, "{l} {},{}", to.x, to.y),
            PathCommand::HorizontalTo { x, .. } => write!(f, "{l} {x}"),
            PathCommand::VerticalTo { y, .. } => write!(f, "{l} {y}"),
            PathCommand::QuadraticBezier { control, to, .. } => {
                write!(f, "{l} {},{} {},{}", control.x, control.y, to.x, to.y)
            }
            PathCommand::CubicBezier {
                control1,
                control2,
                to,
                ..
            } => write!(
                f,
                "{l} {},{} {},{} {},{}",
                control1.x, control1.y, control2.x, control2.y, to.x, to.y
            ),
            PathCommand::SmoothCubic { control2, to, .. } => {
                write!(f, "{l} {},{} {},{}", control2.x, control2.y, to.x, to.y)
            }
            PathCommand::Arc {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
                ..
            } => write!(
                f,
                "{l} {rx},{ry} {rotation} {},{} {},{}",
                flag(large_arc),
                flag(sweep),
                to.x,
                to.y
            ),
            PathCommand::ClosePath => write!(f, "Z"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_end_point_adds_cursor() {
        let cmd = PathCommand::LineTo {
            to: Point::new(5.0, -2.0),
            absolute: false,
        };
        let end = cmd.end_point(Point::new(10.0, 10.0), Point::ORIGIN);
        assert_eq!(end, Point::new(15.0, 8.0));
    }

    #[test]
    fn close_returns_subpath_start() {
        let start = Point::new(3.0, 4.0);
        let end = PathCommand::ClosePath.end_point(Point::new(50.0, 50.0), start);
        assert_eq!(end, start);
    }

    #[test]
    fn horizontal_and_vertical_keep_other_axis() {
        let cursor = Point::new(7.0, 9.0);
        let h = PathCommand::HorizontalTo {
            x: 2.0,
            absolute: false,
        };
        let v = PathCommand::VerticalTo {
            y: 1.0,
            absolute: true,
        };
        assert_eq!(h.end_point(cursor, cursor), Point::new(9.0, 9.0));
        assert_eq!(v.end_point(cursor, cursor), Point::new(7.0, 1.0));
    }

    #[test]
    fn display_uses_letter_case() {
        let rel = PathCommand::CubicBezier {
            control1: Point::new(1.0, 2.0),
            control2: Point::new(3.0, 4.0),
            to: Point::new(5.5, 6.0),
            absolute: false,
        };
        assert_eq!(rel.to_string(), "c 1,2 3,4 5.5,6");
        let arc = PathCommand::Arc {
            rx: 10.0,
            ry: 5.0,
            rotation: 30.0,
            large_arc: true,
            sweep: false,
            to: Point::new(20.0, 0.0),
            absolute: true,
        };
        assert_eq!(arc.to_string(), "A 10,5 30 1,0 20,0");
    }

    #[test]
    fn lerp_rejects_mismatched_kinds() {
        let a = PathCommand::line_to(0.0, 0.0);
        let b = PathCommand::move_to(1.0, 1.0);
        assert!(a.lerp(&b, 0.5).is_none());
        let c = PathCommand::line_to(10.0, 20.0);
        assert_eq!(a.lerp(&c, 0.5), Some(PathCommand::line_to(5.0, 10.0)));
    }
}
