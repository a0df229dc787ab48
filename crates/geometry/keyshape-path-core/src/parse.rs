//! Path mini-language parser.
//!
//! Grammar follows the usual path-data conventions:
//! - command letters `M L H V C S Q T A Z`, upper case absolute, lower case relative
//! - arguments separated by whitespace and/or commas, signs and dots may also
//!   separate numbers (`10-5`, `.5.5`)
//! - a command letter may be followed by several argument groups; after a
//!   move, extra groups are implicit line commands of the same case
//! - arc flags are single `0`/`1` characters and may be written without separators

use crate::command::PathCommand;
use crate::error::{PathError, Result};
use crate::point::Point;

const COMMAND_LETTERS: &[u8] = b"MmLlHhVvCcSsQqTtAaZz";

struct Scanner<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            src: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_whitespace() || c == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// True when the next non-separator byte can begin a number.
    fn at_number(&mut self) -> bool {
        self.skip_separators();
        matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == b'-' || c == b'+' || c == b'.')
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_separators();
        let start = self.pos;
        if matches!(self.peek(), Some(b'-' | b'+')) {
            self.pos += 1;
        }
        let mut digits = 0usize;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
            digits += 1;
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
                digits += 1;
            }
        }
        if digits == 0 {
            return Err(PathError::parse(start, "expected a number"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'-' | b'+')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.pos == exp_start {
                // Not an exponent after all.
                self.pos = mark;
            }
        }
        let text = std::str::from_utf8(&self.src[start..self.pos])
            .map_err(|_| PathError::parse(start, "invalid utf-8 in number"))?;
        text.parse::<f64>()
            .map_err(|e| PathError::parse(start, format!("invalid number '{text}': {e}")))
    }

    fn point(&mut self) -> Result<Point> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::new(x, y))
    }

    fn flag(&mut self) -> Result<bool> {
        self.skip_separators();
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(PathError::parse(self.pos, "arc flag must be 0 or 1")),
        }
    }
}

/// Parse path mini-language text into commands.
pub fn parse_commands(text: &str) -> Result<Vec<PathCommand>> {
    let mut sc = Scanner::new(text);
    let mut commands = Vec::new();
    let mut current: Option<u8> = None;

    loop {
        sc.skip_separators();
        let Some(c) = sc.peek() else { break };

        let letter = if c.is_ascii_alphabetic() {
            if !COMMAND_LETTERS.contains(&c) {
                return Err(PathError::parse(
                    sc.pos,
                    format!("unknown command '{}'", c as char),
                ));
            }
            sc.pos += 1;
            c
        } else {
            match current {
                None => {
                    return Err(PathError::parse(sc.pos, "path data must start with a command"))
                }
                Some(b'Z' | b'z') => {
                    return Err(PathError::parse(sc.pos, "unexpected number after close command"))
                }
                Some(b'M') => b'L',
                Some(b'm') => b'l',
                Some(prev) => prev,
            }
        };

        if commands.is_empty() && !matches!(letter, b'M' | b'm') {
            return Err(PathError::parse(
                sc.pos.saturating_sub(1),
                "path data must begin with a move command",
            ));
        }

        let absolute = letter.is_ascii_uppercase();
        let cmd = match letter.to_ascii_uppercase() {
            b'M' => PathCommand::MoveTo {
                to: sc.point()?,
                absolute,
            },
            b'L' => PathCommand::LineTo {
                to: sc.point()?,
                absolute,
            },
            b'H' => PathCommand::HorizontalTo {
                x: sc.number()?,
                absolute,
            },
            b'V' => PathCommand::VerticalTo {
                y: sc.number()?,
                absolute,
            },
            b'C' => PathCommand::CubicBezier {
                control1: sc.point()?,
                control2: sc.point()?,
                to: sc.point()?,
                absolute,
            },
            b'S' => PathCommand::SmoothCubic {
                control2: sc.point()?,
                to: sc.point()?,
                absolute,
            },
            b'Q' => PathCommand::QuadraticBezier {
                control: sc.point()?,
                to: sc.point()?,
                absolute,
            },
            b'T' => PathCommand::SmoothQuadratic {
                to: sc.point()?,
                absolute,
            },
            b'A' => PathCommand::Arc {
                rx: sc.number()?,
                ry: sc.number()?,
                rotation: sc.number()?,
                large_arc: sc.flag()?,
                sweep: sc.flag()?,
                to: sc.point()?,
                absolute,
            },
            _ => PathCommand::ClosePath,
        };
        commands.push(cmd);
        current = Some(letter);

        // A close command takes no arguments; anything numeric after it is an
        // error reported on the next iteration.
        if cmd.is_close() {
            continue;
        }
        if !sc.at_number() && !sc.at_end() {
            let next = sc.peek().unwrap_or(b' ');
            if !next.is_ascii_alphabetic() {
                return Err(PathError::parse(
                    sc.pos,
                    format!("unexpected character '{}'", next as char),
                ));
            }
        }
    }

    Ok(commands)
}
