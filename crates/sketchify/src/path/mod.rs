//! SVG path data: tokenizing, parsing, absolutizing and normalizing.
//!
//! The pipeline is:
//!
//! ```text
//! "M0 0 l10 0 a5 5 0 0 1 0 10 z"
//!   -> tokenize    [Command('M'), Number(0.0), ...]
//!   -> parse_path  [Segment(M), Segment(l), Segment(a), Segment(z)]
//!   -> absolutize  [Segment(M), Segment(L), Segment(A), Segment(Z)]
//!   -> normalize   [Segment(M), Segment(L), Segment(C), Segment(C), Segment(Z)]
//! ```
//!
//! After normalization only move, line, cubic and close remain, which is all
//! the flattener and the renderer need to understand.

mod absolutize;
mod arc;
mod normalize;
mod parse;
mod tokenize;

use std::fmt;

use crate::error::{ParseError, Result};

pub use absolutize::absolutize;
pub use arc::arc_to_cubic_curves;
pub use normalize::normalize;
pub use parse::parse_path;
pub use tokenize::{Token, tokenize};

/// A path command, without its relative/absolute flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic,
    SmoothCubic,
    Quadratic,
    SmoothQuadratic,
    Arc,
    Close,
}

impl Command {
    /// Look up a command letter. Lowercase letters are relative.
    pub fn from_letter(letter: char) -> Option<(Command, bool)> {
        let command = match letter.to_ascii_uppercase() {
            'M' => Command::Move,
            'L' => Command::Line,
            'H' => Command::Horizontal,
            'V' => Command::Vertical,
            'C' => Command::Cubic,
            'S' => Command::SmoothCubic,
            'Q' => Command::Quadratic,
            'T' => Command::SmoothQuadratic,
            'A' => Command::Arc,
            'Z' => Command::Close,
            _ => return None,
        };
        Some((command, letter.is_ascii_lowercase()))
    }

    /// The command letter, lowercase when `relative`.
    pub fn letter(self, relative: bool) -> char {
        let upper = match self {
            Command::Move => 'M',
            Command::Line => 'L',
            Command::Horizontal => 'H',
            Command::Vertical => 'V',
            Command::Cubic => 'C',
            Command::SmoothCubic => 'S',
            Command::Quadratic => 'Q',
            Command::SmoothQuadratic => 'T',
            Command::Arc => 'A',
            Command::Close => 'Z',
        };
        if relative { upper.to_ascii_lowercase() } else { upper }
    }

    /// Number of parameters one instance of this command takes.
    pub fn arity(self) -> usize {
        match self {
            Command::Move | Command::Line | Command::SmoothQuadratic => 2,
            Command::Horizontal | Command::Vertical => 1,
            Command::Cubic => 6,
            Command::SmoothCubic | Command::Quadratic => 4,
            Command::Arc => 7,
            Command::Close => 0,
        }
    }
}

/// One path command with its parameters.
///
/// The parameter count always equals `command.arity()`; the constructors
/// refuse anything else, so downstream code can index `params` freely.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub command: Command,
    pub relative: bool,
    params: Vec<f64>,
}

impl Segment {
    /// Build a segment, checking the parameter count against the command.
    pub fn new(command: Command, relative: bool, params: Vec<f64>) -> Result<Self> {
        if params.len() != command.arity() {
            return Err(ParseError::Arity {
                command: command.letter(relative),
                expected: command.arity(),
                found: params.len(),
            });
        }
        Ok(Self { command, relative, params })
    }

    /// Absolute segment from a fixed-size parameter array.
    ///
    /// Only for call sites where the arity is known statically.
    pub(crate) fn absolute<const N: usize>(command: Command, params: [f64; N]) -> Self {
        debug_assert_eq!(N, command.arity());
        Self { command, relative: false, params: params.to_vec() }
    }

    /// Absolute move-to.
    pub fn move_to(x: f64, y: f64) -> Self {
        Self::absolute(Command::Move, [x, y])
    }

    /// Absolute line-to.
    pub fn line_to(x: f64, y: f64) -> Self {
        Self::absolute(Command::Line, [x, y])
    }

    /// Absolute cubic curve-to.
    pub fn cubic_to(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> Self {
        Self::absolute(Command::Cubic, [x1, y1, x2, y2, x, y])
    }

    /// Close-path.
    pub fn close() -> Self {
        Self::absolute(Command::Close, [])
    }

    /// The parameters, exactly `command.arity()` of them.
    #[inline]
    pub fn params(&self) -> &[f64] {
        &self.params
    }

    /// The command letter this segment was written with.
    #[inline]
    pub fn letter(&self) -> char {
        self.command.letter(self.relative)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())?;
        for value in &self.params {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

/// Render segments back to path data, e.g. `"M 0 0 L 10 0 Z"`.
pub fn to_path_data(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(Segment::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        for letter in "MmLlHhVvCcSsQqTtAaZz".chars() {
            let (command, relative) = Command::from_letter(letter).unwrap();
            assert_eq!(command.letter(relative), letter);
        }
        assert_eq!(Command::from_letter('x'), None);
    }

    #[test]
    fn arity_table() {
        let expected = [
            ('M', 2), ('L', 2), ('H', 1), ('V', 1), ('C', 6),
            ('S', 4), ('Q', 4), ('T', 2), ('A', 7), ('Z', 0),
        ];
        for (letter, arity) in expected {
            let (command, _) = Command::from_letter(letter).unwrap();
            assert_eq!(command.arity(), arity, "arity of {}", letter);
        }
    }

    #[test]
    fn segment_rejects_wrong_arity() {
        let err = Segment::new(Command::Cubic, true, vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            ParseError::Arity { command: 'c', expected: 6, found: 2 }
        );
        assert!(Segment::new(Command::Close, false, vec![]).is_ok());
    }

    #[test]
    fn segments_display_as_path_data() {
        let segments = vec![
            Segment::move_to(0.0, 0.0),
            Segment::line_to(10.5, 0.0),
            Segment::cubic_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
            Segment::close(),
        ];
        assert_eq!(to_path_data(&segments), "M 0 0 L 10.5 0 C 1 2 3 4 5 6 Z");
    }
}
