//! G-Code words emitted into the header

use crate::types::{Axis, Micrometer};
use std::fmt;

/// Emitted code words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Word {
    /// Mxxx commands
    M(MWord),
    /// Axis range `X<min>:<max>`
    Range(Axis, Micrometer, Micrometer),
    /// Axis coordinate
    Coord(Axis, Micrometer),
    /// P point count
    P(u32),
    /// S spacing
    S(Micrometer),
    /// C quoted string parameter
    C(String),
    /// Verbatim user code, e.g. a macro name
    Raw(String),
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Word::*;
        match self {
            M(w) => fmt::Display::fmt(w, f),
            Range(axis, min, max) => write!(f, "{axis}{min}:{max}"),
            Coord(axis, x) => write!(f, "{axis}{x}"),
            P(x) => write!(f, "P{x}"),
            S(x) => write!(f, "S{x}"),
            C(s) => write!(f, "C\"{s}\""),
            Raw(s) => f.write_str(s),
        }
    }
}

/// Supported M codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MWord {
    /// Define mesh grid
    M557 = 557,
}

impl fmt::Display for MWord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "M{}", *self as u16)
    }
}

/// Words of a single code line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Words(pub Vec<Word>);

impl fmt::Display for Words {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut words = self.0.iter();
        if let Some(first) = words.next() {
            fmt::Display::fmt(first, f)?;
        }
        for w in words {
            write!(f, " {w}")?;
        }
        Ok(())
    }
}
