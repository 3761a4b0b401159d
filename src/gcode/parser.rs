//! Sentinel line classifier and first layer range parser

use crate::{
    errors::Error,
    types::{Axis, Micrometer},
};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::{all_consuming, map, rest, value},
    sequence::{preceded, separated_pair, tuple},
    IResult,
};

/// Slicer comment carrying the first layer bounding box
pub const MARKER: &str = ";FirstLayerMinMax:";
/// Placeholder replaced by the generated header
pub const HEADER: &str = ";=== OPP HEADER ===";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// First layer marker, with everything after the marker tag
    Marker(&'a str),
    /// Anything else
    Other,
}

impl<'a> Line<'a> {
    /// Classify a program text line
    pub fn classify(line: &'a str) -> Line<'a> {
        classify_line(line).map(|(_, l)| l).unwrap_or(Line::Other)
    }
}

fn classify_line(line: &str) -> IResult<&str, Line<'_>> {
    map(preceded(tag(MARKER), rest), Line::Marker)(line)
}

/// Min/max extent of the first layer along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub axis: Axis,
    pub min: Micrometer,
    pub max: Micrometer,
    /// Sign of the sub-micrometer digits dropped from `min` and `max`
    pub residue: [i8; 2],
}

impl AxisRange {
    pub fn new(axis: Axis, min: Micrometer, max: Micrometer) -> Self {
        Self {
            axis,
            min,
            max,
            residue: [0, 0],
        }
    }

    /// Parse `X<min>:<max>` or `Y<min>:<max>`, quotes around values allowed
    pub fn parse(token: &str) -> Result<Self, Error> {
        let unquoted = token.replace('"', "");
        let range = all_consuming(parse_range)(unquoted.as_str())
            .map(|(_, r)| r)
            .map_err(|_| Error::AxisToken(token.into()));
        range
    }

    pub fn span(&self) -> Micrometer {
        self.max - self.min
    }

    /// Parse both ranges of a marker payload
    ///
    /// Returns `None` if the payload has fewer than two tokens.
    pub fn from_marker(payload: &str) -> Result<Option<[Self; 2]>, Error> {
        let payload = payload.to_uppercase();
        let tokens: Vec<&str> = payload.trim().split(' ').collect();
        match tokens.as_slice() {
            [first, second, ..] => Ok(Some([Self::parse(first)?, Self::parse(second)?])),
            _ => Ok(None),
        }
    }
}

fn parse_range(input: &str) -> IResult<&str, AxisRange> {
    map(
        tuple((
            alt((value(Axis::X, char('X')), value(Axis::Y, char('Y')))),
            separated_pair(
                Micrometer::parse_with_residue,
                char(':'),
                Micrometer::parse_with_residue,
            ),
        )),
        |(axis, ((min, min_residue), (max, max_residue)))| AxisRange {
            axis,
            min,
            max,
            residue: [min_residue, max_residue],
        },
    )(input)
}
