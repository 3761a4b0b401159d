//! Command line configuration
//!
//! Options are `KEY=VALUE` tokens with case-insensitive keys, the final
//! token names the file to rewrite. Values that don't parse leave the
//! option at its previous value.

use crate::{
    errors::Error,
    types::{Axis, Micrometer},
};
use nom::{
    character::complete::{alpha1, char},
    combinator::rest,
    sequence::separated_pair,
    IResult,
};
use std::path::PathBuf;
use strum::{Display, FromRepr};
use tracing::{debug, warn};

/// How the probe grid is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, FromRepr)]
pub enum MeshMode {
    /// Initialization script only
    #[default]
    #[strum(serialize = "none")]
    Disabled = 0,
    /// Fixed number of points per axis
    #[strum(serialize = "points")]
    Points = 1,
    /// Fixed distance between points
    #[strum(serialize = "spacing")]
    Spacing = 2,
}

/// Post-processor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mesh: MeshMode,
    pub points: u32,
    pub spacing: Micrometer,
    pub start_code: String,
    pub x_offset: Micrometer,
    pub y_offset: Micrometer,
    pub min_grid: Micrometer,
    pub max_grid: Micrometer,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mesh: MeshMode::Disabled,
            points: 5,
            spacing: Micrometer::mm(15),
            start_code: "M9000".into(),
            x_offset: Micrometer::mm(19),
            y_offset: Micrometer::mm(19),
            min_grid: Micrometer::mm(10),
            max_grid: Micrometer::mm(300),
        }
    }
}

impl Config {
    /// Build the configuration from command line tokens
    ///
    /// Returns the configuration together with the target file, which is
    /// always the last token.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<(Self, PathBuf), Error> {
        let target = args.last().ok_or(Error::MissingPath)?;

        let mut cfg = Self::default();
        for arg in args {
            cfg.apply(arg.as_ref());
        }

        Ok((cfg, PathBuf::from(target.as_ref())))
    }

    /// Distance subtracted from the grid center along `axis`
    pub fn offset(&self, axis: Axis) -> Micrometer {
        match axis {
            Axis::X => self.x_offset,
            Axis::Y => self.y_offset,
        }
    }

    /// Apply a single `KEY=VALUE` token
    pub fn apply(&mut self, token: &str) {
        let Ok((_, (key, value))) = parse_option(token) else {
            debug!(token, "not an option");
            return;
        };

        let value = value.trim();
        let accepted = match key.to_ascii_uppercase().as_str() {
            "MESH" => value.parse::<i64>().ok().map(|n| {
                let mode = usize::try_from(n).ok().and_then(MeshMode::from_repr);
                self.mesh = mode.unwrap_or_else(|| {
                    warn!(mode = n, "unknown mesh mode, no grid will be created");
                    MeshMode::Disabled
                });
            }),
            "START" => {
                self.start_code = value.to_string();
                Some(())
            }
            "POINTS" => value.parse().ok().map(|n| self.points = n),
            "SPACING" => Micrometer::from_token(value)
                .filter(|s| *s > Micrometer(0))
                .map(|s| self.spacing = s),
            "XOFFSET" => Micrometer::from_token(value).map(|v| self.x_offset = v),
            "YOFFSET" => Micrometer::from_token(value).map(|v| self.y_offset = v),
            "MINGRID" => Micrometer::from_token(value).map(|v| self.min_grid = v),
            "MAXGRID" => Micrometer::from_token(value).map(|v| self.max_grid = v),
            _ => {
                debug!(key, "unknown option");
                return;
            }
        };

        if accepted.is_none() {
            debug!(key, value, "ignoring invalid option value");
        }
    }
}

fn parse_option(token: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(alpha1, char('='), rest)(token)
}
