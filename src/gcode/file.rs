//! G-code document held in memory

use super::parser::Line;
use crate::errors::Error;
use std::{fs, path::Path};

/// G-Code file as a list of lines, each with its original terminator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GCodeFile {
    lines: Vec<String>,
}

impl GCodeFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(Error::io(path))?;
        Ok(Self::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        let lines = text.split_inclusive('\n').map(String::from).collect();
        Self { lines }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        fs::write(path, self.to_text()).map_err(Error::io(path))
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Payload of the first first-layer marker line
    pub fn first_marker(&self) -> Option<&str> {
        self.lines.iter().find_map(|l| match Line::classify(l) {
            Line::Marker(payload) => Some(payload),
            _ => None,
        })
    }

    /// Replace the first `n` lines starting with `pattern`
    pub fn replace_first_n(self, pattern: &str, replacement: &str, n: usize) -> Self {
        let mut left = n;
        let lines = self
            .lines
            .into_iter()
            .map(|line| {
                if left > 0 && line.starts_with(pattern) {
                    left -= 1;
                    replacement.to_string()
                } else {
                    line
                }
            })
            .collect();
        Self { lines }
    }
}
