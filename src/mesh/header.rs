//! Generated header block

use super::grid::{MeshGrid, Step};
use crate::gcode::words::{MWord, Word, Words};
use std::fmt;

/// Text replacing the header placeholder line
#[derive(Debug)]
pub struct Header<'a> {
    pub start_code: &'a str,
    pub grid: Option<&'a MeshGrid>,
}

impl Header<'_> {
    fn mesh_line(grid: &MeshGrid) -> Words {
        let mut words = vec![Word::M(MWord::M557)];
        words.extend(grid.ranges.iter().map(|r| Word::Range(r.axis, r.min, r.max)));
        words.push(match grid.step {
            Step::Points(n) => Word::P(n),
            Step::Spacing(s) => Word::S(s),
        });
        Words(words)
    }

    fn start_line(&self, grid: &MeshGrid) -> Words {
        let mut words = vec![Word::Raw(self.start_code.into()), Word::C("mesh".into())];
        words.extend(
            grid.ranges
                .iter()
                .zip(grid.center)
                .map(|(r, c)| Word::Coord(r.axis, c)),
        );
        Words(words)
    }
}

impl fmt::Display for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, ";== Modified by OPP: oozeBot Post Processor")?;
        writeln!(f, ";== Source: https://github.com/oozeBot/OPP")?;
        writeln!(f)?;
        match self.grid {
            Some(grid) => {
                writeln!(f, ";== {} point mesh grid", grid.count)?;
                writeln!(f, "{}", Self::mesh_line(grid))?;
                writeln!(f, "{}", self.start_line(grid))?;
            }
            None => {
                writeln!(f, ";== Initialization script")?;
                writeln!(f, "{}", self.start_code)?;
            }
        }
        writeln!(f)
    }
}
