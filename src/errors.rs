//! Post-processing errors

use crate::types::{Axis, Micrometer};
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Target file can't be read or written
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No target file on the command line
    #[error("missing target file argument")]
    MissingPath,

    /// First layer marker token is not `X<min>:<max>` or `Y<min>:<max>`
    #[error("invalid first layer range '{0}'")]
    AxisToken(String),

    /// Probed area exceeds the safe bed area
    #[error("{axis} range {min}:{max} is outside the safe area {lower}:{upper}")]
    OutOfBounds {
        axis: Axis,
        min: Micrometer,
        max: Micrometer,
        lower: Micrometer,
        upper: Micrometer,
    },
}

impl Error {
    /// Accompany an I/O error with the file it happened on
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}
