//! The rewriting pass
//!
//! Consumes the first layer marker, computes the probe grid and puts the
//! generated header in place of the placeholder line.

use crate::{
    config::{Config, MeshMode},
    errors::Error,
    gcode::{AxisRange, GCodeFile, HEADER, MARKER},
    mesh::{Header, MeshGrid},
};
use tracing::{debug, warn};

/// What the pass did besides rewriting lines
#[derive(Debug, Default)]
pub struct Outcome {
    /// Generated grid, `None` if only the initialization script was emitted
    pub grid: Option<MeshGrid>,
    /// Reason a configured grid was dropped
    pub warning: Option<Error>,
}

pub fn process(file: GCodeFile, cfg: &Config) -> (GCodeFile, Outcome) {
    let mut outcome = Outcome::default();

    if cfg.mesh != MeshMode::Disabled {
        match plan_grid(&file, cfg) {
            Ok(grid) => outcome.grid = grid,
            Err(e) => {
                warn!(error = %e, "no mesh grid will be created");
                outcome.warning = Some(e);
            }
        }
    }

    let header = Header {
        start_code: &cfg.start_code,
        grid: outcome.grid.as_ref(),
    }
    .to_string();

    let file = file
        .replace_first_n(MARKER, "", 1)
        .replace_first_n(HEADER, &header, 1);

    (file, outcome)
}

fn plan_grid(file: &GCodeFile, cfg: &Config) -> Result<Option<MeshGrid>, Error> {
    let Some(payload) = file.first_marker() else {
        debug!("no first layer marker");
        return Ok(None);
    };
    let Some(layer) = AxisRange::from_marker(payload)? else {
        debug!(payload = payload.trim(), "first layer marker has no ranges");
        return Ok(None);
    };

    let grid = MeshGrid::compute(cfg, layer)?;
    if let Some(grid) = &grid {
        debug!(mode = %cfg.mesh, points = grid.count, "mesh grid computed");
    }
    Ok(grid)
}
