//! Probe grid geometry

use crate::{
    config::{Config, MeshMode},
    errors::Error,
    gcode::AxisRange,
    types::Micrometer,
};

/// Step the whole millimeter above `value` down to a multiple of `spacing`
///
/// # Panics
/// Panics if `spacing` is zero
pub fn round_down(value: Micrometer, spacing: Micrometer) -> Micrometer {
    let v = value.trunc() + Micrometer::mm(1);
    v - v.rem_euclid(spacing)
}

/// Step the whole millimeter above `value` up to the next multiple of `spacing`
///
/// An exact multiple still moves up a full step.
///
/// # Panics
/// Panics if `spacing` is zero
pub fn round_up(value: Micrometer, spacing: Micrometer) -> Micrometer {
    let v = value.trunc() + Micrometer::mm(1);
    v + (spacing - v.rem_euclid(spacing))
}

/// Point density of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Points per axis
    Points(u32),
    /// Distance between points
    Spacing(Micrometer),
}

/// Probe grid covering the first layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshGrid {
    /// Probed ranges, in marker order
    pub ranges: [AxisRange; 2],
    pub step: Step,
    /// Total number of probe points
    pub count: u64,
    /// Offset-adjusted grid center, per range
    pub center: [Micrometer; 2],
}

impl MeshGrid {
    /// Compute the grid for the first layer extents
    ///
    /// Returns `None` when no grid is configured and an error when the
    /// grid would leave the safe bed area.
    pub fn compute(cfg: &Config, layer: [AxisRange; 2]) -> Result<Option<Self>, Error> {
        let step = match cfg.mesh {
            MeshMode::Disabled => return Ok(None),
            MeshMode::Points => Step::Points(cfg.points),
            MeshMode::Spacing => Step::Spacing(cfg.spacing),
        };

        let ranges = layer.map(|r| snap(r, step));
        for r in &ranges {
            if r.min < cfg.min_grid || r.max > cfg.max_grid {
                return Err(Error::OutOfBounds {
                    axis: r.axis,
                    min: r.min,
                    max: r.max,
                    lower: cfg.min_grid,
                    upper: cfg.max_grid,
                });
            }
        }

        let count = match step {
            Step::Points(n) => u64::from(n) * u64::from(n),
            Step::Spacing(s) => {
                let [a, b] = ranges;
                (a.span().ratio(s) * b.span().ratio(s)) as u64
            }
        };
        let center = ranges.map(|r| r.span().half() + r.min - cfg.offset(r.axis));

        Ok(Some(Self {
            ranges,
            step,
            count,
            center,
        }))
    }
}

fn snap(r: AxisRange, step: Step) -> AxisRange {
    let (min, max) = match step {
        Step::Points(_) => (
            (r.min - Micrometer::mm(1)).trunc_residue(r.residue[0]),
            (r.max + Micrometer::mm(1)).trunc_residue(r.residue[1]),
        ),
        Step::Spacing(s) => (round_down(r.min, s), round_up(r.max, s)),
    };
    AxisRange::new(r.axis, min, max)
}

#[cfg(test)]
mod tests {
    use super::{round_down, round_up, MeshGrid, Step};
    use crate::{
        config::{Config, MeshMode},
        errors::Error,
        gcode::AxisRange,
        types::{Axis, Micrometer},
    };

    fn mm(v: i64) -> Micrometer {
        Micrometer::mm(v)
    }

    fn layer(marker: &str) -> [AxisRange; 2] {
        AxisRange::from_marker(marker).unwrap().unwrap()
    }

    fn config(mesh: MeshMode) -> Config {
        Config {
            mesh,
            min_grid: mm(-10),
            ..Config::default()
        }
    }

    #[test]
    fn rounding() {
        assert_eq!(round_down(mm(0), mm(20)), mm(0));
        assert_eq!(round_up(mm(100), mm(20)), mm(120));
        assert_eq!(round_up(mm(99), mm(20)), mm(120));
        assert_eq!(round_up(Micrometer(98_600), mm(20)), mm(100));
        assert_eq!(round_down(Micrometer(38_900), mm(20)), mm(20));
        assert_eq!(round_down(mm(39), mm(20)), mm(40));
        assert_eq!(round_down(Micrometer(-5_500), mm(20)), mm(-20));
        assert_eq!(round_up(mm(10), Micrometer(7_500)), mm(15));
    }

    #[test]
    fn points_mode() {
        let cfg = config(MeshMode::Points);
        let grid = MeshGrid::compute(&cfg, layer(" X0:100 Y0:200")).unwrap().unwrap();
        let [x, y] = grid.ranges;
        assert_eq!((x.axis, x.min, x.max), (Axis::X, mm(-1), mm(101)));
        assert_eq!((y.axis, y.min, y.max), (Axis::Y, mm(-1), mm(201)));
        assert_eq!(grid.step, Step::Points(5));
        assert_eq!(grid.count, 25);
        assert_eq!(grid.center, [mm(50 - 19), mm(100 - 19)]);
    }

    #[test]
    fn points_mode_truncates_padding() {
        let cfg = config(MeshMode::Points);
        let grid = MeshGrid::compute(&cfg, layer(" X20.7:80.2 Y0.5:33.3")).unwrap().unwrap();
        let [x, y] = grid.ranges;
        assert_eq!((x.min, x.max), (mm(19), mm(81)));
        assert_eq!((y.min, y.max), (mm(0), mm(34)));
        assert_eq!(grid.center, [mm(50 - 19), mm(17 - 19)]);
    }

    #[test]
    fn points_mode_sub_micrometer_values() {
        let cfg = config(MeshMode::Points);
        let grid = MeshGrid::compute(&cfg, layer(" X0.0005:100 Y-2.0005:-1.0005"))
            .unwrap()
            .unwrap();
        let [x, y] = grid.ranges;
        assert_eq!((x.min, x.max), (mm(0), mm(101)));
        assert_eq!((y.min, y.max), (mm(-3), mm(0)));
    }

    #[test]
    fn spacing_mode() {
        let cfg = Config {
            spacing: mm(20),
            x_offset: mm(0),
            y_offset: Micrometer(2_500),
            ..config(MeshMode::Spacing)
        };
        let grid = MeshGrid::compute(&cfg, layer(" X0:100 Y0:200")).unwrap().unwrap();
        let [x, y] = grid.ranges;
        assert_eq!((x.min, x.max), (mm(0), mm(120)));
        assert_eq!((y.min, y.max), (mm(0), mm(220)));
        assert_eq!(grid.step, Step::Spacing(mm(20)));
        assert_eq!(grid.count, 6 * 11);
        assert_eq!(grid.center, [mm(60), Micrometer(107_500)]);
    }

    #[test]
    fn no_mesh() {
        let cfg = config(MeshMode::Disabled);
        assert_eq!(MeshGrid::compute(&cfg, layer(" X0:100 Y0:200")).unwrap(), None);
    }

    #[test]
    fn out_of_bounds() {
        let cfg = Config {
            mesh: MeshMode::Points,
            ..Config::default()
        };
        let err = MeshGrid::compute(&cfg, layer(" X50:100 Y5:200")).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { axis: Axis::Y, .. }));

        let err = MeshGrid::compute(&cfg, layer(" X50:300 Y50:200")).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { axis: Axis::X, .. }));
    }

    #[test]
    fn bounds_are_inclusive() {
        let cfg = Config {
            mesh: MeshMode::Points,
            ..Config::default()
        };
        let grid = MeshGrid::compute(&cfg, layer(" X11:299 Y11:299")).unwrap().unwrap();
        assert_eq!((grid.ranges[0].min, grid.ranges[0].max), (mm(10), mm(300)));
    }
}
