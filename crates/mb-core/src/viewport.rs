use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::fixed::COORD_LIMIT;

/// Axe du plan complexe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Partie réelle (colonnes).
    Real,
    /// Partie imaginaire (lignes).
    Imaginary,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real => f.write_str("x"),
            Self::Imaginary => f.write_str("y"),
        }
    }
}

/// Rectangular region of the complex plane, in fixed-point units.
///
/// Bounds are inclusive: a sample lands on `max` when `max - min` is a
/// multiple of the step.
///
/// # Example
/// ```
/// use mb_core::viewport::Viewport;
/// let vp = Viewport::default();
/// assert_eq!((vp.xmin, vp.xmax), (-8601, 2867));
/// assert_eq!((vp.ymin, vp.ymax), (-4915, 4915));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Viewport {
    /// Borne gauche (partie réelle minimale).
    pub xmin: i64,
    /// Borne droite.
    pub xmax: i64,
    /// Borne basse (partie imaginaire minimale), première ligne balayée.
    pub ymin: i64,
    /// Borne haute.
    pub ymax: i64,
}

impl Default for Viewport {
    /// The whole set: real part [-2.1, 0.7], imaginary part [-1.2, 1.2].
    fn default() -> Self {
        Self {
            xmin: -8601,
            xmax: 2867,
            ymin: -4915,
            ymax: 4915,
        }
    }
}

impl Viewport {
    /// Check bound ordering and magnitude.
    ///
    /// # Errors
    /// Returns [`CoreError::InvertedViewport`] if a lower bound exceeds its
    /// upper bound, or [`CoreError::CoordinateOutOfRange`] if any bound lies
    /// outside `±2^24`.
    pub fn validate(&self) -> Result<(), CoreError> {
        for value in [self.xmin, self.xmax, self.ymin, self.ymax] {
            if value.unsigned_abs() > COORD_LIMIT.unsigned_abs() {
                return Err(CoreError::CoordinateOutOfRange { value });
            }
        }
        if self.xmin > self.xmax {
            return Err(CoreError::InvertedViewport {
                axis: Axis::Real,
                min: self.xmin,
                max: self.xmax,
            });
        }
        if self.ymin > self.ymax {
            return Err(CoreError::InvertedViewport {
                axis: Axis::Imaginary,
                min: self.ymin,
                max: self.ymax,
            });
        }
        Ok(())
    }

    /// Width of the region in fixed-point units.
    #[must_use]
    pub fn span_x(&self) -> i64 {
        self.xmax - self.xmin
    }

    /// Height of the region in fixed-point units.
    #[must_use]
    pub fn span_y(&self) -> i64 {
        self.ymax - self.ymin
    }

    /// Number of columns scanned with `steps`: samples `xmin + i*dx <= xmax`.
    ///
    /// Expects a validated viewport and positive steps.
    ///
    /// # Example
    /// ```
    /// use mb_core::viewport::{Steps, Viewport};
    /// let vp = Viewport::default();
    /// let steps = Steps::from_resolution(&vp, 80, 25).unwrap();
    /// assert_eq!(vp.columns(&steps), 80);
    /// assert_eq!(vp.rows(&steps), 25);
    /// ```
    #[must_use]
    pub fn columns(&self, steps: &Steps) -> usize {
        (self.span_x() / steps.dx) as usize + 1
    }

    /// Number of rows scanned with `steps`: samples `ymin + j*dy <= ymax`.
    #[must_use]
    pub fn rows(&self, steps: &Steps) -> usize {
        (self.span_y() / steps.dy) as usize + 1
    }
}

/// Pas d'échantillonnage en virgule fixe.
///
/// # Example
/// ```
/// use mb_core::viewport::{Steps, Viewport};
/// let steps = Steps::from_resolution(&Viewport::default(), 80, 25).unwrap();
/// assert_eq!(steps, Steps { dx: 145, dy: 409 });
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Steps {
    /// Pas horizontal.
    pub dx: i64,
    /// Pas vertical.
    pub dy: i64,
}

impl Steps {
    /// Derive steps so that `columns` × `rows` samples cover `viewport`,
    /// first and last sample on the bounds: `dx = (xmax - xmin) / (columns - 1)`.
    ///
    /// Integer division truncates, so the last sample may fall short of the
    /// upper bound by less than one step.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidResolution`] if `columns` or `rows` is
    /// below 2, and [`CoreError::DegenerateStep`] if a derived step is zero
    /// (span narrower than the requested resolution).
    pub fn from_resolution(viewport: &Viewport, columns: u32, rows: u32) -> Result<Self, CoreError> {
        let steps = Self {
            dx: step_for(viewport.span_x(), columns, Axis::Real)?,
            dy: step_for(viewport.span_y(), rows, Axis::Imaginary)?,
        };
        Ok(steps)
    }

    /// Reject zero or negative steps.
    ///
    /// # Errors
    /// Returns [`CoreError::DegenerateStep`] naming the first bad axis.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.dx <= 0 {
            return Err(CoreError::DegenerateStep {
                axis: Axis::Real,
                step: self.dx,
            });
        }
        if self.dy <= 0 {
            return Err(CoreError::DegenerateStep {
                axis: Axis::Imaginary,
                step: self.dy,
            });
        }
        Ok(())
    }
}

/// Échantillonnage d'un axe : `coord(i) = min + floor(i * numer / denom)`.
///
/// A stepped axis has `numer = step`, `denom = 1`. A spread axis puts its
/// first sample on `min` and its last on `max` by dividing the exact
/// product, so rounding never accumulates along the axis.
///
/// # Example
/// ```
/// use mb_core::viewport::AxisSampler;
/// let y = AxisSampler::spread(-4915, 4915, 25);
/// assert_eq!(y.coord(0), -4915);
/// assert_eq!(y.coord(12), 0);
/// assert_eq!(y.coord(24), 4915);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisSampler {
    /// Première coordonnée.
    pub min: i64,
    /// Numérateur du pas.
    pub numer: i64,
    /// Dénominateur du pas, toujours positif.
    pub denom: i64,
    /// Nombre d'échantillons.
    pub count: usize,
}

impl AxisSampler {
    /// Samples `min, min + step, …` while `<= max`. Expects `step > 0`, `min <= max`.
    #[must_use]
    pub fn stepped(min: i64, max: i64, step: i64) -> Self {
        Self {
            min,
            numer: step,
            denom: 1,
            count: ((max - min) / step) as usize + 1,
        }
    }

    /// `samples` points from `min` to `max`, both included. Expects `samples >= 2`.
    #[must_use]
    pub fn spread(min: i64, max: i64, samples: u32) -> Self {
        Self {
            min,
            numer: max - min,
            denom: i64::from(samples - 1),
            count: samples as usize,
        }
    }

    /// Coordinate of sample `i`.
    #[inline(always)]
    #[must_use]
    pub fn coord(&self, i: usize) -> i64 {
        self.min + (i as i64 * self.numer) / self.denom
    }
}

/// Grille d'échantillonnage complète : colonnes (x) et lignes (y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Axe réel, une entrée par colonne.
    pub x: AxisSampler,
    /// Axe imaginaire, une entrée par ligne, de `ymin` vers `ymax`.
    pub y: AxisSampler,
}

impl Grid {
    /// Grid sampled every `steps`, starting on the lower bounds.
    #[must_use]
    pub fn stepped(viewport: &Viewport, steps: &Steps) -> Self {
        Self {
            x: AxisSampler::stepped(viewport.xmin, viewport.xmax, steps.dx),
            y: AxisSampler::stepped(viewport.ymin, viewport.ymax, steps.dy),
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.x.count
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.y.count
    }
}

/// Step putting `samples` points on a span of `span`, both ends included.
///
/// # Errors
/// Returns [`CoreError::InvalidResolution`] if `samples < 2`, and
/// [`CoreError::DegenerateStep`] if the truncated step is zero.
///
/// # Example
/// ```
/// use mb_core::viewport::{step_for, Axis};
/// assert_eq!(step_for(11468, 80, Axis::Real).unwrap(), 145);
/// ```
pub fn step_for(span: i64, samples: u32, axis: Axis) -> Result<i64, CoreError> {
    if samples < 2 {
        return Err(CoreError::InvalidResolution {
            axis,
            value: samples,
        });
    }
    let step = span / i64::from(samples - 1);
    if step <= 0 {
        return Err(CoreError::DegenerateStep { axis, step });
    }
    Ok(step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_grid_is_80_by_25() {
        let vp = Viewport::default();
        let steps = Steps::from_resolution(&vp, 80, 25).unwrap();
        assert_eq!(steps.dx, (2867 - -8601) / 79);
        assert_eq!(steps.dy, (4915 - -4915) / 24);
        assert_eq!(vp.columns(&steps), 80);
        assert_eq!(vp.rows(&steps), 25);
    }

    #[test]
    fn spread_axis_hits_both_bounds() {
        let x = AxisSampler::spread(-8601, 2867, 80);
        assert_eq!(x.count, 80);
        assert_eq!(x.coord(0), -8601);
        assert_eq!(x.coord(3), -8601 + 435);
        assert_eq!(x.coord(79), 2867);

        let y = AxisSampler::spread(-4915, 4915, 25);
        for j in 0..25 {
            assert_eq!(y.coord(j), -4915 + (j as i64 * 9830) / 24);
        }
        assert_eq!(y.coord(12), 0);
    }

    #[test]
    fn stepped_grid_matches_step_counts() {
        let vp = Viewport::default();
        let steps = Steps { dx: 145, dy: 409 };
        let grid = Grid::stepped(&vp, &steps);
        assert_eq!((grid.columns(), grid.rows()), (80, 25));
        assert_eq!(grid.x.coord(79), -8601 + 79 * 145);
        assert_eq!(grid.y.coord(24), 4901);
    }

    #[test]
    fn extreme_coordinates_are_out_of_range_not_a_panic() {
        let vp = Viewport {
            xmin: i64::MIN,
            ..Viewport::default()
        };
        assert_eq!(
            vp.validate(),
            Err(CoreError::CoordinateOutOfRange { value: i64::MIN })
        );
        let vp = Viewport {
            ymax: i64::MAX,
            ..Viewport::default()
        };
        assert_eq!(
            vp.validate(),
            Err(CoreError::CoordinateOutOfRange { value: i64::MAX })
        );
        let edge = Viewport {
            xmin: -COORD_LIMIT,
            ..Viewport::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn exact_multiple_lands_on_upper_bound() {
        let vp = Viewport {
            xmin: 0,
            xmax: 100,
            ymin: -10,
            ymax: 10,
        };
        let steps = Steps { dx: 10, dy: 5 };
        assert_eq!(vp.columns(&steps), 11);
        assert_eq!(vp.rows(&steps), 5);
    }

    #[test]
    fn point_viewport_has_one_sample() {
        let vp = Viewport {
            xmin: 7,
            xmax: 7,
            ymin: 7,
            ymax: 7,
        };
        assert!(vp.validate().is_ok());
        let steps = Steps { dx: 1, dy: 1 };
        assert_eq!((vp.columns(&steps), vp.rows(&steps)), (1, 1));
    }

    #[test]
    fn zero_step_is_rejected() {
        assert_eq!(
            Steps { dx: 0, dy: 1 }.validate(),
            Err(CoreError::DegenerateStep {
                axis: Axis::Real,
                step: 0
            })
        );
        assert_eq!(
            Steps { dx: 3, dy: -1 }.validate(),
            Err(CoreError::DegenerateStep {
                axis: Axis::Imaginary,
                step: -1
            })
        );
    }

    #[test]
    fn narrow_span_cannot_reach_resolution() {
        let vp = Viewport {
            xmin: 0,
            xmax: 10,
            ymin: 0,
            ymax: 100,
        };
        assert!(matches!(
            Steps::from_resolution(&vp, 80, 25),
            Err(CoreError::DegenerateStep {
                axis: Axis::Real,
                ..
            })
        ));
    }

    #[test]
    fn single_column_resolution_is_rejected() {
        let vp = Viewport::default();
        assert_eq!(
            Steps::from_resolution(&vp, 1, 25),
            Err(CoreError::InvalidResolution {
                axis: Axis::Real,
                value: 1
            })
        );
    }

    #[test]
    fn inverted_and_oversized_viewports_are_rejected() {
        let inverted = Viewport {
            xmin: 0,
            xmax: 10,
            ymin: 5,
            ymax: -5,
        };
        assert!(matches!(
            inverted.validate(),
            Err(CoreError::InvertedViewport {
                axis: Axis::Imaginary,
                ..
            })
        ));

        let huge = Viewport {
            xmax: COORD_LIMIT + 1,
            ..Viewport::default()
        };
        assert_eq!(
            huge.validate(),
            Err(CoreError::CoordinateOutOfRange {
                value: COORD_LIMIT + 1
            })
        );
    }
}
