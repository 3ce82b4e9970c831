use std::io;

use mb_core::charset::GlyphLut;
use mb_core::config::RasterConfig;
use mb_core::error::CoreError;
use mb_core::fixed::{MAX_PRINTABLE_ITER, from_fixed};
use mb_core::frame::IterationFrame;
use mb_core::traits::LineSink;
use mb_core::viewport::{Grid, Steps, Viewport};

use crate::escape::escape_time;

/// Balaye un viewport ligne par ligne et produit une ligne de glyphes par
/// ligne balayée.
///
/// Rows start at `ymin` and move toward `ymax`; within a row, columns start
/// at `xmin` and move toward `xmax`. Sample coordinates come from the
/// [`Grid`]: fixed steps, or an exact spread from bound to bound.
/// Every input is validated once at construction, so a pass cannot fail
/// except on output.
///
/// # Example
/// ```
/// use mb_core::config::RasterConfig;
/// use mb_raster::Rasterizer;
///
/// let raster = Rasterizer::from_config(&RasterConfig::default()).unwrap();
/// let lines = raster.render_lines();
/// assert_eq!(lines.len(), 25);
/// assert!(lines.iter().all(|l| l.len() == 80));
/// ```
pub struct Rasterizer {
    viewport: Viewport,
    grid: Grid,
    max_iter: u32,
    lut: GlyphLut,
}

impl Rasterizer {
    /// Build a rasterizer over `viewport` sampled every `steps`.
    ///
    /// # Errors
    /// Returns [`CoreError`] if the viewport is inverted or out of range, a
    /// step is not positive, or `max_iter` exceeds the printable range.
    pub fn new(viewport: Viewport, steps: Steps, max_iter: u32) -> Result<Self, CoreError> {
        viewport.validate()?;
        steps.validate()?;
        Self::with_grid(viewport, Grid::stepped(&viewport, &steps), max_iter)
    }

    /// Build from a configuration: derived axes spread exactly over the
    /// viewport, explicit steps are kept as is.
    ///
    /// # Errors
    /// Returns the first [`CoreError`] reported by [`RasterConfig::validate`].
    pub fn from_config(config: &RasterConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Self::with_grid(config.viewport, config.grid()?, config.max_iter)
    }

    fn with_grid(viewport: Viewport, grid: Grid, max_iter: u32) -> Result<Self, CoreError> {
        if max_iter > MAX_PRINTABLE_ITER {
            return Err(CoreError::MaxIterOutOfRange {
                max_iter,
                limit: MAX_PRINTABLE_ITER,
            });
        }

        log::debug!(
            "Rasterizer {}×{} : x [{:.4}, {:.4}], y [{:.4}, {:.4}], maxiter={max_iter}",
            grid.columns(),
            grid.rows(),
            from_fixed(viewport.xmin),
            from_fixed(viewport.xmax),
            from_fixed(viewport.ymin),
            from_fixed(viewport.ymax),
        );

        Ok(Self {
            viewport,
            grid,
            max_iter,
            lut: GlyphLut::new(max_iter),
        })
    }

    /// Region being scanned.
    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Sample coordinates of every column and row.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Iteration cap; pixels that reach it are inside the set.
    #[must_use]
    pub fn max_iter(&self) -> u32 {
        self.max_iter
    }

    /// Columns per line.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    /// Lines per pass.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    /// Run one pass and keep every iteration count.
    ///
    /// # Example
    /// ```
    /// use mb_core::viewport::{Steps, Viewport};
    /// use mb_raster::Rasterizer;
    ///
    /// let vp = Viewport { xmin: 0, xmax: 0, ymin: 0, ymax: 0 };
    /// let raster = Rasterizer::new(vp, Steps { dx: 1, dy: 1 }, 16).unwrap();
    /// assert_eq!(raster.compute().get(0, 0), 16);
    /// ```
    #[must_use]
    pub fn compute(&self) -> IterationFrame {
        let mut frame = IterationFrame::new(self.columns(), self.rows(), self.max_iter);
        for j in 0..self.rows() {
            let cy = self.grid.y.coord(j);
            for (i, slot) in frame.row_mut(j).iter_mut().enumerate() {
                *slot = escape_time(self.grid.x.coord(i), cy, self.max_iter);
            }
        }
        log::debug!(
            "Passe terminée : {} pixels, {} dans l'ensemble",
            frame.counts.len(),
            frame.inside_count()
        );
        frame
    }

    /// Run one pass and return the rendered lines, without terminators.
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        self.compute().to_lines(&self.lut)
    }

    /// Stream one pass into `sink`, one row at a time.
    ///
    /// A single line buffer is filled per row, emitted, then cleared, so
    /// memory stays at one row regardless of the viewport height.
    ///
    /// # Errors
    /// Returns the first I/O error reported by the sink.
    ///
    /// # Example
    /// ```
    /// use mb_core::config::RasterConfig;
    /// use mb_core::traits::WriterSink;
    /// use mb_raster::Rasterizer;
    ///
    /// let raster = Rasterizer::from_config(&RasterConfig::default()).unwrap();
    /// let mut sink = WriterSink::new(Vec::new());
    /// raster.render_to(&mut sink).unwrap();
    /// assert_eq!(sink.into_inner().len(), 25 * 81);
    /// ```
    pub fn render_to<S: LineSink>(&self, sink: &mut S) -> io::Result<()> {
        let mut line = String::with_capacity(self.columns());
        let mut inside = 0usize;

        for j in 0..self.rows() {
            let cy = self.grid.y.coord(j);
            for i in 0..self.columns() {
                let n = escape_time(self.grid.x.coord(i), cy, self.max_iter);
                if n == self.max_iter {
                    inside += 1;
                }
                line.push(self.lut.map(n));
            }
            sink.emit_line(&line)?;
            log::trace!("Ligne {j} (cy={cy}) émise");
            line.clear();
        }

        sink.finish()?;
        log::debug!(
            "Passe terminée : {} lignes × {} colonnes, {inside} pixels dans l'ensemble",
            self.rows(),
            self.columns()
        );
        Ok(())
    }
}
