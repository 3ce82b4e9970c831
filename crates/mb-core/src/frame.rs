use crate::charset::GlyphLut;

/// Résultats d'une passe : un compte d'itérations par pixel, row-major.
///
/// La ligne 0 correspond à `ymin`, la colonne 0 à `xmin`.
///
/// # Example
/// ```
/// use mb_core::frame::IterationFrame;
/// let mut frame = IterationFrame::new(3, 2, 32);
/// frame.set(2, 1, 7);
/// assert_eq!(frame.get(2, 1), 7);
/// assert_eq!(frame.counts.len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IterationFrame {
    /// Iteration counts, row-major.
    pub counts: Vec<u32>,
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Iteration cap the counts were computed with.
    pub max_iter: u32,
}

impl IterationFrame {
    /// Crée une frame pré-allouée, tous les comptes à zéro.
    #[must_use]
    pub fn new(width: usize, height: usize, max_iter: u32) -> Self {
        Self {
            counts: vec![0; width * height],
            width,
            height,
            max_iter,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.counts[y * self.width + x]
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, iterations: u32) {
        self.counts[y * self.width + x] = iterations;
    }

    /// Counts of row `y`.
    #[must_use]
    pub fn row(&self, y: usize) -> &[u32] {
        let start = y * self.width;
        &self.counts[start..start + self.width]
    }

    /// Mutable counts of row `y`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u32] {
        let start = y * self.width;
        &mut self.counts[start..start + self.width]
    }

    /// Number of pixels that reached the iteration cap.
    ///
    /// # Example
    /// ```
    /// use mb_core::frame::IterationFrame;
    /// let mut frame = IterationFrame::new(2, 1, 5);
    /// frame.set(0, 0, 5);
    /// assert_eq!(frame.inside_count(), 1);
    /// ```
    #[must_use]
    pub fn inside_count(&self) -> usize {
        self.counts.iter().filter(|&&n| n == self.max_iter).count()
    }

    /// Append row `y` as glyphs to `line` (which is not cleared first).
    pub fn render_row_into(&self, y: usize, lut: &GlyphLut, line: &mut String) {
        line.extend(self.row(y).iter().map(|&n| lut.map(n)));
    }

    /// Render every row to its own line, without terminators.
    ///
    /// # Example
    /// ```
    /// use mb_core::charset::GlyphLut;
    /// use mb_core::frame::IterationFrame;
    /// let mut frame = IterationFrame::new(2, 1, 32);
    /// frame.set(1, 0, 32);
    /// assert_eq!(frame.to_lines(&GlyphLut::new(32)), vec![" @".to_string()]);
    /// ```
    #[must_use]
    pub fn to_lines(&self, lut: &GlyphLut) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                let mut line = String::with_capacity(self.width);
                self.render_row_into(y, lut, &mut line);
                line
            })
            .collect()
    }
}
