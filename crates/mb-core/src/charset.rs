/// Premier glyphe : itération 0 → espace.
pub const GLYPH_BASE: u8 = b' ';

/// Lookup table mapping an escape-time count → character.
///
/// Count `n` maps to the character with code `32 + n`, so points that escape
/// immediately print as spaces and denser glyphs mark slower escapes.
/// Pre-computed once per pass for O(1) per-pixel cost.
///
/// # Example
/// ```
/// use mb_core::charset::GlyphLut;
/// let lut = GlyphLut::new(32);
/// assert_eq!(lut.map(0), ' ');
/// assert_eq!(lut.map(1), '!');
/// assert_eq!(lut.map(32), '@');
/// ```
pub struct GlyphLut {
    lut: Vec<char>,
}

impl GlyphLut {
    /// Build a LUT covering counts `0..=max_iter`.
    ///
    /// Counts whose code would leave printable ASCII are clamped to `'~'`;
    /// validated configurations never produce them.
    #[must_use]
    pub fn new(max_iter: u32) -> Self {
        let lut = (0..=max_iter)
            .map(|n| {
                let code = (u32::from(GLYPH_BASE) + n).min(u32::from(b'~'));
                char::from(code as u8)
            })
            .collect();
        Self { lut }
    }

    /// Map an escape-time count to its character.
    ///
    /// Counts above the LUT's `max_iter` map to the last entry.
    ///
    /// # Example
    /// ```
    /// use mb_core::charset::GlyphLut;
    /// let lut = GlyphLut::new(4);
    /// assert_eq!(lut.map(4), '$');
    /// assert_eq!(lut.map(99), '$');
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn map(&self, iterations: u32) -> char {
        let idx = (iterations as usize).min(self.lut.len() - 1);
        self.lut[idx]
    }

    /// Highest count covered by the table.
    #[must_use]
    pub fn max_iter(&self) -> u32 {
        (self.lut.len() - 1) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_is_space_plus_count() {
        let lut = GlyphLut::new(94);
        for n in 0..=94u32 {
            assert_eq!(u32::from(lut.map(n)), 32 + n);
        }
    }

    #[test]
    fn lut_is_monotonic() {
        let lut = GlyphLut::new(60);
        let mut prev = lut.map(0);
        for n in 1..=60 {
            let ch = lut.map(n);
            assert!(ch > prev, "LUT non monotone à l'itération {n}");
            prev = ch;
        }
    }

    #[test]
    fn out_of_range_codes_clamp_to_tilde() {
        let lut = GlyphLut::new(200);
        assert_eq!(lut.map(94), '~');
        assert_eq!(lut.map(150), '~');
        assert_eq!(lut.max_iter(), 200);
    }

    #[test]
    fn zero_cap_maps_everything_to_space() {
        let lut = GlyphLut::new(0);
        assert_eq!(lut.map(0), ' ');
        assert_eq!(lut.map(7), ' ');
    }
}
