use mb_core::fixed::{ESCAPE_THRESHOLD, FRAC_BITS};

/// Escape-time count of `c = cx + i·cy` under `z ← z² + c`, in fixed-point.
///
/// Starting from `z = 0`, each step first rescales the squares
/// (`x2 = x*x >> 12`, `y2 = y*y >> 12`) and stops as soon as
/// `x2 + y2 > 16384` (|z|² > 4). Otherwise it advances
/// `y = (x*y >> 11) + cy`, `x = x2 - y2 + cx`; the cross term shifts by 11
/// so it carries the factor 2 of `2xy`.
///
/// The result lies in `[0, max_iter]`; `max_iter` means the point never
/// escaped. Shifts are arithmetic, so negative products floor toward -∞.
/// Inputs are expected within `±2^24`, which keeps every product in range.
///
/// # Example
/// ```
/// use mb_raster::escape::escape_time;
/// assert_eq!(escape_time(0, 0, 32), 32);
/// assert_eq!(escape_time(4096, 0, 32), 3);
/// ```
#[inline(always)]
#[must_use]
pub fn escape_time(cx: i64, cy: i64, max_iter: u32) -> u32 {
    let mut x = 0i64;
    let mut y = 0i64;
    let mut iter = 0;

    while iter < max_iter {
        let x2 = (x * x) >> FRAC_BITS;
        let y2 = (y * y) >> FRAC_BITS;
        if x2 + y2 > ESCAPE_THRESHOLD {
            break;
        }
        y = ((x * y) >> (FRAC_BITS - 1)) + cy;
        x = x2 - y2 + cx;
        iter += 1;
    }

    iter
}
