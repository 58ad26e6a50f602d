//! Lane selection masks for partial block writes.

/// A bit mask over the `p*q` lanes of one block access.
///
/// Bit `t` (least-significant first) selects footprint member `t`. A
/// masked block write stores member `t` only when its bit is set; the
/// remaining slots keep their previous contents. This is how a final
/// partial block of a dimension not divisible by `p*q` is written without
/// corrupting neighboring data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LaneMask(u64);

impl LaneMask {
    /// Mask selecting no lanes.
    pub const EMPTY: LaneMask = LaneMask(0);

    /// Mask from raw bits.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Mask selecting the first `n` lanes (a leading partial block).
    ///
    /// # Panics
    ///
    /// Panics if `n > 64`.
    pub fn first(n: usize) -> Self {
        assert!(n <= 64, "lane mask holds at most 64 lanes");
        if n == 64 {
            Self(u64::MAX)
        } else {
            Self((1u64 << n) - 1)
        }
    }

    /// Mask selecting all of `lanes` lanes.
    pub fn all(lanes: usize) -> Self {
        Self::first(lanes)
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether lane `t` is selected.
    #[inline]
    pub const fn contains(self, t: usize) -> bool {
        t < 64 && self.0 & (1 << t) != 0
    }

    /// Select lane `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t >= 64`.
    #[inline]
    #[must_use]
    pub const fn with(self, t: usize) -> Self {
        assert!(t < 64, "lane mask holds at most 64 lanes");
        Self(self.0 | (1 << t))
    }

    /// Number of selected lanes.
    #[inline]
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }
}
