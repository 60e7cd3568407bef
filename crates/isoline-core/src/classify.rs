//! Per-cell sign classification and the marching squares case table.
//!
//! Corners and sides of a cell are numbered as follows:
//!
//! ```text
//!   TL(3) ---- top(2) ---- TR(2)
//!     |                      |
//!   left(3)               right(1)
//!     |                      |
//!   BL(0) --- bottom(0) --- BR(1)
//! ```
//!
//! Bit `k` of a case code is set when corner `k` is at or above the level.

use crate::options::SaddleRule;

/// A corner of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    BottomLeft = 0,
    BottomRight = 1,
    TopRight = 2,
    TopLeft = 3,
}

impl Corner {
    /// All corners in bit order.
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopRight,
        Corner::TopLeft,
    ];

    /// Node offset `(di, dj)` of this corner relative to the cell's bottom-left node.
    #[must_use]
    pub fn offset(self) -> (usize, usize) {
        match self {
            Corner::BottomLeft => (0, 0),
            Corner::BottomRight => (1, 0),
            Corner::TopRight => (1, 1),
            Corner::TopLeft => (0, 1),
        }
    }
}

/// A side of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Bottom = 0,
    Right = 1,
    Top = 2,
    Left = 3,
}

impl Side {
    /// All sides in numbering order.
    pub const ALL: [Side; 4] = [Side::Bottom, Side::Right, Side::Top, Side::Left];

    /// End corners of this side, lower-index node first.
    ///
    /// Both cells sharing a grid edge see it with the same orientation, so
    /// interpolating from the first to the second corner gives bit-identical
    /// points on either side.
    #[must_use]
    pub fn corners(self) -> (Corner, Corner) {
        match self {
            Side::Bottom => (Corner::BottomLeft, Corner::BottomRight),
            Side::Right => (Corner::BottomRight, Corner::TopRight),
            Side::Top => (Corner::TopLeft, Corner::TopRight),
            Side::Left => (Corner::BottomLeft, Corner::TopLeft),
        }
    }
}

/// A contour piece inside one cell, running from one crossed side to another.
pub type SidePair = (Side, Side);

/// 4-bit sign pattern of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaseCode(u8);

impl CaseCode {
    /// Classifies corner values `[BL, BR, TR, TL]` against `level`.
    #[inline]
    #[must_use]
    pub fn classify(values: &[f64; 4], level: f64) -> Self {
        let code = u8::from(values[0] >= level)
            | (u8::from(values[1] >= level) << 1)
            | (u8::from(values[2] >= level) << 2)
            | (u8::from(values[3] >= level) << 3);
        Self(code)
    }

    /// Builds a code from its raw bits (only the low four are kept).
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0xF)
    }

    /// Raw 4-bit value.
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Whether corner `corner` is at or above the level.
    #[must_use]
    pub fn is_above(self, corner: Corner) -> bool {
        self.0 & (1 << corner as u8) != 0
    }

    /// Whether this is one of the two ambiguous saddle codes.
    #[must_use]
    pub fn is_saddle(self) -> bool {
        self.0 == 0b0101 || self.0 == 0b1010
    }

    /// Whether no contour passes through the cell.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0 || self.0 == 0xF
    }

    /// Whether the contour crosses `side`.
    #[must_use]
    pub fn crosses(self, side: Side) -> bool {
        let (a, b) = side.corners();
        self.is_above(a) != self.is_above(b)
    }

    /// Segments for this code.
    ///
    /// `center_above` is only consulted for saddle codes under
    /// [`SaddleRule::CenterSample`]; pass the result of comparing the mean of
    /// the four corners with the level.
    #[must_use]
    pub fn segments(self, rule: SaddleRule, center_above: bool) -> &'static [SidePair] {
        if self.is_saddle() && rule == SaddleRule::CenterSample && center_above {
            JOINED_SADDLES[usize::from((self.0 >> 1) & 1)]
        } else {
            CASES[usize::from(self.0)]
        }
    }
}

use Side::{Bottom, Left, Right, Top};

/// Segments per case code. Saddles (5, 10) cut off the above-level corners.
#[rustfmt::skip]
static CASES: [&[SidePair]; 16] = [
    &[],                              // 0000
    &[(Left, Bottom)],                // 0001 BL
    &[(Bottom, Right)],               // 0010 BR
    &[(Left, Right)],                 // 0011 BL BR
    &[(Right, Top)],                  // 0100 TR
    &[(Left, Bottom), (Right, Top)],  // 0101 BL TR (saddle)
    &[(Bottom, Top)],                 // 0110 BR TR
    &[(Left, Top)],                   // 0111 BL BR TR
    &[(Top, Left)],                   // 1000 TL
    &[(Bottom, Top)],                 // 1001 BL TL
    &[(Bottom, Right), (Top, Left)],  // 1010 BR TL (saddle)
    &[(Right, Top)],                  // 1011 BL BR TL
    &[(Left, Right)],                 // 1100 TR TL
    &[(Bottom, Right)],               // 1101 BL TR TL
    &[(Left, Bottom)],                // 1110 BR TR TL
    &[],                              // 1111
];

/// Saddle segments when the above-level corners are joined through the cell
/// centre: the below-level corners are cut off instead. Indexed by `(code >> 1) & 1`
/// (0 for `0101`, 1 for `1010`).
#[rustfmt::skip]
static JOINED_SADDLES: [&[SidePair]; 2] = [
    &[(Bottom, Right), (Top, Left)],  // 0101: cut off BR, TL
    &[(Left, Bottom), (Right, Top)],  // 1010: cut off BL, TR
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bits() {
        let code = CaseCode::classify(&[1.0, -1.0, 0.5, -0.5], 0.5);
        assert_eq!(code.bits(), 0b0101);
        assert!(code.is_saddle());
        assert!(code.is_above(Corner::BottomLeft));
        assert!(!code.is_above(Corner::TopLeft));
    }

    #[test]
    fn test_level_equal_counts_as_above() {
        assert_eq!(CaseCode::classify(&[0.0; 4], 0.0).bits(), 0xF);
        assert!(CaseCode::classify(&[0.0; 4], 0.0).is_empty());
    }

    #[test]
    fn test_nan_level_is_empty() {
        assert!(CaseCode::classify(&[1.0, 2.0, 3.0, 4.0], f64::NAN).is_empty());
    }

    #[test]
    fn test_table_uses_exactly_the_crossed_sides() {
        for rule in [SaddleRule::Diagonal, SaddleRule::CenterSample] {
            for center_above in [false, true] {
                for bits in 0..16 {
                    let code = CaseCode::from_bits(bits);
                    let segments = code.segments(rule, center_above);
                    let mut used = [0_u8; 4];
                    for &(a, b) in segments {
                        assert_ne!(a, b, "code {bits:04b} joins a side to itself");
                        used[a as usize] += 1;
                        used[b as usize] += 1;
                    }
                    for side in Side::ALL {
                        let expected = u8::from(code.crosses(side));
                        assert_eq!(used[side as usize], expected, "code {bits:04b}, {side:?}");
                    }
                    assert!(segments.len() <= 2);
                }
            }
        }
    }

    #[test]
    fn test_diagonal_saddle_cuts_off_above_corners() {
        // BL and TR above: BL is bounded by left/bottom, TR by right/top.
        let code = CaseCode::from_bits(0b0101);
        assert_eq!(
            code.segments(SaddleRule::Diagonal, true),
            &[(Left, Bottom), (Right, Top)]
        );
        let code = CaseCode::from_bits(0b1010);
        assert_eq!(
            code.segments(SaddleRule::Diagonal, true),
            &[(Bottom, Right), (Top, Left)]
        );
    }

    #[test]
    fn test_center_sample_saddle() {
        let code = CaseCode::from_bits(0b0101);
        assert_eq!(
            code.segments(SaddleRule::CenterSample, false),
            code.segments(SaddleRule::Diagonal, false)
        );
        assert_eq!(
            code.segments(SaddleRule::CenterSample, true),
            &[(Bottom, Right), (Top, Left)]
        );
        let code = CaseCode::from_bits(0b1010);
        assert_eq!(
            code.segments(SaddleRule::CenterSample, true),
            &[(Left, Bottom), (Right, Top)]
        );
    }

    #[test]
    fn test_side_corners_are_adjacent() {
        for side in Side::ALL {
            let (a, b) = side.corners();
            let (ai, aj) = a.offset();
            let (bi, bj) = b.offset();
            assert_eq!(ai.abs_diff(bi) + aj.abs_diff(bj), 1);
            // lower-index node first
            assert!((aj, ai) < (bj, bi));
        }
    }
}
