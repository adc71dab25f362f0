use crate::common::*;

/// The frame width in pixels that every annotation is bounded by.
pub const FRAME_WIDTH: u32 = 640;

/// The last valid pixel index of the frame.
pub const MAX_COORD: u32 = FRAME_WIDTH - 1;

/// Coordinate tag of a `<bndbox>` record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordTag {
    XMin,
    YMin,
    XMax,
    YMax,
}

impl CoordTag {
    /// All tags in canonical order.
    pub const ALL: [CoordTag; 4] = [Self::XMin, Self::YMin, Self::XMax, Self::YMax];

    pub fn name(&self) -> &'static str {
        match self {
            Self::XMin => "xmin",
            Self::YMin => "ymin",
            Self::XMax => "xmax",
            Self::YMax => "ymax",
        }
    }

    /// Position of the tag in canonical order.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for CoordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Clamps a coordinate value to the frame.
pub fn clamp_coord(value: u32) -> u32 {
    value.min(MAX_COORD)
}

/// Parses an ASCII digit string into a clamped coordinate.
///
/// The caller guarantees `digits` is a non-empty run of `[0-9]`, so the only
/// parse failure is overflow, which is clamped like any other large value.
pub fn parse_coord(digits: &str) -> u32 {
    digits.parse().map(clamp_coord).unwrap_or(MAX_COORD)
}
