//! Resize handle directions.

use bitflags::bitflags;

bitflags! {
    /// Edges a resize handle moves.
    ///
    /// Corner handles combine two cardinal edges.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ResizeDirection: u8 {
        const NORTH = 0b0001;
        const SOUTH = 0b0010;
        const EAST  = 0b0100;
        const WEST  = 0b1000;
        const NORTH_EAST = Self::NORTH.bits() | Self::EAST.bits();
        const NORTH_WEST = Self::NORTH.bits() | Self::WEST.bits();
        const SOUTH_EAST = Self::SOUTH.bits() | Self::EAST.bits();
        const SOUTH_WEST = Self::SOUTH.bits() | Self::WEST.bits();
    }
}

impl ResizeDirection {
    /// The eight handles every decorated surface carries, corners first.
    pub const HANDLES: [Self; 8] = [
        Self::NORTH_WEST,
        Self::NORTH_EAST,
        Self::SOUTH_WEST,
        Self::SOUTH_EAST,
        Self::NORTH,
        Self::SOUTH,
        Self::EAST,
        Self::WEST,
    ];

    /// Short tag as used in handle class names (`n`, `se`, ...).
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            d if d == Self::NORTH => "n",
            d if d == Self::SOUTH => "s",
            d if d == Self::EAST => "e",
            d if d == Self::WEST => "w",
            d if d == Self::NORTH_EAST => "ne",
            d if d == Self::NORTH_WEST => "nw",
            d if d == Self::SOUTH_EAST => "se",
            d if d == Self::SOUTH_WEST => "sw",
            _ => "",
        }
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::HANDLES.into_iter().find(|d| d.tag() == tag)
    }

    #[must_use]
    pub fn is_corner(self) -> bool {
        self.bits().count_ones() == 2
    }
}
