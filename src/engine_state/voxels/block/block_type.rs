//! # Block Type Module
//!
//! Named block codes used by the terrain fill. The core only distinguishes air from
//! solid; the names exist so the generator reads as terrain rather than magic numbers.

use super::BlockTypeSize;

/// The block types placed by the default terrain fill.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space.
    AIR = 0,

    /// The bottom layers of the terrain.
    BASE = 1,

    /// The layers between the base and the surface.
    SECONDARY = 2,

    /// The surface layer.
    TOP = 3,
}

impl BlockType {
    /// The storage code for this block type.
    #[inline]
    pub fn code(self) -> BlockTypeSize {
        self as BlockTypeSize
    }
}
