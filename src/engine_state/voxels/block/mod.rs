//! # Block Module
//!
//! Block codes and block faces. A block is nothing more than a small integer code:
//! `0` is air, every other value is a solid, opaque block of a single material.

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to store block codes in a chunk.
pub type BlockTypeSize = u8;

/// The code stored for empty space.
pub const AIR_CODE: BlockTypeSize = 0;

/// Returns `true` if the block code represents a solid block.
#[inline]
pub fn is_solid(code: BlockTypeSize) -> bool {
    code != AIR_CODE
}
