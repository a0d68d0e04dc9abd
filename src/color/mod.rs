pub mod assigner;
pub mod cache;
pub mod hash;
pub mod hex;
pub mod hsl;

pub use assigner::{ColorAssigner, ColorSource, OverrideTable};
pub use hash::{hash_color, HashedColor};
pub use hex::{HexColor, HexColorError};
