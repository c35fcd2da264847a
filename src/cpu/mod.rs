//! Décodage des instructions SIC/XE
//!
//! Un mot Format 3/4 se découpe en trois champs (numérotation MSB en tête) :
//!
//! ```text
//! +--------+-------------+--------------------------+
//! | opcode | n i x b p e |   displacement/address   |
//! | 0..6   |    6..12    |          12..24          |
//! +--------+-------------+--------------------------+
//! ```

pub mod errors;
pub mod word;
pub mod instruction_formats;
pub mod registers;
pub mod decoder;

pub use errors::*;
pub use word::*;
pub use instruction_formats::*;
pub use registers::*;
pub use decoder::*;
