//! SIC/XE Decoder - Analyse des mots d'instruction Format 3/4
//!
//! Cette bibliothèque décode un mot d'instruction SIC/XE de 24 bits (opcode,
//! flags nixbpe, displacement) et calcule l'adresse cible selon le mode
//! d'adressage (PC-relative, base-relative ou direct).

pub mod cpu;
pub mod report;
pub mod config;

pub use cpu::*;
pub use report::*;
pub use config::*;

/// Version du décodeur
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largeur d'un mot d'instruction en bits
pub const WORD_BITS: u32 = 24;

/// Valeur maximale d'un mot d'instruction
pub const WORD_MASK: u32 = 0x00FF_FFFF;

/// Masque appliqué à toute adresse cible calculée (adresses sur 24 bits)
pub const ADDRESS_MASK: u32 = 0x00FF_FFFF;

/// Mot d'instruction analysé par défaut (exemple LDA classique)
pub const DEFAULT_HEX_CODE: &str = "032600";
