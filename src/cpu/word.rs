//! Mot d'instruction encodé sur 24 bits

use super::errors::InvalidInputReason;
use crate::{WORD_BITS, WORD_MASK};

/// Nombre maximal de chiffres significatifs pour une valeur 24 bits
const MAX_SIGNIFICANT_DIGITS: usize = (WORD_BITS / 4) as usize;

/// Mot d'instruction SIC/XE (toujours <= 0xFFFFFF)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedWord(u32);

impl EncodedWord {
    /// Crée un mot à partir d'une valeur brute, si elle tient sur 24 bits
    pub fn new(value: u32) -> Option<Self> {
        if value <= WORD_MASK {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Analyse une chaîne de chiffres hexadécimaux (insensible à la casse).
    ///
    /// Aucun préfixe, signe, espace ou séparateur n'est accepté. Les zéros de
    /// tête sont ignorés pour la vérification de plage.
    pub fn parse_hex(digits: &str) -> Result<Self, InvalidInputReason> {
        if digits.is_empty() {
            return Err(InvalidInputReason::Empty);
        }

        if let Some((position, character)) = digits
            .char_indices()
            .find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(InvalidInputReason::NonHexDigit { character, position });
        }

        let significant = digits.trim_start_matches('0');
        if significant.len() > MAX_SIGNIFICANT_DIGITS {
            return Err(InvalidInputReason::OutOfRange);
        }
        if significant.is_empty() {
            return Ok(Self(0));
        }

        let value = u32::from_str_radix(significant, 16)
            .map_err(|_| InvalidInputReason::OutOfRange)?;
        Self::new(value).ok_or(InvalidInputReason::OutOfRange)
    }

    /// Valeur numérique du mot
    pub fn value(self) -> u32 {
        self.0
    }

    /// Représentation binaire sur exactement 24 caractères (zéros de tête inclus)
    pub fn to_binary_string(self) -> String {
        format!("{:024b}", self.0)
    }

    /// Bits 0..6 : opcode
    pub fn opcode(self) -> u8 {
        ((self.0 >> 18) & 0x3F) as u8
    }

    /// Bits 6..12 : champ nixbpe (n en bit de poids fort)
    pub fn nixbpe(self) -> u8 {
        ((self.0 >> 12) & 0x3F) as u8
    }

    /// Bits 12..24 : champ displacement/address non signé
    pub fn displacement_field(self) -> u16 {
        (self.0 & 0x0FFF) as u16
    }
}

impl std::fmt::Display for EncodedWord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}
