//! Formats d'instructions et modes d'adressage SIC/XE
//!
//! Toutes les classifications sont des fonctions pures des bits nixbpe.

use bitflags::bitflags;
use serde::Serialize;

/// Valeur à partir de laquelle le displacement 12 bits est négatif (bit 11)
pub const DISPLACEMENT_SIGN_THRESHOLD: u16 = 2048;

/// Modulo du displacement 12 bits
pub const DISPLACEMENT_MODULUS: i32 = 4096;

bitflags! {
    /// Flags nixbpe - bits 6 à 11 du mot d'instruction
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AddressingFlags: u8 {
        /// n - adressage indirect
        const N = 1 << 5;

        /// i - adressage immédiat
        const I = 1 << 4;

        /// x - adressage indexé
        const X = 1 << 3;

        /// b - relatif au registre de base
        const B = 1 << 2;

        /// p - relatif au PC
        const P = 1 << 1;

        /// e - format étendu (Format 4)
        const E = 1 << 0;
    }
}

impl AddressingFlags {
    /// Construit les flags depuis le champ nixbpe de 6 bits
    pub fn from_nixbpe(field: u8) -> Self {
        Self::from_bits_truncate(field)
    }

    fn bit(&self, flag: Self) -> u8 {
        u8::from(self.contains(flag))
    }

    pub fn n(&self) -> u8 {
        self.bit(Self::N)
    }

    pub fn i(&self) -> u8 {
        self.bit(Self::I)
    }

    pub fn x(&self) -> u8 {
        self.bit(Self::X)
    }

    pub fn b(&self) -> u8 {
        self.bit(Self::B)
    }

    pub fn p(&self) -> u8 {
        self.bit(Self::P)
    }

    pub fn e(&self) -> u8 {
        self.bit(Self::E)
    }

    /// Chaîne "nixbpe" sur 6 caractères
    pub fn to_binary_string(&self) -> String {
        format!("{:06b}", self.bits())
    }
}

/// Mode d'adressage, déterminé par les bits n et i
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressingMode {
    /// n=1, i=1
    Simple,
    /// n=1, i=0
    Indirect,
    /// n=0, i=1
    Immediate,
    /// n=0, i=0 (compatibilité SIC)
    SicStandard,
}

impl AddressingMode {
    pub fn from_flags(flags: AddressingFlags) -> Self {
        match (flags.n(), flags.i()) {
            (1, 1) => AddressingMode::Simple,
            (1, 0) => AddressingMode::Indirect,
            (0, 1) => AddressingMode::Immediate,
            _ => AddressingMode::SicStandard,
        }
    }
}

impl std::fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AddressingMode::Simple => "Simple",
            AddressingMode::Indirect => "Indirect",
            AddressingMode::Immediate => "Immediate",
            AddressingMode::SicStandard => "SIC Standard",
        };
        f.write_str(label)
    }
}

/// Format d'instruction, déterminé par le bit e
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionFormat {
    /// Format 3: instruction de 3 octets
    /// +--------+------+--------------+
    /// | opcode |nixbpe|     disp     |
    /// +--------+------+--------------+
    Format3,

    /// Format 4: instruction étendue de 4 octets (e=1)
    Format4,
}

impl InstructionFormat {
    pub fn from_flags(flags: AddressingFlags) -> Self {
        if flags.contains(AddressingFlags::E) {
            InstructionFormat::Format4
        } else {
            InstructionFormat::Format3
        }
    }

    /// Taille de l'instruction en octets
    pub fn length_bytes(&self) -> u32 {
        match self {
            InstructionFormat::Format3 => 3,
            InstructionFormat::Format4 => 4,
        }
    }
}

impl std::fmt::Display for InstructionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstructionFormat::Format3 => f.write_str("Format 3"),
            InstructionFormat::Format4 => f.write_str("Format 4"),
        }
    }
}

/// Type d'adressage relatif, déterminé par les bits p et b
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeAddressingKind {
    PcRelative,
    BaseRelative,
    Direct,
}

impl RelativeAddressingKind {
    /// p est prioritaire sur b
    pub fn from_flags(flags: AddressingFlags) -> Self {
        if flags.contains(AddressingFlags::P) {
            RelativeAddressingKind::PcRelative
        } else if flags.contains(AddressingFlags::B) {
            RelativeAddressingKind::BaseRelative
        } else {
            RelativeAddressingKind::Direct
        }
    }
}

impl std::fmt::Display for RelativeAddressingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RelativeAddressingKind::PcRelative => "PC-relative",
            RelativeAddressingKind::BaseRelative => "Base-relative",
            RelativeAddressingKind::Direct => "Direct",
        };
        f.write_str(label)
    }
}

/// Champ displacement/address de 12 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Displacement(u16);

impl Displacement {
    /// Construit le displacement depuis un champ brut (seuls 12 bits sont gardés)
    pub fn from_field(field: u16) -> Self {
        Self(field & 0x0FFF)
    }

    /// Valeur non signée (0..=4095)
    pub fn unsigned(&self) -> u16 {
        self.0
    }

    /// Valeur en complément à deux sur 12 bits (-2048..=2047)
    pub fn signed(&self) -> i16 {
        if self.0 >= DISPLACEMENT_SIGN_THRESHOLD {
            (i32::from(self.0) - DISPLACEMENT_MODULUS) as i16
        } else {
            self.0 as i16
        }
    }

    /// Vrai si le bit de signe du champ est positionné
    pub fn is_negative(&self) -> bool {
        self.0 >= DISPLACEMENT_SIGN_THRESHOLD
    }

    pub fn to_binary_string(&self) -> String {
        format!("{:012b}", self.0)
    }

    pub fn to_hex_string(&self) -> String {
        format!("{:03X}", self.0)
    }
}
