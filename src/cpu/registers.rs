//! Contexte d'adressage fourni par l'appelant (PC et registre B)
//!
//! Le décodeur ne simule aucun registre : le PC et la base sont des entrées
//! explicites, ce qui rend le décodage reproductible.

use super::instruction_formats::{Displacement, RelativeAddressingKind};
use crate::ADDRESS_MASK;
use serde::{Deserialize, Serialize};

/// PC par défaut (début de la zone programme utilisateur)
pub const DEFAULT_PC: u32 = 0x1000;

/// Valeurs de registres au moment du décodage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressingContext {
    /// Program Counter (adresse de l'instruction suivante)
    pub pc: u32,

    /// Registre de base B, s'il est connu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_register: Option<u32>,
}

impl AddressingContext {
    pub fn new(pc: u32) -> Self {
        Self {
            pc,
            base_register: None,
        }
    }

    pub fn with_base(mut self, base_register: u32) -> Self {
        self.base_register = Some(base_register);
        self
    }

    /// Calcule l'adresse cible, réduite à 24 bits.
    ///
    /// Retourne `None` uniquement en base-relative sans registre B.
    pub fn resolve(&self, kind: RelativeAddressingKind, displacement: Displacement) -> Option<u32> {
        let target = match kind {
            RelativeAddressingKind::PcRelative => self
                .pc
                .wrapping_add_signed(i32::from(displacement.signed())),
            RelativeAddressingKind::BaseRelative => self
                .base_register?
                .wrapping_add(u32::from(displacement.unsigned())),
            RelativeAddressingKind::Direct => u32::from(displacement.unsigned()),
        };
        Some(target & ADDRESS_MASK)
    }
}

impl Default for AddressingContext {
    fn default() -> Self {
        Self::new(DEFAULT_PC)
    }
}
