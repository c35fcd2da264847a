//! Erreurs du décodeur

use thiserror::Error;

/// Erreurs pouvant survenir lors du décodage d'un mot d'instruction.
///
/// Le décodage est tout-ou-rien : en cas d'erreur aucun résultat partiel
/// n'est produit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Chaîne HEX vide, mal formée ou hors de la plage 24 bits
    #[error("entrée invalide '{input}': {reason}")]
    InvalidInput {
        input: String,
        reason: InvalidInputReason,
    },

    /// Mode base-relative sans valeur pour le registre B
    #[error("adressage base-relative demandé pour '{input}' sans registre B")]
    MissingBaseRegister { input: String },
}

impl DecodeError {
    /// Nom stable du type d'erreur, destiné aux couches de présentation
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::InvalidInput { .. } => "InvalidInput",
            DecodeError::MissingBaseRegister { .. } => "MissingBaseRegister",
        }
    }

    /// Entrée fautive, telle que fournie par l'appelant
    pub fn input(&self) -> &str {
        match self {
            DecodeError::InvalidInput { input, .. } => input,
            DecodeError::MissingBaseRegister { input } => input,
        }
    }
}

/// Cause précise d'une entrée invalide
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputReason {
    #[error("chaîne vide")]
    Empty,

    #[error("caractère non hexadécimal '{character}' en position {position}")]
    NonHexDigit { character: char, position: usize },

    #[error("valeur supérieure à 0xFFFFFF (24 bits)")]
    OutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_and_input() {
        let err = DecodeError::InvalidInput {
            input: "GG".to_string(),
            reason: InvalidInputReason::NonHexDigit { character: 'G', position: 0 },
        };
        assert_eq!(err.kind(), "InvalidInput");
        assert_eq!(err.input(), "GG");
        assert!(err.to_string().contains("'G'"));

        let err = DecodeError::MissingBaseRegister { input: "034600".to_string() };
        assert_eq!(err.kind(), "MissingBaseRegister");
        assert_eq!(err.input(), "034600");
    }
}
