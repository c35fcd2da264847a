//! Décodeur d'instructions SIC/XE

use super::errors::DecodeError;
use super::instruction_formats::*;
use super::registers::AddressingContext;
use super::word::EncodedWord;
use rayon::prelude::*;

/// Résultat complet du décodage d'un mot.
///
/// Tous les champs intermédiaires sont conservés pour que la présentation
/// puisse en afficher n'importe quel sous-ensemble sans recalcul.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    input: String,
    word: EncodedWord,
    binary: String,
    opcode: u8,
    opcode_binary: String,
    opcode_hex: String,
    flags: AddressingFlags,
    nixbpe: String,
    displacement: Displacement,
    displacement_binary: String,
    displacement_hex: String,
    mode: AddressingMode,
    format: InstructionFormat,
    kind: RelativeAddressingKind,
    context: AddressingContext,
    target_address: u32,
}

impl DecodeResult {
    /// Entrée HEX normalisée en majuscules
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn word(&self) -> EncodedWord {
        self.word
    }

    /// Mot complet sur 24 caractères binaires
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Opcode (6 bits)
    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    pub fn opcode_binary(&self) -> &str {
        &self.opcode_binary
    }

    /// Opcode sur 2 chiffres hexadécimaux majuscules
    pub fn opcode_hex(&self) -> &str {
        &self.opcode_hex
    }

    pub fn flags(&self) -> AddressingFlags {
        self.flags
    }

    pub fn nixbpe(&self) -> &str {
        &self.nixbpe
    }

    pub fn displacement(&self) -> Displacement {
        self.displacement
    }

    pub fn displacement_unsigned(&self) -> u16 {
        self.displacement.unsigned()
    }

    pub fn displacement_signed(&self) -> i16 {
        self.displacement.signed()
    }

    pub fn displacement_binary(&self) -> &str {
        &self.displacement_binary
    }

    /// Displacement sur 3 chiffres hexadécimaux majuscules
    pub fn displacement_hex(&self) -> &str {
        &self.displacement_hex
    }

    pub fn mode(&self) -> AddressingMode {
        self.mode
    }

    pub fn format(&self) -> InstructionFormat {
        self.format
    }

    pub fn kind(&self) -> RelativeAddressingKind {
        self.kind
    }

    /// Contexte (PC, registre B) utilisé pour le calcul
    pub fn context(&self) -> AddressingContext {
        self.context
    }

    /// Adresse cible sur 24 bits
    pub fn target_address(&self) -> u32 {
        self.target_address
    }

    /// Description combinée, ex. "SIC/XE, Simple, PC-relative, Format 3"
    pub fn flag_description(&self) -> String {
        format!("SIC/XE, {}, {}, {}", self.mode, self.kind, self.format)
    }
}

/// Décodeur de mots Format 3/4.
///
/// Sans état : chaque appel ne dépend que de ses arguments, il peut donc être
/// partagé librement entre threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstructionDecoder;

impl InstructionDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Décode un mot HEX dans le contexte d'adressage donné
    pub fn decode(&self, hex_digits: &str, context: &AddressingContext) -> Result<DecodeResult, DecodeError> {
        let word = EncodedWord::parse_hex(hex_digits).map_err(|reason| DecodeError::InvalidInput {
            input: hex_digits.to_string(),
            reason,
        })?;

        let opcode = word.opcode();
        let flags = AddressingFlags::from_nixbpe(word.nixbpe());
        let displacement = Displacement::from_field(word.displacement_field());

        let mode = AddressingMode::from_flags(flags);
        let format = InstructionFormat::from_flags(flags);
        let kind = RelativeAddressingKind::from_flags(flags);

        let target_address = context
            .resolve(kind, displacement)
            .ok_or_else(|| DecodeError::MissingBaseRegister {
                input: hex_digits.to_string(),
            })?;

        Ok(DecodeResult {
            input: hex_digits.to_ascii_uppercase(),
            word,
            binary: word.to_binary_string(),
            opcode,
            opcode_binary: format!("{:06b}", opcode),
            opcode_hex: format!("{:02X}", opcode),
            flags,
            nixbpe: flags.to_binary_string(),
            displacement,
            displacement_binary: displacement.to_binary_string(),
            displacement_hex: displacement.to_hex_string(),
            mode,
            format,
            kind,
            context: *context,
            target_address,
        })
    }

    /// Décode plusieurs mots en parallèle; l'ordre des résultats suit l'entrée
    pub fn decode_batch<S>(&self, words: &[S], context: &AddressingContext) -> Vec<Result<DecodeResult, DecodeError>>
    where
        S: AsRef<str> + Sync,
    {
        log::debug!("Décodage par lot de {} mots (PC=0x{:06X})", words.len(), context.pc);

        let results: Vec<_> = words
            .par_iter()
            .map(|word| self.decode(word.as_ref(), context))
            .collect();

        let failures = results.iter().filter(|r| r.is_err()).count();
        if failures > 0 {
            log::warn!("{} mot(s) sur {} n'ont pas pu être décodés", failures, words.len());
        }

        results
    }
}

/// Décode un mot HEX avec un PC et un registre B optionnel
pub fn decode(hex_digits: &str, pc: u32, base_register: Option<u32>) -> Result<DecodeResult, DecodeError> {
    let context = AddressingContext { pc, base_register };
    InstructionDecoder::new().decode(hex_digits, &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::errors::InvalidInputReason;

    #[test]
    fn test_decode_reference_word() {
        let result = decode("032600", 0x1036, None).unwrap();

        assert_eq!(result.binary(), "000000110010011000000000");
        assert_eq!(result.opcode_hex(), "00");
        assert_eq!(result.opcode_binary(), "000000");
        assert_eq!(result.nixbpe(), "110010");
        assert_eq!(result.mode(), AddressingMode::Simple);
        assert_eq!(result.kind(), RelativeAddressingKind::PcRelative);
        assert_eq!(result.format(), InstructionFormat::Format3);
        assert_eq!(result.displacement_unsigned(), 1536);
        assert_eq!(result.displacement_signed(), 1536);
        assert_eq!(result.displacement_hex(), "600");
        assert_eq!(result.target_address(), 0x1636);
        assert_eq!(result.flag_description(), "SIC/XE, Simple, PC-relative, Format 3");
    }

    #[test]
    fn test_decode_normalizes_input_case() {
        let result = decode("4b2ffe", 0x2000, None).unwrap();
        assert_eq!(result.input(), "4B2FFE");
        assert_eq!(result.opcode_hex(), "12");
    }

    #[test]
    fn test_decode_invalid_input() {
        let err = decode("GG", 0x1000, None).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidInput {
                input: "GG".to_string(),
                reason: InvalidInputReason::NonHexDigit { character: 'G', position: 0 },
            }
        );
    }

    #[test]
    fn test_decode_missing_base() {
        // 034600: n=1 i=1 x=0 b=1 p=0 e=0
        let err = decode("034600", 0x1000, None).unwrap_err();
        assert_eq!(err, DecodeError::MissingBaseRegister { input: "034600".to_string() });

        let result = decode("034600", 0x1000, Some(0x0033)).unwrap();
        assert_eq!(result.kind(), RelativeAddressingKind::BaseRelative);
        assert_eq!(result.target_address(), 0x0633);
    }

    #[test]
    fn test_decode_batch_keeps_order() {
        let decoder = InstructionDecoder::new();
        let context = AddressingContext::new(0x1036);
        let results = decoder.decode_batch(&["032600", "GG", "000010"], &context);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().target_address(), 0x1636);
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().target_address(), 0x10);
    }
}
