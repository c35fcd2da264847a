//! Présentation des résultats de décodage
//!
//! Ce module ne fait que mettre en forme un `DecodeResult` déjà calculé ; il
//! ne réalise aucune E/S.

use crate::cpu::{DecodeError, DecodeResult, RelativeAddressingKind};
use crate::ADDRESS_MASK;
use anyhow::Result;
use serde::Serialize;

const RULE: &str = "============================================================";
const BIT_RULER: &str = "012345678901234567890123";

/// Rend une adresse sur 6 chiffres hexadécimaux.
///
/// PC et B sont réduits à 24 bits comme les adresses cibles.
fn hex_address(value: u32) -> String {
    format!("0x{:06X}", value & ADDRESS_MASK)
}

/// Génère le tableau de résultat final
pub fn render_summary(result: &DecodeResult) -> String {
    let flags = result.flags();
    let mut report = String::new();

    report.push_str(RULE);
    report.push('\n');
    report.push_str("ANALYSE DU CODE MACHINE SIC/XE - RÉSULTAT\n");
    report.push_str(RULE);
    report.push('\n');

    report.push_str(&format!("Hex               : {}\n", result.input()));
    report.push_str(&format!("Binary            : {}\n", result.binary()));
    report.push_str(&format!(
        "Opcode            : {} (0x{})\n",
        result.opcode_binary(),
        result.opcode_hex()
    ));
    report.push_str(&format!(
        "nixbpe            : {} (n={} i={} x={} b={} p={} e={})\n",
        result.nixbpe(),
        flags.n(),
        flags.i(),
        flags.x(),
        flags.b(),
        flags.p(),
        flags.e()
    ));
    report.push_str(&format!("Flag bit          : {}\n", result.flag_description()));
    report.push_str(&format!(
        "disp/addr         : {} ({})\n",
        result.displacement_hex(),
        result.displacement_unsigned()
    ));
    report.push_str(&format!(
        "Target Address    = {} ({})\n",
        hex_address(result.target_address()),
        target_derivation(result)
    ));

    report
}

/// Formule ayant produit l'adresse cible
fn target_derivation(result: &DecodeResult) -> String {
    let context = result.context();
    match result.kind() {
        RelativeAddressingKind::PcRelative => format!(
            "PC: {} + ({})",
            hex_address(context.pc),
            result.displacement_signed()
        ),
        RelativeAddressingKind::BaseRelative => format!(
            "B: {} + 0x{}",
            hex_address(context.base_register.unwrap_or_default()),
            result.displacement_hex()
        ),
        RelativeAddressingKind::Direct => "adresse directe".to_string(),
    }
}

/// Génère le récit pas à pas du décodage
pub fn render_steps(result: &DecodeResult) -> String {
    let flags = result.flags();
    let binary = result.binary();
    let mut report = String::new();

    report.push_str(&format!("Analyse du code HEX '{}'\n", result.input()));
    report.push_str(RULE);
    report.push('\n');

    report.push_str("Étape 1 : conversion HEX vers binaire\n");
    report.push_str(&format!("   HEX d'entrée : {}\n", result.input()));
    report.push_str(&format!("   Décimal      : {}\n", result.word().value()));
    report.push_str(&format!("   Binaire 24 bits : {}\n\n", binary));

    report.push_str("Étape 2 : extraction de l'opcode (bits 0-5)\n");
    report.push_str(&format!("   Binaire      : {}\n", binary));
    report.push_str(&format!("   Position     : {}\n", BIT_RULER));
    report.push_str(&format!("   Zone opcode  : {}{}\n", &binary[..6], "*".repeat(18)));
    report.push_str(&format!(
        "   Opcode       : {} = 0x{}\n\n",
        result.opcode_binary(),
        result.opcode_hex()
    ));

    report.push_str("Étape 3 : flags nixbpe (bits 6-11)\n");
    report.push_str(&format!("   Zone nixbpe  : {}{}{}\n", "*".repeat(6), &binary[6..12], "*".repeat(12)));
    report.push_str(&format!(
        "   n={} (indirect), i={} (immédiat), x={} (indexé)\n",
        flags.n(),
        flags.i(),
        flags.x()
    ));
    report.push_str(&format!(
        "   b={} (base-relative), p={} (PC-relative), e={} (étendu)\n\n",
        flags.b(),
        flags.p(),
        flags.e()
    ));

    report.push_str("Étape 4 : mode d'adressage et format\n");
    report.push_str(&format!(
        "   n={}, i={} -> {}\n",
        flags.n(),
        flags.i(),
        result.mode()
    ));
    report.push_str(&format!(
        "   e={} -> {} ({} octets)\n",
        flags.e(),
        result.format(),
        result.format().length_bytes()
    ));
    report.push_str(&format!(
        "   b={}, p={} -> {}\n\n",
        flags.b(),
        flags.p(),
        result.kind()
    ));

    report.push_str("Étape 5 : champ displacement/address (bits 12-23)\n");
    report.push_str(&format!("   Zone disp    : {}{}\n", "*".repeat(12), &binary[12..]));
    report.push_str(&format!("   Binaire      : {}\n", result.displacement_binary()));
    report.push_str(&format!("   Décimal      : {}\n", result.displacement_unsigned()));
    report.push_str(&format!("   HEX          : {}\n\n", result.displacement_hex()));

    report.push_str("Étape 6 : calcul de l'adresse cible\n");
    let context = result.context();
    let disp = result.displacement_unsigned();
    match result.kind() {
        RelativeAddressingKind::PcRelative => {
            report.push_str(&format!("   PC           : {}\n", hex_address(context.pc)));
            report.push_str("   Formule      : TA = PC + displacement\n");
            if result.displacement().is_negative() {
                report.push_str(&format!(
                    "   {} >= 2048 -> complément à deux : {} - 4096 = {}\n",
                    disp,
                    disp,
                    result.displacement_signed()
                ));
            } else {
                report.push_str(&format!("   {} < 2048 -> displacement positif\n", disp));
            }
            report.push_str(&format!(
                "   Calcul       : {} + ({}) = {}\n",
                hex_address(context.pc),
                result.displacement_signed(),
                hex_address(result.target_address())
            ));
        }
        RelativeAddressingKind::BaseRelative => {
            let base = context.base_register.unwrap_or_default();
            report.push_str(&format!("   B            : {}\n", hex_address(base)));
            report.push_str("   Formule      : TA = B + displacement (non signé)\n");
            report.push_str(&format!(
                "   Calcul       : {} + {} = {}\n",
                hex_address(base),
                disp,
                hex_address(result.target_address())
            ));
        }
        RelativeAddressingKind::Direct => {
            report.push_str("   Formule      : TA = displacement (adresse absolue)\n");
            report.push_str(&format!(
                "   Adresse      : {}\n",
                hex_address(result.target_address())
            ));
        }
    }
    report.push('\n');

    report
}

/// Vue sérialisable d'un résultat
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    input: &'a str,
    binary: &'a str,
    opcode: u8,
    opcode_binary: &'a str,
    opcode_hex: &'a str,
    nixbpe: &'a str,
    flags: JsonFlags,
    flag_description: String,
    displacement: JsonDisplacement<'a>,
    addressing_mode: crate::cpu::AddressingMode,
    format: crate::cpu::InstructionFormat,
    relative_addressing: RelativeAddressingKind,
    pc: u32,
    base_register: Option<u32>,
    target_address: u32,
    target_address_hex: String,
}

#[derive(Debug, Serialize)]
struct JsonFlags {
    n: u8,
    i: u8,
    x: u8,
    b: u8,
    p: u8,
    e: u8,
}

#[derive(Debug, Serialize)]
struct JsonDisplacement<'a> {
    unsigned: u16,
    signed: i16,
    binary: &'a str,
    hex: &'a str,
}

fn json_report(result: &DecodeResult) -> JsonReport<'_> {
    let flags = result.flags();
    let context = result.context();
    JsonReport {
        input: result.input(),
        binary: result.binary(),
        opcode: result.opcode(),
        opcode_binary: result.opcode_binary(),
        opcode_hex: result.opcode_hex(),
        nixbpe: result.nixbpe(),
        flags: JsonFlags {
            n: flags.n(),
            i: flags.i(),
            x: flags.x(),
            b: flags.b(),
            p: flags.p(),
            e: flags.e(),
        },
        flag_description: result.flag_description(),
        displacement: JsonDisplacement {
            unsigned: result.displacement_unsigned(),
            signed: result.displacement_signed(),
            binary: result.displacement_binary(),
            hex: result.displacement_hex(),
        },
        addressing_mode: result.mode(),
        format: result.format(),
        relative_addressing: result.kind(),
        pc: context.pc,
        base_register: context.base_register,
        target_address: result.target_address(),
        target_address_hex: format!("{:06X}", result.target_address()),
    }
}

/// Sérialise le résultat complet en JSON
pub fn render_json(result: &DecodeResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&json_report(result))?)
}

/// Sérialise plusieurs résultats en un seul tableau JSON
pub fn render_json_batch(results: &[&DecodeResult]) -> Result<String> {
    let reports: Vec<JsonReport<'_>> = results.iter().map(|r| json_report(r)).collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}

/// Message d'erreur : type d'erreur et entrée fautive telle quelle
pub fn render_error(error: &DecodeError) -> String {
    format!("{} ['{}']: {}", error.kind(), error.input(), error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::decode;

    #[test]
    fn test_summary_contains_every_field() {
        let result = decode("032600", 0x1036, None).unwrap();
        let summary = render_summary(&result);

        assert!(summary.contains("Binary            : 000000110010011000000000"));
        assert!(summary.contains("Opcode            : 000000 (0x00)"));
        assert!(summary.contains("n=1 i=1 x=0 b=0 p=1 e=0"));
        assert!(summary.contains("SIC/XE, Simple, PC-relative, Format 3"));
        assert!(summary.contains("disp/addr         : 600 (1536)"));
        assert!(summary.contains("Target Address    = 0x001636 (PC: 0x001036 + (1536))"));
    }

    #[test]
    fn test_steps_explain_negative_displacement() {
        let result = decode("032FFF", 0x1036, None).unwrap();
        let steps = render_steps(&result);

        assert!(steps.contains("4095 >= 2048"));
        assert!(steps.contains("4095 - 4096 = -1"));
        assert!(steps.contains("= 0x001035"));
    }

    #[test]
    fn test_steps_base_relative() {
        let result = decode("034600", 0x1000, Some(0x2000)).unwrap();
        let steps = render_steps(&result);

        assert!(steps.contains("Base-relative"));
        assert!(steps.contains("0x002000 + 1536 = 0x002600"));
    }

    #[test]
    fn test_json_report() {
        let result = decode("032600", 0x1036, None).unwrap();
        let json = render_json(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["opcode_hex"], "00");
        assert_eq!(value["flags"]["p"], 1);
        assert_eq!(value["displacement"]["unsigned"], 1536);
        assert_eq!(value["addressing_mode"], "simple");
        assert_eq!(value["relative_addressing"], "pc_relative");
        assert_eq!(value["target_address"], 0x1636);
        assert_eq!(value["target_address_hex"], "001636");
        assert!(value["base_register"].is_null());
    }

    #[test]
    fn test_json_batch_is_one_array() {
        let first = decode("032600", 0x1036, None).unwrap();
        let second = decode("000010", 0x1036, None).unwrap();
        let json = render_json_batch(&[&first, &second]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["target_address"], 0x1636);
        assert_eq!(items[1]["target_address"], 0x10);
    }

    #[test]
    fn test_registers_above_24_bits_are_masked() {
        let result = decode("032600", 0x0100_1036, None).unwrap();
        assert_eq!(result.target_address(), 0x1636);

        let summary = render_summary(&result);
        assert!(summary.contains("(PC: 0x001036 + (1536))"));

        let result = decode("034600", 0, Some(0xFF00_2000)).unwrap();
        let steps = render_steps(&result);
        assert!(steps.contains("0x002000 + 1536 = 0x002600"));
    }

    #[test]
    fn test_render_error() {
        let err = decode("GG", 0, None).unwrap_err();
        let message = render_error(&err);
        assert!(message.starts_with("InvalidInput ['GG']"));
    }
}
