//! Tests d'intégration pour le décodeur SIC/XE

use sicxe_decoder::*;
use tempfile::TempDir;

/// Test de sérialisation de configuration
#[test]
fn test_config_serialization() {
    let mut config = config::DecoderConfig::default();
    config.context = AddressingContext::new(0x1036).with_base(0x3000);
    config.output.show_steps = true;

    // Test de sérialisation TOML
    let toml_string = toml::to_string(&config).unwrap();
    assert!(toml_string.contains("pc"));
    assert!(toml_string.contains("base_register"));

    // Test de désérialisation
    let deserialized: config::DecoderConfig = toml::from_str(&toml_string).unwrap();
    assert_eq!(deserialized, config);
}

/// Test de sauvegarde et rechargement sur disque
#[test]
fn test_config_file_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("decoder.toml");
    let path = path.to_str().unwrap();

    let mut config = DecoderConfig::default();
    config.output.format = OutputFormat::Json;
    config.save_to_file(path).unwrap();

    let loaded = DecoderConfig::load_from_file(path).unwrap();
    assert_eq!(loaded.output.format, OutputFormat::Json);
    assert_eq!(loaded.context.pc, 0x1000);
}

/// Un fichier absent ou invalide retombe sur les valeurs par défaut
#[test]
fn test_config_load_or_default() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");
    assert_eq!(
        DecoderConfig::load_or_default(missing.to_str().unwrap()),
        DecoderConfig::default()
    );

    let broken = temp_dir.path().join("broken.toml");
    std::fs::write(&broken, "context = 42").unwrap();
    assert!(DecoderConfig::load_from_file(broken.to_str().unwrap()).is_err());
    assert_eq!(
        DecoderConfig::load_or_default(broken.to_str().unwrap()),
        DecoderConfig::default()
    );
}

/// Chaîne complète : configuration -> décodage -> présentation
#[test]
fn test_config_driven_decoding() {
    let config: DecoderConfig = toml::from_str(
        r#"
        [context]
        pc = 0x1036
        "#,
    )
    .unwrap();

    let decoder = InstructionDecoder::new();
    let result = decoder.decode(DEFAULT_HEX_CODE, &config.context).unwrap();

    let summary = render_summary(&result);
    assert!(summary.contains("Hex               : 032600"));
    assert!(summary.contains("Target Address    = 0x001636"));

    let steps = render_steps(&result);
    assert!(steps.contains("Étape 1"));
    assert!(steps.contains("Étape 6"));
    assert!(steps.contains("1536 < 2048"));
}

/// Les erreurs sont rendues avec leur type et l'entrée fautive
#[test]
fn test_error_presentation() {
    let decoder = InstructionDecoder::new();
    let context = AddressingContext::default();

    let results = decoder.decode_batch(&["034600", "GG"], &context);
    let messages: Vec<String> = results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .map(render_error)
        .collect();

    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("MissingBaseRegister ['034600']"));
    assert!(messages[1].starts_with("InvalidInput ['GG']"));
}
