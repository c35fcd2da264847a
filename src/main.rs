use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};
use sicxe_decoder::*;
use std::env;

const USAGE: &str = "Usage: sicxe-decoder [--config FICHIER] [--pc HEX] [--base HEX] [--json] [--steps] [HEX...]";

/// Options de ligne de commande (prioritaires sur le fichier de configuration)
#[derive(Debug, Default)]
struct CliOptions {
    config_path: Option<String>,
    pc: Option<u32>,
    base_register: Option<u32>,
    json: bool,
    steps: bool,
    words: Vec<String>,
}

/// Adresse hexadécimale, préfixe `0x` facultatif, sans signe
fn parse_address(text: &str) -> Result<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        bail!("adresse invalide: '{}'", text);
    }
    u32::from_str_radix(digits, 16).with_context(|| format!("adresse invalide: '{}'", text))
}

fn parse_args(args: &[String]) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or_else(|| anyhow!("--config attend un chemin"))?;
                options.config_path = Some(path.clone());
            }
            "--pc" => {
                let value = iter.next().ok_or_else(|| anyhow!("--pc attend une adresse"))?;
                options.pc = Some(parse_address(value)?);
            }
            "--base" => {
                let value = iter.next().ok_or_else(|| anyhow!("--base attend une adresse"))?;
                options.base_register = Some(parse_address(value)?);
            }
            "--json" => options.json = true,
            "--steps" => options.steps = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("option inconnue: {}\n{}", flag, USAGE),
            word => options.words.push(word.to_string()),
        }
    }

    Ok(options)
}

/// Charge le fichier nommé par `--config`; une erreur de lecture est fatale
fn load_config(options: &CliOptions) -> Result<DecoderConfig> {
    match &options.config_path {
        Some(path) => DecoderConfig::load_from_file(path)
            .with_context(|| format!("configuration '{}'", path)),
        None => Ok(DecoderConfig::default()),
    }
}

/// Les options de ligne de commande remplacent les valeurs du fichier
fn apply_overrides(options: &CliOptions, config: &mut DecoderConfig) {
    if let Some(pc) = options.pc {
        config.context.pc = pc;
    }
    if let Some(base) = options.base_register {
        config.context.base_register = Some(base);
    }
    if options.json {
        config.output.format = OutputFormat::Json;
    }
    if options.steps {
        config.output.show_steps = true;
    }
}

/// Sorties d'une exécution
#[derive(Debug, Default)]
struct RenderedOutput {
    stdout: String,
    stderr: String,
    failures: usize,
}

/// Met en forme tous les résultats.
///
/// En JSON, stdout contient un unique tableau et le récit pas à pas part sur
/// stderr avec les erreurs.
fn render_results(
    results: &[std::result::Result<DecodeResult, DecodeError>],
    output: &OutputConfig,
) -> Result<RenderedOutput> {
    let mut rendered = RenderedOutput::default();
    let mut decoded = Vec::new();

    for result in results {
        match result {
            Ok(result) => {
                let steps = output.show_steps.then(|| render_steps(result));
                match output.format {
                    OutputFormat::Text => {
                        if let Some(steps) = steps {
                            rendered.stdout.push_str(&steps);
                        }
                        rendered.stdout.push_str(&render_summary(result));
                    }
                    OutputFormat::Json => {
                        if let Some(steps) = steps {
                            rendered.stderr.push_str(&steps);
                        }
                        decoded.push(result);
                    }
                }
            }
            Err(e) => {
                rendered.failures += 1;
                rendered.stderr.push_str(&render_error(e));
                rendered.stderr.push('\n');
            }
        }
    }

    if output.format == OutputFormat::Json {
        rendered.stdout.push_str(&render_json_batch(&decoded)?);
        rendered.stdout.push('\n');
    }

    Ok(rendered)
}

fn main() -> Result<()> {
    // Initialiser le logging
    env_logger::init();
    info!("SIC/XE Decoder v{}", VERSION);

    let args: Vec<String> = env::args().skip(1).collect();
    let options = parse_args(&args)?;
    debug!("Options: {:?}", options);

    let mut config = load_config(&options)?;
    apply_overrides(&options, &mut config);

    let words = if options.words.is_empty() {
        vec![DEFAULT_HEX_CODE.to_string()]
    } else {
        options.words
    };

    let decoder = InstructionDecoder::new();
    let results = decoder.decode_batch(words.as_slice(), &config.context);

    let rendered = render_results(&results, &config.output)?;
    eprint!("{}", rendered.stderr);
    print!("{}", rendered.stdout);

    if rendered.failures > 0 {
        bail!("{} mot(s) sur {} en erreur", rendered.failures, results.len());
    }

    Ok(())
}
