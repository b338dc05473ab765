//! BGVP Demo: prints values from a label-keyed derivation tree
//!
//! # Usage
//!
//! ```bash
//! bgvp-demo                                  # all-zero demo seed, default paths
//! bgvp-demo --config demo.toml --json
//! bgvp-demo --mnemonic "letter advice …" --label Bis_test_address1 --label motion_1
//! bgvp-demo --generate
//! ```

mod config;
mod report;

use anyhow::{Context, Result};
use bgvp_core::seed::{generate_mnemonic, WordCount};
use std::path::PathBuf;

use config::{DemoConfig, PathSection};

fn main() -> Result<()> {
    // Parse CLI args (minimal, no clap)
    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut seed_hex: Option<String> = None;
    let mut mnemonic: Option<String> = None;
    let mut passphrase: Option<String> = None;
    let mut labels: Vec<String> = Vec::new();
    let mut vote: Option<String> = None;
    let mut json = false;
    let mut show_secrets = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => config_path = Some(PathBuf::from(value(&args, &mut i)?)),
            "--seed-hex" => seed_hex = Some(value(&args, &mut i)?),
            "--mnemonic" => mnemonic = Some(value(&args, &mut i)?),
            "--passphrase" => passphrase = Some(value(&args, &mut i)?),
            "--label" | "-l" => labels.push(value(&args, &mut i)?),
            "--vote" => vote = Some(value(&args, &mut i)?),
            "--json" => json = true,
            "--show-secrets" => show_secrets = true,
            "--generate" => {
                let words = generate_mnemonic(WordCount::TwentyFour)?;
                println!("{}", words);
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("bgvp-demo {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            other => {
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    // Load config
    let mut demo_config = DemoConfig::load(config_path.as_deref()).with_context(|| match config_path {
        Some(ref p) => format!("Failed to load config from {}", p.display()),
        None => "Failed to build default config".to_string(),
    })?;

    // Apply env overrides, then CLI flags
    demo_config.apply_env_overrides();
    if let Some(v) = seed_hex {
        demo_config.root.seed_hex = Some(v);
        demo_config.root.mnemonic = None;
    }
    if let Some(v) = mnemonic {
        demo_config.root.mnemonic = Some(v);
        demo_config.root.seed_hex = None;
    }
    if let Some(v) = passphrase {
        demo_config.root.passphrase = v;
    }
    if !labels.is_empty() {
        demo_config.paths = vec![PathSection { labels }];
    }
    if vote.is_some() {
        demo_config.demo.vote = vote;
    }
    demo_config.demo.json |= json;
    demo_config.demo.show_secrets |= show_secrets;

    // Validate
    demo_config
        .validate()
        .context("Configuration validation failed")?;

    // Init logger
    env_logger::Builder::new()
        .parse_filters(&demo_config.demo.log_level)
        .init();

    if demo_config.uses_demo_seed() {
        log::warn!("No seed configured, using the all-zero demo seed. Do not use these keys.");
    }
    if demo_config.demo.show_secrets {
        log::warn!("Printing secret material (leaf seeds and AES keys) to stdout.");
    }

    let root = demo_config.root_key()?;
    log::info!("Deriving {} path(s)…", demo_config.paths.len());

    let reports = report::build_reports(&root, &demo_config)?;

    if demo_config.demo.json {
        println!("{}", report::render_json(&reports)?);
    } else {
        print!("{}", report::render_text(&reports));
    }

    log::info!("Done.");
    Ok(())
}

/// Take the value following the flag at `args[*i]`.
fn value(args: &[String], i: &mut usize) -> Result<String> {
    let flag = &args[*i];
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.clone()),
        None => anyhow::bail!("{} requires a value", flag),
    }
}

fn print_help() {
    println!(
        r#"BGVP Demo: print keys from a label-keyed derivation tree

USAGE:
    bgvp-demo [OPTIONS]

OPTIONS:
    -c, --config <PATH>     Config file path (optional; defaults used if absent)
    --seed-hex <HEX>        Root seed (at least 64 bytes of hex)
    --mnemonic <WORDS>      Root BIP-39 mnemonic
    --passphrase <TEXT>     BIP-39 passphrase (with --mnemonic)
    -l, --label <LABEL>     Append a label; all --label flags form one path
    --vote <TEXT>           Encrypt/decrypt a ballot under each leaf key
    --json                  Print JSON instead of text
    --show-secrets          Also print leaf seeds and AES keys
    --generate              Print a fresh 24-word mnemonic and exit
    -h, --help              Show this help message
    -V, --version           Show version

ENVIRONMENT VARIABLES (override config file):
    BGVP_SEED_HEX           Root seed as hex
    BGVP_MNEMONIC           Root mnemonic
    BGVP_PASSPHRASE         BIP-39 passphrase
    BGVP_LOG_LEVEL          Log level (error/warn/info/debug/trace)

EXAMPLES:
    # Golden vector: zero seed, one label
    bgvp-demo --seed-hex 00…00 --label Bis_test_address1

    # Address + motion key, sealed vote, JSON output
    bgvp-demo --config demo.toml --label Bis_test_address1 --label motion_1 --vote B --json
"#
    );
}
