//! Demo configuration, parsed from TOML file + environment variable overrides.
//!
//! Priority: CLI flags > environment variables > config file > defaults.

use anyhow::{Context, Result};
use bgvp_core::{seed::parse_mnemonic, DerivableKey, MIN_SEED_LEN};
use serde::{Deserialize, Serialize};
use std::path::Path;
use zeroize::Zeroizing;

/// Top-level demo configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Output and logging settings
    #[serde(default)]
    pub demo: DemoSection,

    /// Where the root seed comes from
    #[serde(default)]
    pub root: RootSection,

    /// Label paths to derive and print
    #[serde(default = "default_paths")]
    pub paths: Vec<PathSection>,
}

/// Output and logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoSection {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print leaf seeds and symmetric keys alongside public keys
    #[serde(default)]
    pub show_secrets: bool,

    /// Emit JSON instead of text
    #[serde(default)]
    pub json: bool,

    /// Vote to encrypt under each leaf's symmetric key
    #[serde(default)]
    pub vote: Option<String>,
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            show_secrets: false,
            json: false,
            vote: None,
        }
    }
}

/// Root seed source. At most one of `mnemonic` / `seed_hex` may be set;
/// with neither, the all-zero demo seed is used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RootSection {
    /// BIP-39 mnemonic (English)
    pub mnemonic: Option<String>,

    /// Raw seed as hex (at least 64 bytes)
    pub seed_hex: Option<String>,

    /// BIP-39 passphrase, only used with `mnemonic`
    #[serde(default)]
    pub passphrase: String,
}

/// One derivation path, root first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSection {
    pub labels: Vec<String>,
}

// ============================================================================
// Default value functions
// ============================================================================

fn default_log_level() -> String {
    "info".to_string()
}

fn default_paths() -> Vec<PathSection> {
    vec![
        PathSection {
            labels: vec!["Bis_test_address1".into()],
        },
        PathSection {
            labels: vec![
                "Bis_test_address1".into(),
                "motion_1_txid_this_would_be_a_b64_encoded_string".into(),
            ],
        },
        PathSection {
            labels: vec!["Bis_test_address2".into()],
        },
    ]
}

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

// ============================================================================
// Loading & environment override
// ============================================================================

impl DemoConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: DemoConfig =
            toml::from_str(&contents).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self {
                paths: default_paths(),
                ..Self::default()
            }),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `BGVP_LOG_LEVEL`
    /// - `BGVP_SEED_HEX` (clears any configured mnemonic)
    /// - `BGVP_MNEMONIC` (clears any configured seed)
    /// - `BGVP_PASSPHRASE`
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("BGVP_LOG_LEVEL") {
            self.demo.log_level = v;
        }
        if let Some(v) = var("BGVP_SEED_HEX") {
            self.root.seed_hex = Some(v);
            self.root.mnemonic = None;
        }
        if let Some(v) = var("BGVP_MNEMONIC") {
            self.root.mnemonic = Some(v);
            self.root.seed_hex = None;
        }
        if let Some(v) = var("BGVP_PASSPHRASE") {
            self.root.passphrase = v;
        }
    }

    /// Validate that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            LOG_LEVELS.contains(&self.demo.log_level.to_ascii_lowercase().as_str()),
            "demo.log_level must be one of {:?}",
            LOG_LEVELS
        );

        anyhow::ensure!(
            !(self.root.mnemonic.is_some() && self.root.seed_hex.is_some()),
            "root.mnemonic and root.seed_hex are mutually exclusive"
        );

        anyhow::ensure!(!self.paths.is_empty(), "at least one [[paths]] entry is required");

        // Surface seed problems before anything is printed
        self.root_key().context("root seed is unusable")?;

        Ok(())
    }

    /// Whether the all-zero demo seed is in use
    pub fn uses_demo_seed(&self) -> bool {
        self.root.mnemonic.is_none() && self.root.seed_hex.is_none()
    }

    /// Build the root of the derivation tree.
    pub fn root_key(&self) -> Result<DerivableKey> {
        if let Some(ref words) = self.root.mnemonic {
            let mnemonic = parse_mnemonic(words)?;
            return Ok(bgvp_core::root_key(&mnemonic, &self.root.passphrase));
        }

        if let Some(ref seed_hex) = self.root.seed_hex {
            let seed = Zeroizing::new(
                hex::decode(seed_hex.trim()).context("root.seed_hex is not valid hex")?,
            );
            return Ok(DerivableKey::from_seed(&seed)?);
        }

        Ok(DerivableKey::from([0u8; MIN_SEED_LEN]))
    }
}

// ============================================================================
// Tests
// ============================================================================
