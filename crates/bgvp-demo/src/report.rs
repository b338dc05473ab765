//! Derive each configured path and collect what gets printed.

use anyhow::{Context, Result};
use bgvp_core::{decrypt_ballot, encrypt_ballot, DerivableKey};
use serde::Serialize;
use std::fmt::Write;

use crate::config::DemoConfig;

/// Everything printed for one derivation path
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub path: Vec<String>,
    pub public_key: String,
    pub public_key_uncompressed: String,

    /// Only with `show_secrets`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symmetric_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ballot: Option<BallotReport>,
}

/// A vote sealed under the leaf key, then opened again
#[derive(Debug, Clone, Serialize)]
pub struct BallotReport {
    pub vote: String,
    pub ciphertext: String,
    pub roundtrip_ok: bool,
}

/// Derive every path in `config` from `root`.
pub fn build_reports(root: &DerivableKey, config: &DemoConfig) -> Result<Vec<PathReport>> {
    config
        .paths
        .iter()
        .map(|p| build_report(root, &p.labels, config))
        .collect()
}

fn build_report(root: &DerivableKey, labels: &[String], config: &DemoConfig) -> Result<PathReport> {
    let display = display_path(labels);
    let leaf = root
        .derive_path(labels)
        .with_context(|| format!("Failed to derive {}", display))?;

    let public_key = leaf
        .to_public_key()
        .with_context(|| format!("No public key for {}", display))?;
    let public_key_uncompressed = leaf.to_public_key_uncompressed()?;
    log::debug!("Derived {} -> {}", display, hex::encode(public_key));

    let symmetric = leaf.to_symmetric_key()?;

    let ballot = match config.demo.vote {
        Some(ref vote) => {
            let sealed = encrypt_ballot(&symmetric, vote)
                .with_context(|| format!("Failed to encrypt ballot for {}", display))?;
            let opened = decrypt_ballot(&symmetric, &sealed)
                .with_context(|| format!("Failed to decrypt ballot for {}", display))?;
            Some(BallotReport {
                vote: vote.clone(),
                ciphertext: hex::encode(sealed.to_bytes()),
                roundtrip_ok: opened == *vote,
            })
        }
        None => None,
    };

    let (seed, symmetric_key) = if config.demo.show_secrets {
        (
            Some(hex::encode(leaf.seed())),
            Some(hex::encode(symmetric.as_bytes())),
        )
    } else {
        (None, None)
    };

    Ok(PathReport {
        path: labels.to_vec(),
        public_key: hex::encode(public_key),
        public_key_uncompressed: hex::encode(public_key_uncompressed),
        seed,
        symmetric_key,
        ballot,
    })
}

/// `root / "a" / "b"`; labels are quoted so the empty label stays visible.
pub fn display_path(labels: &[String]) -> String {
    let mut out = String::from("root");
    for label in labels {
        let _ = write!(out, " / {:?}", label);
    }
    out
}

pub fn render_text(reports: &[PathReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "{}", display_path(&report.path));
        let _ = writeln!(out, "  Pubkey:        {}", report.public_key);
        let _ = writeln!(out, "  Pubkey (full): {}", report.public_key_uncompressed);
        if let Some(ref seed) = report.seed {
            let _ = writeln!(out, "  Seed:          {}", seed);
        }
        if let Some(ref key) = report.symmetric_key {
            let _ = writeln!(out, "  AES key:       {}", key);
        }
        if let Some(ref ballot) = report.ballot {
            let _ = writeln!(
                out,
                "  Ballot:        {} ({:?}, roundtrip {})",
                ballot.ciphertext,
                ballot.vote,
                if ballot.roundtrip_ok { "ok" } else { "FAILED" }
            );
        }
        out.push('\n');
    }
    out
}

pub fn render_json(reports: &[PathReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("Failed to serialize report")
}
