//! Digest pinning utility for Glucoscope model exports.
//!
//! Validates a tree ensemble export and writes its SHA-256 digest next to
//! it as `<model>.sha256`, in `sha256sum` format. Once the pin exists the
//! application refuses a model whose bytes no longer match.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin pin_model -- <model.json>
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use glucoscope::adapters::ensemble::{digest_path, sha256_hex};
use glucoscope::adapters::TreeEnsemble;

fn usage() -> String {
    "Usage: pin_model <model.json>".to_string()
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let Some(arg) = args.next() else {
        bail!(usage());
    };
    if arg == "-h" || arg == "--help" || args.next().is_some() {
        bail!(usage());
    }
    Ok(PathBuf::from(arg))
}

fn main() -> Result<()> {
    let model_path = parse_args()?;

    let bytes = fs::read(&model_path).with_context(|| format!("Failed to read {model_path:?}"))?;
    let json = std::str::from_utf8(&bytes).with_context(|| format!("{model_path:?} is not UTF-8"))?;

    // Never pin something the application would refuse to load.
    let model = TreeEnsemble::from_json_str(json)
        .with_context(|| format!("{model_path:?} is not a valid ensemble export"))?;

    let digest = sha256_hex(&bytes);
    let file_name = model_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let pin_path = digest_path(&model_path);
    fs::write(&pin_path, format!("{digest}  {file_name}\n"))
        .with_context(|| format!("Failed to write {pin_path:?}"))?;

    println!("Model: {model_path:?} ({} trees, {} features)", model.n_trees(), model.n_features());
    println!("Wrote digest pin: {pin_path:?}");
    println!("sha256={digest}");

    Ok(())
}
