//! CLI parser
use crate::constants::DEFAULT_MODEL;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    /// Gemini API key. Optional here so a missing key can be reported as a
    /// verdict instead of a usage error. Env: GEMINI_API_KEY
    #[clap(env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Path to the receipt screenshot to verify.
    pub image_path: Option<PathBuf>,

    #[clap(long, help = "Enable debug logging", env = "RECEIPT_VERIFIER_DEBUG")]
    /// Enable debug logging. Env: RECEIPT_VERIFIER_DEBUG
    pub debug: bool,

    #[clap(long, short, default_value = DEFAULT_MODEL, env = "RECEIPT_VERIFIER_MODEL")]
    /// Gemini model used for the analysis, defaults to `gemini-1.5-flash`.
    /// Env: RECEIPT_VERIFIER_MODEL
    pub model: String,
}
