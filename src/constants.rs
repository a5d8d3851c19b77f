//! Central Configuration Constants
//!
//! Single source of truth for model discovery defaults.
//! To change where trained models are looked up, only edit this file.

use std::path::PathBuf;

/// Default models directory, relative to the working directory
pub const DEFAULT_MODELS_DIR: &str = "models";

/// Default EEG sampling rate in Hz (14-channel consumer headset default)
pub const DEFAULT_SAMPLING_RATE: u32 = 128;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "stress-core";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Resolve the models directory.
///
/// Precedence: `STRESS_MODELS_DIR` environment variable, then a local
/// `models/` directory, then the per-user data directory.
pub fn get_models_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("STRESS_MODELS_DIR") {
        return PathBuf::from(dir);
    }

    let local = PathBuf::from(DEFAULT_MODELS_DIR);
    if local.exists() {
        return local;
    }

    dirs::data_dir()
        .map(|d| d.join(APP_NAME).join(DEFAULT_MODELS_DIR))
        .unwrap_or(local)
}
