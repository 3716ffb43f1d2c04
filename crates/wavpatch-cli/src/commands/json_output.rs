//! JSON output types for the `--json` flag.

use serde::{Deserialize, Serialize};

use wavpatch::{EmitSummary, WavError, WavFormat};

/// Error codes for CLI operations.
///
/// Library failures pass through their own `WAV_xxx` codes.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Output file could not be created or synced
    pub const FILE_WRITE: &str = "CLI_002";
    /// Config file missing or malformed
    pub const CONFIG: &str = "CLI_003";
    /// Invalid command argument
    pub const INVALID_ARGUMENT: &str = "CLI_004";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "WAV_004")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File the error relates to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Attaches a file path.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Classifies an error chain, preferring a library code when one is present.
    pub fn from_anyhow(err: &anyhow::Error, fallback: &str) -> Self {
        let code = err
            .downcast_ref::<WavError>()
            .map(WavError::code)
            .unwrap_or(fallback);
        Self::new(code, format!("{:#}", err))
    }
}

/// Result whose error carries the CLI code for the stage that failed.
///
/// Library errors still report their own `WAV_xxx` code through
/// [`JsonError::from_anyhow`]; the stage code is the fallback.
pub type Staged<T> = Result<T, (anyhow::Error, &'static str)>;

/// Tags an error with the code of the stage that produced it.
pub trait Stage<T> {
    fn stage(self, code: &'static str) -> Staged<T>;
}

impl<T, E: Into<anyhow::Error>> Stage<T> for Result<T, E> {
    fn stage(self, code: &'static str) -> Staged<T> {
        self.map_err(|e| (e.into(), code))
    }
}

/// Output of `wrap` and `tone`.
#[derive(Debug, Clone, Serialize)]
pub struct WriteReport {
    pub success: bool,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<WavFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<EmitSummary>,
    /// BLAKE3 hash of the PCM payload (not the whole file)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<JsonError>,
}

impl WriteReport {
    pub fn success(output: &str, format: WavFormat, summary: EmitSummary, pcm: &[u8]) -> Self {
        Self {
            success: true,
            output: output.to_string(),
            format: Some(format),
            summary: Some(summary),
            pcm_hash: Some(blake3::hash(pcm).to_hex().to_string()),
            errors: Vec::new(),
        }
    }

    pub fn failure(output: &str, error: JsonError) -> Self {
        Self {
            success: false,
            output: output.to_string(),
            format: None,
            summary: None,
            pcm_hash: None,
            errors: vec![error],
        }
    }
}
