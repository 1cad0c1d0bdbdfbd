//! Video frame-rate probing.
//!
//! The ingestion workflow only needs one number out of the uploaded video:
//! its average frame rate. The probe is a trait so the workflow stays
//! testable without a codec toolchain on the machine; the production
//! implementation shells out to `ffprobe`.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::CoreError;

/// Error type for frame-rate probing.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The probing environment cannot handle this request at all: the
    /// ffprobe binary is missing or the blob has no usable video stream.
    #[error("probing unsupported: {0}")]
    Unsupported(String),

    #[error("probe I/O failure: {0}")]
    Io(String),
}

impl From<ProbeError> for CoreError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Unsupported(msg) => CoreError::Unsupported(msg),
            ProbeError::Io(msg) => CoreError::Io(msg),
        }
    }
}

/// Resolves the average frame rate of an uploaded video blob.
#[async_trait]
pub trait FrameRateProbe: Send + Sync {
    async fn frame_rate(&self, blob_ref: &str) -> Result<f64, ProbeError>;
}

// ---------------------------------------------------------------------------
// ffprobe implementation
// ---------------------------------------------------------------------------

/// Top-level ffprobe JSON output (`-print_format json -show_streams`).
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

/// A single stream from ffprobe output.
#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    /// e.g. "30/1" or "24000/1001"
    avg_frame_rate: Option<String>,
}

/// [`FrameRateProbe`] backed by the `ffprobe` binary.
#[derive(Debug, Default, Clone)]
pub struct FfprobeFrameRate;

#[async_trait]
impl FrameRateProbe for FfprobeFrameRate {
    async fn frame_rate(&self, blob_ref: &str) -> Result<f64, ProbeError> {
        let output = tokio::process::Command::new("ffprobe")
            .args(["-v", "quiet", "-print_format", "json", "-show_streams"])
            .arg(blob_ref)
            .output()
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => {
                    ProbeError::Unsupported("ffprobe binary not found".into())
                }
                _ => ProbeError::Io(err.to_string()),
            })?;

        if !output.status.success() {
            return Err(ProbeError::Io(format!(
                "ffprobe exited with {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let parsed: FfprobeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|err| ProbeError::Unsupported(format!("unreadable ffprobe output: {err}")))?;

        let stream = parsed
            .streams
            .iter()
            .find(|s| s.codec_type.as_deref() == Some("video"))
            .ok_or_else(|| ProbeError::Unsupported("no video stream in blob".into()))?;

        let rate = stream
            .avg_frame_rate
            .as_deref()
            .ok_or_else(|| ProbeError::Unsupported("video stream reports no frame rate".into()))?;

        parse_rational_fps(rate)
            .ok_or_else(|| ProbeError::Unsupported(format!("unparseable frame rate {rate:?}")))
    }
}

/// Parse an ffprobe frame-rate fraction ("30/1", "24000/1001") or a plain
/// decimal into frames per second. Returns `None` for a zero denominator or
/// a zero rate, which ffprobe emits for streams it cannot time.
fn parse_rational_fps(value: &str) -> Option<f64> {
    let fps = match value.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => value.trim().parse().ok()?,
    };
    (fps > 0.0).then_some(fps)
}

#[cfg(test)]
mod tests {
    use super::parse_rational_fps;

    #[test]
    fn parses_integer_fraction() {
        assert_eq!(parse_rational_fps("30/1"), Some(30.0));
    }

    #[test]
    fn parses_ntsc_fraction() {
        let fps = parse_rational_fps("24000/1001").unwrap();
        assert!((fps - 23.976).abs() < 0.001);
    }

    #[test]
    fn parses_plain_decimal() {
        assert_eq!(parse_rational_fps("25"), Some(25.0));
    }

    #[test]
    fn rejects_zero_denominator_and_zero_rate() {
        assert_eq!(parse_rational_fps("0/0"), None);
        assert_eq!(parse_rational_fps("0/1"), None);
        assert_eq!(parse_rational_fps("garbage"), None);
    }
}
