//! Speech-synthesis client.
//!
//! The synthesis engine itself is an external collaborator: an MMS bridge
//! server that accepts a phonetic string and answers with a WAV waveform.
//! This module owns the one hop to it — transliterate the Devanagari
//! input, stream the audio response, repair and probe it. Model loading
//! and vocoding happen on the other side of the wire.

use std::fmt;
use std::time::Duration;

use futures_util::StreamExt;
use tracing::{debug, error, info};

use vaani_core::phonetics::transliterate;
use vaani_core::types::{PhoneticPreview, SynthConfig};
use vaani_core::wav::{duration_ms, probe_wav, repair_wav_sizes};

// ─── Errors ────────────────────────────────────────────────────────────────

/// Failure producing audio.
#[derive(Debug)]
pub enum SynthError {
    /// Input had no speakable content; refused before any network use.
    EmptyText,
    /// The synthesis server answered with a non-success status.
    Upstream(reqwest::StatusCode, String),
    /// The request never completed.
    Transport(String),
    /// The response was not a usable WAV buffer.
    BadAudio(&'static str),
}

impl SynthError {
    /// HTTP status this error should surface as.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::EmptyText => 400,
            Self::Upstream(status, _) => status.as_u16(),
            Self::Transport(_) => 503,
            Self::BadAudio(_) => 502,
        }
    }
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text cannot be empty"),
            Self::Upstream(status, body) => {
                write!(f, "synthesis server returned {status}: {body}")
            }
            Self::Transport(e) => write!(f, "synthesis server unavailable: {e}"),
            Self::BadAudio(e) => write!(f, "synthesis server sent unusable audio: {e}"),
        }
    }
}

// ─── Client ────────────────────────────────────────────────────────────────

/// Cloneable handle to the synthesis bridge.
#[derive(Clone)]
pub struct SynthClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl SynthClient {
    pub fn new(config: SynthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Transliteration dry-run: what [`synthesize`](Self::synthesize)
    /// would feed the engine for this text. No network.
    pub fn preview(&self, text: &str) -> PhoneticPreview {
        let phonetic = transliterate(text);
        PhoneticPreview {
            original: text.to_string(),
            length: phonetic.chars().count(),
            phonetic,
        }
    }

    /// Synthesize Devanagari text into a WAV buffer.
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SynthError> {
        if text.trim().is_empty() {
            return Err(SynthError::EmptyText);
        }

        let phonetic = transliterate(text);
        debug!(
            "synth: {} chars in, {} phonetic chars out",
            text.chars().count(),
            phonetic.chars().count()
        );

        let resp = self
            .client
            .get(format!("{}/tts", self.base_url))
            .query(&[("text", phonetic.as_str())])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SynthError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            error!("synth: upstream error {status}: {body}");
            return Err(SynthError::Upstream(status, body));
        }

        // Buffer the streamed response, then patch the sentinel sizes the
        // bridge leaves while streaming
        let mut wav: Vec<u8> = Vec::new();
        let mut stream = resp.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| SynthError::Transport(e.to_string()))?;
            wav.extend_from_slice(&chunk);
        }

        let wav = repair_wav_sizes(wav);
        let info = probe_wav(&wav).map_err(SynthError::BadAudio)?;
        info!(
            "synth: {} bytes, ~{} ms @ {} Hz",
            wav.len(),
            duration_ms(&info, wav.len()),
            info.sample_rate
        );

        Ok(wav)
    }

    /// Check whether the synthesis server is reachable.
    pub async fn health(&self) -> bool {
        self.client
            .get(format!("{}/health", self.base_url))
            .timeout(Duration::from_secs(1))
            .send()
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SynthClient {
        SynthClient::new(SynthConfig::default())
    }

    #[test]
    fn preview_matches_core_transliterator() {
        let p = client().preview("ॐ नमः शिवाय");
        assert_eq!(p.original, "ॐ नमः शिवाय");
        assert_eq!(p.phonetic, transliterate("ॐ नमः शिवाय"));
        assert_eq!(p.length, p.phonetic.chars().count());
    }

    #[tokio::test]
    async fn empty_text_refused_without_network() {
        // Config points at a default URL; no server is listening —
        // the refusal must happen before any request is attempted.
        let err = client().synthesize("   \n ").await.unwrap_err();
        assert!(matches!(err, SynthError::EmptyText));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn error_status_mapping() {
        assert_eq!(SynthError::EmptyText.http_status(), 400);
        assert_eq!(
            SynthError::Upstream(reqwest::StatusCode::NOT_IMPLEMENTED, String::new())
                .http_status(),
            501
        );
        assert_eq!(SynthError::Transport("refused".into()).http_status(), 503);
        assert_eq!(SynthError::BadAudio("not RIFF").http_status(), 502);
    }
}
