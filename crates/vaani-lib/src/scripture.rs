//! Client for the Vedic Scriptures JSON source.
//!
//! A read-only GitHub Pages API keyed by chapter/verse. Verse payloads
//! carry the Sanskrit text plus one nested block per commentary author;
//! this client flattens them into the [`Verse`] shape the API serves.
//! Requests for a whole chapter's verses fan out concurrently.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use futures_util::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

use vaani_core::canon;
use vaani_core::types::{
    ChapterDetail, ChapterSummary, ScriptureConfig, Verse, VerseOfTheDay, VersesCount,
};

// ─── Errors ────────────────────────────────────────────────────────────────

/// Failure talking to the scripture source.
#[derive(Debug)]
pub enum ScriptureError {
    /// Upstream answered with a non-success status.
    Status(reqwest::StatusCode),
    /// The request never completed (connect failure, timeout).
    Transport(String),
    /// The response body was not the JSON shape we expect.
    Decode(String),
    /// Chapter or verse number outside the canon — rejected locally.
    OutOfRange(String),
}

impl ScriptureError {
    /// HTTP status this error should surface as.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Status(status) => status.as_u16(),
            Self::Transport(_) => 503,
            Self::Decode(_) => 502,
            Self::OutOfRange(_) => 404,
        }
    }
}

impl fmt::Display for ScriptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "scripture source returned {status}"),
            Self::Transport(e) => write!(f, "scripture source unavailable: {e}"),
            Self::Decode(e) => write!(f, "unexpected scripture payload: {e}"),
            Self::OutOfRange(e) => write!(f, "{e}"),
        }
    }
}

// ─── Upstream payload shapes ───────────────────────────────────────────────

/// One commentary author's block inside a verse payload.
#[derive(Deserialize)]
struct AuthorBlock {
    /// Hindi translation text.
    ht: Option<String>,
    /// English translation text.
    et: Option<String>,
}

#[derive(Deserialize)]
struct RawSlok {
    slok: String,
    #[serde(default)]
    transliteration: String,
    /// Swami Ramsukhdas — Hindi.
    rams: Option<AuthorBlock>,
    /// Swami Gambirananda — English.
    gambir: Option<AuthorBlock>,
}

impl RawSlok {
    fn into_verse(self, chapter: u32, verse: u32) -> Verse {
        Verse {
            chapter,
            verse,
            slok: self.slok,
            transliteration: self.transliteration,
            hindi_translation: self.rams.and_then(|a| a.ht),
            english_translation: self.gambir.and_then(|a| a.et),
        }
    }
}

#[derive(Deserialize)]
struct RawChapter {
    #[serde(default)]
    name: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    verses_count: u32,
    #[serde(default)]
    summary: HashMap<String, String>,
}

// ─── Client ────────────────────────────────────────────────────────────────

/// Cloneable scripture client. Holds one shared connection pool.
#[derive(Clone)]
pub struct ScriptureClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ScriptureClient {
    pub fn new(config: ScriptureConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, ScriptureError> {
        // GitHub Pages requires the trailing slash
        let url = format!("{}{}/", self.base_url, endpoint);
        debug!("scripture: GET {url}");

        let resp = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ScriptureError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ScriptureError::Status(resp.status()));
        }

        resp.json::<T>()
            .await
            .map_err(|e| ScriptureError::Decode(e.to_string()))
    }

    fn ensure_chapter(chapter: u32) -> Result<(), ScriptureError> {
        if canon::verse_count(chapter).is_none() {
            return Err(ScriptureError::OutOfRange(format!(
                "chapter {chapter} is outside 1-{}",
                canon::CHAPTER_COUNT
            )));
        }
        Ok(())
    }

    /// Fetch a single verse.
    pub async fn verse(&self, chapter: u32, verse: u32) -> Result<Verse, ScriptureError> {
        Self::ensure_chapter(chapter)?;
        if verse == 0 {
            return Err(ScriptureError::OutOfRange(
                "verse numbers start at 1".into(),
            ));
        }

        let raw: RawSlok = self.fetch_json(&format!("/slok/{chapter}/{verse}")).await?;
        Ok(raw.into_verse(chapter, verse))
    }

    /// Fetch summary information for one chapter.
    pub async fn chapter(&self, chapter: u32) -> Result<ChapterSummary, ScriptureError> {
        Self::ensure_chapter(chapter)?;

        let raw: RawChapter = self.fetch_json(&format!("/chapter/{chapter}")).await?;
        Ok(ChapterSummary {
            chapter_number: chapter,
            name: raw.name,
            translation: raw.translation,
            verses_count: raw.verses_count,
            summary: raw.summary,
        })
    }

    /// Fetch all chapter summaries, concurrently. Chapters that fail to
    /// load are dropped from the result.
    pub async fn all_chapters(&self) -> Vec<ChapterSummary> {
        let fetches = (1..=canon::CHAPTER_COUNT).map(|ch| self.chapter(ch));
        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(summary) => Some(summary),
                Err(e) => {
                    warn!("scripture: dropping failed chapter fetch: {e}");
                    None
                }
            })
            .collect()
    }

    /// Fetch a chapter with every one of its verses, concurrently.
    /// Verses that fail to load are dropped; the rest keep canon order.
    pub async fn chapter_with_verses(
        &self,
        chapter: u32,
    ) -> Result<ChapterDetail, ScriptureError> {
        let summary = self.chapter(chapter).await?;

        let fetches = (1..=summary.verses_count).map(|v| self.verse(chapter, v));
        let verses = join_all(fetches)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(verse) => Some(verse),
                Err(e) => {
                    warn!("scripture: dropping failed verse fetch: {e}");
                    None
                }
            })
            .collect();

        let mut detail = ChapterDetail::from(summary);
        detail.verses = verses;
        Ok(detail)
    }

    /// Verse count payload for one chapter.
    pub async fn verses_count(&self, chapter: u32) -> Result<VersesCount, ScriptureError> {
        let summary = self.chapter(chapter).await?;
        Ok(VersesCount {
            chapter,
            verses_count: summary.verses_count,
            chapter_name: summary.name,
            chapter_translation: summary.translation,
        })
    }

    /// The verse of the day, selected deterministically from today's date.
    pub async fn verse_of_the_day(&self) -> Result<VerseOfTheDay, ScriptureError> {
        self.verse_of_the_day_for(time::OffsetDateTime::now_utc().date())
            .await
    }

    /// Verse-of-the-day for an explicit date.
    pub async fn verse_of_the_day_for(
        &self,
        date: time::Date,
    ) -> Result<VerseOfTheDay, ScriptureError> {
        let (chapter, verse) = canon::verse_for_day(date.ordinal() as u32);
        let verse = self.verse(chapter, verse).await?;

        Ok(VerseOfTheDay {
            verse,
            verse_of_the_day: true,
            date: format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slok_payload_flattens_to_verse() {
        let raw: RawSlok = serde_json::from_str(
            r#"{
                "slok": "धृतराष्ट्र उवाच",
                "transliteration": "dhṛtarāṣṭra uvāca",
                "rams": { "ht": "धृतराष्ट्र बोले" },
                "gambir": { "et": "Dhritarashtra said" }
            }"#,
        )
        .unwrap();

        let verse = raw.into_verse(1, 1);
        assert_eq!(verse.chapter, 1);
        assert_eq!(verse.slok, "धृतराष्ट्र उवाच");
        assert_eq!(verse.hindi_translation.as_deref(), Some("धृतराष्ट्र बोले"));
        assert_eq!(verse.english_translation.as_deref(), Some("Dhritarashtra said"));
    }

    #[test]
    fn missing_author_blocks_become_none() {
        let raw: RawSlok =
            serde_json::from_str(r#"{ "slok": "ॐ", "transliteration": "om" }"#).unwrap();
        let verse = raw.into_verse(2, 47);
        assert!(verse.hindi_translation.is_none());
        assert!(verse.english_translation.is_none());
    }

    #[test]
    fn author_block_with_wrong_field_becomes_none() {
        // rams carries Hindi under "ht"; a block without it yields None
        let raw: RawSlok = serde_json::from_str(
            r#"{ "slok": "x", "transliteration": "x", "rams": { "et": "wrong slot" } }"#,
        )
        .unwrap();
        assert!(raw.into_verse(1, 1).hindi_translation.is_none());
    }

    #[test]
    fn chapter_payload_defaults() {
        let raw: RawChapter = serde_json::from_str(r#"{ "name": "अर्जुन विषाद योग" }"#).unwrap();
        assert_eq!(raw.name, "अर्जुन विषाद योग");
        assert_eq!(raw.verses_count, 0);
        assert!(raw.summary.is_empty());
    }

    #[test]
    fn out_of_range_chapter_is_rejected_locally() {
        assert!(ScriptureClient::ensure_chapter(0).is_err());
        assert!(ScriptureClient::ensure_chapter(19).is_err());
        assert!(ScriptureClient::ensure_chapter(18).is_ok());
    }

    #[test]
    fn error_status_mapping() {
        assert_eq!(
            ScriptureError::Status(reqwest::StatusCode::NOT_FOUND).http_status(),
            404
        );
        assert_eq!(ScriptureError::Transport("refused".into()).http_status(), 503);
        assert_eq!(ScriptureError::Decode("bad json".into()).http_status(), 502);
        assert_eq!(ScriptureError::OutOfRange("chapter 99".into()).http_status(), 404);
    }
}
