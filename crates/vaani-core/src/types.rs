//! Shared types for the vaani recitation companion.
//!
//! Used across vaani-lib, vaani-cli, and API consumers. Keeping them here
//! means consumers can depend on the wire shapes without pulling in tokio,
//! axum, or reqwest.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Scripture types ───────────────────────────────────────────────────────

/// One verse (shloka) with its transliteration and translations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verse {
    pub chapter: u32,
    pub verse: u32,
    /// Sanskrit text in Devanagari.
    pub slok: String,
    /// Scholarly IAST transliteration, as provided by the upstream source.
    pub transliteration: String,
    /// Hindi translation (Swami Ramsukhdas), when the source carries one.
    pub hindi_translation: Option<String>,
    /// English translation (Swami Gambirananda), when the source carries one.
    pub english_translation: Option<String>,
}

/// Summary information about a chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub chapter_number: u32,
    pub name: String,
    pub translation: String,
    pub verses_count: u32,
    /// Per-language chapter summaries ("hi", "en"), possibly empty.
    #[serde(default)]
    pub summary: HashMap<String, String>,
}

/// Chapter detail, optionally including every verse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterDetail {
    pub chapter_number: u32,
    pub name: String,
    pub translation: String,
    pub verses_count: u32,
    #[serde(default)]
    pub summary: HashMap<String, String>,
    #[serde(default)]
    pub verses: Vec<Verse>,
}

impl From<ChapterSummary> for ChapterDetail {
    fn from(s: ChapterSummary) -> Self {
        Self {
            chapter_number: s.chapter_number,
            name: s.name,
            translation: s.translation,
            verses_count: s.verses_count,
            summary: s.summary,
            verses: Vec::new(),
        }
    }
}

/// Verse count payload for a single chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersesCount {
    pub chapter: u32,
    pub verses_count: u32,
    pub chapter_name: String,
    pub chapter_translation: String,
}

/// The deterministic daily verse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerseOfTheDay {
    #[serde(flatten)]
    pub verse: Verse,
    pub verse_of_the_day: bool,
    /// Calendar date the selection was made for, `YYYY-MM-DD`.
    pub date: String,
}

// ─── TTS types ─────────────────────────────────────────────────────────────

/// Transliteration dry-run: what the synthesis engine would be fed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneticPreview {
    pub original: String,
    pub phonetic: String,
    /// Length of the phonetic string in characters.
    pub length: usize,
}

// ─── Configuration ─────────────────────────────────────────────────────────

/// Scripture source configuration.
#[derive(Debug, Clone)]
pub struct ScriptureConfig {
    /// Base URL of the Vedic Scriptures JSON source.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ScriptureConfig {
    fn default() -> Self {
        Self {
            base_url: "https://vedicscriptures.github.io".into(),
            timeout_secs: 30,
        }
    }
}

/// Speech-synthesis bridge configuration.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Base URL of the MMS synthesis bridge server.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            timeout_secs: 60,
        }
    }
}
