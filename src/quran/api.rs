//! Upstream wire format: endpoint paths and the JSON bodies they return.
//!
//! The verses endpoint only carries Arabic text and the translations endpoint
//! only carries translated text, so a verse list is always the join of two
//! responses on `verse_key`.

use std::collections::HashMap;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::quran::error::{QuranError, Result};
use crate::quran::models::{ChapterInfo, ChapterListItem, Verse};

pub const DEFAULT_API_BASE: &str = "https://api.quran.com/api/v4";

/// Sahih International
pub const DEFAULT_TRANSLATION_ID: u32 = 20;

/// What a verse list is keyed by upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerseScope {
    Juz(u8),
    Chapter(u16),
}

impl VerseScope {
    fn query(self) -> String {
        match self {
            VerseScope::Juz(n) => format!("juz_number={n}"),
            VerseScope::Chapter(n) => format!("chapter_number={n}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Endpoints {
    base: String,
    translation_id: u32,
}

impl Endpoints {
    pub fn new(base: &str, translation_id: u32) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            translation_id,
        }
    }

    pub fn verses(&self, scope: VerseScope) -> String {
        format!("{}/quran/verses/uthmani?{}", self.base, scope.query())
    }

    pub fn translations(&self, scope: VerseScope) -> String {
        format!(
            "{}/quran/translations/{}?{}",
            self.base,
            self.translation_id,
            scope.query()
        )
    }

    pub fn chapters(&self) -> String {
        format!("{}/chapters", self.base)
    }

    pub fn chapter(&self, chapter: u16) -> String {
        format!("{}/chapters/{chapter}", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, DEFAULT_TRANSLATION_ID)
    }
}

#[derive(Debug, Deserialize)]
pub struct VersesResponse {
    pub verses: Vec<RawVerse>,
}

#[derive(Debug, Deserialize)]
pub struct RawVerse {
    pub id: u32,
    pub verse_key: String,
    pub text_uthmani: String,
}

#[derive(Debug, Deserialize)]
pub struct TranslationsResponse {
    pub translations: Vec<RawTranslation>,
}

#[derive(Debug, Deserialize)]
pub struct RawTranslation {
    pub resource_id: u32,
    pub text: String,
    #[serde(default)]
    pub verse_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChaptersResponse {
    pub chapters: Vec<ChapterListItem>,
}

#[derive(Debug, Deserialize)]
pub struct ChapterResponse {
    pub chapter: ChapterInfo,
}

pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| QuranError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Remove every `<...>` run. Text between tags is kept; a `<` that is never
/// closed is kept verbatim along with everything after it.
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Join Arabic text with translations on verse key, preserving the order of
/// the verses response. Missing translations become empty strings; the
/// Uthmani text is kept byte-for-byte as served.
pub fn merge_verses(verses: VersesResponse, translations: TranslationsResponse) -> Vec<Verse> {
    let mut by_key: HashMap<String, String> = HashMap::with_capacity(translations.translations.len());
    for t in translations.translations {
        let key = t.verse_key.unwrap_or_else(|| t.resource_id.to_string());
        by_key.insert(key, strip_html(&t.text));
    }

    verses
        .verses
        .into_iter()
        .map(|v| {
            let translation = by_key.remove(&v.verse_key).unwrap_or_default();
            Verse {
                id: v.id,
                verse_key: v.verse_key,
                text_uthmani: v.text_uthmani,
                translation,
            }
        })
        .collect()
}
