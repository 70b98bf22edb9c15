use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::quran::api::{
    self, ChapterResponse, ChaptersResponse, Endpoints, TranslationsResponse, VerseScope,
    VersesResponse,
};
use crate::quran::cache::VerseCache;
use crate::quran::error::{QuranError, Result};
use crate::quran::models::{CHAPTER_COUNT, ChapterInfo, ChapterListItem, Verse};
use crate::quran::transport::Transport;

/// Quran.com API client with per-key memoization.
///
/// Every successful fetch is cached for the lifetime of the client. Two calls
/// racing on the same uncached key both hit the network; the first result to
/// land is the one kept.
pub struct QuranClient<T: Transport> {
    transport: T,
    endpoints: Endpoints,
    cache: VerseCache,
}

impl<T: Transport> QuranClient<T> {
    pub fn new(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            cache: VerseCache::new(),
        }
    }

    pub fn cache(&self) -> &VerseCache {
        &self.cache
    }

    pub fn fetch_juz_verses(&self, juz: u8) -> Result<Arc<[Verse]>> {
        if let Some(hit) = self.cache.juz.get(&juz) {
            debug!(juz, "juz verses cache hit");
            return Ok(hit);
        }
        let verses = self.fetch_verses(VerseScope::Juz(juz))?;
        Ok(self.cache.juz.put(juz, verses.into()))
    }

    pub fn fetch_chapter_verses(&self, chapter: u16) -> Result<Arc<[Verse]>> {
        if let Some(hit) = self.cache.chapters.get(&chapter) {
            debug!(chapter, "chapter verses cache hit");
            return Ok(hit);
        }
        let verses = self.fetch_verses(VerseScope::Chapter(chapter))?;
        Ok(self.cache.chapters.put(chapter, verses.into()))
    }

    pub fn fetch_all_chapters(&self) -> Result<Arc<[ChapterListItem]>> {
        if let Some(hit) = self.cache.chapter_list.get(&()) {
            return Ok(hit);
        }
        let url = self.endpoints.chapters();
        let body = self.transport.get(&url)?;
        let parsed: ChaptersResponse = api::decode(&url, &body)?;
        debug!(count = parsed.chapters.len(), "fetched chapter list");
        Ok(self.cache.chapter_list.put((), parsed.chapters.into()))
    }

    pub fn fetch_chapter_info(&self, chapter: u16) -> Result<Arc<ChapterInfo>> {
        if let Some(hit) = self.cache.chapter_info.get(&chapter) {
            return Ok(hit);
        }
        let url = self.endpoints.chapter(chapter);
        let body = self.transport.get(&url)?;
        let parsed: ChapterResponse = api::decode(&url, &body)?;
        Ok(self.cache.chapter_info.put(chapter, Arc::new(parsed.chapter)))
    }

    /// Verses starting at `ayah` (1-based): the starting verse plus up to
    /// `count` after it. Runs on into the next chapter when this one is too
    /// short. After the last chapter the result is simply shorter.
    pub fn fetch_verses_from_ayah(&self, chapter: u16, ayah: u16, count: usize) -> Result<Vec<Verse>> {
        let verses = self.fetch_chapter_verses(chapter)?;
        let start = usize::from(ayah)
            .checked_sub(1)
            .filter(|&idx| idx < verses.len())
            .ok_or(QuranError::AyahOutOfRange { chapter, ayah })?;

        let wanted = count.saturating_add(1);
        let end = (start + wanted).min(verses.len());
        let mut result = verses[start..end].to_vec();

        if result.len() < wanted && chapter < CHAPTER_COUNT {
            let next = self.fetch_chapter_verses(chapter + 1)?;
            let needed = wanted - result.len();
            result.extend(next.iter().take(needed).cloned());
        }

        Ok(result)
    }

    fn fetch_verses(&self, scope: VerseScope) -> Result<Vec<Verse>> {
        let verses_url = self.endpoints.verses(scope);
        let translations_url = self.endpoints.translations(scope);

        let transport = &self.transport;
        let (verses_body, translations_body) = thread::scope(|s| {
            let translations = s.spawn(|| transport.get(&translations_url));
            let verses = transport.get(&verses_url);
            let translations = translations.join().unwrap_or_else(|_| {
                Err(QuranError::Network {
                    url: translations_url.clone(),
                    message: "request thread panicked".to_string(),
                })
            });
            (verses, translations)
        });

        let (verses_body, translations_body) = match (verses_body, translations_body) {
            (Ok(v), Ok(t)) => (v, t),
            (Err(e), _) | (_, Err(e)) => {
                warn!(?scope, error = %e, "verse fetch failed");
                return Err(e);
            }
        };

        let verses: VersesResponse = api::decode(&verses_url, &verses_body)?;
        let translations: TranslationsResponse = api::decode(&translations_url, &translations_body)?;
        let merged = api::merge_verses(verses, translations);
        debug!(?scope, count = merged.len(), "fetched verses");
        Ok(merged)
    }
}
