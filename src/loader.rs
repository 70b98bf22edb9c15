//! Background worker that runs network loads off the UI thread.
//!
//! Requests go in over one channel; outcomes come back as [`AppEvent::Loaded`]
//! on the event channel, so the render loop never blocks on the network.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};

use crate::engine::selection::{parse_verse_key, select_passage};
use crate::event::AppEvent;
use crate::quran::client::QuranClient;
use crate::quran::error::QuranError;
use crate::quran::models::ChapterListItem;
use crate::quran::transport::Transport;
use crate::session::practice::{PracticeSession, PracticeSource};

pub enum LoadRequest {
    /// Draw a new passage. `seq` is echoed back so superseded loads can be
    /// dropped by the receiver.
    Passage {
        seq: u64,
        source: PracticeSource,
        hide_count: usize,
    },
    ChapterList,
}

pub enum LoadOutcome {
    Passage {
        seq: u64,
        result: Result<Option<PracticeSession>, QuranError>,
    },
    ChapterList(Result<Arc<[ChapterListItem]>, QuranError>),
}

pub struct Loader {
    tx: mpsc::Sender<LoadRequest>,
}

impl Loader {
    pub fn spawn<T>(client: Arc<QuranClient<T>>, events: mpsc::Sender<AppEvent>) -> Self
    where
        T: Transport + 'static,
    {
        let (tx, rx) = mpsc::channel::<LoadRequest>();

        thread::spawn(move || {
            let mut rng = SmallRng::from_entropy();
            for request in rx {
                let outcome = match request {
                    LoadRequest::Passage {
                        seq,
                        source,
                        hide_count,
                    } => LoadOutcome::Passage {
                        seq,
                        result: generate(&client, source, hide_count, &mut rng),
                    },
                    LoadRequest::ChapterList => LoadOutcome::ChapterList(client.fetch_all_chapters()),
                };
                if events.send(AppEvent::Loaded(outcome)).is_err() {
                    return;
                }
            }
        });

        Self { tx }
    }

    #[cfg(test)]
    pub(crate) fn from_sender(tx: mpsc::Sender<LoadRequest>) -> Self {
        Self { tx }
    }

    /// Queue a load. Returns false once the worker has gone away.
    pub fn request(&self, request: LoadRequest) -> bool {
        self.tx.send(request).is_ok()
    }
}

/// Fetch the source's verses, draw a passage and attach the chapter badge.
///
/// `Ok(None)` means the source came back with no verses. A failed badge
/// lookup is logged and leaves `chapter` empty; the passage is still usable.
pub fn generate<T, R>(
    client: &QuranClient<T>,
    source: PracticeSource,
    hide_count: usize,
    rng: &mut R,
) -> Result<Option<PracticeSession>, QuranError>
where
    T: Transport,
    R: Rng + ?Sized,
{
    let verses = match source {
        PracticeSource::Juz(juz) => client.fetch_juz_verses(juz)?,
        PracticeSource::Surah(chapter) => client.fetch_chapter_verses(chapter)?,
    };
    let Some(passage) = select_passage(&verses, hide_count, rng) else {
        warn!(?source, "source returned no verses");
        return Ok(None);
    };
    info!(?source, start = %passage.start.verse_key, hidden = passage.hidden.len(), "new passage");

    let chapter = match source {
        PracticeSource::Surah(chapter) => Some(chapter),
        PracticeSource::Juz(_) => match parse_verse_key(&passage.start.verse_key) {
            Ok(key) => Some(key.chapter),
            Err(e) => {
                warn!(error = %e, "cannot resolve chapter for badge");
                None
            }
        },
    };

    let mut session = PracticeSession::new(source, passage);
    if let Some(chapter) = chapter {
        match client.fetch_chapter_info(chapter) {
            Ok(info) => session.chapter = Some((*info).clone()),
            Err(e) => warn!(chapter, error = %e, "chapter info unavailable"),
        }
    }
    Ok(Some(session))
}
