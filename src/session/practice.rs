use crate::engine::selection::Passage;
use crate::quran::models::{ChapterInfo, Verse};

/// Where a practice passage was drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PracticeSource {
    Juz(u8),
    Surah(u16),
}

#[derive(Debug)]
pub struct PracticeSession {
    pub source: PracticeSource,
    pub start: Verse,
    pub hidden: Vec<Verse>,
    pub revealed: usize,
    /// Filled in after the passage is shown; the badge is optional.
    pub chapter: Option<ChapterInfo>,
}

impl PracticeSession {
    pub fn new(source: PracticeSource, passage: Passage) -> Self {
        Self {
            source,
            start: passage.start,
            hidden: passage.hidden,
            revealed: 0,
            chapter: None,
        }
    }

    pub fn reveal_next(&mut self) {
        if self.revealed < self.hidden.len() {
            self.revealed += 1;
        }
    }

    pub fn reveal_all(&mut self) {
        self.revealed = self.hidden.len();
    }

    pub fn is_complete(&self) -> bool {
        self.revealed >= self.hidden.len()
    }

    pub fn is_revealed(&self, idx: usize) -> bool {
        idx < self.revealed
    }

    pub fn is_next(&self, idx: usize) -> bool {
        idx == self.revealed && idx < self.hidden.len()
    }

    pub fn progress(&self) -> f64 {
        if self.hidden.is_empty() {
            return 1.0;
        }
        self.revealed as f64 / self.hidden.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(key: &str) -> Verse {
        Verse {
            id: 0,
            verse_key: key.to_string(),
            text_uthmani: String::new(),
            translation: String::new(),
        }
    }

    fn session(hidden: usize) -> PracticeSession {
        let passage = Passage {
            start: verse("1:1"),
            hidden: (2..2 + hidden).map(|a| verse(&format!("1:{a}"))).collect(),
        };
        PracticeSession::new(PracticeSource::Surah(1), passage)
    }

    #[test]
    fn test_new_session() {
        let s = session(5);
        assert_eq!(s.revealed, 0);
        assert!(!s.is_complete());
        assert!(s.is_next(0));
        assert!(!s.is_revealed(0));
        assert_eq!(s.progress(), 0.0);
    }

    #[test]
    fn test_reveal_next_one_at_a_time() {
        let mut s = session(3);
        s.reveal_next();
        assert!(s.is_revealed(0));
        assert!(s.is_next(1));
        s.reveal_next();
        s.reveal_next();
        assert!(s.is_complete());
        s.reveal_next();
        assert_eq!(s.revealed, 3);
        assert!(!s.is_next(3));
    }

    #[test]
    fn test_reveal_all() {
        let mut s = session(5);
        s.reveal_next();
        s.reveal_all();
        assert!(s.is_complete());
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn test_nothing_hidden_is_complete() {
        let s = session(0);
        assert!(s.is_complete());
        assert_eq!(s.progress(), 1.0);
        assert!(!s.is_next(0));
    }
}
