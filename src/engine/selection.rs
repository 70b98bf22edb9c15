use std::num::ParseIntError;

use rand::Rng;
use thiserror::Error;

use crate::quran::models::{Verse, VerseKey};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseVerseKeyError {
    #[error("verse key {0:?} is not of the form chapter:ayah")]
    Shape(String),
    #[error("verse key {key:?} has a non-numeric part")]
    Number {
        key: String,
        #[source]
        source: ParseIntError,
    },
}

/// Random start index leaving room for `hide_count` verses after it.
///
/// Draws uniformly from `0..=max(0, total - hide_count - 1)`. When the list is
/// too short to hide `hide_count` verses the start is 0 and fewer get hidden.
pub fn pick_start_index<R: Rng + ?Sized>(total_verses: usize, hide_count: usize, rng: &mut R) -> usize {
    let max_start = total_verses.saturating_sub(hide_count).saturating_sub(1);
    rng.gen_range(0..=max_start)
}

pub fn parse_verse_key(key: &str) -> Result<VerseKey, ParseVerseKeyError> {
    let (chapter, ayah) = key
        .split_once(':')
        .filter(|(_, ayah)| !ayah.contains(':'))
        .ok_or_else(|| ParseVerseKeyError::Shape(key.to_string()))?;
    let number = |part: &str| {
        part.trim().parse::<u16>().map_err(|source| ParseVerseKeyError::Number {
            key: key.to_string(),
            source,
        })
    };
    Ok(VerseKey {
        chapter: number(chapter)?,
        ayah: number(ayah)?,
    })
}

/// A starting verse and the verses hidden after it.
#[derive(Debug)]
pub struct Passage {
    pub start: Verse,
    pub hidden: Vec<Verse>,
}

/// Pick a random passage from `verses`, or `None` if the list is empty.
pub fn select_passage<R: Rng + ?Sized>(verses: &[Verse], hide_count: usize, rng: &mut R) -> Option<Passage> {
    if verses.is_empty() {
        return None;
    }
    let start_idx = pick_start_index(verses.len(), hide_count, rng);
    let hidden_end = (start_idx + 1).saturating_add(hide_count).min(verses.len());
    Some(Passage {
        start: verses[start_idx].clone(),
        hidden: verses[start_idx + 1..hidden_end].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn verses(n: u16) -> Vec<Verse> {
        (1..=n)
            .map(|a| Verse {
                id: u32::from(a),
                verse_key: format!("1:{a}"),
                text_uthmani: String::new(),
                translation: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_start_index_leaves_room_for_hidden() {
        let mut rng = SmallRng::seed_from_u64(7);
        for total in 1..60 {
            for hide in 0..total {
                for _ in 0..20 {
                    let i = pick_start_index(total, hide, &mut rng);
                    assert!(i + hide < total, "total={total} hide={hide} i={i}");
                }
            }
        }
    }

    #[test]
    fn test_start_index_zero_when_too_short() {
        let mut rng = SmallRng::seed_from_u64(7);
        for hide in 0..10 {
            for total in 0..=hide {
                assert_eq!(pick_start_index(total, hide, &mut rng), 0);
            }
        }
    }

    #[test]
    fn test_start_index_reaches_both_ends() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..500 {
            seen[pick_start_index(8, 5, &mut rng)] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_parse_verse_key() {
        assert_eq!(parse_verse_key("2:255"), Ok(VerseKey { chapter: 2, ayah: 255 }));
        assert_eq!(parse_verse_key("114:6"), Ok(VerseKey { chapter: 114, ayah: 6 }));
    }

    #[test]
    fn test_parse_verse_key_malformed() {
        assert!(matches!(parse_verse_key("2255"), Err(ParseVerseKeyError::Shape(_))));
        assert!(matches!(parse_verse_key("1:2:3"), Err(ParseVerseKeyError::Shape(_))));
        assert!(matches!(parse_verse_key("a:1"), Err(ParseVerseKeyError::Number { .. })));
        assert!(matches!(parse_verse_key("1:"), Err(ParseVerseKeyError::Number { .. })));
    }

    #[test]
    fn test_select_passage_hides_following_verses() {
        let mut rng = SmallRng::seed_from_u64(1);
        let list = verses(20);
        let passage = select_passage(&list, 5, &mut rng).unwrap();
        assert_eq!(passage.hidden.len(), 5);
        let start = parse_verse_key(&passage.start.verse_key).unwrap();
        let first_hidden = parse_verse_key(&passage.hidden[0].verse_key).unwrap();
        assert_eq!(first_hidden.ayah, start.ayah + 1);
    }

    #[test]
    fn test_select_passage_short_list_hides_fewer() {
        let mut rng = SmallRng::seed_from_u64(1);
        let list = verses(3);
        let passage = select_passage(&list, 5, &mut rng).unwrap();
        assert_eq!(passage.start.verse_key, "1:1");
        assert_eq!(passage.hidden.len(), 2);
        assert!(select_passage(&[], 5, &mut rng).is_none());
    }

    #[test]
    fn test_select_passage_huge_hide_count_takes_everything() {
        let mut rng = SmallRng::seed_from_u64(1);
        let list = verses(4);
        assert_eq!(pick_start_index(list.len(), usize::MAX, &mut rng), 0);
        let passage = select_passage(&list, usize::MAX, &mut rng).unwrap();
        assert_eq!(passage.start.verse_key, "1:1");
        assert_eq!(passage.hidden.len(), 3);
    }
}
