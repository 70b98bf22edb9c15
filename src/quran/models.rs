use std::fmt;

use serde::{Deserialize, Serialize};

pub const CHAPTER_COUNT: u16 = 114;
pub const JUZ_COUNT: u8 = 30;

/// Opening words each juz is conventionally known by.
const JUZ_NAMES: [&str; JUZ_COUNT as usize] = [
    "الم",
    "سَيَقُولُ",
    "تِلْكَ ٱلرُّسُلُ",
    "لَن تَنَالُوا",
    "وَٱلْمُحْصَنَاتُ",
    "لَا يُحِبُّ ٱللَّهُ",
    "وَإِذَا سَمِعُوا",
    "وَلَوْ أَنَّنَا",
    "قَالَ ٱلْمَلَأُ",
    "وَٱعْلَمُوا",
    "يَعْتَذِرُونَ",
    "وَمَا مِن دَابَّةٍ",
    "وَمَا أُبَرِّئُ",
    "رُبَمَا",
    "سُبْحَانَ ٱلَّذِي",
    "قَالَ أَلَمْ",
    "ٱقْتَرَبَ",
    "قَدْ أَفْلَحَ",
    "وَقَالَ ٱلَّذِينَ",
    "أَمَّنْ خَلَقَ",
    "اتْلُ مَا أُوحِيَ",
    "وَمَن يَقْنُتْ",
    "وَمَا لِيَ",
    "فَمَنْ أَظْلَمُ",
    "إِلَيْهِ يُرَدُّ",
    "حم",
    "قَالَ فَمَا خَطْبُكُمْ",
    "قَدْ سَمِعَ ٱللَّهُ",
    "تَبَارَكَ ٱلَّذِي",
    "عَمَّ",
];

/// Name of juz `n` (1-based), or `None` outside 1..=30.
pub fn juz_name(n: u8) -> Option<&'static str> {
    let idx = usize::from(n).checked_sub(1)?;
    JUZ_NAMES.get(idx).copied()
}

/// Parsed form of a verse key such as `"2:255"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerseKey {
    pub chapter: u16,
    pub ayah: u16,
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.ayah)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: u32,
    pub verse_key: String,
    pub text_uthmani: String,
    pub translation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub id: u16,
    pub name_arabic: String,
    pub name_simple: String,
    pub revelation_place: String,
    pub verses_count: u16,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterListItem {
    pub id: u16,
    pub name_arabic: String,
    pub name_simple: String,
    pub verses_count: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_juz_name_bounds() {
        assert_eq!(juz_name(0), None);
        assert_eq!(juz_name(1), Some("الم"));
        assert_eq!(juz_name(30), Some("عَمَّ"));
        assert_eq!(juz_name(31), None);
    }

    #[test]
    fn test_verse_key_display() {
        let key = VerseKey { chapter: 2, ayah: 255 };
        assert_eq!(key.to_string(), "2:255");
    }
}
