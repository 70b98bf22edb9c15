use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::quran::models::{ChapterInfo, ChapterListItem, Verse};

/// Insert-only memo table. Values are shared, never evicted, and live as long
/// as the owning cache.
pub struct Memo<K, V: ?Sized> {
    entries: Mutex<HashMap<K, Arc<V>>>,
}

impl<K: Eq + Hash, V: ?Sized> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    // Every critical section is a single map operation; poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, HashMap<K, Arc<V>>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.lock().get(key).cloned()
    }

    /// Store `value` unless another caller got there first; either way the
    /// stored entry is returned.
    pub fn put(&self, key: K, value: Arc<V>) -> Arc<V> {
        self.lock().entry(key).or_insert(value).clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Eq + Hash, V: ?Sized> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
pub struct VerseCache {
    pub juz: Memo<u8, [Verse]>,
    pub chapters: Memo<u16, [Verse]>,
    pub chapter_info: Memo<u16, ChapterInfo>,
    pub chapter_list: Memo<(), [ChapterListItem]>,
}

impl VerseCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memo_get_missing() {
        let memo: Memo<u8, str> = Memo::new();
        assert!(memo.get(&1).is_none());
        assert!(memo.is_empty());
    }

    #[test]
    fn test_memo_first_put_wins() {
        let memo: Memo<u8, str> = Memo::new();
        let first: Arc<str> = Arc::from("first");
        let stored = memo.put(1, first.clone());
        assert!(Arc::ptr_eq(&stored, &first));

        let again = memo.put(1, Arc::from("second"));
        assert!(Arc::ptr_eq(&again, &first));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_memo_get_returns_shared_entry() {
        let memo: Memo<u16, [u32]> = Memo::new();
        let stored = memo.put(7, Arc::from(vec![1, 2, 3]));
        let got = memo.get(&7).unwrap();
        assert!(Arc::ptr_eq(&stored, &got));
    }
}
