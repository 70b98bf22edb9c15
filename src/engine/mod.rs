pub mod selection;

pub use selection::{Passage, parse_verse_key, pick_start_index, select_passage};
