pub mod chapter_panel;
pub mod menu;
pub mod practice_view;
pub mod progress_bar;
pub mod selector;
