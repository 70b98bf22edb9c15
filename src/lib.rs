// Library target for integration tests and criterion benchmarks.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can drive `muraja::quran::*` / `muraja::loader::*` with a fake transport.
// Most UI code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

rust_i18n::i18n!("locales", fallback = "en");

// Public: used directly by tests and benchmarks
pub mod engine;
pub mod loader;
pub mod locale;
pub mod quran;
pub mod session;

// Private: required transitively by loader/session
mod app;
mod config;
mod event;
mod ui;
