//! UI layer for the desktop GUI: app shell and portrait rendering.

pub mod app;

pub use app::RandomPersonApp;
