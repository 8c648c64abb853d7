pub mod app;
pub mod catalog;
pub mod error;
pub mod media;
pub mod session;
pub mod storage;
pub mod ui;

pub use error::{KaraokeError, Result};
