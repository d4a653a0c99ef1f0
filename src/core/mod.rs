// src/core/mod.rs

pub mod browser;
pub mod html;
pub mod net;
pub mod pace;
pub mod sanitize;
pub mod slug;

pub use browser::BrowserFetcher;
pub use net::{FetchError, HttpFetcher, PageFetcher};
pub use pace::Pacer;
