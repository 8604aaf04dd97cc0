//! HTTP Handlers

mod chat;
mod pages;
mod ping;
mod voice;

pub use chat::{ask_get, ask_post, stats};
pub use pages::index;
pub use ping::ping;
pub use voice::{text_to_speech, transcribe, voice_query};
