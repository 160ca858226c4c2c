pub mod chunk;
pub mod client;
pub mod error;
pub mod notifier;
pub mod types;

pub use chunk::{split_message, MAX_MESSAGE_CHARS};
pub use client::TelegramClient;
pub use error::TelegramError;
pub use notifier::Notifier;
