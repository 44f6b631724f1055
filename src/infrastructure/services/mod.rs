mod chat_client;
mod discord_client;

pub use chat_client::*;
pub use discord_client::*;
