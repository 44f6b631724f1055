mod ids;
mod party_settings;
mod presence;
mod status_message;

pub use ids::*;
pub use party_settings::*;
pub use presence::*;
pub use status_message::*;
