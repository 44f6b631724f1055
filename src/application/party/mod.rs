mod adjust_party;
mod create_party;
mod handle_presence;
mod join_party;
mod kick_player;
mod leave_party;
mod list_parties;
mod remove_party;

pub use adjust_party::*;
pub use create_party::*;
pub use handle_presence::*;
pub use join_party::*;
pub use kick_player::*;
pub use leave_party::*;
pub use list_parties::*;
pub use remove_party::*;
