mod party_registry;

pub use party_registry::*;
