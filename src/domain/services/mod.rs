pub mod party_timer;
