//! Periodic refresh/expiry task owned by a party

use std::sync::Weak;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::domain::entities::Party;

/// Spawn the timer driving `party`'s refresh protocol every `period`.
///
/// The first tick fires immediately. The loop ends when `cancel` is triggered
/// or the party is dropped; a tick already running is allowed to finish.
pub fn spawn(party: Weak<Party>, period: Duration, cancel: CancellationToken) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let Some(party) = party.upgrade() else {
                        break;
                    };
                    let outcome = party.tick().await;
                    debug!(party = %party.id(), ?outcome, "Party tick");
                }
            }
        }

        debug!("Party timer stopped");
    });
}
