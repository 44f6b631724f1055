use std::sync::Arc;

use crate::domain::entities::PartySnapshot;
use crate::domain::repositories::PartyRegistry;

/// List parties output
pub struct ListPartiesOutput {
    pub parties: Vec<PartySnapshot>,
}

/// List all live parties (admin)
pub struct ListParties {
    registry: Arc<PartyRegistry>,
}

impl ListParties {
    pub fn new(registry: Arc<PartyRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self) -> ListPartiesOutput {
        let mut parties: Vec<_> = self
            .registry
            .list()
            .iter()
            .map(|party| party.snapshot())
            .collect();
        parties.sort_by(|a, b| a.role.name.cmp(&b.role.name));

        ListPartiesOutput { parties }
    }
}
