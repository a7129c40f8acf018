//! In-process incident store.
//!
//! Reference implementation of [`IncidentStore`] for tests, demos and
//! single-node deployments. Each voter holds at most one vote per incident;
//! every vote recounts the full tally.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;
use crate::geo::BoundingBox;
use crate::model::{Incident, NewIncident};
use crate::traits::{IncidentStore, VoteDirection};
use crate::trust::VoteTally;

#[derive(Debug)]
struct StoredIncident {
    incident: Incident,
    votes: HashMap<String, VoteDirection>,
}

impl StoredIncident {
    fn tally(&self) -> Result<VoteTally, StoreError> {
        let up = self
            .votes
            .values()
            .filter(|vote| **vote == VoteDirection::Confirm)
            .count();
        let down = self.votes.len() - up;
        Ok(VoteTally::new(up as i64, down as i64)?)
    }
}

#[derive(Debug, Default)]
pub struct MemoryIncidentStore {
    incidents: RwLock<HashMap<String, StoredIncident>>,
}

impl MemoryIncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, incident_id: &str) -> Option<Incident> {
        let incidents = self.incidents.read().unwrap_or_else(PoisonError::into_inner);
        incidents.get(incident_id).map(|stored| stored.incident.clone())
    }

    pub fn len(&self) -> usize {
        self.incidents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl IncidentStore for MemoryIncidentStore {
    fn report(&self, incident: NewIncident, now: DateTime<Utc>) -> Incident {
        let id = Uuid::new_v4().to_string();
        let incident = Incident::new(id.clone(), incident.kind, incident.location, now);
        info!(incident = %id, kind = ?incident.kind, "incident reported");

        let mut incidents = self.incidents.write().unwrap_or_else(PoisonError::into_inner);
        incidents.insert(
            id,
            StoredIncident {
                incident: incident.clone(),
                votes: HashMap::new(),
            },
        );
        incident
    }

    fn record_vote(
        &self,
        incident_id: &str,
        voter: &str,
        vote: VoteDirection,
    ) -> Result<Incident, StoreError> {
        let mut incidents = self.incidents.write().unwrap_or_else(PoisonError::into_inner);
        let stored = incidents
            .get_mut(incident_id)
            .ok_or_else(|| StoreError::UnknownIncident(incident_id.to_string()))?;

        let previous = stored.votes.insert(voter.to_string(), vote);
        let tally = stored.tally()?;
        let was_active = stored.incident.active;
        stored.incident.apply_tally(tally);

        debug!(
            incident = incident_id,
            ?vote,
            replaced = previous.is_some(),
            up = tally.up,
            down = tally.down,
            reliability = stored.incident.reliability_score,
            "vote recorded"
        );
        if was_active && !stored.incident.active {
            info!(incident = incident_id, "incident deactivated by votes");
        }

        Ok(stored.incident.clone())
    }

    fn active_within(&self, window: &BoundingBox) -> Vec<Incident> {
        let incidents = self.incidents.read().unwrap_or_else(PoisonError::into_inner);
        incidents
            .values()
            .map(|stored| &stored.incident)
            .filter(|incident| incident.active && window.contains(incident.location))
            .cloned()
            .collect()
    }
}
