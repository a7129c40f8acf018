//! Severity weights per incident type, in penalty points.

use crate::model::{Incident, IncidentType};

/// Weight for types without a dedicated entry.
pub const DEFAULT_SEVERITY_WEIGHT: u32 = 15;

pub const fn severity_weight(kind: IncidentType) -> u32 {
    match kind {
        IncidentType::Closure => 40,
        IncidentType::Accident => 30,
        IncidentType::Hazard => 25,
        IncidentType::Traffic => 20,
        IncidentType::Police => 15,
        IncidentType::Unknown => DEFAULT_SEVERITY_WEIGHT,
    }
}

impl IncidentType {
    pub const fn severity_weight(self) -> u32 {
        severity_weight(self)
    }
}

/// Uncapped sum of severity weights.
pub fn total_penalty<'a>(incidents: impl IntoIterator<Item = &'a Incident>) -> u32 {
    incidents
        .into_iter()
        .map(|incident| severity_weight(incident.kind))
        .fold(0, u32::saturating_add)
}
