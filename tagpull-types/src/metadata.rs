use serde::{Deserialize, Serialize};

use crate::point::{PointId, ServiceId};

/// One service advertised by the historian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// `site.service` name.
    pub name: ServiceId,
    /// Free-form description, e.g. "Calculation Service".
    pub description: String,
    /// Service type code, e.g. "SSERVER".
    pub kind: String,
    /// Service status text.
    pub status: String,
}

/// One point configured in a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointInfo {
    /// Fully qualified point id.
    pub point: PointId,
    /// Latest value, if the service reported one.
    pub value: Option<f64>,
    /// Latest timestamp text as reported.
    pub time: Option<String>,
    /// Latest status text as reported.
    pub status: Option<String>,
    /// Point description.
    pub description: String,
    /// Engineering units.
    pub units: String,
}
