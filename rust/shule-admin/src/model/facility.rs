use super::normalize;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shule_sdk::{EntityId, Resource};

/// A physical facility (workshop, lab, dormitory...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// "Good", "Needs Repair" or "Broken".
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Resource for Facility {
    const ENDPOINT: &'static str = "/api/facilities";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }
}

/// A repair logged against a facility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repair {
    pub id: EntityId,
    pub facility_id: EntityId,
    #[serde(default)]
    pub issue_reported: String,
    #[serde(default, deserialize_with = "normalize::date")]
    pub repair_date: Option<NaiveDate>,
    /// Absent until the repair has been costed.
    #[serde(default, deserialize_with = "normalize::opt_money")]
    pub cost: Option<f64>,
    /// "Pending", "In Progress" or "Completed".
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub facility_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Resource for Repair {
    const ENDPOINT: &'static str = "/api/repairs";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![
            &self.issue_reported,
            self.facility_name.as_deref().unwrap_or(""),
        ]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }
}
