//! Small read-mostly reference collections used to seed form selects.

use super::normalize;
use serde::{Deserialize, Serialize};
use shule_sdk::{EntityId, Resource};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    /// Default fee seeded into a new course for this department.
    #[serde(default, deserialize_with = "normalize::money")]
    pub fee_charge: f64,
}

impl Resource for Department {
    const ENDPOINT: &'static str = "/api/departments";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intake {
    pub id: EntityId,
    #[serde(default)]
    pub intake_name: String,
}

impl Resource for Intake {
    const ENDPOINT: &'static str = "/api/intakes";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.intake_name]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
}

impl Resource for Branch {
    const ENDPOINT: &'static str = "/api/branches";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name]
    }
}
