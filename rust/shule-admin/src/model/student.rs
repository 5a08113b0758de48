use super::normalize;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shule_sdk::{EntityId, Resource};

/// One admitted (or applying) student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    /// Admission number, e.g. `VT/2025/004`.
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub county: String,
    #[serde(default, deserialize_with = "normalize::date")]
    pub enrollment_date: Option<NaiveDate>,
}

impl Resource for Student {
    const ENDPOINT: &'static str = "/api/students";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.student_id, &self.course]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "department" => Some(self.department.clone()),
            "status" => Some(self.status.clone()),
            "course" => Some(self.course.clone()),
            _ => None,
        }
    }
}
