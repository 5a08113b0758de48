use serde::{Deserialize, Serialize};
use shule_sdk::{EntityId, Resource};

/// One system user (admin, teacher, accountant, clerk...).
///
/// Saved over multipart form-data because the avatar rides along with
/// the record; the password field travels on create and is omitted on
/// edit when left blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffUser {
    pub id: EntityId,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Resource for StaffUser {
    const ENDPOINT: &'static str = "/api/users";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.full_name, &self.email, &self.username]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "role" => Some(self.role.clone()),
            "branch" => Some(self.branch.clone()),
            _ => None,
        }
    }
}
