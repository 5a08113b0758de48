use super::normalize;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shule_sdk::{EntityId, Resource};

/// One course offering in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, deserialize_with = "normalize::money")]
    pub fee: f64,
    #[serde(default, deserialize_with = "normalize::count")]
    pub capacity: u32,
    #[serde(default, deserialize_with = "normalize::count")]
    pub enrolled: u32,
    #[serde(default)]
    pub instructor: String,
    #[serde(default, rename = "startDate", deserialize_with = "normalize::date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: String,
}

impl Course {
    /// Enrollment as a share of capacity, for the progress display.
    pub fn enrollment_ratio(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            f64::from(self.enrolled) / f64::from(self.capacity)
        }
    }
}

impl Resource for Course {
    const ENDPOINT: &'static str = "/api/courses";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.name, &self.department, &self.description]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "status" => Some(self.status.clone()),
            "department" => Some(self.department.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_normalizes_stringly_numbers() {
        let course: Course = serde_json::from_str(
            r#"{"id": 3, "name": "Computer Packages", "fee": "12000", "capacity": "40",
                "startDate": "2025-09-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(course.fee, 12000.0);
        assert_eq!(course.capacity, 40);
        assert_eq!(
            course.start_date,
            NaiveDate::from_ymd_opt(2025, 9, 1)
        );
    }

    #[test]
    fn test_enrollment_ratio_handles_zero_capacity() {
        let course: Course = serde_json::from_str(r#"{"id": 1, "enrolled": 10}"#).unwrap();
        assert_eq!(course.enrollment_ratio(), 0.0);
    }
}
