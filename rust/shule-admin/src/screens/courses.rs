use super::{load_guarded, MountGuard};
use crate::model::{Course, Department};
use anyhow::{Context, Result};
use serde_json::json;
use shule_sdk::{
    filtered_rows, EntityId, FieldRule, FilterState, FormSession, ResourceStore, Transport,
};
use std::sync::Arc;

pub fn course_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::Required("name"),
        FieldRule::Required("department"),
        FieldRule::NumericRange {
            field: "fee",
            min: 0.0,
            max: 10_000_000.0,
        },
        FieldRule::NumericRange {
            field: "capacity",
            min: 0.0,
            max: 10_000.0,
        },
    ]
}

/// The course catalog: a searchable grid (no pagination) with a
/// create/edit dialog seeded from the department reference list.
pub struct CoursesScreen {
    courses: ResourceStore<Course>,
    departments: ResourceStore<Department>,
    filter: FilterState,
    mount: MountGuard,
}

impl CoursesScreen {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            courses: ResourceStore::new(transport.clone()),
            departments: ResourceStore::new(transport),
            filter: FilterState::default(),
            mount: MountGuard::new(),
        }
    }

    pub async fn mount(&self) -> Result<()> {
        let (courses, departments) = tokio::join!(
            load_guarded(&self.courses, &self.mount),
            load_guarded(&self.departments, &self.mount),
        );
        courses.context("loading courses")?;
        departments.context("loading departments")?;
        Ok(())
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub fn store(&self) -> &ResourceStore<Course> {
        &self.courses
    }

    pub async fn departments(&self) -> Vec<Department> {
        self.departments.snapshot().await
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
    }

    pub async fn visible(&self) -> Vec<Course> {
        filtered_rows(&self.courses.snapshot().await, &self.filter)
    }

    /// Blank draft matching the add-course dialog's fields.
    pub fn create(&self) -> FormSession<Course> {
        FormSession::open_new(
            json!({
                "name": "",
                "department": "",
                "description": "",
                "duration": "",
                "fee": "",
                "capacity": "",
                "instructor": "",
                "startDate": "",
                "status": "Upcoming",
                "department_id": 0,
            }),
            course_rules(),
        )
    }

    pub fn edit(&self, course: &Course) -> FormSession<Course> {
        FormSession::open_edit(course, course_rules())
    }

    /// Selecting a department seeds the draft's department name and its
    /// default fee.
    pub fn choose_department(&self, form: &mut FormSession<Course>, department: &Department) {
        form.set_field("department_id", json!(department.id));
        form.set_field("department", department.name.clone());
        form.set_field("fee", json!(department.fee_charge));
    }

    /// Persists the draft, coercing the numeric text inputs to numbers
    /// the way the dialog always has before posting.
    pub async fn save(&self, form: &mut FormSession<Course>) -> Result<Course> {
        let fee = form.text("fee").trim().to_string();
        if let Ok(fee) = fee.parse::<f64>() {
            form.set_field("fee", fee);
        }
        let capacity = form.text("capacity").trim().to_string();
        if let Ok(capacity) = capacity.parse::<u32>() {
            form.set_field("capacity", capacity);
        }
        form.submit(&self.courses).await.context("saving course")
    }

    pub async fn remove(&self, id: &EntityId) -> Result<()> {
        self.courses.remove(id).await.context("deleting course")
    }
}
