use super::{load_guarded, AdmissionWizard, MountGuard};
use crate::model::Student;
use anyhow::{Context, Result};
use shule_sdk::{
    visible_rows, EntityId, FieldRule, FilterState, FormSession, PageView, PageWindow,
    ResourceStore, Transport, DEFAULT_PAGE_SIZE,
};
use std::sync::Arc;

pub fn student_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::Required("name"),
        FieldRule::Required("email"),
        FieldRule::Required("course"),
    ]
}

/// The admissions/students register: searchable, filterable by
/// department and status, paginated five to a page.
pub struct StudentsScreen {
    students: ResourceStore<Student>,
    filter: FilterState,
    window: PageWindow,
    mount: MountGuard,
}

impl StudentsScreen {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            students: ResourceStore::new(transport),
            filter: FilterState::default(),
            window: PageWindow::first(DEFAULT_PAGE_SIZE),
            mount: MountGuard::new(),
        }
    }

    pub async fn mount(&self) -> Result<usize> {
        load_guarded(&self.students, &self.mount)
            .await
            .context("loading students")
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    /// Manual refresh, e.g. after the admission wizard registers someone.
    pub async fn refresh(&self) -> Result<usize> {
        self.mount().await
    }

    pub fn store(&self) -> &ResourceStore<Student> {
        &self.students
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
        self.window.page_index = 1;
    }

    pub fn set_department(&mut self, department: impl Into<String>) {
        self.filter.set_facet("department", department);
        self.window.page_index = 1;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.filter.set_facet("status", status);
        self.window.page_index = 1;
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.window.page_index = page_index.max(1);
    }

    pub async fn visible(&self) -> PageView<Student> {
        visible_rows(&self.students.snapshot().await, &self.filter, self.window)
    }

    pub fn edit(&self, student: &Student) -> FormSession<Student> {
        FormSession::open_edit(student, student_rules())
    }

    pub async fn save(&self, form: &mut FormSession<Student>) -> Result<Student> {
        form.submit(&self.students).await.context("saving student")
    }

    pub async fn remove(&self, id: &EntityId) -> Result<()> {
        self.students.remove(id).await.context("deleting student")
    }

    /// Opens the two-step admission application over the same transport.
    pub fn admissions(&self) -> AdmissionWizard {
        AdmissionWizard::new(self.students.transport())
    }
}
