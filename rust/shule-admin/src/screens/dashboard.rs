use super::MountGuard;
use crate::model::{ActivityItem, Course, DashboardMetrics, StaffUser, Student};
use crate::search::{global_search, Debouncer, SearchHit};
use anyhow::{Context, Result};
use shule_sdk::{get_as, Resource, Transport};
use std::sync::Arc;

/// The landing page: aggregate metrics, the recent-activity feed, and
/// the debounced top-bar search across students, staff and courses.
pub struct DashboardScreen {
    transport: Arc<dyn Transport>,
    metrics: Option<DashboardMetrics>,
    activity: Vec<ActivityItem>,
    debouncer: Debouncer,
    mount: MountGuard,
}

impl DashboardScreen {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            metrics: None,
            activity: Vec::new(),
            debouncer: Debouncer::default(),
            mount: MountGuard::new(),
        }
    }

    pub async fn mount(&mut self) -> Result<()> {
        let (metrics, activity) = tokio::join!(
            get_as::<DashboardMetrics>(&*self.transport, "/api/dashboard"),
            get_as::<Vec<ActivityItem>>(&*self.transport, "/api/activities/recent"),
        );
        let metrics = metrics.context("loading dashboard metrics")?;
        let activity = activity.context("loading recent activity")?;
        if self.mount.is_mounted() {
            self.metrics = Some(metrics);
            self.activity = activity;
        }
        Ok(())
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub fn metrics(&self) -> Option<&DashboardMetrics> {
        self.metrics.as_ref()
    }

    pub fn activity(&self) -> &[ActivityItem] {
        &self.activity
    }

    /// Debounced global search. Each keystroke calls this; only the
    /// query still newest after the debounce delay fetches the three
    /// collections, the rest resolve to nothing.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() || !self.debouncer.settle().await {
            return Ok(Vec::new());
        }

        let (students, staff, courses) = tokio::join!(
            get_as::<Vec<Student>>(&*self.transport, Student::ENDPOINT),
            get_as::<Vec<StaffUser>>(&*self.transport, StaffUser::ENDPOINT),
            get_as::<Vec<Course>>(&*self.transport, Course::ENDPOINT),
        );
        let students = students.context("searching students")?;
        let staff = staff.context("searching users")?;
        let courses = courses.context("searching courses")?;

        Ok(global_search(&students, &staff, &courses, query))
    }
}
