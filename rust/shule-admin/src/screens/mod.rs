//! Per-entity compositions: each screen wires one or more stores, a
//! filter/paginate view and zero or more form sessions together. No
//! screen carries logic of its own beyond that wiring.

mod admissions;
mod courses;
mod dashboard;
mod facilities;
mod finance;
mod portal;
mod students;
mod users;

pub use admissions::{AdmissionWizard, TOTAL_STEPS};
pub use courses::{course_rules, CoursesScreen};
pub use dashboard::DashboardScreen;
pub use facilities::{facility_rules, repair_rules, FacilitiesScreen};
pub use finance::{FeeSummary, FinanceScreen};
pub use portal::PortalScreen;
pub use students::{student_rules, StudentsScreen};
pub use users::{user_rules, UsersScreen};

use shule_sdk::{ClientError, Resource, ResourceStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tracks whether the owning screen is still mounted. Requests do not
/// support cancellation, so a screen that unmounts mid-flight discards
/// the response instead of applying it to a then-stale store.
#[derive(Clone)]
pub struct MountGuard(Arc<AtomicBool>);

impl MountGuard {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches a store's collection and applies it only while the guard is
/// still mounted. Returns the number of rows applied (zero for a
/// discarded response).
pub(crate) async fn load_guarded<T: Resource>(
    store: &ResourceStore<T>,
    mount: &MountGuard,
) -> Result<usize, ClientError> {
    let rows = store.fetch().await?;
    if !mount.is_mounted() {
        tracing::debug!("{}: discarding response fetched after unmount", T::ENDPOINT);
        return Ok(0);
    }
    let count = rows.len();
    store.replace(rows).await;
    Ok(count)
}
