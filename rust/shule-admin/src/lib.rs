//! # shule-admin
//!
//! School-management entities and admin screens built on
//! [`shule_sdk`]: one typed schema per backend collection, the
//! cross-collection top-bar search, and a composition per screen wiring
//! stores, filters and forms together.
//!
//! ## Example
//!
//! ```rust,ignore
//! use shule_admin::screens::StudentsScreen;
//! use shule_sdk::prelude::*;
//!
//! let transport = Arc::new(HttpTransport::new(
//!     &ClientConfig::default(),
//!     Session::authenticated(token),
//! ));
//! let mut screen = StudentsScreen::new(transport);
//! screen.mount().await?;
//! screen.set_search("comp");
//! let page = screen.visible().await;
//! ```

pub mod model;
pub mod permissions;
pub mod screens;
pub mod search;

pub use model::{
    ActivityItem, Branch, Course, DashboardMetrics, Department, Facility, FeeRecord,
    FeeSummaryRow, Intake, PerformanceReport, Repair, StaffUser, Student, Transaction,
};
pub use screens::{
    AdmissionWizard, CoursesScreen, DashboardScreen, FacilitiesScreen, FinanceScreen,
    PortalScreen, StudentsScreen, UsersScreen,
};
pub use search::{global_search, Debouncer, SearchHit};
