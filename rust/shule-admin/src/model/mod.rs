//! Entity schemas for every resource collection the backend serves,
//! plus the read-only report shapes. Each schema is explicit about
//! required vs. optional fields and normalizes loose wire scalars once,
//! at the boundary.

mod course;
mod facility;
mod finance;
pub mod normalize;
mod reference;
mod reports;
mod staff;
mod student;

pub use course::Course;
pub use facility::{Facility, Repair};
pub use finance::{FeeRecord, Transaction};
pub use reference::{Branch, Department, Intake};
pub use reports::{
    ActivityItem, DashboardMetrics, DepartmentTally, FeeSummaryRow, ModuleResult,
    PendingTotals, PerformanceReport, PerformanceStudent, PerformanceSummary, TopCourse,
};
pub use staff::StaffUser;
pub use student::Student;
