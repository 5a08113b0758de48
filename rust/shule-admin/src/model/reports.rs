//! Read-only report shapes for the domain-specific endpoints that are
//! not CRUD collections: dashboard aggregates, the activity feed, the
//! per-department fee rollup and the portal performance lookup.

use super::normalize;
use serde::Deserialize;

/// `GET /api/dashboard`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardMetrics {
    #[serde(default, deserialize_with = "normalize::count")]
    pub students: u32,
    #[serde(default, deserialize_with = "normalize::count")]
    pub courses: u32,
    #[serde(default, deserialize_with = "normalize::count")]
    pub instructors: u32,
    #[serde(
        default,
        rename = "revenueThisMonth",
        deserialize_with = "normalize::money"
    )]
    pub revenue_this_month: f64,
    #[serde(
        default,
        rename = "averagePerformance",
        deserialize_with = "normalize::money"
    )]
    pub average_performance: f64,
    #[serde(default)]
    pub departments: Vec<DepartmentTally>,
    #[serde(default, rename = "topCourse")]
    pub top_course: Option<TopCourse>,
    #[serde(default)]
    pub finance: PendingTotals,
    /// Rows are opaque here; the dashboard only shows how many there are.
    #[serde(default, rename = "pendingPayments")]
    pub pending_payments: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentTally {
    #[serde(default)]
    pub department: String,
    #[serde(default, deserialize_with = "normalize::count")]
    pub total_students: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopCourse {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "avgScore", deserialize_with = "normalize::money")]
    pub avg_score: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub growth: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PendingTotals {
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_pending: f64,
}

/// `GET /api/activities/recent`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityItem {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub student: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub time: String,
    /// "enrollment", "payment", "exam", "assignment"...
    #[serde(default, rename = "type")]
    pub kind: String,
}

/// `GET /api/finance/fees-summary`, the per-department rollup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeeSummaryRow {
    #[serde(default)]
    pub department: String,
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub amount_paid: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub amount_pending: f64,
}

/// `GET /api/performance?admissionNo=..&level=..`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    #[serde(default)]
    pub student_info: PerformanceStudent,
    #[serde(default)]
    pub performance: PerformanceSummary,
    #[serde(default)]
    pub modules: Vec<ModuleResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceStudent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub admission_no: String,
    #[serde(default)]
    pub trade_area: String,
    #[serde(default)]
    pub training_center: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    #[serde(default, deserialize_with = "normalize::count")]
    pub total_modules: u32,
    #[serde(default, deserialize_with = "normalize::count")]
    pub completed_modules: u32,
    #[serde(default, deserialize_with = "normalize::money")]
    pub average_mark: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub attendance: f64,
    #[serde(default, deserialize_with = "normalize::count")]
    pub total_classes: u32,
    #[serde(default, deserialize_with = "normalize::money")]
    pub theory_marks: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub practical_marks: f64,
    #[serde(default)]
    pub exam_status: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleResult {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "normalize::money")]
    pub theory: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub practical: f64,
    #[serde(default)]
    pub grade: String,
}
