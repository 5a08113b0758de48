//! Top-bar search across the three resource kinds the admin cares
//! about, plus the debounce that keeps keystrokes from fanning out into
//! request storms.

use crate::model::{Course, StaffUser, Student};
use shule_sdk::Resource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// At most this many hits per kind, students first, then staff, then
/// courses.
pub const RESULTS_PER_KIND: usize = 5;

/// Trailing-edge delay between the last keystroke and the search firing.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// One global-search result. The discriminant is exhaustive: rendering
/// code matches every kind, there is no fallthrough row type.
#[derive(Debug, Clone)]
pub enum SearchHit {
    Student(Student),
    Staff(StaffUser),
    Course(Course),
}

impl SearchHit {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchHit::Student(_) => "student",
            SearchHit::Staff(_) => "user",
            SearchHit::Course(_) => "course",
        }
    }

    /// Primary line of the result row.
    pub fn title(&self) -> &str {
        match self {
            SearchHit::Student(s) => &s.name,
            SearchHit::Staff(u) => &u.full_name,
            SearchHit::Course(c) => &c.name,
        }
    }

    /// Secondary line of the result row.
    pub fn subtitle(&self) -> String {
        match self {
            SearchHit::Student(s) => format!("{} • {}", s.student_id, s.course),
            SearchHit::Staff(u) => format!("{} • {}", u.email, u.role),
            SearchHit::Course(c) => format!("{} • {}", c.department, c.duration),
        }
    }
}

fn matches<T: Resource>(row: &T, query: &str) -> bool {
    row.search_text()
        .iter()
        .any(|field| field.to_lowercase().contains(query))
}

/// Case-folded substring search over all three collections. An empty
/// query yields nothing (the dropdown closes rather than listing the
/// whole school).
pub fn global_search(
    students: &[Student],
    staff: &[StaffUser],
    courses: &[Course],
    query: &str,
) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = Vec::new();
    hits.extend(
        students
            .iter()
            .filter(|s| matches(*s, &query))
            .take(RESULTS_PER_KIND)
            .cloned()
            .map(SearchHit::Student),
    );
    hits.extend(
        staff
            .iter()
            .filter(|u| matches(*u, &query))
            .take(RESULTS_PER_KIND)
            .cloned()
            .map(SearchHit::Staff),
    );
    hits.extend(
        courses
            .iter()
            .filter(|c| matches(*c, &query))
            .take(RESULTS_PER_KIND)
            .cloned()
            .map(SearchHit::Course),
    );
    hits
}

/// Trailing-edge debouncer. Each call supersedes the ones before it;
/// only the call that is still newest after the delay reports `true`.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Waits out the delay. Returns `false` when a newer call arrived
    /// meanwhile, in which case the caller should drop its query.
    pub async fn settle(&self) -> bool {
        let mine = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == mine
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student(name: &str, admission: &str, course: &str) -> Student {
        serde_json::from_value(json!({
            "id": 1, "name": name, "student_id": admission, "course": course
        }))
        .unwrap()
    }

    fn staff(full_name: &str, email: &str) -> StaffUser {
        serde_json::from_value(json!({
            "id": 1, "full_name": full_name, "email": email, "role": "teacher"
        }))
        .unwrap()
    }

    fn course(name: &str) -> Course {
        serde_json::from_value(json!({"id": 1, "name": name})).unwrap()
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let students = vec![student("Wanjiku", "VT/1", "Plumbing")];
        assert!(global_search(&students, &[], &[], "  ").is_empty());
    }

    #[test]
    fn test_results_group_students_then_staff_then_courses() {
        let students = vec![student("Amina Yusuf", "VT/1", "Welding")];
        let staff = vec![staff("Amina Hassan", "amina@school.ac.ke")];
        let courses = vec![course("Amina's Catering Basics")];
        let hits = global_search(&students, &staff, &courses, "amina");
        let kinds: Vec<&str> = hits.iter().map(SearchHit::kind).collect();
        assert_eq!(kinds, vec!["student", "user", "course"]);
    }

    #[test]
    fn test_per_kind_cap_is_five() {
        let students: Vec<Student> = (0..9)
            .map(|i| student(&format!("Student {}", i), &format!("VT/{}", i), "ICT"))
            .collect();
        let hits = global_search(&students, &[], &[], "student");
        assert_eq!(hits.len(), RESULTS_PER_KIND);
    }

    #[test]
    fn test_match_reaches_admission_number_and_email() {
        let students = vec![student("A", "VT/2025/004", "ICT")];
        let staff = vec![staff("B", "b@school.ac.ke")];
        assert_eq!(global_search(&students, &staff, &[], "2025/004").len(), 1);
        assert_eq!(global_search(&students, &staff, &[], "school.ac.ke").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_drops_superseded_queries() {
        let debouncer = Debouncer::default();
        let first = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle().await })
        };
        // Let the first call register before superseding it.
        tokio::task::yield_now().await;
        let second = debouncer.settle().await;
        assert!(second, "latest call settles");
        assert!(!first.await.unwrap(), "superseded call is dropped");
    }
}
