//! Screen wiring against an in-memory backend: mount-time loads,
//! filter/paginate behavior, validation gates, the multipart password
//! policy and the unmount discard rule.

use async_trait::async_trait;
use serde_json::{json, Value};
use shule_admin::screens::{
    CoursesScreen, FacilitiesScreen, FinanceScreen, StudentsScreen, UsersScreen,
};
use shule_sdk::{ClientError, EntityId, Method, RequestBody, Transport};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// Backend double shared by every screen test: a JSON collection per
/// endpoint, multipart bodies flattened to text fields the way a form
/// parser would, updates merged and echoed.
struct FakeBackend {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
    calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            collections: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(500),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn seed(self: &Arc<Self>, endpoint: &str, rows: Vec<Value>) {
        self.collections
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), rows);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn last_body(&self) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|call| call.split_once(' ').map(|(_, rest)| rest))
            .and_then(|rest| rest.split_once(' ').map(|(_, body)| body))
            .and_then(|body| serde_json::from_str(body).ok())
    }

    fn split_path(path: &str) -> (String, Option<String>) {
        let path = path.split('?').next().unwrap_or(path);
        let mut segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        if segments.len() > 2 && segments.last().unwrap().parse::<i64>().is_ok() {
            let id = segments.pop().unwrap().to_string();
            (format!("/{}", segments.join("/")), Some(id))
        } else {
            (format!("/{}", segments.join("/")), None)
        }
    }
}

fn body_to_value(body: &RequestBody) -> Value {
    match body {
        RequestBody::Empty => Value::Null,
        RequestBody::Json(value) => value.clone(),
        RequestBody::Multipart(fields) => {
            let mut map = serde_json::Map::new();
            for field in fields {
                if let shule_sdk::FormValue::Text(text) = &field.value {
                    map.insert(field.name.clone(), Value::String(text.clone()));
                }
            }
            Value::Object(map)
        }
    }
}

fn id_matches(row: &Value, id: &str) -> bool {
    match row.get("id") {
        Some(Value::Number(n)) => n.to_string() == id,
        Some(Value::String(s)) => s == id,
        _ => false,
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError> {
        let body = body_to_value(&body);
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {} {}", method.as_str(), path, body));

        let (endpoint, id) = Self::split_path(path);
        let mut collections = self.collections.lock().unwrap();
        let rows = collections.entry(endpoint).or_default();

        match (method, id) {
            (Method::Get, None) => Ok(Value::Array(rows.clone())),
            (Method::Post, None) => {
                let mut created = body;
                if created.is_null() {
                    created = json!({});
                }
                created["id"] = json!(self.next_id.fetch_add(1, Ordering::SeqCst));
                rows.push(created.clone());
                Ok(created)
            }
            (Method::Put, Some(id)) => {
                if let Some(row) = rows.iter_mut().find(|row| id_matches(row, &id)) {
                    if let (Some(target), Some(patch)) = (row.as_object_mut(), body.as_object()) {
                        for (key, value) in patch {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                    Ok(row.clone())
                } else {
                    let mut echoed = body;
                    echoed["id"] = json!(id.parse::<i64>().unwrap_or(0));
                    Ok(echoed)
                }
            }
            (Method::Delete, Some(id)) => {
                rows.retain(|row| !id_matches(row, &id));
                Ok(Value::Null)
            }
            _ => Err(ClientError::Http {
                status: 404,
                message: Some("no such route".into()),
            }),
        }
    }
}

fn student(id: i64, name: &str, course: &str, department: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "student_id": format!("VT/2025/{:03}", id),
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "course": course,
        "department": department,
        "status": "Active",
    })
}

#[tokio::test]
async fn test_students_screen_paginates_and_filters() {
    let backend = FakeBackend::new();
    let rows: Vec<Value> = (1..=12)
        .map(|i| student(i, &format!("Student {}", i), "Computer Packages", "ICT"))
        .collect();
    backend.seed("/api/students", rows);

    let mut screen = StudentsScreen::new(backend.clone());
    assert_eq!(screen.mount().await.unwrap(), 12);

    // Page 3 of 12 rows at the default page size of 5.
    screen.set_page(3);
    let page = screen.visible().await;
    assert_eq!(page.total_matched, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.rows.len(), 2);

    // A narrowing search resets the window back to page 1.
    screen.set_search("comp");
    let page = screen.visible().await;
    assert_eq!(page.total_matched, 12, "course matches case-insensitively");
    assert_eq!(page.rows.len(), 5);
    assert_eq!(page.rows[0].name, "Student 1");

    screen.set_search("student 3");
    let page = screen.visible().await;
    assert_eq!(page.total_matched, 1);

    screen.set_search("");
    screen.set_department("Engineering");
    assert_eq!(screen.visible().await.total_matched, 0);
    screen.set_department("all");
    assert_eq!(screen.visible().await.total_matched, 12);
}

#[tokio::test]
async fn test_students_screen_remove_keeps_the_rest() {
    let backend = FakeBackend::new();
    backend.seed(
        "/api/students",
        vec![
            student(1, "Alice", "Welding", "Engineering"),
            student(2, "Bob", "Welding", "Engineering"),
        ],
    );
    let screen = StudentsScreen::new(backend.clone());
    screen.mount().await.unwrap();

    screen.remove(&EntityId::Int(1)).await.unwrap();
    let page = screen.visible().await;
    assert_eq!(page.total_matched, 1);
    assert_eq!(page.rows[0].name, "Bob");
}

#[tokio::test]
async fn test_unmounted_screen_discards_the_inflight_load() {
    let backend = FakeBackend::new();
    backend.seed("/api/students", vec![student(1, "Alice", "ICT", "ICT")]);

    let screen = StudentsScreen::new(backend.clone());
    screen.unmount();
    assert_eq!(screen.mount().await.unwrap(), 0);
    assert_eq!(screen.visible().await.total_matched, 0, "stale rows dropped");
}

#[tokio::test]
async fn test_courses_screen_seeds_department_and_coerces_numbers() {
    let backend = FakeBackend::new();
    backend.seed("/api/courses", vec![]);
    backend.seed(
        "/api/departments",
        vec![json!({"id": 1, "name": "ICT", "fee_charge": "12000"})],
    );

    let mut screen = CoursesScreen::new(backend.clone());
    screen.mount().await.unwrap();
    let departments = screen.departments().await;
    assert_eq!(departments.len(), 1);

    let mut form = screen.create();
    screen.choose_department(&mut form, &departments[0]);
    form.set_field("name", "Computer Packages");
    form.set_field("duration", "3 months");
    form.set_field("capacity", "40");
    let saved = screen.save(&mut form).await.unwrap();

    // Department selection seeded the name and its default fee.
    assert_eq!(saved.department, "ICT");
    assert_eq!(saved.fee, 12000.0);
    assert_eq!(saved.capacity, 40);

    // The numeric text inputs went out as numbers.
    let posted = backend.last_body().unwrap();
    assert_eq!(posted["capacity"], json!(40));
    assert_eq!(posted["fee"], json!(12000.0));

    screen.set_search("comp");
    assert_eq!(screen.visible().await.len(), 1);
    screen.set_search("welding");
    assert_eq!(screen.visible().await.len(), 0);
}

#[tokio::test]
async fn test_users_screen_validates_before_posting() {
    let backend = FakeBackend::new();
    backend.seed("/api/users", vec![]);
    backend.seed("/api/branches", vec![]);

    let screen = UsersScreen::new(backend.clone());
    screen.mount().await.unwrap();
    let mount_calls = backend.calls().len();

    let mut form = screen.create();
    form.set_field("full_name", "Naliaka Wekesa");
    // username/email/password still missing
    let err = screen.save(&mut form).await.unwrap_err();
    let client_err = err.downcast_ref::<ClientError>().unwrap();
    assert!(client_err.is_validation());
    match client_err {
        ClientError::ValidationFailed(errors) => {
            assert!(errors.contains("username"));
            assert!(errors.contains("email"));
            assert!(errors.contains("password"));
        }
        _ => unreachable!(),
    }
    assert_eq!(backend.calls().len(), mount_calls, "no network on invalid draft");
}

#[tokio::test]
async fn test_users_screen_saves_multipart_and_drops_blank_password_on_edit() {
    let backend = FakeBackend::new();
    backend.seed("/api/users", vec![]);
    backend.seed("/api/branches", vec![]);

    let screen = UsersScreen::new(backend.clone());
    screen.mount().await.unwrap();

    let mut form = screen.create();
    form.set_field("full_name", "Naliaka Wekesa");
    form.set_field("username", "naliaka");
    form.set_field("email", "naliaka@school.ac.ke");
    form.set_field("role", "accountant");
    form.set_field("password", "hunter22");
    screen.attach_avatar(&mut form, "avatar.png", "image/png", vec![0xff, 0xd8]);
    let created = screen.save(&mut form).await.unwrap();
    assert_eq!(created.username, "naliaka");

    let posted = backend.last_body().unwrap();
    assert_eq!(posted["password"], json!("hunter22"));

    // Editing with a blank password keeps the current one: the field
    // never reaches the wire.
    let mut form = screen.edit(&created);
    form.set_field("full_name", "Naliaka W. Wekesa");
    form.set_field("password", "");
    screen.save(&mut form).await.unwrap();

    let updated = backend.last_body().unwrap();
    assert!(updated.get("password").is_none());
    assert_eq!(updated["full_name"], json!("Naliaka W. Wekesa"));
}

#[tokio::test]
async fn test_facilities_screen_logs_repairs_and_walks_status() {
    let backend = FakeBackend::new();
    backend.seed(
        "/api/facilities",
        vec![json!({"id": 1, "name": "Welding Workshop", "status": "Needs Repair"})],
    );
    backend.seed("/api/repairs", vec![]);

    let screen = FacilitiesScreen::new(backend.clone());
    screen.mount().await.unwrap();

    let mut form = screen.new_repair();
    let err = screen.log_repair(&mut form).await.unwrap_err();
    assert!(err.downcast_ref::<ClientError>().unwrap().is_validation());

    form.set_field("facility_id", "1");
    form.set_field("issue_reported", "Broken extractor fan");
    form.set_field("cost", "4500");
    let repair = screen.log_repair(&mut form).await.unwrap();
    assert_eq!(repair.status, "");
    assert_eq!(repair.cost, Some(4500.0));

    let moved = screen
        .set_repair_status(&repair.id, "In Progress")
        .await
        .unwrap();
    assert_eq!(moved.status, "In Progress");
    let rows = screen.repairs().snapshot().await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "In Progress");
}

#[tokio::test]
async fn test_finance_screen_summary_and_payment_flow() {
    let backend = FakeBackend::new();
    backend.seed(
        "/api/finance",
        vec![
            json!({"id": 1, "student_name": "Achieng", "total_amount": "45000",
                   "amount_paid": "45000", "amount_pending": "0", "is_paid": 1}),
            json!({"id": 2, "student_name": "Baraka", "total_amount": "45000",
                   "amount_paid": "30000", "amount_pending": "15000", "is_paid": 0}),
        ],
    );
    backend.seed("/api/transactions", vec![]);

    let screen = FinanceScreen::new(backend.clone());
    screen.mount().await.unwrap();

    let summary = screen.summary().await;
    assert_eq!(summary.total_fees, 90000.0);
    assert_eq!(summary.amount_paid, 75000.0);
    assert_eq!(summary.current_balance, 15000.0);
    assert_eq!(summary.overdue_count, 1);

    // A malformed amount never reaches the backend.
    let calls_before = backend.calls().len();
    let err = screen
        .pay(&EntityId::Int(2), "a lot", "mpesa", "TX-1")
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<ClientError>().unwrap().is_validation());
    assert_eq!(backend.calls().len(), calls_before);

    // A valid payment posts, then refreshes fees and the ledger.
    screen
        .pay(&EntityId::Int(2), "15000", "mpesa", "TX-2")
        .await
        .unwrap();
    let calls = backend.calls();
    assert!(calls.iter().any(|c| c.starts_with("POST /api/finance/fees/pay")));
    assert!(calls.iter().rev().take(2).all(|c| c.starts_with("GET ")));
}
