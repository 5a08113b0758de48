//! Role/permission matrix mirrored from the backend's access rules.
//!
//! Grants are `resource:action` pairs; `*` on either side is a
//! wildcard. Screens use this to hide actions the current role cannot
//! perform; the backend enforces the same matrix authoritatively.

pub const ROLES: &[&str] = &[
    "super_admin",
    "branch_admin",
    "teacher",
    "accountant",
    "clerk",
];

fn grants(role: &str) -> &'static [&'static str] {
    match role {
        "super_admin" => &["*"],
        "branch_admin" => &[
            "students:*",
            "teachers:*",
            "assessments:*",
            "reports:*",
            "fees:*",
            "users:*",
        ],
        "teacher" => &["students:read", "assessments:*", "attendance:*", "reports:read"],
        "accountant" => &["students:read", "fees:*", "reports:read"],
        "clerk" => &["students:*", "attendance:read", "reports:read"],
        _ => &[],
    }
}

pub fn has_permission(role: &str, action: &str, resource: &str) -> bool {
    let grants = grants(role);
    grants.contains(&"*")
        || grants.iter().any(|grant| {
            *grant == format!("{}:*", resource) || *grant == format!("{}:{}", resource, action)
        })
}

pub fn can_read(role: &str, resource: &str) -> bool {
    has_permission(role, "read", resource)
}

pub fn can_write(role: &str, resource: &str) -> bool {
    has_permission(role, "write", resource)
}

pub fn can_delete(role: &str, resource: &str) -> bool {
    has_permission(role, "delete", resource)
}
