use super::{load_guarded, MountGuard};
use crate::model::{Branch, StaffUser};
use anyhow::{Context, Result};
use serde_json::json;
use shule_sdk::{
    visible_rows, EntityId, FieldRule, FilterState, FormField, FormSession, PageView, PageWindow,
    ResourceStore, Transport, DEFAULT_PAGE_SIZE,
};
use std::sync::Arc;

/// Rules differ between create and edit: a new account needs a
/// password, an existing one keeps its password when the field is left
/// blank.
pub fn user_rules(editing: bool) -> Vec<FieldRule> {
    let mut rules = vec![
        FieldRule::Required("full_name"),
        FieldRule::Required("username"),
        FieldRule::Required("email"),
        FieldRule::Required("role"),
    ];
    if !editing {
        rules.push(FieldRule::Required("password"));
    }
    rules.push(FieldRule::MinLength {
        field: "password",
        min: 6,
    });
    rules
}

/// System user management. Records save as multipart form-data so the
/// avatar can ride along.
pub struct UsersScreen {
    users: ResourceStore<StaffUser>,
    branches: ResourceStore<Branch>,
    filter: FilterState,
    window: PageWindow,
    mount: MountGuard,
}

impl UsersScreen {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            users: ResourceStore::new(transport.clone()),
            branches: ResourceStore::new(transport),
            filter: FilterState::default(),
            window: PageWindow::first(DEFAULT_PAGE_SIZE),
            mount: MountGuard::new(),
        }
    }

    pub async fn mount(&self) -> Result<()> {
        let (users, branches) = tokio::join!(
            load_guarded(&self.users, &self.mount),
            load_guarded(&self.branches, &self.mount),
        );
        users.context("loading users")?;
        branches.context("loading branches")?;
        Ok(())
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub fn store(&self) -> &ResourceStore<StaffUser> {
        &self.users
    }

    pub async fn branches(&self) -> Vec<Branch> {
        self.branches.snapshot().await
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
        self.window.page_index = 1;
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.filter.set_facet("role", role);
        self.window.page_index = 1;
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.window.page_index = page_index.max(1);
    }

    pub async fn visible(&self) -> PageView<StaffUser> {
        visible_rows(&self.users.snapshot().await, &self.filter, self.window)
    }

    pub fn create(&self) -> FormSession<StaffUser> {
        FormSession::open_new(
            json!({
                "full_name": "",
                "username": "",
                "email": "",
                "role": "teacher",
                "phone": "",
                "branch": "",
                "password": "",
            }),
            user_rules(false),
        )
    }

    pub fn edit(&self, user: &StaffUser) -> FormSession<StaffUser> {
        FormSession::open_edit(user, user_rules(true))
    }

    pub fn attach_avatar(
        &self,
        form: &mut FormSession<StaffUser>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) {
        form.attach(FormField::file("image", filename, content_type, data));
    }

    /// Persists the draft as multipart. The id travels in the URL, not
    /// the body, and on edit a blank password is dropped from the
    /// submission so the current one is kept.
    pub async fn save(&self, form: &mut FormSession<StaffUser>) -> Result<StaffUser> {
        form.remove_field("id");
        if form.is_editing() && form.text("password").trim().is_empty() {
            form.remove_field("password");
        }
        form.submit_multipart(&self.users).await.context("saving user")
    }

    pub async fn remove(&self, id: &EntityId) -> Result<()> {
        self.users.remove(id).await.context("deleting user")
    }
}
