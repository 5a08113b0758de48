use super::{load_guarded, MountGuard};
use crate::model::{Facility, Repair};
use anyhow::{Context, Result};
use serde_json::json;
use shule_sdk::{EntityId, FieldRule, FormField, FormSession, ResourceStore, Transport};
use std::sync::Arc;

pub fn facility_rules() -> Vec<FieldRule> {
    vec![FieldRule::Required("name")]
}

pub fn repair_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::Required("facility_id"),
        FieldRule::Required("issue_reported"),
        FieldRule::NumericRange {
            field: "cost",
            min: 0.0,
            max: 10_000_000.0,
        },
    ]
}

/// Facilities and the repair log against them.
pub struct FacilitiesScreen {
    facilities: ResourceStore<Facility>,
    repairs: ResourceStore<Repair>,
    mount: MountGuard,
}

impl FacilitiesScreen {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            facilities: ResourceStore::new(transport.clone()),
            repairs: ResourceStore::new(transport),
            mount: MountGuard::new(),
        }
    }

    pub async fn mount(&self) -> Result<()> {
        let (facilities, repairs) = tokio::join!(
            load_guarded(&self.facilities, &self.mount),
            load_guarded(&self.repairs, &self.mount),
        );
        facilities.context("loading facilities")?;
        repairs.context("loading repairs")?;
        Ok(())
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub fn facilities(&self) -> &ResourceStore<Facility> {
        &self.facilities
    }

    pub fn repairs(&self) -> &ResourceStore<Repair> {
        &self.repairs
    }

    pub fn new_facility(&self) -> FormSession<Facility> {
        FormSession::open_new(
            json!({"name": "", "description": "", "status": "Good"}),
            facility_rules(),
        )
    }

    pub fn new_repair(&self) -> FormSession<Repair> {
        FormSession::open_new(
            json!({"facility_id": "", "issue_reported": "", "cost": ""}),
            repair_rules(),
        )
    }

    /// Attaches a photo to ride along with a facility or repair.
    pub fn attach_photo<T: shule_sdk::Resource>(
        &self,
        form: &mut FormSession<T>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) {
        form.attach(FormField::file("image", filename, content_type, data));
    }

    /// Both submissions go out as multipart because of the photo field.
    pub async fn add_facility(&self, form: &mut FormSession<Facility>) -> Result<Facility> {
        form.submit_multipart(&self.facilities)
            .await
            .context("adding facility")
    }

    pub async fn log_repair(&self, form: &mut FormSession<Repair>) -> Result<Repair> {
        form.submit_multipart(&self.repairs)
            .await
            .context("logging repair")
    }

    /// Moves a repair through Pending → In Progress → Completed. The
    /// backend echoes the updated repair, which patches the local row.
    pub async fn set_repair_status(&self, id: &EntityId, status: &str) -> Result<Repair> {
        self.repairs
            .update(id, json!({"status": status}))
            .await
            .context("updating repair status")
    }
}
