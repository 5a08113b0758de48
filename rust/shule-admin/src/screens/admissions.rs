//! The two-step admission application.
//!
//! Step 1 collects personal details, step 2 the academic choices. Each
//! step validates before the wizard advances, and the final submit
//! re-validates everything before the registration endpoint is called.
//! The program and intake selects are seeded from their reference
//! collections on mount.

use super::{load_guarded, MountGuard};
use crate::model::{Course, Intake};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use shule_sdk::{
    form::{check_rules, FieldRule, ValidationErrors},
    ClientError, Method, RequestBody, ResourceStore, Transport,
};
use std::sync::Arc;

pub const TOTAL_STEPS: usize = 2;

const REGISTER_ENDPOINT: &str = "/api/students/register";

fn step_rules(step: usize) -> Vec<FieldRule> {
    match step {
        1 => vec![
            FieldRule::Required("firstName"),
            FieldRule::Required("lastName"),
            FieldRule::Required("idNumber"),
            FieldRule::Required("gender"),
            FieldRule::Required("county"),
            FieldRule::Required("phone"),
            FieldRule::Required("email"),
        ],
        _ => vec![
            FieldRule::Required("programChoice"),
            FieldRule::Required("intakeYear"),
        ],
    }
}

pub struct AdmissionWizard {
    transport: Arc<dyn Transport>,
    courses: ResourceStore<Course>,
    intakes: ResourceStore<Intake>,
    draft: Map<String, Value>,
    step: usize,
    errors: ValidationErrors,
    mount: MountGuard,
}

impl AdmissionWizard {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            courses: ResourceStore::new(transport.clone()),
            intakes: ResourceStore::new(transport.clone()),
            transport,
            draft: Map::new(),
            step: 1,
            errors: ValidationErrors::default(),
            mount: MountGuard::new(),
        }
    }

    /// Loads the reference collections behind the program and intake
    /// selects.
    pub async fn mount(&self) -> Result<()> {
        let (courses, intakes) = tokio::join!(
            load_guarded(&self.courses, &self.mount),
            load_guarded(&self.intakes, &self.mount),
        );
        courses.context("loading courses")?;
        intakes.context("loading intakes")?;
        Ok(())
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub async fn programs(&self) -> Vec<Course> {
        self.courses.snapshot().await
    }

    pub async fn intakes(&self) -> Vec<Intake> {
        self.intakes.snapshot().await
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Completion share for the progress bar.
    pub fn progress(&self) -> f64 {
        self.step as f64 / TOTAL_STEPS as f64 * 100.0
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.errors.remove(&name);
        self.draft.insert(name, value.into());
    }

    pub fn text(&self, name: &str) -> &str {
        match self.draft.get(name) {
            Some(Value::String(s)) => s.as_str(),
            _ => "",
        }
    }

    /// Validates the fields belonging to the current step.
    pub fn validate_step(&mut self) -> &ValidationErrors {
        self.errors = check_rules(&self.draft, &step_rules(self.step));
        &self.errors
    }

    /// Advances when the current step validates; stays put otherwise.
    pub fn next(&mut self) -> bool {
        if !self.validate_step().is_empty() {
            return false;
        }
        if self.step < TOTAL_STEPS {
            self.step += 1;
        }
        true
    }

    pub fn back(&mut self) {
        if self.step > 1 {
            self.step -= 1;
        }
    }

    /// Submits the application. Every step's rules are re-checked first;
    /// the registration endpoint is only called on a clean draft. On
    /// success the wizard resets to a blank step 1.
    pub async fn submit(&mut self) -> Result<Value, ClientError> {
        let mut errors = ValidationErrors::default();
        for step in 1..=TOTAL_STEPS {
            for (field, message) in check_rules(&self.draft, &step_rules(step)).iter() {
                errors.insert(field, message);
            }
        }
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(ClientError::ValidationFailed(errors));
        }

        let echoed = self
            .transport
            .request(
                Method::Post,
                REGISTER_ENDPOINT,
                RequestBody::Json(Value::Object(self.draft.clone())),
            )
            .await?;

        self.draft.clear();
        self.errors = ValidationErrors::default();
        self.step = 1;
        Ok(echoed)
    }
}
