use super::normalize;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shule_sdk::{EntityId, Resource};

/// One student's fee position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeRecord {
    pub id: EntityId,
    #[serde(default)]
    pub student_id: Option<EntityId>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub amount_paid: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub amount_pending: f64,
    #[serde(default, deserialize_with = "normalize::loose_bool")]
    pub is_paid: bool,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "normalize::date")]
    pub payment_date: Option<NaiveDate>,
}

impl Resource for FeeRecord {
    const ENDPOINT: &'static str = "/api/finance";

    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.student_name, &self.first_name, &self.last_name]
    }

    fn facet(&self, key: &str) -> Option<String> {
        match key {
            "payment" => Some(if self.is_paid { "paid" } else { "pending" }.to_string()),
            _ => None,
        }
    }
}

/// One payment transaction, read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub transaction_no: i64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default, deserialize_with = "normalize::money")]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default, deserialize_with = "normalize::date")]
    pub date: Option<NaiveDate>,
}

impl Resource for Transaction {
    const ENDPOINT: &'static str = "/api/transactions";

    fn id(&self) -> EntityId {
        EntityId::Int(self.transaction_no)
    }

    fn search_text(&self) -> Vec<&str> {
        vec![&self.student_name, &self.reference]
    }
}
