use super::{load_guarded, MountGuard};
use crate::model::{FeeRecord, FeeSummaryRow, Transaction};
use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use shule_sdk::{
    form::{check_rules, FieldRule},
    get_as, ClientError, EntityId, Method, RequestBody, ResourceStore, Transport,
};
use std::sync::Arc;

/// Client-side rollup of the fee records currently loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeSummary {
    pub total_fees: f64,
    pub amount_paid: f64,
    pub current_balance: f64,
    pub overdue_count: usize,
    pub overdue_amount: f64,
}

fn payment_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::Required("amount_paid"),
        FieldRule::Required("payment_method"),
        FieldRule::NumericRange {
            field: "amount_paid",
            min: 1.0,
            max: 100_000_000.0,
        },
    ]
}

/// Fee tracking: the per-student fee positions, the payment operation
/// and the read-only transaction ledger.
pub struct FinanceScreen {
    fees: ResourceStore<FeeRecord>,
    transactions: ResourceStore<Transaction>,
    mount: MountGuard,
}

impl FinanceScreen {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            fees: ResourceStore::new(transport.clone()),
            transactions: ResourceStore::new(transport),
            mount: MountGuard::new(),
        }
    }

    pub async fn mount(&self) -> Result<()> {
        let (fees, transactions) = tokio::join!(
            load_guarded(&self.fees, &self.mount),
            load_guarded(&self.transactions, &self.mount),
        );
        fees.context("loading fee records")?;
        transactions.context("loading transactions")?;
        Ok(())
    }

    pub fn unmount(&self) {
        self.mount.unmount();
    }

    pub fn fees(&self) -> &ResourceStore<FeeRecord> {
        &self.fees
    }

    pub fn transactions(&self) -> &ResourceStore<Transaction> {
        &self.transactions
    }

    /// Sums over the loaded records. A record with anything pending
    /// counts as overdue.
    pub async fn summary(&self) -> FeeSummary {
        let records = self.fees.snapshot().await;
        let mut summary = FeeSummary::default();
        for record in &records {
            summary.total_fees += record.total_amount;
            summary.amount_paid += record.amount_paid;
            summary.current_balance += record.amount_pending;
            if record.amount_pending > 0.0 {
                summary.overdue_count += 1;
                summary.overdue_amount += record.amount_pending;
            }
        }
        summary
    }

    /// Records a payment against a student's fees, then refreshes both
    /// the fee positions and the ledger from the backend.
    pub async fn pay(
        &self,
        student_id: &EntityId,
        amount_paid: &str,
        payment_method: &str,
        reference: &str,
    ) -> Result<Value> {
        let mut draft = Map::new();
        draft.insert("student_id".into(), json!(student_id));
        draft.insert("amount_paid".into(), json!(amount_paid));
        draft.insert("payment_method".into(), json!(payment_method));
        draft.insert("reference".into(), json!(reference));

        let errors = check_rules(&draft, &payment_rules());
        if !errors.is_empty() {
            return Err(ClientError::ValidationFailed(errors).into());
        }

        let echoed = self
            .fees
            .transport()
            .request(
                Method::Post,
                "/api/finance/fees/pay",
                RequestBody::Json(Value::Object(draft)),
            )
            .await
            .context("submitting payment")?;

        let (fees, transactions) = tokio::join!(self.fees.load(), self.transactions.load());
        fees.context("refreshing fee records")?;
        transactions.context("refreshing transactions")?;
        Ok(echoed)
    }

    /// Per-department fee rollup from the backend.
    pub async fn fees_summary(&self) -> Result<Vec<FeeSummaryRow>> {
        get_as(&*self.fees.transport(), "/api/finance/fees-summary")
            .await
            .context("loading fees summary")
    }
}
