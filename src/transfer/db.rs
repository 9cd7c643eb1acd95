//! Transfer persistence layer
//!
//! Status transitions use conditional updates (`WHERE status = expected`,
//! checking the affected-row count) so concurrent calls against the same
//! transfer cannot both advance it.

use sqlx::{PgPool, Row, postgres::PgRow};

use super::error::WorkflowError;
use super::state::TransferStatus;
use super::types::{RegisteredBill, TransferId, TransferRecord};

const TRANSFER_COLUMNS: &str = "id, sender_id, custodian_id, declared_amount, \
     transaction_date, cash_photo_url, status, created_at";

/// Transfer database operations
pub struct TransferDb {
    pool: PgPool,
}

impl TransferDb {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new transfer row in DECLARED state
    pub async fn create(&self, record: &TransferRecord) -> Result<(), WorkflowError> {
        sqlx::query(
            r#"
            INSERT INTO transfers
                (id, sender_id, custodian_id, declared_amount, transaction_date,
                 cash_photo_url, status, created_at)
            VALUES ($1, $2, $3, $4, $5, NULL, $6, NOW())
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.sender_id.to_string())
        .bind(record.custodian_id.to_string())
        .bind(record.declared_amount)
        .bind(record.transaction_date)
        .bind(record.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get a transfer by id
    pub async fn get(&self, id: &TransferId) -> Result<Option<TransferRecord>, WorkflowError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM transfers WHERE id = $1",
            TRANSFER_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    /// Register counted bills and flip the transfer to CASH_REGISTERED,
    /// all inside a single transaction.
    ///
    /// The status flip is a conditional update on `status = 'DECLARED'`; if
    /// zero rows are affected another call won the race and the whole batch
    /// is rolled back. A duplicate serial_code aborts the batch with a
    /// distinct error. No partial bill set is ever persisted.
    pub async fn register_cash(
        &self,
        transfer_id: &TransferId,
        bills: &[RegisteredBill],
        cash_photo_url: &str,
    ) -> Result<u64, WorkflowError> {
        let mut tx = self.pool.begin().await?;

        for bill in bills {
            let insert = sqlx::query(
                r#"
                INSERT INTO registered_bills (id, transfer_id, denomination, serial_code)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(bill.id.to_string())
            .bind(transfer_id.to_string())
            .bind(bill.denomination)
            .bind(&bill.serial_code)
            .execute(&mut *tx)
            .await;

            if let Err(e) = insert {
                let mapped = match &e {
                    sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                        WorkflowError::DuplicateSerial(bill.serial_code.clone())
                    }
                    _ => WorkflowError::Database(e),
                };
                rollback(tx).await?;
                return Err(mapped);
            }
        }

        let update = sqlx::query(
            r#"
            UPDATE transfers
            SET status = $1, cash_photo_url = $2
            WHERE id = $3 AND status = $4
            "#,
        )
        .bind(TransferStatus::CashRegistered.as_str())
        .bind(cash_photo_url)
        .bind(transfer_id.to_string())
        .bind(TransferStatus::Declared.as_str())
        .execute(&mut *tx)
        .await;

        match update {
            Ok(result) if result.rows_affected() > 0 => {
                tx.commit().await?;
                Ok(bills.len() as u64)
            }
            Ok(_) => {
                // Lost the race: a concurrent call moved the transfer out of
                // DECLARED after our precondition check.
                rollback(tx).await?;
                Err(WorkflowError::StatusChanged {
                    expected: TransferStatus::Declared,
                })
            }
            Err(e) => {
                rollback(tx).await?;
                Err(WorkflowError::Database(e))
            }
        }
    }

    /// Conditional state transition: succeeds only when the transfer is
    /// still in `expected`. Returns false when another call got there first.
    pub async fn update_status_if(
        &self,
        transfer_id: &TransferId,
        expected: TransferStatus,
        new: TransferStatus,
    ) -> Result<bool, WorkflowError> {
        let result = sqlx::query(
            r#"
            UPDATE transfers
            SET status = $1
            WHERE id = $2 AND status = $3
            "#,
        )
        .bind(new.as_str())
        .bind(transfer_id.to_string())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count bills registered against a transfer
    pub async fn bill_count(&self, transfer_id: &TransferId) -> Result<i64, WorkflowError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM registered_bills WHERE transfer_id = $1",
        )
        .bind(transfer_id.to_string())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Roll back explicitly so a rollback failure is surfaced, not swallowed.
async fn rollback(tx: sqlx::Transaction<'_, sqlx::Postgres>) -> Result<(), WorkflowError> {
    if let Err(e) = tx.rollback().await {
        tracing::error!(error = %e, "Transaction rollback failed");
        return Err(WorkflowError::Database(e));
    }
    Ok(())
}

fn row_to_record(row: &PgRow) -> Result<TransferRecord, WorkflowError> {
    let id_str: String = row.get("id");
    let id = id_str
        .parse()
        .map_err(|_| WorkflowError::Corrupt(format!("invalid transfer id: {}", id_str)))?;

    let sender_str: String = row.get("sender_id");
    let sender_id = sender_str
        .parse()
        .map_err(|_| WorkflowError::Corrupt(format!("invalid sender id: {}", sender_str)))?;

    let custodian_str: String = row.get("custodian_id");
    let custodian_id = custodian_str
        .parse()
        .map_err(|_| WorkflowError::Corrupt(format!("invalid custodian id: {}", custodian_str)))?;

    let status_str: String = row.get("status");
    let status = TransferStatus::from_db(&status_str)
        .ok_or_else(|| WorkflowError::Corrupt(format!("invalid status: {}", status_str)))?;

    Ok(TransferRecord {
        id,
        sender_id,
        custodian_id,
        declared_amount: row.get("declared_amount"),
        transaction_date: row.get("transaction_date"),
        cash_photo_url: row.get("cash_photo_url"),
        status,
        created_at: row.get("created_at"),
    })
}
