//! Plan document CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Transaction};

use crate::{
    error::{DatabaseResultExt, DesignerError, Result},
    models::{FieldUpdate, Plan},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (author, name, document, created_at, updated_at) VALUES (?1, ?2, '{}', ?3, ?4)";
const SELECT_DOCUMENT_SQL: &str = "SELECT document FROM plans WHERE id = ?1";
const UPDATE_DOCUMENT_SQL: &str =
    "UPDATE plans SET name = ?1, document = ?2, updated_at = ?3 WHERE id = ?4";
const SELECT_ALL_DOCUMENTS_SQL: &str = "SELECT document FROM plans ORDER BY updated_at DESC, id DESC";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

/// Sortable column value of a timestamp.
fn epoch_millis(ts: Timestamp) -> i64 {
    ts.as_millisecond()
}

/// Local plan ids are the row ids rendered as strings.
fn row_id(id: &str) -> Option<i64> {
    id.parse::<i64>().ok().filter(|n| *n > 0)
}

/// Loads and decodes a plan document inside a transaction.
fn load_in_tx(tx: &Transaction<'_>, id: &str) -> Result<Plan> {
    let not_found = || DesignerError::PlanNotFound { id: id.to_string() };
    let row = row_id(id).ok_or_else(not_found)?;

    let document: Option<String> = tx
        .query_row(SELECT_DOCUMENT_SQL, params![row], |r| r.get(0))
        .optional()
        .db_context("Failed to query plan")?;

    let document = document.ok_or_else(not_found)?;
    Ok(serde_json::from_str(&document)?)
}

/// Writes a plan document back inside a transaction.
fn store_in_tx(tx: &Transaction<'_>, plan: &Plan) -> Result<()> {
    let row = row_id(&plan.id).ok_or_else(|| DesignerError::PlanNotFound {
        id: plan.id.clone(),
    })?;
    let document = serde_json::to_string(plan)?;

    tx.execute(
        UPDATE_DOCUMENT_SQL,
        params![plan.name, document, epoch_millis(plan.last_modified), row],
    )
    .db_context("Failed to update plan document")?;
    Ok(())
}

impl super::Database {
    /// Creates an empty plan owned by `author`.
    pub fn create_plan(&mut self, author: &str, name: &str) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = epoch_millis(Timestamp::now());
        tx.execute(INSERT_PLAN_SQL, params![author, name, now, now])
            .db_context("Failed to insert plan")?;

        let id = tx.last_insert_rowid();
        let plan = Plan::new(id.to_string(), author, name);
        store_in_tx(&tx, &plan)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(plan)
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, id: &str) -> Result<Option<Plan>> {
        let Some(row) = row_id(id) else {
            return Ok(None);
        };

        let document: Option<String> = self
            .connection
            .query_row(SELECT_DOCUMENT_SQL, params![row], |r| r.get(0))
            .optional()
            .db_context("Failed to query plan")?;

        document
            .map(|doc| serde_json::from_str(&doc).map_err(DesignerError::from))
            .transpose()
    }

    /// Applies a batch of field updates on behalf of `user`.
    ///
    /// The batch runs in one transaction: the write-access check, the
    /// application of every field and the document write either all succeed
    /// or nothing is changed.
    pub fn update_plan_fields(
        &mut self,
        id: &str,
        user: &str,
        updates: &[FieldUpdate],
    ) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan = load_in_tx(&tx, id)?;
        if !plan.can_write(user) {
            return Err(DesignerError::NotAuthorized { id: id.to_string() });
        }

        let mut updated = plan.with_updates(updates)?;
        updated.last_modified = Timestamp::now();
        store_in_tx(&tx, &updated)?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(updated)
    }

    /// Lists every plan `user` may read, most recently modified first.
    pub fn list_plans(&self, user: &str) -> Result<Vec<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ALL_DOCUMENTS_SQL)
            .db_context("Failed to prepare query")?;

        let documents = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<String>>>()
            .db_context("Failed to read plan rows")?;

        let mut plans = Vec::with_capacity(documents.len());
        for document in documents {
            let plan: Plan = serde_json::from_str(&document)?;
            if plan.can_read(user) {
                plans.push(plan);
            }
        }
        Ok(plans)
    }

    /// Permanently deletes a plan. Only the author may delete.
    pub fn delete_plan(&mut self, id: &str, user: &str) -> Result<Plan> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let plan = load_in_tx(&tx, id)?;
        if plan.author != user {
            return Err(DesignerError::NotAuthorized { id: id.to_string() });
        }

        let row = row_id(id).ok_or_else(|| DesignerError::PlanNotFound { id: id.to_string() })?;
        tx.execute(DELETE_PLAN_SQL, params![row])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;
    use crate::db::Database;

    fn set_last_modified(db: &mut Database, id: &str, at: &str) {
        let tx = db.connection.transaction().unwrap();
        let mut plan = load_in_tx(&tx, id).unwrap();
        plan.last_modified = at.parse().unwrap();
        store_in_tx(&tx, &plan).unwrap();
        tx.commit().unwrap();
    }

    #[test]
    fn test_list_orders_by_time_within_one_second() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut db = Database::new(temp_file.path()).unwrap();
        let older = db.create_plan("alice", "Older").unwrap();
        let newer = db.create_plan("alice", "Newer").unwrap();

        // As text, "45.12Z" sorts before "45.1Z"
        set_last_modified(&mut db, &older.id, "2024-05-01T10:00:45.1Z");
        set_last_modified(&mut db, &newer.id, "2024-05-01T10:00:45.12Z");

        let names: Vec<String> = db
            .list_plans("alice")
            .unwrap()
            .into_iter()
            .map(|plan| plan.name)
            .collect();
        assert_eq!(names, vec!["Newer", "Older"]);
    }
}
