//! Save reconciliation
//!
//! Saving happens in two phases. [`plan_save`] is synchronous: it validates
//! every committed row and splits them into creates and updates, or aborts
//! before any call is made. [`execute`] then talks to the repository:
//!
//! 1. creates, one at a time in row order (each awaited before the next)
//! 2. updates, all at once
//! 3. a full reload, whose listing replaces the grid
//!
//! A failure in step 1 or 2 is not rolled back; retrying re-diffs against the
//! unchanged baseline and resends only what is still pending.

use futures_util::future::join_all;
use thiserror::Error;

use super::model::{GridModel, Row};
use super::validation::{parse_amount, parse_price, Column};
use crate::item::{Item, ItemId, ItemPayload};
use crate::repository::{ItemRepository, RepositoryError};

/// Why a save did not complete
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SaveError {
    /// A committed row fails validation; `row` is 1-based
    #[error("Row {row} has invalid data. Fix errors before saving.")]
    Validation { row: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SaveError {
    /// Text for the grid's error banner
    pub fn user_message(&self) -> String {
        match self {
            SaveError::Validation { .. } => self.to_string(),
            SaveError::Repository(err) => err.user_message(),
        }
    }
}

/// Repository writes needed to persist the grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavePlan {
    /// New rows in row order
    pub creates: Vec<ItemPayload>,
    /// Modified existing rows
    pub updates: Vec<(ItemId, ItemPayload)>,
}

impl SavePlan {
    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.creates.len() + self.updates.len()
    }
}

/// Typed payload for a row, or `None` if any column fails its rule
///
/// Name and description are sent trimmed.
pub fn row_payload(row: &Row) -> Option<ItemPayload> {
    let name = row[Column::Name.index()].value.trim();
    if name.is_empty() {
        return None;
    }
    let description = row[Column::Description.index()].value.trim();
    let price = parse_price(&row[Column::Price.index()].value)?;
    let amount = parse_amount(&row[Column::Amount.index()].value)?;
    Some(ItemPayload::new(name, description, price, amount))
}

/// Validate every committed row and partition them into creates and updates
///
/// Unmodified existing rows are skipped. The first invalid row aborts the
/// whole plan.
pub fn plan_save(model: &GridModel) -> Result<SavePlan, SaveError> {
    let mut plan = SavePlan::default();

    for (index, row) in model.data_rows().iter().enumerate() {
        let payload = row_payload(row).ok_or(SaveError::Validation { row: index + 1 })?;

        match model.backing_id(index) {
            None => plan.creates.push(payload),
            Some(id) if model.is_row_modified(index) => plan.updates.push((id, payload)),
            Some(_) => {}
        }
    }

    tracing::debug!(
        "Save plan: {} creates, {} updates",
        plan.creates.len(),
        plan.updates.len()
    );
    Ok(plan)
}

/// Run a plan against the repository and return the fresh listing
///
/// Updates all settle before the first failure (in plan order) is reported.
pub async fn execute(plan: &SavePlan, repo: &dyn ItemRepository) -> Result<Vec<Item>, SaveError> {
    tracing::info!(
        creates = plan.creates.len(),
        updates = plan.updates.len(),
        "Saving items"
    );

    for payload in &plan.creates {
        match repo.create_item(payload).await {
            Ok(item) => tracing::debug!("Created item {} ({})", item.id, item.name),
            Err(err) => {
                tracing::warn!("Create of {:?} failed: {}", payload.name, err);
                return Err(err.into());
            }
        }
    }

    if !plan.updates.is_empty() {
        let results = join_all(
            plan.updates
                .iter()
                .map(|(id, payload)| repo.update_item(*id, payload)),
        )
        .await;

        let mut first_error = None;
        for ((id, _), result) in plan.updates.iter().zip(results) {
            match result {
                Ok(()) => tracing::debug!("Updated item {}", id),
                Err(err) => {
                    tracing::warn!("Update of item {} failed: {}", id, err);
                    first_error.get_or_insert(err);
                }
            }
        }
        if let Some(err) = first_error {
            return Err(err.into());
        }
    }

    let items = repo.list_items().await.map_err(|err| {
        tracing::error!("Reload after save failed: {}", err);
        SaveError::from(err)
    })?;
    tracing::info!("Save complete, reloaded {} items", items.len());
    Ok(items)
}

/// Plan and execute in one step
pub async fn save(model: &GridModel, repo: &dyn ItemRepository) -> Result<Vec<Item>, SaveError> {
    let plan = plan_save(model)?;
    execute(&plan, repo).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryRepository, RepositoryCall};

    fn coffee() -> Item {
        Item::new(1, "Coffee", "Hot", 2.5, 10)
    }

    #[test]
    fn test_plan_skips_unmodified_rows() {
        let model = GridModel::from_items(&[coffee()]);
        let plan = plan_save(&model).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_partitions_rows() {
        let mut model = GridModel::from_items(&[coffee(), Item::new(2, "Tea", "", 1.0, 3)]);
        model.commit_cell(1, 2, "$1.25");
        model.begin_new_row(2);
        model.commit_cell(2, 0, "  Mocha ");
        model.commit_cell(2, 2, "4");
        model.commit_cell(2, 3, "7");

        let plan = plan_save(&model).unwrap();
        assert_eq!(plan.creates, vec![ItemPayload::new("Mocha", "", 4.0, 7)]);
        assert_eq!(plan.updates, vec![(2, ItemPayload::new("Tea", "", 1.25, 3))]);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_plan_aborts_on_first_invalid_row() {
        let mut model = GridModel::from_items(&[coffee()]);
        model.begin_new_row(1);
        let err = plan_save(&model).unwrap_err();
        assert_eq!(err, SaveError::Validation { row: 2 });
        assert_eq!(
            err.user_message(),
            "Row 2 has invalid data. Fix errors before saving."
        );
    }

    #[test]
    fn test_row_payload_rejects_overflowing_amount() {
        let mut model = GridModel::from_items(&[coffee()]);
        model.commit_cell(0, 3, "99999999999");
        assert!(row_payload(&model.rows()[0]).is_none());
    }

    #[tokio::test]
    async fn test_empty_plan_still_reloads() {
        let repo = InMemoryRepository::with_items(vec![coffee()]);
        let items = execute(&SavePlan::default(), &repo).await.unwrap();
        assert_eq!(items, vec![coffee()]);
        assert_eq!(repo.calls().await, vec![RepositoryCall::List]);
    }

    #[tokio::test]
    async fn test_failed_create_skips_updates_and_reload() {
        let repo = InMemoryRepository::with_items(vec![coffee()]);
        repo.fail_create_named("Tea", RepositoryError::Rejected("nope".into()))
            .await;
        let plan = SavePlan {
            creates: vec![ItemPayload::new("Tea", "", 1.5, 5)],
            updates: vec![(1, ItemPayload::new("Coffee", "Hot", 3.0, 10))],
        };

        let err = execute(&plan, &repo).await.unwrap_err();
        assert_eq!(err.user_message(), "nope");
        assert_eq!(
            repo.calls().await,
            vec![RepositoryCall::Create(ItemPayload::new("Tea", "", 1.5, 5))]
        );
    }
}
