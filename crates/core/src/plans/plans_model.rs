//! Plan reconciliation models.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RETENTION_YEARS;
use crate::errors::{Error, Result};
use crate::expenses::ExpenseRecord;

/// Number of most recent plan years kept on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPolicy {
    window_years: u32,
}

impl RetentionPolicy {
    pub fn new(window_years: u32) -> Result<Self> {
        if window_years == 0 {
            return Err(Error::InvalidConfigValue(
                "retention window must keep at least one year".to_string(),
            ));
        }
        Ok(Self { window_years })
    }

    pub fn window_years(&self) -> u32 {
        self.window_years
    }

    /// Oldest year still retained after saving `saved_year`; anything strictly
    /// older is purged.
    pub fn oldest_retained_year(&self, saved_year: i32) -> i32 {
        let window = i32::try_from(self.window_years).unwrap_or(i32::MAX);
        saved_year.saturating_sub(window).saturating_add(1)
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            window_years: DEFAULT_RETENTION_YEARS,
        }
    }
}

/// Operations needed to make the persisted plan match the working set.
#[derive(Debug, Clone, Default)]
pub struct PlanDiff {
    pub to_insert: Vec<ExpenseRecord>,
    pub to_update: Vec<ExpenseRecord>,
    pub to_delete: Vec<String>,
}

impl PlanDiff {
    pub fn is_empty(&self) -> bool {
        self.to_insert.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Partitions the working set against the persisted identifiers of the year.
///
/// Records whose stable id is among `persisted_ids` are updated. Drafts and
/// records carrying an id unknown to the year are inserted. Persisted ids
/// missing from the working set are deleted, in their original order.
pub fn diff_plan(persisted_ids: &[String], working_set: Vec<ExpenseRecord>) -> PlanDiff {
    let persisted: HashSet<&str> = persisted_ids.iter().map(String::as_str).collect();
    let mut kept: HashSet<String> = HashSet::new();
    let mut diff = PlanDiff::default();

    for record in working_set {
        match record.id.as_persisted() {
            Some(id) if persisted.contains(id) => {
                kept.insert(id.to_string());
                diff.to_update.push(record);
            }
            _ => diff.to_insert.push(record),
        }
    }

    diff.to_delete = persisted_ids
        .iter()
        .filter(|id| !kept.contains(id.as_str()))
        .cloned()
        .collect();
    diff
}

/// Summary of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
    /// Records removed by the retention purge. Zero when the purge failed.
    pub purged: usize,
}
