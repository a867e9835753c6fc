//! Scalar and grouped aggregations

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Expense, GroupField, GroupKey};

/// Reported change when the previous period had no spending and the
/// current one does. Avoids returning infinity.
pub const NEW_SPENDING_PERCENT: f64 = 100.0;

/// Summed amount for one group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: GroupKey,
    pub total: f64,
    pub count: usize,
}

/// A group's total relative to the largest group (0-100)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupShare {
    pub key: GroupKey,
    pub share: f64,
}

pub fn sum_amounts(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Mean amount per expense, 0 for an empty list
pub fn average_amount(expenses: &[Expense]) -> f64 {
    if expenses.is_empty() {
        0.0
    } else {
        sum_amounts(expenses) / expenses.len() as f64
    }
}

/// Sum amounts per distinct value of `field`
///
/// Groups appear in order of first occurrence. Expenses without a project
/// are grouped under [`GroupKey::Unassigned`].
pub fn group_sum_by_field(expenses: &[Expense], field: GroupField) -> Vec<GroupTotal> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal> = Vec::new();

    for expense in expenses {
        let key = expense.key(field);
        match index.get(&key) {
            Some(&i) => {
                groups[i].total += expense.amount;
                groups[i].count += 1;
            }
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupTotal {
                    key,
                    total: expense.amount,
                    count: 1,
                });
            }
        }
    }

    groups
}

/// Groups with a real label only (drops the no-project group)
pub fn named_groups(groups: &[GroupTotal]) -> Vec<GroupTotal> {
    groups
        .iter()
        .filter(|g| g.key != GroupKey::Unassigned)
        .cloned()
        .collect()
}

/// The `n` largest groups by total, descending. Ties keep input order.
pub fn top_groups(groups: &[GroupTotal], n: usize) -> Vec<GroupTotal> {
    let mut sorted = groups.to_vec();
    sorted.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sorted.truncate(n);
    sorted
}

/// Each group's total as a percentage of the largest total
pub fn relative_shares(groups: &[GroupTotal]) -> Vec<GroupShare> {
    let max = groups.iter().map(|g| g.total).fold(1.0_f64, f64::max);
    groups
        .iter()
        .map(|g| GroupShare {
            key: g.key.clone(),
            share: (g.total / max) * 100.0,
        })
        .collect()
}

/// Percent change from `previous` to `current`
///
/// - `previous > 0`: `(current - previous) / previous * 100`
/// - `previous == 0` and `current > 0`: [`NEW_SPENDING_PERCENT`]
/// - both zero: `None` (nothing to compare)
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous > 0.0 {
        Some(((current - previous) / previous) * 100.0)
    } else if current > 0.0 {
        Some(NEW_SPENDING_PERCENT)
    } else {
        None
    }
}
