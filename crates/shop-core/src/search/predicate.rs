//! Composable item filter.
//!
//! A [`Predicate`] is a plain list of [`Condition`]s joined by AND. The empty
//! predicate matches every item. Stores either evaluate it in process with
//! [`Predicate::matches`] or translate each condition into their own query
//! language.

use serde::{Deserialize, Serialize};

use super::criteria::ItemSearchCriteria;
use crate::domain::{Item, SellStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum Condition {
    NameEquals(String),
    /// Case-sensitive substring match on `detail`.
    DetailContains(String),
    /// Strictly greater than.
    PriceGreaterThan(i32),
    StatusEquals(SellStatus),
}

impl Condition {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Condition::NameEquals(name) => item.name == *name,
            Condition::DetailContains(fragment) => item.detail.contains(fragment.as_str()),
            Condition::PriceGreaterThan(price) => item.price > *price,
            Condition::StatusEquals(status) => item.sell_status == *status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    /// Matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.conditions.iter().all(|c| c.matches(item))
    }

    pub fn has_detail_filter(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| matches!(c, Condition::DetailContains(_)))
    }
}

/// Turns request criteria into a [`Predicate`]. Values are not validated;
/// a negative `min_price` is passed through as is.
pub struct PredicateBuilder;

impl PredicateBuilder {
    pub fn build(criteria: &ItemSearchCriteria) -> Predicate {
        let mut predicate = Predicate::all();

        if let Some(fragment) = criteria.detail_contains.as_deref() {
            if !fragment.is_empty() {
                predicate = predicate.and(Condition::DetailContains(fragment.to_string()));
            }
        }

        if let Some(price) = criteria.min_price {
            predicate = predicate.and(Condition::PriceGreaterThan(price));
        }

        // Only ON_SALE narrows the result; SOLD_OUT or nothing means both.
        if criteria.sell_status == Some(SellStatus::OnSale) {
            predicate = predicate.and(Condition::StatusEquals(SellStatus::OnSale));
        }

        predicate
    }
}

impl From<&ItemSearchCriteria> for Predicate {
    fn from(criteria: &ItemSearchCriteria) -> Self {
        PredicateBuilder::build(criteria)
    }
}
