// src/membership.rs
//
// Pending set of option groups linked to one product.

use std::collections::BTreeSet;

use crate::api::{self, ApiClient};
use crate::error::ApiError;
use crate::models::Product;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipDiff {
    pub added: Vec<i32>,
    pub removed: Vec<i32>,
}

impl MembershipDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Starts from the server's linked set, toggles locally, and is committed
/// as one full-replace `link_options` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionMembership {
    product_id: i32,
    original: BTreeSet<i32>,
    pending: BTreeSet<i32>,
}

impl OptionMembership {
    pub fn new(product_id: i32, linked: impl IntoIterator<Item = i32>) -> Self {
        let original: BTreeSet<i32> = linked.into_iter().collect();
        Self {
            product_id,
            pending: original.clone(),
            original,
        }
    }

    pub fn from_product(product: &Product) -> Self {
        Self::new(product.id, product.options.iter().map(|o| o.id))
    }

    pub fn product_id(&self) -> i32 {
        self.product_id
    }

    /// Flips membership of `option_id`; returns whether it is now selected.
    pub fn toggle(&mut self, option_id: i32) -> bool {
        if self.pending.remove(&option_id) {
            false
        } else {
            self.pending.insert(option_id);
            true
        }
    }

    pub fn contains(&self, option_id: i32) -> bool {
        self.pending.contains(&option_id)
    }

    pub fn selected(&self) -> Vec<i32> {
        self.pending.iter().copied().collect()
    }

    pub fn diff_from_original(&self) -> MembershipDiff {
        MembershipDiff {
            added: self.pending.difference(&self.original).copied().collect(),
            removed: self.original.difference(&self.pending).copied().collect(),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.pending != self.original
    }

    /// Replaces the product's linked set with the pending one.
    pub async fn save(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        api::products::link_options(client, self.product_id, self.selected()).await?;
        self.original = self.pending.clone();
        Ok(())
    }
}
