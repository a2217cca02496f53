//! Inventory system.

use cuties_common::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Inventory error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// Not enough items
    #[error("Not enough {item}: need {needed}, have {have}")]
    NotEnough {
        /// Item that ran short
        item: ItemId,
        /// Amount needed
        needed: u32,
        /// Amount available
        have: u32,
    },
    /// A stored count of zero, which a valid inventory never holds
    #[error("Zero quantity stored for {0}")]
    ZeroQuantity(ItemId),
}

/// Result type for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Item counts held by the player.
///
/// Only positive counts are stored; removing the last unit drops the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BTreeMap<ItemId, u32>", try_from = "BTreeMap<ItemId, u32>")]
pub struct Inventory {
    items: BTreeMap<ItemId, u32>,
}

impl TryFrom<BTreeMap<ItemId, u32>> for Inventory {
    type Error = InventoryError;

    fn try_from(items: BTreeMap<ItemId, u32>) -> Result<Self, Self::Error> {
        if let Some((&item, _)) = items.iter().find(|(_, &count)| count == 0) {
            return Err(InventoryError::ZeroQuantity(item));
        }
        Ok(Self { items })
    }
}

impl From<Inventory> for BTreeMap<ItemId, u32> {
    fn from(inventory: Inventory) -> Self {
        inventory.items
    }
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if nothing is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the count of a specific item.
    #[must_use]
    pub fn count(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    /// Checks if the inventory contains at least the given amount.
    #[must_use]
    pub fn has(&self, item: ItemId, amount: u32) -> bool {
        self.count(item) >= amount
    }

    /// Checks every `(item, amount)` pair, reporting the first shortfall.
    pub fn check_all(&self, requirements: &[(ItemId, u32)]) -> InventoryResult<()> {
        for &(item, needed) in requirements {
            if !self.has(item, needed) {
                return Err(InventoryError::NotEnough {
                    item,
                    needed,
                    have: self.count(item),
                });
            }
        }
        Ok(())
    }

    /// Adds items to the inventory. Adding zero is a no-op.
    pub fn add(&mut self, item: ItemId, amount: u32) {
        if amount == 0 {
            return;
        }
        let slot = self.items.entry(item).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    /// Removes items from the inventory.
    pub fn remove(&mut self, item: ItemId, amount: u32) -> InventoryResult<()> {
        let current = self.count(item);
        if current < amount {
            return Err(InventoryError::NotEnough {
                item,
                needed: amount,
                have: current,
            });
        }
        if current == amount {
            self.items.remove(&item);
        } else {
            self.items.insert(item, current - amount);
        }
        Ok(())
    }

    /// Returns an iterator over all items in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.items.iter().map(|(&id, &count)| (id, count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_count() {
        let mut inv = Inventory::new();
        inv.add(ItemId::WoundFeet, 2);
        inv.add(ItemId::WoundFeet, 1);
        assert_eq!(inv.count(ItemId::WoundFeet), 3);
        assert_eq!(inv.count(ItemId::Axe), 0);
    }

    #[test]
    fn test_add_zero_stores_nothing() {
        let mut inv = Inventory::new();
        inv.add(ItemId::Spear, 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_remove_last_unit_drops_entry() {
        let mut inv = Inventory::new();
        inv.add(ItemId::ToxicTongue, 1);
        assert!(inv.remove(ItemId::ToxicTongue, 1).is_ok());
        assert!(inv.is_empty());
        assert_eq!(inv.iter().count(), 0);
    }

    #[test]
    fn test_remove_not_enough() {
        let mut inv = Inventory::new();
        inv.add(ItemId::FeverFang, 1);
        let result = inv.remove(ItemId::FeverFang, 2);
        assert_eq!(
            result,
            Err(InventoryError::NotEnough {
                item: ItemId::FeverFang,
                needed: 2,
                have: 1,
            })
        );
        assert_eq!(inv.count(ItemId::FeverFang), 1);
    }

    #[test]
    fn test_check_all_reports_first_shortfall() {
        let mut inv = Inventory::new();
        inv.add(ItemId::WoundFeet, 1);
        assert!(inv.check_all(&[(ItemId::WoundFeet, 1)]).is_ok());
        assert!(matches!(
            inv.check_all(&[(ItemId::WoundFeet, 1), (ItemId::ToxicTongue, 1)]),
            Err(InventoryError::NotEnough {
                item: ItemId::ToxicTongue,
                needed: 1,
                have: 0,
            })
        ));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let mut inv = Inventory::new();
        inv.add(ItemId::Axe, 2);
        let json = serde_json::to_string(&inv).expect("serialize inventory");
        assert_eq!(json, r#"{"axe":2}"#);
        let back: Inventory = serde_json::from_str(&json).expect("deserialize inventory");
        assert_eq!(back, inv);
    }

    #[test]
    fn test_deserialize_rejects_zero_count() {
        let result = serde_json::from_str::<Inventory>(r#"{"axe":1,"spear":0}"#);
        let err = result.expect_err("zero count must be rejected");
        assert!(err.to_string().contains("Zero quantity stored for Spear"));
    }
}
