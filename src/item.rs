//! Menu item records exchanged with the item repository

use serde::{Deserialize, Serialize};

/// Server-assigned identity of an item
pub type ItemId = i64;

/// A persisted menu item as listed by the repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub amount: u32,
}

impl Item {
    pub fn new(id: ItemId, name: &str, description: &str, price: f64, amount: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            amount,
        }
    }

    /// Strip the identity, e.g. to compare against a sent payload
    pub fn payload(&self) -> ItemPayload {
        ItemPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            amount: self.amount,
        }
    }
}

/// Item fields without identity, as sent on create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPayload {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub amount: u32,
}

impl ItemPayload {
    pub fn new(name: &str, description: &str, price: f64, amount: u32) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            price,
            amount,
        }
    }

    /// Attach an identity to this payload
    pub fn with_id(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_json_without_description() {
        let item: Item =
            serde_json::from_str(r#"{"id":3,"name":"Mocha","price":4.25,"amount":7}"#).unwrap();
        assert_eq!(item, Item::new(3, "Mocha", "", 4.25, 7));
    }

    #[test]
    fn test_payload_with_id() {
        let item = ItemPayload::new("Tea", "green", 1.5, 5).with_id(9);
        assert_eq!(item.id, 9);
        assert_eq!(item.payload(), ItemPayload::new("Tea", "green", 1.5, 5));
    }
}
