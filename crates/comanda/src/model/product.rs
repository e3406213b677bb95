use serde::{Deserialize, Serialize};

/// One item on the menu.
///
/// Products are catalog rows, not actor-managed entities: the menu is fixed
/// at startup and shared read-only, so a plain `u32` id (the number printed
/// on the menu) is identity enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: String,
}

impl Product {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            description: description.into(),
        }
    }
}
