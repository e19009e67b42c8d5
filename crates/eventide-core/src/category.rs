//! Event categories.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::CategoryId;

/// A category events can be filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
}

impl Category {
    /// Create a category.
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// The categories every fresh catalog starts with.
#[must_use]
pub fn seeded_categories() -> Vec<Category> {
    [
        (0x1111_1111_1111_1111_1111_1111_1111_1111_u128, "Home"),
        (0x2222_2222_2222_2222_2222_2222_2222_2222_u128, "Personal"),
        (0x3333_3333_3333_3333_3333_3333_3333_3333_u128, "Office"),
        (0x4444_4444_4444_4444_4444_4444_4444_4444_u128, "Business"),
    ]
    .into_iter()
    .map(|(id, name)| Category::new(CategoryId::from_uuid(Uuid::from_u128(id)), name))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_categories() {
        let categories = seeded_categories();
        assert_eq!(categories.len(), 4);

        let home = &categories[0];
        assert_eq!(home.name, "Home");
        assert_eq!(home.id.to_string(), "11111111-1111-1111-1111-111111111111");

        let business = &categories[3];
        assert_eq!(business.name, "Business");
        assert_eq!(
            business.id.to_string(),
            "44444444-4444-4444-4444-444444444444"
        );
    }
}
