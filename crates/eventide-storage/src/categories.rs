//! Category catalog.

use std::sync::{Arc, RwLock};

use eventide_core::{Category, CategoryId, seeded_categories};

use crate::error::{StorageError, StorageResult};

/// Read access to the known event categories.
#[async_trait::async_trait]
pub trait CategoryCatalog: Send + Sync {
    /// Whether a category with this id exists.
    async fn exists(&self, id: CategoryId) -> StorageResult<bool>;

    /// Every known category.
    async fn list(&self) -> StorageResult<Vec<Category>>;
}

/// In-memory category catalog.
#[derive(Debug, Default)]
pub struct InMemoryCategoryCatalog {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the four standard categories.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            categories: RwLock::new(seeded_categories()),
        }
    }

    /// Add a category, replacing any with the same id.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Internal`] if the lock is poisoned.
    pub fn add(&self, category: Category) -> StorageResult<()> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| StorageError::Internal(format!("Failed to write categories: {e}")))?;
        categories.retain(|c| c.id != category.id);
        categories.push(category);
        Ok(())
    }

    /// Wrap in an Arc for sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait::async_trait]
impl CategoryCatalog for InMemoryCategoryCatalog {
    async fn exists(&self, id: CategoryId) -> StorageResult<bool> {
        let categories = self
            .categories
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to read categories: {e}")))?;
        Ok(categories.iter().any(|c| c.id == id))
    }

    async fn list(&self) -> StorageResult<Vec<Category>> {
        let categories = self
            .categories
            .read()
            .map_err(|e| StorageError::Internal(format!("Failed to read categories: {e}")))?;
        Ok(categories.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_catalog() {
        let catalog = InMemoryCategoryCatalog::seeded();
        let all = catalog.list().await.unwrap();
        assert_eq!(all.len(), 4);
        for category in &all {
            assert!(catalog.exists(category.id).await.unwrap());
        }
        assert!(!catalog.exists(CategoryId::generate()).await.unwrap());
        assert!(!catalog.exists(CategoryId::nil()).await.unwrap());
    }

    #[tokio::test]
    async fn test_add_category() {
        let catalog = InMemoryCategoryCatalog::new();
        let id = CategoryId::generate();
        catalog.add(Category::new(id, "Travel")).unwrap();
        catalog.add(Category::new(id, "Trips")).unwrap();

        let all = catalog.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Trips");
    }
}
