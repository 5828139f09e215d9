//! Product catalog store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Record id
    pub id: u64,
    /// Display name
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Price in minor units
    pub price: i64,
    /// Stored image filename
    pub image: String,
}

impl Product {
    /// Site-relative URL path of the product image
    pub fn image_path(&self) -> String {
        format!("/uploads/{}", self.image)
    }
}

/// Partial update applied to an existing product
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub image: Option<String>,
}

/// Products keyed by id
pub struct ProductStore {
    products: Arc<RwLock<HashMap<u64, Product>>>,
    next_id: AtomicU64,
}

impl Default for ProductStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductStore {
    /// Create empty store
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a new product
    pub async fn create(&self, name: &str, description: &str, price: i64, image: &str) -> Product {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let product = Product {
            id,
            name: name.to_string(),
            description: description.to_string(),
            price,
            image: image.to_string(),
        };

        self.products.write().await.insert(id, product.clone());
        product
    }

    /// Look up by id
    pub async fn get(&self, id: u64) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }

    /// All products, oldest first
    pub async fn list(&self) -> Vec<Product> {
        let mut products: Vec<_> = self.products.read().await.values().cloned().collect();
        products.sort_by_key(|p| p.id);
        products
    }

    /// Apply a partial update. Returns the previous record alongside the
    /// updated one so the caller can clean up a replaced image file.
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Option<(Product, Product)> {
        let mut products = self.products.write().await;
        let product = products.get_mut(&id)?;
        let previous = product.clone();

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(image) = patch.image {
            product.image = image;
        }

        Some((previous, product.clone()))
    }

    /// Remove by id, returning the removed record
    pub async fn remove(&self, id: u64) -> Option<Product> {
        self.products.write().await.remove(&id)
    }

    /// Number of products
    pub async fn count(&self) -> usize {
        self.products.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_get_list() {
        let store = ProductStore::new();

        let a = store.create("Mug", "Ceramic mug", 1500, "a.png").await;
        let b = store.create("Cap", "Cotton cap", 2500, "b.jpg").await;

        assert_eq!(store.get(a.id).await.unwrap().name, "Mug");
        assert!(store.get(99).await.is_none());

        let all = store.list().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[1].id, b.id);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let store = ProductStore::new();
        let product = store.create("Mug", "Ceramic mug", 1500, "a.png").await;

        let patch = ProductPatch {
            price: Some(1800),
            image: Some("b.png".to_string()),
            ..Default::default()
        };
        let (previous, updated) = store.update(product.id, patch).await.unwrap();

        assert_eq!(previous.image, "a.png");
        assert_eq!(updated.image, "b.png");
        assert_eq!(updated.price, 1800);
        assert_eq!(updated.name, "Mug");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let store = ProductStore::new();
        assert!(store.update(7, ProductPatch::default()).await.is_none());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = ProductStore::new();
        let product = store.create("Mug", "Ceramic mug", 1500, "a.png").await;

        let removed = store.remove(product.id).await.unwrap();
        assert_eq!(removed.image, "a.png");
        assert_eq!(store.count().await, 0);
    }

    #[test]
    fn test_image_path() {
        let product = Product {
            id: 1,
            name: "Mug".to_string(),
            description: String::new(),
            price: 0,
            image: "abc123.png".to_string(),
        };

        assert_eq!(product.image_path(), "/uploads/abc123.png");
    }
}
