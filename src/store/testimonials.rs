//! Customer testimonial store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// A customer testimonial
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Testimonial {
    /// Record id
    pub id: u64,
    /// Submitter display name
    pub name: String,
    /// Free-text review
    pub description: String,
    /// Star rating, 1..=5
    pub rating: u8,
    /// Submission time
    pub created_at: DateTime<Utc>,
}

/// Testimonials keyed by id
pub struct TestimonialStore {
    testimonials: Arc<RwLock<HashMap<u64, Testimonial>>>,
    next_id: AtomicU64,
}

impl Default for TestimonialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestimonialStore {
    /// Create empty store
    pub fn new() -> Self {
        Self {
            testimonials: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a new testimonial, stamped with the current time
    pub async fn create(&self, name: &str, description: &str, rating: u8) -> Testimonial {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let testimonial = Testimonial {
            id,
            name: name.to_string(),
            description: description.to_string(),
            rating,
            created_at: Utc::now(),
        };

        self.testimonials
            .write()
            .await
            .insert(id, testimonial.clone());
        testimonial
    }

    /// All testimonials, newest first
    pub async fn list(&self) -> Vec<Testimonial> {
        let mut all: Vec<_> = self.testimonials.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        all
    }

    /// Remove a testimonial, returning the record if it existed
    pub async fn remove(&self, id: u64) -> Option<Testimonial> {
        self.testimonials.write().await.remove(&id)
    }

    /// Number of testimonials
    pub async fn count(&self) -> usize {
        self.testimonials.read().await.len()
    }
}
