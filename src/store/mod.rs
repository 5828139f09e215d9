//! In-memory record stores.
//!
//! Each store is a `RwLock<HashMap>` keyed by a monotonically assigned id,
//! shared read-only-by-default across handlers. Records are cloned out of
//! the lock so no guard outlives a call.

mod products;
mod testimonials;
mod users;

pub use products::{Product, ProductPatch, ProductStore};
pub use testimonials::{Testimonial, TestimonialStore};
pub use users::{User, UserStore};
