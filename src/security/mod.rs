//! XSS input screening for free-text fields.
//!
//! This module classifies strings as "suspicious" or "clean" against a
//! fixed catalog of cross-site-scripting indicators. It is a heuristic
//! pre-commit gate, not an HTML sanitizer: it never mutates input, only
//! reports whether a known attack signature appears anywhere in it.
//!
//! # Catalog
//!
//! | Pattern                | Example trigger                     |
//! |------------------------|-------------------------------------|
//! | `script_element`       | `<script>alert(1)</script>`         |
//! | `event_handler`        | `onerror=`, `onclick=`              |
//! | `javascript_scheme`    | `javascript:alert(1)`               |
//! | `vbscript_scheme`      | `vbscript:MsgBox`                   |
//! | `data_scheme`          | `data:text/html;base64,...`         |
//! | `img_javascript_src`   | `<img src="javascript:...">`        |
//! | `iframe_javascript_src`| `<iframe src=javascript:...>`       |
//! | `css_expression`       | `expression(alert(1))`              |
//! | `svg_onload`           | `<svg onload=alert(1)>`             |
//! | `alert_call`           | `alert(1)`                          |
//!
//! All matching is case-insensitive and unanchored. The catalog is
//! compiled once on first use and shared read-only across threads; the
//! `regex` engine guarantees linear-time matching, so no evaluation
//! timeout is needed.
//!
//! # Usage
//!
//! ```rust,ignore
//! use storefront::security::XssDetector;
//!
//! let detector = XssDetector::new();
//! assert!(detector.detect("<script>alert(1)</script>"));
//! assert!(!detector.detect("Hello, I loved the service!"));
//!
//! // Gate named fields before persisting
//! let fields = [("name", "Alice"), ("description", "<svg onload=x>")];
//! if let Some(field) = detector.first_flagged_field(&fields) {
//!     // Reject the whole write, reporting `field`
//! }
//! ```

mod detector;
mod patterns;

pub use detector::{ScanReport, XssDetector};
pub use patterns::{detect, match_patterns, XssPattern, XSS_PATTERNS};
