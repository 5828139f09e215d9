//! XSS detector used as a pre-commit gate on free-text fields.

use super::patterns::{detect, match_patterns, XssPattern};

/// Result of scanning one string
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Input matched no catalog pattern
    pub clean: bool,
    /// Patterns that hit
    pub matches: Vec<&'static XssPattern>,
}

impl ScanReport {
    /// Create clean result
    pub fn clean() -> Self {
        Self {
            clean: true,
            matches: vec![],
        }
    }

    /// Create flagged result
    pub fn flagged(matches: Vec<&'static XssPattern>) -> Self {
        Self {
            clean: false,
            matches,
        }
    }
}

/// Pattern-based XSS detector.
///
/// Stateless after catalog initialization; safe to share across any number
/// of concurrent callers without synchronization. Results are a pure
/// function of the input and the catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct XssDetector;

impl XssDetector {
    /// Create new detector
    pub fn new() -> Self {
        Self
    }

    /// Classify one string. Total over all strings; never fails.
    pub fn detect(&self, input: &str) -> bool {
        detect(input)
    }

    /// Scan one string, naming every pattern that hit
    pub fn scan(&self, input: &str) -> ScanReport {
        let matches = match_patterns(input);

        if matches.is_empty() {
            ScanReport::clean()
        } else {
            ScanReport::flagged(matches)
        }
    }

    /// Gate a set of named free-text fields.
    ///
    /// Returns the name of the first flagged field, or `None` when every
    /// field is clean. Callers must abort the whole operation on `Some`
    /// before any persistence occurs.
    pub fn first_flagged_field<'a>(&self, fields: &[(&'a str, &str)]) -> Option<&'a str> {
        fields
            .iter()
            .find(|(_, value)| self.detect(value))
            .map(|(name, _)| *name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_clean_and_flagged() {
        let detector = XssDetector::new();

        assert!(!detector.detect(""));
        assert!(!detector.detect("Hello, I loved the service!"));
        assert!(detector.detect("<script>alert(1)</script>"));
        assert!(detector.detect("<img src=x onerror=alert(1)>"));
    }

    #[test]
    fn test_scan_names_patterns() {
        let detector = XssDetector::new();
        let report = detector.scan("<script>alert(1)</script>");

        assert!(!report.clean);
        // Matches both the script element and the alert() heuristic.
        assert!(report.matches.iter().any(|p| p.name == "script_element"));
        assert!(report.matches.iter().any(|p| p.name == "alert_call"));
    }

    #[test]
    fn test_scan_clean() {
        let detector = XssDetector::new();
        let report = detector.scan("ordinary testimonial text");

        assert!(report.clean);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn test_first_flagged_field() {
        let detector = XssDetector::new();

        let clean = [("name", "Alice"), ("description", "Great service")];
        assert_eq!(detector.first_flagged_field(&clean), None);

        let dirty = [
            ("name", "Alice"),
            ("description", "<svg onload=alert(1)>"),
        ];
        assert_eq!(detector.first_flagged_field(&dirty), Some("description"));
    }

    #[test]
    fn test_detect_is_deterministic() {
        let detector = XssDetector::new();
        let input = "Visit JAVASCRIPT:alert('x')";

        assert_eq!(detector.detect(input), detector.detect(input));
    }

    #[test]
    fn test_detect_concurrent_callers() {
        let handles: Vec<_> = (0..16)
            .map(|i| {
                std::thread::spawn(move || {
                    let detector = XssDetector::new();
                    let flagged = format!("<script>alert({i})</script>");
                    let clean = format!("review number {i}");
                    for _ in 0..100 {
                        assert!(detector.detect(&flagged));
                        assert!(!detector.detect(&clean));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
