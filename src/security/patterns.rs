//! XSS signature patterns for rule-based detection.
//!
//! Each entry is one known attack-vector signature. An input is flagged
//! when ANY pattern matches anywhere in it (unanchored substring search,
//! case-insensitive).

use lazy_static::lazy_static;
use regex::Regex;

/// A single XSS signature
#[derive(Debug, Clone)]
pub struct XssPattern {
    /// Pattern name
    pub name: &'static str,
    /// Regex pattern
    pub pattern: &'static str,
    /// Description
    pub description: &'static str,
}

/// XSS signature catalog.
///
/// The scheme patterns (`javascript:`, `vbscript:`, `data:`) are
/// deliberately unanchored literal checks. `data:` in particular flags
/// benign prose containing the token; that over-broad match is a known
/// and accepted limitation of the heuristic, not a bug to tighten.
pub static XSS_PATTERNS: &[XssPattern] = &[
    XssPattern {
        name: "script_element",
        pattern: r"(?is)<script\b.*?</script>",
        description: "Complete <script> element",
    },
    XssPattern {
        name: "event_handler",
        pattern: r"(?i)on\w+\s*=",
        description: "HTML event handler attribute (onload=, onclick=, ...)",
    },
    XssPattern {
        name: "javascript_scheme",
        pattern: r"(?i)javascript\s*:",
        description: "javascript: URL scheme",
    },
    XssPattern {
        name: "vbscript_scheme",
        pattern: r"(?i)vbscript\s*:",
        description: "vbscript: URL scheme",
    },
    XssPattern {
        name: "data_scheme",
        pattern: r"(?i)data\s*:",
        description: "data: URL scheme (usable for script payloads)",
    },
    XssPattern {
        name: "img_javascript_src",
        pattern: r#"(?i)<img\s+[^>]*src\s*=\s*["']?[^"']*javascript:"#,
        description: "<img> with javascript: in src",
    },
    XssPattern {
        name: "iframe_javascript_src",
        pattern: r#"(?i)<iframe\s+[^>]*src\s*=\s*["']?[^"']*javascript:"#,
        description: "<iframe> with javascript: in src",
    },
    XssPattern {
        name: "css_expression",
        pattern: r"(?i)expression\s*\(",
        description: "CSS expression() call",
    },
    XssPattern {
        name: "svg_onload",
        pattern: r"(?i)<svg\s+[^>]*onload\s*=",
        description: "<svg> with onload attribute",
    },
    XssPattern {
        name: "alert_call",
        pattern: r"(?i)alert\s*\(",
        description: "alert() call (common proof-of-concept payload)",
    },
];

lazy_static! {
    /// Compiled XSS patterns, built once and shared read-only across threads
    pub static ref XSS_REGEX: Vec<(Regex, &'static XssPattern)> = {
        XSS_PATTERNS
            .iter()
            .filter_map(|p| Regex::new(p.pattern).ok().map(|r| (r, p)))
            .collect()
    };
}

/// Match input against all patterns, collecting every hit
pub fn match_patterns(input: &str) -> Vec<&'static XssPattern> {
    let mut matches = Vec::new();

    for (regex, pattern) in XSS_REGEX.iter() {
        if regex.is_match(input) {
            matches.push(*pattern);
        }
    }

    matches
}

/// Report whether the input matches at least one catalog pattern.
///
/// Total over all strings, pure, and deterministic. Short-circuits on the
/// first matching pattern; evaluation order does not affect the result.
pub fn detect(input: &str) -> bool {
    XSS_REGEX.iter().any(|(regex, _)| regex.is_match(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(XSS_REGEX.len(), XSS_PATTERNS.len());
    }

    #[test]
    fn test_script_element() {
        assert!(detect("<script>alert(1)</script>"));
        assert!(detect("before <SCRIPT src=x>\npayload\n</ScRiPt> after"));
    }

    #[test]
    fn test_event_handler() {
        let matches = match_patterns("<img src=x onerror=alert(1)>");
        assert!(matches.iter().any(|p| p.name == "event_handler"));
    }

    #[test]
    fn test_event_handler_without_boundary() {
        // Faithful to the heuristic: "on" may start mid-word.
        assert!(detect("money=5"));
    }

    #[test]
    fn test_schemes_case_insensitive() {
        assert!(detect("Visit JAVASCRIPT:alert('x')"));
        assert!(detect("vbscript : MsgBox"));
        assert!(detect("DATA:text/html;base64,PHN2Zz4="));
    }

    #[test]
    fn test_data_scheme_overmatch_is_expected() {
        // Known false positive, carried forward deliberately.
        assert!(detect("data: this looks like plain text"));
    }

    #[test]
    fn test_img_iframe_src() {
        assert!(detect(r#"<img alt=x src="javascript:alert(1)">"#));
        assert!(detect("<iframe width=1 src=javascript:alert(1)></iframe>"));
    }

    #[test]
    fn test_css_expression_and_svg() {
        assert!(detect("width: expression (alert(1))"));
        assert!(detect("<svg width=1 onload =alert(1)>"));
    }

    #[test]
    fn test_clean_text() {
        assert!(!detect(""));
        assert!(!detect("Hello, I loved the service!"));
        assert!(!detect("Great product, five stars. Would buy again."));
        assert!(match_patterns("ordinary text").is_empty());
    }
}
