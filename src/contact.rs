//! Contact information extraction
//!
//! Stateless pattern scanner. Each field tries an ordered list of patterns
//! from most specific (full URL) to least specific (bare username after a
//! label); the first candidate that passes the field validator wins. Absent
//! or malformed fields are simply omitted — extraction never fails.

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

pub struct ContactExtractor {
    email_patterns: Vec<Regex>,
    phone_patterns: Vec<Regex>,
    linkedin_patterns: Vec<Regex>,
    github_patterns: Vec<Regex>,
}

impl ContactExtractor {
    pub fn new() -> Self {
        let email_patterns = vec![
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")
                .expect("Invalid email regex"),
            Regex::new(r"[A-Za-z0-9._-]+@[A-Za-z0-9._-]+\.[A-Za-z0-9_-]+")
                .expect("Invalid loose email regex"),
        ];

        let phone_patterns = vec![
            // With country code: +1 (555) 123-4567, +44 20 7123 4567
            Regex::new(r"\+\d{1,3}[-. ]?\(?\d{2,4}\)?[-. ]?\d{3,4}[-. ]?\d{4}")
                .expect("Invalid intl phone regex"),
            // Domestic: (555) 123-4567 or 555-123-4567
            Regex::new(r"\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}").expect("Invalid phone regex"),
        ];

        let linkedin_patterns = vec![
            Regex::new(r"(?i)https?://(?:www\.)?linkedin\.com/in/([A-Za-z0-9_-]+)")
                .expect("Invalid linkedin url regex"),
            Regex::new(r"(?i)linkedin\.com/in/([A-Za-z0-9_-]+)")
                .expect("Invalid linkedin short regex"),
            Regex::new(r"(?i)linkedin[:\s]+/?([A-Za-z0-9_-]+)")
                .expect("Invalid linkedin label regex"),
        ];

        let github_patterns = vec![
            Regex::new(r"(?i)https?://(?:www\.)?github\.com/([A-Za-z0-9_-]+)")
                .expect("Invalid github url regex"),
            Regex::new(r"(?i)github\.com/([A-Za-z0-9_-]+)").expect("Invalid github short regex"),
            Regex::new(r"(?i)github[:\s]+/?([A-Za-z0-9_-]+)")
                .expect("Invalid github label regex"),
        ];

        Self {
            email_patterns,
            phone_patterns,
            linkedin_patterns,
            github_patterns,
        }
    }

    pub fn extract(&self, text: &str) -> ContactInfo {
        ContactInfo {
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            linkedin: self.extract_profile(&self.linkedin_patterns, text, "linkedin.com/in"),
            github: self.extract_profile(&self.github_patterns, text, "github.com"),
        }
    }

    fn extract_email(&self, text: &str) -> Option<String> {
        for pattern in &self.email_patterns {
            if let Some(m) = pattern.find(text) {
                let candidate: String = m
                    .as_str()
                    .trim_matches(|c| matches!(c, '<' | '>' | '(' | ')' | '[' | ']' | '{' | '}'))
                    .to_string();
                if is_valid_email(&candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    fn extract_phone(&self, text: &str) -> Option<String> {
        for pattern in &self.phone_patterns {
            for m in pattern.find_iter(text) {
                let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
                if (10..=15).contains(&digits.len()) {
                    return Some(normalize_phone(&digits, m.as_str().starts_with('+')));
                }
            }
        }
        None
    }

    fn extract_profile(&self, patterns: &[Regex], text: &str, url_base: &str) -> Option<String> {
        for pattern in patterns {
            if let Some(caps) = pattern.captures(text) {
                let username = caps.get(1)?.as_str();
                if is_valid_username(username) {
                    return Some(format!("https://{}/{}", url_base, username));
                }
            }
        }
        None
    }
}

impl Default for ContactExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_valid_email(candidate: &str) -> bool {
    candidate.len() > 5
        && candidate.matches('@').count() == 1
        && candidate.contains('.')
        && !candidate.starts_with('@')
        && !candidate.ends_with('.')
}

fn is_valid_username(username: &str) -> bool {
    username.len() >= 3
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Canonical punctuation form: `XXX-XXX-XXXX` for ten-digit numbers, with a
/// `+CC ` prefix when a country code is present.
fn normalize_phone(digits: &str, explicit_plus: bool) -> String {
    if digits.len() == 10 {
        return format!("{}-{}-{}", &digits[0..3], &digits[3..6], &digits[6..10]);
    }

    let (country, national) = digits.split_at(digits.len() - 10);
    if national.len() == 10 && (explicit_plus || country == "1") {
        return format!(
            "+{} {}-{}-{}",
            country,
            &national[0..3],
            &national[3..6],
            &national[6..10]
        );
    }

    format!("+{}", digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_all_fields() {
        let extractor = ContactExtractor::new();
        let text = "\
Jane Doe\n\
jane.doe@example.com | (555) 123-4567\n\
https://www.linkedin.com/in/janedoe | github.com/janedoe";

        let info = extractor.extract(text);
        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(info.phone.as_deref(), Some("555-123-4567"));
        assert_eq!(
            info.linkedin.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
        assert_eq!(info.github.as_deref(), Some("https://github.com/janedoe"));
    }

    #[test]
    fn test_absent_fields_are_none() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("No contact details in this text at all");

        assert_eq!(info, ContactInfo::default());
    }

    #[test]
    fn test_phone_normalization_with_country_code() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("Call +1 (555) 123-4567 anytime");
        assert_eq!(info.phone.as_deref(), Some("+1 555-123-4567"));
    }

    #[test]
    fn test_phone_with_too_few_digits_rejected() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("ref 123-4567");
        assert!(info.phone.is_none());
    }

    #[test]
    fn test_labeled_profile_without_url() {
        let extractor = ContactExtractor::new();
        let info = extractor.extract("LinkedIn: janedoe");
        assert_eq!(
            info.linkedin.as_deref(),
            Some("https://linkedin.com/in/janedoe")
        );
    }

    #[test]
    fn test_empty_text() {
        let extractor = ContactExtractor::new();
        assert_eq!(extractor.extract(""), ContactInfo::default());
    }
}
