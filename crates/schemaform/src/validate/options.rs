//! Tunables of the heuristic checks.

use std::sync::LazyLock;

use regex::Regex;

pub const DEFAULT_EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const DEFAULT_PHONE_DIGITS: usize = 10;
pub const DEFAULT_PHONE_KEYWORDS: &[&str] = &["phone", "mobile"];
pub const DEFAULT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

static DEFAULT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_EMAIL_PATTERN).expect("default email pattern is a valid regex")
});

#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Pattern a text value containing `@` must match.
    pub email_pattern: Regex,
    /// Digits required by the phone heuristic.
    pub phone_digits: usize,
    /// Name fragments (case-insensitive) that mark a numeric field as a phone.
    pub phone_keywords: Vec<String>,
    /// `chrono` formats tried after RFC 3339 when parsing dates.
    pub date_formats: Vec<String>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            email_pattern: DEFAULT_EMAIL.clone(),
            phone_digits: DEFAULT_PHONE_DIGITS,
            phone_keywords: DEFAULT_PHONE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ValidationOptions {
    /// Replace the email pattern.
    pub fn with_email_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.email_pattern = Regex::new(pattern)?;
        Ok(self)
    }
}
