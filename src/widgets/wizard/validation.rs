use super::{Field, LeadFields};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// `local@domain.tld`, no whitespace, exactly one `@`.
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE
        .as_ref()
        .is_some_and(|re| re.is_match(raw.trim()))
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Fields that block leaving `step`. Empty means the gate is open.
///
/// Unknown steps have no requirements.
pub fn validate_step(step: u8, fields: &LeadFields) -> BTreeSet<Field> {
    let mut invalid = BTreeSet::new();
    match step {
        1 => {
            if blank(&fields.first_name) {
                invalid.insert(Field::FirstName);
            }
            if blank(&fields.last_name) {
                invalid.insert(Field::LastName);
            }
            if !is_valid_email(&fields.email) {
                invalid.insert(Field::Email);
            }
            // The hidden code is what counts; the mark goes on the visible
            // search field.
            if fields.country_code.as_deref().is_none_or(blank) {
                invalid.insert(Field::Country);
            }
            if fields.intent.is_none() {
                invalid.insert(Field::Intent);
            }
        }
        2 => {
            if !fields.consent {
                invalid.insert(Field::Consent);
            }
        }
        _ => {}
    }
    invalid
}
