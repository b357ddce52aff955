//! Field normalization
//!
//! Every scalar copied into the carrier schema passes through [`clean`]:
//! surrounding whitespace is removed and a blank result becomes `None`, so
//! `None`, `""` and `"   "` all map to the same absent value. Content is
//! never case folded or re-encoded.
//!
//! Email, phone and postcode values are additionally checked against loose
//! format patterns. A value that fails its check is still used as-is; the
//! check only produces a [`FieldIssue`] for the diagnostic log.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9][0-9 ()/.\-]{2,}$").expect("phone pattern is valid")
});

static POSTCODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,11}$").expect("postcode pattern is valid")
});

/// Trim a value, mapping blank input to `None`
#[must_use]
pub fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Formats with a plausibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Email,
    Phone,
    Postcode,
}

impl FieldKind {
    fn pattern(self) -> &'static Regex {
        match self {
            Self::Email => &EMAIL,
            Self::Phone => &PHONE,
            Self::Postcode => &POSTCODE,
        }
    }

    /// Indefinite article for the kind's display name
    fn article(self) -> &'static str {
        match self {
            Self::Email => "an",
            Self::Phone | Self::Postcode => "a",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => write!(f, "email address"),
            Self::Phone => write!(f, "phone number"),
            Self::Postcode => write!(f, "postcode"),
        }
    }
}

/// A value that was mapped but does not look like its expected format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted path of the source field, e.g. `ShipTo.Email`
    pub field: &'static str,
    pub kind: FieldKind,
    pub value: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} value '{}' does not look like {} {}",
            self.field,
            self.value,
            self.kind.article(),
            self.kind
        )
    }
}

/// Check an already cleaned value against its format
#[must_use]
pub fn check(field: &'static str, kind: FieldKind, value: &str) -> Option<FieldIssue> {
    if kind.pattern().is_match(value) {
        None
    } else {
        Some(FieldIssue {
            field,
            kind,
            value: value.to_string(),
        })
    }
}

/// Clean a value and record an issue if it fails its format check
pub fn clean_checked(
    field: &'static str,
    kind: FieldKind,
    value: Option<&str>,
    issues: &mut Vec<FieldIssue>,
) -> Option<String> {
    let cleaned = clean(value);
    if let Some(issue) = cleaned.as_deref().and_then(|v| check(field, kind, v)) {
        issues.push(issue);
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_trims_any_whitespace_combination() {
        let inputs = [
            "12345",
            "12345                ",
            "        12345",
            "        12345                ",
            " 12345 ",
            "12345 ",
            " 12345",
            "\t12345\n",
        ];
        for input in inputs {
            assert_eq!(clean(Some(input)).as_deref(), Some("12345"), "{input:?}");
        }
    }

    #[test]
    fn test_clean_maps_blank_and_missing_identically() {
        assert_eq!(clean(None), None);
        assert_eq!(clean(Some("")), None);
        assert_eq!(clean(Some("   ")), None);
    }

    #[test]
    fn test_clean_keeps_inner_content() {
        assert_eq!(clean(Some("  GU10 2DZ ")).as_deref(), Some("GU10 2DZ"));
        assert_eq!(clean(Some(" MiXeD Case ")).as_deref(), Some("MiXeD Case"));
    }

    #[test]
    fn test_check_accepts_plausible_values() {
        assert!(check("ShipTo.Email", FieldKind::Email, "test@prodigi.com").is_none());
        assert!(check("ShipTo.Phone", FieldKind::Phone, "+49 (228) 182-0").is_none());
        assert!(check("ShipTo.Postcode", FieldKind::Postcode, "GU10 2DZ").is_none());
        assert!(check("ShipTo.Postcode", FieldKind::Postcode, "53113").is_none());
    }

    #[test]
    fn test_check_flags_implausible_values() {
        let issue = check("ShipTo.Email", FieldKind::Email, "not-an-email").unwrap();
        assert_eq!(issue.field, "ShipTo.Email");
        assert_eq!(
            issue.to_string(),
            "ShipTo.Email value 'not-an-email' does not look like an email address"
        );
        let phone = check("ShipTo.Phone", FieldKind::Phone, "call me").unwrap();
        assert_eq!(
            phone.to_string(),
            "ShipTo.Phone value 'call me' does not look like a phone number"
        );
        assert!(check("ShipTo.Postcode", FieldKind::Postcode, "#!").is_some());
    }

    #[test]
    fn test_clean_checked_keeps_value_and_records_issue() {
        let mut issues = Vec::new();
        let value = clean_checked(
            "Shipper.Email",
            FieldKind::Email,
            Some(" nobody "),
            &mut issues,
        );
        assert_eq!(value.as_deref(), Some("nobody"));
        assert_eq!(issues.len(), 1);

        let value = clean_checked("Shipper.Email", FieldKind::Email, Some("  "), &mut issues);
        assert!(value.is_none());
        assert_eq!(issues.len(), 1);
    }
}
