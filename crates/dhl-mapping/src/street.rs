//! Street line splitting
//!
//! The carrier wants street name and house number as separate fields, while
//! upstream systems send a single free-text line. The split is taken from the
//! right-hand end of the line:
//!
//! 1. a trailing house-number token (`27`, `27-88`, `27a`) is the number;
//! 2. a house-number token followed by exactly one digit-free word
//!    (`35 street`) is the number together with that word;
//! 3. otherwise the whole line is the street name and the number is
//!    [`NO_STREET_NUMBER`].
//!
//! The number never starts the line, so `27 High street` keeps its leading
//! `27` as part of the name. When a number is found,
//! `format!("{} {}", name, number)` reproduces the trimmed line for
//! single-space separated input.

use regex::{Match, Regex};
use std::sync::LazyLock;

/// Street number used when the line carries no recognizable house number
pub const NO_STREET_NUMBER: &str = ".";

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+").expect("token pattern is valid"));

static HOUSE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(?:-[0-9]+)?[A-Za-z]?$").expect("house number pattern is valid")
});

/// Street name and house number split from one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreetParts<'a> {
    pub name: &'a str,
    pub number: &'a str,
}

impl StreetParts<'_> {
    /// True when a house number was found in the line
    #[must_use]
    pub fn has_number(&self) -> bool {
        self.number != NO_STREET_NUMBER
    }
}

/// Split a free-text street line into name and number.
///
/// Never fails: a line without a recognizable number comes back whole as the
/// name with [`NO_STREET_NUMBER`] as the number.
#[must_use]
pub fn split_street(line: &str) -> StreetParts<'_> {
    let line = line.trim();
    let tokens: Vec<Match<'_>> = TOKEN.find_iter(line).collect();

    match number_start(&tokens) {
        Some(start) => StreetParts {
            name: line[..start].trim_end(),
            number: &line[start..],
        },
        None => StreetParts {
            name: line,
            number: NO_STREET_NUMBER,
        },
    }
}

/// Street name part of a line
#[must_use]
pub fn street_name(line: &str) -> &str {
    split_street(line).name
}

/// House number part of a line, or [`NO_STREET_NUMBER`]
#[must_use]
pub fn street_number(line: &str) -> &str {
    split_street(line).number
}

/// Byte offset where the house number starts, if the line has one.
fn number_start(tokens: &[Match<'_>]) -> Option<usize> {
    match tokens {
        [_, .., last] if is_house_number(last) => Some(last.start()),
        [_, .., number, suffix] if is_house_number(number) && is_word(suffix) => {
            Some(number.start())
        }
        _ => None,
    }
}

fn is_house_number(token: &Match<'_>) -> bool {
    HOUSE_NUMBER.is_match(token.as_str())
}

fn is_word(token: &Match<'_>) -> bool {
    !token.as_str().chars().any(|c| c.is_ascii_digit())
}
