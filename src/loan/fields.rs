use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const MESSAGE_NAME_CONSTRAINTS: &str =
    "Names should only contain alphanumeric characters and spaces, and it should not be blank";
pub const MESSAGE_PHONE_CONSTRAINTS: &str =
    "Phone numbers should only contain numbers, and it should be at least 3 digits long";
pub const MESSAGE_TAG_CONSTRAINTS: &str = "Tags names should be alphanumeric";

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{Alphabetic}\p{Nd}][\p{Alphabetic}\p{Nd} ]*$").expect("name pattern"));
static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3,}$").expect("phone pattern"));
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{Alphabetic}\p{Nd}]+$").expect("tag pattern"));

/// Debtor name. Equality is exact: case and trailing spaces matter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn parse(value: &str) -> Option<Self> {
        NAME_PATTERN.is_match(value).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Name::parse(&value).ok_or(MESSAGE_NAME_CONSTRAINTS)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

const EMPTY_PHONE_DISPLAY: &str = "--------";

/// Contact number; `Empty` stands in for a loan recorded without one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Phone {
    #[default]
    Empty,
    Number(String),
}

impl Phone {
    /// An empty string clears the phone; anything else must be at least three digits.
    pub fn parse(value: &str) -> Option<Self> {
        if value.is_empty() {
            return Some(Phone::Empty);
        }
        PHONE_PATTERN
            .is_match(value)
            .then(|| Phone::Number(value.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Phone::Empty)
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phone::Empty => f.write_str(EMPTY_PHONE_DISPLAY),
            Phone::Number(number) => f.write_str(number),
        }
    }
}

impl TryFrom<String> for Phone {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == EMPTY_PHONE_DISPLAY {
            return Ok(Phone::Empty);
        }
        Phone::parse(&value).ok_or(MESSAGE_PHONE_CONSTRAINTS)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        match phone {
            Phone::Empty => String::new(),
            Phone::Number(number) => number,
        }
    }
}

/// Free-form label. Keeps the spelling it was typed with but compares,
/// hashes and orders case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag {
    label: String,
    key: String,
}

impl Tag {
    pub fn parse(value: &str) -> Option<Self> {
        let label = value.trim();
        TAG_PATTERN.is_match(label).then(|| Self {
            label: label.to_string(),
            key: label.to_lowercase(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Collects tags into a set. Of two case-equal tags the first spelling is kept.
pub fn tag_set<I: IntoIterator<Item = Tag>>(tags: I) -> BTreeSet<Tag> {
    let mut set = BTreeSet::new();
    for tag in tags {
        set.insert(tag);
    }
    set
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label)
    }
}

impl TryFrom<String> for Tag {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Tag::parse(&value).ok_or(MESSAGE_TAG_CONSTRAINTS)
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.label
    }
}
