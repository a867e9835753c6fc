//! Domain models for Tally
//!
//! Expense records are owned by the backend. This crate only reads them,
//! so every field is tolerant of the loose shapes the backend emits
//! (`_id` instead of `id`, empty project strings, ISO timestamps).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(alias = "_id", default)]
    pub id: String,
    pub amount: f64,
    pub category: String,
    #[serde(
        default,
        deserialize_with = "deserialize_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Calendar date; `None` when the backend value was missing or unparseable
    #[serde(default, with = "lenient_date")]
    pub date: Option<NaiveDate>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category: category.into(),
            project: None,
            description: None,
            date,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = normalize_label(Some(project.into()));
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Grouping key for a field. Missing or blank projects map to
    /// [`GroupKey::Unassigned`].
    pub fn key(&self, field: GroupField) -> GroupKey {
        match field {
            GroupField::Category => GroupKey::Label(self.category.clone()),
            GroupField::Project => match self.project.as_deref().map(str::trim) {
                Some(p) if !p.is_empty() => GroupKey::Label(p.to_string()),
                _ => GroupKey::Unassigned,
            },
        }
    }

    fn key_matches(&self, field: GroupField, key: &GroupKey) -> bool {
        match (field, key) {
            (GroupField::Category, GroupKey::Label(label)) => self.category == *label,
            (GroupField::Category, GroupKey::Unassigned) => false,
            (GroupField::Project, _) => self.key(GroupField::Project) == *key,
        }
    }

    /// Whether this expense matches a selector on the given field
    pub fn matches(&self, field: GroupField, selector: &Selector) -> bool {
        match selector {
            Selector::All => true,
            Selector::Only(key) => self.key_matches(field, key),
        }
    }
}

/// Field used to bucket expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupField {
    Category,
    Project,
}

impl GroupField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Project => "project",
        }
    }
}

impl std::str::FromStr for GroupField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "project" => Ok(Self::Project),
            _ => Err(format!("Unknown field: {} (valid: category, project)", s)),
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value of a grouping field
///
/// `Unassigned` is the "no project" group. It can never collide with a real
/// label, including one literally spelled "No project".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupKey {
    Label(String),
    Unassigned,
}

impl GroupKey {
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label),
            Self::Unassigned => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => write!(f, "{}", label),
            Self::Unassigned => write!(f, "(no project)"),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// Equality selector for a category or project filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selector {
    /// No-op filter
    #[default]
    All,
    /// Exact, case-sensitive match on the key
    Only(GroupKey),
}

impl Selector {
    pub fn label(label: impl Into<String>) -> Self {
        Self::Only(GroupKey::Label(label.into()))
    }

    pub fn unassigned() -> Self {
        Self::Only(GroupKey::Unassigned)
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// The signed-in user as returned by `GET /getUser`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    /// Display-only currency code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

/// Body for creating an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub amount: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The backend uses today's date when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Partial update for an expense; only `Some` fields are sent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.category.is_none()
            && self.project.is_none()
            && self.description.is_none()
            && self.date.is_none()
    }
}

/// Authenticated session, passed explicitly to whatever fetches expenses
#[derive(Clone)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("token", &"<redacted>").finish()
    }
}

/// Parse an expense date: `YYYY-MM-DD`, RFC 3339, or a naive ISO timestamp.
///
/// The calendar date written in the value is used as-is; timestamps are not
/// shifted into another zone.
pub fn parse_expense_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn normalize_label(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn deserialize_label<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(normalize_label)
}

/// Serde adapter that never fails on a bad date
mod lenient_date {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_some(&d.format("%Y-%m-%d").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        let parsed = raw
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(parse_expense_date);
        if parsed.is_none() {
            if let Some(value) = raw.as_ref().filter(|v| !v.is_null() && v.as_str() != Some("")) {
                tracing::warn!(%value, "Unparseable expense date, treating as undated");
            }
        }
        Ok(parsed)
    }
}
