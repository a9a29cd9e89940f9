use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::gateway::LeadPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    CompanyName,
    Name,
    Email,
    Concerns,
}

impl LeadField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyName => "会社名",
            Self::Name => "氏名",
            Self::Email => "メールアドレス",
            Self::Concerns => "悩み・ご要望（自由記述）",
        }
    }
}

/// Per-field validation failure, surfaced inline next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("required")]
    Required,
    #[error("format")]
    Format,
}

impl ValidationError {
    pub fn message_for(&self, field: LeadField) -> &'static str {
        match (field, self) {
            (LeadField::CompanyName, _) => "会社名を入力してください",
            (LeadField::Name, _) => "氏名を入力してください",
            (LeadField::Email, ValidationError::Required) => "メールアドレスを入力してください",
            (LeadField::Email, ValidationError::Format) => "有効なメールアドレスを入力してください",
            (LeadField::Concerns, _) => "入力内容を確認してください",
        }
    }
}

/// Every failing field from one submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<LeadField, ValidationError>,
}

impl ValidationErrors {
    pub fn get(&self, field: LeadField) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (LeadField, ValidationError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    pub(crate) fn insert(&mut self, field: LeadField, error: ValidationError) {
        self.errors.insert(field, error);
    }

    pub(crate) fn remove(&mut self, field: LeadField) -> Option<ValidationError> {
        self.errors.remove(&field)
    }

    /// JSON-ready map of field -> {code, message}.
    pub fn view(&self) -> BTreeMap<LeadField, FieldErrorView> {
        self.fields()
            .map(|(field, error)| {
                (
                    field,
                    FieldErrorView {
                        code: error,
                        message: error.message_for(field),
                    },
                )
            })
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self
            .fields()
            .map(|(field, error)| format!("{}: {error}", field.label()))
            .collect();
        write!(f, "lead form is invalid ({})", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldErrorView {
    pub code: ValidationError,
    pub message: &'static str,
}

/// Order-sheet fields as entered by the prospect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub concerns: String,
}

impl LeadForm {
    pub fn value(&self, field: LeadField) -> &str {
        match field {
            LeadField::CompanyName => &self.company_name,
            LeadField::Name => &self.name,
            LeadField::Email => &self.email,
            LeadField::Concerns => &self.concerns,
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let value = value.into();
        match field {
            LeadField::CompanyName => self.company_name = value,
            LeadField::Name => self.name = value,
            LeadField::Email => self.email = value,
            LeadField::Concerns => self.concerns = value,
        }
    }

    pub fn is_blank(&self) -> bool {
        [
            LeadField::CompanyName,
            LeadField::Name,
            LeadField::Email,
            LeadField::Concerns,
        ]
        .iter()
        .all(|field| self.value(*field).is_empty())
    }

    /// Validate every field at once and build the outbound payload.
    pub fn validate(&self) -> Result<LeadPayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.company_name.trim().is_empty() {
            errors.insert(LeadField::CompanyName, ValidationError::Required);
        }
        if self.name.trim().is_empty() {
            errors.insert(LeadField::Name, ValidationError::Required);
        }
        if self.email.trim().is_empty() {
            errors.insert(LeadField::Email, ValidationError::Required);
        } else if !is_valid_email(&self.email) {
            errors.insert(LeadField::Email, ValidationError::Format);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LeadPayload {
            company: self.company_name.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.concerns.clone(),
        })
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

/// `local@domain.tld` shape check; deliverability is not verified.
pub fn is_valid_email(candidate: &str) -> bool {
    email_pattern().is_match(candidate)
}
