use crate::{Deserialize, Error, Result, Serialize};
use std::num::NonZero;

/// Unique identifier of a [`Student`], assigned by the roster and immutable afterwards.
pub type StudentId = NonZero<u64>;

/// One student's stored data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: u8,
    pub grade: f32,
}

impl Student {
    /// Builds a record from already-assigned `id` and caller-supplied fields,
    /// running every field validation first.
    ///
    /// # Errors
    /// - [`Error::Validation`] on any malformed field
    pub fn validated(id: StudentId, fields: NewStudent) -> Result<Self> {
        return Ok(Self {
            id,
            name: validate_name(&fields.name)?,
            age: validate_age(fields.age)?,
            grade: validate_grade(fields.grade)?,
        });
    }
}

/// Caller-supplied fields for [`Roster::add`](crate::roster::Roster::add).
#[derive(Clone, Debug, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub age: u8,
    pub grade: f32,
}

/// Partial update for [`Roster::update`](crate::roster::Roster::update).
///
/// Only the fields set to `Some` are validated and applied; the rest of the
/// record is left as-is. A patch with every field `None` is a no-op that
/// still requires the id to exist.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<u8>,
    pub grade: Option<f32>,
}

/// Validates and normalizes a student name.
///
/// The name is trimmed and title-cased. Empty names and names consisting
/// solely of digits are rejected.
///
/// # Errors
/// - [`Error::Validation`]
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(Error::Validation {
            field: "name",
            reason: "must not be empty".into(),
        });
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::Validation {
            field: "name",
            reason: format!("must not be purely numeric: [{trimmed}]"),
        });
    }

    return Ok(title_case(trimmed));
}

/// Validates an age, which must lie in `1..=149`.
///
/// # Errors
/// - [`Error::Validation`]
pub fn validate_age(age: u8) -> Result<u8> {
    if !(1..150).contains(&age) {
        return Err(Error::Validation {
            field: "age",
            reason: format!("must be between 1 and 149, got [{age}]"),
        });
    }

    return Ok(age);
}

/// Validates a grade, which must be a finite number in `0.0..=20.0`.
///
/// # Errors
/// - [`Error::Validation`]
pub fn validate_grade(grade: f32) -> Result<f32> {
    if !grade.is_finite() || !(0.0..=20.0).contains(&grade) {
        return Err(Error::Validation {
            field: "grade",
            reason: format!("must be between 0.0 and 20.0, got [{grade}]"),
        });
    }

    return Ok(grade);
}

/// Uppercases the first letter of each whitespace-separated word and
/// lowercases the rest, collapsing runs of whitespace to a single space.
fn title_case(name: &str) -> String {
    return name
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");
}
