use crate::{Error, Result};
use crate::record::{
    NewStudent, Student, StudentId, StudentPatch, validate_age, validate_grade, validate_name,
};
use itertools::Itertools;
use std::num::NonZero;

/// The in-memory record store: an insertion-ordered collection of
/// [`Student`] records with store-assigned, session-unique identifiers.
///
/// Identifiers are monotonic and never reused within a session, even after
/// deletes. After a reload the counter resumes past the highest persisted id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Roster {
    records: Vec<Student>,
    next_id: u64,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        return Self::default();
    }

    /// Rebuilds a roster from previously persisted records, preserving their
    /// order and ids.
    ///
    /// # Errors
    /// - [`Error::Validation`] on the `id` field when the records carry
    ///   duplicate ids
    pub fn from_records(records: Vec<Student>) -> Result<Self> {
        let duplicates: Vec<StudentId> = records.iter().map(|s| s.id).duplicates().collect();
        if !duplicates.is_empty() {
            return Err(Error::Validation {
                field: "id",
                reason: format!("duplicate id(s) in records: [{duplicates:?}]"),
            });
        }

        let next_id = records.iter().map(|s| s.id.get()).max().unwrap_or(0);
        return Ok(Self { records, next_id });
    }

    /// Validates `fields`, assigns the next free id, and appends the new
    /// record, returning a reference to it.
    ///
    /// # Errors
    /// - [`Error::Validation`] on any malformed field; the collection is
    ///   left unchanged
    /// - [`Error::Validation`] on the `id` field when the id space is
    ///   exhausted (the counter sits at `u64::MAX`)
    pub fn add(&mut self, fields: NewStudent) -> Result<&Student> {
        let id = self
            .next_id
            .checked_add(1)
            .and_then(NonZero::new)
            .ok_or(Error::Validation {
                field: "id",
                reason: format!("id space exhausted at [{}]", self.next_id),
            })?;
        let student = Student::validated(id, fields)?;

        self.next_id = id.get();
        self.records.push(student);
        return Ok(self.records.last().expect("Record should exist as it was just pushed."));
    }

    /// Applies `patch` to the record with the given id. All provided fields
    /// are validated before any of them is assigned, so a failed update
    /// leaves the record exactly as it was.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if no record has the id
    /// - [`Error::Validation`] on any malformed field
    pub fn update(&mut self, id: StudentId, patch: StudentPatch) -> Result<&Student> {
        if self.get(id).is_none() {
            return Err(Error::NotFound { id });
        }

        let name = patch.name.as_deref().map(validate_name).transpose()?;
        let age = patch.age.map(validate_age).transpose()?;
        let grade = patch.grade.map(validate_grade).transpose()?;

        let record = self
            .records
            .iter_mut()
            .find(|s| s.id == id)
            .expect("Record should exist as it was checked before.");

        if let Some(name) = name {
            record.name = name;
        }
        if let Some(age) = age {
            record.age = age;
        }
        if let Some(grade) = grade {
            record.grade = grade;
        }

        return Ok(record);
    }

    /// Removes and returns the record with the given id. Deleting the same
    /// id twice fails the second time with no side effect.
    ///
    /// # Errors
    /// - [`Error::NotFound`] if no record has the id
    pub fn delete(&mut self, id: StudentId) -> Result<Student> {
        let position = self
            .records
            .iter()
            .position(|s| s.id == id)
            .ok_or(Error::NotFound { id })?;

        return Ok(self.records.remove(position));
    }

    /// Returns the record with the given id, if present.
    pub fn get(&self, id: StudentId) -> Option<&Student> {
        return self.records.iter().find(|s| s.id == id);
    }

    /// Lazily yields the records whose name contains `query`,
    /// case-insensitively, in collection order. An empty query matches
    /// every record; a query with no matches yields nothing.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Student> {
        let query = query.trim().to_lowercase();
        return self
            .records
            .iter()
            .filter(move |s| s.name.to_lowercase().contains(&query));
    }

    /// The full collection in insertion order.
    pub fn list_all(&self) -> &[Student] {
        return &self.records;
    }

    /// Mean grade over the collection, or `None` when it is empty.
    pub fn average_grade(&self) -> Option<f32> {
        if self.records.is_empty() {
            return None;
        }

        let sum: f32 = self.records.iter().map(|s| s.grade).sum();
        return Some(sum / self.records.len() as f32);
    }

    pub fn len(&self) -> usize {
        return self.records.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.records.is_empty();
    }
}
