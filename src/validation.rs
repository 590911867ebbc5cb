//! Field-level validation results handed back with rejected forms.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Itemised validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Creates an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against `field`.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// Returns `true` when no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when `field` has at least one error.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the messages recorded against `field`.
    #[must_use]
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Returns the names of the fields with errors, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A submitted form that failed validation.
///
/// The form is returned exactly as submitted so the caller can re-display
/// it next to the errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected<F> {
    form: F,
    errors: FieldErrors,
}

impl<F> Rejected<F> {
    /// Pairs a submitted form with its validation errors.
    #[must_use]
    pub const fn new(form: F, errors: FieldErrors) -> Self {
        Self { form, errors }
    }

    /// Returns the form as submitted.
    #[must_use]
    pub const fn form(&self) -> &F {
        &self.form
    }

    /// Returns the validation errors.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Splits the rejection into its form and errors.
    #[must_use]
    pub fn into_parts(self) -> (F, FieldErrors) {
        (self.form, self.errors)
    }
}
