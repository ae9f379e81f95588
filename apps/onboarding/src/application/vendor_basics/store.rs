use crate::domain::vendor::{
    FieldError, FieldName, FieldValue, ValidationErrors, VendorBasics, rules, sanitize,
};
use tracing::{debug, instrument};

/// Owns the vendor basics of one form session and their per-field errors.
///
/// Values only change through [`set_field`](Self::set_field) and
/// [`input`](Self::input); errors only change through
/// [`validate_field`](Self::validate_field) and [`validate_all`](Self::validate_all).
#[derive(Debug, Default)]
pub struct VendorBasicsStore {
    basics: VendorBasics,
    errors: ValidationErrors,
}

impl VendorBasicsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn basics(&self) -> &VendorBasics {
        &self.basics
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Stores an already sanitized value verbatim. The error map is untouched.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` if the value does not fit the field and
    /// `InvalidNumber` for a non-finite rating.
    #[instrument(skip(self, value))]
    pub fn set_field(
        &mut self,
        field: FieldName,
        value: impl Into<FieldValue>,
    ) -> Result<(), FieldError> {
        self.basics.write(field, value.into())
    }

    /// Keystroke path: normalizes raw text with the field's sanitizer before
    /// storing it. Non-text values go straight to [`set_field`](Self::set_field).
    pub fn input(
        &mut self,
        field: FieldName,
        raw: impl Into<FieldValue>,
    ) -> Result<(), FieldError> {
        match raw.into() {
            FieldValue::Text(text) => self.set_field(field, sanitize::text(field, &text)),
            other => self.set_field(field, other),
        }
    }

    /// Runs the field's rule and records or clears its error.
    /// Returns whether the field is valid.
    pub fn validate_field(&mut self, field: FieldName) -> bool {
        match rules::check(&self.basics, field) {
            Ok(()) => {
                self.errors.remove(&field);
                true
            }
            Err(err) => {
                debug!(field = %field, error = %err, "field validation failed");
                self.errors.insert(field, err.to_string());
                false
            }
        }
    }

    /// Validates every field, as on submit.
    pub fn validate_all(&mut self) -> bool {
        FieldName::ALL
            .into_iter()
            .fold(true, |valid, field| self.validate_field(field) && valid)
    }

    pub fn into_basics(self) -> VendorBasics {
        self.basics
    }
}
