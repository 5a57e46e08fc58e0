//! Request validation bridge
//!
//! Runs `validator` rules on a DTO and folds every failure into a single
//! INVALID error.

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::app_error::{AppError, AppResult};

/// Validate `dto`, reporting failures under `op`.
///
/// Messages come from each rule's `message` attribute, falling back to
/// `"<field> is invalid"`. They are ordered by field name so responses are
/// stable across runs.
pub fn validate<T: Validate>(op: &'static str, dto: &T) -> AppResult<()> {
    dto.validate()
        .map_err(|errors| AppError::validation(op, collect_messages(&errors)))
}

fn collect_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    let mut messages = Vec::new();
    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid"));
                    messages.push(message);
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                messages.extend(collect_messages(nested));
            }
            ValidationErrorsKind::List(items) => {
                for nested in items.values() {
                    messages.extend(collect_messages(nested));
                }
            }
        }
    }
    messages
}
