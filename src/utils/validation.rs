use validator::{Validate, ValidationErrors};

use crate::errors::AppError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::BadRequest(format!("Validation failed: {}", describe(&err))))
}

/// `field: message` pairs joined with `; `, sorted by field name.
pub fn describe(err: &ValidationErrors) -> String {
    let mut details = err
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_deref()
                        .map(str::to_string)
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}: {}", field, messages)
        })
        .collect::<Vec<_>>();
    details.sort();
    details.join("; ")
}
