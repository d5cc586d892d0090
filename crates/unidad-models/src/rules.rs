//! Length limits checked on the trimmed value, the form the services persist.

use std::borrow::Cow;

use validator::ValidationError;

fn trimmed_max(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().chars().count() > max {
        let mut error = ValidationError::new("length");
        error.add_param(Cow::from("max"), &max);
        return Err(error);
    }
    Ok(())
}

pub(crate) fn max_20(value: &str) -> Result<(), ValidationError> {
    trimmed_max(value, 20)
}

pub(crate) fn max_50(value: &str) -> Result<(), ValidationError> {
    trimmed_max(value, 50)
}

pub(crate) fn max_100(value: &str) -> Result<(), ValidationError> {
    trimmed_max(value, 100)
}
