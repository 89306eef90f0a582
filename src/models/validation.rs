use serde::Serialize;

/// Field-level validation errors collected while checking a request payload.
#[derive(Debug, Default, Serialize)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.fields.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Ok when no errors were collected, otherwise Err(self).
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self
            .fields
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_errors_convert_to_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn collected_errors_convert_to_err() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Name must not be empty");
        errors.add("sets", "Sets must be between 1 and 10");

        let err = errors.into_result().unwrap_err();
        assert_eq!(err.fields.len(), 2);
        assert_eq!(err.fields[0].field, "name");
        assert_eq!(
            err.to_string(),
            "name: Name must not be empty; sets: Sets must be between 1 and 10"
        );
    }
}
