//! Status and confirmation message types for operation feedback.

use std::fmt;

use crate::error::CadenceError;

/// Wrapper type for displaying operation confirmation messages.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
    /// Follow-up suggestion shown under the message
    pub hint: Option<String>,
}

impl OperationStatus {
    /// Create a new success status.
    pub fn success(message: String) -> Self {
        Self {
            message,
            success: true,
            hint: None,
        }
    }

    /// Create a new failure status.
    pub fn failure(message: String) -> Self {
        Self {
            message,
            success: false,
            hint: None,
        }
    }

    /// Failure status for `error`, carrying the hint of its remedy.
    pub fn from_error(error: &CadenceError) -> Self {
        Self {
            message: error.to_string(),
            success: false,
            hint: error.remedy().hint().map(str::to_string),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", if self.success { "Success:" } else { "Error:" }, self.message)?;
        if let Some(hint) = &self.hint {
            writeln!(f)?;
            writeln!(f, "> {hint}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Logged in as 小明".to_string());
        assert_eq!(format!("{success}"), "Success: Logged in as 小明\n");

        let failure = OperationStatus::failure("Generation failed".to_string());
        assert!(format!("{failure}").contains("Error:"));
    }

    #[test]
    fn test_failure_from_error_carries_hint() {
        let error = CadenceError::MissingCredential {
            variable: "GEMINI_API_KEY".to_string(),
        };
        let status = OperationStatus::from_error(&error);

        assert!(!status.success);
        let rendered = status.to_string();
        assert!(rendered.starts_with("Error: "));
        assert!(rendered.contains("GEMINI_API_KEY"));
        assert!(rendered.contains("\n> "));
    }
}
