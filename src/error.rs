/// Broad category of an [`AppError`].
///
/// Selector errors (`InvalidMetric`, `InvalidShapeClass`) are programming errors
/// at the call site and are raised as soon as a name is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidMetric,
    InvalidShapeClass,
    InvalidInput,
    Calibration,
    Output,
}

impl ErrorKind {
    /// Process exit code used by the `dsp` binary.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::InvalidMetric | ErrorKind::InvalidShapeClass | ErrorKind::InvalidInput => 2,
            ErrorKind::Calibration => 3,
            ErrorKind::Output => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown_metric(name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidMetric,
            format!("Unknown metric '{name}' (expected one of a, b, c, d, e)."),
        )
    }

    pub fn unknown_shape(name: &str) -> Self {
        Self::new(
            ErrorKind::InvalidShapeClass,
            format!("Unknown shape class '{name}' (expected convex, flat or concave)."),
        )
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_errors_use_input_exit_code() {
        assert_eq!(AppError::unknown_metric("z").exit_code(), 2);
        assert_eq!(AppError::unknown_shape("wavy").exit_code(), 2);
        assert_eq!(AppError::new(ErrorKind::Output, "x").exit_code(), 4);
    }

    #[test]
    fn message_names_the_bad_selector() {
        let err = AppError::unknown_metric("f");
        assert_eq!(err.kind(), ErrorKind::InvalidMetric);
        assert!(err.to_string().contains("'f'"));
    }
}
