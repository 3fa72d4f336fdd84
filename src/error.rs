use std::fmt;

/// Errors raised at the collaborator boundary: loading models, textures and config,
/// and writing images. The rendering core itself never fails.
#[derive(Debug)]
pub enum RenderError {
    /// Input that is well-formed but unusable (empty model, bad texture size, ...).
    Validation(String),
    /// A file whose contents could not be parsed.
    Parse(String),
    /// A resource that could not be opened or decoded.
    Load(String),
    Io(std::io::Error),
}

impl RenderError {
    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            RenderError::Validation(msg) => format!("Invalid input: {}", msg),
            RenderError::Parse(msg) => format!("Failed to parse file: {}", msg),
            RenderError::Load(msg) => format!("Failed to load resource: {}", msg),
            RenderError::Io(e) => format!("Failed to load resource: {}", e),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::Validation(msg) => write!(f, "Validation error: {}", msg),
            RenderError::Parse(msg) => write!(f, "Parse error: {}", msg),
            RenderError::Load(msg) => write!(f, "Load error: {}", msg),
            RenderError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            RenderError::Validation("empty".into()).user_message(),
            "Invalid input: empty"
        );
        assert_eq!(
            RenderError::Parse("line 3".into()).user_message(),
            "Failed to parse file: line 3"
        );
        assert_eq!(
            RenderError::Load("missing.png".into()).user_message(),
            "Failed to load resource: missing.png"
        );
    }

    #[test]
    fn test_io_error_converts_and_chains() {
        use std::error::Error;
        let err: RenderError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, RenderError::Io(_)));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
