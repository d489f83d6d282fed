use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("settings file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("settings parse error: {0}")]
    ParseError(String),

    #[error("settings validation error: {0}")]
    ValidationError(String),

    #[error("settings write error: {0}")]
    WriteError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("no such session: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid session file: {0}")]
    InvalidFormat(String),

    #[error("session io error: {0}")]
    Io(String),
}

#[derive(Debug, thiserror::Error)]
pub enum EvoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("chat error: {0}")]
    Chat(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.json"));
        assert_eq!(
            err.to_string(),
            "settings file not found: /tmp/missing.json"
        );

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "settings parse error: unexpected token");

        let err = ConfigError::ValidationError("unknown mode 'poet'".into());
        assert_eq!(
            err.to_string(),
            "settings validation error: unknown mode 'poet'"
        );
    }

    #[test]
    fn persistence_error_display() {
        let err = PersistenceError::NotFound(PathBuf::from("sessions/work.json"));
        assert_eq!(err.to_string(), "no such session: sessions/work.json");

        let err = PersistenceError::InvalidFormat("not a JSON array".into());
        assert_eq!(err.to_string(), "invalid session file: not a JSON array");
    }

    #[test]
    fn evo_error_from_config() {
        let config_err = ConfigError::ParseError("bad json".into());
        let evo_err: EvoError = config_err.into();
        assert!(matches!(evo_err, EvoError::Config(_)));
        assert!(evo_err.to_string().contains("bad json"));
    }

    #[test]
    fn evo_error_from_persistence() {
        let err = PersistenceError::Io("disk full".into());
        let evo_err: EvoError = err.into();
        assert!(matches!(evo_err, EvoError::Persistence(_)));
        assert!(evo_err.to_string().contains("disk full"));
    }

    #[test]
    fn evo_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let evo_err: EvoError = io_err.into();
        assert!(matches!(evo_err, EvoError::Io(_)));
        assert!(evo_err.to_string().contains("file missing"));
    }

    #[test]
    fn evo_error_other_variants() {
        let err = EvoError::Validation("empty input".into());
        assert_eq!(err.to_string(), "validation error: empty input");

        let err = EvoError::Chat("model unavailable".into());
        assert_eq!(err.to_string(), "chat error: model unavailable");

        let err = EvoError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
