use onboard_core::OnboardError;
use onboard_domain::NormalizeError;
use thiserror::Error;

/// Error de un job completo. Los fallos por host nunca llegan aquí: quedan en
/// el `JobReport`.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Onboard(#[from] OnboardError),
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    Input(String),
}

impl JobError {
    /// Código de salida de la CLI: 2 uso/configuración, 4 entrada, 5 corrida
    /// abortada.
    pub fn exit_code(&self) -> i32 {
        match self {
            JobError::Config(_) => 2,
            JobError::Onboard(e) if e.is_fatal() => 5,
            JobError::Onboard(_) | JobError::Normalize(_) | JobError::Serialization(_) | JobError::Io(_) | JobError::Input(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        assert_eq!(JobError::from(OnboardError::InfrastructureFailure("inventory".into())).exit_code(), 5);
        assert_eq!(JobError::from(OnboardError::InvalidTarget("x".into())).exit_code(), 4);
        assert_eq!(JobError::Input("empty".into()).exit_code(), 4);
        assert_eq!(JobError::Config("bad".into()).exit_code(), 2);
        assert_eq!(JobError::from(NormalizeError::MissingHost("10.0.0.1".into())).exit_code(), 4);
    }

    #[test]
    fn io_variant_from() {
        let err: JobError = std::io::Error::other("disk gone").into();
        assert_eq!(err.to_string(), "io error: disk gone");
    }
}
