use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid population size: {0} (expected at least 1)")]
    InvalidPopulationSize(usize),
    #[error("invalid generation count: {0} (expected a non-negative integer)")]
    InvalidGenerationCount(String),
    #[error("invalid attraction probability: {0} (expected a value in [0, 1])")]
    InvalidProbability(f64),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn config_errors_name_the_invalid_parameter() {
        assert!(
            Error::InvalidPopulationSize(0)
                .to_string()
                .contains("population size: 0")
        );
        assert!(
            Error::InvalidGenerationCount("-3".to_string())
                .to_string()
                .contains("generation count: -3")
        );
        assert!(
            Error::InvalidProbability(1.5)
                .to_string()
                .contains("attraction probability: 1.5")
        );
    }

    #[test]
    fn io_errors_are_transparent() {
        let err = Error::from(std::io::Error::other("disk gone"));
        assert_eq!(err.to_string(), "disk gone");
    }
}
