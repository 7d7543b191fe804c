use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("{path} response status: {status}")]
    HttpStatus { path: String, status: u16 },
    #[error("{path} response body: {reason}")]
    BodyParse { path: String, reason: String },
    #[error("{path} request failed: {message}")]
    Transport { path: String, message: String },
    #[error("temperature scale: {0}")]
    InvalidScale(String),
    #[error("fixed-point temperature: {body:?}")]
    Parse { body: String },
    #[error("failed to persist {key}: {message}")]
    Storage { key: String, message: String },
}

impl DashboardError {
    pub fn body_parse(path: &str, reason: impl ToString) -> Self {
        Self::BodyParse {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn transport(path: &str, message: impl ToString) -> Self {
        Self::Transport {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_message_names_path_and_status() {
        let err = DashboardError::HttpStatus {
            path: "/temp".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "/temp response status: 503");
    }

    #[test]
    fn parse_message_quotes_body() {
        let err = DashboardError::Parse {
            body: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "fixed-point temperature: \"abc\"");
    }
}
