use super::types::ReportError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub exit_code: i32,
}

impl ReportError {
    /// Classify this error for logging and to pick the process exit code.
    ///
    /// Nothing here is retryable: the only condition the pipeline waits out
    /// is a job that is still processing, and that never surfaces as an error.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ReportError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },
            ReportError::InvalidRequest(_) => ErrorClassification {
                error_type: "InvalidRequestError",
                exit_code: 2,
            },
            ReportError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                exit_code: 2,
            },
            ReportError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                exit_code: 4,
            },
            ReportError::UnexpectedStatus { .. } => ErrorClassification {
                error_type: "UnexpectedStatusError",
                exit_code: 5,
            },
            ReportError::PollTimeout { .. } => ErrorClassification {
                error_type: "PollTimeoutError",
                exit_code: 6,
            },
            ReportError::Submission { .. } => ErrorClassification {
                error_type: "SubmissionError",
                exit_code: 1,
            },
            ReportError::Network(_) => ErrorClassification {
                error_type: "TransportError",
                exit_code: 1,
            },
            ReportError::Http { .. } => ErrorClassification {
                error_type: "HttpError",
                exit_code: 1,
            },
            ReportError::MalformedResponse(_) => ErrorClassification {
                error_type: "MalformedResponseError",
                exit_code: 1,
            },
            ReportError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
            },
            ReportError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 1,
            },
            ReportError::Csv(_) => ErrorClassification {
                error_type: "CsvError",
                exit_code: 1,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_exit_code() {
        let err = ReportError::Config("bad".into());
        let class = err.classify();
        assert_eq!(class.error_type, "ConfigError");
        assert_eq!(class.exit_code, 2);
    }

    #[test]
    fn test_auth_error_exit_code() {
        let err = ReportError::Authentication("no key".into());
        assert_eq!(err.classify().exit_code, 4);
    }

    #[test]
    fn test_unexpected_status_exit_code() {
        let err = ReportError::UnexpectedStatus {
            job_id: "abc".into(),
            status: Some("FAILED".into()),
        };
        let class = err.classify();
        assert_eq!(class.error_type, "UnexpectedStatusError");
        assert_eq!(class.exit_code, 5);
    }

    #[test]
    fn test_poll_timeout_exit_code() {
        let err = ReportError::PollTimeout { job_id: "abc".into(), attempts: 30 };
        assert_eq!(err.classify().exit_code, 6);
    }

    #[test]
    fn test_transport_error_is_generic_failure() {
        let err = ReportError::Network("connection refused".into());
        let class = err.classify();
        assert_eq!(class.error_type, "TransportError");
        assert_eq!(class.exit_code, 1);
    }

    #[test]
    fn test_submission_error_is_generic_failure() {
        let err = ReportError::Submission { status: 403, body: "forbidden".into() };
        assert_eq!(err.classify().error_type, "SubmissionError");
        assert_eq!(err.classify().exit_code, 1);
    }

    #[test]
    fn test_unexpected_status_display_missing_value() {
        let err = ReportError::UnexpectedStatus { job_id: "abc".into(), status: None };
        assert_eq!(err.to_string(), "Unexpected report status for job abc: <missing>");
    }
}
