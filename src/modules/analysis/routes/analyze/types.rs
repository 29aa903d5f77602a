pub mod request {
    use crate::modules::analysis::company::{self, UrlError};
    use serde::Deserialize;
    use std::borrow::Cow;
    use validator::{Validate, ValidationError};

    fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
        match value.trim().is_empty() {
            true => Err(ValidationError::new("BLANK_FIELD")
                .with_message(Cow::from("Field must not be blank"))),
            false => Ok(()),
        }
    }

    fn validate_url(value: &str) -> Result<(), ValidationError> {
        match company::normalize_url(value) {
            Ok(_) => Ok(()),
            Err(UrlError::Blank) => validate_not_blank(value),
            Err(UrlError::UnsupportedScheme) => Err(ValidationError::new("INVALID_URL")
                .with_message(Cow::from("Only http and https URLs are supported"))),
            Err(_) => Err(ValidationError::new("INVALID_URL")
                .with_message(Cow::from("Invalid company website URL"))),
        }
    }

    /// Body of `POST /api/v1/analyze`.
    #[derive(Debug, Deserialize, Validate)]
    pub struct Payload {
        #[validate(custom(function = "validate_url"))]
        pub url: String,
        #[validate(custom(function = "validate_not_blank"))]
        pub action: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use validator::ValidationErrors;

    /// Body of a successful analysis.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct AnalysisResponse {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub result: Option<String>,
    }

    pub enum Success {
        Analyzed(AnalysisResponse),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Analyzed(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
            }
        }
    }

    pub enum Error {
        InvalidBody(String),
        FailedToValidate(ValidationErrors),
        FailedToFetchPage,
        FailedToGenerateAnalysis,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidBody(reason) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": format!("Invalid request body: {reason}") })),
                )
                    .into_response(),
                Self::FailedToValidate(errors) => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Failed to validate payload", "errors": errors })),
                )
                    .into_response(),
                Self::FailedToFetchPage => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to fetch company page" })),
                )
                    .into_response(),
                Self::FailedToGenerateAnalysis => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to generate analysis" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
