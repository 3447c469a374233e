use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::domain::MatchStatus;
use crate::error::BetBrainError;

pub const DEFAULT_STATUS_FILTER: &str = "SCHEDULED,LIVE";

// ============================================================================
// Error Types
// ============================================================================

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub status: u16,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<BetBrainError> for ApiError {
    fn from(err: BetBrainError) -> Self {
        let status = match &err {
            BetBrainError::NotFound(_) => StatusCode::NOT_FOUND,
            BetBrainError::Validation(_) => StatusCode::BAD_REQUEST,
            BetBrainError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            e if e.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed ({}): {}", status, err);
        } else {
            warn!("Request rejected ({}): {}", status, err);
        }

        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            status: self.status.as_u16(),
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MatchesQuery {
    pub status: Option<String>,
}

impl MatchesQuery {
    /// Upper-cased, comma separated status filter; defaults to scheduled and live
    pub fn status_filter(&self) -> std::result::Result<String, ApiError> {
        let raw = match self.status.as_deref().map(str::trim) {
            None | Some("") => return Ok(DEFAULT_STATUS_FILTER.to_string()),
            Some(raw) => raw,
        };

        let mut statuses = Vec::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if MatchStatus::parse(token) == MatchStatus::Unknown {
                return Err(ApiError::bad_request(format!("Unknown match status: {}", token)));
            }
            statuses.push(token.to_ascii_uppercase());
        }

        if statuses.is_empty() {
            return Err(ApiError::bad_request("Empty match status filter"));
        }
        Ok(statuses.join(","))
    }
}

/// Parse a numeric path identifier
pub fn parse_id(raw: &str, what: &str) -> std::result::Result<u64, ApiError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ApiError::bad_request(format!("Invalid {}: {}", what, raw)))
}

/// Odds feed keys look like `soccer_epl`
pub fn validate_league_key(raw: &str) -> std::result::Result<&str, ApiError> {
    let valid = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(raw)
    } else {
        Err(ApiError::bad_request(format!("Invalid league key: {}", raw)))
    }
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerResponse {
    pub message: String,
    pub status: String,
    pub version: String,
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (BetBrainError::NotFound("match 1".into()), StatusCode::NOT_FOUND),
            (BetBrainError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                BetBrainError::Timeout {
                    provider: "football-data".into(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (BetBrainError::RateLimited("odds".into()), StatusCode::BAD_GATEWAY),
            (BetBrainError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (BetBrainError::NotConfigured("token".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn test_status_filter() {
        let default = MatchesQuery::default();
        assert_eq!(default.status_filter().unwrap(), "SCHEDULED,LIVE");

        let query = MatchesQuery {
            status: Some("finished, in_play".into()),
        };
        assert_eq!(query.status_filter().unwrap(), "FINISHED,IN_PLAY");

        let bad = MatchesQuery {
            status: Some("SCHEDULED,WHENEVER".into()),
        };
        assert_eq!(bad.status_filter().unwrap_err().status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_path_validation() {
        assert_eq!(parse_id("2021", "league id").unwrap(), 2021);
        assert!(parse_id("epl", "league id").is_err());
        assert!(validate_league_key("soccer_epl").is_ok());
        assert!(validate_league_key("../etc").is_err());
    }
}
