use std::fmt;

use thiserror::Error;

/// Status reported for failures that never produced an HTTP response.
pub const TRANSPORT_STATUS: u16 = 0;

pub type RestResult = Result<Option<serde_json::Value>, RestError>;

/// Classification of a failed vmrest call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestErrorKind {
    /// Connection refused, reset, DNS failure or timeout. Status is always 0.
    Connection,
    /// 400
    InvalidParam,
    /// 401
    Auth,
    /// 404
    NotFound,
    /// 409, e.g. the VM already exists.
    Conflict,
    /// 5xx and any 4xx without a dedicated kind.
    Server,
}

impl RestErrorKind {
    /// Kind for a non-2xx HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => RestErrorKind::InvalidParam,
            401 => RestErrorKind::Auth,
            404 => RestErrorKind::NotFound,
            409 => RestErrorKind::Conflict,
            _ => RestErrorKind::Server,
        }
    }
}

impl fmt::Display for RestErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RestErrorKind::Connection => "connection error",
            RestErrorKind::InvalidParam => "invalid parameter",
            RestErrorKind::Auth => "authentication failed",
            RestErrorKind::NotFound => "not found",
            RestErrorKind::Conflict => "conflict",
            RestErrorKind::Server => "server error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} (HTTP {status}): {message}")]
pub struct RestError {
    kind: RestErrorKind,
    status: u16,
    message: String,
}

impl RestError {
    pub fn new(kind: RestErrorKind, status: u16, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(RestErrorKind::Connection, TRANSPORT_STATUS, message)
    }

    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(RestErrorKind::from_status(status), status, message)
    }

    pub fn kind(&self) -> RestErrorKind {
        self.kind
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// `Message` field of a vmrest error body, if the body is JSON and has one.
pub(crate) fn body_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value.get("Message")?.as_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(RestErrorKind::from_status(400), RestErrorKind::InvalidParam);
        assert_eq!(RestErrorKind::from_status(401), RestErrorKind::Auth);
        assert_eq!(RestErrorKind::from_status(404), RestErrorKind::NotFound);
        assert_eq!(RestErrorKind::from_status(409), RestErrorKind::Conflict);
        assert_eq!(RestErrorKind::from_status(403), RestErrorKind::Server);
        assert_eq!(RestErrorKind::from_status(500), RestErrorKind::Server);
        assert_eq!(RestErrorKind::from_status(503), RestErrorKind::Server);
    }

    #[test]
    fn connection_errors_report_status_zero() {
        let err = RestError::connection("Timeout after 30s");
        assert_eq!(err.kind(), RestErrorKind::Connection);
        assert_eq!(err.status(), 0);
        assert_eq!(err.to_string(), "connection error (HTTP 0): Timeout after 30s");
    }

    #[test]
    fn body_message_reads_message_field() {
        assert_eq!(
            body_message(br#"{"Code": 106, "Message": "vm not found"}"#).as_deref(),
            Some("vm not found")
        );
        assert_eq!(body_message(br#"{"Code": 106}"#), None);
        assert_eq!(body_message(b"<html>bad gateway</html>"), None);
        assert_eq!(body_message(b""), None);
    }
}
