//! # Errors
//!
//! Kennel reports every failure with the same small body:
//!
//! ```json
//! { "loc": "pk", "msg": "Oops! No dog with pk 42 in database.", "type": "error" }
//! ```
//!
//! Core goals:
//! - one error type for validation, conflict and not-found failures
//! - can be carried through anyhow::Error (for the hook pipeline)
//! - transport-agnostic (the axum crate decides how to serialize)
//!
//! All request-level kinds map to HTTP 422. Only `General` (a fault inside
//! the server itself) maps to 500.

use std::fmt;

use anyhow::Error as AnyError;
use serde_json::{json, Value};

/// A convenience result type for Kennel core APIs.
pub type KennelResult<T> = std::result::Result<T, AnyError>;

/// Where a general (server-side) error is reported.
pub const SERVER_LOC: &str = "server";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation, // 422
    Conflict,   // 422
    NotFound,   // 422
    General,    // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::Conflict | ErrorKind::NotFound => 422,
            ErrorKind::General => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "ValidationError",
            ErrorKind::Conflict => "ConflictError",
            ErrorKind::NotFound => "NotFoundError",
            ErrorKind::General => "GeneralError",
        }
    }
}

/// A structured Kennel error that can live inside `anyhow::Error`.
///
/// - kind (drives the status code)
/// - loc (which input the error is about: a field, a query param, a path key)
/// - message (client-facing text)
/// - source (optional, never sent to clients)
#[derive(Debug)]
pub struct KennelError {
    pub kind: ErrorKind,
    pub loc: String,
    pub message: String,
    pub source: Option<AnyError>,
}

impl KennelError {
    pub fn new(kind: ErrorKind, loc: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            loc: loc.into(),
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Convert into `anyhow::Error` so it flows through the hook pipeline.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Find a `KennelError` in an `anyhow::Error`, looking through any
    /// context layers added on the way up.
    pub fn from_anyhow(err: &AnyError) -> Option<&KennelError> {
        err.chain().find_map(|e| e.downcast_ref::<KennelError>())
    }

    /// Turn any error into a KennelError:
    /// - if it's already a KennelError, keep it
    /// - otherwise wrap as General
    pub fn normalize(err: AnyError) -> KennelError {
        match err.downcast::<KennelError>() {
            Ok(kennel) => kennel,
            Err(other) => {
                KennelError::general(other.to_string()).with_source(other)
            }
        }
    }

    /// Copy without the inner `source`, suitable for returning to clients.
    pub fn sanitize_for_client(&self) -> KennelError {
        KennelError {
            kind: self.kind,
            loc: self.loc.clone(),
            message: self.message.clone(),
            source: None,
        }
    }

    /// The uniform `{loc, msg, type}` body.
    pub fn to_json(&self) -> Value {
        json!({
            "loc": self.loc,
            "msg": self.message,
            "type": "error",
        })
    }

    pub fn validation(loc: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, loc, msg)
    }
    pub fn conflict(loc: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, loc, msg)
    }
    pub fn not_found(loc: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, loc, msg)
    }
    pub fn general(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::General, SERVER_LOC, msg)
    }
}

impl fmt::Display for KennelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) at {}: {}",
            self.name(),
            self.code(),
            self.loc,
            self.message
        )
    }
}

impl std::error::Error for KennelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Bail out of an `anyhow::Result` function with a `KennelError`.
///
/// `bail_kennel!(not_found, "pk", "Oops! No dog with pk {} in database.", pk)`
#[macro_export]
macro_rules! bail_kennel {
    ($ctor:ident, $loc:expr, $msg:expr) => {
        return Err($crate::errors::KennelError::$ctor($loc, $msg).into_anyhow());
    };
    ($ctor:ident, $loc:expr, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::KennelError::$ctor($loc, format!($fmt, $($arg)*)).into_anyhow());
    };
}
