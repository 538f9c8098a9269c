//! Routing error taxonomy.

use thiserror::Error;

/// Errors raised while registering routes, resolving requests, or building URLs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// An endpoint name was registered twice.
    #[error("Endpoint \"{0}\" is already registered")]
    DuplicateEndpoint(String),

    /// A static path was registered twice.
    #[error("Static path \"{0}\" is already registered")]
    DuplicatePath(String),

    /// A pattern declares the same parameter name more than once.
    #[error("Parameter \"{name}\" appears more than once in pattern \"{pattern}\"")]
    DuplicateParameter { pattern: String, name: String },

    /// The compiled matcher for a pattern was rejected by the regex engine.
    #[error("Pattern \"{pattern}\" could not be compiled: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// No route matched the path under any method.
    #[error("No route found for {0}")]
    NotFound(String),

    /// The path is routed, but not for this method.
    #[error("Method {method} not allowed for path {path}")]
    MethodNotAllowed {
        method: String,
        path: String,
        /// Methods that would have been accepted, sorted.
        allowed: Vec<String>,
    },

    /// Reverse lookup on an endpoint nobody registered.
    #[error("No route found for endpoint '{0}'")]
    UnknownEndpoint(String),

    /// Reverse lookup without a value for a declared parameter.
    #[error("Missing parameter '{name}' for endpoint '{endpoint}'")]
    MissingParameter { endpoint: String, name: String },

    /// Reverse lookup from a request that was not dispatched by an app, so
    /// there is no route table to consult.
    #[error("Cannot build URL for endpoint '{0}': request was not dispatched by an App")]
    NoApplication(String),
}

impl RoutingError {
    /// HTTP status a host should answer with for this error.
    ///
    /// Registration and reverse-lookup errors are programmer mistakes and map
    /// to 500; only resolution errors reach clients as 404/405.
    pub fn status_code(&self) -> u16 {
        match self {
            RoutingError::NotFound(_) => 404,
            RoutingError::MethodNotAllowed { .. } => 405,
            _ => 500,
        }
    }

    /// Whether this error comes out of `resolve` (and so is a client-facing outcome).
    pub fn is_resolution_error(&self) -> bool {
        matches!(
            self,
            RoutingError::NotFound(_) | RoutingError::MethodNotAllowed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RoutingError::NotFound("/x".into()).status_code(), 404);
        let err = RoutingError::MethodNotAllowed {
            method: "POST".into(),
            path: "/x".into(),
            allowed: vec!["GET".into()],
        };
        assert_eq!(err.status_code(), 405);
        assert!(err.is_resolution_error());
        assert_eq!(RoutingError::DuplicateEndpoint("home".into()).status_code(), 500);
        assert!(!RoutingError::UnknownEndpoint("home".into()).is_resolution_error());
        assert_eq!(RoutingError::NoApplication("home".into()).status_code(), 500);
    }

    #[test]
    fn test_messages() {
        let err = RoutingError::MissingParameter {
            endpoint: "user_detail".into(),
            name: "user_id".into(),
        };
        assert_eq!(
            err.to_string(),
            "Missing parameter 'user_id' for endpoint 'user_detail'"
        );
        assert_eq!(
            RoutingError::MethodNotAllowed {
                method: "POST".into(),
                path: "/about".into(),
                allowed: vec!["GET".into()],
            }
            .to_string(),
            "Method POST not allowed for path /about"
        );
    }
}
