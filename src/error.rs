//! Error taxonomy for layout loading and route planning.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum RouteError {
    /// A point id that does not exist in the store graph.
    UnknownPoint(String),
    /// No finite tour visits every required point.
    NoRouteFound { unreachable: Vec<String> },
    /// The exact solver refuses required sets above its limit.
    TooManyPoints { requested: usize, limit: usize },
    /// A layout broke one of the graph invariants.
    InvalidLayout(String),
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::UnknownPoint(id) => write!(f, "unknown point '{}'", id),
            RouteError::NoRouteFound { unreachable } if unreachable.is_empty() => {
                write!(f, "no route found")
            }
            RouteError::NoRouteFound { unreachable } => {
                write!(f, "no route found: unreachable from home: {}", unreachable.join(", "))
            }
            RouteError::TooManyPoints { requested, limit } => write!(
                f,
                "{} required points exceeds the exact solver limit of {}",
                requested, limit
            ),
            RouteError::InvalidLayout(reason) => write!(f, "invalid store layout: {}", reason),
            RouteError::Io(err) => write!(f, "layout io error: {}", err),
            RouteError::Json(err) => write!(f, "layout json error: {}", err),
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::Io(err) => Some(err),
            RouteError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RouteError {
    fn from(err: io::Error) -> Self {
        RouteError::Io(err)
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        RouteError::Json(err)
    }
}
