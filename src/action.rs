//! The closed set of logical actions and their HTTP verb mapping.

use std::str::FromStr;

use reqwest::Method;

/// A logical operation against the API, mapped to a fixed HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Add,
    Update,
    Delete,
}

impl Action {
    /// Returns the HTTP verb this action is sent with.
    pub fn verb(&self) -> Method {
        match self {
            Action::Fetch => Method::GET,
            Action::Add => Method::POST,
            Action::Update => Method::PUT,
            Action::Delete => Method::DELETE,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Fetch => "fetch",
            Action::Add => "add",
            Action::Update => "update",
            Action::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

/// Error for an action name outside the supported set.
///
/// This is a programmer error, not a runtime condition, so it is surfaced
/// as a real error instead of being recorded on the client.
#[derive(Debug)]
pub struct UnknownAction(pub String);

impl std::fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown action '{}' (expected fetch, add, update or delete)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fetch" => Ok(Action::Fetch),
            "add" => Ok(Action::Add),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}
