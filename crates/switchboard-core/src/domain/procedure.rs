//! Procedure identifiers (wire paths).

use std::fmt;

use serde::{Deserialize, Serialize};

/// `"/" + service_full_name + "/" + method_name`
///
/// The same string is emitted as a generated constant and matched literally
/// against the request path, so it is kept as an owned newtype rather than a
/// parsed structure.
#[repr(transparent)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Procedure(String);

impl Procedure {
    pub fn new(service_full_name: &str, method_name: &str) -> Self {
        Self(format!("/{service_full_name}/{method_name}"))
    }

    /// Base wire prefix of a service: `"/" + full_name + "/"`.
    pub fn service_prefix(service_full_name: &str) -> String {
        format!("/{service_full_name}/")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Procedure {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
