//! Endpoint URI resolution against the configured base URL.

use std::fmt;

/// The service endpoints the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Convert,
    Health,
}

impl Endpoint {
    pub fn name(self) -> &'static str {
        match self {
            Endpoint::Convert => "convert",
            Endpoint::Health => "health",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Join `base_url` and `endpoint` with exactly one `/`.
///
/// One trailing slash is dropped from the base and one leading slash from the
/// endpoint, so `"http://h"`, `"http://h/"`, `"convert"` and `"/convert"`
/// combine to the same URI.
pub fn resolve(base_url: &str, endpoint: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
    format!("{base}/{endpoint}")
}
