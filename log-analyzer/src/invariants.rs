use derive_more::Display;

/// Requested path exactly as it appears in the log line.
#[derive(Debug, Display, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Resource(String);

impl From<&str> for Resource {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}
