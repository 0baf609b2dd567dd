//! Output document kinds.

use serde::{Deserialize, Serialize};

/// File kind of a serialized atlas descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    /// XML property list (`.plist`).
    Plist,
    /// JSON manifest (`.json`).
    Json,
    /// Text scene description (`.tscn`).
    Tscn,
}

impl DataKind {
    /// Returns the file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            DataKind::Plist => "plist",
            DataKind::Json => "json",
            DataKind::Tscn => "tscn",
        }
    }
}

impl std::fmt::Display for DataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(DataKind::Plist.extension(), "plist");
        assert_eq!(DataKind::Json.to_string(), "json");
        assert_eq!(DataKind::Tscn.extension(), "tscn");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&DataKind::Tscn).unwrap(), "\"tscn\"");
        let kind: DataKind = serde_json::from_str("\"plist\"").unwrap();
        assert_eq!(kind, DataKind::Plist);
    }
}
