use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layer::AIRSPACE_CLASS_PREFIX;
use crate::terrain::Exaggeration;

/// Registry key for an airspace asset: an airport code or an airspace class.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AirspaceId(String);

impl AirspaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Normalize user input: trimmed, uppercase. `None` if nothing is left.
    pub fn from_user_input(raw: &str) -> Option<Self> {
        let code = raw.trim().to_uppercase();
        if code.is_empty() { None } else { Some(Self(code)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Airspace class models (`CLASS_B`, ...) are overlays, not airports.
    pub fn is_class(&self) -> bool {
        self.0.starts_with(AIRSPACE_CLASS_PREFIX)
    }
}

impl fmt::Display for AirspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where airspace tilesets are served from, per exaggeration scale.
#[derive(Debug, Clone, PartialEq)]
pub struct AirspaceSource {
    root: String,
}

impl AirspaceSource {
    pub fn new(root: impl Into<String>) -> Self {
        let root: String = root.into();
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    pub fn directory(&self, exaggeration: &Exaggeration) -> String {
        format!("{}/airports-{}", self.root, exaggeration.suffix())
    }

    pub fn tileset_url(&self, exaggeration: &Exaggeration, id: &AirspaceId) -> String {
        format!("{}/{}.json", self.directory(exaggeration), id)
    }
}

#[cfg(test)]
mod tests {
    use super::{AirspaceId, AirspaceSource};
    use crate::terrain::Exaggeration;

    #[test]
    fn user_input_is_trimmed_and_uppercased() {
        assert_eq!(
            AirspaceId::from_user_input("  ksfo "),
            Some(AirspaceId::new("KSFO"))
        );
        assert_eq!(AirspaceId::from_user_input("   "), None);
    }

    #[test]
    fn class_prefix() {
        assert!(AirspaceId::new("CLASS_B").is_class());
        assert!(!AirspaceId::new("KJFK").is_class());
    }

    #[test]
    fn url_follows_exaggeration() {
        let src = AirspaceSource::new("tiles/");
        let mut e = Exaggeration::new(5.0);
        let id = AirspaceId::new("KSFO");
        assert_eq!(src.tileset_url(&e, &id), "tiles/airports-1x/KSFO.json");
        e.enabled = true;
        assert_eq!(src.tileset_url(&e, &id), "tiles/airports-5x/KSFO.json");
    }
}
