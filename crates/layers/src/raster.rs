use serde::{Deserialize, Serialize};

/// Imagery tile source addressed by a `{z}/{x}/{y}` URL template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterLayer {
    pub url_template: String,
    pub credit: String,
    pub has_alpha: bool,
    pub minimum_level: Option<u32>,
    pub maximum_level: u32,
}

impl RasterLayer {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            ..Self::default()
        }
    }

    /// Chart layer served from `<root>/<name>/{z}/{x}/{y}.png`.
    pub fn chart(root: &str, name: &str) -> Self {
        Self::new(format!(
            "{}/{name}/{{z}}/{{x}}/{{y}}.png",
            root.trim_end_matches('/')
        ))
    }
}

impl Default for RasterLayer {
    fn default() -> Self {
        Self {
            url_template: String::new(),
            credit: "Artfahrt Inc".to_string(),
            has_alpha: true,
            minimum_level: None,
            maximum_level: 12,
        }
    }
}
