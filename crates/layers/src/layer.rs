use std::fmt;

use crate::airspace::AirspaceId;

/// Slot of an imagery layer in the engine's imagery stack.
///
/// The base (earth) imagery is the engine's built-in layer at index 0; the
/// chart layers are added on top in this order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImagerySlot {
    Base,
    Sectional,
    Terminal,
}

impl ImagerySlot {
    pub const ALL: [ImagerySlot; 3] = [
        ImagerySlot::Base,
        ImagerySlot::Sectional,
        ImagerySlot::Terminal,
    ];

    pub fn index(self) -> usize {
        match self {
            ImagerySlot::Base => 0,
            ImagerySlot::Sectional => 1,
            ImagerySlot::Terminal => 2,
        }
    }
}

/// What toggling an overlay does.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OverlayKind {
    Imagery(ImagerySlot),
    Terrain,
    Exaggeration,
    Airspace,
}

/// Identifier of a togglable overlay. Matches the checkbox id in the page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayId {
    Earth,
    Sectional,
    Terminal,
    Terrain,
    Exaggeration,
    /// An airspace class model such as `CLASS_B`.
    AirspaceClass(AirspaceId),
}

pub const AIRSPACE_CLASS_PREFIX: &str = "CLASS_";

/// Fixed overlays, by checkbox id.
pub const FIXED_OVERLAYS: [(&str, OverlayId, OverlayKind); 5] = [
    (
        "EARTH",
        OverlayId::Earth,
        OverlayKind::Imagery(ImagerySlot::Base),
    ),
    (
        "SEC",
        OverlayId::Sectional,
        OverlayKind::Imagery(ImagerySlot::Sectional),
    ),
    (
        "TAC",
        OverlayId::Terminal,
        OverlayKind::Imagery(ImagerySlot::Terminal),
    ),
    ("TERRAIN", OverlayId::Terrain, OverlayKind::Terrain),
    ("5X", OverlayId::Exaggeration, OverlayKind::Exaggeration),
];

impl OverlayId {
    /// Parse a checkbox id. Returns `None` for names that are not overlays.
    pub fn parse(name: &str) -> Option<Self> {
        if let Some((_, id, _)) = FIXED_OVERLAYS.iter().find(|(n, _, _)| *n == name) {
            return Some(id.clone());
        }
        match name.strip_prefix(AIRSPACE_CLASS_PREFIX) {
            Some(class) if !class.is_empty() => {
                Some(OverlayId::AirspaceClass(AirspaceId::new(name)))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OverlayId::AirspaceClass(id) => id.as_str(),
            fixed => FIXED_OVERLAYS
                .iter()
                .find(|(_, id, _)| id == fixed)
                .map(|(n, _, _)| *n)
                .unwrap_or_default(),
        }
    }

    pub fn kind(&self) -> OverlayKind {
        match self {
            OverlayId::AirspaceClass(_) => OverlayKind::Airspace,
            fixed => FIXED_OVERLAYS
                .iter()
                .find(|(_, id, _)| id == fixed)
                .map(|(_, _, kind)| *kind)
                .unwrap_or(OverlayKind::Airspace),
        }
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{ImagerySlot, OverlayId, OverlayKind};
    use crate::airspace::AirspaceId;

    #[test]
    fn parses_fixed_overlays() {
        assert_eq!(OverlayId::parse("EARTH"), Some(OverlayId::Earth));
        assert_eq!(OverlayId::parse("5X"), Some(OverlayId::Exaggeration));
        assert_eq!(
            OverlayId::parse("TAC").map(|o| o.kind()),
            Some(OverlayKind::Imagery(ImagerySlot::Terminal))
        );
    }

    #[test]
    fn parses_airspace_classes() {
        let o = OverlayId::parse("CLASS_C").expect("class overlay");
        assert_eq!(o, OverlayId::AirspaceClass(AirspaceId::new("CLASS_C")));
        assert_eq!(o.kind(), OverlayKind::Airspace);
        assert_eq!(o.as_str(), "CLASS_C");
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(OverlayId::parse("airports"), None);
        assert_eq!(OverlayId::parse("CLASS_"), None);
        assert_eq!(OverlayId::parse("earth"), None);
        assert_eq!(OverlayId::parse(""), None);
    }

    #[test]
    fn names_round_trip() {
        for name in ["EARTH", "SEC", "TAC", "TERRAIN", "5X", "CLASS_D"] {
            let o = OverlayId::parse(name).expect(name);
            assert_eq!(o.to_string(), name);
        }
    }

    #[test]
    fn slots_follow_engine_stack_order() {
        let idx: Vec<usize> = ImagerySlot::ALL.iter().map(|s| s.index()).collect();
        assert_eq!(idx, vec![0, 1, 2]);
    }
}
