use std::collections::BTreeMap;

use layers::AirspaceId;

use crate::request::Request;
use crate::residency::{Residency, ResidencyState};

/// One lazily constructed airspace asset.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub request: Request,
    /// Tileset URL the asset was built from.
    pub source: String,
    pub residency: Residency,
    /// Frame the asset once it becomes ready.
    pub fly_to_on_ready: bool,
}

/// Outcome of a readiness notification.
#[derive(Debug, Clone, PartialEq)]
pub enum Readiness {
    /// First readiness for a live entry.
    Ready { id: AirspaceId, fly_to: bool },
    /// The request was already reported ready.
    Duplicate,
    /// The entry was removed (or re-created) after the request was issued.
    Stale,
}

/// Registry of airspace assets currently attached to the scene.
///
/// Invariant: an id has an entry iff its asset is attached. Entries are keyed
/// in a `BTreeMap` so iteration is sorted and deterministic.
#[derive(Debug, Default)]
pub struct AirspaceRegistry {
    next_request: u64,
    entries: BTreeMap<AirspaceId, AssetEntry>,
    requests: BTreeMap<Request, AirspaceId>,
}

impl AirspaceRegistry {
    pub fn new() -> Self {
        Self {
            next_request: 1,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &AirspaceId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &AirspaceId) -> Option<&AssetEntry> {
        self.entries.get(id)
    }

    /// Sorted airport codes, excluding airspace class models.
    pub fn airports(&self) -> Vec<AirspaceId> {
        self.entries.keys().filter(|id| !id.is_class()).cloned().collect()
    }

    /// Tracked ids in the order they were shown. Requests are issued in
    /// increasing order, so the request index is also the show order.
    pub fn ids_in_show_order(&self) -> Vec<AirspaceId> {
        self.requests.values().cloned().collect()
    }

    /// Track a new asset and issue its request.
    ///
    /// Returns `None` if `id` is already tracked; showing twice is a no-op.
    pub fn insert(
        &mut self,
        id: AirspaceId,
        source: impl Into<String>,
        fly_to_on_ready: bool,
    ) -> Option<Request> {
        if self.entries.contains_key(&id) {
            return None;
        }
        let req = Request(self.next_request.max(1));
        self.next_request = req.0 + 1;
        self.requests.insert(req, id.clone());
        self.entries.insert(
            id,
            AssetEntry {
                request: req,
                source: source.into(),
                residency: Residency::new(),
                fly_to_on_ready,
            },
        );
        Some(req)
    }

    /// Stop tracking `id`. Its request becomes stale.
    pub fn remove(&mut self, id: &AirspaceId) -> Option<AssetEntry> {
        let entry = self.entries.remove(id)?;
        self.requests.remove(&entry.request);
        Some(entry)
    }

    /// Apply a readiness notification for `req`.
    pub fn mark_ready(&mut self, req: Request) -> Readiness {
        let Some(id) = self.requests.get(&req) else {
            tracing::debug!(request = req.0, "ignoring stale readiness");
            return Readiness::Stale;
        };
        let Some(entry) = self.entries.get_mut(id) else {
            return Readiness::Stale;
        };
        if entry.residency.is_resident() {
            return Readiness::Duplicate;
        }
        entry.residency.state = ResidencyState::Resident;
        Readiness::Ready {
            id: id.clone(),
            fly_to: entry.fly_to_on_ready,
        }
    }

    /// Requests still waiting for readiness, in issue order.
    pub fn pending(&self) -> Vec<Request> {
        self.requests
            .iter()
            .filter(|(_, id)| {
                self.entries
                    .get(*id)
                    .is_some_and(|e| !e.residency.is_resident())
            })
            .map(|(req, _)| *req)
            .collect()
    }

    /// Remove every entry, returning them in id order.
    pub fn clear(&mut self) -> Vec<(AirspaceId, AssetEntry)> {
        self.requests.clear();
        std::mem::take(&mut self.entries).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{AirspaceRegistry, Readiness};
    use layers::AirspaceId;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> AirspaceId {
        AirspaceId::new(s)
    }

    #[test]
    fn insert_is_idempotent() {
        let mut r = AirspaceRegistry::new();
        assert!(r.insert(id("KSFO"), "a/KSFO.json", true).is_some());
        assert!(r.insert(id("KSFO"), "a/KSFO.json", true).is_none());
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn membership_tracks_net_toggle_parity() {
        let mut r = AirspaceRegistry::new();
        let code = id("KJFK");
        for n in 1..=7 {
            if n % 2 == 1 {
                r.insert(code.clone(), "x", false);
            } else {
                r.remove(&code);
            }
            assert_eq!(r.contains(&code), n % 2 == 1, "after {n} toggles");
        }
        // Extra removals of an absent entry are no-ops.
        r.remove(&code);
        r.remove(&code);
        r.remove(&code);
        assert!(!r.contains(&code));
    }

    #[test]
    fn readiness_after_removal_is_stale() {
        let mut r = AirspaceRegistry::new();
        let req = r.insert(id("KSFO"), "x", true).expect("new entry");
        r.remove(&id("KSFO"));
        assert_eq!(r.mark_ready(req), Readiness::Stale);
        assert!(!r.contains(&id("KSFO")));
    }

    #[test]
    fn readiness_for_previous_incarnation_is_stale() {
        let mut r = AirspaceRegistry::new();
        let old = r.insert(id("KSFO"), "1x/KSFO.json", true).expect("first");
        r.remove(&id("KSFO"));
        let new = r.insert(id("KSFO"), "5x/KSFO.json", false).expect("second");
        assert_ne!(old, new);
        assert_eq!(r.mark_ready(old), Readiness::Stale);
        assert_eq!(
            r.mark_ready(new),
            Readiness::Ready {
                id: id("KSFO"),
                fly_to: false
            }
        );
    }

    #[test]
    fn readiness_is_reported_once() {
        let mut r = AirspaceRegistry::new();
        let req = r.insert(id("CLASS_B"), "x", true).expect("new");
        assert!(matches!(r.mark_ready(req), Readiness::Ready { .. }));
        assert_eq!(r.mark_ready(req), Readiness::Duplicate);
        assert!(r.pending().is_empty());
    }

    #[test]
    fn airports_exclude_classes_and_are_sorted() {
        let mut r = AirspaceRegistry::new();
        for code in ["KSFO", "CLASS_B", "KJFK"] {
            r.insert(id(code), "x", false);
        }
        assert_eq!(r.airports(), vec![id("KJFK"), id("KSFO")]);
        assert_eq!(r.ids_in_show_order().len(), 3);
    }

    #[test]
    fn clear_empties_both_indexes() {
        let mut r = AirspaceRegistry::new();
        let req = r.insert(id("KSFO"), "x", false).expect("new");
        let removed = r.clear();
        assert_eq!(removed.len(), 1);
        assert!(r.is_empty());
        assert!(r.ids_in_show_order().is_empty());
        assert_eq!(r.mark_ready(req), Readiness::Stale);
    }

    #[test]
    fn show_order_follows_insertion_not_ids() {
        let mut r = AirspaceRegistry::new();
        for code in ["KSFO", "CLASS_B", "KJFK"] {
            r.insert(id(code), "x", false);
        }
        r.remove(&id("KSFO"));
        r.insert(id("KSFO"), "y", false);
        assert_eq!(
            r.ids_in_show_order(),
            vec![id("CLASS_B"), id("KJFK"), id("KSFO")]
        );
        r.remove(&id("CLASS_B"));
        r.insert(id("CLASS_B"), "y", false);
        assert_eq!(
            r.ids_in_show_order(),
            vec![id("KJFK"), id("KSFO"), id("CLASS_B")]
        );
    }
}
