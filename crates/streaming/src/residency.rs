/// Lifecycle of an attached airspace asset.
///
/// Requested → Resident. Removal deletes the entry outright, there is no
/// evicted state to linger in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResidencyState {
    /// Attached to the scene, tileset still loading.
    Requested,
    /// The engine reported the tileset ready.
    Resident,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Residency {
    pub state: ResidencyState,
}

impl Residency {
    pub fn new() -> Self {
        Self {
            state: ResidencyState::Requested,
        }
    }

    pub fn is_resident(&self) -> bool {
        self.state == ResidencyState::Resident
    }
}

impl Default for Residency {
    fn default() -> Self {
        Self::new()
    }
}
