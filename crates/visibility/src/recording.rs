//! Headless engine and controls that record what they were asked to do.
//!
//! Used by the native replay tool and by tests.

use std::collections::{BTreeMap, BTreeSet};

use foundation::GeoRect;
use foundation::math::HeadingPitchRange;
use layers::{ImagerySlot, OverlayId, RasterLayer, TerrainMode};
use streaming::Request;

use crate::engine::{CameraPose, Controls, RenderEngine};

#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    HomeView(GeoRect),
    AddImagery { slot: ImagerySlot, url_template: String },
    ImageryShown { slot: ImagerySlot, shown: bool },
    Terrain(TerrainMode),
    Exaggeration(f64),
    Inspector,
    Attach { request: Request, url: String },
    Detach(Request),
    FlyTo { request: Request, offset: HeadingPitchRange },
    SetCamera(CameraPose),
}

#[derive(Debug)]
pub struct RecordingEngine {
    calls: Vec<EngineCall>,
    imagery_shown: [bool; 3],
    terrain: TerrainMode,
    exaggeration: f64,
    attached: BTreeMap<Request, String>,
    camera: CameraPose,
}

impl Default for RecordingEngine {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            // The engine's base imagery starts visible.
            imagery_shown: [true, false, false],
            terrain: TerrainMode::Ellipsoid,
            exaggeration: 1.0,
            attached: BTreeMap::new(),
            camera: CameraPose::default(),
        }
    }
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<EngineCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn imagery_shown(&self, slot: ImagerySlot) -> bool {
        self.imagery_shown[slot.index()]
    }

    pub fn terrain(&self) -> TerrainMode {
        self.terrain
    }

    pub fn exaggeration(&self) -> f64 {
        self.exaggeration
    }

    /// URLs of tilesets currently in the scene, in request order.
    pub fn attached_urls(&self) -> Vec<&str> {
        self.attached.values().map(String::as_str).collect()
    }

    pub fn is_attached(&self, request: Request) -> bool {
        self.attached.contains_key(&request)
    }

    pub fn fly_tos(&self) -> Vec<Request> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::FlyTo { request, .. } => Some(*request),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, call: EngineCall) {
        tracing::debug!(?call, "engine");
        self.calls.push(call);
    }
}

impl RenderEngine for RecordingEngine {
    fn set_home_view(&mut self, rect: GeoRect) {
        self.record(EngineCall::HomeView(rect));
    }

    fn add_imagery(&mut self, slot: ImagerySlot, layer: &RasterLayer) {
        self.record(EngineCall::AddImagery {
            slot,
            url_template: layer.url_template.clone(),
        });
    }

    fn set_imagery_shown(&mut self, slot: ImagerySlot, shown: bool) {
        self.imagery_shown[slot.index()] = shown;
        self.record(EngineCall::ImageryShown { slot, shown });
    }

    fn set_terrain(&mut self, mode: TerrainMode) {
        self.terrain = mode;
        self.record(EngineCall::Terrain(mode));
    }

    fn set_terrain_exaggeration(&mut self, scale: f64) {
        self.exaggeration = scale;
        self.record(EngineCall::Exaggeration(scale));
    }

    fn enable_inspector(&mut self) {
        self.record(EngineCall::Inspector);
    }

    fn attach_tileset(&mut self, request: Request, url: &str) {
        self.attached.insert(request, url.to_string());
        self.record(EngineCall::Attach {
            request,
            url: url.to_string(),
        });
    }

    fn detach_tileset(&mut self, request: Request) {
        self.attached.remove(&request);
        self.record(EngineCall::Detach(request));
    }

    fn fly_to_tileset(&mut self, request: Request, offset: HeadingPitchRange) {
        self.record(EngineCall::FlyTo { request, offset });
    }

    fn camera_pose(&self) -> CameraPose {
        self.camera
    }

    fn set_camera_pose(&mut self, pose: CameraPose) {
        self.camera = pose;
        self.record(EngineCall::SetCamera(pose));
    }
}

/// Checkbox and text-field state of a page without a page.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingControls {
    pub checked: BTreeSet<OverlayId>,
    pub airport_field: String,
}

impl Controls for RecordingControls {
    fn set_checked(&mut self, overlay: &OverlayId, checked: bool) {
        if checked {
            self.checked.insert(overlay.clone());
        } else {
            self.checked.remove(overlay);
        }
    }

    fn set_airport_field(&mut self, text: &str) {
        self.airport_field = text.to_string();
    }
}
