use foundation::GeoRect;
use foundation::math::{HeadingPitchRange, Vec3};
use layers::{ImagerySlot, OverlayId, RasterLayer, TerrainMode};
use serde::{Deserialize, Serialize};
use streaming::Request;

#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub direction: Vec3,
    pub up: Vec3,
}

/// Metadata a tileset declares in its `extras` block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesetExtras {
    /// The asset wants the camera to frame it when first shown.
    pub flyto: bool,
    /// Suggested viewing range in meters. Zero lets the engine pick one.
    pub height: Option<f64>,
}

/// The globe engine, as seen by the visibility manager.
///
/// Tileset construction is asynchronous: `attach_tileset` returns at once and
/// readiness is reported later through
/// [`VisibilityManager::tileset_ready`](crate::VisibilityManager::tileset_ready).
pub trait RenderEngine {
    fn set_home_view(&mut self, rect: GeoRect);
    fn add_imagery(&mut self, slot: ImagerySlot, layer: &RasterLayer);
    fn set_imagery_shown(&mut self, slot: ImagerySlot, shown: bool);
    fn set_terrain(&mut self, mode: TerrainMode);
    fn set_terrain_exaggeration(&mut self, scale: f64);
    fn enable_inspector(&mut self);
    fn attach_tileset(&mut self, request: Request, url: &str);
    fn detach_tileset(&mut self, request: Request);
    fn fly_to_tileset(&mut self, request: Request, offset: HeadingPitchRange);
    fn camera_pose(&self) -> CameraPose;
    fn set_camera_pose(&mut self, pose: CameraPose);
}

/// Page controls mirroring overlay state.
pub trait Controls {
    fn set_checked(&mut self, overlay: &OverlayId, checked: bool);
    fn set_airport_field(&mut self, text: &str);
}
