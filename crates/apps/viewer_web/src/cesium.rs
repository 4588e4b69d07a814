//! Globe engine backed by the page's JS engine shim (`www/engine.js`).

use foundation::GeoRect;
use foundation::math::{HeadingPitchRange, Vec3};
use layers::{ImagerySlot, RasterLayer, TerrainMode};
use streaming::Request;
use visibility::{CameraPose, RenderEngine, TilesetExtras};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};

#[wasm_bindgen(module = "/www/engine.js")]
extern "C" {
    #[wasm_bindgen(js_name = createViewer)]
    fn create_viewer(container_id: &str);
    #[wasm_bindgen(js_name = setHomeView)]
    fn set_home_view(west: f64, south: f64, east: f64, north: f64);
    #[wasm_bindgen(js_name = addImagery)]
    fn add_imagery(
        url_template: &str,
        credit: &str,
        has_alpha: bool,
        minimum_level: Option<u32>,
        maximum_level: u32,
    );
    #[wasm_bindgen(js_name = setImageryShown)]
    fn set_imagery_shown(index: u32, shown: bool);
    #[wasm_bindgen(js_name = setWorldTerrain)]
    fn set_world_terrain(on: bool);
    #[wasm_bindgen(js_name = setTerrainExaggeration)]
    fn set_terrain_exaggeration(scale: f64);
    #[wasm_bindgen(js_name = enableInspector)]
    fn enable_inspector();
    #[wasm_bindgen(js_name = addTileset)]
    fn add_tileset(id: f64, url: &str) -> js_sys::Promise;
    #[wasm_bindgen(js_name = removeTileset)]
    fn remove_tileset(id: f64);
    #[wasm_bindgen(js_name = flyToTileset)]
    fn fly_to_tileset(id: f64, heading: f64, pitch: f64, range: f64);
    #[wasm_bindgen(js_name = cameraPose)]
    fn camera_pose() -> Vec<f64>;
    #[wasm_bindgen(js_name = setCameraPose)]
    fn set_camera_pose(pose: Vec<f64>);
    #[wasm_bindgen(js_name = onCameraMoveEnd)]
    pub fn on_camera_move_end(callback: &Closure<dyn FnMut()>);
    #[wasm_bindgen(js_name = destroyViewer)]
    pub fn destroy_viewer();
}

/// Engine handle. The viewer itself lives on the JS side; tilesets are keyed
/// there by request id.
#[derive(Debug)]
pub struct CesiumEngine {
    on_ready: fn(Request, TilesetExtras),
}

impl CesiumEngine {
    /// Create the viewer in `container_id`. `on_ready` is invoked on a later
    /// event-loop turn once a tileset's ready promise resolves.
    pub fn new(container_id: &str, on_ready: fn(Request, TilesetExtras)) -> Self {
        create_viewer(container_id);
        Self { on_ready }
    }
}

impl RenderEngine for CesiumEngine {
    fn set_home_view(&mut self, rect: GeoRect) {
        set_home_view(rect.west, rect.south, rect.east, rect.north);
    }

    fn add_imagery(&mut self, _slot: ImagerySlot, layer: &RasterLayer) {
        // Slots are appended in order, so the stack index matches.
        add_imagery(
            &layer.url_template,
            &layer.credit,
            layer.has_alpha,
            layer.minimum_level,
            layer.maximum_level,
        );
    }

    fn set_imagery_shown(&mut self, slot: ImagerySlot, shown: bool) {
        set_imagery_shown(slot.index() as u32, shown);
    }

    fn set_terrain(&mut self, mode: TerrainMode) {
        set_world_terrain(mode == TerrainMode::World);
    }

    fn set_terrain_exaggeration(&mut self, scale: f64) {
        set_terrain_exaggeration(scale);
    }

    fn enable_inspector(&mut self) {
        enable_inspector();
    }

    fn attach_tileset(&mut self, request: Request, url: &str) {
        let ready = add_tileset(request.0 as f64, url);
        let on_ready = self.on_ready;
        spawn_local(async move {
            match JsFuture::from(ready).await {
                Ok(extras) => on_ready(request, extras_from_js(&extras)),
                Err(err) => tracing::warn!(request = request.0, "tileset load failed: {:?}", err),
            }
        });
    }

    fn detach_tileset(&mut self, request: Request) {
        remove_tileset(request.0 as f64);
    }

    fn fly_to_tileset(&mut self, request: Request, offset: HeadingPitchRange) {
        fly_to_tileset(request.0 as f64, offset.heading, offset.pitch, offset.range);
    }

    fn camera_pose(&self) -> CameraPose {
        let v = camera_pose();
        if v.len() < 9 {
            return CameraPose::default();
        }
        CameraPose {
            position: Vec3::new(v[0], v[1], v[2]),
            direction: Vec3::new(v[3], v[4], v[5]),
            up: Vec3::new(v[6], v[7], v[8]),
        }
    }

    fn set_camera_pose(&mut self, pose: CameraPose) {
        let mut v = Vec::with_capacity(9);
        for part in [pose.position, pose.direction, pose.up] {
            v.extend_from_slice(&part.to_array());
        }
        set_camera_pose(v);
    }
}

/// Read `{ flyto, height }` from a tileset's `extras`. Missing fields default.
fn extras_from_js(value: &JsValue) -> TilesetExtras {
    let field = |name: &str| js_sys::Reflect::get(value, &JsValue::from_str(name)).ok();
    TilesetExtras {
        flyto: field("flyto").is_some_and(|v| v.is_truthy()),
        height: field("height").and_then(|v| v.as_f64()),
    }
}
