use std::collections::BTreeSet;

use foundation::math::{HeadingPitchRange, Vec3};
use layers::{
    AirspaceId, AirspaceSource, Exaggeration, ImagerySlot, OverlayId, OverlayKind, TerrainMode,
};
use runtime::EventBus;
use session::{KeyValueStore, StateKeys, decode_list, decode_vec3, encode_list, encode_vec3};
use streaming::{AirspaceRegistry, Readiness, Request};
use tracing::{debug, info, warn};

use crate::engine::{CameraPose, Controls, RenderEngine, TilesetExtras};
use crate::events::ViewerEvent;
use crate::settings::Settings;

/// Owns overlay visibility for one page session.
///
/// Mirrors the checked overlays, tracks airspace assets attached to the scene
/// and persists both (plus the camera pose) into a key/value store. All
/// operations are best-effort: store failures are logged and skipped.
pub struct VisibilityManager<E, S, C> {
    settings: Settings,
    keys: StateKeys,
    source: AirspaceSource,
    exaggeration: Exaggeration,
    engine: E,
    store: S,
    controls: C,
    registry: AirspaceRegistry,
    checked: BTreeSet<OverlayId>,
}

impl<E, S, C> VisibilityManager<E, S, C>
where
    E: RenderEngine,
    S: KeyValueStore,
    C: Controls,
{
    pub fn new(settings: Settings, engine: E, store: S, controls: C) -> Self {
        Self {
            keys: StateKeys::with_prefix(&settings.store_prefix),
            source: AirspaceSource::new(&settings.tile_root),
            exaggeration: Exaggeration::new(settings.exaggeration),
            settings,
            engine,
            store,
            controls,
            registry: AirspaceRegistry::new(),
            checked: BTreeSet::new(),
        }
    }

    /// Configure the engine: home view, chart imagery (hidden), flat terrain
    /// at unit scale.
    pub fn init(&mut self) {
        self.engine.set_home_view(self.settings.home_view);
        self.engine
            .add_imagery(ImagerySlot::Sectional, &self.settings.sectional_layer());
        self.engine
            .add_imagery(ImagerySlot::Terminal, &self.settings.terminal_layer());
        for slot in ImagerySlot::ALL {
            self.engine.set_imagery_shown(slot, false);
        }
        self.engine.set_terrain(TerrainMode::Ellipsoid);
        self.engine.set_terrain_exaggeration(1.0);
        if self.settings.inspector {
            self.engine.enable_inspector();
        }
        info!("viewer initialized");
    }

    /// Detach every asset and hand back the collaborators.
    pub fn teardown(mut self) -> (E, S, C) {
        for (id, entry) in self.registry.clear() {
            debug!(%id, "detach on teardown");
            self.engine.detach_tileset(entry.request);
        }
        (self.engine, self.store, self.controls)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn controls(&self) -> &C {
        &self.controls
    }

    pub fn registry(&self) -> &AirspaceRegistry {
        &self.registry
    }

    pub fn is_exaggerated(&self) -> bool {
        self.exaggeration.enabled
    }

    /// Checked overlay ids, sorted.
    pub fn visible_layers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.checked.iter().map(|o| o.to_string()).collect();
        names.sort();
        names
    }

    /// Visible airport codes, sorted, airspace classes excluded.
    pub fn visible_airports(&self) -> Vec<AirspaceId> {
        self.registry.airports()
    }

    /// Toggle an overlay by checkbox id. Unknown ids are ignored.
    pub fn set_layer_visible(&mut self, name: &str, on: bool) {
        match OverlayId::parse(name) {
            Some(overlay) => self.set_overlay_visible(&overlay, on),
            None => debug!(name, "ignoring unknown overlay"),
        }
    }

    pub fn set_overlay_visible(&mut self, overlay: &OverlayId, on: bool) {
        debug!(%overlay, on, "set overlay");
        if on {
            self.checked.insert(overlay.clone());
        } else {
            self.checked.remove(overlay);
        }
        match (overlay.kind(), overlay) {
            (OverlayKind::Imagery(slot), _) => self.engine.set_imagery_shown(slot, on),
            (OverlayKind::Terrain, _) => self.engine.set_terrain(TerrainMode::from_enabled(on)),
            (OverlayKind::Exaggeration, _) => self.set_exaggerated(on),
            (OverlayKind::Airspace, OverlayId::AirspaceClass(id)) => {
                self.set_airport_visible(id.clone(), on, true)
            }
            (OverlayKind::Airspace, _) => {}
        }
    }

    /// Switch terrain scale and rebuild every tracked asset from the matching
    /// directory, in the order the assets were first shown.
    fn set_exaggerated(&mut self, on: bool) {
        self.exaggeration.enabled = on;
        self.engine
            .set_terrain_exaggeration(self.exaggeration.scale());

        let ids = self.registry.ids_in_show_order();
        info!(
            count = ids.len(),
            directory = %self.source.directory(&self.exaggeration),
            "rebuilding airspace assets"
        );
        for id in &ids {
            self.set_airport_visible(id.clone(), false, false);
        }
        let fly_to = self.settings.fly_to_on_rescale;
        for (i, id) in ids.into_iter().enumerate() {
            self.set_airport_visible(id, true, fly_to && i == 0);
        }
    }

    /// Show or hide one airspace asset.
    ///
    /// Showing an already tracked asset and hiding an untracked one are
    /// no-ops. Showing only issues the load; readiness (and any fly-to) comes
    /// later through [`Self::tileset_ready`].
    pub fn set_airport_visible(&mut self, id: AirspaceId, on: bool, fly_to: bool) {
        if on {
            let url = self.source.tileset_url(&self.exaggeration, &id);
            if let Some(request) = self.registry.insert(id.clone(), url.clone(), fly_to) {
                debug!(%id, %url, request = request.0, fly_to, "show airspace");
                self.engine.attach_tileset(request, &url);
            }
        } else if let Some(entry) = self.registry.remove(&id) {
            debug!(%id, request = entry.request.0, "hide airspace");
            self.engine.detach_tileset(entry.request);
        }
    }

    /// Readiness notification for a tileset load.
    ///
    /// Stale notifications (the asset was hidden, or rebuilt under a newer
    /// request) are dropped without touching the registry.
    pub fn tileset_ready(&mut self, request: Request, extras: TilesetExtras) {
        match self.registry.mark_ready(request) {
            Readiness::Ready { id, fly_to } => {
                debug!(%id, request = request.0, "tileset ready");
                if fly_to && extras.flyto {
                    let offset = HeadingPitchRange::from_degrees(
                        self.settings.fly_to_heading_deg,
                        self.settings.fly_to_pitch_deg,
                        extras.height.unwrap_or(0.0),
                    );
                    info!(%id, range = offset.range, "fly to airspace");
                    self.engine.fly_to_tileset(request, offset);
                }
            }
            Readiness::Duplicate => debug!(request = request.0, "duplicate readiness"),
            Readiness::Stale => debug!(request = request.0, "stale readiness"),
        }
    }

    /// Replace the visible airports with the comma-separated codes in `text`.
    ///
    /// Codes are trimmed and uppercased; only the first one flies. Blank
    /// input is ignored.
    pub fn submit_airports(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        info!(text = text.trim(), "show airports");
        for id in self.registry.airports() {
            self.set_airport_visible(id, false, false);
        }
        let mut fly_to = true;
        for id in text.split(',').filter_map(AirspaceId::from_user_input) {
            self.set_airport_visible(id, true, fly_to);
            fly_to = false;
        }
        self.save_state();
    }

    pub fn save_state(&mut self) {
        let layers = encode_list(self.visible_layers());
        let airports = encode_list(self.visible_airports().iter().map(AirspaceId::as_str));
        let keys = self.keys.clone();
        self.write(&keys.layers, &layers);
        self.write(&keys.airports, &airports);
    }

    /// Replay persisted layers, airports and camera pose.
    ///
    /// Missing layers fall back to the configured defaults. Restored airports
    /// never fly, the camera pose is restored instead.
    pub fn restore_state(&mut self) {
        let layers = self
            .read(&self.keys.layers)
            .unwrap_or_else(|| self.settings.default_layers.join(","));
        info!(%layers, "restore layers");
        for name in decode_list(&layers) {
            let Some(overlay) = OverlayId::parse(&name) else {
                debug!(%name, "skipping unknown persisted overlay");
                continue;
            };
            self.set_overlay_visible(&overlay, true);
            self.controls.set_checked(&overlay, true);
        }

        if let Some(airports) = self
            .read(&self.keys.airports)
            .filter(|a| !a.is_empty())
        {
            info!(%airports, "restore airports");
            for code in decode_list(&airports) {
                if let Some(id) = AirspaceId::from_user_input(&code) {
                    self.set_airport_visible(id, true, false);
                }
            }
            self.controls.set_airport_field(&airports);
        }

        self.restore_camera();
    }

    pub fn camera_moved(&mut self, pose: CameraPose) {
        let keys = self.keys.clone();
        self.write(&keys.camera_position, &encode_vec3(pose.position));
        self.write(&keys.camera_direction, &encode_vec3(pose.direction));
        self.write(&keys.camera_up, &encode_vec3(pose.up));
    }

    /// Apply whichever camera vectors were persisted over the current pose.
    pub fn restore_camera(&mut self) {
        let keys = self.keys.clone();
        let mut pose = self.engine.camera_pose();
        let mut changed = false;
        let parts: [(&str, &mut Vec3); 3] = [
            (&keys.camera_position, &mut pose.position),
            (&keys.camera_direction, &mut pose.direction),
            (&keys.camera_up, &mut pose.up),
        ];
        for (key, part) in parts {
            let Some(raw) = self.read(key) else {
                continue;
            };
            match decode_vec3(&raw) {
                Ok(v) => {
                    *part = v;
                    changed = true;
                }
                Err(e) => warn!(key, %raw, "ignoring camera value: {e}"),
            }
        }
        if changed {
            self.engine.set_camera_pose(pose);
        }
    }

    pub fn handle(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::LayerToggled { id, checked } => {
                self.set_layer_visible(&id, checked);
                self.save_state();
            }
            ViewerEvent::AirportsSubmitted { text } => self.submit_airports(&text),
            ViewerEvent::CameraMoved { pose } => self.camera_moved(pose),
            ViewerEvent::TilesetReady { request, extras } => self.tileset_ready(request, extras),
        }
    }

    /// Deliver every queued event, including ones posted while handling.
    pub fn run_events(&mut self, bus: &mut EventBus<ViewerEvent>) -> usize {
        bus.run_until_idle(|_, event| self.handle(event.payload))
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, "state read failed: {e}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, "state write failed: {e}");
        }
    }
}
