use console_error_panic_hook::set_once;
use gloo_net::http::Request as HttpRequest;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use session::CookieStore;
use streaming::Request;
use visibility::{Settings, TilesetExtras, ViewerEvent, VisibilityManager};

mod cesium;
mod console;
mod controls;
use cesium::{CesiumEngine, destroy_viewer, on_camera_move_end};
use controls::PageControls;

type PageManager = VisibilityManager<CesiumEngine, CookieStore, PageControls>;

thread_local! {
    static STATE: RefCell<Option<PageManager>> = const { RefCell::new(None) };
}

/// Run `f` against the live manager, if the page has booted.
fn with_manager(f: impl FnOnce(&mut PageManager)) {
    STATE.with(|state| match state.borrow_mut().as_mut() {
        Some(m) => f(m),
        None => tracing::debug!("viewer not booted, dropping callback"),
    });
}

fn tileset_ready(request: Request, extras: TilesetExtras) {
    with_manager(|m| m.handle(ViewerEvent::TilesetReady { request, extras }));
}

fn debug_requested() -> bool {
    let Some(search) = web_sys::window().and_then(|w| w.location().search().ok()) else {
        return false;
    };
    web_sys::UrlSearchParams::new_with_str(&search)
        .map(|p| p.get("debug").is_some())
        .unwrap_or(false)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    console::init_tracing(tracing::Level::INFO);
    Ok(())
}

/// Create the viewer in `container_id` with default settings and restore the
/// previous session.
#[wasm_bindgen]
pub fn boot(container_id: &str) -> Result<(), JsValue> {
    boot_with(container_id, Settings::default())
}

/// Like [`boot`], with settings fetched as JSON from `url`.
#[wasm_bindgen]
pub fn boot_from_url(container_id: String, url: String) {
    spawn_local(async move {
        let settings = match fetch_settings(&url).await {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(%url, "using default settings: {:?}", err);
                Settings::default()
            }
        };
        if let Err(err) = boot_with(&container_id, settings) {
            tracing::error!("boot failed: {:?}", err);
        }
    });
}

fn boot_with(container_id: &str, mut settings: Settings) -> Result<(), JsValue> {
    settings.inspector |= debug_requested();
    let installed = STATE.with(|state| {
        install(state, || {
            let store = CookieStore::new().map_err(|e| JsValue::from_str(&e.to_string()))?;
            let engine = CesiumEngine::new(container_id, tileset_ready);
            let mut manager = VisibilityManager::new(settings, engine, store, PageControls);
            manager.init();
            manager.restore_state();
            Ok::<_, JsValue>(manager)
        })
    })?;
    if !installed {
        return Err(JsValue::from_str("viewer already booted, call shutdown first"));
    }

    let on_move_end = Closure::<dyn FnMut()>::new(camera_move_end);
    on_camera_move_end(&on_move_end);
    on_move_end.forget();
    Ok(())
}

/// Fill an empty slot with `build()`. A live value is left alone and `build`
/// is not called; returns whether the slot was filled.
fn install<T, E>(
    slot: &RefCell<Option<T>>,
    build: impl FnOnce() -> Result<T, E>,
) -> Result<bool, E> {
    if slot.borrow().is_some() {
        return Ok(false);
    }
    let value = build()?;
    *slot.borrow_mut() = Some(value);
    Ok(true)
}

/// `.layer` checkbox change handler.
#[wasm_bindgen]
pub fn layer_changed(id: String, checked: bool) {
    with_manager(|m| m.handle(ViewerEvent::LayerToggled { id, checked }));
}

/// Airport text field handler; call on Enter.
#[wasm_bindgen]
pub fn airports_submitted(text: String) {
    with_manager(|m| m.handle(ViewerEvent::AirportsSubmitted { text }));
}

fn camera_move_end() {
    with_manager(|m| {
        let pose = visibility::RenderEngine::camera_pose(m.engine());
        m.handle(ViewerEvent::CameraMoved { pose });
    });
}

/// Visible layers, comma-joined and sorted.
#[wasm_bindgen]
pub fn visible_layers() -> String {
    let mut out = String::new();
    with_manager(|m| out = m.visible_layers().join(","));
    out
}

/// Detach every airspace asset, drop the manager and destroy the globe.
/// The page may `boot` again afterwards.
#[wasm_bindgen]
pub fn shutdown() {
    if let Some(manager) = STATE.with(|state| state.borrow_mut().take()) {
        let _ = manager.teardown();
        destroy_viewer();
        tracing::info!("viewer shut down");
    }
}

async fn fetch_settings(url: &str) -> Result<Settings, JsValue> {
    let resp = HttpRequest::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let text = resp
        .text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Settings::from_json(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::install;
    use std::cell::RefCell;

    #[test]
    fn second_install_keeps_live_value() {
        let slot = RefCell::new(None);
        assert_eq!(install(&slot, || Ok::<_, ()>(1)), Ok(true));

        let mut built = false;
        let again = install(&slot, || {
            built = true;
            Ok::<_, ()>(2)
        });
        assert_eq!(again, Ok(false));
        assert!(!built);
        assert_eq!(*slot.borrow(), Some(1));

        slot.borrow_mut().take();
        assert_eq!(install(&slot, || Ok::<_, ()>(3)), Ok(true));
        assert_eq!(*slot.borrow(), Some(3));
    }

    #[test]
    fn failed_build_leaves_slot_empty() {
        let slot: RefCell<Option<u32>> = RefCell::new(None);
        assert_eq!(install(&slot, || Err("no cookies")), Err("no cookies"));
        assert!(slot.borrow().is_none());
    }
}
