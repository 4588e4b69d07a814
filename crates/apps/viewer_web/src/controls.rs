use layers::OverlayId;
use visibility::Controls;
use wasm_bindgen::JsCast;

/// Id of the airport list text field.
pub const AIRPORT_FIELD_ID: &str = "airports";

/// The page's `.layer` checkboxes and airport text field.
#[derive(Debug, Default)]
pub struct PageControls;

impl PageControls {
    fn input(id: &str) -> Option<web_sys::HtmlInputElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<web_sys::HtmlInputElement>()
            .ok()
    }
}

impl Controls for PageControls {
    fn set_checked(&mut self, overlay: &OverlayId, checked: bool) {
        match Self::input(overlay.as_str()) {
            Some(el) => el.set_checked(checked),
            None => tracing::debug!(%overlay, "no checkbox for overlay"),
        }
    }

    fn set_airport_field(&mut self, text: &str) {
        if let Some(el) = Self::input(AIRPORT_FIELD_ID) {
            el.set_value(text);
        }
    }
}
