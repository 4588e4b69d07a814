//! `document.cookie` backed store.

use crate::store::{KeyValueStore, StoreError};

/// Find the raw (still URI-encoded) value for `key` in a `document.cookie`
/// string such as `"a=1; map.layers=EARTH%2CSEC"`.
pub fn find_cookie<'a>(header: &'a str, key: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (k, v) = pair.trim_start().split_once('=')?;
        (k == key).then_some(v)
    })
}

#[cfg(target_arch = "wasm32")]
mod wasm_cookie {
    use super::{KeyValueStore, StoreError, find_cookie};
    use wasm_bindgen::JsCast;

    /// Session cookies on the current document, path `/`.
    #[derive(Debug, Default)]
    pub struct CookieStore;

    impl CookieStore {
        pub fn new() -> Result<Self, StoreError> {
            html_document()?;
            Ok(Self)
        }
    }

    impl KeyValueStore for CookieStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            let header = html_document()?
                .cookie()
                .map_err(|e| StoreError::Io(format!("read cookie failed: {:?}", e)))?;
            let Some(raw) = find_cookie(&header, key) else {
                return Ok(None);
            };
            let decoded = js_sys::decode_uri_component(raw)
                .map_err(|e| StoreError::Corrupt(format!("cookie {key}: {:?}", e)))?;
            Ok(Some(String::from(decoded)))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let encoded = String::from(js_sys::encode_uri_component(value));
            html_document()?
                .set_cookie(&format!("{key}={encoded}; path=/"))
                .map_err(|e| StoreError::Io(format!("write cookie failed: {:?}", e)))
        }
    }

    fn html_document() -> Result<web_sys::HtmlDocument, StoreError> {
        let win = web_sys::window().ok_or(StoreError::StorageUnavailable)?;
        win.document()
            .ok_or(StoreError::StorageUnavailable)?
            .dyn_into::<web_sys::HtmlDocument>()
            .map_err(|_| StoreError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_cookie::CookieStore;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct CookieStore;

#[cfg(not(target_arch = "wasm32"))]
impl CookieStore {
    pub fn new() -> Result<Self, StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for CookieStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::StorageUnavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::StorageUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::find_cookie;

    #[test]
    fn finds_exact_key() {
        let h = "map.layers=EARTH%2CSEC; map.layers.old=x; map.airports=";
        assert_eq!(find_cookie(h, "map.layers"), Some("EARTH%2CSEC"));
        assert_eq!(find_cookie(h, "map.airports"), Some(""));
        assert_eq!(find_cookie(h, "map.camera.up"), None);
    }

    #[test]
    fn empty_header() {
        assert_eq!(find_cookie("", "map.layers"), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_cookie_store_is_unavailable() {
        assert!(super::CookieStore::new().is_err());
    }
}
