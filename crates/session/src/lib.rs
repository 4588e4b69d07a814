pub mod codec;
pub mod cookie;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_store;
pub mod keys;
pub mod store;

pub use codec::*;
pub use cookie::*;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::*;
pub use keys::*;
pub use store::*;
