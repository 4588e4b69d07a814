pub mod registry;
pub mod request;
pub mod residency;

pub use registry::*;
pub use request::*;
pub use residency::*;
