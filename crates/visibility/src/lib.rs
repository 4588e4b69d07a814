pub mod engine;
pub mod events;
pub mod manager;
pub mod recording;
pub mod settings;

pub use engine::*;
pub use events::*;
pub use manager::*;
pub use recording::*;
pub use settings::*;
