pub mod airspace;
pub mod layer;
pub mod raster;
pub mod terrain;

pub use airspace::*;
pub use layer::*;
pub use raster::*;
pub use terrain::*;
