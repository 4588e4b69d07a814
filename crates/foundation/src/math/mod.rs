pub mod angles;
pub mod vec;

pub use angles::*;
pub use vec::*;
