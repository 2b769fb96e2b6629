pub mod options;
pub mod transform;

pub use options::*;
pub use transform::*;
