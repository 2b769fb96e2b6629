pub mod boolean;
pub mod chamfer;
pub mod fillet;
pub mod kernel_ext;
pub mod loft;
pub mod offset;
pub mod params;
pub mod pipe;
pub mod transform;
pub mod types;

pub use boolean::execute_boolean;
pub use chamfer::execute_chamfer;
pub use fillet::execute_fillet;
pub use kernel_ext::KernelBundle;
pub use loft::execute_loft;
pub use offset::{execute_offset, execute_thick_solid};
pub use params::*;
pub use pipe::execute_pipe;
pub use transform::execute_transform;
pub use types::*;
