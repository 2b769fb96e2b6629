pub mod mock_kernel;
pub mod traits;
pub mod types;

pub use mock_kernel::{KernelCall, KernelOp, MockFailure, MockKernel};
pub use traits::*;
pub use types::*;
