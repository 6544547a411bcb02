mod backend;
pub use backend::*;

mod error;
pub use error::*;

mod options;
pub use options::*;

mod pager;
pub use pager::*;

#[cfg(any(test, feature = "mock"))]
pub mod mock;
