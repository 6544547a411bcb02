mod service;
pub use service::*;

mod account;
pub use account::*;

mod direction;
pub use direction::*;

mod identify;
pub use identify::*;

mod comment;
pub use comment::*;
