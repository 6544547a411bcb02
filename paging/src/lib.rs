//! Pagination cursors.
//!
//! Every backend pages its timelines differently. A [`PageCursor`] captures
//! where one backend should resume and knows how to step to the adjacent
//! page given the batch it just produced.

mod cursor;
pub use cursor::*;

mod token;
pub use token::*;

mod date;
pub use date::*;

mod index;
pub use index::*;

mod window;
pub use window::*;

mod since_page;
pub use since_page::*;

mod result;
pub use result::*;
