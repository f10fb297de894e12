//! Service Layer
//!
//! The datasource contract the cache fetches through, an in-memory
//! implementation of it, and the tokio bridge fetches run on.

mod datasource;
mod mock;
mod runtime;

pub use datasource::*;
pub use mock::*;
pub use runtime::*;
