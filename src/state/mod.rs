//! State Layer
//!
//! The block cache engine: block math, the bounded cache, in-flight
//! tracking, prefetch planning, view projection, and the session that ties
//! them to a datasource.
//!
//! ```text
//! report_visible_range ─► PrefetchPlanner ─► load ─► TableDatasource
//!                                                        │
//!        view() ◄── project ◄── BlockCache ◄── completion ┘
//! ```

mod block;
mod block_cache;
mod data_provider;
mod data_source_state;
mod in_flight;
mod planner;
mod projector;

pub use block::*;
pub use block_cache::*;
pub use data_provider::*;
pub use data_source_state::*;
pub use in_flight::*;
pub use planner::*;
pub use projector::*;
