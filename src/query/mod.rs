//! Dynamic queries
//!
//! Request types, the collection seam and the facade that ties compilation
//! to evaluation.

mod facade;
mod request;
mod target;

pub use facade::{apply, DynamicQueryFacade};
pub use request::DynamicQuery;
pub use target::QueryTarget;
