//! Assignment store: which participant sits at which table.

mod query;
mod store;

pub use query::argmax_first;
pub use store::Assignment;
