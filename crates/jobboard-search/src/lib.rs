//! jobboard-search
//!
//! Client-side job search: the match predicate (`filter`), the sort and page
//! assembly over an in-memory snapshot (`assemble`), and the pagination bar
//! (`pagination`). Everything here is synchronous and pure.
pub mod assemble;
pub mod filter;
pub mod pagination;

pub use assemble::{assemble, JobCatalog};
pub use filter::{extract_salary, matches, Predicate};
pub use pagination::page_window;
