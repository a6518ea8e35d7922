//! Value objects - immutable types that describe queries over the domain

mod page;
mod todo_filter;

pub use page::PageRequest;
pub use todo_filter::TodoFilter;
