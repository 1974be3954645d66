//! Item search: criteria, the AND-only predicate built from them, and sort
//! orders understood by every item store.

pub mod criteria;
pub mod predicate;
pub mod sort;

pub use criteria::ItemSearchCriteria;
pub use predicate::{Condition, Predicate, PredicateBuilder};
pub use sort::{ItemSort, ItemSortField, SortOrder};
