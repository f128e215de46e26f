//! Server-side ordering: sort-key resolution and semantic weighting.
//!
//! Produces the `orderBy` specs sent with the ArticlePage and Experience
//! queries. Runs before the queries execute; the merge stage in
//! [`crate::aggregate`] runs after both return.

pub mod resolver;
pub mod semantic;
pub mod spec;

pub use resolver::{ResolvedOrdering, SortSpecResolver, SortTable};
pub use semantic::{apply_semantic_weight, resolve_ordering, SemanticOptions};
pub use spec::{OrderingDirective, OrderingSpec, RankingMode, SortDirection, SortField};
