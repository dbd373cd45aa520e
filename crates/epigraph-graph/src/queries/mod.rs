//! Graph read queries.

pub mod association;
pub mod inspect;

pub use association::{cpgs_with_all_factors, cpgs_with_any_factor};
pub use inspect::{count_vertices, vertex_details, VertexDetails};
