pub mod inherit;
pub mod pipeline;
pub mod prune;
pub mod tree;
