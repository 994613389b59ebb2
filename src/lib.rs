//! Fetch task and category data from Amazing Marvin, shape it into a tree
//! and serialize it as an indented checklist for plain-text notes.
//!
//! The shaping pipeline runs strictly in order: [`ops::tree`] builds the
//! forest, [`ops::inherit`] copies display attributes down it,
//! [`ops::prune`] drops branches without work, and
//! [`parse::checklist`] or [`cli::output`] renders the result.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod parse;
