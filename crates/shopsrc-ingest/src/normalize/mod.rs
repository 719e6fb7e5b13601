//! Per-kind normalizers.
//!
//! Each module exposes `fetch`, which pulls and decodes every node of its
//! kind (completing nested connections), and `normalize`, which extracts
//! shared sub-entities, links references and writes the kind's nodes.

pub mod article;
pub mod blog;
pub mod collection;
pub mod page;
pub mod product;
pub mod terms;
pub mod translation;
