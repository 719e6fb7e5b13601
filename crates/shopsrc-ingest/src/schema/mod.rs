//! Presentation-time resolvers over stored nodes.
//!
//! Pure functions a site build calls while rendering; nothing here writes
//! to the store.

mod image;
mod price;
mod translated;

use thiserror::Error;

pub use image::{transformed_src, CropMode, ImageTransform};
pub use price::{format_amount, AmountOptions};
pub use translated::resolve_translated_field;

use crate::error::IdentityError;
use shopsrc_store::StoreError;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid amount \"{amount}\": {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("unknown crop mode: {0}")]
    UnknownCropMode(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
