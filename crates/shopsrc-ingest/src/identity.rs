//! Synthetic identifiers for sub-entities without a natural id.
//!
//! A derived id is `encode(decode(parent) + "/" + role)`, written in the
//! same encoding as the parent. Storefront ids come either as base64 of a
//! `gid://` path (API 2020-10 and earlier) or as the bare path.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use shopsrc_core::{canonical_locale, pascal_case};

use crate::error::IdentityError;

const GID_SCHEME: &str = "gid://";

/// Structural position of a derived entity inside its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    PriceRangeMin,
    PriceRangeMax,
    CompareAtPriceRangeMin,
    CompareAtPriceRangeMax,
    Price,
    UnitPrice,
    CompareAtPrice,
    /// Locale copy of the parent, e.g. `fr` or `pt-br`.
    Locale(String),
}

impl Role {
    /// Normalized suffix appended to the decoded parent id.
    ///
    /// Locale suffixes keep the locale's separators (as `-`) so `pt-br`
    /// and `ptbr` stay distinct.
    #[must_use]
    pub fn suffix(&self) -> String {
        let raw = match self {
            Self::PriceRangeMin => "priceRange/minVariantPrice",
            Self::PriceRangeMax => "priceRange/maxVariantPrice",
            Self::CompareAtPriceRangeMin => "compareAtPriceRange/minVariantPrice",
            Self::CompareAtPriceRangeMax => "compareAtPriceRange/maxVariantPrice",
            Self::Price => "price",
            Self::UnitPrice => "unitPrice",
            Self::CompareAtPrice => "compareAtPrice",
            Self::Locale(locale) => {
                return format!("Locale{}", canonical_locale(locale).to_uppercase());
            }
        };
        raw.split('/')
            .map(pascal_case)
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.suffix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Encoding {
    Base64,
    Plain,
}

/// Derives the id of the `role` sub-entity of `natural_id`.
///
/// Pure and deterministic: the same inputs always give the same id, and
/// distinct `(natural_id, role)` pairs never share one.
///
/// # Errors
///
/// Returns [`IdentityError::InvalidIdentifier`] if `natural_id` is neither a
/// `gid://` path nor base64 of one.
pub fn derive(natural_id: &str, role: &Role) -> Result<String, IdentityError> {
    let (path, encoding) = decode(natural_id)?;
    let derived = format!("{path}/{}", role.suffix());
    Ok(match encoding {
        Encoding::Base64 => STANDARD.encode(derived),
        Encoding::Plain => derived,
    })
}

/// Plain `gid://` form of a natural id.
///
/// # Errors
///
/// Same as [`derive`].
pub fn decode_id(natural_id: &str) -> Result<String, IdentityError> {
    decode(natural_id).map(|(path, _)| path)
}

fn decode(natural_id: &str) -> Result<(String, Encoding), IdentityError> {
    let invalid = |reason: &str| IdentityError::InvalidIdentifier {
        id: natural_id.to_owned(),
        reason: reason.to_owned(),
    };

    if natural_id.starts_with(GID_SCHEME) {
        return Ok((natural_id.to_owned(), Encoding::Plain));
    }

    let bytes = STANDARD
        .decode(natural_id)
        .map_err(|e| invalid(&format!("not base64: {e}")))?;
    let path = String::from_utf8(bytes).map_err(|_| invalid("decoded id is not UTF-8"))?;
    if !path.starts_with(GID_SCHEME) {
        return Err(invalid("decoded id is not a gid:// path"));
    }
    Ok((path, Encoding::Base64))
}
