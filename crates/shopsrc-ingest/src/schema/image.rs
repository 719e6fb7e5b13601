use std::fmt;
use std::str::FromStr;

use super::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropMode {
    Center,
    Top,
    Left,
    Bottom,
    Right,
}

impl CropMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Top => "top",
            Self::Left => "left",
            Self::Bottom => "bottom",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for CropMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropMode {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "center" => Ok(Self::Center),
            "top" => Ok(Self::Top),
            "left" => Ok(Self::Left),
            "bottom" => Ok(Self::Bottom),
            "right" => Ok(Self::Right),
            _ => Err(ResolveError::UnknownCropMode(s.to_owned())),
        }
    }
}

/// Arguments of the `transformedSrc` resolver. Zero sizes count as unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageTransform {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub crop: Option<CropMode>,
    pub scale: Option<u32>,
}

/// Builds a CDN URL for `original_src` with size, crop and scale suffixes
/// inserted before the file extension.
#[must_use]
pub fn transformed_src(original_src: &str, transform: &ImageTransform) -> String {
    let width = transform.max_width.filter(|w| *w > 0);
    let height = transform.max_height.filter(|h| *h > 0);

    let mut suffix = match (width, height) {
        (Some(w), Some(h)) => format!("_{w}x{h}"),
        (Some(w), None) => format!("_{w}x"),
        (None, Some(h)) => format!("_x{h}"),
        (None, None) => String::new(),
    };
    if let Some(crop) = transform.crop {
        if width.is_some() || height.is_some() {
            suffix.push_str("_crop_");
            suffix.push_str(crop.as_str());
        }
    }
    if let Some(scale) = transform.scale.filter(|s| *s > 0 && *s != 1) {
        suffix.push_str(&format!("@{scale}x"));
    }

    if suffix.is_empty() {
        return original_src.to_owned();
    }

    // The extension dot must sit in the last path segment, before any query.
    let path_end = original_src.find(['?', '#']).unwrap_or(original_src.len());
    let path = &original_src[..path_end];
    let insert_at = match (path.rfind('.'), path.rfind('/')) {
        (Some(dot), Some(slash)) if dot > slash => dot,
        (Some(dot), None) => dot,
        _ => path_end,
    };

    let mut out = String::with_capacity(original_src.len() + suffix.len());
    out.push_str(&original_src[..insert_at]);
    out.push_str(&suffix);
    out.push_str(&original_src[insert_at..]);
    out
}
