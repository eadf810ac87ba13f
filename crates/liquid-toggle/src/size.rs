//! Size profile table.
//!
//! Every toggle size is a compiled-in [`SizeProfile`]. Border thickness and
//! blur size are derived from the profile height relative to the tallest
//! profile so that all sizes keep the same proportions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Height of the largest profile, used as the scaling reference.
pub const REFERENCE_HEIGHT: f32 = 48.0;

/// Error returned when a size key is not in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown toggle size `{0}`")]
pub struct ParseSizeError(pub String);

/// Named toggle size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeName {
    /// Extra small
    #[serde(rename = "xs")]
    Xs,
    /// Small
    #[serde(rename = "sm")]
    Sm,
    /// Medium
    #[default]
    #[serde(rename = "md")]
    Md,
    /// Large
    #[serde(rename = "lg")]
    Lg,
    /// Extra large
    #[serde(rename = "xl")]
    Xl,
    /// 2× extra large
    #[serde(rename = "2xl")]
    Xl2,
    /// 3× extra large
    #[serde(rename = "3xl")]
    Xl3,
    /// 4× extra large
    #[serde(rename = "4xl")]
    Xl4,
    /// 5× extra large, the reference size
    #[serde(rename = "5xl")]
    Xl5,
}

impl SizeName {
    /// All sizes, smallest first.
    pub const ALL: [Self; 9] = [
        Self::Xs,
        Self::Sm,
        Self::Md,
        Self::Lg,
        Self::Xl,
        Self::Xl2,
        Self::Xl3,
        Self::Xl4,
        Self::Xl5,
    ];

    /// Attribute key of this size.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
            Self::Xl2 => "2xl",
            Self::Xl3 => "3xl",
            Self::Xl4 => "4xl",
            Self::Xl5 => "5xl",
        }
    }

    /// Rendering parameters for this size.
    #[must_use]
    pub fn profile(self) -> &'static SizeProfile {
        &PROFILES[self as usize]
    }

    /// Resolve an attribute value, falling back to [`SizeName::Md`] when the
    /// value is absent or unknown.
    #[must_use]
    pub fn resolve(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        value.parse().unwrap_or_else(|err: ParseSizeError| {
            tracing::warn!(%err, fallback = Self::default().key(), "unrecognized size");
            Self::default()
        })
    }
}

impl FromStr for SizeName {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.key() == s)
            .ok_or_else(|| ParseSizeError(s.to_owned()))
    }
}

impl fmt::Display for SizeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Goo filter softness at rest and while interacting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    /// Gaussian deviation while active
    pub active: f32,
    /// Gaussian deviation at rest
    pub inactive: f32,
}

/// Rendering parameters of one size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeProfile {
    /// Track width in pixels
    pub width: f32,
    /// Track height in pixels
    pub height: f32,
    /// Blur radius
    pub blur: f32,
    /// Filter softness
    pub deviation: Deviation,
    /// Alpha multiplier of the sharpening matrix
    pub alpha: f32,
}

impl SizeProfile {
    /// Intensity scaling factor relative to [`REFERENCE_HEIGHT`].
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.height / REFERENCE_HEIGHT
    }

    /// Gaussian deviation for the given interaction mode.
    #[must_use]
    pub const fn deviation_for(&self, active: bool) -> f32 {
        if active {
            self.deviation.active
        } else {
            self.deviation.inactive
        }
    }

    /// Size-dependent dimensions pushed to the rendering layer.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        let scale = self.scale();
        Dimensions {
            width: self.width,
            height: self.height,
            scale,
            border: (5.0 * scale).max(1.0),
            blur_size: 6.0 * scale,
        }
    }
}

/// Derived dimensions of a size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Track width in pixels
    pub width: f32,
    /// Track height in pixels
    pub height: f32,
    /// Height relative to the reference height
    pub scale: f32,
    /// Border thickness in pixels, at least 1
    pub border: f32,
    /// Wrapper blur in pixels
    pub blur_size: f32,
}

macro_rules! profile {
    ($width:expr, $base_height:expr, $blur:expr, $active:expr, $inactive:expr, $alpha:expr) => {
        SizeProfile {
            width: $width,
            height: 0.75 * $base_height,
            blur: $blur,
            deviation: Deviation {
                active: $active,
                inactive: $inactive,
            },
            alpha: $alpha,
        }
    };
}

static PROFILES: [SizeProfile; 9] = [
    profile!(32.0, 16.0, 1.0, 0.3, 2.0, 6.0),
    profile!(44.0, 22.0, 1.5, 0.5, 2.5, 8.0),
    profile!(56.0, 28.0, 1.0, 0.7, 3.5, 11.0),
    profile!(68.0, 34.0, 2.5, 0.9, 4.5, 12.0),
    profile!(80.0, 40.0, 3.0, 1.1, 5.5, 14.0),
    profile!(92.0, 46.0, 4.0, 1.7, 8.0, 14.0),
    profile!(104.0, 52.0, 4.5, 2.0, 9.0, 16.0),
    profile!(116.0, 58.0, 5.0, 2.2, 10.0, 18.0),
    profile!(128.0, 64.0, 6.0, 2.5, 12.0, 20.0),
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_md() {
        assert_eq!(SizeName::default(), SizeName::Md);
        assert_eq!(SizeName::default().profile().width, 56.0);
    }

    #[test]
    fn test_parse_every_key() {
        for size in SizeName::ALL {
            assert_eq!(size.key().parse::<SizeName>(), Ok(size));
            assert_eq!(size.to_string(), size.key());
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "huge".parse::<SizeName>().unwrap_err();
        assert_eq!(err, ParseSizeError("huge".to_owned()));
        assert_eq!(err.to_string(), "unknown toggle size `huge`");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("LG".parse::<SizeName>().is_err());
    }

    #[test]
    fn test_resolve_fallbacks() {
        assert_eq!(SizeName::resolve(None), SizeName::Md);
        assert_eq!(SizeName::resolve(Some("")), SizeName::Md);
        assert_eq!(SizeName::resolve(Some("6xl")), SizeName::Md);
        assert_eq!(SizeName::resolve(Some("3xl")), SizeName::Xl3);
    }

    #[test]
    fn test_lg_profile() {
        let lg = SizeName::Lg.profile();
        assert_eq!(lg.width, 68.0);
        assert_eq!(lg.height, 25.5);
        assert_eq!(lg.blur, 2.5);
        assert_eq!(lg.deviation, Deviation { active: 0.9, inactive: 4.5 });
        assert_eq!(lg.alpha, 12.0);
    }

    #[test]
    fn test_widths_and_heights_grow() {
        let profiles: Vec<_> = SizeName::ALL.iter().map(|s| s.profile()).collect();
        for pair in profiles.windows(2) {
            assert!(pair[1].width > pair[0].width);
            assert!(pair[1].height > pair[0].height);
        }
    }

    #[test]
    fn test_reference_height_is_5xl() {
        assert_eq!(SizeName::Xl5.profile().height, REFERENCE_HEIGHT);
        let dims = SizeName::Xl5.profile().dimensions();
        assert_eq!(dims.scale, 1.0);
        assert_eq!(dims.border, 5.0);
        assert_eq!(dims.blur_size, 6.0);
    }

    #[test]
    fn test_border_never_below_one_pixel() {
        let dims = SizeName::Xs.profile().dimensions();
        assert_eq!(dims.scale, 0.25);
        assert_eq!(dims.border, 1.25);
        assert_eq!(dims.blur_size, 1.5);
    }

    #[test]
    fn test_deviation_for() {
        let md = SizeName::Md.profile();
        assert_eq!(md.deviation_for(true), 0.7);
        assert_eq!(md.deviation_for(false), 3.5);
    }

    #[test]
    fn test_serde_keys() {
        let json = serde_json::to_string(&SizeName::Xl2).unwrap();
        assert_eq!(json, "\"2xl\"");
        let size: SizeName = serde_json::from_str("\"5xl\"").unwrap();
        assert_eq!(size, SizeName::Xl5);
    }

    proptest! {
        #[test]
        fn prop_unknown_keys_resolve_to_md(key in "[a-z0-9]{0,6}") {
            prop_assume!(SizeName::ALL.iter().all(|s| s.key() != key));
            prop_assert_eq!(SizeName::resolve(Some(&key)), SizeName::Md);
        }

        #[test]
        fn prop_dimensions_are_proportional(index in 0usize..9) {
            let dims = SizeName::ALL[index].profile().dimensions();
            prop_assert!(dims.border >= 1.0);
            prop_assert!((dims.blur_size - 6.0 * dims.height / REFERENCE_HEIGHT).abs() < 1e-5);
        }
    }
}
