//! Mapping from drift tiers to cell colors.

use serde::Serialize;

use super::DriftTier;

/// An sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.hex()
    }
}

/// Background and foreground colors of one matrix cell.
///
/// `None` means the cell keeps the surrounding default color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CellStyle {
    /// Fill color.
    pub background: Option<Rgb>,
    /// Text color.
    pub foreground: Option<Rgb>,
}

/// Fill for the newest version.
pub const GREEN: Rgb = Rgb(0x07, 0xbc, 0x0c);
/// Fill for the second newest version.
pub const YELLOW: Rgb = Rgb(0xf1, 0xc4, 0x0f);
/// Fill for anything older than the second newest.
pub const ORANGE: Rgb = Rgb(0xe6, 0x7e, 0x22);
/// Fill for badly stale versions.
pub const RED: Rgb = Rgb(0xff, 0x00, 0x00);
/// Fill for special versions.
pub const PURPLE: Rgb = Rgb(0x80, 0x00, 0x80);
/// Light text.
pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
/// Dark text.
pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);

impl DriftTier {
    /// What: Resolve the display style of a tier.
    ///
    /// Inputs:
    /// - `self`: Tier of the cell.
    ///
    /// Output:
    /// - `CellStyle` with fill and text colors.
    ///
    /// Details:
    /// - `NoVersion` is unstyled; the yellow fill uses dark text, every other
    ///   fill uses light text.
    #[must_use]
    pub const fn style(self) -> CellStyle {
        let colors = match self {
            Self::NoVersion => None,
            Self::Special => Some((PURPLE, WHITE)),
            Self::BehindMajorOrMinor => Some((RED, WHITE)),
            Self::SecondNewest => Some((YELLOW, BLACK)),
            Self::OlderThanSecondNewest => Some((ORANGE, WHITE)),
            Self::Newest => Some((GREEN, WHITE)),
        };
        match colors {
            Some((bg, fg)) => CellStyle {
                background: Some(bg),
                foreground: Some(fg),
            },
            None => CellStyle {
                background: None,
                foreground: None,
            },
        }
    }
}
