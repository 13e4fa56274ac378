use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, DashboardResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Serialized as a `#rrggbb` / `#rrggbbaa` hex string so palettes read
/// naturally in config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
        )
    }

    pub fn from_hex(input: &str) -> DashboardResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let parse = |slice: &str| {
            u8::from_str_radix(slice, 16).map_err(|_| {
                DashboardError::Configuration(format!("invalid hex color `{input}`"))
            })
        };
        match digits.len() {
            6 => Ok(Self::rgb(
                f64::from(parse(&digits[0..2])?) / 255.0,
                f64::from(parse(&digits[2..4])?) / 255.0,
                f64::from(parse(&digits[4..6])?) / 255.0,
            )),
            8 => Ok(Self::rgba(
                f64::from(parse(&digits[0..2])?) / 255.0,
                f64::from(parse(&digits[2..4])?) / 255.0,
                f64::from(parse(&digits[4..6])?) / 255.0,
                f64::from(parse(&digits[6..8])?) / 255.0,
            )),
            _ => Err(DashboardError::Configuration(format!(
                "invalid hex color `{input}`"
            ))),
        }
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        if (self.alpha - 1.0).abs() < f64::EPSILON {
            format!(
                "#{:02x}{:02x}{:02x}",
                channel(self.red),
                channel(self.green),
                channel(self.blue)
            )
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                channel(self.red),
                channel(self.green),
                channel(self.blue),
                channel(self.alpha)
            )
        }
    }

    /// Hex form of the RGB channels only, for backends that carry opacity
    /// in a separate attribute.
    #[must_use]
    pub fn to_hex_opaque(self) -> String {
        self.with_alpha(1.0).to_hex()
    }

    /// Returns the same color with a replacement alpha channel.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(self) -> DashboardResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(DashboardError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = DashboardError;

    fn try_from(value: String) -> DashboardResult<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Title font weight selected by the background variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Fixed visual attributes of one background variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundStyle {
    pub grid_visible: bool,
    pub grid_alpha: f64,
    pub font_weight_title: FontWeight,
}

/// Immutable palette and background tables, constructed once at engine
/// start and passed by reference into `StyleResolver`. There is no
/// process-global style state.
#[derive(Debug, Clone)]
pub struct StyleCatalog {
    schemes: IndexMap<String, Vec<Color>>,
    backgrounds: IndexMap<String, BackgroundStyle>,
}

impl StyleCatalog {
    /// The built-in professionally designed palettes and background
    /// variants.
    #[must_use]
    pub fn builtin() -> Self {
        let mut schemes = IndexMap::new();
        for (name, palette) in BUILTIN_SCHEMES {
            schemes.insert((*name).to_owned(), palette.to_vec());
        }

        let mut backgrounds = IndexMap::new();
        for (name, style) in BUILTIN_BACKGROUNDS {
            backgrounds.insert((*name).to_owned(), *style);
        }

        Self {
            schemes,
            backgrounds,
        }
    }

    pub fn scheme(&self, name: &str) -> DashboardResult<&[Color]> {
        self.schemes.get(name).map(Vec::as_slice).ok_or_else(|| {
            DashboardError::Configuration(format!(
                "unknown color scheme `{name}` (available: {})",
                self.scheme_names().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    pub fn background(&self, name: &str) -> DashboardResult<BackgroundStyle> {
        self.backgrounds.get(name).copied().ok_or_else(|| {
            DashboardError::Configuration(format!(
                "unknown background style `{name}` (available: {})",
                self.background_names().collect::<Vec<_>>().join(", ")
            ))
        })
    }

    pub fn scheme_names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }

    pub fn background_names(&self) -> impl Iterator<Item = &str> {
        self.backgrounds.keys().map(String::as_str)
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_SCHEMES: &[(&str, &[Color])] = &[
    (
        "corporate",
        &[
            Color::from_rgb8(0x00, 0x3f, 0x5c),
            Color::from_rgb8(0x2f, 0x4b, 0x7c),
            Color::from_rgb8(0x66, 0x51, 0x91),
            Color::from_rgb8(0xa0, 0x51, 0x95),
            Color::from_rgb8(0xd4, 0x50, 0x87),
            Color::from_rgb8(0xf9, 0x5d, 0x6a),
            Color::from_rgb8(0xff, 0x7c, 0x43),
            Color::from_rgb8(0xff, 0xa6, 0x00),
        ],
    ),
    (
        "vibrant",
        &[
            Color::from_rgb8(0x1f, 0x77, 0xb4),
            Color::from_rgb8(0xff, 0x7f, 0x0e),
            Color::from_rgb8(0x2c, 0xa0, 0x2c),
            Color::from_rgb8(0xd6, 0x27, 0x28),
            Color::from_rgb8(0x94, 0x67, 0xbd),
            Color::from_rgb8(0x8c, 0x56, 0x4b),
            Color::from_rgb8(0xe3, 0x77, 0xc2),
            Color::from_rgb8(0x7f, 0x7f, 0x7f),
        ],
    ),
    (
        "pastel",
        &[
            Color::from_rgb8(0x66, 0xc2, 0xa5),
            Color::from_rgb8(0xfc, 0x8d, 0x62),
            Color::from_rgb8(0x8d, 0xa0, 0xcb),
            Color::from_rgb8(0xe7, 0x8a, 0xc3),
            Color::from_rgb8(0xa6, 0xd8, 0x54),
            Color::from_rgb8(0xff, 0xd9, 0x2f),
            Color::from_rgb8(0xe5, 0xc4, 0x94),
            Color::from_rgb8(0xb3, 0xb3, 0xb3),
        ],
    ),
    (
        "brand",
        &[
            Color::from_rgb8(0xed, 0x23, 0x2a),
            Color::from_rgb8(0x00, 0x33, 0xa0),
            Color::from_rgb8(0x80, 0x80, 0x80),
            Color::from_rgb8(0xff, 0x66, 0x00),
            Color::from_rgb8(0x00, 0x33, 0x66),
            Color::from_rgb8(0xff, 0xcc, 0x00),
            Color::from_rgb8(0x00, 0xcc, 0xff),
            Color::from_rgb8(0x00, 0x99, 0x00),
        ],
    ),
    (
        "gradient_blue",
        &[
            Color::from_rgb8(0xf7, 0xfb, 0xff),
            Color::from_rgb8(0xde, 0xeb, 0xf7),
            Color::from_rgb8(0xc6, 0xdb, 0xef),
            Color::from_rgb8(0x9e, 0xca, 0xe1),
            Color::from_rgb8(0x6b, 0xae, 0xd6),
            Color::from_rgb8(0x42, 0x92, 0xc6),
            Color::from_rgb8(0x21, 0x71, 0xb5),
            Color::from_rgb8(0x08, 0x45, 0x94),
        ],
    ),
    (
        "gradient_red",
        &[
            Color::from_rgb8(0xff, 0xf5, 0xf0),
            Color::from_rgb8(0xfe, 0xe0, 0xd2),
            Color::from_rgb8(0xfc, 0xbb, 0xa1),
            Color::from_rgb8(0xfc, 0x92, 0x72),
            Color::from_rgb8(0xfb, 0x6a, 0x4a),
            Color::from_rgb8(0xef, 0x3b, 0x2c),
            Color::from_rgb8(0xcb, 0x18, 0x1d),
            Color::from_rgb8(0x99, 0x00, 0x0d),
        ],
    ),
];

const BUILTIN_BACKGROUNDS: &[(&str, BackgroundStyle)] = &[
    (
        "default",
        BackgroundStyle {
            grid_visible: true,
            grid_alpha: 0.3,
            font_weight_title: FontWeight::Bold,
        },
    ),
    (
        "minimal",
        BackgroundStyle {
            grid_visible: false,
            grid_alpha: 0.0,
            font_weight_title: FontWeight::Normal,
        },
    ),
    (
        "classic",
        BackgroundStyle {
            grid_visible: true,
            grid_alpha: 0.1,
            font_weight_title: FontWeight::Normal,
        },
    ),
    (
        "presentation",
        BackgroundStyle {
            grid_visible: true,
            grid_alpha: 0.2,
            font_weight_title: FontWeight::Bold,
        },
    ),
];

/// Per-column replacement of resolved style fields. Unset fields keep the
/// scheme's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnStyleOverride {
    #[serde(default)]
    pub fill: Option<Color>,
    #[serde(default)]
    pub edge_color: Option<Color>,
    #[serde(default)]
    pub edge_width: Option<f64>,
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// Resolved bar appearance for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStyle {
    pub fill: Color,
    pub edge_color: Option<Color>,
    pub edge_width: f64,
    pub alpha: f64,
}

/// Resolved, immutable style snapshot for one chart group.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    columns: Vec<ColumnStyle>,
    pub grid_visible: bool,
    pub grid_alpha: f64,
    pub background_variant: String,
    pub font_weight_title: FontWeight,
}

impl StyleSpec {
    /// Resolved style for column `i` of the group.
    #[must_use]
    pub fn column(&self, i: usize) -> ColumnStyle {
        self.columns[i % self.columns.len()]
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

const DEFAULT_BAR_ALPHA: f64 = 0.9;
const DEFAULT_BAR_EDGE_WIDTH: f64 = 0.0;

/// Resolves scheme and background names into a concrete `StyleSpec`,
/// merging per-column overrides over the scheme defaults.
#[derive(Debug, Clone, Copy)]
pub struct StyleResolver<'a> {
    catalog: &'a StyleCatalog,
}

impl<'a> StyleResolver<'a> {
    #[must_use]
    pub fn new(catalog: &'a StyleCatalog) -> Self {
        Self { catalog }
    }

    /// Unknown scheme or variant names fail; presentation consistency must
    /// not silently drift to a fallback palette.
    ///
    /// Color assignment is cyclic and positional: column `i` gets
    /// `palette[i % palette.len()]`, independent of data values.
    pub fn resolve(
        &self,
        scheme_name: &str,
        bg_variant: &str,
        columns: &[String],
        overrides: &IndexMap<String, ColumnStyleOverride>,
    ) -> DashboardResult<StyleSpec> {
        let palette = self.catalog.scheme(scheme_name)?;
        let background = self.catalog.background(bg_variant)?;

        for name in overrides.keys() {
            if !columns.contains(name) {
                return Err(DashboardError::Configuration(format!(
                    "style override references unknown column `{name}`"
                )));
            }
        }

        let resolved = columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let over = overrides.get(name).copied().unwrap_or_default();
                ColumnStyle {
                    fill: over.fill.unwrap_or(palette[i % palette.len()]),
                    edge_color: over.edge_color,
                    edge_width: over.edge_width.unwrap_or(DEFAULT_BAR_EDGE_WIDTH),
                    alpha: over.alpha.unwrap_or(DEFAULT_BAR_ALPHA),
                }
            })
            .collect();

        Ok(StyleSpec {
            columns: resolved,
            grid_visible: background.grid_visible,
            grid_alpha: background.grid_alpha,
            background_variant: bg_variant.to_owned(),
            font_weight_title: background.font_weight_title,
        })
    }
}
