//! JSON export/import for ramp pairs.
//!
//! Four wire formats, discriminated by a `"format"` tag: `paired` (both
//! modes per scale), `themed` (per-theme maps with the anchor scale
//! marked by a `*` suffix), and the single-mode `light ramp` / `dark
//! ramp`. Emitted hex is always uppercase `#RRGGBB`; import accepts any
//! case and normalizes. Scale keys sort numerically, not lexically.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scale::{Mode, Ramp, RampPair, Scale};

// ─── Scale keys ──────────────────────────────────────────────────────────────

/// A scale used as a JSON object key: `"500"`, or `"500*"` when the key
/// marks a theme's anchor scale. Orders numerically so `BTreeMap`
/// serialization emits keys in ramp order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ScaleKey {
    pub scale: Scale,
    pub anchor: bool,
}

impl ScaleKey {
    const fn plain(scale: Scale) -> Self {
        Self {
            scale,
            anchor: false,
        }
    }
}

impl fmt::Display for ScaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.scale.value(), if self.anchor { "*" } else { "" })
    }
}

impl Serialize for ScaleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScaleKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = ScaleKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a scale key like \"500\" or \"500*\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ScaleKey, E> {
                let (digits, anchor) = match v.strip_suffix('*') {
                    Some(rest) => (rest, true),
                    None => (v, false),
                };
                let value: u16 = digits
                    .parse()
                    .map_err(|_| E::custom(format!("unknown scale key `{v}`")))?;
                let scale = Scale::from_value(value)
                    .ok_or_else(|| E::custom(format!("unknown scale key `{v}`")))?;
                Ok(ScaleKey { scale, anchor })
            }
        }

        deserializer.deserialize_str(KeyVisitor)
    }
}

// ─── Documents ───────────────────────────────────────────────────────────────

/// Both modes' hex for one scale, in the paired format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeHexes {
    #[serde(rename = "Light")]
    pub light: String,
    #[serde(rename = "Dark")]
    pub dark: String,
}

/// The two theme maps of a themed document. A struct rather than a map
/// so the Light theme always serializes first and both are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Themes {
    #[serde(rename = "Light")]
    pub light: BTreeMap<String, BTreeMap<ScaleKey, String>>,
    #[serde(rename = "Dark")]
    pub dark: BTreeMap<String, BTreeMap<ScaleKey, String>>,
}

/// A wire document in any of the four formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format")]
pub enum ExportDocument {
    #[serde(rename = "paired")]
    Paired {
        #[serde(rename = "collectionName")]
        collection_name: String,
        colors: BTreeMap<String, BTreeMap<ScaleKey, ModeHexes>>,
    },
    #[serde(rename = "themed")]
    Themed {
        #[serde(rename = "collectionName")]
        collection_name: String,
        themes: Themes,
    },
    #[serde(rename = "light ramp")]
    LightRamp {
        #[serde(rename = "collectionName")]
        collection_name: String,
        colors: BTreeMap<String, BTreeMap<ScaleKey, String>>,
    },
    #[serde(rename = "dark ramp")]
    DarkRamp {
        #[serde(rename = "collectionName")]
        collection_name: String,
        colors: BTreeMap<String, BTreeMap<ScaleKey, String>>,
    },
}

impl ExportDocument {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Propagates serializer failures, which cannot occur for documents
    /// built by [`export`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Which wire format to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Paired,
    Themed,
    LightRamp,
    DarkRamp,
}

// ─── Export ──────────────────────────────────────────────────────────────────

/// Serialize one ramp pair as a single-color collection.
#[must_use]
pub fn export(pair: &RampPair, color_name: &str, collection: &str, format: Format) -> ExportDocument {
    match format {
        Format::Paired => ExportDocument::Paired {
            collection_name: collection.to_owned(),
            colors: one(color_name, paired_scales(pair)),
        },
        Format::Themed => ExportDocument::Themed {
            collection_name: collection.to_owned(),
            themes: Themes {
                light: one(color_name, theme_scales(pair.light(), pair.anchor(Mode::Light))),
                dark: one(color_name, theme_scales(pair.dark(), pair.anchor(Mode::Dark))),
            },
        },
        Format::LightRamp => ExportDocument::LightRamp {
            collection_name: collection.to_owned(),
            colors: one(color_name, ramp_scales(pair.light())),
        },
        Format::DarkRamp => ExportDocument::DarkRamp {
            collection_name: collection.to_owned(),
            colors: one(color_name, ramp_scales(pair.dark())),
        },
    }
}

fn one<V>(name: &str, value: V) -> BTreeMap<String, V> {
    let mut map = BTreeMap::new();
    map.insert(name.to_owned(), value);
    map
}

fn paired_scales(pair: &RampPair) -> BTreeMap<ScaleKey, ModeHexes> {
    Scale::ALL
        .into_iter()
        .map(|scale| {
            (
                ScaleKey::plain(scale),
                ModeHexes {
                    light: pair.light().swatch(scale).background.hex(),
                    dark: pair.dark().swatch(scale).background.hex(),
                },
            )
        })
        .collect()
}

fn ramp_scales(ramp: &Ramp) -> BTreeMap<ScaleKey, String> {
    Scale::ALL
        .into_iter()
        .map(|scale| (ScaleKey::plain(scale), ramp.swatch(scale).background.hex()))
        .collect()
}

fn theme_scales(ramp: &Ramp, anchor: Scale) -> BTreeMap<ScaleKey, String> {
    Scale::ALL
        .into_iter()
        .map(|scale| {
            (
                ScaleKey {
                    scale,
                    anchor: scale == anchor,
                },
                ramp.swatch(scale).background.hex(),
            )
        })
        .collect()
}

// ─── Import ──────────────────────────────────────────────────────────────────

/// Why an import was rejected.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document failed structural deserialization (bad JSON, unknown
    /// format tag, unknown scale key, missing field).
    #[error("invalid document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("color {name:?} scale {scale}: invalid hex value {value:?}")]
    InvalidHex {
        name: String,
        scale: String,
        value: String,
    },
    #[error("theme {theme:?}: color {name:?} carries {count} anchor marks, expected exactly one")]
    AnchorCount {
        theme: String,
        name: String,
        count: usize,
    },
    #[error("anchor marks are only valid in themed documents (color {name:?}, scale {scale})")]
    UnexpectedAnchor { name: String, scale: String },
}

/// Parse and validate a wire document. Hex values are normalized to
/// uppercase, so a re-export after import is byte-faithful.
///
/// # Errors
/// Returns an [`ImportError`] for structural, hex, or anchor-rule
/// violations.
pub fn import(json: &str) -> Result<ExportDocument, ImportError> {
    let mut doc: ExportDocument = serde_json::from_str(json)?;
    match &mut doc {
        ExportDocument::Paired { colors, .. } => {
            for (name, scales) in colors {
                for (key, hexes) in scales.iter_mut() {
                    reject_anchor(name, key)?;
                    normalize_hex(name, key, &mut hexes.light)?;
                    normalize_hex(name, key, &mut hexes.dark)?;
                }
            }
        }
        ExportDocument::Themed { themes, .. } => {
            validate_theme("Light", &mut themes.light)?;
            validate_theme("Dark", &mut themes.dark)?;
        }
        ExportDocument::LightRamp { colors, .. } | ExportDocument::DarkRamp { colors, .. } => {
            for (name, scales) in colors {
                for (key, hex) in scales.iter_mut() {
                    reject_anchor(name, key)?;
                    normalize_hex(name, key, hex)?;
                }
            }
        }
    }
    Ok(doc)
}

fn validate_theme(
    theme: &str,
    colors: &mut BTreeMap<String, BTreeMap<ScaleKey, String>>,
) -> Result<(), ImportError> {
    for (name, scales) in colors {
        let anchors = scales.keys().filter(|k| k.anchor).count();
        if anchors != 1 {
            return Err(ImportError::AnchorCount {
                theme: theme.to_owned(),
                name: name.clone(),
                count: anchors,
            });
        }
        for (key, hex) in scales.iter_mut() {
            normalize_hex(name, key, hex)?;
        }
    }
    Ok(())
}

fn reject_anchor(name: &str, key: &ScaleKey) -> Result<(), ImportError> {
    if key.anchor {
        return Err(ImportError::UnexpectedAnchor {
            name: name.to_owned(),
            scale: key.to_string(),
        });
    }
    Ok(())
}

fn normalize_hex(name: &str, key: &ScaleKey, value: &mut String) -> Result<(), ImportError> {
    let valid = value.len() == 7
        && value.starts_with('#')
        && value.as_bytes()[1..].iter().all(u8::is_ascii_hexdigit);
    if !valid {
        return Err(ImportError::InvalidHex {
            name: name.to_owned(),
            scale: key.to_string(),
            value: value.clone(),
        });
    }
    value.make_ascii_uppercase();
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
