//! Layer and map records for the mapping CMS.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{LayerError, LayerResult};

/// Maximum length of the `Title` and `ogc_name` columns.
pub const SHORT_TEXT_LIMIT: usize = 50;

/// Maximum length of the `Url` and `ogc_map` columns.
pub const LONG_TEXT_LIMIT: usize = 1024;

/// Record identifier of a layer. Zero means the layer was never saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Record identifier of the map owning a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub u64);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// OGC service type a layer is sourced from.
///
/// Only [`LayerType::DECLARED`] values pass schema validation. `WfsBound` is
/// the legacy bounded-WFS value that the client projection still recognises,
/// and `Unsupported` carries anything else read from foreign data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayerType {
    #[default]
    Wms,
    WmsUntiled,
    Wfs,
    WfsBound,
    Unsupported(String),
}

impl LayerType {
    /// Values of the `Type` enum column, in schema order.
    pub const DECLARED: [LayerType; 3] = [LayerType::Wms, LayerType::Wfs, LayerType::WmsUntiled];

    pub fn as_str(&self) -> &str {
        match self {
            LayerType::Wms => "wms",
            LayerType::WmsUntiled => "wmsUntiled",
            LayerType::Wfs => "wfs",
            LayerType::WfsBound => "wfs_bound",
            LayerType::Unsupported(other) => other,
        }
    }

    /// Whether the value is part of the stored enum.
    pub fn is_declared(&self) -> bool {
        Self::DECLARED.contains(self)
    }

    /// Tiled and untiled WMS.
    pub fn is_wms_family(&self) -> bool {
        matches!(self, LayerType::Wms | LayerType::WmsUntiled)
    }

    /// Plain and bounded WFS.
    pub fn is_wfs_family(&self) -> bool {
        matches!(self, LayerType::Wfs | LayerType::WfsBound)
    }

    /// Parse a stored value, rejecting anything outside the declared enum.
    pub fn parse_declared(s: &str) -> LayerResult<Self> {
        let parsed = Self::from(s.to_string());
        if parsed.is_declared() {
            Ok(parsed)
        } else {
            Err(LayerError::invalid_field(
                "Type",
                format!("'{}' is not one of wms, wfs, wmsUntiled", s),
            ))
        }
    }
}

impl From<String> for LayerType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" | "wms" => LayerType::Wms,
            "wmsUntiled" => LayerType::WmsUntiled,
            "wfs" => LayerType::Wfs,
            "wfs_bound" => LayerType::WfsBound,
            _ => LayerType::Unsupported(s),
        }
    }
}

impl From<LayerType> for String {
    fn from(t: LayerType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image format requested from a WMS server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OgcFormat {
    #[default]
    Png,
    Jpeg,
    Png24,
    Gif,
}

impl OgcFormat {
    pub const ALL: [OgcFormat; 4] = [OgcFormat::Png, OgcFormat::Jpeg, OgcFormat::Png24, OgcFormat::Gif];

    pub fn as_str(&self) -> &'static str {
        match self {
            OgcFormat::Png => "png",
            OgcFormat::Jpeg => "jpeg",
            OgcFormat::Png24 => "png24",
            OgcFormat::Gif => "gif",
        }
    }
}

impl FromStr for OgcFormat {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OgcFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                LayerError::invalid_field("ogc_format", format!("'{}' is not one of png, jpeg, png24, gif", s))
            })
    }
}

impl fmt::Display for OgcFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A map overlay sourced from one OGC endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layer {
    pub id: LayerId,

    pub title: String,

    /// Base endpoint of the OGC server
    pub url: String,

    #[serde(rename = "type")]
    pub layer_type: LayerType,

    /// Draw order on the client, lower first
    pub display_priority: i32,

    pub enabled: bool,

    pub visible: bool,

    pub queryable: bool,

    /// Provider-side layer name or WFS typename
    pub ogc_name: String,

    /// Server-side map definition file (UMN MapServer mapfile), may be empty
    pub ogc_map: String,

    pub ogc_format: OgcFormat,

    pub ogc_transparent: bool,

    /// Owning map
    pub map_id: Option<MapId>,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            id: LayerId::default(),
            title: String::new(),
            url: String::new(),
            layer_type: LayerType::default(),
            display_priority: 50,
            enabled: true,
            visible: false,
            queryable: true,
            ogc_name: String::new(),
            ogc_map: String::new(),
            ogc_format: OgcFormat::default(),
            ogc_transparent: true,
            map_id: None,
        }
    }
}

impl Layer {
    /// A new unsaved layer with the schema defaults pre-filled.
    pub fn new(title: impl Into<String>, url: impl Into<String>, layer_type: LayerType) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            layer_type,
            ..Self::default()
        }
    }

    pub fn with_ogc_name(mut self, name: impl Into<String>) -> Self {
        self.ogc_name = name.into();
        self
    }

    pub fn with_ogc_map(mut self, map: impl Into<String>) -> Self {
        self.ogc_map = map.into();
        self
    }

    pub fn with_map(mut self, map_id: MapId) -> Self {
        self.map_id = Some(map_id);
        self
    }

    /// Check the record against the stored schema.
    pub fn validate(&self) -> LayerResult<()> {
        if !self.layer_type.is_declared() {
            return Err(LayerError::invalid_field(
                "Type",
                format!("'{}' is not one of wms, wfs, wmsUntiled", self.layer_type),
            ));
        }
        check_length("Title", &self.title, SHORT_TEXT_LIMIT)?;
        check_length("Url", &self.url, LONG_TEXT_LIMIT)?;
        check_length("ogc_name", &self.ogc_name, SHORT_TEXT_LIMIT)?;
        check_length("ogc_map", &self.ogc_map, LONG_TEXT_LIMIT)?;
        Ok(())
    }
}

pub(crate) fn check_length(field: &str, value: &str, limit: usize) -> LayerResult<()> {
    let len = value.chars().count();
    if len > limit {
        return Err(LayerError::invalid_field(
            field,
            format!("{} characters exceeds the limit of {}", len, limit),
        ));
    }
    Ok(())
}

/// A map collection owning a set of layers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MapObject {
    #[serde(default)]
    pub id: MapId,
    pub title: String,
}

impl MapObject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: MapId::default(),
            title: title.into(),
        }
    }
}
