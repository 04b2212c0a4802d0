//! Column-level access to layer records.
//!
//! Storage and form collaborators address a layer by column name rather
//! than by struct field. Values are cast to the column type on `set`, the
//! way the record base of the CMS casts submitted form data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::layer::{check_length, LONG_TEXT_LIMIT, SHORT_TEXT_LIMIT};
use crate::{Layer, LayerError, LayerResult, LayerType, MapId};

/// Stored columns of a layer record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerField {
    Id,
    Title,
    Url,
    Type,
    DisplayPriority,
    Enabled,
    Visible,
    Queryable,
    OgcName,
    OgcMap,
    OgcFormat,
    OgcTransparent,
    MapId,
}

impl LayerField {
    pub const ALL: [LayerField; 13] = [
        LayerField::Id,
        LayerField::Title,
        LayerField::Url,
        LayerField::Type,
        LayerField::DisplayPriority,
        LayerField::Enabled,
        LayerField::Visible,
        LayerField::Queryable,
        LayerField::OgcName,
        LayerField::OgcMap,
        LayerField::OgcFormat,
        LayerField::OgcTransparent,
        LayerField::MapId,
    ];

    /// Column name as stored and as used by form fields.
    pub fn column(&self) -> &'static str {
        match self {
            LayerField::Id => "ID",
            LayerField::Title => "Title",
            LayerField::Url => "Url",
            LayerField::Type => "Type",
            LayerField::DisplayPriority => "DisplayPriority",
            LayerField::Enabled => "Enabled",
            LayerField::Visible => "Visible",
            LayerField::Queryable => "Queryable",
            LayerField::OgcName => "ogc_name",
            LayerField::OgcMap => "ogc_map",
            LayerField::OgcFormat => "ogc_format",
            LayerField::OgcTransparent => "ogc_transparent",
            LayerField::MapId => "MapID",
        }
    }
}

impl FromStr for LayerField {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerField::ALL
            .into_iter()
            .find(|f| f.column() == s)
            .ok_or_else(|| LayerError::invalid_field(s, "no such column"))
    }
}

impl fmt::Display for LayerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A loosely typed column value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    /// Record id or reference; ids span the full `u64` range.
    Ref(u64),
    Text(String),
}

impl FieldValue {
    fn as_bool(&self, field: LayerField) -> LayerResult<bool> {
        match self {
            FieldValue::Bool(b) => Ok(*b),
            FieldValue::Int(0) => Ok(false),
            FieldValue::Int(1) => Ok(true),
            FieldValue::Text(s) => match s.as_str() {
                "1" | "true" => Ok(true),
                "0" | "false" | "" => Ok(false),
                other => Err(LayerError::invalid_field(
                    field.column(),
                    format!("'{}' is not a boolean", other),
                )),
            },
            other => Err(LayerError::invalid_field(
                field.column(),
                format!("{:?} is not a boolean", other),
            )),
        }
    }

    fn as_int(&self, field: LayerField) -> LayerResult<i64> {
        match self {
            FieldValue::Int(i) => Ok(*i),
            FieldValue::Ref(id) => i64::try_from(*id).map_err(|_| {
                LayerError::invalid_field(field.column(), format!("{} is out of range", id))
            }),
            FieldValue::Text(s) => s.trim().parse().map_err(|_| {
                LayerError::invalid_field(field.column(), format!("'{}' is not an integer", s))
            }),
            other => Err(LayerError::invalid_field(
                field.column(),
                format!("{:?} is not an integer", other),
            )),
        }
    }

    fn into_text(self, field: LayerField) -> LayerResult<String> {
        match self {
            FieldValue::Text(s) => Ok(s),
            FieldValue::Null => Ok(String::new()),
            FieldValue::Int(i) => Ok(i.to_string()),
            FieldValue::Ref(id) => Ok(id.to_string()),
            FieldValue::Bool(_) => Err(LayerError::invalid_field(
                field.column(),
                "boolean given for a text column",
            )),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl Layer {
    /// Read a column.
    pub fn get(&self, field: LayerField) -> FieldValue {
        match field {
            LayerField::Id => FieldValue::Ref(self.id.0),
            LayerField::Title => FieldValue::Text(self.title.clone()),
            LayerField::Url => FieldValue::Text(self.url.clone()),
            LayerField::Type => FieldValue::Text(self.layer_type.to_string()),
            LayerField::DisplayPriority => FieldValue::Int(self.display_priority as i64),
            LayerField::Enabled => FieldValue::Bool(self.enabled),
            LayerField::Visible => FieldValue::Bool(self.visible),
            LayerField::Queryable => FieldValue::Bool(self.queryable),
            LayerField::OgcName => FieldValue::Text(self.ogc_name.clone()),
            LayerField::OgcMap => FieldValue::Text(self.ogc_map.clone()),
            LayerField::OgcFormat => FieldValue::Text(self.ogc_format.to_string()),
            LayerField::OgcTransparent => FieldValue::Bool(self.ogc_transparent),
            LayerField::MapId => match self.map_id {
                Some(id) => FieldValue::Ref(id.0),
                None => FieldValue::Null,
            },
        }
    }

    /// Write a column, casting the value to the column type.
    ///
    /// The record is left untouched when the value does not cast.
    pub fn set(&mut self, field: LayerField, value: FieldValue) -> LayerResult<()> {
        match field {
            LayerField::Id => {
                return Err(LayerError::invalid_field(field.column(), "the record id is read-only"))
            }
            LayerField::Title => {
                let text = value.into_text(field)?;
                check_length(field.column(), &text, SHORT_TEXT_LIMIT)?;
                self.title = text;
            }
            LayerField::Url => {
                let text = value.into_text(field)?;
                check_length(field.column(), &text, LONG_TEXT_LIMIT)?;
                self.url = text;
            }
            LayerField::Type => {
                let text = value.into_text(field)?;
                self.layer_type = if text.is_empty() {
                    LayerType::default()
                } else {
                    LayerType::parse_declared(&text)?
                };
            }
            LayerField::DisplayPriority => {
                let int = value.as_int(field)?;
                self.display_priority = i32::try_from(int).map_err(|_| {
                    LayerError::invalid_field(field.column(), format!("{} is out of range", int))
                })?;
            }
            LayerField::Enabled => self.enabled = value.as_bool(field)?,
            LayerField::Visible => self.visible = value.as_bool(field)?,
            LayerField::Queryable => self.queryable = value.as_bool(field)?,
            LayerField::OgcName => {
                let text = value.into_text(field)?;
                check_length(field.column(), &text, SHORT_TEXT_LIMIT)?;
                self.ogc_name = text;
            }
            LayerField::OgcMap => {
                let text = value.into_text(field)?;
                check_length(field.column(), &text, LONG_TEXT_LIMIT)?;
                self.ogc_map = text;
            }
            LayerField::OgcFormat => {
                let text = value.into_text(field)?;
                self.ogc_format = if text.is_empty() {
                    Default::default()
                } else {
                    text.parse()?
                };
            }
            LayerField::OgcTransparent => self.ogc_transparent = value.as_bool(field)?,
            LayerField::MapId => {
                let id = match value {
                    FieldValue::Null => 0,
                    FieldValue::Ref(id) => id,
                    FieldValue::Text(s) => s.trim().parse().map_err(|_| {
                        LayerError::invalid_field(
                            field.column(),
                            format!("'{}' is not a map reference", s),
                        )
                    })?,
                    other => u64::try_from(other.as_int(field)?).map_err(|_| {
                        LayerError::invalid_field(field.column(), "negative reference")
                    })?,
                };
                self.map_id = (id != 0).then_some(MapId(id));
            }
        }
        Ok(())
    }
}
