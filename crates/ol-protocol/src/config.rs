//! Layer definitions for the OpenLayers client.
//!
//! A [`ClientConfig`] is the object the JavaScript side reads to construct
//! its layer. Key names follow what the client library expects.

use serde::{Deserialize, Serialize};

use ol_common::{Layer, LayerId};

/// Configuration of one client-side layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(rename = "Type")]
    pub layer_type: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Url")]
    pub url: String,
    #[serde(rename = "Visible")]
    pub visible: bool,
    pub ogc_name: String,
    #[serde(rename = "Options")]
    pub options: LayerOptions,
}

/// Request parameters the client adds to every call for this layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerOptions {
    /// Server-side map file
    pub map: String,
    /// Session id, the layer record id
    #[serde(rename = "SSID", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<LayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<String>,
    /// "true" or "false"; the client expects a string here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transparent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typename: Option<String>,
}

impl ClientConfig {
    pub fn from_layer(layer: &Layer) -> Self {
        let mut options = LayerOptions {
            map: layer.ogc_map.clone(),
            ..Default::default()
        };

        if layer.layer_type.is_wms_family() {
            options.session_id = Some(layer.id);
            options.layers = Some(layer.ogc_name.clone());
            options.transparent = Some(layer.ogc_transparent.to_string());
            options.format = Some(layer.ogc_format.to_string());
        } else if layer.layer_type.is_wfs_family() {
            options.session_id = Some(layer.id);
            options.typename = Some(layer.ogc_name.clone());
        }
        // Any other type keeps only the map file.

        Self {
            layer_type: layer.layer_type.to_string(),
            title: layer.title.clone(),
            url: layer.url.clone(),
            visible: layer.visible,
            ogc_name: layer.ogc_name.clone(),
            options,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Project a layer record into its client configuration.
pub fn project(layer: &Layer) -> ClientConfig {
    ClientConfig::from_layer(layer)
}

/// Client configuration for a whole map: enabled layers in draw order.
pub fn project_map<'a>(layers: impl IntoIterator<Item = &'a Layer>) -> Vec<ClientConfig> {
    let mut enabled: Vec<&Layer> = layers.into_iter().filter(|l| l.enabled).collect();
    enabled.sort_by(|a, b| {
        a.display_priority
            .cmp(&b.display_priority)
            .then_with(|| a.title.cmp(&b.title))
    });
    enabled.into_iter().map(project).collect()
}
