//! YAML catalog of maps and layers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use ol_common::{InMemoryRepository, Layer, LayerRepository, MapObject};

/// Catalog file contents. Omitted layer fields take the schema defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub maps: Vec<MapObject>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Catalog {
    /// Load a catalog from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse catalog: {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Store every map, then every layer. Layers are validated on save.
    pub async fn into_repository(self) -> Result<InMemoryRepository> {
        let repo = InMemoryRepository::new();

        for map in self.maps {
            let title = map.title.clone();
            repo.save_map(map)
                .await
                .with_context(|| format!("Failed to store map '{}'", title))?;
        }

        for layer in self.layers {
            let title = layer.title.clone();
            repo.save_layer(layer)
                .await
                .with_context(|| format!("Failed to store layer '{}'", title))?;
        }

        let count = repo.layers().await?.len();
        tracing::info!(layers = count, "Loaded layer catalog");
        Ok(repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ol_common::{LayerId, LayerType, MapId, OgcFormat};
    use std::io::Write;

    const CATALOG: &str = r#"
maps:
  - id: 1
    title: Fisheries
layers:
  - id: 3
    title: Beam trawl
    url: http://202.36.29.39/cgi-bin/mapserv
    type: wfs
    ogc_name: Beam_trawl
    ogc_map: /srv/www/htdocs/mapdata/spittelr/stations.map
    map_id: 1
  - title: Bathymetry
    url: http://maps.example.org/wms
    ogc_name: bathy
    ogc_format: jpeg
    visible: true
"#;

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let catalog = Catalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.maps.len(), 1);
        assert_eq!(catalog.layers.len(), 2);

        let bathy = &catalog.layers[1];
        assert_eq!(bathy.layer_type, LayerType::Wms);
        assert_eq!(bathy.display_priority, 50);
        assert!(bathy.enabled);
        assert!(bathy.ogc_transparent);
        assert_eq!(bathy.ogc_format, OgcFormat::Jpeg);

        let repo = catalog.into_repository().await.unwrap();
        let stored = repo.layer(LayerId(3)).await.unwrap();
        assert_eq!(stored.map_id, Some(MapId(1)));
        assert_eq!(repo.layers().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_undeclared_type_rejected() {
        let catalog = Catalog::from_yaml(
            "layers:\n  - title: Coverage\n    url: http://example.org\n    type: wcs\n",
        )
        .unwrap();
        let err = catalog.into_repository().await.unwrap_err();
        assert!(err.to_string().contains("Coverage"));
    }

    #[tokio::test]
    async fn test_empty_type_defaults_to_wms() {
        let catalog = Catalog::from_yaml(
            "layers:\n  - title: Coastline\n    url: http://example.org\n    type: \"\"\n",
        )
        .unwrap();
        assert_eq!(catalog.layers[0].layer_type, LayerType::Wms);
        assert!(catalog.into_repository().await.is_ok());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Catalog::from_yaml("layers:\n  - title: A\n    ogc_format: tiff\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Catalog::from_file("/nonexistent/catalog.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }
}
