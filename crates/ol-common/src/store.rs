//! Persistence collaborator for layer and map records.
//!
//! The CMS storage engine is external; this module only fixes the seam
//! (`LayerRepository`) and provides an in-memory implementation used by the
//! command line tool and tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Layer, LayerError, LayerId, LayerResult, MapId, MapObject};

/// Storage operations the layer components rely on.
#[async_trait]
pub trait LayerRepository: Send + Sync {
    /// Load a layer snapshot.
    async fn layer(&self, id: LayerId) -> LayerResult<Layer>;

    /// Validate and store a layer. Unsaved layers (id 0) get a fresh id.
    async fn save_layer(&self, layer: Layer) -> LayerResult<LayerId>;

    async fn delete_layer(&self, id: LayerId) -> LayerResult<()>;

    /// All layers in default sort order (Title ascending).
    async fn layers(&self) -> LayerResult<Vec<Layer>>;

    /// Layers owned by a map, in default sort order.
    async fn layers_for_map(&self, map_id: MapId) -> LayerResult<Vec<Layer>>;

    async fn map(&self, id: MapId) -> LayerResult<MapObject>;

    async fn save_map(&self, map: MapObject) -> LayerResult<MapId>;

    /// Delete a map together with every layer it owns.
    async fn delete_map(&self, id: MapId) -> LayerResult<()>;
}

#[derive(Debug, Default)]
struct Tables {
    layers: BTreeMap<LayerId, Layer>,
    maps: BTreeMap<MapId, MapObject>,
    next_layer_id: u64,
    next_map_id: u64,
}

/// Repository keeping records in process memory.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Next free id after `last`. Id 0 marks unsaved records and is never handed out.
fn next_id(last: u64) -> LayerResult<u64> {
    last.checked_add(1)
        .ok_or_else(|| LayerError::invalid_field("ID", "no free record id left"))
}

fn sort_by_title(layers: &mut [Layer]) {
    layers.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
}

#[async_trait]
impl LayerRepository for InMemoryRepository {
    async fn layer(&self, id: LayerId) -> LayerResult<Layer> {
        let tables = self.tables.read().await;
        tables
            .layers
            .get(&id)
            .cloned()
            .ok_or(LayerError::LayerNotFound(id))
    }

    async fn save_layer(&self, mut layer: Layer) -> LayerResult<LayerId> {
        layer.validate()?;

        let mut tables = self.tables.write().await;
        if let Some(map_id) = layer.map_id {
            if !tables.maps.contains_key(&map_id) {
                return Err(LayerError::MapNotFound(map_id));
            }
        }

        if layer.id.0 == 0 {
            tables.next_layer_id = next_id(tables.next_layer_id)?;
            layer.id = LayerId(tables.next_layer_id);
        } else {
            tables.next_layer_id = tables.next_layer_id.max(layer.id.0);
        }

        let id = layer.id;
        debug!(layer_id = %id, title = %layer.title, "Saving layer");
        tables.layers.insert(id, layer);
        Ok(id)
    }

    async fn delete_layer(&self, id: LayerId) -> LayerResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .layers
            .remove(&id)
            .map(|_| ())
            .ok_or(LayerError::LayerNotFound(id))
    }

    async fn layers(&self) -> LayerResult<Vec<Layer>> {
        let tables = self.tables.read().await;
        let mut layers: Vec<Layer> = tables.layers.values().cloned().collect();
        sort_by_title(&mut layers);
        Ok(layers)
    }

    async fn layers_for_map(&self, map_id: MapId) -> LayerResult<Vec<Layer>> {
        let tables = self.tables.read().await;
        if !tables.maps.contains_key(&map_id) {
            return Err(LayerError::MapNotFound(map_id));
        }
        let mut layers: Vec<Layer> = tables
            .layers
            .values()
            .filter(|l| l.map_id == Some(map_id))
            .cloned()
            .collect();
        sort_by_title(&mut layers);
        Ok(layers)
    }

    async fn map(&self, id: MapId) -> LayerResult<MapObject> {
        let tables = self.tables.read().await;
        tables.maps.get(&id).cloned().ok_or(LayerError::MapNotFound(id))
    }

    async fn save_map(&self, mut map: MapObject) -> LayerResult<MapId> {
        let mut tables = self.tables.write().await;
        if map.id.0 == 0 {
            tables.next_map_id = next_id(tables.next_map_id)?;
            map.id = MapId(tables.next_map_id);
        } else {
            tables.next_map_id = tables.next_map_id.max(map.id.0);
        }
        let id = map.id;
        tables.maps.insert(id, map);
        Ok(id)
    }

    async fn delete_map(&self, id: MapId) -> LayerResult<()> {
        let mut tables = self.tables.write().await;
        if tables.maps.remove(&id).is_none() {
            return Err(LayerError::MapNotFound(id));
        }
        let before = tables.layers.len();
        tables.layers.retain(|_, layer| layer.map_id != Some(id));
        debug!(map_id = %id, removed = before - tables.layers.len(), "Deleted map and its layers");
        Ok(())
    }
}
