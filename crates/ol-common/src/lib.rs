//! Record types and collaborators shared by the OpenLayers CMS crates.

pub mod admin;
pub mod bbox;
pub mod error;
pub mod field;
pub mod layer;
pub mod store;

pub use admin::{FormSchema, LayerSummary};
pub use bbox::{BoundingBox, SpatialParams};
pub use error::{LayerError, LayerResult};
pub use field::{FieldValue, LayerField};
pub use layer::{Layer, LayerId, LayerType, MapId, MapObject, OgcFormat};
pub use store::{InMemoryRepository, LayerRepository};
