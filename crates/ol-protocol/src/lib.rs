//! Client-facing OGC glue for CMS map layers.
//!
//! Supports:
//! - Layer configuration objects for the OpenLayers client
//! - WFS 1.0.0 GetFeature lookups by feature id, proxied to the map server

pub mod config;
pub mod getfeatureinfo;
pub mod transport;

pub use config::{project, project_map, ClientConfig, LayerOptions};
pub use getfeatureinfo::{FeatureInfoGateway, WfsFeatureRequest};
pub use transport::{GatewayConfig, HttpTransport, OgcTransport, TransportResponse};
