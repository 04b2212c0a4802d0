//! Feature-info proxying for CMS layers.
//!
//! The map client asks the CMS for attribute data about a feature; the CMS
//! forwards the question to the layer's OGC server. Only the WFS path is
//! live. WMS GetFeatureInfo was never finished upstream and fails with
//! `NotImplemented` before any request is built.

use std::borrow::Cow;

use quick_xml::escape::escape;
use tracing::{debug, instrument};

use ol_common::{Layer, LayerError, LayerResult, LayerType, SpatialParams};

use crate::transport::{GatewayConfig, HttpTransport, OgcTransport};

/// A WFS 1.0.0 GetFeature request for one feature id.
#[derive(Debug, Clone, PartialEq)]
pub struct WfsFeatureRequest {
    /// Layer endpoint the query string is appended to
    pub url: String,
    pub map: String,
    pub typename: String,
    /// `{typename}.{escaped feature id}`
    pub feature_id: String,
}

impl WfsFeatureRequest {
    pub fn for_layer(layer: &Layer, feature_id: &str) -> Self {
        let escaped = sanitize_feature_id(feature_id);
        Self {
            url: layer.url.clone(),
            map: layer.ogc_map.clone(),
            typename: layer.ogc_name.clone(),
            feature_id: format!("{}.{}", layer.ogc_name, escaped),
        }
    }

    /// Query string, concatenated as is: values are not URL encoded.
    pub fn query_string(&self) -> String {
        format!(
            "?map={}&request=getfeature&service=WFS&version=1.0.0&typename={}&OUTPUTFORMAT=gml3&featureid={}",
            self.map, self.typename, self.feature_id
        )
    }

    pub fn request_url(&self) -> String {
        format!("{}{}", self.url, self.query_string())
    }
}

/// Escape XML-significant characters of a caller-supplied feature id.
pub fn sanitize_feature_id(feature_id: &str) -> Cow<'_, str> {
    escape(feature_id)
}

/// Routes feature-info questions to the layer's OGC server.
pub struct FeatureInfoGateway<T> {
    transport: T,
}

impl FeatureInfoGateway<HttpTransport> {
    /// Gateway over a reqwest client.
    pub fn http(config: &GatewayConfig) -> LayerResult<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: OgcTransport> FeatureInfoGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Look up a feature on the layer's server and return the raw response.
    ///
    /// `spatial` is the map click for WMS layers; WFS lookups go by id only.
    #[instrument(skip(self, layer, spatial), fields(layer_id = %layer.id, layer_type = %layer.layer_type))]
    pub async fn get_feature_info(
        &self,
        layer: &Layer,
        feature_id: &str,
        spatial: Option<&SpatialParams>,
    ) -> LayerResult<String> {
        match &layer.layer_type {
            LayerType::Wms | LayerType::WmsUntiled => {
                self.send_wms_feature_request(layer, spatial).await
            }
            LayerType::Wfs => self.send_wfs_feature_request(layer, feature_id).await,
            other => Err(LayerError::UnknownRequestType(other.to_string())),
        }
    }

    /// WMS GetFeatureInfo. Always fails: the request parameters were never
    /// settled, so nothing is sent.
    pub async fn send_wms_feature_request(
        &self,
        layer: &Layer,
        _spatial: Option<&SpatialParams>,
    ) -> LayerResult<String> {
        Err(LayerError::NotImplemented(format!(
            "WMS GetFeatureInfo for layer '{}'",
            layer.ogc_name
        )))
    }

    /// WFS GetFeature by feature id. The response body (GML) is returned
    /// unmodified whatever the HTTP status.
    pub async fn send_wfs_feature_request(
        &self,
        layer: &Layer,
        feature_id: &str,
    ) -> LayerResult<String> {
        let request = WfsFeatureRequest::for_layer(layer, feature_id);
        let url = request.request_url();
        debug!(%url, feature_id = %request.feature_id, "Sending WFS GetFeature request");

        let response = self.transport.get(&url).await?;
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportResponse;
    use async_trait::async_trait;
    use ol_common::{BoundingBox, LayerId};
    use std::sync::Mutex;

    /// Records requested URLs and answers with a fixed body.
    #[derive(Default)]
    struct RecordingTransport {
        urls: Mutex<Vec<String>>,
        status: u16,
    }

    #[async_trait]
    impl OgcTransport for RecordingTransport {
        async fn get(&self, url: &str) -> LayerResult<TransportResponse> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(TransportResponse {
                status: self.status,
                body: "<wfs:FeatureCollection/>".to_string(),
            })
        }
    }

    fn beam_trawl(layer_type: LayerType) -> Layer {
        let mut layer = Layer::new(
            "Beam trawl stations",
            "http://202.36.29.39/cgi-bin/mapserv",
            layer_type,
        )
        .with_ogc_name("Beam_trawl")
        .with_ogc_map("/srv/www/htdocs/mapdata/spittelr/stations.map");
        layer.id = LayerId(3);
        layer
    }

    fn gateway() -> FeatureInfoGateway<RecordingTransport> {
        FeatureInfoGateway::new(RecordingTransport {
            status: 200,
            ..Default::default()
        })
    }

    #[test]
    fn test_wfs_request_url() {
        let request = WfsFeatureRequest::for_layer(&beam_trawl(LayerType::Wfs), "6");
        assert_eq!(request.feature_id, "Beam_trawl.6");
        assert_eq!(
            request.request_url(),
            "http://202.36.29.39/cgi-bin/mapserv?map=/srv/www/htdocs/mapdata/spittelr/stations.map\
             &request=getfeature&service=WFS&version=1.0.0&typename=Beam_trawl\
             &OUTPUTFORMAT=gml3&featureid=Beam_trawl.6"
        );
    }

    #[test]
    fn test_feature_id_is_escaped() {
        let request = WfsFeatureRequest::for_layer(&beam_trawl(LayerType::Wfs), "6<b>&x");
        assert_eq!(request.feature_id, "Beam_trawl.6&lt;b&gt;&amp;x");
        assert!(!request.feature_id.contains('<'));
    }

    #[tokio::test]
    async fn test_wfs_returns_body() {
        let gateway = gateway();
        let body = gateway
            .get_feature_info(&beam_trawl(LayerType::Wfs), "6", None)
            .await
            .unwrap();
        assert_eq!(body, "<wfs:FeatureCollection/>");

        let urls = gateway.transport.urls.lock().unwrap();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].contains("typename=Beam_trawl&OUTPUTFORMAT=gml3&featureid=Beam_trawl.6"));
    }

    #[tokio::test]
    async fn test_wfs_error_status_body_passed_through() {
        let gateway = FeatureInfoGateway::new(RecordingTransport {
            status: 500,
            ..Default::default()
        });
        let body = gateway
            .get_feature_info(&beam_trawl(LayerType::Wfs), "6", None)
            .await
            .unwrap();
        assert_eq!(body, "<wfs:FeatureCollection/>");
    }

    #[tokio::test]
    async fn test_wms_not_implemented_without_request() {
        let gateway = gateway();
        let click = SpatialParams {
            bbox: BoundingBox::new(166.0, -48.0, 179.0, -34.0),
            x: 10,
            y: 20,
            width: 256,
            height: 256,
        };

        for layer_type in [LayerType::Wms, LayerType::WmsUntiled] {
            let layer = beam_trawl(layer_type);
            let result = gateway.get_feature_info(&layer, "123", Some(&click)).await;
            assert!(matches!(result, Err(LayerError::NotImplemented(_))));
            let result = gateway.get_feature_info(&layer, "123", None).await;
            assert!(matches!(result, Err(LayerError::NotImplemented(_))));
        }
        assert!(gateway.transport.urls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_request_type() {
        let gateway = gateway();
        for layer_type in [LayerType::Unsupported("wcs".into()), LayerType::WfsBound] {
            let result = gateway
                .get_feature_info(&beam_trawl(layer_type), "6", None)
                .await;
            assert!(matches!(result, Err(LayerError::UnknownRequestType(_))));
        }
        assert!(gateway.transport.urls.lock().unwrap().is_empty());
    }
}
