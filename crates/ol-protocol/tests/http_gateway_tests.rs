//! Feature-info requests against a local map server stand-in.

use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use ol_common::{Layer, LayerError, LayerType};
use ol_protocol::{FeatureInfoGateway, GatewayConfig};

/// Echo the raw query string back inside a GML-ish envelope.
async fn mapserv(RawQuery(query): RawQuery) -> String {
    format!(
        "<wfs:FeatureCollection query=\"{}\"/>",
        query.unwrap_or_default()
    )
}

async fn broken() -> (StatusCode, &'static str) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "<ServiceExceptionReport>msWFSGetFeature(): mapfile not found</ServiceExceptionReport>",
    )
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/cgi-bin/mapserv", get(mapserv))
        .route("/cgi-bin/broken", get(broken));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn wfs_layer(url: String) -> Layer {
    Layer::new("Beam trawl", url, LayerType::Wfs)
        .with_ogc_name("Beam_trawl")
        .with_ogc_map("/srv/mapdata/stations.map")
}

#[tokio::test]
async fn test_wfs_query_reaches_server() {
    let base = spawn_server().await;
    let gateway = FeatureInfoGateway::http(&GatewayConfig::default()).unwrap();
    let layer = wfs_layer(format!("{}/cgi-bin/mapserv", base));

    let body = gateway.get_feature_info(&layer, "6", None).await.unwrap();

    assert_eq!(
        body,
        "<wfs:FeatureCollection query=\"map=/srv/mapdata/stations.map&request=getfeature\
         &service=WFS&version=1.0.0&typename=Beam_trawl&OUTPUTFORMAT=gml3\
         &featureid=Beam_trawl.6\"/>"
    );
}

#[tokio::test]
async fn test_error_body_returned_unmodified() {
    let base = spawn_server().await;
    let gateway = FeatureInfoGateway::http(&GatewayConfig::default()).unwrap();
    let layer = wfs_layer(format!("{}/cgi-bin/broken", base));

    let body = gateway.get_feature_info(&layer, "6", None).await.unwrap();
    assert!(body.starts_with("<ServiceExceptionReport>"));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Reserve a port, then close it so nothing is listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway = FeatureInfoGateway::http(&GatewayConfig::default()).unwrap();
    let layer = wfs_layer(format!("http://{}/cgi-bin/mapserv", addr));

    let result = gateway.get_feature_info(&layer, "6", None).await;
    assert!(matches!(result, Err(LayerError::Transport(_))));
}

#[tokio::test]
async fn test_wms_never_contacts_server() {
    let gateway = FeatureInfoGateway::http(&GatewayConfig::default()).unwrap();
    // Unroutable on purpose: the call must fail before any I/O.
    let layer = Layer::new("Bathymetry", "http://192.0.2.1/wms", LayerType::Wms);

    let result = gateway.get_feature_info(&layer, "123", None).await;
    assert!(matches!(result, Err(LayerError::NotImplemented(_))));
}
