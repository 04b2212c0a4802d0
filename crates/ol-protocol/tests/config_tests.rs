//! Client configuration of layers and maps.

use ol_common::{Layer, LayerId, LayerType, OgcFormat};
use ol_protocol::{project, project_map};

fn layer(title: &str, layer_type: LayerType, priority: i32) -> Layer {
    let mut layer = Layer::new(title, "http://maps.example.org/cgi-bin/mapserv", layer_type)
        .with_ogc_name(title.to_lowercase())
        .with_ogc_map("/srv/mapdata/fisheries.map");
    layer.display_priority = priority;
    layer
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_projection_is_byte_identical() {
    let types = [
        LayerType::Wms,
        LayerType::WmsUntiled,
        LayerType::Wfs,
        LayerType::WfsBound,
        LayerType::Unsupported("wcs".into()),
    ];

    for layer_type in types {
        for format in OgcFormat::ALL {
            for transparent in [true, false] {
                let mut l = layer("Stations", layer_type.clone(), 50);
                l.id = LayerId(8);
                l.ogc_format = format;
                l.ogc_transparent = transparent;

                let first = project(&l).to_json().unwrap();
                let second = project(&l).to_json().unwrap();
                assert_eq!(first, second);
            }
        }
    }
}

#[test]
fn test_wms_json_shape() {
    let mut l = layer("Bathymetry", LayerType::Wms, 50);
    l.id = LayerId(4);
    l.ogc_format = OgcFormat::Png24;

    assert_eq!(
        project(&l).to_json().unwrap(),
        "{\"Type\":\"wms\",\"Title\":\"Bathymetry\",\
         \"Url\":\"http://maps.example.org/cgi-bin/mapserv\",\"Visible\":false,\
         \"ogc_name\":\"bathymetry\",\"Options\":{\"map\":\"/srv/mapdata/fisheries.map\",\
         \"SSID\":4,\"layers\":\"bathymetry\",\"transparent\":\"true\",\"format\":\"png24\"}}"
    );
}

// ============================================================================
// Map configuration
// ============================================================================

#[test]
fn test_project_map_orders_and_filters() {
    let mut hidden = layer("Hidden", LayerType::Wms, 1);
    hidden.enabled = false;

    let layers = vec![
        layer("Stations", LayerType::Wfs, 60),
        hidden,
        layer("Coastline", LayerType::WmsUntiled, 10),
        layer("Bathymetry", LayerType::Wms, 10),
    ];

    let titles: Vec<String> = project_map(&layers).into_iter().map(|c| c.title).collect();
    assert_eq!(titles, ["Bathymetry", "Coastline", "Stations"]);
}

#[test]
fn test_project_map_empty() {
    assert!(project_map(&Vec::new()).is_empty());
}
