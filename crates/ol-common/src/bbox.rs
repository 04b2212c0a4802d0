//! Bounding box and map-click parameters for spatial feature-info queries.

use serde::{Deserialize, Serialize};

/// A geographic or projected bounding box as sent by the map client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Parse an OGC BBOX parameter string: "minx,miny,maxx,maxy"
    pub fn from_wms_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |p: &str| {
            p.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(p.to_string()))
        };

        Ok(Self {
            min_x: parse(parts[0])?,
            min_y: parse(parts[1])?,
            max_x: parse(parts[2])?,
            max_y: parse(parts[3])?,
        })
    }

}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid BBOX format: {0}. Expected 'minx,miny,maxx,maxy'")]
    InvalidFormat(String),

    #[error("Invalid number in BBOX: {0}")]
    InvalidNumber(String),

    #[error("Click at pixel ({x}, {y}) lies outside the {width}x{height} map image")]
    ClickOutsideImage { x: u32, y: u32, width: u32, height: u32 },
}

/// Where the user clicked on the rendered map.
///
/// This is the input of a WMS GetFeatureInfo query: the map extent, the
/// image size in pixels and the pixel position of the click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialParams {
    pub bbox: BoundingBox,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpatialParams {
    /// Build click parameters from the raw request values, rejecting clicks
    /// that fall outside the rendered image.
    pub fn from_click(
        bbox: &str,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<Self, BboxParseError> {
        let params = Self {
            bbox: BoundingBox::from_wms_string(bbox)?,
            x,
            y,
            width,
            height,
        };
        if !params.is_within_image() {
            return Err(BboxParseError::ClickOutsideImage { x, y, width, height });
        }
        Ok(params)
    }

    /// Whether the click lies inside the rendered image.
    pub fn is_within_image(&self) -> bool {
        self.x < self.width && self.y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wms_bbox() {
        let bbox = BoundingBox::from_wms_string("166.0,-48.0,179.0, -34.0").unwrap();
        assert_eq!(bbox.min_x, 166.0);
        assert_eq!(bbox.min_y, -48.0);
        assert_eq!(bbox.max_x, 179.0);
        assert_eq!(bbox.max_y, -34.0);
    }

    #[test]
    fn test_click_within_image() {
        let params = SpatialParams {
            bbox: BoundingBox::new(0.0, 0.0, 1.0, 1.0),
            x: 255,
            y: 0,
            width: 256,
            height: 256,
        };
        assert!(params.is_within_image());
        assert!(!SpatialParams { x: 256, ..params }.is_within_image());
        assert!(!SpatialParams { width: 0, x: 0, ..params }.is_within_image());
    }
}
