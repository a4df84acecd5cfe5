//! GeoJSON payload decoding and boundary containment for fencewatch
//!
//! The location API answers with either an error object or a GeoJSON-like
//! feature collection in which feature 0 is the subject's current point and
//! the remaining features are candidate boundary polygons. This crate turns
//! that payload into typed geometry and answers the one question the
//! watchdog asks: is the point inside (or touching) any boundary?
//!
//! Malformed geometry is a fatal input error here — it propagates instead of
//! being folded into "unsafe".

mod boundary;
mod payload;

pub use boundary::*;
pub use payload::*;

use thiserror::Error;

/// Errors from payload decoding
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("payload is not valid GeoJSON: {0}")]
    InvalidGeoJson(#[from] geojson::Error),

    #[error("feature collection has no features")]
    EmptyFeatureCollection,

    #[error("feature {index} has no geometry")]
    MissingGeometry { index: usize },

    #[error("tracked position must be a point geometry")]
    PositionNotAPoint,

    #[error("boundary feature {index} is not a polygon or multi-polygon")]
    UnsupportedBoundary { index: usize },
}
