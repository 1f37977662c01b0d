//! Geographic helpers for the cemetery map.
//!
//! Everything works on WGS84 latitude/longitude in degrees on a spherical
//! Earth. Bounding boxes do not wrap across the antimeridian.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Mean Earth radius used by the Haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Average walking pace (5 km/h) used for navigation estimates.
pub const WALKING_METERS_PER_MINUTE: f64 = 5_000.0 / 60.0;

/// A point on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, checking that both components are in range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCoordinate`] when the latitude is
    /// outside `[-90, 90]`, the longitude outside `[-180, 180]`, or either
    /// value is not finite.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Check the range invariants of a coordinate built field by field
    /// (e.g. deserialized from a request body).
    ///
    /// # Errors
    ///
    /// See [`Coordinate::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        let in_range = self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude);
        if in_range {
            Ok(())
        } else {
            Err(ValidationError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Validate every vertex of a boundary ring.
///
/// # Errors
///
/// Returns the first [`ValidationError::InvalidCoordinate`] encountered.
pub fn validate_boundary(boundary: &[Coordinate]) -> Result<(), ValidationError> {
    boundary.iter().try_for_each(Coordinate::validate)
}

/// Great-circle distance between two points, in meters.
#[must_use]
pub fn haversine_distance(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_phi = (to.latitude - from.latitude).to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial great-circle bearing from `from` towards `to`, in degrees `[0, 360)`.
#[must_use]
pub fn initial_bearing(from: Coordinate, to: Coordinate) -> f64 {
    let phi1 = from.latitude.to_radians();
    let phi2 = to.latitude.to_radians();
    let delta_lambda = (to.longitude - from.longitude).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

define_code! {
    /// One of the eight principal compass directions.
    CompassPoint as "direction" {
        North => "N",
        NorthEast => "NE",
        East => "E",
        SouthEast => "SE",
        South => "S",
        SouthWest => "SW",
        West => "W",
        NorthWest => "NW",
    }
}

impl CompassPoint {
    /// Map a bearing in degrees to its 45° sector.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_bearing(bearing: f64) -> Self {
        let normalized = bearing.rem_euclid(360.0);
        let sector = ((normalized + 22.5) / 45.0).floor() as usize % 8;
        Self::ALL[sector]
    }
}

/// Axis-aligned latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` when there are none.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        points.into_iter().fold(None, |acc, point| {
            Some(match acc {
                None => Self {
                    min_latitude: point.latitude,
                    min_longitude: point.longitude,
                    max_latitude: point.latitude,
                    max_longitude: point.longitude,
                },
                Some(bbox) => bbox.extend(*point),
            })
        })
    }

    /// Grow the box so that it contains `point`.
    #[must_use]
    pub fn extend(self, point: Coordinate) -> Self {
        Self {
            min_latitude: self.min_latitude.min(point.latitude),
            min_longitude: self.min_longitude.min(point.longitude),
            max_latitude: self.max_latitude.max(point.latitude),
            max_longitude: self.max_longitude.max(point.longitude),
        }
    }

    /// Smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min_latitude: self.min_latitude.min(other.min_latitude),
            min_longitude: self.min_longitude.min(other.min_longitude),
            max_latitude: self.max_latitude.max(other.max_latitude),
            max_longitude: self.max_longitude.max(other.max_longitude),
        }
    }

    /// Midpoint of the box.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        Coordinate {
            latitude: (self.min_latitude + self.max_latitude) / 2.0,
            longitude: (self.min_longitude + self.max_longitude) / 2.0,
        }
    }

    /// Whether `point` lies inside the box (edges included).
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}

/// Center used to place a shape on the map: the middle of its bounding box.
#[must_use]
pub fn geometry_center(points: &[Coordinate]) -> Option<Coordinate> {
    BoundingBox::from_points(points).map(|bbox| bbox.center())
}

/// Walking directions summary from a visitor to a target point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEstimate {
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_meters: f64,
    pub bearing_degrees: f64,
    pub direction: CompassPoint,
    pub walking_minutes: u32,
    pub distance_label: String,
}

impl NavigationEstimate {
    /// Estimate distance, heading and walking time between two points.
    #[must_use]
    pub fn between(from: Coordinate, to: Coordinate) -> Self {
        let distance_meters = haversine_distance(from, to);
        let bearing_degrees = initial_bearing(from, to);
        Self {
            from,
            to,
            distance_meters,
            bearing_degrees,
            direction: CompassPoint::from_bearing(bearing_degrees),
            walking_minutes: walking_minutes(distance_meters),
            distance_label: distance_label(distance_meters),
        }
    }
}

/// Whole minutes needed to walk `meters`, rounded up.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn walking_minutes(meters: f64) -> u32 {
    if meters <= 0.0 {
        return 0;
    }
    (meters / WALKING_METERS_PER_MINUTE).ceil() as u32
}

/// Human readable distance: meters below one kilometer, kilometers above.
#[must_use]
pub fn distance_label(meters: f64) -> String {
    if meters < 1_000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1_000.0)
    }
}
