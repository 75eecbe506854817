//! Great-circle distance and movement speed

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::error::{Error, Result};
use crate::track::{Coordinates, TrackPoint};
use std::f64::consts::PI;

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// # Arguments
/// * `p1` - First point, degrees
/// * `p2` - Second point, degrees
///
/// # Returns
/// Distance in kilometers
pub fn haversine_distance_km(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat * PI / 180.0;
    let lat2 = p2.lat * PI / 180.0;
    let delta_lat = (p2.lat - p1.lat) * PI / 180.0;
    let delta_lng = (p2.lng - p1.lng) * PI / 180.0;

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Movement speed between two track points in km/h, rounded to the nearest
/// integer
///
/// The result does not depend on argument order.
///
/// # Errors
/// `Error::IndeterminateSpeed` when both points share a timestamp.
pub fn movement_speed_kmh(p1: &TrackPoint, p2: &TrackPoint) -> Result<f64> {
    if p1.time == p2.time {
        return Err(Error::IndeterminateSpeed);
    }

    let elapsed = (p2.time - p1.time).abs();
    let hours = match elapsed.num_nanoseconds() {
        Some(ns) => ns as f64 / 3.6e12,
        None => elapsed.num_seconds() as f64 / 3600.0,
    };
    let distance = haversine_distance_km(p1.coords(), p2.coords());

    Ok((distance / hours).round())
}
