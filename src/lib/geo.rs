use geo::prelude::*;
use geo_types::{Geometry, LineString, MultiPoint, Point, Polygon};

// `geo::COORD_PRECISION` was removed upstream in geo-types 0.6.0; restore the
// original value (an arbitrary constant of 0.1m) the code was written against.
const COORD_PRECISION: f32 = 0.1;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl PartialEq<Location> for Location {
    fn eq(&self, other: &Self) -> bool {
        let self_point = Point::new(self.lon, self.lat);
        let other_point = Point::new(other.lon, other.lat);
        let distance = self_point.haversine_distance(&other_point);
        distance < COORD_PRECISION.into()
    }
}

impl From<Point<f64>> for Location {
    fn from(point: Point<f64>) -> Self {
        Location {
            lat: point.lat(),
            lon: point.lng(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Bounds {
    e: f64,
    n: f64,
    s: f64,
    w: f64,
}

impl From<&Bounds> for (Location, Location) {
    fn from(bounds: &Bounds) -> Self {
        let ne = Location {
            lat: bounds.n,
            lon: bounds.e,
        };
        let sw = Location {
            lat: bounds.s,
            lon: bounds.w,
        };

        (ne, sw)
    }
}

impl PartialEq<Bounds> for Bounds {
    fn eq(&self, other: &Self) -> bool {
        let (self_ne, self_sw) = self.into();
        let (other_ne, other_sw) = other.into();
        self_ne == other_ne && self_sw == other_sw
    }
}

fn get_geometry(coordinates: Vec<(f64, f64)>) -> Option<Geometry<f64>> {
    let line_string: LineString<f64> = coordinates.into();
    let first = line_string.points_iter().next()?;
    let last = line_string.points_iter().last()?;
    if first == last {
        let polygon = Polygon::new(line_string, vec![]);
        Some(Geometry::Polygon(polygon))
    } else {
        Some(Geometry::LineString(line_string))
    }
}

fn get_bounds(geometry: &Geometry<f64>) -> Option<Bounds> {
    let rect = match geometry {
        Geometry::LineString(ls) => ls.bounding_rect(),
        Geometry::Polygon(p) => p.bounding_rect(),
        _ => None,
    }?;
    Some(Bounds {
        e: rect.max().x,
        n: rect.max().y,
        s: rect.min().y,
        w: rect.min().x,
    })
}

fn get_centroid(geometry: &Geometry<f64>) -> Option<Location> {
    let point = match geometry {
        Geometry::LineString(ls) => ls.centroid(),
        Geometry::Polygon(p) => p.centroid(),
        _ => None,
    }?;
    Some(point.into())
}

pub fn get_geo_info(coordinates: Vec<(f64, f64)>) -> (Option<Location>, Option<Bounds>) {
    if let Some(geometry) = get_geometry(coordinates) {
        let centroid = get_centroid(&geometry);
        let bounds = get_bounds(&geometry);
        return (centroid, bounds);
    }
    (None, None)
}

pub fn get_compound_coordinates(coordinates: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let multi_points: MultiPoint<_> = coordinates.into();
    let convex_hull = multi_points.convex_hull();
    convex_hull
        .exterior()
        .points_iter()
        .map(|p| (p.lng(), p.lat()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_geo_info_open() {
        let coordinates = vec![(5., 49.), (6., 50.), (7., 49.)];
        let (centroid, bounds) = get_geo_info(coordinates);
        let reference_loc = Location { lat: 49.5, lon: 6. };
        assert_eq!(centroid.unwrap(), reference_loc);
        let reference_bounds = Bounds {
            e: 7.,
            n: 50.,
            s: 49.,
            w: 5.,
        };
        assert_eq!(bounds.unwrap(), reference_bounds);
    }

    #[test]
    fn get_geo_info_closed() {
        let coordinates = vec![(5., 49.), (6., 50.), (7., 49.), (5., 49.)];
        let (centroid, bounds) = get_geo_info(coordinates);
        let reference_loc = Location {
            lat: 49.333_333,
            lon: 6.,
        };
        assert_eq!(centroid.unwrap(), reference_loc);
        let reference_bounds = Bounds {
            e: 7.,
            n: 50.,
            s: 49.,
            w: 5.,
        };
        assert_eq!(bounds.unwrap(), reference_bounds);
    }

    #[test]
    fn get_geo_info_empty() {
        let (centroid, bounds) = get_geo_info(vec![]);
        assert!(centroid.is_none());
        assert!(bounds.is_none());
    }

    #[test]
    fn compound_coordinates_form_a_hull() {
        // point 4 sits in the middle of the square and is dropped
        let coordinates = vec![(6., 52.), (6., 50.), (8., 50.), (8., 52.), (7., 51.)];
        let compound = get_compound_coordinates(coordinates);
        assert_eq!(
            compound,
            vec![(6., 50.), (8., 50.), (8., 52.), (6., 52.), (6., 50.)]
        );
    }

    #[test]
    fn compound_coordinates_of_nothing() {
        let compound = get_compound_coordinates(vec![]);
        assert_eq!(compound.len(), 0);
    }
}
