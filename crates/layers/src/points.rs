use std::borrow::Cow;
use std::rc::Rc;

use catalog::{Catalog, Category, Location};
use foundation::math::LatLon;

use crate::symbology::style_for;

/// Renderable projection of one [`Location`].
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub name: Cow<'static, str>,
    pub category: Category,
    pub lat: f64,
    pub lon: f64,
    /// Fraction of globe radius.
    pub altitude: f32,
    pub radius_scale: f32,
    pub color: [f32; 4],
}

impl Point {
    pub fn from_location(location: &Location) -> Self {
        let style = style_for(&location.category);
        Self {
            name: location.name.clone(),
            category: location.category.clone(),
            lat: location.lat,
            lon: location.lon,
            altitude: style.altitude,
            radius_scale: style.radius_scale,
            color: style.color,
        }
    }

    pub fn position(&self) -> LatLon {
        LatLon::new(self.lat, self.lon)
    }
}

/// One point per location, in catalog order.
pub fn derive_points(locations: &[Location]) -> Vec<Point> {
    locations.iter().map(Point::from_location).collect()
}

/// Memoized point set for a catalog.
///
/// Recomputes only when the catalog's revision changes; otherwise hands out
/// the same shared slice.
#[derive(Debug)]
pub struct PointCache {
    revision: Option<u64>,
    points: Rc<[Point]>,
    computations: u64,
}

impl Default for PointCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PointCache {
    pub fn new() -> Self {
        Self {
            revision: None,
            points: Rc::from(Vec::new()),
            computations: 0,
        }
    }

    pub fn points(&mut self, catalog: &Catalog) -> Rc<[Point]> {
        if self.revision != Some(catalog.revision()) {
            self.points = derive_points(catalog.locations()).into();
            self.revision = Some(catalog.revision());
            self.computations += 1;
        }
        Rc::clone(&self.points)
    }

    /// How many times the point set has been derived.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, PointCache, derive_points};
    use crate::symbology::style_for;
    use catalog::{Catalog, Category, Location};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[test]
    fn one_point_per_location() {
        let catalog = Catalog::builtin();
        let points = derive_points(catalog.locations());
        assert_eq!(points.len(), catalog.len());
        for (p, l) in points.iter().zip(catalog.locations()) {
            assert_eq!(p.name, l.name);
            assert_eq!((p.lat, p.lon), (l.lat, l.lon));
            assert_eq!(p.color, style_for(&l.category).color);
        }
    }

    #[test]
    fn derivation_is_idempotent() {
        let catalog = Catalog::builtin();
        assert_eq!(derive_points(catalog.locations()), derive_points(catalog.locations()));
    }

    #[test]
    fn cache_reuses_until_revision_changes() {
        let mut catalog = Catalog::builtin();
        let mut cache = PointCache::new();

        let a = cache.points(&catalog);
        let b = cache.points(&catalog);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache.computations(), 1);

        catalog
            .push(Location::site("Edge Oslo", 59.91, 10.75, Category::provider("edgeco"), "EdgeCo", "Oslo", "NO"))
            .unwrap();
        let c = cache.points(&catalog);
        assert_eq!(cache.computations(), 2);
        assert_eq!(c.len(), a.len() + 1);
        assert_eq!(c.last().map(|p: &Point| p.name.to_string()), Some("Edge Oslo".to_string()));
    }
}
