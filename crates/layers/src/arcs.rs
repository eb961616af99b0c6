use std::collections::BTreeMap;

use foundation::ids::ArcId;
use foundation::math::LatLon;
use foundation::time::{Time, TimeSpan};

/// One transient transfer animation between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcDatum {
    pub id: ArcId,
    /// Indices into the point set the arc was drawn from.
    pub start_index: usize,
    pub end_index: usize,
    pub start: LatLon,
    pub end: LatLon,
    pub color: [f32; 4],
    /// Display window; the arc is retired at `span.end`.
    pub span: TimeSpan,
}

impl ArcDatum {
    pub fn is_self_arc(&self) -> bool {
        self.start_index == self.end_index
    }

    pub fn born(&self) -> Time {
        self.span.start
    }
}

/// Active arcs keyed by id. Iteration is by id, which for allocator-issued
/// ids is creation order.
#[derive(Debug, Default, Clone)]
pub struct ArcSet {
    arcs: BTreeMap<ArcId, ArcDatum>,
}

impl ArcSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if an arc with this id is already active.
    pub fn insert(&mut self, arc: ArcDatum) -> bool {
        if self.arcs.contains_key(&arc.id) {
            return false;
        }
        self.arcs.insert(arc.id, arc);
        true
    }

    pub fn remove(&mut self, id: ArcId) -> Option<ArcDatum> {
        self.arcs.remove(&id)
    }

    pub fn contains(&self, id: ArcId) -> bool {
        self.arcs.contains_key(&id)
    }

    pub fn get(&self, id: ArcId) -> Option<&ArcDatum> {
        self.arcs.get(&id)
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArcDatum> {
        self.arcs.values()
    }

    pub fn ids(&self) -> Vec<ArcId> {
        self.arcs.keys().copied().collect()
    }

    /// Owned copy for handing to the render layer.
    pub fn snapshot(&self) -> Vec<ArcDatum> {
        self.arcs.values().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.arcs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{ArcDatum, ArcSet};
    use foundation::ids::ArcId;
    use foundation::math::LatLon;
    use foundation::time::{Time, TimeSpan};

    fn arc(id: u64) -> ArcDatum {
        ArcDatum {
            id: ArcId::new(id),
            start_index: 0,
            end_index: 1,
            start: LatLon::new(0.0, 0.0),
            end: LatLon::new(10.0, 10.0),
            color: [1.0; 4],
            span: TimeSpan::starting_at(Time::ZERO, 1000.0),
        }
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let mut set = ArcSet::new();
        assert!(set.insert(arc(1)));
        assert!(!set.insert(arc(1)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn removal_is_by_id_only() {
        let mut set = ArcSet::new();
        set.insert(arc(1));
        set.insert(arc(2));
        set.insert(arc(3));
        assert!(set.remove(ArcId::new(2)).is_some());
        assert!(set.remove(ArcId::new(2)).is_none());
        assert_eq!(set.ids(), vec![ArcId::new(1), ArcId::new(3)]);
    }

    #[test]
    fn snapshot_is_ordered_by_id() {
        let mut set = ArcSet::new();
        set.insert(arc(5));
        set.insert(arc(4));
        let ids: Vec<u64> = set.snapshot().iter().map(|a| a.id.get()).collect();
        assert_eq!(ids, vec![4, 5]);
    }
}
