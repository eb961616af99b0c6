//! Arc lifecycle: spawn decisions and the active set.
//!
//! Timers live in the view; this type only decides whether a tick spawns,
//! which endpoints it uses, and keeps the active set consistent.

use foundation::ids::{ArcId, IdAllocator};
use foundation::time::{Time, TimeSpan};
use layers::{ArcDatum, ArcSet, Point};

use crate::config::ArcScheduleConfig;
use crate::random::{ArcRandom, pick_distinct};

pub struct ArcScheduler {
    probability: f64,
    lifetime_ms: u32,
    ids: IdAllocator,
    active: ArcSet,
    rng: Box<dyn ArcRandom>,
    spawned: u64,
    retired: u64,
}

impl ArcScheduler {
    pub fn new(config: &ArcScheduleConfig, rng: Box<dyn ArcRandom>) -> Self {
        Self {
            probability: config.effective_probability(),
            lifetime_ms: config.lifetime_ms,
            ids: IdAllocator::new(),
            active: ArcSet::new(),
            rng,
            spawned: 0,
            retired: 0,
        }
    }

    pub fn lifetime_ms(&self) -> u32 {
        self.lifetime_ms
    }

    /// Roll the gate for one tick and, if it passes, draw a new arc.
    ///
    /// The arc is not active until [`ArcScheduler::admit`] is called; the
    /// caller first makes sure its removal is scheduled.
    pub fn propose(&mut self, points: &[Point], now: Time) -> Option<ArcDatum> {
        if points.len() < 2 {
            return None;
        }
        if !self.rng.chance(self.probability) {
            return None;
        }
        let (start_index, end_index) = pick_distinct(self.rng.as_mut(), points.len())?;
        let start = &points[start_index];
        let end = &points[end_index];
        Some(ArcDatum {
            id: self.ids.next_arc(),
            start_index,
            end_index,
            start: start.position(),
            end: end.position(),
            color: start.color,
            span: TimeSpan::starting_at(now, f64::from(self.lifetime_ms)),
        })
    }

    pub fn admit(&mut self, arc: ArcDatum) -> bool {
        let added = self.active.insert(arc);
        if added {
            self.spawned += 1;
        }
        added
    }

    /// Remove an arc by id; absent ids are ignored.
    pub fn retire(&mut self, id: ArcId) -> Option<ArcDatum> {
        let removed = self.active.remove(id);
        if removed.is_some() {
            self.retired += 1;
        }
        removed
    }

    pub fn active(&self) -> &ArcSet {
        &self.active
    }

    pub fn snapshot(&self) -> Vec<ArcDatum> {
        self.active.snapshot()
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn retired(&self) -> u64 {
        self.retired
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl std::fmt::Debug for ArcScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArcScheduler")
            .field("probability", &self.probability)
            .field("lifetime_ms", &self.lifetime_ms)
            .field("active", &self.active.len())
            .field("spawned", &self.spawned)
            .field("retired", &self.retired)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::ArcScheduler;
    use crate::config::ArcScheduleConfig;
    use crate::random::{ScriptedRandom, SeededRandom};
    use catalog::Catalog;
    use foundation::time::Time;
    use layers::derive_points;

    fn always() -> ArcScheduleConfig {
        ArcScheduleConfig {
            spawn_probability: 1.0,
            ..ArcScheduleConfig::default()
        }
    }

    #[test]
    fn skips_with_fewer_than_two_points() {
        let points = derive_points(&Catalog::builtin().locations()[..1]);
        let mut s = ArcScheduler::new(&always(), Box::new(SeededRandom::new(1)));
        assert!(s.propose(&points, Time::ZERO).is_none());
        assert!(s.propose(&[], Time::ZERO).is_none());
    }

    #[test]
    fn gate_blocks_when_roll_exceeds_probability() {
        let points = derive_points(Catalog::builtin().locations());
        let cfg = ArcScheduleConfig {
            spawn_probability: 0.3,
            ..ArcScheduleConfig::default()
        };
        let mut s = ArcScheduler::new(&cfg, Box::new(ScriptedRandom::constant(0.5)));
        assert!(s.propose(&points, Time::ZERO).is_none());
    }

    #[test]
    fn arc_takes_start_color_and_lifetime() {
        let points = derive_points(Catalog::builtin().locations());
        // Gate roll, start draw, end draw.
        let rng = ScriptedRandom::new(vec![0.0, 0.0, 0.5]);
        let mut s = ArcScheduler::new(&always(), Box::new(rng));
        let arc = s.propose(&points, Time::from_ms(2000.0)).unwrap();

        assert_eq!(arc.start_index, 0);
        assert_ne!(arc.end_index, 0);
        assert_eq!(arc.color, points[0].color);
        assert_eq!(arc.start, points[0].position());
        assert_eq!(arc.span.start, Time::from_ms(2000.0));
        assert_eq!(arc.span.end, Time::from_ms(6000.0));
    }

    #[test]
    fn ids_are_unique_across_spawns() {
        let points = derive_points(Catalog::builtin().locations());
        let mut s = ArcScheduler::new(&always(), Box::new(SeededRandom::new(3)));
        let mut ids = Vec::new();
        for i in 0..50 {
            let arc = s.propose(&points, Time::from_ms(i as f64)).unwrap();
            assert!(!arc.is_self_arc());
            ids.push(arc.id);
            assert!(s.admit(arc));
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert_eq!(s.spawned(), 50);
    }

    #[test]
    fn retire_is_by_id_and_idempotent() {
        let points = derive_points(Catalog::builtin().locations());
        let mut s = ArcScheduler::new(&always(), Box::new(SeededRandom::new(5)));
        let a = s.propose(&points, Time::ZERO).unwrap();
        let b = s.propose(&points, Time::ZERO).unwrap();
        let (a_id, b_id) = (a.id, b.id);
        s.admit(a);
        s.admit(b);

        assert!(s.retire(a_id).is_some());
        assert!(s.retire(a_id).is_none());
        assert_eq!(s.active().ids(), vec![b_id]);
        assert_eq!(s.retired(), 1);
    }
}
