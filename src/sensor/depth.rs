use std::cmp::Ordering;

use crate::math::prelude::*;
use crate::spatial::TransformProvider;

use super::event::SensorEvent;

/// Orders the events of one dispatch by the world-space distance between the
/// origin and their hit points.
///
/// Distances are cached per slot of the batch being sorted, the cache must be
/// populated, used and cleared without another batch sneaking in. `Sensor`
/// keeps the comparator behind a mutex for that reason.
#[derive(Debug, Default)]
pub struct DepthComparator {
    depths: Vec<f32>,
    order: Vec<usize>,
    scratch: Vec<SensorEvent>,
}

impl DepthComparator {
    pub fn new() -> Self {
        DepthComparator::default()
    }

    /// Computes the depth of every event in `events`, indexed by slot.
    pub fn update_depth_cache(
        &mut self,
        events: &[SensorEvent],
        transforms: &dyn TransformProvider,
    ) {
        self.depths.clear();
        self.depths
            .extend(events.iter().map(|v| depth(v, transforms)));
    }

    /// Returns the cached depth of the event at `slot`.
    #[inline]
    pub fn cached_depth(&self, slot: usize) -> Option<f32> {
        self.depths.get(slot).cloned()
    }

    /// Compares the events at slots `lhs` and `rhs` by cached depth.
    #[inline]
    pub fn compare(&self, lhs: usize, rhs: usize) -> Ordering {
        compare_depth(self.depths[lhs], self.depths[rhs])
    }

    /// Sorts `events` ascending by cached depth. Events with equal depths keep
    /// their relative order, NaN depths go last.
    pub fn sort(&mut self, events: &mut [SensorEvent]) {
        debug_assert_eq!(self.depths.len(), events.len(), "stale depth cache.");

        self.order.clear();
        self.order.extend(0..events.len());

        let depths = &self.depths;
        self.order
            .sort_by(|&lhs, &rhs| compare_depth(depths[lhs], depths[rhs]));

        self.scratch.clear();
        self.scratch.extend(self.order.iter().map(|&i| events[i]));
        events.copy_from_slice(&self.scratch);

        let sorted: Vec<f32> = self.order.iter().map(|&i| self.depths[i]).collect();
        self.depths = sorted;
    }

    pub fn clear_depth_cache(&mut self) {
        self.depths.clear();
        self.order.clear();
        self.scratch.clear();
    }

    /// Populates the cache, sorts `events` and clears the cache in one go.
    pub fn sort_by_depth(&mut self, events: &mut [SensorEvent], transforms: &dyn TransformProvider) {
        self.update_depth_cache(events, transforms);
        self.sort(events);
        self.clear_depth_cache();
    }
}

/// Distance from the world origin to the hit point of `event`.
pub fn depth(event: &SensorEvent, transforms: &dyn TransformProvider) -> f32 {
    let picked = event.picked_object();
    let local = picked.hit_location;

    match transforms.model_matrix(picked.target) {
        Some(m) => (m * local.extend(1.0)).truncate().magnitude(),
        None => local.magnitude(),
    }
}

fn compare_depth(lhs: f32, rhs: f32) -> Ordering {
    match (lhs.is_nan(), rhs.is_nan()) {
        (false, false) => {
            if lhs < rhs {
                Ordering::Less
            } else if lhs > rhs {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}
