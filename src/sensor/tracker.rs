use crate::controller::ControllerId;
use crate::picker::PickedObject;
use crate::spatial::SceneObjectId;

use super::event::SensorEvent;

/// Tracks the objects a single controller is over, across frames.
///
/// Hits recorded during the picking pass are either re-confirmations of
/// objects from the last frame or fresh hits. Reconciling turns whatever was
/// not confirmed into exit events and the fresh hits into enter events.
///
/// Hits are kept in the order they were recorded, so events of a frame are
/// always built in the same order.
#[derive(Debug, Clone)]
pub struct ControllerState {
    prev_hits: Vec<PickedObject>,
    confirmed: Vec<PickedObject>,
    new_hits: Vec<PickedObject>,
    active: bool,
}

impl Default for ControllerState {
    fn default() -> Self {
        ControllerState::new(true)
    }
}

impl ControllerState {
    pub fn new(active: bool) -> Self {
        ControllerState {
            prev_hits: Vec::new(),
            confirmed: Vec::new(),
            new_hits: Vec::new(),
            active,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Returns the number of objects tracked from previous frames.
    #[inline]
    pub fn tracked(&self) -> usize {
        self.prev_hits.len() + self.confirmed.len()
    }

    /// Returns true if `target` was over in the last reconciled frame.
    #[inline]
    pub fn is_tracking(&self, target: SceneObjectId) -> bool {
        position(&self.prev_hits, target).is_some() || position(&self.confirmed, target).is_some()
    }

    /// Records a hit of the current frame.
    pub fn record_hit(&mut self, picked: PickedObject) {
        if let Some(i) = position(&self.prev_hits, picked.target) {
            self.prev_hits.remove(i);
            self.confirmed.push(picked);
            return;
        }

        if let Some(i) = position(&self.confirmed, picked.target) {
            self.confirmed[i] = picked;
            return;
        }

        match position(&self.new_hits, picked.target) {
            Some(i) => self.new_hits[i] = picked,
            None => self.new_hits.push(picked),
        }
    }

    /// Closes the current frame and appends the resulting transitions to `events`.
    ///
    /// An active controller only reports changes: objects it left and objects
    /// it newly hit. An inactive controller leaves every object it was over and
    /// enters every object hit during this frame again, with `is_active()`
    /// being false on all of these events.
    pub fn reconcile<E>(&mut self, controller: ControllerId, events: &mut E)
    where
        E: Extend<SensorEvent>,
    {
        let active = self.active;

        events.extend(
            self.prev_hits
                .drain(..)
                .map(|v| SensorEvent::new(controller, v, false, active)),
        );

        if !active {
            events.extend(
                self.confirmed
                    .iter()
                    .map(|&v| SensorEvent::new(controller, v, false, active)),
            );

            // Re-confirmed objects are entered again ahead of the fresh ones.
            let mut hits = ::std::mem::replace(&mut self.confirmed, Vec::new());
            hits.extend(self.new_hits.drain(..));
            self.new_hits = hits;
        }

        ::std::mem::swap(&mut self.prev_hits, &mut self.confirmed);

        for v in self.new_hits.drain(..) {
            self.prev_hits.push(v);
            events.extend(Some(SensorEvent::new(controller, v, true, active)));
        }
    }

    /// Drops every tracked object and pending hit, appending exit events for
    /// the tracked ones to `events`.
    pub fn release<E>(&mut self, controller: ControllerId, events: &mut E)
    where
        E: Extend<SensorEvent>,
    {
        let active = self.active;
        events.extend(
            self.prev_hits
                .drain(..)
                .chain(self.confirmed.drain(..))
                .map(|v| SensorEvent::new(controller, v, false, active)),
        );

        self.new_hits.clear();
    }
}

#[inline]
fn position(hits: &[PickedObject], target: SceneObjectId) -> Option<usize> {
    hits.iter().position(|v| v.target == target)
}
