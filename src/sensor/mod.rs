//! Sensors turn per-frame picking results into enter/exit events.
//!
//! # Frame Model
//!
//! A picking pass reports, for every controller, the objects its ray currently
//! intersects. Those hits are recorded on the sensor of each hit object:
//!
//! ```rust,ignore
//! sensor.add_picked_object(controller, picked)?;
//! ```
//!
//! Once the pass is over, the sensor is processed for that controller. It
//! compares the recorded hits against the last frame and delivers:
//!
//! 1. an exit event (`is_over() == false`) for every object the controller left;
//! 2. an enter event (`is_over() == true`) for every object it newly hit.
//!
//! Objects hit in both frames produce nothing, as long as the controller stays
//! active. An inactive controller instead leaves everything it was over and
//! enters its current hits again on every process.
//!
//! ```rust,ignore
//! let handled = sensor.process(controller, &transforms);
//! ```
//!
//! # Depth Ordering
//!
//! When several objects overlap, listeners often want the closest one to claim
//! the event. With depth ordering enabled, each batch is sorted by the distance
//! between the world origin and the hit points, and every event is tagged with
//! its `EventGroup` in the batch. This costs a sort per dispatch, so it is
//! disabled by default.
//!
//! # Controllers
//!
//! Controller states are created on first use, but could also be attached
//! explicitly. Detaching a controller emits exits for everything it was over and
//! releases its state.

pub mod depth;
pub mod event;
pub mod listener;
pub mod tracker;

pub mod prelude {
    pub use super::depth::DepthComparator;
    pub use super::event::{EventGroup, SensorEvent};
    pub use super::listener::{EventReceiver, ListenerHandle, SensorEvents};
    pub use super::tracker::ControllerState;
    pub use super::{Sensor, SensorParams};
}

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use smallvec::SmallVec;

use crate::controller::ControllerId;
use crate::errors::*;
use crate::picker::PickedObject;
use crate::spatial::TransformProvider;

use self::depth::DepthComparator;
use self::event::{EventGroup, SensorEvent};
use self::listener::EventReceiver;
use self::tracker::ControllerState;

/// The events built by one dispatch.
pub type EventBatch = SmallVec<[SensorEvent; 8]>;

/// The setup parameters of a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorParams {
    /// Whether the sensor takes part in picking passes.
    pub enabled: bool,
    /// Whether events are sorted by depth and grouped before delivery.
    pub depth_order: bool,
}

impl Default for SensorParams {
    fn default() -> Self {
        SensorParams {
            enabled: true,
            depth_order: false,
        }
    }
}

impl SensorParams {
    /// Parses parameters from json, missing fields take default values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Tracks which objects each controller is over, and notifies its owner.
pub struct Sensor {
    enabled: AtomicBool,
    depth_order: AtomicBool,
    owner: RwLock<Option<Arc<Mutex<EventReceiver>>>>,
    controllers: RwLock<HashMap<ControllerId, Arc<Mutex<ControllerState>>>>,
    comparator: Mutex<DepthComparator>,
}

impl Default for Sensor {
    fn default() -> Self {
        Sensor::new(SensorParams::default())
    }
}

impl Sensor {
    pub fn new(params: SensorParams) -> Self {
        Sensor {
            enabled: AtomicBool::new(params.enabled),
            depth_order: AtomicBool::new(params.depth_order),
            owner: RwLock::new(None),
            controllers: RwLock::new(HashMap::new()),
            comparator: Mutex::new(DepthComparator::new()),
        }
    }

    /// Enables the sensor. Does nothing if already enabled.
    #[inline]
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Disables the sensor. Does nothing if already disabled.
    #[inline]
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    #[inline]
    pub fn is_depth_order_enabled(&self) -> bool {
        self.depth_order.load(Ordering::Acquire)
    }

    /// Enables or disables the depth ordering of events. Takes effect with the
    /// next dispatch.
    #[inline]
    pub fn set_depth_order_enabled(&self, enabled: bool) {
        self.depth_order.store(enabled, Ordering::Release);
    }

    /// Returns the owner which receives the events of this sensor.
    pub fn owner(&self) -> Option<Arc<Mutex<EventReceiver>>> {
        self.owner.read().unwrap().clone()
    }

    /// Sets the owner. Events are silently dropped while there is none.
    pub fn set_owner(&self, owner: Option<Arc<Mutex<EventReceiver>>>) {
        *self.owner.write().unwrap() = owner;
    }

    /// Attaches `controller` with an active state. Returns false if it is
    /// already known to this sensor.
    pub fn attach_controller(&self, controller: ControllerId) -> bool {
        let mut controllers = self.controllers.write().unwrap();
        if controllers.contains_key(&controller) {
            return false;
        }

        controllers.insert(controller, Arc::new(Mutex::new(ControllerState::default())));
        true
    }

    /// Detaches `controller`: every object it was over receives an exit event,
    /// then its state is released. Returns true if any exit was consumed.
    pub fn detach_controller(
        &self,
        controller: ControllerId,
        transforms: &dyn TransformProvider,
    ) -> bool {
        let state = match self.controllers.write().unwrap().remove(&controller) {
            Some(state) => state,
            None => return false,
        };

        let mut events = EventBatch::new();
        {
            state.lock().unwrap().release(controller, &mut events);
        }

        self.dispatch(controller, events, transforms)
    }

    /// Returns the controllers this sensor currently holds a state for.
    pub fn controllers(&self) -> Vec<ControllerId> {
        let mut controllers: Vec<_> = self.controllers.read().unwrap().keys().cloned().collect();
        controllers.sort();
        controllers
    }

    /// Marks `controller` as engaged or not. While inactive, every process
    /// leaves all the objects it was over and enters the ones hit again, with
    /// `SensorEvent::is_active` being false.
    pub fn set_active(&self, controller: ControllerId, active: bool) {
        self.controller_state(controller)
            .lock()
            .unwrap()
            .set_active(active);
    }

    pub fn is_active(&self, controller: ControllerId) -> bool {
        match self.controllers.read().unwrap().get(&controller) {
            Some(state) => state.lock().unwrap().is_active(),
            None => false,
        }
    }

    /// Records that `controller` hits `picked` during the current frame.
    pub fn add_picked_object(&self, controller: ControllerId, picked: PickedObject) -> Result<()> {
        if !picked.is_finite() {
            return Err(Error::NonFiniteHitLocation(picked.target));
        }

        self.controller_state(controller)
            .lock()
            .unwrap()
            .record_hit(picked);
        Ok(())
    }

    /// Closes the current frame of `controller` and delivers the resulting
    /// events to the owner. Returns true if any event was consumed.
    pub fn process(&self, controller: ControllerId, transforms: &dyn TransformProvider) -> bool {
        let mut events = EventBatch::new();
        self.controller_state(controller)
            .lock()
            .unwrap()
            .reconcile(controller, &mut events);

        self.dispatch(controller, events, transforms)
    }

    fn dispatch(
        &self,
        controller: ControllerId,
        mut events: EventBatch,
        transforms: &dyn TransformProvider,
    ) -> bool {
        if events.is_empty() {
            return false;
        }

        let depth_order = self.is_depth_order_enabled();
        if depth_order && events.len() > 1 {
            self.comparator
                .lock()
                .unwrap()
                .sort_by_depth(&mut events, transforms);
        }

        let len = events.len();
        for (i, v) in events.iter_mut().enumerate() {
            v.group = EventGroup::at(i, len, depth_order);
        }

        trace!("[Sensor] dispatches {} events of {}.", len, controller);

        let owner = match self.owner() {
            Some(owner) => owner,
            None => return false,
        };

        let mut owner = owner.lock().unwrap();
        let mut handled = false;
        for v in events.iter() {
            handled |= owner.send(v);
        }

        handled
    }

    fn controller_state(&self, controller: ControllerId) -> Arc<Mutex<ControllerState>> {
        if let Some(state) = self.controllers.read().unwrap().get(&controller) {
            return state.clone();
        }

        self.controllers
            .write()
            .unwrap()
            .entry(controller)
            .or_insert_with(|| Arc::new(Mutex::new(ControllerState::default())))
            .clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spatial::prelude::{IdentityTransforms, SceneObjectId};

    #[test]
    fn params() {
        let params = SensorParams::from_json(r#"{ "depth_order": true }"#).unwrap();
        assert_eq!(
            params,
            SensorParams {
                enabled: true,
                depth_order: true
            }
        );

        assert!(SensorParams::from_json("{ depth_order }").is_err());
    }

    #[test]
    fn switches() {
        let sensor = Sensor::default();
        assert!(sensor.is_enabled());
        assert!(!sensor.is_depth_order_enabled());

        sensor.disable();
        assert!(!sensor.is_enabled());
        sensor.enable();
        assert!(sensor.is_enabled());

        sensor.set_depth_order_enabled(true);
        assert!(sensor.is_depth_order_enabled());
    }

    #[test]
    fn reject_non_finite() {
        let sensor = Sensor::default();
        let target = SceneObjectId::from_raw(1, 1);
        let picked = PickedObject::new(target, [0.0, ::std::f32::INFINITY, 0.0]);

        match sensor.add_picked_object(ControllerId(0), picked) {
            Err(Error::NonFiniteHitLocation(v)) => assert_eq!(v, target),
            _ => panic!("non-finite hit location should be rejected."),
        }

        assert!(!sensor.process(ControllerId(0), &IdentityTransforms));
    }

    #[test]
    fn controllers() {
        let sensor = Sensor::default();
        assert!(sensor.attach_controller(ControllerId(1)));
        assert!(!sensor.attach_controller(ControllerId(1)));
        assert!(sensor.is_active(ControllerId(1)));

        sensor.set_active(ControllerId(0), false);
        assert!(!sensor.is_active(ControllerId(0)));
        assert_eq!(sensor.controllers(), vec![ControllerId(0), ControllerId(1)]);

        assert!(!sensor.detach_controller(ControllerId(0), &IdentityTransforms));
        assert_eq!(sensor.controllers(), vec![ControllerId(1)]);
    }
}
