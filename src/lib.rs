//! # What is This?
//!
//! `gvr-sensor` decides, for each input controller of a VR application, which
//! scene objects it is over. It turns per-frame picking results into enter and
//! exit events, optionally orders overlapping hits by depth, and delivers the
//! events to typed listeners.
//!
//! The rendering engine, the scene graph and the input devices live elsewhere.
//! They are reached through three seams:
//!
//! 1. `picker::Picker`, which reports the objects hit by each controller;
//! 2. `spatial::TransformProvider`, which supplies model matrices;
//! 3. `sensor::listener::SensorEvents`, which receives the events.
//!
//! # Quick Example
//!
//! ```rust,ignore
//! gvr_sensor::setup(SystemParams::default())?;
//!
//! let sensor = gvr_sensor::create_sensor(SensorParams::default());
//! gvr_sensor::attach_sensor(button, sensor)?;
//! gvr_sensor::attach_controller(ControllerId(0));
//!
//! loop {
//!     // Update the rays of picker with controller poses...
//!     gvr_sensor::advance(&picker, &transforms);
//! }
//!
//! gvr_sensor::discard();
//! ```

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub extern crate cgmath;
pub extern crate smallvec;

#[macro_use]
pub mod utils;
pub mod controller;
pub mod errors;
pub mod math;
pub mod picker;
pub mod sensor;
pub mod spatial;
pub mod system;

pub mod prelude {
    pub use crate::controller::ControllerId;
    pub use crate::errors::{Error, Result};
    pub use crate::picker::{BoundsPicker, PickedObject, Picker};
    pub use crate::sensor::prelude::*;
    pub use crate::spatial::prelude::*;
    pub use crate::system::{SensorHandle, SensorSystem, SystemParams};
}

pub use self::inside::{discard, setup, valid};

use std::sync::Arc;

use self::controller::ControllerId;
use self::errors::*;
use self::inside::ctx;
use self::picker::Picker;
use self::sensor::{Sensor, SensorParams};
use self::spatial::{SceneObjectId, TransformProvider};
use self::system::SensorHandle;

/// Creates a sensor.
#[inline]
pub fn create_sensor(params: SensorParams) -> SensorHandle {
    ctx().create_sensor(params)
}

/// Deletes a sensor, and unbinds every scene object bound to it. Objects it
/// tracked receive exit events first.
#[inline]
pub fn delete_sensor(handle: SensorHandle, transforms: &dyn TransformProvider) -> Result<bool> {
    ctx().delete_sensor(handle, transforms)
}

/// Returns the sensor if exists.
#[inline]
pub fn sensor(handle: SensorHandle) -> Option<Arc<Sensor>> {
    ctx().sensor(handle)
}

/// Binds a scene object to a sensor.
#[inline]
pub fn attach_sensor(object: SceneObjectId, handle: SensorHandle) -> Result<Option<SensorHandle>> {
    ctx().attach_sensor(object, handle)
}

/// Unbinds a scene object from its sensor.
#[inline]
pub fn detach_sensor(object: SceneObjectId) -> Option<SensorHandle> {
    ctx().detach_sensor(object)
}

/// Attaches a controller.
#[inline]
pub fn attach_controller(controller: ControllerId) {
    ctx().attach_controller(controller)
}

/// Detaches a controller, the objects it was over receive exit events.
#[inline]
pub fn detach_controller(
    controller: ControllerId,
    transforms: &dyn TransformProvider,
) -> Result<bool> {
    ctx().detach_controller(controller, transforms)
}

/// Marks a controller as engaged or not.
#[inline]
pub fn set_active(controller: ControllerId, active: bool) -> Result<()> {
    ctx().set_active(controller, active)
}

/// Runs the picking pass of one frame.
#[inline]
pub fn advance(picker: &dyn Picker, transforms: &dyn TransformProvider) -> bool {
    ctx().advance(picker, transforms)
}

mod inside {
    use super::system::{SensorSystem, SystemParams};

    static mut CTX: *const SensorSystem = std::ptr::null();

    #[inline]
    pub fn ctx() -> &'static SensorSystem {
        unsafe {
            debug_assert!(
                !CTX.is_null(),
                "sensor system has not been initialized properly."
            );

            &*CTX
        }
    }

    /// Checks if the sensor system is enabled.
    #[inline]
    pub fn valid() -> bool {
        unsafe { !CTX.is_null() }
    }

    /// Setup the sensor system.
    pub fn setup(params: SystemParams) -> Result<(), failure::Error> {
        unsafe {
            debug_assert!(CTX.is_null(), "duplicated setup of sensor system.");

            info!("[SensorSystem] setup with {:?}.", params);
            let ctx = SensorSystem::new(params);
            CTX = Box::into_raw(Box::new(ctx));
            Ok(())
        }
    }

    /// Discard the sensor system. It could be setup again afterwards.
    pub fn discard() {
        unsafe {
            if CTX.is_null() {
                return;
            }

            info!("[SensorSystem] discard.");
            drop(Box::from_raw(CTX as *mut SensorSystem));
            CTX = std::ptr::null();
        }
    }
}
