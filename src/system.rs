use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::controller::ControllerId;
use crate::errors::*;
use crate::picker::Picker;
use crate::sensor::{Sensor, SensorParams};
use crate::spatial::{SceneObjectId, TransformProvider};
use crate::utils::object_pool::ObjectPool;

impl_handle!(SensorHandle);

/// The setup parameters of `SensorSystem`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemParams {
    /// The number of sensors to reserve room for.
    pub sensors_capacity: usize,
    /// The number of controllers to reserve room for.
    pub controllers_capacity: usize,
}

impl Default for SystemParams {
    fn default() -> Self {
        SystemParams {
            sensors_capacity: 64,
            controllers_capacity: 4,
        }
    }
}

impl SystemParams {
    /// Parses parameters from json, missing fields take default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: SystemParams = serde_json::from_str(json)?;
        if params.controllers_capacity == 0 {
            return Err(Error::Params("controllers_capacity must be positive".into()));
        }

        Ok(params)
    }
}

/// The centralized management of sensors, scene object bindings and
/// controllers. It drives the per-frame picking pass.
pub struct SensorSystem {
    sensors: RwLock<ObjectPool<SensorHandle, Arc<Sensor>>>,
    targets: RwLock<HashMap<SceneObjectId, SensorHandle>>,
    controllers: RwLock<HashMap<ControllerId, bool>>,
}

impl Default for SensorSystem {
    fn default() -> Self {
        SensorSystem::new(SystemParams::default())
    }
}

impl SensorSystem {
    pub fn new(params: SystemParams) -> Self {
        SensorSystem {
            sensors: RwLock::new(ObjectPool::with_capacity(params.sensors_capacity)),
            targets: RwLock::new(HashMap::new()),
            controllers: RwLock::new(HashMap::with_capacity(params.controllers_capacity)),
        }
    }

    /// Creates a sensor. Already attached controllers are attached to it with
    /// their current active states.
    pub fn create_sensor(&self, params: SensorParams) -> SensorHandle {
        let sensor = Sensor::new(params);
        for (&id, &active) in self.controllers.read().unwrap().iter() {
            sensor.attach_controller(id);
            sensor.set_active(id, active);
        }

        let handle = self.sensors.write().unwrap().create(Arc::new(sensor));
        info!("[SensorSystem] creates {}.", handle);
        handle
    }

    /// Deletes a sensor and unbinds every scene object bound to it. Every
    /// controller is detached from the sensor first, so the objects they were
    /// over receive exit events. Returns true if any of them was consumed.
    pub fn delete_sensor(
        &self,
        handle: SensorHandle,
        transforms: &dyn TransformProvider,
    ) -> Result<bool> {
        let sensor = match self.sensors.write().unwrap().free(handle) {
            Some(sensor) => sensor,
            None => return Err(Error::SensorHandleInvalid(handle)),
        };

        self.targets.write().unwrap().retain(|_, v| *v != handle);

        let mut handled = false;
        for controller in sensor.controllers() {
            handled |= sensor.detach_controller(controller, transforms);
        }

        info!("[SensorSystem] deletes {}.", handle);
        Ok(handled)
    }

    /// Returns the sensor if exists.
    pub fn sensor(&self, handle: SensorHandle) -> Option<Arc<Sensor>> {
        self.sensors.read().unwrap().get(handle).cloned()
    }

    /// Returns the number of alive sensors.
    pub fn len(&self) -> usize {
        self.sensors.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Binds `object` to a sensor, hits on `object` are routed to it. Returns
    /// the sensor previously bound.
    pub fn attach_sensor(
        &self,
        object: SceneObjectId,
        handle: SensorHandle,
    ) -> Result<Option<SensorHandle>> {
        if !self.sensors.read().unwrap().is_alive(handle) {
            return Err(Error::SensorHandleInvalid(handle));
        }

        Ok(self.targets.write().unwrap().insert(object, handle))
    }

    /// Unbinds `object` from its sensor.
    pub fn detach_sensor(&self, object: SceneObjectId) -> Option<SensorHandle> {
        self.targets.write().unwrap().remove(&object)
    }

    /// Returns the sensor bound to `object`.
    pub fn sensor_of(&self, object: SceneObjectId) -> Option<SensorHandle> {
        self.targets.read().unwrap().get(&object).cloned()
    }

    /// Attaches a controller, which takes part in the following frames.
    pub fn attach_controller(&self, controller: ControllerId) {
        self.controllers.write().unwrap().insert(controller, true);

        for v in self.sensors.read().unwrap().values() {
            v.attach_controller(controller);
        }

        info!("[SensorSystem] attaches {}.", controller);
    }

    /// Detaches a controller from every sensor. The objects it was over
    /// receive exit events. Returns true if any of them was consumed.
    pub fn detach_controller(
        &self,
        controller: ControllerId,
        transforms: &dyn TransformProvider,
    ) -> Result<bool> {
        if self.controllers.write().unwrap().remove(&controller).is_none() {
            return Err(Error::ControllerNotAttached(controller));
        }

        let mut handled = false;
        for v in self.snapshot() {
            handled |= v.detach_controller(controller, transforms);
        }

        info!("[SensorSystem] detaches {}.", controller);
        Ok(handled)
    }

    /// Returns the attached controllers.
    pub fn controllers(&self) -> Vec<ControllerId> {
        let mut controllers: Vec<_> = self.controllers.read().unwrap().keys().cloned().collect();
        controllers.sort();
        controllers
    }

    /// Marks a controller as engaged or not on every sensor.
    pub fn set_active(&self, controller: ControllerId, active: bool) -> Result<()> {
        match self.controllers.write().unwrap().get_mut(&controller) {
            Some(v) => *v = active,
            None => return Err(Error::ControllerNotAttached(controller)),
        }

        for v in self.sensors.read().unwrap().values() {
            v.set_active(controller, active);
        }

        Ok(())
    }

    /// Runs the picking pass of one frame. For every attached controller, hits
    /// are routed to the sensor bound to the hit object, then every enabled
    /// sensor is processed. Returns true if any event was consumed.
    pub fn advance(&self, picker: &dyn Picker, transforms: &dyn TransformProvider) -> bool {
        let mut handled = false;
        for controller in self.controllers() {
            let picks = picker.pick(controller, transforms);

            // Locks are released before dispatching, listeners may call back into the system.
            let enabled = {
                let sensors = self.sensors.read().unwrap();
                let targets = self.targets.read().unwrap();

                for picked in picks {
                    let sensor = match targets.get(&picked.target).and_then(|&h| sensors.get(h)) {
                        Some(sensor) => sensor,
                        None => continue,
                    };

                    if !sensor.is_enabled() {
                        continue;
                    }

                    if let Err(err) = sensor.add_picked_object(controller, picked) {
                        warn!("[SensorSystem] {}", err);
                    }
                }

                let enabled: Vec<Arc<Sensor>> =
                    sensors.values().filter(|v| v.is_enabled()).cloned().collect();
                enabled
            };

            for sensor in enabled {
                handled |= sensor.process(controller, transforms);
            }
        }

        handled
    }

    fn snapshot(&self) -> Vec<Arc<Sensor>> {
        self.sensors.read().unwrap().values().cloned().collect()
    }
}
