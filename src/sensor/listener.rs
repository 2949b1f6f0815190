use crate::utils::object_pool::ObjectPool;

use super::event::SensorEvent;

impl_handle!(ListenerHandle);

/// Receives the enter and exit events of a sensor.
pub trait SensorEvents {
    /// Called once per event, in delivery order. Returns true if the event has
    /// been consumed.
    fn on_sensor_event(&mut self, event: &SensorEvent) -> bool;
}

impl<F> SensorEvents for F
where
    F: FnMut(&SensorEvent) -> bool,
{
    fn on_sensor_event(&mut self, event: &SensorEvent) -> bool {
        (self)(event)
    }
}

/// The owner of a sensor, fans events out to the attached listeners.
#[derive(Default)]
pub struct EventReceiver {
    listeners: ObjectPool<ListenerHandle, Box<dyn SensorEvents + Send>>,
}

impl EventReceiver {
    pub fn new() -> Self {
        EventReceiver {
            listeners: ObjectPool::new(),
        }
    }

    /// Attaches a listener, it receives events until detached.
    pub fn attach<T>(&mut self, listener: T) -> ListenerHandle
    where
        T: SensorEvents + Send + 'static,
    {
        self.listeners.create(Box::new(listener))
    }

    /// Detaches a listener. Returns false if the handle is not alive.
    pub fn detach(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.free(handle).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `event` to every listener. Returns true if any of them
    /// consumed it.
    pub fn send(&mut self, event: &SensorEvent) -> bool {
        let mut handled = false;
        for v in self.listeners.values_mut() {
            handled |= v.on_sensor_event(event);
        }

        handled
    }
}

#[cfg(test)]
mod test {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::controller::ControllerId;
    use crate::picker::PickedObject;
    use crate::spatial::SceneObjectId;

    #[test]
    fn fan_out() {
        let picked = PickedObject::new(SceneObjectId::from_raw(1, 1), [0.0, 0.0, 0.0]);
        let event = SensorEvent::new(ControllerId(2), picked, true, true);

        let counter = Arc::new(Mutex::new(0));
        let mut receiver = EventReceiver::new();
        assert!(!receiver.send(&event));

        let c = counter.clone();
        let h1 = receiver.attach(move |_: &SensorEvent| {
            *c.lock().unwrap() += 1;
            false
        });

        let c = counter.clone();
        receiver.attach(move |v: &SensorEvent| {
            *c.lock().unwrap() += 1;
            v.is_over()
        });

        assert_eq!(receiver.len(), 2);
        assert!(receiver.send(&event));
        assert_eq!(*counter.lock().unwrap(), 2);

        assert!(receiver.detach(h1));
        assert!(!receiver.detach(h1));
        assert!(receiver.send(&event));
        assert_eq!(*counter.lock().unwrap(), 3);
    }
}
