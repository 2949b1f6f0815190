extern crate env_logger;
extern crate gvr_sensor;

use std::sync::{Arc, Mutex};

use gvr_sensor::math::prelude::{Aabb3, Point3, Ray, Vector3};
use gvr_sensor::prelude::*;

type Records = Arc<Mutex<Vec<(SceneObjectId, bool)>>>;

fn unit() -> Aabb3<f32> {
    Aabb3::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5))
}

fn forward() -> Ray {
    Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, -1.0)).unwrap()
}

fn aside() -> Ray {
    Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap()
}

fn observe(sensor: &Sensor) -> Records {
    let records = Records::default();
    let mut receiver = EventReceiver::new();

    let r = records.clone();
    receiver.attach(move |v: &SensorEvent| {
        r.lock().unwrap().push((v.target(), v.is_over()));
        true
    });

    sensor.set_owner(Some(Arc::new(Mutex::new(receiver))));
    records
}

fn drain(records: &Records) -> Vec<(SceneObjectId, bool)> {
    let mut v: Vec<_> = records.lock().unwrap().drain(..).collect();
    v.sort();
    v
}

#[test]
fn picking_pass() {
    let _ = env_logger::try_init();

    let system = SensorSystem::default();
    let front = SceneObjectId::from_raw(1, 1);
    let back = SceneObjectId::from_raw(2, 1);
    let unbound = SceneObjectId::from_raw(3, 1);

    let mut transforms = SceneTransforms::new();
    transforms.set(front, Transform::from_position([0.0, 0.0, -2.0]));
    transforms.set(back, Transform::from_position([0.0, 0.0, -5.0]));
    transforms.set(unbound, Transform::from_position([0.0, 0.0, -8.0]));

    let mut picker = BoundsPicker::new();
    picker.add_bounds(front, unit());
    picker.add_bounds(back, unit());
    picker.add_bounds(unbound, unit());

    let handle = system.create_sensor(SensorParams::default());
    system.attach_sensor(front, handle).unwrap();
    system.attach_sensor(back, handle).unwrap();

    let sensor = system.sensor(handle).unwrap();
    let records = observe(&sensor);

    let controller = ControllerId(0);
    system.attach_controller(controller);
    picker.set_ray(controller, forward());

    assert!(system.advance(&picker, &transforms));
    assert_eq!(drain(&records), vec![(front, true), (back, true)]);

    assert!(!system.advance(&picker, &transforms));
    assert!(drain(&records).is_empty());

    picker.set_ray(controller, aside());
    assert!(system.advance(&picker, &transforms));
    assert_eq!(drain(&records), vec![(front, false), (back, false)]);
}

#[test]
fn disabled_sensor() {
    let system = SensorSystem::default();
    let object = SceneObjectId::from_raw(1, 1);

    let mut transforms = SceneTransforms::new();
    transforms.set(object, Transform::from_position([0.0, 0.0, -2.0]));

    let mut picker = BoundsPicker::new();
    picker.add_bounds(object, unit());

    let handle = system.create_sensor(SensorParams {
        enabled: false,
        depth_order: false,
    });
    system.attach_sensor(object, handle).unwrap();

    let sensor = system.sensor(handle).unwrap();
    let records = observe(&sensor);

    let controller = ControllerId(0);
    system.attach_controller(controller);
    picker.set_ray(controller, forward());

    assert!(!system.advance(&picker, &transforms));
    assert!(drain(&records).is_empty());

    sensor.enable();
    assert!(system.advance(&picker, &transforms));
    assert_eq!(drain(&records), vec![(object, true)]);
}

#[test]
fn controller_lifecycle() {
    let system = SensorSystem::default();
    let object = SceneObjectId::from_raw(1, 1);
    let transforms = IdentityTransforms;

    let mut picker = BoundsPicker::new();
    picker.add_bounds(object, Aabb3::new(Point3::new(-1.0, -1.0, -4.0), Point3::new(1.0, 1.0, -2.0)));

    let handle = system.create_sensor(SensorParams::default());
    system.attach_sensor(object, handle).unwrap();
    let records = observe(&system.sensor(handle).unwrap());

    let controller = ControllerId(1);
    picker.set_ray(controller, forward());

    // Not attached yet, nothing is picked.
    assert!(!system.advance(&picker, &transforms));

    system.attach_controller(controller);
    system.advance(&picker, &transforms);
    assert_eq!(drain(&records), vec![(object, true)]);

    system.set_active(controller, false).unwrap();
    system.advance(&picker, &transforms);
    assert_eq!(drain(&records), vec![(object, false), (object, true)]);

    system.set_active(controller, true).unwrap();
    assert!(!system.advance(&picker, &transforms));
    assert!(drain(&records).is_empty());

    assert!(system.detach_controller(controller, &transforms).unwrap());
    assert_eq!(drain(&records), vec![(object, false)]);
    assert!(system.controllers().is_empty());

    match system.set_active(controller, true) {
        Err(Error::ControllerNotAttached(v)) => assert_eq!(v, controller),
        _ => panic!("detached controller should be rejected."),
    }
}

#[test]
fn process_scoped() {
    assert!(!gvr_sensor::valid());
    gvr_sensor::setup(SystemParams::default()).unwrap();
    assert!(gvr_sensor::valid());

    let object = SceneObjectId::from_raw(1, 1);
    let handle = gvr_sensor::create_sensor(SensorParams::default());
    gvr_sensor::attach_sensor(object, handle).unwrap();
    assert!(gvr_sensor::sensor(handle).is_some());

    let records = observe(&gvr_sensor::sensor(handle).unwrap());
    let controller = ControllerId(0);
    gvr_sensor::attach_controller(controller);

    let mut picker = BoundsPicker::new();
    picker.add_bounds(object, Aabb3::new(Point3::new(-1.0, -1.0, -4.0), Point3::new(1.0, 1.0, -2.0)));
    picker.set_ray(controller, forward());

    assert!(gvr_sensor::advance(&picker, &IdentityTransforms));
    assert_eq!(drain(&records), vec![(object, true)]);

    gvr_sensor::set_active(controller, true).unwrap();
    assert!(gvr_sensor::detach_controller(controller, &IdentityTransforms).unwrap());
    assert_eq!(gvr_sensor::detach_sensor(object), Some(handle));
    assert!(!gvr_sensor::delete_sensor(handle, &IdentityTransforms).unwrap());

    gvr_sensor::discard();
    assert!(!gvr_sensor::valid());

    // Reinitialized state starts empty.
    gvr_sensor::setup(SystemParams::default()).unwrap();
    assert!(gvr_sensor::sensor(handle).is_none());
    gvr_sensor::discard();
}
