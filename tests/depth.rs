extern crate gvr_sensor;
extern crate rand;

use std::sync::{Arc, Mutex};

use rand::Rng;

use gvr_sensor::prelude::*;

#[test]
fn random_depths() {
    let sensor = Sensor::new(SensorParams {
        enabled: true,
        depth_order: true,
    });

    let records = Arc::new(Mutex::new(Vec::new()));
    let mut receiver = EventReceiver::new();
    let r = records.clone();
    receiver.attach(move |v: &SensorEvent| {
        r.lock()
            .unwrap()
            .push((v.picked_object().hit_location.z.abs(), v.group()));
        false
    });
    sensor.set_owner(Some(Arc::new(Mutex::new(receiver))));

    let mut rng = rand::thread_rng();
    let controller = ControllerId(0);

    for round in 0..16u32 {
        let len = rng.gen_range(2, 32);
        for i in 0..len {
            let object = SceneObjectId::from_raw(round * 100 + i, 1);
            let z: f32 = rng.gen_range(-100.0, 100.0);
            sensor
                .add_picked_object(controller, PickedObject::new(object, [0.0, 0.0, z]))
                .unwrap();
        }

        records.lock().unwrap().clear();
        sensor.process(controller, &IdentityTransforms);

        let records = records.lock().unwrap();
        let depths: Vec<f32> = records.iter().map(|v| v.0).collect();
        assert!(depths.windows(2).all(|w| w[0] <= w[1]));

        assert_eq!(records[0].1, EventGroup::MultiStart);
        assert_eq!(records[records.len() - 1].1, EventGroup::MultiStop);
        assert!(records[1..records.len() - 1]
            .iter()
            .all(|v| v.1 == EventGroup::Multi));
    }
}
