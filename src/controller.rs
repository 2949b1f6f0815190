use std::fmt;

/// Identifies an input device producing a 3D ray or cursor, eg. the gaze
/// cursor, a touchpad or a hand-held controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ControllerId(pub u32);

impl From<u32> for ControllerId {
    fn from(id: u32) -> Self {
        ControllerId(id)
    }
}

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Controller ({})", self.0)
    }
}
