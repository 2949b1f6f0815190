use crate::controller::ControllerId;
use crate::spatial::SceneObjectId;
use crate::system::SensorHandle;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} is invalid.", _0)]
    SensorHandleInvalid(SensorHandle),
    #[fail(display = "{} is not attached.", _0)]
    ControllerNotAttached(ControllerId),
    #[fail(display = "Hit location on {} is not finite.", _0)]
    NonFiniteHitLocation(SceneObjectId),
    #[fail(display = "Malformed parameters: {}.", _0)]
    Params(String),
    #[fail(display = "{}", _0)]
    Json(#[cause] serde_json::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
