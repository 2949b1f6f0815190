use crate::controller::ControllerId;
use crate::picker::PickedObject;
use crate::spatial::SceneObjectId;

/// Tells where an event sits in the batch delivered by one dispatch.
///
/// Only meaningful when depth ordering is enabled: the batch is then sorted by
/// distance so listeners could let the closest object claim the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventGroup {
    /// The batch holds this event only.
    Single,
    /// The closest event of a batch with more than one event.
    MultiStart,
    /// Neither the first nor the last event of a batch.
    Multi,
    /// The farthest event of a batch with more than one event.
    MultiStop,
    /// Depth ordering is disabled, the position in batch means nothing.
    GroupDisabled,
}

impl EventGroup {
    /// Returns the group of the `index`th event in a batch of `len` events.
    pub fn at(index: usize, len: usize, depth_order: bool) -> Self {
        debug_assert!(index < len);

        if !depth_order {
            EventGroup::GroupDisabled
        } else if index == 0 {
            if len == 1 {
                EventGroup::Single
            } else {
                EventGroup::MultiStart
            }
        } else if index == len - 1 {
            EventGroup::MultiStop
        } else {
            EventGroup::Multi
        }
    }
}

/// An enter or exit transition between a controller and a scene object.
///
/// Events only live for the duration of one dispatch, listeners receive them
/// by reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorEvent {
    pub(crate) controller: ControllerId,
    pub(crate) picked: PickedObject,
    pub(crate) over: bool,
    pub(crate) active: bool,
    pub(crate) group: EventGroup,
}

impl SensorEvent {
    pub(crate) fn new(
        controller: ControllerId,
        picked: PickedObject,
        over: bool,
        active: bool,
    ) -> Self {
        SensorEvent {
            controller,
            picked,
            over,
            active,
            group: EventGroup::GroupDisabled,
        }
    }

    /// The controller that produced this event.
    #[inline]
    pub fn controller(&self) -> ControllerId {
        self.controller
    }

    #[inline]
    pub fn picked_object(&self) -> &PickedObject {
        &self.picked
    }

    #[inline]
    pub fn target(&self) -> SceneObjectId {
        self.picked.target
    }

    /// Returns true if the controller is over the target, false if it left.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Returns true if the controller was engaged when the event was built.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn group(&self) -> EventGroup {
        self.group
    }
}
