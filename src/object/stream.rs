use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock, Weak};

use crate::properties::{
    assure, fourcc, PropertyAddress, PropertyError, PropertyValue, Scope, Selector, ValueFormat,
};

use super::device::Device;
use super::{class, ObjectId, ObjectIdSlot, ObjectKind, PluginObject};

/// Stream terminal types reported to the host.
mod terminal {
    use super::fourcc;

    pub const MICROPHONE: u32 = fourcc(b"mic ");
    pub const SPEAKER: u32 = fourcc(b"spkr");
}

/// One direction-qualified audio stream owned by a device.
///
/// The channel count is fixed at construction; the channel offset into the
/// owning device's aggregate channel space is owned exclusively by the
/// device and rewritten on every stream replacement. The owner reference is
/// non-owning: streams never keep their device alive.
pub struct Stream {
    id_slot: ObjectIdSlot,
    direction: Scope,
    channel_count: u32,
    channel_offset: AtomicU32,
    owner: RwLock<Weak<Device>>,
}

impl Stream {
    /// Create an unregistered stream. `direction` must be `Input` or
    /// `Output`; a stream has no global direction.
    pub fn new(direction: Scope, channel_count: u32) -> Arc<Self> {
        debug_assert!(direction != Scope::Global, "streams are directional");
        Arc::new(Self {
            id_slot: ObjectIdSlot::new(),
            direction,
            channel_count,
            channel_offset: AtomicU32::new(0),
            owner: RwLock::new(Weak::new()),
        })
    }

    pub fn direction(&self) -> Scope {
        self.direction
    }

    pub fn channel_count(&self) -> u32 {
        self.channel_count
    }

    /// Starting channel index within the owning device's channel space.
    pub fn channel_offset(&self) -> u32 {
        self.channel_offset.load(Ordering::Acquire)
    }

    pub(crate) fn set_channel_offset(&self, offset: u32) {
        self.channel_offset.store(offset, Ordering::Release);
    }

    pub fn owning_device(&self) -> Option<Arc<Device>> {
        self.owner.read().unwrap().upgrade()
    }

    pub(crate) fn set_owning_device(&self, device: &Arc<Device>) {
        *self.owner.write().unwrap() = Arc::downgrade(device);
    }
}

impl PluginObject for Stream {
    fn object_id(&self) -> Option<ObjectId> {
        self.id_slot.get()
    }

    fn bind_object_id(&self, id: ObjectId) {
        self.id_slot.bind(id);
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Stream
    }

    fn get_property(
        &self,
        address: PropertyAddress,
        size_hint: Option<u32>,
    ) -> Result<PropertyValue, PropertyError> {
        match address.selector {
            Selector::ObjectBaseClass => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(class::OBJECT))
            }
            Selector::ObjectClass => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(class::STREAM))
            }
            Selector::ObjectOwner => {
                assure(ValueFormat::Integer, size_hint)?;
                let owner_id = self
                    .owning_device()
                    .and_then(|device| device.object_id())
                    .ok_or(PropertyError::UnknownProperty)?;
                Ok(PropertyValue::Integer(owner_id.get()))
            }
            Selector::StreamDirection => {
                assure(ValueFormat::Integer, size_hint)?;
                // Host ABI: 1 = input, 0 = output
                let direction = match self.direction {
                    Scope::Input => 1,
                    _ => 0,
                };
                Ok(PropertyValue::Integer(direction))
            }
            Selector::StreamTerminalType => {
                assure(ValueFormat::Integer, size_hint)?;
                let terminal = match self.direction {
                    Scope::Input => terminal::MICROPHONE,
                    _ => terminal::SPEAKER,
                };
                Ok(PropertyValue::Integer(terminal))
            }
            Selector::StreamStartingChannel => {
                assure(ValueFormat::Integer, size_hint)?;
                // 1-indexed within the owning device's channel space
                Ok(PropertyValue::Integer(self.channel_offset() + 1))
            }
            Selector::Latency => {
                assure(ValueFormat::Integer, size_hint)?;
                let latency = self
                    .owning_device()
                    .map(|device| device.configuration().latency.value_for(self.direction))
                    .unwrap_or(0);
                Ok(PropertyValue::Integer(latency))
            }
            other => {
                log::debug!("stream: unimplemented selector {:?}", other);
                Err(PropertyError::UnknownProperty)
            }
        }
    }

    fn set_property(
        &self,
        address: PropertyAddress,
        _value: PropertyValue,
    ) -> Result<(), PropertyError> {
        log::debug!("stream: rejecting write to {:?}", address.selector);
        Err(PropertyError::UnknownProperty)
    }
}
