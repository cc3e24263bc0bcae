pub mod control;
pub mod counters;
pub mod device;
pub mod plugin;
pub mod registry;
pub mod stream;

pub use control::{Control, ControlKind};
pub use counters::{AtomicCounter, RealtimeCounters};
pub use device::Device;
pub use plugin::Plugin;
pub use registry::ObjectRegistry;
pub use stream::Stream;

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::properties::{PropertyAddress, PropertyError, PropertyValue};

/// Class identifiers reported through the base-class/class properties.
pub mod class {
    use crate::properties::fourcc;

    pub const OBJECT: u32 = fourcc(b"aobj");
    pub const PLUGIN: u32 = fourcc(b"aplg");
    pub const DEVICE: u32 = fourcc(b"adev");
    pub const STREAM: u32 = fourcc(b"astr");
    pub const VOLUME_CONTROL: u32 = fourcc(b"vlme");
}

/// Identifier of one addressable object, assigned by the registry.
///
/// Zero is never allocated; it serves as the unassigned sentinel inside
/// objects' atomic identifier slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub(crate) fn from_raw(raw: u32) -> Option<ObjectId> {
        if raw == 0 {
            None
        } else {
            Some(ObjectId(raw))
        }
    }

    /// Registry-internal constructor; raw is a freshly allocated nonzero id.
    pub(crate) fn allocated(raw: u32) -> ObjectId {
        debug_assert!(raw != 0);
        ObjectId(raw)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind tag the registry indexes objects by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Plugin,
    Device,
    Stream,
    Control,
}

/// Lock-free storage for an object's registry-assigned identifier.
///
/// Bound at most once; queries on an unregistered object simply see `None`.
#[derive(Debug, Default)]
pub struct ObjectIdSlot(AtomicU32);

impl ObjectIdSlot {
    pub fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    pub fn get(&self) -> Option<ObjectId> {
        ObjectId::from_raw(self.0.load(Ordering::Acquire))
    }

    pub fn bind(&self, id: ObjectId) {
        self.0.store(id.get(), Ordering::Release);
    }
}

/// An addressable object in the plugin hierarchy.
///
/// Everything the host can enumerate implements this: the plugin itself,
/// devices, streams and controls. Property resolution is synchronous and
/// bounded-time; it may run adjacent to a real-time thread.
pub trait PluginObject: Send + Sync {
    /// Registry-assigned identifier; `None` before registration.
    fn object_id(&self) -> Option<ObjectId>;

    /// Called once by the registry when the object is added.
    fn bind_object_id(&self, id: ObjectId);

    fn kind(&self) -> ObjectKind;

    /// Resolve a property read. Fails with a single collapsed error kind
    /// when the selector is unknown, unimplemented here, has no value for
    /// this object, or the size hint is too small.
    fn get_property(
        &self,
        address: PropertyAddress,
        size_hint: Option<u32>,
    ) -> Result<PropertyValue, PropertyError>;

    /// Resolve a property write. No selector is writable anywhere in the
    /// hierarchy today; this is a deliberate extension point.
    fn set_property(
        &self,
        address: PropertyAddress,
        value: PropertyValue,
    ) -> Result<(), PropertyError>;

    /// Whether a read of this address would produce a value.
    fn has_property(&self, address: PropertyAddress) -> bool {
        self.get_property(address, None).is_ok()
    }

    /// Encoded size of the value this address resolves to, for hosts
    /// probing buffer requirements before the actual read.
    fn required_size(&self, address: PropertyAddress) -> Result<u32, PropertyError> {
        Ok(self.get_property(address, None)?.byte_len())
    }
}
