//! Object model and property-resolution engine for a virtual audio device
//! exposed to a host audio server.
//!
//! The host enumerates a tree of addressable objects (plugin, devices,
//! streams, controls) and queries named properties on each by numeric
//! selector plus scope and element qualifiers. This crate owns that
//! hierarchy and the dispatch engine that turns a property request into a
//! typed value, keeping the hierarchy consistent while streams are replaced
//! at runtime. Sample I/O, host bootstrap and control-value semantics live
//! elsewhere.

pub mod config;
pub mod object;
pub mod properties;

pub use config::{DeviceConfiguration, PerScope, StreamFormat};
pub use object::{
    AtomicCounter, Control, ControlKind, Device, ObjectId, ObjectKind, ObjectRegistry, Plugin,
    PluginObject, RealtimeCounters, Stream,
};
pub use properties::{
    ChannelLayout, Element, PropertyAddress, PropertyError, PropertyValue, SampleRateRange, Scope,
    Selector, ValueFormat,
};
