use std::sync::{Arc, RwLock};

use anyhow::Result;

use crate::config::DeviceConfiguration;
use crate::properties::{
    assure, fourcc, limited_to, ChannelLayout, Element, PropertyAddress, PropertyError,
    PropertyValue, SampleRateRange, Scope, Selector, ValueFormat,
};

use super::control::{Control, ControlKind};
use super::counters::RealtimeCounters;
use super::registry::ObjectRegistry;
use super::stream::Stream;
use super::{class, ObjectId, ObjectIdSlot, ObjectKind, PluginObject};

/// Transport type reported to the host: software-defined device.
const TRANSPORT_TYPE_VIRTUAL: u32 = fourcc(b"virt");

/// Clock algorithm code: simple IIR smoothing (host constant).
const CLOCK_ALGORITHM_SIMPLE_IIR: u32 = 1;

/// Stream collection plus the channel count derived from it.
///
/// Both live behind one lock so a property query observes either the pre- or
/// post-replacement state in full, never a mix.
struct StreamSet {
    items: Vec<Arc<Stream>>,
    channel_count: u32,
}

/// A virtual audio device: the aggregate root of the addressable hierarchy
/// and the home of the property dispatch engine.
///
/// Owns its configuration descriptor, a fixed set of controls created at
/// construction, and a replaceable set of streams. The three real-time
/// counters are updated by the I/O path and read here without locking.
pub struct Device {
    id_slot: ObjectIdSlot,
    registry: Arc<ObjectRegistry>,
    configuration: DeviceConfiguration,
    controls: Vec<Arc<Control>>,
    streams: RwLock<StreamSet>,
    counters: RealtimeCounters,
}

impl Device {
    /// Validate the configuration, create and register the device's master
    /// volume controls, and return the device ready for registration.
    pub fn new(
        registry: Arc<ObjectRegistry>,
        configuration: DeviceConfiguration,
    ) -> Result<Arc<Self>> {
        configuration.validate()?;

        let controls = vec![
            Control::new(ControlKind::Volume, Scope::Input, Element::Master),
            Control::new(ControlKind::Volume, Scope::Output, Element::Master),
        ];

        let device = Arc::new_cyclic(|weak| {
            for control in &controls {
                control.set_owner(weak.clone());
            }
            Self {
                id_slot: ObjectIdSlot::new(),
                registry,
                configuration,
                controls,
                streams: RwLock::new(StreamSet {
                    items: Vec::new(),
                    channel_count: 0,
                }),
                counters: RealtimeCounters::new(),
            }
        });

        for control in &device.controls {
            device.registry.add(control.as_ref());
        }

        Ok(device)
    }

    pub fn configuration(&self) -> &DeviceConfiguration {
        &self.configuration
    }

    /// Live real-time counters, for the I/O path to update.
    pub fn counters(&self) -> &RealtimeCounters {
        &self.counters
    }

    pub fn registry(&self) -> &Arc<ObjectRegistry> {
        &self.registry
    }

    /// Sum of all current streams' channel counts. Recomputed on every
    /// stream replacement; this is the single source of truth.
    pub fn channel_count(&self) -> u32 {
        self.streams.read().unwrap().channel_count
    }

    /// Snapshot of the current stream set, in registration order.
    pub fn streams(&self) -> Vec<Arc<Stream>> {
        self.streams.read().unwrap().items.clone()
    }

    pub fn controls(&self) -> &[Arc<Control>] {
        &self.controls
    }

    /// Replace the device's streams as a unit.
    ///
    /// Streams from the previous set that are not carried over are removed
    /// from the registry; fresh streams are registered. Channel offsets, the
    /// aggregate channel count and the owner back-references are rebuilt in
    /// order before the lock drops, so no query observes a half-updated set.
    /// Infallible and idempotent for stream instances already owned.
    pub fn set_streams(self: &Arc<Self>, new_streams: Vec<Arc<Stream>>) {
        let mut set = self.streams.write().unwrap();

        for old in &set.items {
            let carried_over = new_streams.iter().any(|new| Arc::ptr_eq(new, old));
            if carried_over {
                continue;
            }
            if let Some(id) = old.object_id() {
                self.registry.remove(id);
            }
        }

        set.items = new_streams;
        let mut running_total = 0;
        for stream in &set.items {
            if stream.object_id().is_none() {
                self.registry.add(stream.as_ref());
            }
            stream.set_channel_offset(running_total);
            stream.set_owning_device(self);
            running_total += stream.channel_count();
        }
        set.channel_count = running_total;

        log::debug!(
            "device {:?}: streams replaced, {} streams / {} channels",
            self.object_id(),
            set.items.len(),
            set.channel_count
        );
    }

    // Generic object properties: identity and ownership, independent of
    // scope and element.
    fn object_property(
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
                Ok(PropertyValue::Integer(class::DEVICE))
            }
            Selector::ObjectManufacturer => {
                assure(ValueFormat::String, size_hint)?;
                Ok(PropertyValue::String(self.configuration.manufacturer.clone()))
            }
            Selector::ObjectName => {
                assure(ValueFormat::String, size_hint)?;
                Ok(PropertyValue::String(self.configuration.name.clone()))
            }
            Selector::ObjectOwnedObjects => {
                assure(ValueFormat::ObjectIdList, size_hint)?;
                let set = self.streams.read().unwrap();
                let ids: Vec<ObjectId> = set
                    .items
                    .iter()
                    .filter_map(|stream| stream.object_id())
                    .chain(self.controls.iter().filter_map(|control| control.object_id()))
                    .collect();
                let ids = limited_to(ids, ValueFormat::ObjectIdList.byte_size(), size_hint);
                Ok(PropertyValue::ObjectIdList(ids))
            }
            other => {
                log::debug!("device: unimplemented object selector {:?}", other);
                Err(PropertyError::UnknownProperty)
            }
        }
    }

    // Device properties: configuration plus live hierarchy state. Several
    // are scope-qualified and filter by the request's scope.
    fn device_property(
        &self,
        address: PropertyAddress,
        size_hint: Option<u32>,
    ) -> Result<PropertyValue, PropertyError> {
        match address.selector {
            Selector::DeviceUid => {
                assure(ValueFormat::String, size_hint)?;
                Ok(PropertyValue::String(self.configuration.uid.clone()))
            }
            Selector::DeviceModelUid => {
                assure(ValueFormat::String, size_hint)?;
                Ok(PropertyValue::String(self.configuration.model_uid.clone()))
            }
            Selector::DeviceStreams => {
                assure(ValueFormat::ObjectIdList, size_hint)?;
                let set = self.streams.read().unwrap();
                let ids: Vec<ObjectId> = set
                    .items
                    .iter()
                    .filter(|stream| match address.scope {
                        Scope::Global => true,
                        scope => stream.direction() == scope,
                    })
                    .filter_map(|stream| stream.object_id())
                    .collect();
                let ids = limited_to(ids, ValueFormat::ObjectIdList.byte_size(), size_hint);
                Ok(PropertyValue::ObjectIdList(ids))
            }
            Selector::DeviceControlList => {
                assure(ValueFormat::ObjectIdList, size_hint)?;
                let ids: Vec<ObjectId> = self
                    .controls
                    .iter()
                    .filter_map(|control| control.object_id())
                    .collect();
                let ids = limited_to(ids, ValueFormat::ObjectIdList.byte_size(), size_hint);
                Ok(PropertyValue::ObjectIdList(ids))
            }
            Selector::DeviceNominalSampleRate => {
                assure(ValueFormat::Float64, size_hint)?;
                Ok(PropertyValue::Float64(
                    self.configuration.registered_format.sample_rate,
                ))
            }
            Selector::DeviceAvailableNominalSampleRates => {
                assure(ValueFormat::RangeList, size_hint)?;
                let ranges = self
                    .configuration
                    .supported_formats
                    .iter()
                    .map(|format| SampleRateRange::single(format.sample_rate))
                    .collect();
                Ok(PropertyValue::RangeList(ranges))
            }
            Selector::DeviceSafetyOffset => {
                assure(ValueFormat::Integer, size_hint)?;
                let offset = self.configuration.safety_offsets.value_for(address.scope);
                Ok(PropertyValue::Integer(offset))
            }
            Selector::Latency => {
                assure(ValueFormat::Integer, size_hint)?;
                let latency = self.configuration.latency.value_for(address.scope);
                Ok(PropertyValue::Integer(latency))
            }
            Selector::DeviceTransportType => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(TRANSPORT_TYPE_VIRTUAL))
            }
            Selector::DeviceIsHidden => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(self.configuration.hidden as u32))
            }
            Selector::DeviceCanBeDefaultDevice => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(
                    self.configuration.can_be_default_device as u32,
                ))
            }
            Selector::DeviceCanBeDefaultSystemDevice => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(
                    self.configuration.can_handle_system_audio as u32,
                ))
            }
            Selector::DevicePreferredChannelLayout => {
                assure(ValueFormat::ChannelLayout, size_hint)?;
                let channels = self.configuration.registered_format.channels_per_frame;
                Ok(PropertyValue::ChannelLayout(ChannelLayout::linear(channels)))
            }
            Selector::DeviceRelatedDevices => {
                assure(ValueFormat::ObjectIdList, size_hint)?;
                let ids = self.registry.ids_for(ObjectKind::Device);
                let ids = limited_to(ids, ValueFormat::ObjectIdList.byte_size(), size_hint);
                Ok(PropertyValue::ObjectIdList(ids))
            }
            Selector::DeviceIsAlive => {
                assure(ValueFormat::Integer, size_hint)?;
                // A software device has no physical failure mode
                Ok(PropertyValue::Integer(1))
            }
            Selector::DeviceIsRunning => {
                assure(ValueFormat::Integer, size_hint)?;
                let running = self.counters.io_active.value() > 0;
                Ok(PropertyValue::Integer(running as u32))
            }
            Selector::DeviceIcon => {
                assure(ValueFormat::Url, size_hint)?;
                let icon = self
                    .configuration
                    .icon_url
                    .clone()
                    .ok_or(PropertyError::UnknownProperty)?;
                Ok(PropertyValue::Url(icon))
            }
            Selector::DevicePreferredChannelsForStereo => {
                assure(ValueFormat::IntegerList, size_hint)?;
                // First and second channel, 1-indexed, regardless of layout
                let pair = limited_to(vec![1, 2], ValueFormat::IntegerList.byte_size(), size_hint);
                Ok(PropertyValue::IntegerList(pair))
            }
            Selector::DeviceConfigurationApplication => {
                assure(ValueFormat::String, size_hint)?;
                let bundle_id = self
                    .configuration
                    .configuration_app_bundle_id
                    .clone()
                    .ok_or(PropertyError::UnknownProperty)?;
                Ok(PropertyValue::String(bundle_id))
            }
            Selector::DeviceClockDomain => {
                assure(ValueFormat::Integer, size_hint)?;
                // No hardware clock-domain grouping to participate in
                Ok(PropertyValue::Integer(0))
            }
            other => {
                log::debug!("device: unimplemented device selector {:?}", other);
                Err(PropertyError::UnknownProperty)
            }
        }
    }

    // Device clock properties: static descriptors derived from the ring
    // buffer size and two fixed constants.
    fn clock_property(
        &self,
        address: PropertyAddress,
        size_hint: Option<u32>,
    ) -> Result<PropertyValue, PropertyError> {
        match address.selector {
            Selector::DeviceZeroTimeStampPeriod => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(self.configuration.ring_buffer_frames))
            }
            Selector::DeviceClockAlgorithm => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(CLOCK_ALGORITHM_SIMPLE_IIR))
            }
            Selector::DeviceClockIsStable => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(1))
            }
            other => {
                log::debug!("device: unimplemented clock selector {:?}", other);
                Err(PropertyError::UnknownProperty)
            }
        }
    }
}

impl PluginObject for Device {
    fn object_id(&self) -> Option<ObjectId> {
        self.id_slot.get()
    }

    fn bind_object_id(&self, id: ObjectId) {
        self.id_slot.bind(id);
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Device
    }

    fn get_property(
        &self,
        address: PropertyAddress,
        size_hint: Option<u32>,
    ) -> Result<PropertyValue, PropertyError> {
        log::trace!(
            "device {:?}: get {:?} scope={:?} element={:?}",
            self.object_id(),
            address.selector,
            address.scope,
            address.element
        );

        match address.selector {
            Selector::ObjectBaseClass
            | Selector::ObjectClass
            | Selector::ObjectManufacturer
            | Selector::ObjectName
            | Selector::ObjectOwnedObjects => self.object_property(address, size_hint),

            Selector::DeviceUid
            | Selector::DeviceModelUid
            | Selector::DeviceStreams
            | Selector::DeviceControlList
            | Selector::DeviceNominalSampleRate
            | Selector::DeviceAvailableNominalSampleRates
            | Selector::DeviceSafetyOffset
            | Selector::Latency
            | Selector::DeviceTransportType
            | Selector::DeviceIsHidden
            | Selector::DeviceCanBeDefaultDevice
            | Selector::DeviceCanBeDefaultSystemDevice
            | Selector::DeviceConfigurationApplication
            | Selector::DevicePreferredChannelLayout
            | Selector::DeviceClockDomain
            | Selector::DeviceRelatedDevices
            | Selector::DeviceIsAlive
            | Selector::DeviceIsRunning
            | Selector::DeviceIcon
            | Selector::DevicePreferredChannelsForStereo => {
                self.device_property(address, size_hint)
            }

            Selector::DeviceZeroTimeStampPeriod
            | Selector::DeviceClockAlgorithm
            | Selector::DeviceClockIsStable => self.clock_property(address, size_hint),

            // Host-side bookkeeping signals, not meaningful for a single
            // application-facing virtual device. Unimplemented on purpose.
            Selector::ObjectModelName
            | Selector::ObjectElementCategoryName
            | Selector::ObjectCustomPropertyInfoList
            | Selector::ObjectListenerAdded
            | Selector::ObjectListenerRemoved => Err(PropertyError::UnknownProperty),

            other => {
                log::debug!("device: unimplemented selector {:?}", other);
                Err(PropertyError::UnknownProperty)
            }
        }
    }

    fn set_property(
        &self,
        address: PropertyAddress,
        _value: PropertyValue,
    ) -> Result<(), PropertyError> {
        // No selector is writable yet. Extension point, not a defect: when a
        // concrete mutable property is specified it gets its own arm here.
        log::debug!(
            "device {:?}: rejecting write to {:?}",
            self.object_id(),
            address.selector
        );
        Err(PropertyError::UnknownProperty)
    }
}
