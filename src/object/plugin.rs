use std::sync::{Arc, RwLock};

use crate::properties::{
    assure, limited_to, PropertyAddress, PropertyError, PropertyValue, Selector, ValueFormat,
};

use super::device::Device;
use super::registry::ObjectRegistry;
use super::{class, ObjectId, ObjectIdSlot, ObjectKind, PluginObject};

/// The root of the addressable hierarchy: the plugin object the host talks
/// to first, owning the devices it exposes.
pub struct Plugin {
    id_slot: ObjectIdSlot,
    registry: Arc<ObjectRegistry>,
    manufacturer: String,
    devices: RwLock<Vec<Arc<Device>>>,
}

impl Plugin {
    pub fn new(registry: Arc<ObjectRegistry>, manufacturer: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id_slot: ObjectIdSlot::new(),
            registry,
            manufacturer: manufacturer.into(),
            devices: RwLock::new(Vec::new()),
        })
    }

    /// Attach a device to the plugin, registering it if it has no
    /// identifier yet.
    pub fn add_device(&self, device: Arc<Device>) {
        if device.object_id().is_none() {
            self.registry.add(device.as_ref());
        }
        self.devices.write().unwrap().push(device);
    }

    pub fn devices(&self) -> Vec<Arc<Device>> {
        self.devices.read().unwrap().clone()
    }

    /// UID-to-device translation the host performs via a qualified query.
    pub fn device_with_uid(&self, uid: &str) -> Option<Arc<Device>> {
        self.devices
            .read()
            .unwrap()
            .iter()
            .find(|device| device.configuration().uid == uid)
            .cloned()
    }
}

impl PluginObject for Plugin {
    fn object_id(&self) -> Option<ObjectId> {
        self.id_slot.get()
    }

    fn bind_object_id(&self, id: ObjectId) {
        self.id_slot.bind(id);
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Plugin
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
                Ok(PropertyValue::Integer(class::PLUGIN))
            }
            Selector::ObjectManufacturer => {
                assure(ValueFormat::String, size_hint)?;
                Ok(PropertyValue::String(self.manufacturer.clone()))
            }
            Selector::ObjectOwnedObjects | Selector::PluginDeviceList => {
                assure(ValueFormat::ObjectIdList, size_hint)?;
                let ids: Vec<ObjectId> = self
                    .devices
                    .read()
                    .unwrap()
                    .iter()
                    .filter_map(|device| device.object_id())
                    .collect();
                let ids = limited_to(ids, ValueFormat::ObjectIdList.byte_size(), size_hint);
                Ok(PropertyValue::ObjectIdList(ids))
            }
            other => {
                log::debug!("plugin: unimplemented selector {:?}", other);
                Err(PropertyError::UnknownProperty)
            }
        }
    }

    fn set_property(
        &self,
        address: PropertyAddress,
        _value: PropertyValue,
    ) -> Result<(), PropertyError> {
        log::debug!("plugin: rejecting write to {:?}", address.selector);
        Err(PropertyError::UnknownProperty)
    }
}
