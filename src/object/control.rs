use std::sync::{Arc, RwLock, Weak};

use crate::properties::{
    assure, Element, PropertyAddress, PropertyError, PropertyValue, Scope, Selector, ValueFormat,
};

use super::device::Device;
use super::{class, ObjectId, ObjectIdSlot, ObjectKind, PluginObject};

/// Classification of a control object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Volume,
}

/// One controllable parameter bound to a scope and element.
///
/// Controls are created once during device construction and live as long as
/// the device. Value semantics (curves, setting) belong to a different
/// subsystem; here a control is an addressable identity plus classification.
pub struct Control {
    id_slot: ObjectIdSlot,
    kind: ControlKind,
    scope: Scope,
    element: Element,
    owner: RwLock<Weak<Device>>,
}

impl Control {
    pub fn new(kind: ControlKind, scope: Scope, element: Element) -> Arc<Self> {
        Arc::new(Self {
            id_slot: ObjectIdSlot::new(),
            kind,
            scope,
            element,
            owner: RwLock::new(Weak::new()),
        })
    }

    pub fn control_kind(&self) -> ControlKind {
        self.kind
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn owning_device(&self) -> Option<Arc<Device>> {
        self.owner.read().unwrap().upgrade()
    }

    pub(crate) fn set_owner(&self, device: Weak<Device>) {
        *self.owner.write().unwrap() = device;
    }
}

impl PluginObject for Control {
    fn object_id(&self) -> Option<ObjectId> {
        self.id_slot.get()
    }

    fn bind_object_id(&self, id: ObjectId) {
        self.id_slot.bind(id);
    }

    fn kind(&self) -> ObjectKind {
        ObjectKind::Control
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
                let class_id = match self.kind {
                    ControlKind::Volume => class::VOLUME_CONTROL,
                };
                Ok(PropertyValue::Integer(class_id))
            }
            Selector::ObjectOwner => {
                assure(ValueFormat::Integer, size_hint)?;
                let owner_id = self
                    .owning_device()
                    .and_then(|device| device.object_id())
                    .ok_or(PropertyError::UnknownProperty)?;
                Ok(PropertyValue::Integer(owner_id.get()))
            }
            Selector::ControlScope => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(self.scope.raw()))
            }
            Selector::ControlElement => {
                assure(ValueFormat::Integer, size_hint)?;
                Ok(PropertyValue::Integer(self.element.raw()))
            }
            other => {
                log::debug!("control: unimplemented selector {:?}", other);
                Err(PropertyError::UnknownProperty)
            }
        }
    }

    fn set_property(
        &self,
        address: PropertyAddress,
        _value: PropertyValue,
    ) -> Result<(), PropertyError> {
        log::debug!("control: rejecting write to {:?}", address.selector);
        Err(PropertyError::UnknownProperty)
    }
}
