pub mod error;
pub mod selector;
pub mod value;

pub use error::{PropertyError, HOST_STATUS_UNKNOWN_PROPERTY};
pub use selector::{fourcc, Selector};
pub use value::{
    assure, limited_to, ChannelDescription, ChannelLayout, PropertyValue, SampleRateRange,
    ValueFormat,
};

use serde::{Deserialize, Serialize};

/// Direction qualifier for a property request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Global,
    Input,
    Output,
}

impl Scope {
    pub const fn raw(self) -> u32 {
        match self {
            Scope::Global => fourcc(b"glob"),
            Scope::Input => fourcc(b"inpt"),
            Scope::Output => fourcc(b"outp"),
        }
    }

    pub fn from_raw(raw: u32) -> Option<Scope> {
        [Scope::Global, Scope::Input, Scope::Output]
            .into_iter()
            .find(|s| s.raw() == raw)
    }
}

/// Element qualifier: the whole device, or one specific channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Master,
    Channel(u32),
}

impl Element {
    pub const fn raw(self) -> u32 {
        match self {
            Element::Master => 0,
            Element::Channel(channel) => channel,
        }
    }

    pub fn from_raw(raw: u32) -> Element {
        match raw {
            0 => Element::Master,
            channel => Element::Channel(channel),
        }
    }
}

/// Full address of one property request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyAddress {
    pub selector: Selector,
    pub scope: Scope,
    pub element: Element,
}

impl PropertyAddress {
    pub fn new(selector: Selector, scope: Scope, element: Element) -> Self {
        Self {
            selector,
            scope,
            element,
        }
    }

    /// Global scope, master element — the common case for scalar queries.
    pub fn global(selector: Selector) -> Self {
        Self::new(selector, Scope::Global, Element::Master)
    }

    /// Master element with an explicit scope.
    pub fn scoped(selector: Selector, scope: Scope) -> Self {
        Self::new(selector, scope, Element::Master)
    }
}
