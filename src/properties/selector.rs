/// Build a selector code from its four-character ASCII spelling.
pub const fn fourcc(code: &[u8; 4]) -> u32 {
    (code[0] as u32) << 24 | (code[1] as u32) << 16 | (code[2] as u32) << 8 | (code[3] as u32)
}

/// Numeric identifier naming a queryable/settable property.
///
/// The discriminants are the host ABI's four-character codes. The enumeration
/// is closed on purpose: a selector the host defines in a future version maps
/// to `None` in [`Selector::from_raw`] and degrades into the catch-all
/// unknown-property failure instead of crashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Selector {
    // Generic object properties
    ObjectBaseClass = fourcc(b"bcls"),
    ObjectClass = fourcc(b"clas"),
    ObjectOwner = fourcc(b"stdv"),
    ObjectName = fourcc(b"lnam"),
    ObjectModelName = fourcc(b"lmod"),
    ObjectManufacturer = fourcc(b"lmak"),
    ObjectOwnedObjects = fourcc(b"ownd"),
    ObjectElementCategoryName = fourcc(b"lccn"),
    ObjectCustomPropertyInfoList = fourcc(b"cust"),
    ObjectListenerAdded = fourcc(b"lisa"),
    ObjectListenerRemoved = fourcc(b"lisr"),

    // Device properties
    DeviceUid = fourcc(b"uid "),
    DeviceModelUid = fourcc(b"muid"),
    DeviceTransportType = fourcc(b"tran"),
    DeviceRelatedDevices = fourcc(b"akin"),
    DeviceClockDomain = fourcc(b"clkd"),
    DeviceIsAlive = fourcc(b"livn"),
    DeviceIsRunning = fourcc(b"goin"),
    DeviceCanBeDefaultDevice = fourcc(b"dflt"),
    DeviceCanBeDefaultSystemDevice = fourcc(b"sflt"),
    /// Shared between device and stream objects in the host ABI.
    Latency = fourcc(b"ltnc"),
    DeviceStreams = fourcc(b"stm#"),
    DeviceControlList = fourcc(b"ctrl"),
    DeviceSafetyOffset = fourcc(b"saft"),
    DeviceNominalSampleRate = fourcc(b"nsrt"),
    DeviceAvailableNominalSampleRates = fourcc(b"nsr#"),
    DeviceIcon = fourcc(b"icon"),
    DeviceIsHidden = fourcc(b"hidn"),
    DevicePreferredChannelsForStereo = fourcc(b"dch2"),
    DevicePreferredChannelLayout = fourcc(b"srnd"),
    DeviceConfigurationApplication = fourcc(b"capp"),

    // Device clock properties
    DeviceZeroTimeStampPeriod = fourcc(b"ring"),
    DeviceClockAlgorithm = fourcc(b"clok"),
    DeviceClockIsStable = fourcc(b"cstb"),

    // Stream properties
    StreamDirection = fourcc(b"sdir"),
    StreamTerminalType = fourcc(b"term"),
    StreamStartingChannel = fourcc(b"schn"),

    // Plugin properties
    PluginDeviceList = fourcc(b"dev#"),
    PluginTranslateUidToDevice = fourcc(b"uidd"),

    // Control properties
    ControlScope = fourcc(b"cscp"),
    ControlElement = fourcc(b"celm"),
}

impl Selector {
    const ALL: &'static [Selector] = &[
        Selector::ObjectBaseClass,
        Selector::ObjectClass,
        Selector::ObjectOwner,
        Selector::ObjectName,
        Selector::ObjectModelName,
        Selector::ObjectManufacturer,
        Selector::ObjectOwnedObjects,
        Selector::ObjectElementCategoryName,
        Selector::ObjectCustomPropertyInfoList,
        Selector::ObjectListenerAdded,
        Selector::ObjectListenerRemoved,
        Selector::DeviceUid,
        Selector::DeviceModelUid,
        Selector::DeviceTransportType,
        Selector::DeviceRelatedDevices,
        Selector::DeviceClockDomain,
        Selector::DeviceIsAlive,
        Selector::DeviceIsRunning,
        Selector::DeviceCanBeDefaultDevice,
        Selector::DeviceCanBeDefaultSystemDevice,
        Selector::Latency,
        Selector::DeviceStreams,
        Selector::DeviceControlList,
        Selector::DeviceSafetyOffset,
        Selector::DeviceNominalSampleRate,
        Selector::DeviceAvailableNominalSampleRates,
        Selector::DeviceIcon,
        Selector::DeviceIsHidden,
        Selector::DevicePreferredChannelsForStereo,
        Selector::DevicePreferredChannelLayout,
        Selector::DeviceConfigurationApplication,
        Selector::DeviceZeroTimeStampPeriod,
        Selector::DeviceClockAlgorithm,
        Selector::DeviceClockIsStable,
        Selector::StreamDirection,
        Selector::StreamTerminalType,
        Selector::StreamStartingChannel,
        Selector::PluginDeviceList,
        Selector::PluginTranslateUidToDevice,
        Selector::ControlScope,
        Selector::ControlElement,
    ];

    /// Raw four-character code as the host transmits it.
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Map a raw selector code back into the enumeration.
    pub fn from_raw(raw: u32) -> Option<Selector> {
        Selector::ALL.iter().copied().find(|s| s.raw() == raw)
    }
}
