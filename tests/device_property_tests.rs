use std::sync::Arc;

use audioplug::properties::fourcc;
use audioplug::{
    Device, DeviceConfiguration, ObjectRegistry, PerScope, PropertyAddress, PropertyError,
    PropertyValue, PluginObject, Scope, Selector, Stream,
};

fn make_device(registry: &Arc<ObjectRegistry>) -> Arc<Device> {
    make_device_with(registry, DeviceConfiguration::default())
}

fn make_device_with(registry: &Arc<ObjectRegistry>, config: DeviceConfiguration) -> Arc<Device> {
    let device = Device::new(registry.clone(), config).unwrap();
    registry.add(device.as_ref());
    device
}

#[test]
fn test_identity_properties() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::ObjectName), None),
        Ok(PropertyValue::String("Audioplug Device".to_string()))
    );
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceUid), None),
        Ok(PropertyValue::String("com.audioplug.device".to_string()))
    );
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceModelUid), None),
        Ok(PropertyValue::String("com.audioplug.model".to_string()))
    );
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceTransportType), None),
        Ok(PropertyValue::Integer(fourcc(b"virt")))
    );
}

#[test]
fn test_scalar_size_hint_fail_fast() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    // u32-typed property: natural size 4
    let address = PropertyAddress::scoped(Selector::DeviceSafetyOffset, Scope::Input);
    assert!(matches!(
        device.get_property(address, Some(3)),
        Err(PropertyError::WouldOverflow { needed: 4, available: 3 })
    ));
    assert!(device.get_property(address, Some(4)).is_ok());
    assert!(device.get_property(address, None).is_ok());

    // f64-typed property: natural size 8
    let address = PropertyAddress::global(Selector::DeviceNominalSampleRate);
    assert!(device.get_property(address, Some(7)).is_err());
    assert_eq!(
        device.get_property(address, Some(8)),
        Ok(PropertyValue::Float64(48_000.0))
    );

    // string-typed property: host reference size 8
    let address = PropertyAddress::global(Selector::DeviceUid);
    assert!(device.get_property(address, Some(7)).is_err());
    assert!(device.get_property(address, Some(8)).is_ok());
}

#[test]
fn test_owned_objects_order_and_truncation() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    let s0 = Stream::new(Scope::Input, 2);
    let s1 = Stream::new(Scope::Output, 2);
    device.set_streams(vec![s0.clone(), s1.clone()]);

    let controls = device.controls();
    let c0 = controls[0].object_id().unwrap();
    let c1 = controls[1].object_id().unwrap();
    let s0_id = s0.object_id().unwrap();
    let s1_id = s1.object_id().unwrap();

    // Full list: streams first, then controls, registration order
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::ObjectOwnedObjects), None),
        Ok(PropertyValue::ObjectIdList(vec![s0_id, s1_id, c0, c1]))
    );

    // A hint covering exactly three entries truncates, never reorders
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::ObjectOwnedObjects), Some(12)),
        Ok(PropertyValue::ObjectIdList(vec![s0_id, s1_id, c0]))
    );

    // A hint below one element fails the size check outright
    assert!(device
        .get_property(PropertyAddress::global(Selector::ObjectOwnedObjects), Some(3))
        .is_err());
}

#[test]
fn test_stream_list_scope_filtering() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    let input = Stream::new(Scope::Input, 2);
    let output = Stream::new(Scope::Output, 2);
    device.set_streams(vec![input.clone(), output.clone()]);

    assert_eq!(
        device.get_property(
            PropertyAddress::scoped(Selector::DeviceStreams, Scope::Input),
            None
        ),
        Ok(PropertyValue::ObjectIdList(vec![input.object_id().unwrap()]))
    );
    assert_eq!(
        device.get_property(
            PropertyAddress::scoped(Selector::DeviceStreams, Scope::Output),
            None
        ),
        Ok(PropertyValue::ObjectIdList(vec![output.object_id().unwrap()]))
    );
    assert_eq!(
        device.get_property(
            PropertyAddress::scoped(Selector::DeviceStreams, Scope::Global),
            None
        ),
        Ok(PropertyValue::ObjectIdList(vec![
            input.object_id().unwrap(),
            output.object_id().unwrap()
        ]))
    );
}

#[test]
fn test_scope_qualified_scalars() {
    let registry = Arc::new(ObjectRegistry::new());
    let config = DeviceConfiguration {
        safety_offsets: PerScope {
            input: 32,
            output: 64,
        },
        latency: PerScope {
            input: 11,
            output: 22,
        },
        ..Default::default()
    };
    let device = make_device_with(&registry, config);

    assert_eq!(
        device.get_property(
            PropertyAddress::scoped(Selector::DeviceSafetyOffset, Scope::Input),
            None
        ),
        Ok(PropertyValue::Integer(32))
    );
    assert_eq!(
        device.get_property(
            PropertyAddress::scoped(Selector::DeviceSafetyOffset, Scope::Output),
            None
        ),
        Ok(PropertyValue::Integer(64))
    );
    assert_eq!(
        device.get_property(
            PropertyAddress::scoped(Selector::Latency, Scope::Input),
            None
        ),
        Ok(PropertyValue::Integer(11))
    );
}

#[test]
fn test_no_property_is_writable() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);
    device.set_streams(vec![Stream::new(Scope::Input, 2)]);
    let channel_count = device.channel_count();

    for selector in [
        Selector::ObjectName,
        Selector::DeviceUid,
        Selector::DeviceNominalSampleRate,
        Selector::DeviceIsRunning,
        Selector::DeviceStreams,
    ] {
        let result = device.set_property(
            PropertyAddress::global(selector),
            PropertyValue::Integer(1),
        );
        assert_eq!(result, Err(PropertyError::UnknownProperty));
    }

    // Rejected writes never mutate device state
    assert_eq!(device.channel_count(), channel_count);
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::ObjectName), None),
        Ok(PropertyValue::String("Audioplug Device".to_string()))
    );
}

#[test]
fn test_running_flag_tracks_io_counter() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);
    let address = PropertyAddress::global(Selector::DeviceIsRunning);

    assert_eq!(device.get_property(address, None), Ok(PropertyValue::Integer(0)));

    device.counters().io_active.increment();
    assert_eq!(device.get_property(address, None), Ok(PropertyValue::Integer(1)));

    device.counters().io_active.increment();
    assert_eq!(device.get_property(address, None), Ok(PropertyValue::Integer(1)));

    device.counters().io_active.decrement();
    device.counters().io_active.decrement();
    assert_eq!(device.get_property(address, None), Ok(PropertyValue::Integer(0)));
}

#[test]
fn test_static_flags_and_constants() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceIsAlive), None),
        Ok(PropertyValue::Integer(1))
    );
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceClockDomain), None),
        Ok(PropertyValue::Integer(0))
    );
    assert_eq!(
        device.get_property(
            PropertyAddress::global(Selector::DevicePreferredChannelsForStereo),
            None
        ),
        Ok(PropertyValue::IntegerList(vec![1, 2]))
    );
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceIsHidden), None),
        Ok(PropertyValue::Integer(0))
    );
    assert_eq!(
        device.get_property(
            PropertyAddress::global(Selector::DeviceCanBeDefaultDevice),
            None
        ),
        Ok(PropertyValue::Integer(1))
    );
}

#[test]
fn test_clock_properties() {
    let registry = Arc::new(ObjectRegistry::new());
    let config = DeviceConfiguration {
        ring_buffer_frames: 4096,
        ..Default::default()
    };
    let device = make_device_with(&registry, config);

    assert_eq!(
        device.get_property(
            PropertyAddress::global(Selector::DeviceZeroTimeStampPeriod),
            None
        ),
        Ok(PropertyValue::Integer(4096))
    );
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceClockIsStable), None),
        Ok(PropertyValue::Integer(1))
    );
    assert!(matches!(
        device.get_property(PropertyAddress::global(Selector::DeviceClockAlgorithm), None),
        Ok(PropertyValue::Integer(_))
    ));
}

#[test]
fn test_related_devices_spans_registry() {
    let registry = Arc::new(ObjectRegistry::new());
    let first = make_device(&registry);
    let second = make_device(&registry);

    let expected = vec![first.object_id().unwrap(), second.object_id().unwrap()];
    assert_eq!(
        first.get_property(PropertyAddress::global(Selector::DeviceRelatedDevices), None),
        Ok(PropertyValue::ObjectIdList(expected.clone()))
    );
    assert_eq!(
        second.get_property(PropertyAddress::global(Selector::DeviceRelatedDevices), None),
        Ok(PropertyValue::ObjectIdList(expected))
    );
}

#[test]
fn test_absent_optionals_fail_as_unknown() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceIcon), None),
        Err(PropertyError::UnknownProperty)
    );
    assert_eq!(
        device.get_property(
            PropertyAddress::global(Selector::DeviceConfigurationApplication),
            None
        ),
        Err(PropertyError::UnknownProperty)
    );

    let config = DeviceConfiguration {
        icon_url: Some("file:///icons/device.icns".to_string()),
        configuration_app_bundle_id: Some("com.audioplug.settings".to_string()),
        ..Default::default()
    };
    let device = make_device_with(&registry, config);
    assert_eq!(
        device.get_property(PropertyAddress::global(Selector::DeviceIcon), None),
        Ok(PropertyValue::Url("file:///icons/device.icns".to_string()))
    );
    assert_eq!(
        device.get_property(
            PropertyAddress::global(Selector::DeviceConfigurationApplication),
            None
        ),
        Ok(PropertyValue::String("com.audioplug.settings".to_string()))
    );
}

#[test]
fn test_unimplemented_block_rejected() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    for selector in [
        Selector::ObjectModelName,
        Selector::ObjectElementCategoryName,
        Selector::ObjectCustomPropertyInfoList,
        Selector::ObjectListenerAdded,
        Selector::ObjectListenerRemoved,
    ] {
        assert_eq!(
            device.get_property(PropertyAddress::global(selector), None),
            Err(PropertyError::UnknownProperty)
        );
    }
}

#[test]
fn test_foreign_selectors_fall_through() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    // Recognized selectors that belong to other object types
    for selector in [
        Selector::StreamDirection,
        Selector::PluginDeviceList,
        Selector::ControlScope,
    ] {
        assert_eq!(
            device.get_property(PropertyAddress::global(selector), None),
            Err(PropertyError::UnknownProperty)
        );
    }

    // Raw codes the host may define in the future never reach dispatch
    assert_eq!(Selector::from_raw(fourcc(b"zzzz")), None);
}

#[test]
fn test_sample_rates_and_channel_layout() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);

    match device
        .get_property(
            PropertyAddress::global(Selector::DeviceAvailableNominalSampleRates),
            None,
        )
        .unwrap()
    {
        PropertyValue::RangeList(ranges) => {
            assert_eq!(ranges.len(), 1);
            assert_eq!(ranges[0].minimum, 48_000.0);
            assert_eq!(ranges[0].maximum, 48_000.0);
        }
        other => panic!("expected range list, got {:?}", other),
    }

    match device
        .get_property(
            PropertyAddress::global(Selector::DevicePreferredChannelLayout),
            None,
        )
        .unwrap()
    {
        PropertyValue::ChannelLayout(layout) => {
            assert_eq!(layout.descriptions.len(), 2);
            assert_eq!(layout.descriptions[0].label, 1);
            assert_eq!(layout.descriptions[1].label, 2);
        }
        other => panic!("expected channel layout, got {:?}", other),
    }
}

#[test]
fn test_size_probes() {
    let registry = Arc::new(ObjectRegistry::new());
    let device = make_device(&registry);
    device.set_streams(vec![Stream::new(Scope::Input, 2), Stream::new(Scope::Output, 2)]);

    assert_eq!(
        device.required_size(PropertyAddress::global(Selector::DeviceNominalSampleRate)),
        Ok(8)
    );
    // 2 streams + 2 controls, 4 bytes per identifier
    assert_eq!(
        device.required_size(PropertyAddress::global(Selector::ObjectOwnedObjects)),
        Ok(16)
    );
    assert!(device.has_property(PropertyAddress::global(Selector::DeviceUid)));
    assert!(!device.has_property(PropertyAddress::global(Selector::StreamDirection)));
}
