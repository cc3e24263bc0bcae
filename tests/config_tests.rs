use audioplug::{DeviceConfiguration, PerScope, StreamFormat};

#[test]
fn test_configuration_json_round_trip() {
    let config = DeviceConfiguration {
        uid: "com.example.loopback".to_string(),
        name: "Loopback".to_string(),
        supported_formats: vec![
            StreamFormat {
                sample_rate: 44_100.0,
                channels_per_frame: 2,
                bits_per_channel: 32,
            },
            StreamFormat::default(),
        ],
        safety_offsets: PerScope {
            input: 128,
            output: 256,
        },
        icon_url: Some("file:///icons/loopback.icns".to_string()),
        ..Default::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let decoded: DeviceConfiguration = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, config);
    assert!(decoded.validate().is_ok());
}

#[test]
fn test_partial_json_is_rejected_without_required_fields() {
    let result = serde_json::from_str::<DeviceConfiguration>("{\"uid\":\"x\"}");
    assert!(result.is_err());
}
