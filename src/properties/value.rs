use super::error::PropertyError;
use crate::object::ObjectId;

/// Channel layout tag for N discrete channels in order (host ABI value).
const LAYOUT_TAG_DISCRETE_IN_ORDER: u32 = 147 << 16;

/// The encoded shape of a property value, independent of its content.
///
/// Each format has a natural encoded size in the host ABI; for list formats
/// the size is per element. Size validation compares against these before any
/// value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Integer,
    IntegerList,
    Float64,
    String,
    Url,
    ObjectIdList,
    RangeList,
    ChannelLayout,
}

impl ValueFormat {
    /// Natural encoded byte size: scalar size for scalar formats, element
    /// size for list formats, minimum size for the channel layout.
    pub const fn byte_size(self) -> u32 {
        match self {
            ValueFormat::Integer | ValueFormat::IntegerList | ValueFormat::ObjectIdList => 4,
            ValueFormat::Float64 => 8,
            // Strings and URLs cross the host boundary as references
            ValueFormat::String | ValueFormat::Url => 8,
            // Two 64-bit bounds per range
            ValueFormat::RangeList => 16,
            // 12-byte header plus one 20-byte channel description
            ValueFormat::ChannelLayout => 32,
        }
    }
}

/// Inclusive sample-rate range, in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRateRange {
    pub minimum: f64,
    pub maximum: f64,
}

impl SampleRateRange {
    /// Range collapsing to a single supported rate.
    pub fn single(rate: f64) -> Self {
        Self {
            minimum: rate,
            maximum: rate,
        }
    }
}

/// One channel slot in a layout descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelDescription {
    /// 1-indexed discrete channel label
    pub label: u32,
}

/// Channel layout descriptor for the preferred-layout property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLayout {
    pub tag: u32,
    pub descriptions: Vec<ChannelDescription>,
}

impl ChannelLayout {
    /// Linear layout: N discrete channels labeled 1..=N.
    pub fn linear(channel_count: u32) -> Self {
        Self {
            tag: LAYOUT_TAG_DISCRETE_IN_ORDER | channel_count,
            descriptions: (0..channel_count)
                .map(|i| ChannelDescription { label: i + 1 })
                .collect(),
        }
    }
}

/// A resolved, self-describing property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Integer(u32),
    IntegerList(Vec<u32>),
    Float64(f64),
    String(String),
    Url(String),
    ObjectIdList(Vec<ObjectId>),
    RangeList(Vec<SampleRateRange>),
    ChannelLayout(ChannelLayout),
}

impl PropertyValue {
    pub fn format(&self) -> ValueFormat {
        match self {
            PropertyValue::Integer(_) => ValueFormat::Integer,
            PropertyValue::IntegerList(_) => ValueFormat::IntegerList,
            PropertyValue::Float64(_) => ValueFormat::Float64,
            PropertyValue::String(_) => ValueFormat::String,
            PropertyValue::Url(_) => ValueFormat::Url,
            PropertyValue::ObjectIdList(_) => ValueFormat::ObjectIdList,
            PropertyValue::RangeList(_) => ValueFormat::RangeList,
            PropertyValue::ChannelLayout(_) => ValueFormat::ChannelLayout,
        }
    }

    /// Actual encoded size of this value, used to answer size probes.
    pub fn byte_len(&self) -> u32 {
        match self {
            PropertyValue::Integer(_) => 4,
            PropertyValue::Float64(_) => 8,
            PropertyValue::String(_) | PropertyValue::Url(_) => 8,
            PropertyValue::IntegerList(items) => 4 * items.len() as u32,
            PropertyValue::ObjectIdList(items) => 4 * items.len() as u32,
            PropertyValue::RangeList(items) => 16 * items.len() as u32,
            PropertyValue::ChannelLayout(layout) => {
                12 + 20 * (layout.descriptions.len().max(1) as u32)
            }
        }
    }
}

/// Fail fast when a caller-supplied size hint cannot hold a value of the
/// given format. A missing hint always passes (the caller did not constrain
/// the size, or is probing for the required size).
pub fn assure(format: ValueFormat, size_hint: Option<u32>) -> Result<(), PropertyError> {
    match size_hint {
        Some(available) if available < format.byte_size() => Err(PropertyError::WouldOverflow {
            needed: format.byte_size(),
            available,
        }),
        _ => Ok(()),
    }
}

/// Truncate a list to the number of whole elements that fit in the hint.
/// Keeps the original order; never reorders for a better fit.
pub fn limited_to<T>(mut items: Vec<T>, element_size: u32, size_hint: Option<u32>) -> Vec<T> {
    if let Some(available) = size_hint {
        items.truncate((available / element_size) as usize);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assure_accepts_missing_hint() {
        assert!(assure(ValueFormat::Float64, None).is_ok());
    }

    #[test]
    fn test_assure_boundary() {
        assert!(assure(ValueFormat::Integer, Some(4)).is_ok());
        assert_eq!(
            assure(ValueFormat::Integer, Some(3)),
            Err(PropertyError::WouldOverflow {
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_limited_to_whole_elements() {
        let ids = vec![1u32, 2, 3, 4];
        assert_eq!(limited_to(ids.clone(), 4, Some(11)), vec![1, 2]);
        assert_eq!(limited_to(ids.clone(), 4, Some(16)), vec![1, 2, 3, 4]);
        assert_eq!(limited_to(ids.clone(), 4, None), vec![1, 2, 3, 4]);
        assert_eq!(limited_to(ids, 4, Some(3)), Vec::<u32>::new());
    }

    #[test]
    fn test_channel_layout_size() {
        let layout = PropertyValue::ChannelLayout(ChannelLayout::linear(2));
        assert_eq!(layout.byte_len(), 12 + 40);
        assert!(layout.byte_len() >= ValueFormat::ChannelLayout.byte_size());
    }
}
