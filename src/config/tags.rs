use std::fmt;

use crate::error::{ConfigError, Result};

/// Two-character auxiliary tag name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagName([u8; 2]);
impl TagName {
    /// Tag names are exactly two ASCII alphanumeric characters
    pub fn new(name: &str) -> Result<Self> {
        match name.as_bytes() {
            &[a, b] if a.is_ascii_alphanumeric() && b.is_ascii_alphanumeric() => Ok(Self([a, b])),
            _ => Err(ConfigError::InvalidTagName(name.to_string()).into()),
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}
impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0[0] as char, self.0[1] as char)
    }
}

/// Which emitted record of a cluster receives an index read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordTarget {
    #[default]
    First,
    Second,
}

/// Tag names attached to emitted records and the destination of each index read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagConfig {
    barcode: TagName,
    barcode_quality: TagName,
    second_barcode: TagName,
    second_barcode_quality: TagName,
    second_call: TagName,
    cluster_index: TagName,
    index_target: RecordTarget,
    index2_target: RecordTarget,
}
impl Default for TagConfig {
    fn default() -> Self {
        Self {
            barcode: TagName(*b"BC"),
            barcode_quality: TagName(*b"QT"),
            second_barcode: TagName(*b"B2"),
            second_barcode_quality: TagName(*b"Q2"),
            second_call: TagName(*b"E2"),
            cluster_index: TagName(*b"ci"),
            index_target: RecordTarget::First,
            index2_target: RecordTarget::First,
        }
    }
}
impl TagConfig {
    #[must_use]
    pub fn builder() -> TagConfigBuilder {
        TagConfigBuilder::default()
    }
    #[must_use]
    pub fn barcode(&self) -> TagName {
        self.barcode
    }
    #[must_use]
    pub fn barcode_quality(&self) -> TagName {
        self.barcode_quality
    }
    #[must_use]
    pub fn second_barcode(&self) -> TagName {
        self.second_barcode
    }
    #[must_use]
    pub fn second_barcode_quality(&self) -> TagName {
        self.second_barcode_quality
    }
    #[must_use]
    pub fn second_call(&self) -> TagName {
        self.second_call
    }
    #[must_use]
    pub fn cluster_index(&self) -> TagName {
        self.cluster_index
    }
    #[must_use]
    pub fn index_target(&self) -> RecordTarget {
        self.index_target
    }
    #[must_use]
    pub fn index2_target(&self) -> RecordTarget {
        self.index2_target
    }
}

/// Builder for [`TagConfig`]; unset names keep their defaults
#[derive(Debug, Clone, Default)]
pub struct TagConfigBuilder {
    barcode: Option<String>,
    barcode_quality: Option<String>,
    second_barcode: Option<String>,
    second_barcode_quality: Option<String>,
    second_call: Option<String>,
    cluster_index: Option<String>,
    index_target: Option<RecordTarget>,
    index2_target: Option<RecordTarget>,
}
impl TagConfigBuilder {
    #[must_use]
    pub fn barcode(mut self, name: &str) -> Self {
        self.barcode = Some(name.to_string());
        self
    }
    #[must_use]
    pub fn barcode_quality(mut self, name: &str) -> Self {
        self.barcode_quality = Some(name.to_string());
        self
    }
    #[must_use]
    pub fn second_barcode(mut self, name: &str) -> Self {
        self.second_barcode = Some(name.to_string());
        self
    }
    #[must_use]
    pub fn second_barcode_quality(mut self, name: &str) -> Self {
        self.second_barcode_quality = Some(name.to_string());
        self
    }
    #[must_use]
    pub fn second_call(mut self, name: &str) -> Self {
        self.second_call = Some(name.to_string());
        self
    }
    #[must_use]
    pub fn cluster_index(mut self, name: &str) -> Self {
        self.cluster_index = Some(name.to_string());
        self
    }
    #[must_use]
    pub fn index_target(mut self, target: RecordTarget) -> Self {
        self.index_target = Some(target);
        self
    }
    #[must_use]
    pub fn index2_target(mut self, target: RecordTarget) -> Self {
        self.index2_target = Some(target);
        self
    }
    pub fn build(self) -> Result<TagConfig> {
        fn name_or(name: Option<String>, default: TagName) -> Result<TagName> {
            name.as_deref().map_or(Ok(default), TagName::new)
        }
        let defaults = TagConfig::default();
        Ok(TagConfig {
            barcode: name_or(self.barcode, defaults.barcode)?,
            barcode_quality: name_or(self.barcode_quality, defaults.barcode_quality)?,
            second_barcode: name_or(self.second_barcode, defaults.second_barcode)?,
            second_barcode_quality: name_or(
                self.second_barcode_quality,
                defaults.second_barcode_quality,
            )?,
            second_call: name_or(self.second_call, defaults.second_call)?,
            cluster_index: name_or(self.cluster_index, defaults.cluster_index)?,
            index_target: self.index_target.unwrap_or_default(),
            index2_target: self.index2_target.unwrap_or_default(),
        })
    }
}
