use crate::config::TagName;

/// Value of an auxiliary tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Int(i64),
    String(String),
}

/// One auxiliary tag of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: TagName,
    pub value: TagValue,
}
impl Tag {
    #[must_use]
    pub fn int(name: TagName, value: i64) -> Self {
        Self {
            name,
            value: TagValue::Int(value),
        }
    }

    #[must_use]
    pub fn string(name: TagName, value: String) -> Self {
        Self {
            name,
            value: TagValue::String(value),
        }
    }
}
