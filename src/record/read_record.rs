use crate::config::TagName;
use crate::reader::Position;

use super::{Flags, Tag, TagValue};

/// Offset added to raw Phred scores when rendered as text
pub const PHRED_OFFSET: u8 = 33;

/// Renders raw Phred scores as a Phred+33 string
#[must_use]
pub fn phred33(qualities: &[u8]) -> String {
    qualities
        .iter()
        .map(|&q| char::from(q.saturating_add(PHRED_OFFSET)))
        .collect()
}

/// Builds the read name `{run_id}:{lane}:{tile}:{x}:{y}`
///
/// The leading run id and its separator are omitted when the id is empty.
#[must_use]
pub fn read_name(run_id: &str, lane: u32, tile: u32, position: Position) -> String {
    if run_id.is_empty() {
        format!("{lane}:{tile}:{position}")
    } else {
        format!("{run_id}:{lane}:{tile}:{position}")
    }
}

/// One assembled, unaligned read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadRecord {
    name: String,
    bases: Vec<u8>,
    /// Raw Phred scores, one per base
    qualities: Vec<u8>,
    flags: Flags,
    tags: Vec<Tag>,
}
impl ReadRecord {
    #[must_use]
    pub fn new(name: String, bases: Vec<u8>, qualities: Vec<u8>, flags: Flags) -> Self {
        debug_assert_eq!(bases.len(), qualities.len());
        Self {
            name,
            bases,
            qualities,
            flags,
            tags: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[u8] {
        &self.bases
    }

    pub fn qualities(&self) -> &[u8] {
        &self.qualities
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn push_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Returns the value of the first tag called `name`
    pub fn tag(&self, name: TagName) -> Option<&TagValue> {
        self.tags
            .iter()
            .find(|tag| tag.name == name)
            .map(|tag| &tag.value)
    }

    /// Convenience accessor for string tags
    pub fn tag_str(&self, name: TagName) -> Option<&str> {
        match self.tag(name) {
            Some(TagValue::String(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_paired(&self) -> bool {
        self.flags.contains(Flags::PAIRED)
    }

    pub fn is_first(&self) -> bool {
        self.flags.contains(Flags::FIRST_SEGMENT)
    }

    pub fn is_last(&self) -> bool {
        self.flags.contains(Flags::LAST_SEGMENT)
    }

    pub fn is_qc_fail(&self) -> bool {
        self.flags.contains(Flags::QC_FAIL)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_read_name() {
        let position = Position::new(1234, 5678);
        assert_eq!(
            read_name("HS11_6000", 3, 1101, position),
            "HS11_6000:3:1101:1234:5678"
        );
        assert_eq!(read_name("", 3, 1101, position), "3:1101:1234:5678");
    }

    #[test]
    fn test_phred33() {
        assert_eq!(phred33(&[0, 30, 40]), "!?I");
    }

    #[test]
    fn test_tags() -> Result<()> {
        let mut record = ReadRecord::new(
            "1:1:1000:1000".to_string(),
            b"AC".to_vec(),
            vec![30, 20],
            Flags::UNMAPPED,
        );
        let ci = TagName::new("ci")?;
        let bc = TagName::new("BC")?;
        record.push_tag(Tag::int(ci, 7));
        record.push_tag(Tag::string(bc, "ACGT".to_string()));
        assert_eq!(record.tag(ci), Some(&TagValue::Int(7)));
        assert_eq!(record.tag_str(bc), Some("ACGT"));
        assert_eq!(record.tag_str(ci), None);
        assert_eq!(record.len(), 2);
        assert!(!record.is_paired());
        Ok(())
    }
}
