//! Record sinks
//!
//! Tiles hand every assembled record to a [`RecordSink`] one at a time, in emission
//! order. Collecting into a `Vec` and rendering unaligned SAM text are provided here;
//! any other container only has to implement the trait.

use std::io::Write;

use auto_impl::auto_impl;

use crate::record::{phred33, ReadRecord, TagValue};
use crate::Result;

/// Destination of assembled records
#[auto_impl(&mut, Box)]
pub trait RecordSink {
    fn write_record(&mut self, record: ReadRecord) -> Result<()>;
}

impl RecordSink for Vec<ReadRecord> {
    fn write_record(&mut self, record: ReadRecord) -> Result<()> {
        self.push(record);
        Ok(())
    }
}

/// Writes records as unaligned SAM text lines
pub struct SamWriter<W: Write> {
    /// Inner writer
    inner: W,

    /// Reusable line buffer
    line: Vec<u8>,

    /// Number of records written
    records_written: usize,
}
impl<W: Write> SamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            line: Vec::new(),
            records_written: 0,
        }
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn fill_line(&mut self, record: &ReadRecord) {
        let mut itoa = itoa::Buffer::new();
        let line = &mut self.line;
        line.clear();

        line.extend_from_slice(record.name().as_bytes());
        line.push(b'\t');
        line.extend_from_slice(itoa.format(record.flags().bits()).as_bytes());
        // no reference, position, mapq, cigar, mate or template length
        line.extend_from_slice(b"\t*\t0\t0\t*\t*\t0\t0\t");
        line.extend_from_slice(record.bases());
        line.push(b'\t');
        line.extend_from_slice(phred33(record.qualities()).as_bytes());

        for tag in record.tags() {
            line.push(b'\t');
            line.extend_from_slice(tag.name.as_bytes());
            match &tag.value {
                TagValue::Int(value) => {
                    line.extend_from_slice(b":i:");
                    line.extend_from_slice(itoa.format(*value).as_bytes());
                }
                TagValue::String(value) => {
                    line.extend_from_slice(b":Z:");
                    line.extend_from_slice(value.as_bytes());
                }
            }
        }
        line.push(b'\n');
    }
}

impl<W: Write> RecordSink for SamWriter<W> {
    fn write_record(&mut self, record: ReadRecord) -> Result<()> {
        self.fill_line(&record);
        self.inner.write_all(&self.line)?;
        self.records_written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::config::TagName;
    use crate::record::{Flags, Tag};
    use anyhow::Result;

    fn record() -> Result<ReadRecord> {
        let mut record = ReadRecord::new(
            "RUN:1:1101:1000:1250".to_string(),
            b"GTN".to_vec(),
            vec![30, 2, 0],
            Flags::PAIRED | Flags::UNMAPPED | Flags::MATE_UNMAPPED | Flags::FIRST_SEGMENT,
        );
        record.push_tag(Tag::int(TagName::new("ci")?, 12));
        record.push_tag(Tag::string(TagName::new("BC")?, "ACGT".to_string()));
        Ok(record)
    }

    #[test]
    fn test_sam_line() -> Result<()> {
        let mut writer = SamWriter::new(Vec::new());
        writer.write_record(record()?)?;
        writer.flush()?;
        assert_eq!(writer.records_written(), 1);

        let text = String::from_utf8(writer.into_inner())?;
        assert_eq!(
            text,
            "RUN:1:1101:1000:1250\t77\t*\t0\t0\t*\t*\t0\t0\tGTN\t?#!\tci:i:12\tBC:Z:ACGT\n"
        );
        Ok(())
    }

    #[test]
    fn test_sink_through_mut_ref() -> Result<()> {
        fn emit<S: RecordSink>(mut sink: S, record: ReadRecord) -> crate::Result<()> {
            sink.write_record(record)
        }
        let mut records: Vec<ReadRecord> = Vec::new();
        emit(&mut records, record()?)?;
        emit(&mut records, record()?)?;
        assert_eq!(records.len(), 2);
        Ok(())
    }
}
