use super::cluster::{Cluster, SegmentReads};
use crate::config::{RecordTarget, Segment, TagName, TileConfig};
use crate::record::{phred33, read_name, Flags, ReadRecord, Tag};

fn index_tags(
    reads: Option<&SegmentReads>,
    target: RecordTarget,
    bases_tag: TagName,
    quality_tag: TagName,
) -> Option<(RecordTarget, Tag, Tag)> {
    let reads = reads?;
    let bases = String::from_utf8_lossy(&reads.bases).into_owned();
    Some((
        target,
        Tag::string(bases_tag, bases),
        Tag::string(quality_tag, phred33(&reads.qualities)),
    ))
}

/// Builds the records of one decoded cluster
///
/// One record for read1 and, on paired runs, one for read2, in that order. Index
/// reads are attached as tag pairs to the record their target designates.
#[must_use]
pub fn assemble_records(cluster: &Cluster, config: &TileConfig, tile: u32) -> Vec<ReadRecord> {
    let tags = &config.tags;
    let paired = config.structure.is_paired();
    let name = read_name(&config.run_id, config.lane, tile, cluster.position);

    let barcodes = [
        index_tags(
            cluster.segment(Segment::ReadIndex),
            tags.index_target(),
            tags.barcode(),
            tags.barcode_quality(),
        ),
        index_tags(
            cluster.segment(Segment::ReadIndex2),
            tags.index2_target(),
            tags.second_barcode(),
            tags.second_barcode_quality(),
        ),
    ];

    let mut records = Vec::with_capacity(2);
    for (segment, target) in [
        (Segment::Read1, RecordTarget::First),
        (Segment::Read2, RecordTarget::Second),
    ] {
        let Some(reads) = cluster.segment(segment) else {
            continue;
        };

        let mut flags = Flags::UNMAPPED;
        if paired {
            flags |= Flags::PAIRED | Flags::MATE_UNMAPPED;
            flags |= match target {
                RecordTarget::First => Flags::FIRST_SEGMENT,
                RecordTarget::Second => Flags::LAST_SEGMENT,
            };
        }
        flags.set(Flags::QC_FAIL, !cluster.passed_filter);

        let mut record = ReadRecord::new(
            name.clone(),
            reads.bases.clone(),
            reads.qualities.clone(),
            flags,
        );
        record.push_tag(Tag::int(tags.cluster_index(), cluster.index as i64));
        for (barcode_target, bases, qualities) in barcodes.iter().flatten() {
            if *barcode_target == target {
                record.push_tag(bases.clone());
                record.push_tag(qualities.clone());
            }
        }
        if config.include_second_call && !reads.second_calls.is_empty() {
            let calls = String::from_utf8_lossy(&reads.second_calls).into_owned();
            record.push_tag(Tag::string(tags.second_call(), calls));
        }
        records.push(record);
    }
    records
}
