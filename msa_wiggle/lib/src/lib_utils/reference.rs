// pick the reference record by id prefix and keep the rest as companions

use log::{debug, info, warn};
use super::alignment::{Alignment, SequenceRecord};

pub struct ReferenceSplit {
    pub reference: SequenceRecord,
    // every other record, in file order
    pub companions: Vec<SequenceRecord>,
}

impl ReferenceSplit {
    // reference first, then companions
    pub fn records(&self) -> impl Iterator<Item = &SequenceRecord> {
        std::iter::once(&self.reference).chain(self.companions.iter())
    }

    pub fn record_count(&self) -> usize {
        self.companions.len() + 1
    }
}

// first record whose id starts with seq_id, None when nothing matches
pub fn select_reference(alignment: Alignment, seq_id: &str) -> Option<ReferenceSplit> {
    let mut records = alignment.records;
    let matches = records.iter().filter(|r| r.id.starts_with(seq_id)).count();
    let position = match records.iter().position(|r| r.id.starts_with(seq_id)) {
        Some(position) => position,
        None => {
            info!("No record id starts with {:?}", seq_id);
            return None;
        }
    };
    if matches > 1 {
        warn!("{} record ids start with {:?}, using the first in file order", matches, seq_id);
    }
    let reference = records.remove(position);
    debug!("Reference {} found at record {}", reference.id, position + 1);
    Some(ReferenceSplit {
        reference,
        companions: records,
    })
}
