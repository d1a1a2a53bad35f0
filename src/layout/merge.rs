//! Region merging.

use super::RegionScan;
use crate::model::{Region, RegionKind};

/// Collapse a classification scan into maximal regions in document order.
///
/// No two adjacent regions share a kind, and flattening the regions'
/// row lists yields every scanned row in ascending order.
pub fn merge_regions(scan: &RegionScan) -> Vec<Region> {
    let mut labeled: Vec<(usize, RegionKind)> = scan
        .tables
        .iter()
        .flat_map(|&(start, end)| (start..end).map(|i| (i, RegionKind::Table)))
        .chain(scan.text_rows.iter().map(|&i| (i, RegionKind::Text)))
        .collect();
    labeled.sort_by_key(|&(i, _)| i);

    let mut regions: Vec<Region> = Vec::new();
    for (row, kind) in labeled {
        match regions.last_mut() {
            Some(region) if region.kind == kind => region.rows.push(row),
            _ => regions.push(Region::new(kind, vec![row])),
        }
    }

    log::debug!("merge_regions: {} regions", regions.len());
    regions
}
