use crate::domain::{EntryKind, EntryListing, Prefixes};

const PATH_MARKER: &str = "path ";

/// Splits `btrfs subvolume list` output into volumes and snapshots.
///
/// Lines look like `ID 257 gen 10 top level 5 path _active/web`; anything
/// outside the two categories is dropped.
pub fn parse_subvolume_list(output: &str, prefixes: &Prefixes) -> EntryListing {
    let mut listing = EntryListing::default();
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some(index) = line.find(PATH_MARKER) else {
            continue;
        };
        let path = line[index + PATH_MARKER.len()..].trim();
        match prefixes.classify(path) {
            Some(EntryKind::Volume) => listing.volumes.push(path.to_string()),
            Some(EntryKind::Snapshot) => listing.snapshots.push(path.to_string()),
            None => {}
        }
    }
    listing
}

/// One-line summary of `df -h <path>` output. `None` when the data row is missing.
pub fn summarize_df_output(output: &str) -> Option<String> {
    let row = output.lines().nth(1)?;
    let fields = row.split_whitespace().collect::<Vec<_>>();
    if fields.len() < 6 {
        return None;
    }
    Some(format!(
        "FS: {}  Size: {}  Used: {} ({})  Avail: {}",
        fields[0], fields[1], fields[2], fields[4], fields[3]
    ))
}
