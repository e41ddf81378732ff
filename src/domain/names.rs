use time::OffsetDateTime;

/// Base name shared by a volume and its snapshots.
///
/// `_snapshots/web-20240101-120000` and `_active/web-prod` both map to `web`.
/// Paths without a non-empty segment after the category are ungroupable.
pub fn group_key(path: &str) -> Option<&str> {
    let mut segments = path.split('/');
    let _category = segments.next()?;
    let base = segments.next()?;
    let key = base.split_once('-').map_or(base, |(head, _)| head);
    if key.is_empty() { None } else { Some(key) }
}

/// Sortable second-resolution stamp, `YYYYMMDD-HHMMSS`.
pub fn snapshot_timestamp(at: OffsetDateTime) -> String {
    format!(
        "{:04}{:02}{:02}-{:02}{:02}{:02}",
        at.year(),
        u8::from(at.month()),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    )
}

pub fn snapshot_name(snapshot_prefix: &str, key: &str, at: OffsetDateTime) -> String {
    format!("{snapshot_prefix}/{key}-{}", snapshot_timestamp(at))
}

/// Snapshots whose group key matches `key`, listing order kept.
pub fn snapshots_for_key(snapshots: &[String], key: Option<&str>) -> Vec<String> {
    let Some(key) = key else {
        return Vec::new();
    };
    snapshots
        .iter()
        .filter(|snapshot| group_key(snapshot) == Some(key))
        .cloned()
        .collect()
}
