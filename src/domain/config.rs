use std::path::PathBuf;

pub const DEFAULT_ACTIVE_PREFIX: &str = "_active";
pub const DEFAULT_SNAPSHOT_PREFIX: &str = "_snapshots";
pub const DEFAULT_BALANCE_USAGE: u8 = 15;
pub const DEFAULT_GRUB_CONFIG_PATH: &str = "/boot/grub/grub.cfg";

/// Category segments that decide whether a subvolume path is a volume or a snapshot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Prefixes {
    pub active: String,
    pub snapshot: String,
}

impl Default for Prefixes {
    fn default() -> Self {
        Self {
            active: DEFAULT_ACTIVE_PREFIX.to_string(),
            snapshot: DEFAULT_SNAPSHOT_PREFIX.to_string(),
        }
    }
}

impl Prefixes {
    pub fn classify(&self, path: &str) -> Option<EntryKind> {
        if has_category(path, &self.active) {
            Some(EntryKind::Volume)
        } else if has_category(path, &self.snapshot) {
            Some(EntryKind::Snapshot)
        } else {
            None
        }
    }
}

fn has_category(path: &str, category: &str) -> bool {
    path.strip_prefix(category)
        .is_some_and(|rest| rest.starts_with('/'))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    Volume,
    Snapshot,
}

/// Startup configuration. Built once in `main`, read-only afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DashboardConfig {
    pub root: PathBuf,
    pub prefixes: Prefixes,
    pub balance_usage: u8,
    pub grub_config_path: PathBuf,
}

impl DashboardConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            prefixes: Prefixes::default(),
            balance_usage: DEFAULT_BALANCE_USAGE,
            grub_config_path: PathBuf::from(DEFAULT_GRUB_CONFIG_PATH),
        }
    }

    pub fn entry_path(&self, entry: &str) -> PathBuf {
        self.root.join(entry)
    }
}
