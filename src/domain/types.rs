/// Subvolume paths returned by one listing, split by category, in tool order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EntryListing {
    pub volumes: Vec<String>,
    pub snapshots: Vec<String>,
}

/// The two navigable panes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pane {
    Volumes,
    Snapshots,
}

impl Pane {
    pub const NAVIGABLE: [Pane; 2] = [Pane::Volumes, Pane::Snapshots];

    fn position(self) -> usize {
        match self {
            Self::Volumes => 0,
            Self::Snapshots => 1,
        }
    }

    pub fn next(self) -> Self {
        let count = Self::NAVIGABLE.len();
        Self::NAVIGABLE[(self.position() + 1) % count]
    }

    pub fn prev(self) -> Self {
        let count = Self::NAVIGABLE.len();
        Self::NAVIGABLE[(self.position() + count - 1) % count]
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Volumes => "Subvolumes",
            Self::Snapshots => "Snapshots",
        }
    }
}
