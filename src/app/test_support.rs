use crate::app::AppModel;
use crate::domain::{DashboardConfig, EntryListing};
use crate::infra::{Gateway, GatewayError};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn model_with_root(root: &str) -> AppModel {
    AppModel::new(Arc::new(DashboardConfig::new(PathBuf::from(root))))
}

pub fn listing(volumes: &[&str], snapshots: &[&str]) -> EntryListing {
    EntryListing {
        volumes: volumes.iter().map(|v| (*v).to_string()).collect(),
        snapshots: snapshots.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// In-memory gateway that records calls and mutates its listing on create/delete.
#[derive(Debug, Default)]
pub struct FakeGateway {
    pub root: PathBuf,
    pub listing: RefCell<EntryListing>,
    pub failing: RefCell<BTreeSet<&'static str>>,
    pub calls: RefCell<Vec<String>>,
}

impl FakeGateway {
    pub fn with_listing(listing: EntryListing) -> Self {
        Self {
            root: PathBuf::from("/mnt/pool"),
            listing: RefCell::new(listing),
            ..Self::default()
        }
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.borrow_mut().insert(operation);
    }

    pub fn was_called(&self, operation: &str) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|call| call.split(' ').next() == Some(operation))
    }

    fn record(&self, operation: &'static str, detail: String) -> Result<(), GatewayError> {
        let call = if detail.is_empty() {
            operation.to_string()
        } else {
            format!("{operation} {detail}")
        };
        self.calls.borrow_mut().push(call);
        if self.failing.borrow().contains(operation) {
            return Err(GatewayError::Failed {
                program: "btrfs".to_string(),
                status: "exit status: 1".to_string(),
                diagnostic: format!("{operation} refused"),
            });
        }
        Ok(())
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }
}

impl Gateway for FakeGateway {
    fn list_entries(&self, _root: &Path) -> Result<EntryListing, GatewayError> {
        self.record("list", String::new())?;
        Ok(self.listing.borrow().clone())
    }

    fn disk_usage(&self, _root: &Path) -> Result<String, GatewayError> {
        self.record("disk_usage", String::new())?;
        Ok("FS: /dev/sda2  Size: 100G  Used: 40G (40%)  Avail: 60G".to_string())
    }

    fn entry_metadata(&self, entry: &Path) -> Result<String, GatewayError> {
        self.record("metadata", entry.display().to_string())?;
        Ok(format!("Name: {}\n", self.relative(entry)))
    }

    fn create_snapshot(&self, source: &Path, destination: &Path) -> Result<(), GatewayError> {
        self.record(
            "create",
            format!("{} {}", source.display(), destination.display()),
        )?;
        let name = self.relative(destination);
        self.listing.borrow_mut().snapshots.push(name);
        Ok(())
    }

    fn delete_snapshot(&self, entry: &Path) -> Result<(), GatewayError> {
        self.record("delete", entry.display().to_string())?;
        let name = self.relative(entry);
        self.listing
            .borrow_mut()
            .snapshots
            .retain(|snapshot| *snapshot != name);
        Ok(())
    }

    fn rebalance(&self, root: &Path) -> Result<String, GatewayError> {
        self.record("rebalance", root.display().to_string())?;
        Ok("Done, had to relocate 3 out of 12 chunks\n".to_string())
    }

    fn regenerate_boot_config(&self) -> Result<String, GatewayError> {
        self.record("grub", String::new())?;
        Ok("Generating grub configuration file ...\ndone\n".to_string())
    }
}
