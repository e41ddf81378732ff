use crate::app::{AppCommand, AppModel, PaneText, PendingAction};
use crate::domain::Pane;
use crate::infra::Gateway;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs a command on the event thread. Gateway calls block until the tool exits.
pub fn run_command(model: &mut AppModel, gateway: &dyn Gateway, command: AppCommand) -> Flow {
    match command {
        AppCommand::None => {}
        AppCommand::Quit => return Flow::Quit,
        AppCommand::Refresh => refresh(model, gateway),
        AppCommand::LoadSnapshotInfo => load_snapshot_info(model, gateway),
        AppCommand::Execute(action) => execute(model, gateway, action),
    }
    Flow::Continue
}

/// Re-reads every pane. A failed sub-fetch only affects its own pane.
pub fn refresh(model: &mut AppModel, gateway: &dyn Gateway) {
    let root = model.config.root.clone();

    match gateway.list_entries(&root) {
        Ok(listing) => {
            model.list_error = None;
            model.apply_listing(listing);
        }
        Err(error) => {
            tracing::warn!(%error, "listing subvolumes failed");
            model.list_error = Some(format!("Error: {error}"));
        }
    }

    model.disk_usage = match gateway.disk_usage(&root) {
        Ok(summary) => PaneText::Text(summary),
        Err(error) => {
            tracing::warn!(%error, "disk usage failed");
            PaneText::Error(format!("Error getting disk info: {error}"))
        }
    };

    load_snapshot_info(model, gateway);
}

/// Metadata is shown only while the snapshots pane has focus and a selection.
pub fn load_snapshot_info(model: &mut AppModel, gateway: &dyn Gateway) {
    if model.focus != Pane::Snapshots {
        model.snapshot_info = PaneText::Empty;
        return;
    }
    let Some(snapshot) = model.snapshots.selected() else {
        model.snapshot_info = PaneText::Empty;
        return;
    };

    let path = model.config.entry_path(snapshot);
    model.snapshot_info = match gateway.entry_metadata(&path) {
        Ok(info) => PaneText::Text(format!("Snapshot information:\n{info}")),
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "snapshot metadata failed");
            PaneText::Error(format!("Error getting snapshot info: {error}"))
        }
    };
}

fn execute(model: &mut AppModel, gateway: &dyn Gateway, action: PendingAction) {
    let label = action.label();
    match action {
        PendingAction::CreateSnapshot {
            source,
            destination,
        } => match gateway.create_snapshot(&source, &destination) {
            Ok(()) => {
                tracing::info!(
                    source = %source.display(),
                    destination = %destination.display(),
                    "snapshot created"
                );
                refresh(model, gateway);
            }
            Err(error) => {
                tracing::warn!(action = label, %error, "action failed");
                notify(model, format!("Failed to create snapshot:\n{error}"));
            }
        },
        PendingAction::DeleteSnapshot { path } => match gateway.delete_snapshot(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "snapshot deleted");
                refresh(model, gateway);
            }
            Err(error) => {
                tracing::warn!(action = label, %error, "action failed");
                notify(model, format!("Failed to delete snapshot:\n{error}"));
            }
        },
        PendingAction::Balance { root } => match gateway.rebalance(&root) {
            Ok(output) => {
                tracing::info!(root = %root.display(), "balance finished");
                notify(model, format!("Btrfs balance completed:\n{output}"));
            }
            Err(error) => {
                tracing::warn!(action = label, %error, "action failed");
                notify(model, format!("Error executing btrfs balance:\n{error}"));
            }
        },
        PendingAction::RegenerateBootConfig => match gateway.regenerate_boot_config() {
            Ok(output) => {
                tracing::info!("boot configuration regenerated");
                notify(model, format!("GRUB successfully updated:\n{output}"));
            }
            Err(error) => {
                tracing::warn!(action = label, %error, "action failed");
                notify(model, format!("Error updating GRUB:\n{error}"));
            }
        },
    }
}

fn notify(model: &mut AppModel, message: String) {
    if let Err(error) = model.dialog.open_info(message) {
        tracing::warn!(%error, "result notice dropped");
    }
}
