mod dialog;
mod effects;
mod list;
#[cfg(test)]
mod test_support;

use crate::domain::{
    DashboardConfig, EntryListing, Pane, group_key, snapshot_name, snapshots_for_key,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use thiserror::Error;
use time::OffsetDateTime;

pub use dialog::{Dialog, PendingAction};
pub use effects::{Flow, run_command};
pub use list::SelectableList;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Content of a text pane: nothing yet, fetched text, or an inline error.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum PaneText {
    #[default]
    Empty,
    Text(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Clone, Debug)]
pub struct AppModel {
    pub config: Arc<DashboardConfig>,
    pub focus: Pane,
    pub volumes: SelectableList,
    pub snapshots: SelectableList,
    pub all_snapshots: Vec<String>,
    pub dialog: Dialog,
    pub disk_usage: PaneText,
    pub snapshot_info: PaneText,
    pub list_error: Option<String>,
}

impl AppModel {
    pub fn new(config: Arc<DashboardConfig>) -> Self {
        Self {
            config,
            focus: Pane::Volumes,
            volumes: SelectableList::default(),
            snapshots: SelectableList::default(),
            all_snapshots: Vec::new(),
            dialog: Dialog::Closed,
            disk_usage: PaneText::Empty,
            snapshot_info: PaneText::Empty,
            list_error: None,
        }
    }

    pub fn list(&self, pane: Pane) -> &SelectableList {
        match pane {
            Pane::Volumes => &self.volumes,
            Pane::Snapshots => &self.snapshots,
        }
    }

    pub fn list_mut(&mut self, pane: Pane) -> &mut SelectableList {
        match pane {
            Pane::Volumes => &mut self.volumes,
            Pane::Snapshots => &mut self.snapshots,
        }
    }

    pub fn apply_listing(&mut self, listing: EntryListing) {
        self.volumes.replace(listing.volumes);
        self.all_snapshots = listing.snapshots;
        self.refilter_snapshots();
    }

    /// Recomputes the snapshot pane from the full set and the selected volume.
    pub fn refilter_snapshots(&mut self) {
        let key = self.volumes.selected().and_then(group_key);
        let filtered = snapshots_for_key(&self.all_snapshots, key);
        self.snapshots.replace(filtered);
    }
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppCommand {
    None,
    Quit,
    Refresh,
    LoadSnapshotInfo,
    Execute(PendingAction),
}

pub fn update(model: AppModel, event: AppEvent) -> (AppModel, AppCommand) {
    match event {
        AppEvent::Key(key) => update_on_key(model, key),
    }
}

fn update_on_key(mut model: AppModel, key: KeyEvent) -> (AppModel, AppCommand) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return (model, AppCommand::Quit);
    }

    if model.dialog.is_open() {
        let command = update_dialog(&mut model, key);
        return (model, command);
    }

    let command = match key.code {
        KeyCode::Char('q') => AppCommand::Quit,
        KeyCode::Left => switch_focus_prev(&mut model),
        KeyCode::Right => switch_focus_next(&mut model),
        KeyCode::Up => move_selection(&mut model, Direction::Up),
        KeyCode::Down => move_selection(&mut model, Direction::Down),
        KeyCode::Char('t') if model.focus == Pane::Volumes => {
            request_create_snapshot(&mut model, current_time())
        }
        KeyCode::Char('r') if model.focus == Pane::Snapshots => request_delete_snapshot(&mut model),
        KeyCode::Char('b') => request_balance(&mut model),
        KeyCode::Char('g') => request_grub_update(&model),
        _ => AppCommand::None,
    };
    (model, command)
}

fn update_dialog(model: &mut AppModel, key: KeyEvent) -> AppCommand {
    let confirming = matches!(model.dialog, Dialog::Confirming { .. });
    match key.code {
        KeyCode::Enter if confirming => match model.dialog.commit() {
            Some(action) => {
                tracing::info!(action = action.label(), "confirmed");
                AppCommand::Execute(action)
            }
            None => AppCommand::None,
        },
        KeyCode::Char('c') | KeyCode::Esc if confirming => {
            model.dialog.cancel();
            AppCommand::None
        }
        KeyCode::Enter | KeyCode::Esc => {
            model.dialog.acknowledge();
            AppCommand::None
        }
        _ => AppCommand::None,
    }
}

fn current_time() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn focus_changed(model: &AppModel) -> AppCommand {
    match model.focus {
        Pane::Volumes => AppCommand::Refresh,
        Pane::Snapshots => AppCommand::LoadSnapshotInfo,
    }
}

pub fn switch_focus_next(model: &mut AppModel) -> AppCommand {
    if model.dialog.is_open() {
        return AppCommand::None;
    }
    model.focus = model.focus.next();
    focus_changed(model)
}

pub fn switch_focus_prev(model: &mut AppModel) -> AppCommand {
    if model.dialog.is_open() {
        return AppCommand::None;
    }
    model.focus = model.focus.prev();
    focus_changed(model)
}

pub fn move_selection(model: &mut AppModel, direction: Direction) -> AppCommand {
    if model.dialog.is_open() {
        return AppCommand::None;
    }
    let pane = model.focus;
    let list = model.list_mut(pane);
    if list.is_empty() {
        return AppCommand::None;
    }
    match direction {
        Direction::Up => list.move_up(),
        Direction::Down => list.move_down(),
    }
    match pane {
        Pane::Volumes => {
            model.refilter_snapshots();
            AppCommand::Refresh
        }
        Pane::Snapshots => AppCommand::LoadSnapshotInfo,
    }
}

/// Opens a confirmation to snapshot the selected volume, stamped with `at`.
pub fn request_create_snapshot(model: &mut AppModel, at: OffsetDateTime) -> AppCommand {
    if model.dialog.is_open() {
        return AppCommand::None;
    }
    let Some(volume) = model.volumes.selected() else {
        return AppCommand::None;
    };
    let Some(key) = group_key(volume) else {
        tracing::debug!(volume, "selected volume has no group key");
        return AppCommand::None;
    };

    let name = snapshot_name(&model.config.prefixes.snapshot, key, at);
    let action = PendingAction::CreateSnapshot {
        source: model.config.entry_path(volume),
        destination: model.config.entry_path(&name),
    };
    let message = format!("Are you sure you want to create snapshot for:\n{volume}?");
    open_confirm(model, message, action);
    AppCommand::None
}

pub fn request_delete_snapshot(model: &mut AppModel) -> AppCommand {
    if model.dialog.is_open() {
        return AppCommand::None;
    }
    let Some(snapshot) = model.snapshots.selected() else {
        return AppCommand::None;
    };
    let action = PendingAction::DeleteSnapshot {
        path: model.config.entry_path(snapshot),
    };
    let message = format!("Are you sure you want to delete snapshot:\n{snapshot}?");
    open_confirm(model, message, action);
    AppCommand::None
}

pub fn request_balance(model: &mut AppModel) -> AppCommand {
    if model.dialog.is_open() {
        return AppCommand::None;
    }
    let action = PendingAction::Balance {
        root: model.config.root.clone(),
    };
    open_confirm(
        model,
        "Are you sure you want to execute btrfs balance?\nThis operation may take a long time.",
        action,
    );
    AppCommand::None
}

/// Boot-config regeneration runs without confirmation; its result comes back as a notice.
pub fn request_grub_update(model: &AppModel) -> AppCommand {
    if model.dialog.is_open() {
        return AppCommand::None;
    }
    AppCommand::Execute(PendingAction::RegenerateBootConfig)
}

fn open_confirm(model: &mut AppModel, message: impl Into<String>, action: PendingAction) {
    let label = action.label();
    match model.dialog.open_confirm(message, action) {
        Ok(()) => tracing::debug!(action = label, "awaiting confirmation"),
        Err(error) => tracing::debug!(action = label, %error, "request ignored"),
    }
}

/// Legend for the keys that do something in the current state.
pub fn hotkey_legend(model: &AppModel) -> String {
    match model.dialog {
        Dialog::Informational { .. } => return "Enter: Close".to_string(),
        Dialog::Confirming { .. } => return "Enter: Execute | c: Cancel".to_string(),
        Dialog::Closed => {}
    }

    let mut keys = vec!["q: Quit", "←/→: Switch view"];
    if model.list(model.focus).len() > 1 {
        keys.push("↑/↓: Navigate");
    }
    keys.push("g: Update GRUB");
    keys.push("b: Btrfs balance");
    match model.focus {
        Pane::Volumes if model.volumes.selected().and_then(group_key).is_some() => {
            keys.push("t: Create snapshot");
        }
        Pane::Snapshots if !model.snapshots.is_empty() => keys.push("r: Remove snapshot"),
        _ => {}
    }
    keys.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::test_support::{FakeGateway, listing, model_with_root};
    use super::*;
    use std::path::PathBuf;
    use time::macros::datetime;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn press(model: AppModel, code: KeyCode) -> (AppModel, AppCommand) {
        update(model, key(code))
    }

    fn loaded_model() -> AppModel {
        let mut model = model_with_root("/mnt/pool");
        model.apply_listing(listing(
            &["_active/web-1", "_active/db-1"],
            &[
                "_snapshots/web-20240101-000000",
                "_snapshots/db-20240101-000000",
            ],
        ));
        model
    }

    #[test]
    fn selecting_volume_filters_snapshots() {
        let model = loaded_model();
        assert_eq!(
            model.snapshots.items(),
            ["_snapshots/web-20240101-000000".to_string()]
        );

        let (model, command) = press(model, KeyCode::Down);
        assert_eq!(command, AppCommand::Refresh);
        assert_eq!(model.volumes.selected(), Some("_active/db-1"));
        assert_eq!(
            model.snapshots.items(),
            ["_snapshots/db-20240101-000000".to_string()]
        );
    }

    #[test]
    fn create_request_captures_timestamped_destination() {
        let mut model = loaded_model();
        let command = request_create_snapshot(&mut model, datetime!(2024-01-02 03:04:05 UTC));
        assert_eq!(command, AppCommand::None);
        assert_eq!(
            model.dialog.pending_action(),
            Some(&PendingAction::CreateSnapshot {
                source: PathBuf::from("/mnt/pool/_active/web-1"),
                destination: PathBuf::from("/mnt/pool/_snapshots/web-20240102-030405"),
            })
        );
        assert_eq!(
            model.dialog.message(),
            Some("Are you sure you want to create snapshot for:\n_active/web-1?")
        );
    }

    #[test]
    fn create_request_is_noop_without_volumes() {
        let mut model = model_with_root("/mnt/pool");
        let command = request_create_snapshot(&mut model, datetime!(2024-01-02 03:04:05 UTC));
        assert_eq!(command, AppCommand::None);
        assert!(!model.dialog.is_open());
    }

    #[test]
    fn create_key_only_acts_on_volumes_pane() {
        let mut model = loaded_model();
        model.focus = Pane::Snapshots;
        let (model, _) = press(model, KeyCode::Char('t'));
        assert!(!model.dialog.is_open());

        let (model, _) = press(model, KeyCode::Left);
        let (model, _) = press(model, KeyCode::Char('t'));
        assert!(matches!(
            model.dialog.pending_action(),
            Some(PendingAction::CreateSnapshot { .. })
        ));
    }

    fn drive(model: AppModel, gateway: &FakeGateway, code: KeyCode) -> (AppModel, AppCommand) {
        let (mut model, command) = press(model, code);
        run_command(&mut model, gateway, command.clone());
        (model, command)
    }

    #[test]
    fn delete_cancel_never_reaches_gateway() {
        let gateway = FakeGateway::with_listing(listing(
            &["_active/web-1"],
            &["_snapshots/web-20240101-000000"],
        ));
        let mut model = model_with_root("/mnt/pool");
        run_command(&mut model, &gateway, AppCommand::Refresh);

        let (model, command) = drive(model, &gateway, KeyCode::Right);
        assert_eq!(command, AppCommand::LoadSnapshotInfo);
        let (model, command) = drive(model, &gateway, KeyCode::Char('r'));
        assert_eq!(command, AppCommand::None);
        assert_eq!(
            model.dialog.pending_action(),
            Some(&PendingAction::DeleteSnapshot {
                path: PathBuf::from("/mnt/pool/_snapshots/web-20240101-000000"),
            })
        );

        let before = model.snapshots.clone();
        let (model, command) = drive(model, &gateway, KeyCode::Char('c'));
        assert_eq!(command, AppCommand::None);
        assert!(!model.dialog.is_open());
        assert_eq!(model.snapshots, before);
        assert!(!gateway.was_called("delete"));
        assert_eq!(
            gateway.listing.borrow().snapshots,
            vec!["_snapshots/web-20240101-000000".to_string()]
        );
    }

    #[test]
    fn focus_is_frozen_while_confirming() {
        let mut model = loaded_model();
        request_balance(&mut model);
        let dialog = model.dialog.clone();

        let (model, command) = press(model, KeyCode::Right);
        assert_eq!(command, AppCommand::None);
        assert_eq!(model.focus, Pane::Volumes);
        assert_eq!(model.dialog, dialog);

        let (mut model, _) = press(model, KeyCode::Left);
        assert_eq!(model.focus, Pane::Volumes);
        assert_eq!(switch_focus_next(&mut model), AppCommand::None);
        assert_eq!(switch_focus_prev(&mut model), AppCommand::None);
        assert_eq!(model.focus, Pane::Volumes);
        assert!(model.dialog.is_open());
    }

    #[test]
    fn dialog_swallows_navigation_and_action_keys() {
        let mut model = loaded_model();
        model.dialog.open_info("hello").expect("open");
        for code in [
            KeyCode::Down,
            KeyCode::Up,
            KeyCode::Char('t'),
            KeyCode::Char('b'),
            KeyCode::Char('g'),
            KeyCode::Char('q'),
            KeyCode::Char('c'),
        ] {
            let (next, command) = press(model.clone(), code);
            assert_eq!(command, AppCommand::None);
            assert_eq!(next.volumes, model.volumes);
            assert_eq!(next.dialog, model.dialog);
        }
    }

    #[test]
    fn ctrl_c_quits_even_with_dialog_open() {
        let mut model = loaded_model();
        model.dialog.open_info("hello").expect("open");
        let event = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let (_model, command) = update(model, event);
        assert_eq!(command, AppCommand::Quit);
    }

    #[test]
    fn enter_and_esc_acknowledge_info() {
        for code in [KeyCode::Enter, KeyCode::Esc] {
            let mut model = loaded_model();
            model.focus = Pane::Snapshots;
            model.dialog.open_info("done").expect("open");
            let (model, command) = press(model, code);
            assert_eq!(command, AppCommand::None);
            assert!(!model.dialog.is_open());
            assert_eq!(model.focus, Pane::Snapshots);
        }
    }

    #[test]
    fn enter_commits_confirmation_into_execute() {
        let model = loaded_model();
        let (model, _) = press(model, KeyCode::Char('b'));
        let (model, command) = press(model, KeyCode::Enter);
        assert_eq!(
            command,
            AppCommand::Execute(PendingAction::Balance {
                root: PathBuf::from("/mnt/pool"),
            })
        );
        assert!(!model.dialog.is_open());
    }

    #[test]
    fn grub_key_executes_without_confirmation() {
        let (model, command) = press(loaded_model(), KeyCode::Char('g'));
        assert_eq!(command, AppCommand::Execute(PendingAction::RegenerateBootConfig));
        assert!(!model.dialog.is_open());
    }

    #[test]
    fn navigation_on_empty_list_is_noop() {
        let mut model = model_with_root("/mnt/pool");
        assert_eq!(move_selection(&mut model, Direction::Down), AppCommand::None);
        model.focus = Pane::Snapshots;
        assert_eq!(move_selection(&mut model, Direction::Up), AppCommand::None);
        assert_eq!(request_delete_snapshot(&mut model), AppCommand::None);
        assert!(!model.dialog.is_open());
    }

    #[test]
    fn snapshot_navigation_only_reloads_metadata() {
        let mut model = model_with_root("/mnt/pool");
        model.apply_listing(listing(
            &["_active/web-1"],
            &["_snapshots/web-1", "_snapshots/web-2"],
        ));
        model.focus = Pane::Snapshots;
        let (model, command) = press(model, KeyCode::Down);
        assert_eq!(command, AppCommand::LoadSnapshotInfo);
        assert_eq!(model.snapshots.selected(), Some("_snapshots/web-2"));
    }

    #[test]
    fn q_quits_without_dialog() {
        let (_model, command) = press(loaded_model(), KeyCode::Char('q'));
        assert_eq!(command, AppCommand::Quit);
    }

    #[test]
    fn legend_tracks_mode() {
        let mut model = loaded_model();
        assert_eq!(
            hotkey_legend(&model),
            "q: Quit | ←/→: Switch view | ↑/↓: Navigate | g: Update GRUB | b: Btrfs balance | t: Create snapshot"
        );

        model.focus = Pane::Snapshots;
        assert_eq!(
            hotkey_legend(&model),
            "q: Quit | ←/→: Switch view | g: Update GRUB | b: Btrfs balance | r: Remove snapshot"
        );

        request_balance(&mut model);
        assert_eq!(hotkey_legend(&model), "Enter: Execute | c: Cancel");

        model.dialog = Dialog::Closed;
        model.dialog.open_info("x").expect("open");
        assert_eq!(hotkey_legend(&model), "Enter: Close");
    }

    #[test]
    fn legend_omits_keys_that_would_do_nothing() {
        let mut model = model_with_root("/mnt/pool");
        assert_eq!(
            hotkey_legend(&model),
            "q: Quit | ←/→: Switch view | g: Update GRUB | b: Btrfs balance"
        );

        model.focus = Pane::Snapshots;
        assert!(!hotkey_legend(&model).contains("r: Remove snapshot"));

        model.focus = Pane::Volumes;
        model.apply_listing(listing(&["_active/"], &[]));
        assert!(!hotkey_legend(&model).contains("t: Create snapshot"));
    }
}
