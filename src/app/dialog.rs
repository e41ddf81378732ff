use std::path::PathBuf;
use thiserror::Error;

/// Mutating action bound to a confirmation, with everything it needs captured.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PendingAction {
    CreateSnapshot {
        source: PathBuf,
        destination: PathBuf,
    },
    DeleteSnapshot { path: PathBuf },
    Balance { root: PathBuf },
    RegenerateBootConfig,
}

impl PendingAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CreateSnapshot { .. } => "create-snapshot",
            Self::DeleteSnapshot { .. } => "delete-snapshot",
            Self::Balance { .. } => "balance",
            Self::RegenerateBootConfig => "regenerate-boot-config",
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum DialogError {
    #[error("a dialog is already open")]
    AlreadyOpen,
}

/// Modal overlay. While open it receives every key; focus is left untouched,
/// so closing it returns input to the pane that was focused before.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Dialog {
    #[default]
    Closed,
    Informational { message: String },
    Confirming {
        message: String,
        action: PendingAction,
    },
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn open_info(&mut self, message: impl Into<String>) -> Result<(), DialogError> {
        if self.is_open() {
            return Err(DialogError::AlreadyOpen);
        }
        *self = Self::Informational {
            message: message.into(),
        };
        Ok(())
    }

    pub fn open_confirm(
        &mut self,
        message: impl Into<String>,
        action: PendingAction,
    ) -> Result<(), DialogError> {
        if self.is_open() {
            return Err(DialogError::AlreadyOpen);
        }
        *self = Self::Confirming {
            message: message.into(),
            action,
        };
        Ok(())
    }

    /// Closes an informational dialog. Returns whether anything changed.
    pub fn acknowledge(&mut self) -> bool {
        if !matches!(self, Self::Informational { .. }) {
            return false;
        }
        *self = Self::Closed;
        true
    }

    /// Closes a confirmation and hands back its action for the caller to run.
    pub fn commit(&mut self) -> Option<PendingAction> {
        match std::mem::take(self) {
            Self::Confirming { action, .. } => Some(action),
            other => {
                *self = other;
                None
            }
        }
    }

    pub fn cancel(&mut self) -> bool {
        if !matches!(self, Self::Confirming { .. }) {
            return false;
        }
        *self = Self::Closed;
        true
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Informational { message } | Self::Confirming { message, .. } => Some(message),
        }
    }

    pub fn pending_action(&self) -> Option<&PendingAction> {
        match self {
            Self::Confirming { action, .. } => Some(action),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Confirming { .. } => "Action Confirmation",
            _ => "Notice",
        }
    }
}
