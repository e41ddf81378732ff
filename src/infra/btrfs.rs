use crate::domain::{EntryListing, Prefixes, parse_subvolume_list, summarize_df_output};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {diagnostic}")]
    Failed {
        program: String,
        status: String,
        diagnostic: String,
    },

    #[error("unexpected output from {program}")]
    UnexpectedOutput { program: String },
}

/// Every storage query and mutation the dashboard performs.
///
/// Calls are synchronous and run on the event thread; a long rebalance
/// freezes the interface until the tool exits.
pub trait Gateway {
    fn list_entries(&self, root: &Path) -> Result<EntryListing, GatewayError>;
    fn disk_usage(&self, root: &Path) -> Result<String, GatewayError>;
    fn entry_metadata(&self, entry: &Path) -> Result<String, GatewayError>;
    fn create_snapshot(&self, source: &Path, destination: &Path) -> Result<(), GatewayError>;
    fn delete_snapshot(&self, entry: &Path) -> Result<(), GatewayError>;
    fn rebalance(&self, root: &Path) -> Result<String, GatewayError>;
    fn regenerate_boot_config(&self) -> Result<String, GatewayError>;
}

/// Gateway backed by the `btrfs`, `df` and `grub-mkconfig` binaries.
#[derive(Clone, Debug)]
pub struct SystemGateway {
    prefixes: Prefixes,
    balance_usage: u8,
    grub_config_path: PathBuf,
}

impl SystemGateway {
    pub fn new(prefixes: Prefixes, balance_usage: u8, grub_config_path: PathBuf) -> Self {
        Self {
            prefixes,
            balance_usage,
            grub_config_path,
        }
    }
}

impl Gateway for SystemGateway {
    fn list_entries(&self, root: &Path) -> Result<EntryListing, GatewayError> {
        let mut command = Command::new("btrfs");
        command.arg("subvolume").arg("list").arg(root);
        let stdout = run_stdout(command)?;
        Ok(parse_subvolume_list(&stdout, &self.prefixes))
    }

    fn disk_usage(&self, root: &Path) -> Result<String, GatewayError> {
        let mut command = Command::new("df");
        command.arg("-h").arg(root);
        let stdout = run_stdout(command)?;
        summarize_df_output(&stdout).ok_or_else(|| GatewayError::UnexpectedOutput {
            program: "df".to_string(),
        })
    }

    fn entry_metadata(&self, entry: &Path) -> Result<String, GatewayError> {
        let mut command = Command::new("btrfs");
        command.arg("subvolume").arg("show").arg(entry);
        run_stdout(command)
    }

    fn create_snapshot(&self, source: &Path, destination: &Path) -> Result<(), GatewayError> {
        let mut command = Command::new("btrfs");
        command
            .arg("subvolume")
            .arg("snapshot")
            .arg(source)
            .arg(destination);
        run_stdout(command).map(|_| ())
    }

    fn delete_snapshot(&self, entry: &Path) -> Result<(), GatewayError> {
        let mut command = Command::new("btrfs");
        command.arg("subvolume").arg("delete").arg(entry);
        run_stdout(command).map(|_| ())
    }

    fn rebalance(&self, root: &Path) -> Result<String, GatewayError> {
        let mut command = Command::new("btrfs");
        command
            .arg("balance")
            .arg("start")
            .arg(format!("-dusage={}", self.balance_usage))
            .arg(root);
        run_combined(command)
    }

    fn regenerate_boot_config(&self) -> Result<String, GatewayError> {
        let mut command = Command::new("grub-mkconfig");
        command.arg("-o").arg(&self.grub_config_path);
        run_combined(command)
    }
}

fn program_name(command: &Command) -> String {
    command.get_program().to_string_lossy().to_string()
}

fn run(mut command: Command) -> Result<Output, GatewayError> {
    let program = program_name(&command);
    tracing::debug!(
        program = %program,
        args = ?command.get_args().collect::<Vec<_>>(),
        "invoking external tool"
    );
    let output = command
        .output()
        .map_err(|source| GatewayError::Spawn {
            program: program.clone(),
            source,
        })?;
    if !output.status.success() {
        let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GatewayError::Failed {
            program,
            status: output.status.to_string(),
            diagnostic,
        });
    }
    Ok(output)
}

fn run_stdout(command: Command) -> Result<String, GatewayError> {
    let output = run(command)?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

fn run_combined(command: Command) -> Result<String, GatewayError> {
    let output = run(command)?;
    let mut text = String::from_utf8_lossy(&output.stdout).to_string();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(text)
}
