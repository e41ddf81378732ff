use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CliInvocation {
    PrintHelp,
    PrintVersion,
    Tui { root: PathBuf },
}

#[derive(Debug, Error)]
pub enum CliParseError {
    #[error("missing path to btrfs partition")]
    MissingRoot,

    #[error("unknown flag: {0}")]
    UnknownFlag(String),

    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

pub fn usage() -> String {
    format!(
        "Usage: {} <path to btrfs partition>",
        env!("CARGO_PKG_NAME")
    )
}

pub fn parse_invocation(args: &[String]) -> Result<CliInvocation, CliParseError> {
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        return Ok(CliInvocation::PrintHelp);
    }
    if args.iter().any(|arg| arg == "--version" || arg == "-V") {
        return Ok(CliInvocation::PrintVersion);
    }

    let mut root: Option<PathBuf> = None;
    let mut positional_only = false;
    for arg in args.iter().skip(1) {
        if !positional_only && arg == "--" {
            positional_only = true;
            continue;
        }
        if !positional_only && arg.starts_with('-') && arg.len() > 1 {
            return Err(CliParseError::UnknownFlag(arg.clone()));
        }
        if root.is_some() {
            return Err(CliParseError::UnexpectedArgument(arg.clone()));
        }
        root = Some(PathBuf::from(arg));
    }

    match root {
        Some(root) if !root.as_os_str().is_empty() => Ok(CliInvocation::Tui { root }),
        _ => Err(CliParseError::MissingRoot),
    }
}
