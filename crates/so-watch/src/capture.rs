//! Terminal capture through a named pipe
//!
//! `capture` records the user's terminal into the pipe with `script`;
//! `display` reads from it.

use anyhow::{bail, Context, Result};
use log::info;
use nix::sys::stat::Mode;
use nix::unistd::mkfifo;
use std::fs::{self, File};
use std::io::BufReader;
use std::os::unix::fs::FileTypeExt;
use std::path::Path;
use std::process::Command;

/// Create the pipe at `path` unless it already exists
pub fn ensure_pipe(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    if path.exists() {
        if fs::metadata(path)?.file_type().is_fifo() {
            return Ok(());
        }
        bail!("{} exists and is not a named pipe", path.display());
    }

    mkfifo(path, Mode::S_IRUSR | Mode::S_IWUSR)
        .with_context(|| format!("Failed to create named pipe {}", path.display()))?;
    info!("Created named pipe {}", path.display());
    Ok(())
}

/// `script` invocation writing the session to `pipe`, flushing every write
pub fn script_command(pipe: &Path) -> Command {
    let flush_flag = if cfg!(target_os = "macos") { "-F" } else { "-f" };
    let mut command = Command::new("script");
    command.arg("-q").arg(flush_flag).arg(pipe);
    command
}

/// Record the terminal into the pipe until the user exits the shell
pub fn capture(pipe: &Path) -> Result<()> {
    ensure_pipe(pipe)?;

    let status = script_command(pipe)
        .status()
        .context("Failed to run script")?;

    // Leaving with Ctrl-C or a failing last command is a normal exit
    info!("script exited with {}", status);
    Ok(())
}

/// Open the pipe for reading; blocks until `capture` opens it for writing
pub fn open_pipe(pipe: &Path) -> Result<BufReader<File>> {
    let file = File::open(pipe)
        .with_context(|| format!("Failed to open named pipe {}", pipe.display()))?;
    Ok(BufReader::new(file))
}
