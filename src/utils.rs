use std::{path::PathBuf, process::Output, time::Duration};

use eyre::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use which::which;

pub fn find_binary(name: &'static str, binary_filepath: &Option<PathBuf>) -> Result<PathBuf> {
    if let Some(p) = binary_filepath {
        Ok(p.to_path_buf())
    } else {
        which(name).wrap_err_with(|| format!("Error finding {name}"))
    }
}

/// Turn a non-zero child exit into an error carrying the child's stderr.
pub fn check_if_failed(output: Output) -> Result<()> {
    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(eyre::eyre!(
            "Command failed with {}: {}",
            output.status,
            stderr.trim()
        ))
    }
}

pub fn wrap_cmd<F>(msg: &'static str, mut f: F) -> Result<()>
where
    F: FnMut() -> Result<()>,
{
    let p = ProgressBar::new_spinner()
        .with_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}").unwrap(),
        )
        .with_message(msg);
    p.enable_steady_tick(Duration::from_millis(100));
    match f() {
        Ok(()) => {
            p.finish_with_message(format!("✅ \"{}\" complete", msg));
            Ok(())
        }
        Err(err) => {
            p.finish_with_message(format!("❌ \"{}\" failed", msg));
            Err(err)
        }
    }
}

#[cfg(test)]
mod test {
    use std::process::Command;

    use super::*;

    #[test]
    fn check_if_failed_passes_on_success() {
        let output = Command::new("true").output().unwrap();
        assert!(check_if_failed(output).is_ok());
    }

    #[test]
    fn check_if_failed_reports_exit_status() {
        let output = Command::new("false").output().unwrap();
        let err = check_if_failed(output).unwrap_err();
        assert!(err.to_string().contains("Command failed"));
    }
}
