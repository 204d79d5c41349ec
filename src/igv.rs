use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::Command,
    time::{Duration, Instant},
};

use eyre::{Context, Result};

use crate::{
    display::{self, Xdpyinfo},
    utils,
};

/// Options for a single headless IGV batch run.
///
/// Built once at startup from the command line and handed to the
/// runner, nothing here is read from ambient state.
#[derive(Debug)]
pub struct IgvOptions {
    jar: PathBuf,
    mem_mb: u32,
    xvfb_run: PathBuf,
    java: PathBuf,
}

impl IgvOptions {
    pub fn new<P>(jar: P, mem_mb: u32) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            jar: jar.into(),
            mem_mb,
            xvfb_run: PathBuf::from("xvfb-run"),
            java: PathBuf::from("java"),
        }
    }

    pub fn xvfb_run<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.xvfb_run = path.into();
        self
    }

    pub fn java<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.java = path.into();
        self
    }

    fn command(&self, batch_script: &Path) -> Command {
        let mut cmd = Command::new(&self.xvfb_run);
        cmd.arg("--auto-servernum")
            .arg("--server-num=1")
            .arg(&self.java)
            .arg(format!("-Xmx{}m", self.mem_mb))
            .arg("-jar")
            .arg(&self.jar)
            .arg("-b")
            .arg(batch_script);
        cmd
    }

    /// Run IGV on a batch script under a virtual framebuffer and wait
    /// for it to exit.
    ///
    /// The probed display number is only logged, the launch lets
    /// `xvfb-run` allocate its own server number. Elapsed wall-clock
    /// time is logged whether or not IGV succeeded, a non-zero exit is
    /// then surfaced as an error.
    pub fn run(&self, batch_script: &Path) -> Result<()> {
        let display = display::find_open_display(&Xdpyinfo::default())?;
        log::info!("Open Xvfb display found on :{display}");

        let mut cmd = self.command(batch_script);
        log::info!("IGV command: {cmd:?}");

        let start = Instant::now();
        let output = cmd.output().wrap_err("Failed to launch xvfb-run")?;
        let elapsed = Duration::from_millis(start.elapsed().as_millis() as u64);

        io::stdout().write_all(&output.stdout)?;
        io::stderr().write_all(&output.stderr)?;
        log::info!(
            "IGV finished, elapsed time: {}",
            humantime::format_duration(elapsed)
        );

        utils::check_if_failed(output).wrap_err("IGV batch run failed")
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn rendered(cmd: &Command) -> String {
        std::iter::once(cmd.get_program())
            .chain(cmd.get_args())
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn command_embeds_mem_jar_and_batchscript() {
        let opts = IgvOptions::new("/opt/igv.jar", 2000);
        let cmd = opts.command(Path::new("regions.bed.batch"));
        let rendered = rendered(&cmd);
        assert!(rendered.contains("-Xmx2000m"));
        assert!(rendered.contains("-jar /opt/igv.jar"));
        assert!(rendered.contains("-b regions.bed.batch"));
    }

    #[test]
    fn command_runs_under_xvfb() {
        let opts = IgvOptions::new("igv.jar", 4000)
            .xvfb_run("/usr/bin/xvfb-run")
            .java("/usr/bin/java");
        let cmd = opts.command(Path::new("snap.batch"));
        assert_eq!(
            rendered(&cmd),
            "/usr/bin/xvfb-run --auto-servernum --server-num=1 \
             /usr/bin/java -Xmx4000m -jar igv.jar -b snap.batch"
        );
    }
}
