use std::{
    path::PathBuf,
    process::{Command, Stdio},
};

use thiserror::Error;

/// Highest display number probed before giving up.
const MAX_DISPLAY: u32 = 1000;

#[derive(Error, Debug)]
#[error("No open X display found between :1 and :1000")]
pub struct DisplaysExhausted;

/// Query whether an X server is already listening on a display number.
pub trait DisplayProbe {
    fn in_use(&self, display: u32) -> bool;
}

/// Probes displays with `xdpyinfo -display :N`.
#[derive(Debug)]
pub struct Xdpyinfo {
    path: PathBuf,
}

impl Xdpyinfo {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }
}

impl Default for Xdpyinfo {
    fn default() -> Self {
        Xdpyinfo::new("xdpyinfo")
    }
}

impl DisplayProbe for Xdpyinfo {
    fn in_use(&self, display: u32) -> bool {
        // A probe that fails to spawn counts the same as a failed query,
        // no server is listening on that display.
        Command::new(&self.path)
            .arg("-display")
            .arg(format!(":{display}"))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

/// Search for an open Xvfb display to render into, scanning :1 up to
/// :1000 and returning the first display with no server behind it.
pub fn find_open_display<P>(probe: &P) -> Result<u32, DisplaysExhausted>
where
    P: DisplayProbe,
{
    (1..=MAX_DISPLAY)
        .find(|&display| !probe.in_use(display))
        .ok_or(DisplaysExhausted)
}

#[cfg(test)]
mod test {
    use super::*;

    struct Occupied(Vec<u32>);

    impl DisplayProbe for Occupied {
        fn in_use(&self, display: u32) -> bool {
            self.0.contains(&display)
        }
    }

    struct AllBusy;

    impl DisplayProbe for AllBusy {
        fn in_use(&self, _display: u32) -> bool {
            true
        }
    }

    #[test]
    fn first_free_display_wins() {
        assert_eq!(find_open_display(&Occupied(vec![])).unwrap(), 1);
        assert_eq!(find_open_display(&Occupied(vec![1, 2])).unwrap(), 3);
        assert_eq!(find_open_display(&Occupied(vec![2, 3])).unwrap(), 1);
    }

    #[test]
    fn exhaustion_is_an_error() {
        let res = find_open_display(&AllBusy);
        assert!(res.is_err());
    }

    #[test]
    fn occupied_display_is_never_returned() {
        let occupied: Vec<u32> = (1..=999).collect();
        let display = find_open_display(&Occupied(occupied.clone())).unwrap();
        assert!(!occupied.contains(&display));
        assert_eq!(display, 1000);
    }
}
