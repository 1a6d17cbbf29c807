use crate::error::{Result, StatusError};
use log::{debug, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// The three adb calls the status line needs.
///
/// Kept as a trait so tests can script device output without a phone.
pub trait DeviceBridge {
    /// Raw `adb devices` listing
    fn list_devices(&self) -> Result<String>;

    /// State string reported for `device`, e.g. `device` or `offline`.
    /// Fails with [`StatusError::InvalidDevice`] when adb does not know it.
    fn device_state(&self, device: &str) -> Result<String>;

    /// Stdout of `command` run in a remote shell on `device`
    fn shell(&self, device: &str, command: &str) -> Result<String>;
}

/// Device bridge backed by the `adb` executable
#[derive(Debug, Clone)]
pub struct Adb {
    path: PathBuf,
}

impl Adb {
    /// Find adb: the configured path if one is given, otherwise the first
    /// `adb` on `PATH`.
    pub fn locate(configured: Option<&Path>) -> Result<Self> {
        let path = match configured {
            Some(path) if path.is_file() => path.to_path_buf(),
            Some(path) => {
                return Err(StatusError::tool_missing(format!(
                    "{} does not exist",
                    path.display()
                )))
            }
            None => which::which("adb").map_err(|e| StatusError::tool_missing(e.to_string()))?,
        };

        debug!("Using adb at {}", path.display());
        Ok(Self { path })
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!("Running adb {}", args.join(" "));
        Command::new(&self.path)
            .args(args)
            .output()
            .map_err(|e| StatusError::bridge(format!("could not run {}: {}", self.path.display(), e)))
    }
}

impl DeviceBridge for Adb {
    fn list_devices(&self) -> Result<String> {
        let output = self.run(&["devices"])?;
        if !output.status.success() {
            return Err(StatusError::bridge(format!(
                "adb devices exited with {}",
                output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn device_state(&self, device: &str) -> Result<String> {
        let output = self.run(&["-s", device, "get-state"])?;
        if !output.status.success() {
            debug!(
                "get-state for {} failed: {}",
                device,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(StatusError::InvalidDevice(device.to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn shell(&self, device: &str, command: &str) -> Result<String> {
        let output = self.run(&["-s", device, "shell", command])?;
        if !output.status.success() {
            return Err(StatusError::bridge(format!(
                "'{}' on {} exited with {}",
                command, device, output.status
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn attached_device_pattern() -> Result<Regex> {
    Regex::new(r"(?m)^(\S+)[ \t]+device\s*$")
        .map_err(|e| StatusError::bridge(format!("invalid device pattern: {}", e)))
}

/// Ids of every device listed as ready (state `device`), in listing order.
pub fn attached_devices(listing: &str) -> Result<Vec<String>> {
    let pattern = attached_device_pattern()?;
    Ok(pattern
        .captures_iter(listing)
        .map(|caps| caps[1].to_string())
        .collect())
}

/// Pick the device to query and make sure adb considers it online.
///
/// Without an explicit id the first ready device from `adb devices` is used.
pub fn resolve_device<B: DeviceBridge + ?Sized>(bridge: &B, specific: Option<&str>) -> Result<String> {
    let devices = attached_devices(&bridge.list_devices()?)?;
    if devices.is_empty() {
        return Err(StatusError::NoDevice);
    }

    let device = match specific {
        Some(id) => id.to_string(),
        None => devices[0].clone(),
    };

    let state = bridge.device_state(&device)?;
    if state.trim() != "device" {
        warn!("{} reported state '{}'", device, state.trim());
        return Err(StatusError::InvalidDevice(device));
    }

    debug!("Selected device {}", device);
    Ok(device)
}
