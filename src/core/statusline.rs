//! Fetches the requested metrics from a device and joins them into one line.

use crate::core::bridge::DeviceBridge;
use crate::core::config::{Config, DEFAULT_LOAD_CORE_MULTIPLIER, DEFAULT_PLACEHOLDER};
use crate::core::extractor::{self, CpuUsage};
use crate::error::Result;
use crate::ui::gradient::{ColorProfile, MetricReading, Polarity};
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;

pub const LOADAVG_COMMAND: &str = "cat /proc/loadavg";
pub const CPU_PRESENT_COMMAND: &str = "cat /sys/devices/system/cpu/present";
pub const MEMINFO_COMMAND: &str = "cat /proc/meminfo";
pub const BATTERY_COMMAND: &str = "cat /sys/class/power_supply/battery/capacity";
pub const CPUINFO_COMMAND: &str = "dumpsys cpuinfo";

/// A metric that can appear in the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Load,
    Memory,
    Battery,
    Cpu,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Load, Metric::Memory, Metric::Battery, Metric::Cpu];

    /// Name of the CLI flag that requests this metric
    pub fn flag(self) -> &'static str {
        match self {
            Metric::Load => "load",
            Metric::Memory => "memory",
            Metric::Battery => "battery",
            Metric::Cpu => "cpu",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Tunables that come from the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub load_core_multiplier: u32,
    pub unavailable_placeholder: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            load_core_multiplier: DEFAULT_LOAD_CORE_MULTIPLIER,
            unavailable_placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            load_core_multiplier: config.load_core_multiplier,
            unavailable_placeholder: config.unavailable_placeholder.clone(),
        }
    }
}

/// `n.nn n.nn n.nn`, each figure colored against `cores * multiplier` on an
/// inverted scale.
pub fn get_load<B: DeviceBridge + ?Sized>(
    bridge: &B,
    device: &str,
    profile: &ColorProfile,
    options: &RenderOptions,
) -> Result<String> {
    let loadavg = bridge.shell(device, LOADAVG_COMMAND)?;
    let present = bridge.shell(device, CPU_PRESENT_COMMAND)?;
    let report = extractor::parse_load_average(&loadavg, &present)?;

    let maximum = f64::from(report.cores) * f64::from(options.load_core_multiplier);
    debug!("{} cores, load judged against {}", report.cores, maximum);

    let rendered = report
        .figures
        .iter()
        .map(|figure| {
            MetricReading::new(figure.value, maximum, Polarity::HigherIsWorse)
                .render(&figure.text, profile)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(rendered.join(" "))
}

/// `USED/TOTAL` in MB, colored by how much is used.
pub fn get_memory<B: DeviceBridge + ?Sized>(
    bridge: &B,
    device: &str,
    profile: &ColorProfile,
) -> Result<String> {
    let meminfo = bridge.shell(device, MEMINFO_COMMAND)?;
    let usage = extractor::parse_memory(&meminfo)?;

    let used = usage.used_mb();
    let total = usage.total_mb();
    let text = format!("{}/{}", used, total);

    MetricReading::new(used as f64, total as f64, Polarity::HigherIsWorse).render(&text, profile)
}

/// `PERCENT%`, higher is better.
pub fn get_battery<B: DeviceBridge + ?Sized>(
    bridge: &B,
    device: &str,
    profile: &ColorProfile,
) -> Result<String> {
    let capacity = bridge.shell(device, BATTERY_COMMAND)?;
    let percent = extractor::parse_battery(&capacity)?;

    let rendered = MetricReading::new(f64::from(percent), 100.0, Polarity::HigherIsBetter)
        .render(&percent.to_string(), profile)?;
    Ok(rendered + "%")
}

/// `PERCENT%`, or the placeholder when `dumpsys cpuinfo` is unreadable.
pub fn get_cpu_percent<B: DeviceBridge + ?Sized>(
    bridge: &B,
    device: &str,
    profile: &ColorProfile,
    options: &RenderOptions,
) -> Result<String> {
    let dump = bridge.shell(device, CPUINFO_COMMAND)?;

    match extractor::parse_cpu_percent(&dump) {
        CpuUsage::Percent { value, text } => {
            let rendered =
                MetricReading::new(value, 100.0, Polarity::HigherIsWorse).render(&text, profile)?;
            Ok(rendered + "%")
        }
        CpuUsage::Unavailable => {
            warn!("dumpsys cpuinfo output on {} was not understood", device);
            Ok(options.unavailable_placeholder.clone())
        }
    }
}

pub fn render_metric<B: DeviceBridge + ?Sized>(
    metric: Metric,
    bridge: &B,
    device: &str,
    profile: &ColorProfile,
    options: &RenderOptions,
) -> Result<String> {
    match metric {
        Metric::Load => get_load(bridge, device, profile, options),
        Metric::Memory => get_memory(bridge, device, profile),
        Metric::Battery => get_battery(bridge, device, profile),
        Metric::Cpu => get_cpu_percent(bridge, device, profile, options),
    }
}

/// Render `metrics` in order, separated by single spaces.
///
/// A metric requested more than once is fetched once and its text reused.
pub fn render_line<B: DeviceBridge + ?Sized>(
    metrics: &[Metric],
    bridge: &B,
    device: &str,
    profile: &ColorProfile,
    options: &RenderOptions,
) -> Result<String> {
    let mut rendered: HashMap<Metric, String> = HashMap::new();
    let mut parts = Vec::with_capacity(metrics.len());

    for &metric in metrics {
        if let Some(text) = rendered.get(&metric) {
            debug!("Reusing {} from earlier in this line", metric);
            parts.push(text.clone());
            continue;
        }

        let text = render_metric(metric, bridge, device, profile, options)?;
        rendered.insert(metric, text.clone());
        parts.push(text);
    }

    Ok(parts.join(" "))
}
