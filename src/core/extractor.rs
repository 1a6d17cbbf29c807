//! Parsers that turn raw device text into numbers.
//!
//! Every parser documents the input shape it expects. Load, memory and battery
//! fail with [`StatusError::Parse`]; the CPU parser never fails and reports
//! [`CpuUsage::Unavailable`] instead, since `dumpsys cpuinfo` is sometimes garbled.

use crate::error::{Result, StatusError};

/// One load figure, keeping the device's own formatting for display
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFigure {
    pub text: String,
    pub value: f64,
}

/// Load averages plus the number of cores they should be judged against
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub figures: [LoadFigure; 3],
    pub cores: u32,
}

impl LoadReport {
    pub fn values(&self) -> [f64; 3] {
        [
            self.figures[0].value,
            self.figures[1].value,
            self.figures[2].value,
        ]
    }
}

/// Memory figures as read from meminfo, in KB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryUsage {
    pub used_kb: u64,
    pub total_kb: u64,
}

impl MemoryUsage {
    pub fn used_mb(&self) -> u64 {
        self.used_kb / 1000
    }

    pub fn total_mb(&self) -> u64 {
        self.total_kb / 1000
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CpuUsage {
    Percent { value: f64, text: String },
    Unavailable,
}

/// Parse `/proc/loadavg` together with `/sys/devices/system/cpu/present`.
///
/// `loadavg` looks like `0.50 0.75 1.20 1/234 5678`; the first three decimal
/// tokens are the 1, 5 and 15 minute loads. `cpu_present` is a zero-indexed
/// CPU list such as `0-7`.
pub fn parse_load_average(loadavg: &str, cpu_present: &str) -> Result<LoadReport> {
    let figures = parse_load_figures(loadavg)?;
    let cores = parse_core_count(cpu_present)?;
    Ok(LoadReport { figures, cores })
}

/// First three decimal tokens of a loadavg line.
pub fn parse_load_figures(loadavg: &str) -> Result<[LoadFigure; 3]> {
    let mut found = loadavg
        .split_whitespace()
        .filter(|token| token.contains('.'))
        .filter_map(|token| {
            token.parse::<f64>().ok().map(|value| LoadFigure {
                text: token.to_string(),
                value,
            })
        });

    match (found.next(), found.next(), found.next()) {
        (Some(one), Some(five), Some(fifteen)) => Ok([one, five, fifteen]),
        _ => Err(StatusError::parse(
            "load average",
            format!("expected three decimal figures in {:?}", loadavg.trim()),
        )),
    }
}

/// Core count from a zero-indexed CPU descriptor: the highest index plus one.
///
/// For range lists (`0-7`, `0-3,6-7`) the last number is the highest index.
/// A bare run of digits with no separators (`0123`) lists single-digit
/// indices, so only its last digit counts.
pub fn parse_core_count(cpu_present: &str) -> Result<u32> {
    let descriptor = cpu_present.trim();
    let invalid = || {
        StatusError::parse(
            "core count",
            format!("no CPU index in {:?}", descriptor),
        )
    };

    let last_index = if descriptor.contains(['-', ',']) {
        descriptor
            .rsplit(['-', ','])
            .next()
            .map(str::trim)
            .ok_or_else(invalid)?
    } else {
        let split = descriptor
            .char_indices()
            .last()
            .map(|(idx, _)| idx)
            .ok_or_else(invalid)?;
        &descriptor[split..]
    };

    if last_index.is_empty() || !last_index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let highest: u32 = last_index.parse().map_err(|_| invalid())?;
    Ok(highest + 1)
}

/// Parse a `/proc/meminfo` style report.
///
/// The first two numeric fields are MemTotal and MemFree. Anything from the
/// `Buffers` field onward is ignored. Non-digit characters inside a field are
/// dropped, so `2000000kB` still reads as 2000000.
pub fn parse_memory(meminfo: &str) -> Result<MemoryUsage> {
    let mut numbers = meminfo
        .split_whitespace()
        .take_while(|token| !token.starts_with("Buffers"))
        .filter_map(|token| {
            let digits: String = token.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                None
            } else {
                Some(digits)
            }
        });

    let (total, free) = match (numbers.next(), numbers.next()) {
        (Some(total), Some(free)) => (total, free),
        _ => {
            return Err(StatusError::parse(
                "memory",
                "expected MemTotal and MemFree before Buffers",
            ))
        }
    };

    let total_kb: u64 = total
        .parse()
        .map_err(|_| StatusError::parse("memory", format!("total {} out of range", total)))?;
    let free_kb: u64 = free
        .parse()
        .map_err(|_| StatusError::parse("memory", format!("free {} out of range", free)))?;

    let used_kb = total_kb.checked_sub(free_kb).ok_or_else(|| {
        StatusError::parse(
            "memory",
            format!("free ({} kB) exceeds total ({} kB)", free_kb, total_kb),
        )
    })?;

    Ok(MemoryUsage { used_kb, total_kb })
}

/// Parse a battery capacity file: a single integer 0-100 and a newline.
pub fn parse_battery(capacity: &str) -> Result<u8> {
    let trimmed = capacity.trim();
    let percent: u8 = trimmed
        .parse()
        .map_err(|_| StatusError::parse("battery", format!("{:?} is not a number", trimmed)))?;

    if percent > 100 {
        return Err(StatusError::parse(
            "battery",
            format!("{} is not a percentage", percent),
        ));
    }

    Ok(percent)
}

/// Parse the output of `dumpsys cpuinfo`.
///
/// The total sits on the second-to-last line, e.g. `12% TOTAL: 5% user + 7% kernel`,
/// the last line being the empty remainder after the trailing newline.
pub fn parse_cpu_percent(dump: &str) -> CpuUsage {
    let lines: Vec<&str> = dump.split('\n').collect();
    let Some(line) = lines.len().checked_sub(2).map(|idx| lines[idx]) else {
        return CpuUsage::Unavailable;
    };

    let before_percent = match line.find('%') {
        Some(idx) => &line[..idx],
        None => line,
    };
    let text = before_percent.trim();

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => CpuUsage::Percent {
            value,
            text: text.to_string(),
        },
        _ => CpuUsage::Unavailable,
    }
}
