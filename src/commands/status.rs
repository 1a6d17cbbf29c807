use crate::core::bridge::{resolve_device, Adb, DeviceBridge};
use crate::core::config::Config;
use crate::core::statusline::{render_line, Metric, RenderOptions};
use crate::error::Result;
use crate::ui::gradient::{ColorChoice, ColorProfile};
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::debug;
use std::path::PathBuf;

const ABOUT: &str = "A statusline to display android phone info for shell and tmux via adb";

/// Build the command line interface.
pub fn command() -> Command {
    Command::new("adb-statusline")
        .version(env!("CARGO_PKG_VERSION"))
        .about(ABOUT)
        .after_help("At least 1 \"ACTION\" is required!")
        .arg(
            Arg::new("specific")
                .short('s')
                .long("specific")
                .value_name("DEVICE")
                .help("Use a specific device, otherwise, use the first"),
        )
        .arg(
            Arg::new("color")
                .short('C')
                .long("color")
                .value_name("COLOR")
                .num_args(0..=1)
                .default_missing_value("ANSI")
                .ignore_case(true)
                .value_parser(ColorChoice::NAMES)
                .help("Chose color from ANSI, TMUX, or NONE [default: ANSI]"),
        )
        .arg(action_arg(Metric::Load, 'l', "ACTION - Display load average"))
        .arg(action_arg(
            Metric::Memory,
            'm',
            "ACTION - Display memory usage, in megabytes",
        ))
        .arg(action_arg(
            Metric::Battery,
            'b',
            "ACTION - Display battery percentage",
        ))
        .arg(action_arg(
            Metric::Cpu,
            'c',
            "ACTION - Display cpu usage percentage",
        ))
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Read defaults from FILE instead of the user config"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more to stderr (repeat for more detail)"),
        )
}

// Action flags append their own name on every occurrence so that the order
// of the flags survives parsing; `-lmb` style clusters still work because
// a value is only taken after `=`.
fn action_arg(metric: Metric, short: char, help: &'static str) -> Arg {
    Arg::new(metric.flag())
        .short(short)
        .long(metric.flag())
        .help(help)
        .action(ArgAction::Append)
        .num_args(0..=1)
        .require_equals(true)
        .default_missing_value(metric.flag())
        .value_parser([metric.flag()])
        .hide_possible_values(true)
}

/// Metrics in the order their flags appeared, repeats included.
pub fn requested_metrics(matches: &ArgMatches) -> Vec<Metric> {
    let mut ordered: Vec<(usize, Metric)> = Vec::new();
    for metric in Metric::ALL {
        if let Some(indices) = matches.indices_of(metric.flag()) {
            ordered.extend(indices.map(|idx| (idx, metric)));
        }
    }

    ordered.sort_by_key(|(idx, _)| *idx);
    ordered.into_iter().map(|(_, metric)| metric).collect()
}

/// Everything one invocation asked for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusRequest {
    pub metrics: Vec<Metric>,
    pub device: Option<String>,
    pub color: Option<ColorChoice>,
    pub config_path: Option<PathBuf>,
}

impl StatusRequest {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let color = matches
            .get_one::<String>("color")
            .map(|name| name.parse::<ColorChoice>())
            .transpose()?;

        Ok(Self {
            metrics: requested_metrics(matches),
            device: matches.get_one::<String>("specific").cloned(),
            color,
            config_path: matches.get_one::<PathBuf>("config").cloned(),
        })
    }
}

/// Resolve the device and render the line for `request`.
pub fn run<B: DeviceBridge + ?Sized>(
    request: &StatusRequest,
    config: &Config,
    bridge: &B,
) -> Result<String> {
    let specific = request.device.as_deref().or(config.device.as_deref());
    let device = resolve_device(bridge, specific)?;

    let choice = request.color.or(config.color).unwrap_or_default();
    debug!("Rendering {:?} for {} with {} colors", request.metrics, device, choice);

    let profile = ColorProfile::new(choice);
    render_line(
        &request.metrics,
        bridge,
        &device,
        &profile,
        &RenderOptions::from(config),
    )
}

pub fn execute(matches: &ArgMatches) -> anyhow::Result<()> {
    let request = StatusRequest::from_matches(matches)?;
    let config = Config::load(request.config_path.as_deref())
        .context("Could not load adb-statusline settings")?;
    let adb = Adb::locate(config.adb_path.as_deref())?;

    let line = run(&request, &config, &adb)?;
    println!("{}", line);

    Ok(())
}
