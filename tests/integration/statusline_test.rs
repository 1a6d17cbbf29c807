use super::fake_bridge::FakeBridge;
use adb_statusline::commands::status::{run, StatusRequest};
use adb_statusline::core::statusline::{
    get_memory, render_line, Metric, RenderOptions, BATTERY_COMMAND, CPUINFO_COMMAND,
    MEMINFO_COMMAND,
};
use adb_statusline::ui::{ColorChoice, ColorProfile};
use adb_statusline::{Config, StatusError};

fn request(metrics: &[Metric]) -> StatusRequest {
    StatusRequest {
        metrics: metrics.to_vec(),
        color: Some(ColorChoice::None),
        ..Default::default()
    }
}

#[test]
fn test_full_plain_line() {
    let bridge = FakeBridge::phone();
    let line = run(&request(&Metric::ALL), &Config::default(), &bridge).unwrap();
    assert_eq!(line, "0.50 0.75 1.20 3624/3809 87% 41%");
}

#[test]
fn test_order_follows_request_and_duplicates_are_reused() {
    let bridge = FakeBridge::phone();
    let metrics = [Metric::Cpu, Metric::Battery, Metric::Cpu, Metric::Battery];
    let line = run(&request(&metrics), &Config::default(), &bridge).unwrap();

    assert_eq!(line, "41% 87% 41% 87%");
    assert_eq!(bridge.commands_run(), vec![CPUINFO_COMMAND, BATTERY_COMMAND]);
}

#[test]
fn test_first_ready_device_is_used() {
    let mut bridge = FakeBridge::phone();
    bridge.attach("emulator-5554", "device");

    run(&request(&[Metric::Battery]), &Config::default(), &bridge).unwrap();

    let calls = bridge.shell_calls.borrow();
    assert_eq!(calls[0].0, "R58M12ABCDE");
}

#[test]
fn test_specific_device_wins_over_config() {
    let mut bridge = FakeBridge::phone();
    bridge.attach("emulator-5554", "device");

    let config = Config {
        device: Some("R58M12ABCDE".to_string()),
        ..Default::default()
    };
    let mut req = request(&[Metric::Battery]);
    req.device = Some("emulator-5554".to_string());

    run(&req, &config, &bridge).unwrap();
    assert_eq!(bridge.shell_calls.borrow()[0].0, "emulator-5554");
}

#[test]
fn test_no_device_attached() {
    let bridge = FakeBridge::empty();
    let err = run(&request(&[Metric::Load]), &Config::default(), &bridge).unwrap_err();
    assert!(matches!(err, StatusError::NoDevice));
    assert_eq!(err.exit_code(), adb_statusline::error::EXIT_NO_DEVICE);
}

#[test]
fn test_offline_only_counts_as_no_device() {
    let mut bridge = FakeBridge::empty();
    bridge.attach("emulator-5554", "offline");
    let err = run(&request(&[Metric::Load]), &Config::default(), &bridge).unwrap_err();
    assert!(matches!(err, StatusError::NoDevice));
}

#[test]
fn test_unknown_specific_device_is_invalid() {
    let bridge = FakeBridge::phone();
    let mut req = request(&[Metric::Memory]);
    req.device = Some("not-a-phone".to_string());

    let err = run(&req, &Config::default(), &bridge).unwrap_err();
    assert!(matches!(err, StatusError::InvalidDevice(ref id) if id == "not-a-phone"));
    assert!(bridge.commands_run().is_empty());
}

#[test]
fn test_config_color_used_when_flag_absent() {
    let bridge = FakeBridge::phone();
    let config = Config {
        color: Some(ColorChoice::Tmux),
        ..Default::default()
    };
    let req = StatusRequest {
        metrics: vec![Metric::Battery],
        ..Default::default()
    };

    let line = run(&req, &config, &bridge).unwrap();
    assert_eq!(line, "#[fg=colour46]#[bold]87#[none fg=default]%");
}

#[test]
fn test_default_color_is_ansi() {
    let bridge = FakeBridge::phone();
    let req = StatusRequest {
        metrics: vec![Metric::Battery],
        ..Default::default()
    };

    let line = run(&req, &Config::default(), &bridge).unwrap();
    assert_eq!(line, "\x1b[38;5;46m\x1b[1m87\x1b[0m%");
}

#[test]
fn test_garbled_cpu_shows_placeholder_and_keeps_going() {
    let mut bridge = FakeBridge::phone();
    bridge.answer(CPUINFO_COMMAND, "Can't find service: cpuinfo\n");

    let line = run(
        &request(&[Metric::Cpu, Metric::Battery]),
        &Config::default(),
        &bridge,
    )
    .unwrap();
    assert_eq!(line, "X 87%");
}

#[test]
fn test_malformed_memory_aborts_the_line() {
    let mut bridge = FakeBridge::phone();
    bridge.answer(MEMINFO_COMMAND, "permission denied\n");

    let err = run(
        &request(&[Metric::Battery, Metric::Memory]),
        &Config::default(),
        &bridge,
    )
    .unwrap_err();
    assert!(matches!(err, StatusError::Parse { metric: "memory", .. }));
}

#[test]
fn test_zero_total_memory_is_an_invalid_maximum() {
    let mut bridge = FakeBridge::phone();
    bridge.answer(MEMINFO_COMMAND, "MemTotal: 900 kB\nMemFree: 100 kB\n");

    let err = get_memory(&bridge, "R58M12ABCDE", &ColorProfile::plain()).unwrap_err();
    assert!(matches!(err, StatusError::InvalidMaximum(_)));
}

#[test]
fn test_load_multiplier_from_config() {
    let mut bridge = FakeBridge::phone();
    bridge.answer(
        adb_statusline::core::statusline::LOADAVG_COMMAND,
        "8.00 8.00 8.00 1/1 1\n",
    );

    // 8 cores: x3 puts 8.00 at 66% (HighLow), x1 puts it at 0% (LowLow).
    let relaxed = render_line(
        &[Metric::Load],
        &bridge,
        "R58M12ABCDE",
        &ColorProfile::tmux(),
        &RenderOptions::default(),
    )
    .unwrap();
    assert!(relaxed.starts_with("#[fg=colour28]"));

    let strict = render_line(
        &[Metric::Load],
        &bridge,
        "R58M12ABCDE",
        &ColorProfile::tmux(),
        &RenderOptions {
            load_core_multiplier: 1,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(strict.starts_with("#[fg=colour196]"));
}
