use adb_statusline::core::bridge::DeviceBridge;
use adb_statusline::core::statusline::{
    BATTERY_COMMAND, CPUINFO_COMMAND, CPU_PRESENT_COMMAND, LOADAVG_COMMAND, MEMINFO_COMMAND,
};
use adb_statusline::{Result, StatusError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory stand-in for adb with a scripted device
pub struct FakeBridge {
    pub listing: String,
    pub states: HashMap<String, String>,
    pub answers: HashMap<String, String>,
    pub shell_calls: RefCell<Vec<(String, String)>>,
}

impl FakeBridge {
    /// One healthy phone called `R58M12ABCDE`
    pub fn phone() -> Self {
        let mut bridge = Self::empty();
        bridge.attach("R58M12ABCDE", "device");
        bridge
            .answer(LOADAVG_COMMAND, "0.50 0.75 1.20 1/234 5678\n")
            .answer(CPU_PRESENT_COMMAND, "0-7\n")
            .answer(
                MEMINFO_COMMAND,
                "MemTotal:        3809036 kB\nMemFree:          184320 kB\nMemAvailable:    1418804 kB\nBuffers:           98212 kB\n",
            )
            .answer(BATTERY_COMMAND, "87\n")
            .answer(
                CPUINFO_COMMAND,
                "Load: 5.26 / 5.14 / 5.1\nCPU usage from 20388ms to 5318ms ago:\n  9.2% 1391/system_server: 5.5% user + 3.6% kernel\n41% TOTAL: 27% user + 12% kernel + 0.3% iowait\n",
            );
        bridge
    }

    pub fn empty() -> Self {
        Self {
            listing: "List of devices attached\n".to_string(),
            states: HashMap::new(),
            answers: HashMap::new(),
            shell_calls: RefCell::new(Vec::new()),
        }
    }

    pub fn attach(&mut self, id: &str, state: &str) -> &mut Self {
        self.listing.push_str(&format!("{}\t{}\n", id, state));
        self.states.insert(id.to_string(), state.to_string());
        self
    }

    pub fn answer(&mut self, command: &str, output: &str) -> &mut Self {
        self.answers.insert(command.to_string(), output.to_string());
        self
    }

    pub fn commands_run(&self) -> Vec<String> {
        self.shell_calls
            .borrow()
            .iter()
            .map(|(_, command)| command.clone())
            .collect()
    }
}

impl DeviceBridge for FakeBridge {
    fn list_devices(&self) -> Result<String> {
        Ok(self.listing.clone())
    }

    fn device_state(&self, device: &str) -> Result<String> {
        self.states
            .get(device)
            .map(|state| format!("{}\n", state))
            .ok_or_else(|| StatusError::InvalidDevice(device.to_string()))
    }

    fn shell(&self, device: &str, command: &str) -> Result<String> {
        self.shell_calls
            .borrow_mut()
            .push((device.to_string(), command.to_string()));
        self.answers
            .get(command)
            .cloned()
            .ok_or_else(|| StatusError::bridge(format!("no scripted output for {}", command)))
    }
}
