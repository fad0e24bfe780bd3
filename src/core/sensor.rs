//! Office presence detection.
//!
//! A [`Sensor`] lists the wireless networks currently visible; the
//! [`OfficeDetector`] decides whether the office network is among them.

use crate::errors::{AppError, AppResult};
use std::collections::HashSet;
use std::process::Command;
use std::sync::Arc;
use tracing::debug;

/// Anything able to report visible Wi-Fi network names, lowercased.
#[cfg_attr(test, mockall::automock)]
pub trait Sensor: Send + Sync {
    fn visible_networks(&self) -> AppResult<HashSet<String>>;
}

pub const AIRPORT_PATH: &str =
    "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport";

/// Keeps the SSID column of `airport -s`. Names are right-aligned and may
/// contain spaces, so everything before the BSSID is taken.
pub const AIRPORT_SSID_FILTER: &str =
    r"sed -nE '1d; s/^ *(.*[^ ]) +([0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2} .*$/\1/p'";

/// Platform scan command used when none is configured.
pub fn default_scan_command() -> String {
    if cfg!(target_os = "windows") {
        "netsh wlan show networks".to_string()
    } else if cfg!(target_os = "macos") {
        format!("{AIRPORT_PATH} -s | {AIRPORT_SSID_FILTER}")
    } else {
        "nmcli -t -f SSID dev wifi list".to_string()
    }
}

/// Runs a shell command and reads one network per output line.
pub struct CommandSensor {
    command: String,
}

impl CommandSensor {
    pub fn new(command: Option<&str>) -> Self {
        Self {
            command: command.map_or_else(default_scan_command, str::to_string),
        }
    }

    fn shell(&self) -> Command {
        if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.command);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.command);
            c
        }
    }
}

impl Sensor for CommandSensor {
    fn visible_networks(&self) -> AppResult<HashSet<String>> {
        debug!(command = %self.command, "Scanning Wi-Fi networks");

        let output = self.shell().output().map_err(|e| {
            AppError::SensorUnavailable(format!("cannot run '{}': {e}", self.command))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::SensorUnavailable(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        Ok(parse_scan_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Extract network names from scan output.
///
/// Understands `netsh wlan show networks` (`SSID 1 : Name` lines), terse
/// `nmcli` output (`\:` escapes) and plain one-name-per-line lists.
pub fn parse_scan_output(text: &str) -> HashSet<String> {
    let netsh = text.lines().any(|l| l.trim_start().starts_with("SSID "));

    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            if netsh {
                if !line.starts_with("SSID ") {
                    return None;
                }
                line.split_once(':').map(|(_, name)| name.trim().to_string())
            } else {
                Some(line.replace("\\:", ":"))
            }
        })
        .filter(|name| !name.is_empty() && name != "--")
        .map(|name| name.to_lowercase())
        .collect()
}

/// Matches the configured office network against a sensor's scan.
#[derive(Clone)]
pub struct OfficeDetector {
    sensor: Arc<dyn Sensor>,
    office_ssid: String,
}

impl OfficeDetector {
    pub fn new(sensor: Arc<dyn Sensor>, office_ssid: &str) -> Self {
        Self {
            sensor,
            office_ssid: office_ssid.trim().to_lowercase(),
        }
    }

    pub fn office_ssid(&self) -> &str {
        &self.office_ssid
    }

    /// Blocking: may take as long as the underlying scan.
    pub fn office_visible(&self) -> AppResult<bool> {
        if self.office_ssid.is_empty() {
            return Err(AppError::SensorUnavailable(
                "no office network configured".into(),
            ));
        }
        let networks = self.sensor.visible_networks()?;
        debug!(count = networks.len(), "Networks visible");
        Ok(networks.contains(&self.office_ssid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_plain_lines() {
        let out = parse_scan_output("CorpNet\n\nHome-5G\n--\nCafe\\:Guest\n");
        assert_eq!(out, set(&["corpnet", "home-5g", "cafe:guest"]));
    }

    #[test]
    fn parses_netsh_output() {
        let out = parse_scan_output(
            "Interface name : Wi-Fi\nThere are 2 networks currently visible.\n\n\
             SSID 1 : CorpNet\n    Network type            : Infrastructure\n\
             SSID 2 : Neighbour WiFi\n    Authentication          : WPA2-Personal\n",
        );
        assert_eq!(out, set(&["corpnet", "neighbour wifi"]));
    }

    #[test]
    fn office_match_is_case_insensitive() {
        let mut sensor = MockSensor::new();
        sensor
            .expect_visible_networks()
            .times(1)
            .returning(|| Ok(set(&["corpnet", "other"])));

        let detector = OfficeDetector::new(Arc::new(sensor), "  CorpNet ");
        assert!(detector.office_visible().unwrap());
    }

    #[test]
    fn missing_office_network_is_not_visible() {
        let mut sensor = MockSensor::new();
        sensor
            .expect_visible_networks()
            .returning(|| Ok(set(&["other"])));

        let detector = OfficeDetector::new(Arc::new(sensor), "CorpNet");
        assert!(!detector.office_visible().unwrap());
    }

    #[test]
    fn empty_ssid_never_scans() {
        let mut sensor = MockSensor::new();
        sensor.expect_visible_networks().times(0);

        let detector = OfficeDetector::new(Arc::new(sensor), "");
        assert!(matches!(
            detector.office_visible(),
            Err(AppError::SensorUnavailable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn command_sensor_reads_stdout() {
        let sensor = CommandSensor::new(Some("printf 'CorpNet\\nOther\\n'"));
        assert_eq!(sensor.visible_networks().unwrap(), set(&["corpnet", "other"]));
    }

    #[cfg(unix)]
    #[test]
    fn airport_filter_keeps_names_with_spaces() {
        let listing = "                            SSID BSSID             RSSI CHANNEL HT CC SECURITY\\n\
                       Corp Net 00:11:22:33:44:55 -61  36      Y  US WPA2(PSK/AES/AES)\\n\
                        Home-5G a0:b1:c2:d3:e4:f5 -70  11      Y  -- WPA2(PSK/AES/AES)\\n";
        let sensor = CommandSensor::new(Some(&format!(
            "printf '{listing}' | {AIRPORT_SSID_FILTER}"
        )));
        assert_eq!(sensor.visible_networks().unwrap(), set(&["corp net", "home-5g"]));
    }

    #[test]
    fn default_command_matches_platform() {
        let cmd = default_scan_command();
        if cfg!(target_os = "macos") {
            assert!(cmd.starts_with(AIRPORT_PATH));
            assert!(cmd.ends_with(AIRPORT_SSID_FILTER));
        } else {
            assert!(!cmd.contains("awk"));
        }
    }

    #[cfg(unix)]
    #[test]
    fn command_sensor_failure_is_sensor_unavailable() {
        let sensor = CommandSensor::new(Some("exit 3"));
        assert!(matches!(
            sensor.visible_networks(),
            Err(AppError::SensorUnavailable(_))
        ));
    }
}
