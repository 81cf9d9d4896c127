//! Host shell adapter
//!
//! findash can run embedded in a host that supplies theme colours and
//! receives haptic and alert calls, or standalone. The host is detected once
//! at startup with [`detect`] and used as a `Box<dyn HostShell>`.

pub mod theme;

use std::io::Write;
use std::sync::Mutex;

pub use theme::{Theme, ThemeParams};

/// Environment variable carrying the host's theme parameters as JSON
pub const HOST_THEME_ENV: &str = "FINDASH_HOST_THEME";

/// Feedback kinds a host may render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticKind {
    Light,
    Medium,
    Heavy,
    Selection,
    Success,
    Warning,
    Error,
}

impl HapticKind {
    /// Notification-type feedback, as opposed to impact or selection
    pub fn is_notification(&self) -> bool {
        matches!(self, Self::Success | Self::Warning | Self::Error)
    }
}

/// Capabilities of the environment the app runs in
pub trait HostShell: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_embedded(&self) -> bool;

    fn theme(&self) -> Theme;

    fn haptic(&self, kind: HapticKind);

    fn alert(&self, message: &str);

    /// Alerts raised since the last call, for hosts that queue them
    fn take_alerts(&self) -> Vec<String> {
        Vec::new()
    }
}

/// A host that supplied theme parameters
#[derive(Debug)]
pub struct EmbeddedHost {
    theme: Theme,
    alerts: Mutex<Vec<String>>,
}

impl EmbeddedHost {
    pub fn new(params: &ThemeParams) -> Self {
        Self {
            theme: Theme::from_params(params),
            alerts: Mutex::new(Vec::new()),
        }
    }
}

impl HostShell for EmbeddedHost {
    fn name(&self) -> &'static str {
        "embedded"
    }

    fn is_embedded(&self) -> bool {
        true
    }

    fn theme(&self) -> Theme {
        self.theme
    }

    fn haptic(&self, kind: HapticKind) {
        if kind.is_notification() {
            let mut stdout = std::io::stdout();
            let _ = stdout.write_all(b"\x07").and_then(|_| stdout.flush());
        } else {
            tracing::debug!(?kind, "haptic feedback");
        }
    }

    fn alert(&self, message: &str) {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(message.to_string());
        }
    }

    fn take_alerts(&self) -> Vec<String> {
        self.alerts
            .lock()
            .map(|mut alerts| std::mem::take(&mut *alerts))
            .unwrap_or_default()
    }
}

/// Plain terminal with no host
#[derive(Debug, Default)]
pub struct StandaloneHost;

impl HostShell for StandaloneHost {
    fn name(&self) -> &'static str {
        "standalone"
    }

    fn is_embedded(&self) -> bool {
        false
    }

    fn theme(&self) -> Theme {
        Theme::dark()
    }

    fn haptic(&self, _kind: HapticKind) {}

    fn alert(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Pick the host from the environment
pub fn detect() -> Box<dyn HostShell> {
    detect_from(std::env::var(HOST_THEME_ENV).ok().as_deref())
}

/// Pick the host from a theme-params JSON value
pub fn detect_from(theme_json: Option<&str>) -> Box<dyn HostShell> {
    let Some(raw) = theme_json.map(str::trim).filter(|s| !s.is_empty()) else {
        return Box::new(StandaloneHost);
    };

    match serde_json::from_str::<ThemeParams>(raw) {
        Ok(params) => {
            tracing::debug!("embedded host detected");
            Box::new(EmbeddedHost::new(&params))
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring invalid {}", HOST_THEME_ENV);
            Box::new(StandaloneHost)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_detect_standalone() {
        let host = detect_from(None);
        assert!(!host.is_embedded());
        assert_eq!(host.name(), "standalone");
        assert_eq!(host.theme(), Theme::dark());

        assert!(!detect_from(Some("  ")).is_embedded());
        assert!(!detect_from(Some("not json")).is_embedded());
    }

    #[test]
    fn test_detect_embedded() {
        let host = detect_from(Some(r##"{"bg_color": "#000000", "text_color": "#ffffff"}"##));
        assert!(host.is_embedded());
        assert_eq!(host.theme().text, Color::Rgb(255, 255, 255));
        assert!(host.theme().is_dark());
    }

    #[test]
    fn test_embedded_alerts_are_queued() {
        let host = EmbeddedHost::new(&ThemeParams::default());
        host.alert("first");
        host.alert("second");
        assert_eq!(host.take_alerts(), vec!["first", "second"]);
        assert!(host.take_alerts().is_empty());
    }

    #[test]
    fn test_haptic_kinds() {
        assert!(HapticKind::Error.is_notification());
        assert!(!HapticKind::Selection.is_notification());
        StandaloneHost.haptic(HapticKind::Success);
    }
}
