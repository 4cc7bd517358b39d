// Human timestamp to epoch seconds, published to a script host
//
// Each call has exactly one effect on the host: the epoch value is saved
// under the requested parameter, or a diagnostic goes to the error channel.

use log::{debug, warn};

use crate::error::ConvertError;
use crate::host::ScriptHost;
use crate::scan::scan_calendar;
use crate::zone::{LocalZone, TimezonePolicy, ZoneConversion};

/// Diagnostic sent to the host when the input does not scan
pub const FORMAT_ERROR_MESSAGE: &str = "Error in format\n YYYY-MM-DD HH:MM:SS \n";

pub struct TimestampConverter {
    zone: Box<dyn ZoneConversion>,
}

impl TimestampConverter {
    pub fn new(policy: TimezonePolicy) -> Result<Self, ConvertError> {
        Ok(Self::with_zone(policy.build()?))
    }

    pub fn with_zone(zone: Box<dyn ZoneConversion>) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> &dyn ZoneConversion {
        self.zone.as_ref()
    }

    /// Scan `human_time` and convert it to epoch seconds in this converter's zone.
    pub fn to_epoch(&self, human_time: &str) -> Result<i64, ConvertError> {
        let calendar = scan_calendar(human_time)?;
        let local = calendar.normalize()?;
        self.zone.to_epoch(local)
    }

    /// Convert `human_time` and save the result under `param`.
    ///
    /// Failures never propagate: a format mismatch reports
    /// [`FORMAT_ERROR_MESSAGE`], any other failure reports its own message,
    /// and in both cases nothing is saved.
    pub fn convert<H: ScriptHost + ?Sized>(&self, host: &mut H, human_time: &str, param: &str) {
        match self.to_epoch(human_time) {
            Ok(epoch) => {
                let value = epoch.to_string();
                debug!(
                    "{:?} -> {} = {} ({})",
                    human_time,
                    param,
                    value,
                    self.zone.describe()
                );
                host.save_string(&value, param);
            }
            Err(err @ ConvertError::FormatMismatch { .. }) => {
                warn!("{:?}: {}", human_time, err);
                host.error_message(FORMAT_ERROR_MESSAGE);
            }
            Err(err) => {
                warn!("{:?}: {}", human_time, err);
                host.error_message(&err.to_string());
            }
        }
    }
}

impl Default for TimestampConverter {
    fn default() -> Self {
        Self::with_zone(Box::new(LocalZone::new()))
    }
}

/// Convert in platform local time and save the result under `param`.
///
/// ```
/// use epochtime_core::{human_epoch_time, ParamStore};
///
/// let mut host = ParamStore::new();
/// human_epoch_time(&mut host, "badinput", "epochVar");
/// assert_eq!(host.get("epochVar"), None);
/// assert_eq!(host.errors().len(), 1);
/// ```
pub fn human_epoch_time<H: ScriptHost + ?Sized>(host: &mut H, human_time: &str, param: &str) {
    TimestampConverter::default().convert(host, human_time, param)
}
