// Integration tests: the converter driven through the public API the way a
// script host embeds it, with saves and errors observed only via the host

use chrono::TimeZone;
use epochtime_core::{
    FORMAT_ERROR_MESSAGE, FixedZone, ParamStore, ScriptHost, TimestampConverter, TimezonePolicy,
    TzZone, human_epoch_time,
};

// Host that records every call in order, to check "exactly one effect"
#[derive(Default)]
struct RecordingHost {
    calls: Vec<(String, String)>,
}

impl ScriptHost for RecordingHost {
    fn save_string(&mut self, value: &str, param: &str) {
        self.calls.push(("save".to_string(), format!("{}={}", param, value)));
    }

    fn error_message(&mut self, message: &str) {
        self.calls.push(("error".to_string(), message.to_string()));
    }
}

fn utc_converter() -> TimestampConverter {
    TimestampConverter::with_zone(Box::new(FixedZone::utc()))
}

#[test]
fn test_spec_example_pinned_to_plus_two() {
    let converter = TimestampConverter::new("+02:00".parse().unwrap()).unwrap();
    let mut host = ParamStore::new();

    converter.convert(&mut host, "2017-07-17 10:00:00", "epochVar");

    assert_eq!(host.get("epochVar"), Some("1500278400"));
}

#[test]
fn test_published_value_matches_reference_in_fixed_zones() {
    let samples = [
        ("1970-01-01 00:00:00", 1970, 1, 1, 0, 0, 0),
        ("2000-02-29 12:34:56", 2000, 2, 29, 12, 34, 56),
        ("2017-07-17 10:00:00", 2017, 7, 17, 10, 0, 0),
        ("2038-01-19 03:14:08", 2038, 1, 19, 3, 14, 8),
        ("2099-12-31 23:59:59", 2099, 12, 31, 23, 59, 59),
    ];

    for minutes in [-720, -330, 0, 120, 180, 840] {
        let converter = TimestampConverter::new(TimezonePolicy::Fixed(minutes)).unwrap();
        let offset = chrono::FixedOffset::east_opt(minutes * 60).unwrap();

        for (input, y, mo, d, h, mi, s) in samples {
            let mut host = ParamStore::new();
            converter.convert(&mut host, input, "p");

            let expected = offset
                .with_ymd_and_hms(y, mo, d, h, mi, s)
                .unwrap()
                .timestamp();
            let published: i64 = host.get("p").unwrap().parse().unwrap();
            assert_eq!(published, expected, "input {} at offset {}", input, minutes);
        }
    }
}

fn berlin_converter() -> TimestampConverter {
    TimestampConverter::with_zone(Box::new(TzZone::new(chrono_tz::Europe::Berlin)))
}

#[test]
fn test_named_zone_matches_mktime_values() {
    // Reference values from sscanf + mktime with TZ=Europe/Berlin
    let cases = [
        ("2017-07-17 10:00:00", "1500278400"), // CEST
        ("2017-01-17 10:00:00", "1484643600"), // CET
        ("2017-03-26 01:59:59", "1490489999"), // last second before the gap
        ("2017-03-26 03:00:00", "1490490000"), // first second after the gap
    ];

    for (input, expected) in cases {
        let mut host = RecordingHost::default();
        berlin_converter().convert(&mut host, input, "p");
        assert_eq!(
            host.calls,
            vec![("save".to_string(), format!("p={}", expected))],
            "input {}",
            input
        );
    }
}

#[test]
fn test_spring_forward_gap_publishes_once() {
    let mut host = RecordingHost::default();
    berlin_converter().convert(&mut host, "2017-03-26 02:30:00", "epochVar");

    assert_eq!(
        host.calls,
        vec![("save".to_string(), "epochVar=1490491800".to_string())]
    );
}

#[test]
fn test_fall_back_publishes_standard_time() {
    let mut host = RecordingHost::default();
    berlin_converter().convert(&mut host, "2017-10-29 02:30:00", "epochVar");

    // CET reading (01:30Z), not the earlier CEST reading (00:30Z, 1509237000)
    assert_eq!(
        host.calls,
        vec![("save".to_string(), "epochVar=1509240600".to_string())]
    );
}

#[test]
fn test_missing_components_report_once_and_publish_nothing() {
    for input in ["2017-07-17", "not a date", "", "badinput", "2017-07-17 10:00"] {
        let mut host = RecordingHost::default();
        utc_converter().convert(&mut host, input, "epochVar");

        assert_eq!(
            host.calls,
            vec![("error".to_string(), FORMAT_ERROR_MESSAGE.to_string())],
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_valid_input_saves_exactly_once() {
    let mut host = RecordingHost::default();
    utc_converter().convert(&mut host, "2020-02-29 00:00:00", "leap");

    assert_eq!(host.calls, vec![("save".to_string(), "leap=1582934400".to_string())]);
}

#[test]
fn test_non_leap_february_29_normalizes_to_march_first() {
    let converter = utc_converter();
    assert_eq!(
        converter.to_epoch("2019-02-29 00:00:00"),
        converter.to_epoch("2019-03-01 00:00:00")
    );
}

#[test]
fn test_failed_call_keeps_previous_value() {
    let converter = utc_converter();
    let mut host = ParamStore::new();

    converter.convert(&mut host, "1970-01-02 00:00:00", "epochVar");
    converter.convert(&mut host, "garbage", "epochVar");

    assert_eq!(host.get("epochVar"), Some("86400"));
    assert_eq!(host.errors().len(), 1);
}

#[test]
fn test_dynamic_host() {
    let converter = utc_converter();
    let mut store = ParamStore::new();
    let host: &mut dyn ScriptHost = &mut store;

    converter.convert(host, "1970-01-01 01:00:00", "hour");

    assert_eq!(store.get("hour"), Some("3600"));
}

#[test]
fn test_saved_values_feed_later_script_steps() {
    let converter = utc_converter();
    let mut host = ParamStore::new();

    converter.convert(&mut host, "2017-07-17 00:00:00", "from");
    converter.convert(&mut host, "2017-07-18 00:00:00", "to");

    assert_eq!(
        host.eval_string("range={from}..{to}"),
        "range=1500249600..1500336000"
    );
}

#[test]
fn test_human_epoch_time_uses_local_zone() {
    let mut host = RecordingHost::default();
    human_epoch_time(&mut host, "2017-07-17 10:00:00", "epochVar");

    assert_eq!(host.calls.len(), 1);
    let (kind, saved) = &host.calls[0];
    assert_eq!(kind, "save");

    // Same fields read as UTC give 1500285600; real zones lie within -12h..+14h
    let epoch: i64 = saved.strip_prefix("epochVar=").unwrap().parse().unwrap();
    let utc = 1_500_285_600;
    assert!(epoch >= utc - 14 * 3_600 && epoch <= utc + 12 * 3_600, "got {}", epoch);
}
