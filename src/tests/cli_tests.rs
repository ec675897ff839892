//! Command line parsing tests.

use chrono::NaiveTime;
use hv_clocks::DisplayMode;

use crate::{parse_args, Options};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// No arguments leaves every option to the config file.
#[test]
fn empty_arguments_use_config() {
    let options = parse_args(args(&[])).unwrap();
    assert_eq!(options, Options::default());
}

/// Mode switches, frame limit and fixed time parse together; the last mode wins.
#[test]
fn full_argument_set() {
    let options = parse_args(args(&[
        "--analog", "--digital", "--frames", "5", "--time", "07:42:09", "--once", "--config",
        "face.toml",
    ]))
    .unwrap();
    assert_eq!(options.mode, Some(DisplayMode::Digital));
    assert_eq!(options.frames, Some(5));
    assert_eq!(options.time, NaiveTime::from_hms_opt(7, 42, 9));
    assert!(options.once);
    assert_eq!(options.config.as_deref(), Some("face.toml"));
}

/// Malformed values and unknown flags are rejected rather than ignored.
#[test]
fn rejects_bad_arguments() {
    assert!(parse_args(args(&["--frames"])).is_err());
    assert!(parse_args(args(&["--frames", "many"])).is_err());
    assert!(parse_args(args(&["--time", "25:00:00"])).is_err());
    assert!(parse_args(args(&["--stdout"])).is_err());
}

/// Asking for usage parses successfully so the binary can print it and exit cleanly.
#[test]
fn help_flag_is_not_an_error() {
    for flag in ["--help", "-h"] {
        let options = parse_args(args(&[flag])).unwrap();
        assert!(options.help, "{flag} should request usage");
    }
    assert!(!parse_args(args(&["--once"])).unwrap().help);
}
