use clap::CommandFactory;

use super::{parse_int, parse_width, Cli, DiagramArgs};
use crate::diagram::{raster::Scheme, Target, Width};

#[test]
fn test_command_definitions() {
    Cli::command().debug_assert();
}

#[test]
fn test_parse_width() {
    assert_eq!(parse_width("8").unwrap(), Width::W8);
    assert_eq!(parse_width("32").unwrap(), Width::W32);
    assert!(parse_width("12").is_err());
    assert!(parse_width("wide").is_err());
}

#[test]
fn test_parse_int() {
    assert_eq!(parse_int("42").unwrap(), 42);
    assert_eq!(parse_int("0x2A").unwrap(), 42);
    assert_eq!(parse_int("0X10").unwrap(), 16);
    assert!(parse_int("4x2").is_err());
    assert!(parse_int("").is_err());
}

#[test]
fn test_default_target_is_ascii() {
    let args = DiagramArgs::default();
    assert_eq!(args.targets(), vec![Target::Ascii]);
}

#[test]
fn test_all_expands_to_every_target() {
    let args = DiagramArgs {
        all: true,
        ..Default::default()
    };
    let targets = args.targets();
    assert_eq!(targets.len(), 5);
    assert_eq!(targets[0], Target::Ascii);
}

#[test]
fn test_single_scheme_flag() {
    let args = DiagramArgs {
        wob: true,
        ..Default::default()
    };
    assert_eq!(args.targets(), vec![Target::Image(Scheme::WhiteOnBlack)]);
}
