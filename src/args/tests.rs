use super::*;
use clap::Parser;
use std::time::Duration;

#[test]
fn parse_positional_count() -> Result<(), String> {
    let args = LoadTestArgs::try_parse_from(["hookburst", "12", "-u", "http://localhost"])
        .map_err(|err| format!("Expected parse success: {}", err))?;
    if args.requested() != 12 {
        return Err(format!("Unexpected count: {}", args.requested()));
    }
    if args.url.as_deref() != Some("http://localhost") {
        return Err("Unexpected url".to_owned());
    }
    Ok(())
}

#[test]
fn parse_rejects_zero_count() -> Result<(), String> {
    if LoadTestArgs::try_parse_from(["hookburst", "0"]).is_ok() {
        return Err("Expected zero to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn parse_rejects_non_numeric_count() -> Result<(), String> {
    if LoadTestArgs::try_parse_from(["hookburst", "ten"]).is_ok() {
        return Err("Expected non-numeric count to be rejected".to_owned());
    }
    if LoadTestArgs::try_parse_from(["hookburst", "-3"]).is_ok() {
        return Err("Expected negative count to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn parse_requires_count() -> Result<(), String> {
    match LoadTestArgs::try_parse_from(["hookburst"]) {
        Ok(_) => Err("Expected missing count to fail".to_owned()),
        Err(err) if err.kind() == clap::error::ErrorKind::MissingRequiredArgument => Ok(()),
        Err(err) => Err(format!("Unexpected error kind: {:?}", err.kind())),
    }
}

#[test]
fn workload_defaults_to_one_through_five() -> Result<(), String> {
    let args = LoadTestArgs::try_parse_from(["hookburst", "3"])
        .map_err(|err| format!("Expected parse success: {}", err))?;
    let range = args
        .workload_range()
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "Expected a workload range".to_owned())?;
    if range.as_range() != (1..=5) {
        return Err(format!("Unexpected range: {:?}", range));
    }
    Ok(())
}

#[test]
fn no_workload_disables_hints() -> Result<(), String> {
    let args = LoadTestArgs::try_parse_from(["hookburst", "3", "--no-workload"])
        .map_err(|err| format!("Expected parse success: {}", err))?;
    if args.workload_range().map_err(|err| err.to_string())?.is_some() {
        return Err("Expected hints to be disabled".to_owned());
    }
    Ok(())
}

#[test]
fn inverted_workload_range_is_rejected() -> Result<(), String> {
    let args = LoadTestArgs::try_parse_from([
        "hookburst",
        "3",
        "--workload-min",
        "9",
        "--workload-max",
        "2",
    ])
    .map_err(|err| format!("Expected parse success: {}", err))?;
    if args.workload_range().is_ok() {
        return Err("Expected inverted range error".to_owned());
    }
    Ok(())
}

#[test]
fn timeout_accepts_units() -> Result<(), String> {
    let args = LoadTestArgs::try_parse_from(["hookburst", "1", "--timeout", "250ms"])
        .map_err(|err| format!("Expected parse success: {}", err))?;
    if args.request_timeout != Some(Duration::from_millis(250)) {
        return Err(format!("Unexpected timeout: {:?}", args.request_timeout));
    }
    Ok(())
}

#[test]
fn parse_duration_variants() -> Result<(), String> {
    let cases = [
        ("15", Duration::from_secs(15)),
        ("15s", Duration::from_secs(15)),
        ("1500ms", Duration::from_millis(1500)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_arg(input).map_err(|err| err.to_string())?;
        if parsed != expected {
            return Err(format!("{} parsed as {:?}", input, parsed));
        }
    }
    for bad in ["", "ms", "0s", "5d"] {
        if parse_duration_arg(bad).is_ok() {
            return Err(format!("Expected '{}' to be rejected", bad));
        }
    }
    Ok(())
}
