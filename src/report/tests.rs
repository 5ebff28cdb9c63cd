use super::formatting::truncate_chars;
use super::*;
use crate::http::WebhookResponse;
use crate::metrics::{RequestResult, RequestTask, aggregate};
use chrono::Utc;
use std::time::Duration;

fn target() -> Result<Url, String> {
    Url::parse("http://localhost:5678/webhook/load-test").map_err(|err| err.to_string())
}

fn ok(id: u64, latency_ms: u64, execution_id: &str, description: &str) -> RequestResult {
    RequestResult::succeeded(
        RequestTask {
            id,
            workload_hint: Some(2),
        },
        200,
        Duration::from_millis(latency_ms),
        WebhookResponse {
            execution_id: Some(execution_id.to_owned()),
            workload_description: Some(description.to_owned()),
            ..WebhookResponse::default()
        },
        Utc::now(),
        0,
    )
}

fn failed(id: u64, latency_ms: u64, message: &str) -> RequestResult {
    RequestResult::failed(
        RequestTask {
            id,
            workload_hint: None,
        },
        0,
        Duration::from_millis(latency_ms),
        message.to_owned(),
        Utc::now(),
        0,
    )
}

#[test]
fn format_latency_picks_unit() -> Result<(), String> {
    let cases = [
        (Duration::from_micros(250), "250µs"),
        (Duration::from_millis(42), "42ms"),
        (Duration::from_millis(999), "999ms"),
        (Duration::from_millis(2_340), "2.3s"),
    ];
    for (input, expected) in cases {
        let rendered = format_latency(input);
        if rendered != expected {
            return Err(format!("{:?} rendered as {}", input, rendered));
        }
    }
    Ok(())
}

#[test]
fn format_fixed_point() -> Result<(), String> {
    if format_x100(1_234) != "12.34" || format_x100(5) != "0.05" {
        return Err("Unexpected x100 rendering".to_owned());
    }
    if format_signed_x100(1_000) != "+10.00" || format_signed_x100(-2_505) != "-25.05" {
        return Err("Unexpected signed rendering".to_owned());
    }
    Ok(())
}

#[test]
fn truncate_respects_char_boundaries() -> Result<(), String> {
    if truncate_chars("short", 28, 28) != "short" {
        return Err("Short value changed".to_owned());
    }
    let long = "é".repeat(30);
    let cut = truncate_chars(&long, 25, 22);
    if cut.chars().count() != 25 || !cut.ends_with("...") {
        return Err(format!("Unexpected truncation: {}", cut));
    }
    Ok(())
}

#[test]
fn summary_includes_rates_and_overhead() -> Result<(), String> {
    let results = vec![
        ok(1, 2_200, "exec-1", "Light workload"),
        ok(2, 2_200, "exec-2", "Light workload"),
        failed(3, 10, "HTTP request failed: connection failed"),
        failed(4, 10, "HTTP 500: boom"),
    ];
    let stats = aggregate(&results, Duration::from_secs(2));
    let lines = summary_lines(&target()?, &stats);

    let expect = [
        "Total Requests: 4",
        "Successful: 2 (50.00%)",
        "Failed: 2 (50.00%)",
        "Requests/Second: 2.00",
        "Processing Overhead: +10.00%",
    ];
    for needle in expect {
        if !lines.iter().any(|line| line == needle) {
            return Err(format!("Missing '{}' in {:?}", needle, lines));
        }
    }
    Ok(())
}

#[test]
fn summary_for_empty_batch_has_no_overhead() -> Result<(), String> {
    let stats = aggregate(&[], Duration::ZERO);
    let lines = summary_lines(&target()?, &stats);
    if !lines.iter().any(|line| line == "Failed: 0 (0.00%)") {
        return Err(format!("Unexpected lines: {:?}", lines));
    }
    if lines.iter().any(|line| line.starts_with("Processing Overhead")) {
        return Err("Unexpected overhead line".to_owned());
    }
    Ok(())
}

#[test]
fn table_is_sorted_by_latency() -> Result<(), String> {
    let results = vec![
        ok(1, 900, "slow", "Heavy"),
        failed(2, 5, "HTTP 500: boom"),
        ok(3, 300, "fast", "Light"),
    ];
    let lines = result_table_lines(&results);
    let rows: Vec<&String> = lines.iter().skip(3).collect();
    let order: Vec<&str> = rows
        .iter()
        .filter_map(|row| row.split('|').next())
        .map(str::trim)
        .collect();
    if order != vec!["2", "3", "1"] {
        return Err(format!("Unexpected order: {:?}", order));
    }
    let failed_row = rows
        .first()
        .ok_or_else(|| "Missing first row".to_owned())?;
    if !failed_row.contains("FAIL") || !failed_row.contains("N/A") {
        return Err(format!("Unexpected failed row: {}", failed_row));
    }
    Ok(())
}

#[test]
fn table_truncates_long_fields() -> Result<(), String> {
    let execution_id = "exec-1728095087123-abc123def-0000000";
    let description = "Heavy workload simulating a slow downstream service";
    let lines = result_table_lines(&[ok(1, 100, execution_id, description)]);
    let row = lines
        .get(3)
        .ok_or_else(|| "Missing row".to_owned())?;
    if !row.contains("exec-1728095087123-abc123def...") {
        return Err(format!("Execution id not truncated: {}", row));
    }
    if !row.ends_with("Heavy workload simulat...") {
        return Err(format!("Description not truncated: {}", row));
    }
    if !row.contains("2s") {
        return Err(format!("Workload missing: {}", row));
    }
    Ok(())
}

#[test]
fn error_lines_list_failures_by_id() -> Result<(), String> {
    let results = vec![
        failed(5, 1, "HTTP 502: bad gateway"),
        ok(1, 10, "a", "b"),
        failed(2, 1, "HTTP request failed: timed out"),
    ];
    let lines = error_lines(&results);
    let expected = vec![
        "Error Summary:".to_owned(),
        "   Request 2: HTTP request failed: timed out".to_owned(),
        "   Request 5: HTTP 502: bad gateway".to_owned(),
    ];
    if lines != expected {
        return Err(format!("Unexpected lines: {:?}", lines));
    }
    Ok(())
}
