//! End-to-end integration tests
//!
//! These tests validate the complete fetch, index and query pipeline using
//! saved explorer responses. Each test:
//! 1. Reads input.json (an explorer envelope) from a fixture directory
//! 2. Indexes the batch and answers the query given by the test case
//! 3. Writes the JSON output to a temporary file
//! 4. Compares the parsed output with expected.json
//!
//! Test fixtures are located in tests/fixtures/ and cover:
//! - Sender, recipient and sender-and-recipient filters
//! - Value thresholds, including values beyond 64 bits
//! - Malformed stored values (skipped, not fatal)
//! - Pagination windows and offsets past the end
//! - Empty and rejected upstream responses
//!
//! Each fixture is run twice: once in one-shot mode and once in watch mode
//! capped at a single refresh.

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::NamedTempFile;
    use transfer_index::cli::ModeType;
    use transfer_index::io::{FileSource, OutputFormat};
    use transfer_index::strategy::{create_strategy, WatchConfig};
    use transfer_index::types::{IndexError, QueryFilter};

    /// Query parameters for a fixture, as raw strings
    #[derive(Debug, Default, Clone, Copy)]
    struct Params {
        from: Option<&'static str>,
        to: Option<&'static str>,
        above_value: Option<&'static str>,
        offset: Option<&'static str>,
        limit: Option<&'static str>,
        /// Result order across value buckets is not defined
        unordered: bool,
    }

    impl Params {
        fn filter(&self) -> QueryFilter {
            QueryFilter::from_params(
                self.from,
                self.to,
                self.above_value,
                self.offset,
                self.limit,
            )
        }
    }

    fn single_refresh_config() -> WatchConfig {
        WatchConfig::new(Duration::from_millis(10), 2, Some(1))
    }

    fn by_hash(value: Value) -> Value {
        let mut items = value.as_array().cloned().expect("expected a JSON array");
        items.sort_by(|a, b| a["hash"].as_str().cmp(&b["hash"].as_str()));
        Value::Array(items)
    }

    /// Run a test fixture by querying input.json and comparing with expected.json
    ///
    /// # Panics
    ///
    /// Panics if:
    /// - Input or expected files cannot be read
    /// - Output doesn't match expected (after optional reordering)
    fn run_test_fixture(fixture_name: &str, params: Params, mode: ModeType) {
        let fixture_dir = format!("tests/fixtures/{}", fixture_name);
        let input_path = format!("{}/input.json", fixture_dir);
        let expected_path = format!("{}/expected.json", fixture_dir);

        assert!(
            Path::new(&input_path).exists(),
            "Input file not found: {}",
            input_path
        );
        assert!(
            Path::new(&expected_path).exists(),
            "Expected file not found: {}",
            expected_path
        );

        let config = matches!(mode, ModeType::Watch).then(single_refresh_config);
        let strategy = create_strategy(mode, config);

        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");
        strategy
            .run(
                Arc::new(FileSource::new(&input_path)),
                &params.filter(),
                OutputFormat::Json,
                &mut temp_output,
            )
            .unwrap_or_else(|e| panic!("Failed to answer query: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        let mut actual: Value = serde_json::from_str(&actual_output)
            .unwrap_or_else(|e| panic!("Output is not JSON ({}):\n{}", e, actual_output));
        let mut expected: Value = serde_json::from_str(&expected_output)
            .unwrap_or_else(|e| panic!("Expected file is not JSON: {}", e));
        if params.unordered {
            actual = by_hash(actual);
            expected = by_hash(expected);
        }

        assert_eq!(
            actual, expected,
            "\n\nOutput mismatch for fixture: {} (mode: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_name, mode, actual_output, expected_output
        );
    }

    /// End-to-end test for all fixtures in both run modes
    #[rstest]
    #[case("sender_filter", Params { from: Some("0x1111111111111111111111111111111111111111"), ..Params::default() })]
    #[case("both_fields_disjoint", Params {
        from: Some("0x1111111111111111111111111111111111111111"),
        to: Some("0x3333333333333333333333333333333333333333"),
        ..Params::default()
    })]
    #[case("both_fields_match", Params {
        from: Some("0x1111111111111111111111111111111111111111"),
        to: Some("0x2222222222222222222222222222222222222222"),
        ..Params::default()
    })]
    #[case("value_threshold", Params { above_value: Some("15"), unordered: true, ..Params::default() })]
    #[case("large_values", Params { above_value: Some("18446744073709551615"), unordered: true, ..Params::default() })]
    #[case("malformed_values", Params { above_value: Some("0"), unordered: true, ..Params::default() })]
    #[case("recipient_paginated", Params {
        to: Some("0x2222222222222222222222222222222222222222"),
        offset: Some("1"),
        limit: Some("2"),
        ..Params::default()
    })]
    #[case("offset_past_end", Params { offset: Some("10"), ..Params::default() })]
    #[case("no_transactions_found", Params::default())]
    fn test_fixtures(
        #[case] fixture: &str,
        #[case] params: Params,
        #[values(ModeType::Once, ModeType::Watch)] mode: ModeType,
    ) {
        run_test_fixture(fixture, params, mode);
    }

    #[test]
    fn test_rejected_response_fails_once_mode() {
        let strategy = create_strategy(ModeType::Once, None);
        let mut output = Vec::new();

        let err = strategy
            .run(
                Arc::new(FileSource::new("tests/fixtures/rejected/input.json")),
                &QueryFilter::default(),
                OutputFormat::Json,
                &mut output,
            )
            .unwrap_err();

        assert_eq!(
            err,
            IndexError::upstream_rejected("NOTOK", "Max rate limit reached")
        );
        assert!(output.is_empty());
    }

    #[test]
    fn test_rejected_response_is_skipped_in_watch_mode() {
        let strategy = create_strategy(ModeType::Watch, Some(single_refresh_config()));
        let mut output = Vec::new();

        strategy
            .run(
                Arc::new(FileSource::new("tests/fixtures/rejected/input.json")),
                &QueryFilter::default(),
                OutputFormat::Json,
                &mut output,
            )
            .unwrap();

        assert!(output.is_empty());
    }

    #[test]
    fn test_missing_input_file() {
        let strategy = create_strategy(ModeType::Once, None);
        let mut output = Vec::new();

        let err = strategy
            .run(
                Arc::new(FileSource::new("tests/fixtures/missing/input.json")),
                &QueryFilter::default(),
                OutputFormat::Json,
                &mut output,
            )
            .unwrap_err();

        assert_eq!(
            err,
            IndexError::file_not_found("tests/fixtures/missing/input.json")
        );
    }

    #[test]
    fn test_invalid_threshold_is_reported() {
        let strategy = create_strategy(ModeType::Once, None);
        let mut output = Vec::new();

        let err = strategy
            .run(
                Arc::new(FileSource::new("tests/fixtures/value_threshold/input.json")),
                &QueryFilter::above_value("fifteen"),
                OutputFormat::Json,
                &mut output,
            )
            .unwrap_err();

        assert!(matches!(err, IndexError::InvalidArgument { ref name, .. } if name == "aboveValue"));
    }

    #[test]
    fn test_csv_output_for_sender_filter() {
        let strategy = create_strategy(ModeType::Once, None);
        let mut output = Vec::new();

        strategy
            .run(
                Arc::new(FileSource::new("tests/fixtures/sender_filter/input.json")),
                &QueryFilter::sender("0x1111111111111111111111111111111111111111"),
                OutputFormat::Csv,
                &mut output,
            )
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "hash,blockNumber,timeStamp,from,to,value,tokenSymbol"
        );
        assert!(lines[1].ends_with(
            ",18000000,1700000000,0x1111111111111111111111111111111111111111,0x2222222222222222222222222222222222222222,10,USDT"
        ));
        assert!(lines[2].contains(",18000002,1700000024,"));
    }
}
