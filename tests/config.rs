use approx::assert_abs_diff_eq;
use rquad::{ErrorKind, IntegrationConfig, QuadError, Rule};

fn jobs(json: &str) -> rquad::Result<Vec<IntegrationConfig>> {
    IntegrationConfig::from_reader(json.as_bytes())
}

#[test]
fn reads_a_single_job() {
    let jobs = jobs(
        r#"{ "rule": "simpson", "start": 4, "end": 6, "intervals": 4, "formula": "(x^4) + x" }"#,
    )
    .expect("read job");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].rule, Rule::Simpson);

    let value = jobs[0].build().expect("build").integrate().expect("integrate");
    assert_abs_diff_eq!(value, 1360.42, epsilon = 0.01);
}

#[test]
fn reads_a_job_list_with_rule_aliases() {
    let jobs = jobs(
        r#"[
            { "rule": "left-riemann", "start": -3, "end": 2, "intervals": 10000, "formula": "x^3" },
            { "rule": "trapezoid", "start": -3, "end": 2, "intervals": 10000, "formula": "x^3" },
            { "rule": "midpoint", "start": -3, "end": 2, "intervals": 10000, "formula": "x^3" }
        ]"#,
    )
    .expect("read jobs");
    let rules: Vec<Rule> = jobs.iter().map(|job| job.rule).collect();
    assert_eq!(rules, vec![Rule::Left, Rule::Trapezoidal, Rule::Midpoint]);
    for job in &jobs {
        let value = job.build().unwrap().integrate().unwrap();
        assert_abs_diff_eq!(value, -16.25, epsilon = 0.01);
    }
}

#[test]
fn malformed_files_are_input_errors() {
    for json in [
        r#"{ "rule": "romberg", "start": 0, "end": 1, "intervals": 2, "formula": "x" }"#,
        r#"{ "rule": "left", "start": 0, "end": 1, "formula": "x" }"#,
        r#"{ "rule": "left", "start": 0, "end": 1, "intervals": -2, "formula": "x" }"#,
        r#"{ "rule": "left", "start": 0, "end": 1, "intervals": 2, "formula": "x", "extra": 1 }"#,
        "not json",
    ] {
        let err = jobs(json).unwrap_err();
        assert!(matches!(err, QuadError::Json(_)), "{json}");
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}

#[test]
fn build_reports_parse_and_configuration_errors() {
    let bad_formula = IntegrationConfig {
        rule: Rule::Left,
        start: 0.0,
        end: 1.0,
        intervals: 10,
        formula: "x +".to_string(),
    };
    assert_eq!(bad_formula.build().unwrap_err().kind(), ErrorKind::Parse);

    let odd_simpson = IntegrationConfig {
        rule: Rule::Simpson,
        intervals: 5,
        formula: "x^3".to_string(),
        ..bad_formula
    };
    assert_eq!(
        odd_simpson.build().unwrap_err().kind(),
        ErrorKind::Configuration
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let err = IntegrationConfig::from_path("/nonexistent/rquad-jobs.json").unwrap_err();
    assert!(matches!(err, QuadError::Io(_)));
}

#[test]
fn serializes_rules_by_name() {
    let job = IntegrationConfig {
        rule: Rule::Trapezoidal,
        start: 5.0,
        end: 7.0,
        intervals: 11,
        formula: "ln(x)+e^x".to_string(),
    };
    let json = serde_json::to_string(&job).unwrap();
    assert!(json.contains(r#""rule":"trapezoidal""#));
    assert_eq!(jobs(&json).unwrap(), vec![job]);
}
