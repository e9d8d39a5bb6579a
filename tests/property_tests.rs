//! Property-based tests using proptest

use proptest::prelude::*;
use serde_json::Value;
use stackdriver_logger::prelude::*;
use std::collections::BTreeMap;

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Debug),
        Just(Severity::Info),
        Just(Severity::Warn),
        Just(Severity::Error),
        Just(Severity::Critical),
    ]
}

fn field_map() -> impl Strategy<Value = BTreeMap<String, i64>> {
    prop::collection::btree_map("[a-e]{1,2}", any::<i64>(), 0..6)
}

fn logger(level: Severity) -> (Logger, BufferSink) {
    let buffer = BufferSink::new();
    let logger = Logger::builder()
        .config(Config::new(level, "prop", "1"))
        .output(buffer.clone())
        .build();
    (logger, buffer)
}

proptest! {
    /// Severity names roundtrip through parsing, in any letter case
    #[test]
    fn test_severity_str_roundtrip(level in severity(), lower in any::<bool>()) {
        let name = if lower { level.to_str().to_lowercase() } else { level.to_str().to_string() };
        prop_assert_eq!(name.parse::<Severity>().ok(), Some(level));
    }

    /// Ordering agrees with numeric rank
    #[test]
    fn test_severity_ordering(a in severity(), b in severity()) {
        prop_assert_eq!(a <= b, a.rank() <= b.rank());
        prop_assert_eq!(a < b, a.rank() < b.rank());
    }

    /// Chained derivations union the fields, later maps winning, and leave
    /// the base logger untouched
    #[test]
    fn test_field_merge_precedence(base in field_map(), f1 in field_map(), f2 in field_map()) {
        let (root, _) = logger(Severity::Debug);
        let root = root.with_fields(base.clone().into_iter().collect::<Fields>());
        let derived = root
            .with_fields(f1.clone().into_iter().collect::<Fields>())
            .with_fields(f2.clone().into_iter().collect::<Fields>());

        let mut expected = base.clone();
        expected.extend(f1);
        expected.extend(f2);

        prop_assert_eq!(derived.fields(), expected.into_iter().collect::<Fields>());
        prop_assert_eq!(root.fields(), base.into_iter().collect::<Fields>());
    }

    /// Non-error severities write exactly one line iff they reach the threshold
    #[test]
    fn test_threshold_filtering(threshold in severity(), level in prop_oneof![
        Just(Severity::Debug),
        Just(Severity::Info),
        Just(Severity::Warn),
    ]) {
        let (logger, buffer) = logger(threshold);
        logger.log(level, "message");

        let expected = usize::from(level >= threshold);
        prop_assert_eq!(buffer.lines().len(), expected);
    }

    /// ERROR always writes exactly one line, whatever the threshold
    #[test]
    fn test_error_never_filtered(threshold in severity()) {
        let (logger, buffer) = logger(threshold);
        logger.error("failure");
        prop_assert_eq!(buffer.lines().len(), 1);
    }

    /// Every record is a standalone JSON object carrying the message verbatim
    #[test]
    fn test_records_are_valid_json(message in "\\PC{0,40}", key in "[a-z]{1,8}", value in any::<i32>()) {
        let (logger, buffer) = logger(Severity::Debug);
        logger.with_field(key.clone(), value).info(&message);

        let lines = buffer.lines();
        prop_assert_eq!(lines.len(), 1);
        let record: Value = serde_json::from_str(&lines[0]).unwrap();
        prop_assert_eq!(record["message"].as_str(), Some(message.as_str()));
        prop_assert_eq!(&record["context"]["data"][key.as_str()], &Value::from(value));
    }
}
