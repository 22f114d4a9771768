use justmc_data::diagnostics::{Accumulator, Diagnostics, Severity};

#[test]
fn test_diagnostics_counts_by_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.info("a", "fine");
    diagnostics.warn("b", "odd");
    diagnostics.error("c", "broken");
    diagnostics.error("c", "still broken");

    assert_eq!(diagnostics.len(), 4);
    assert_eq!(diagnostics.count(Severity::Info), 1);
    assert_eq!(diagnostics.count(Severity::Warn), 1);
    assert_eq!(diagnostics.count(Severity::Error), 2);
    assert_eq!(diagnostics.for_subject("c").count(), 2);
    assert!(diagnostics.has_errors());
}

#[test]
fn test_warnings_alone_do_not_fail() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.warn("b", "odd");
    assert!(!diagnostics.has_errors());
}

#[test]
fn test_extend_keeps_order() {
    let mut first = Diagnostics::new();
    first.error("one", "x");
    let mut second = Diagnostics::new();
    second.warn("two", "y");

    first.extend(second);

    let subjects: Vec<_> = first.iter().map(|d| d.subject.as_str()).collect();
    assert_eq!(subjects, vec!["one", "two"]);
}

/// Duplicates are reported; the later value wins but keeps the first position.
#[test]
fn test_accumulator_reports_collisions() {
    let mut diagnostics = Diagnostics::new();
    let mut accumulator: Accumulator<String, u32> = Accumulator::new();

    accumulator.insert("a".to_string(), "A.kt", 1, &mut diagnostics);
    accumulator.insert("b".to_string(), "B.kt", 2, &mut diagnostics);
    accumulator.insert("a".to_string(), "C.kt", 3, &mut diagnostics);

    assert_eq!(accumulator.len(), 2);
    assert_eq!(accumulator.get(&"a".to_string()), Some(&3));
    assert_eq!(accumulator.into_values(), vec![3, 2]);

    let warnings: Vec<_> = diagnostics.iter().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].severity, Severity::Warn);
    assert_eq!(warnings[0].subject, "a");
    assert!(warnings[0].message.contains("A.kt"));
    assert!(warnings[0].message.contains("C.kt"));
}
