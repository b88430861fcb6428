use indoc::indoc;
use jolie_core::ParsingContext;

use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report_unlocated(DiagnosticKind::MainProcedureMissing)
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    insta::assert_snapshot!(diagnostics.render(), @"error: main procedure not defined");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UndefinedProcedureCall,
            &ParsingContext::new("main.ol", 12),
        )
        .message("cleanup")
        .emit();

    insta::assert_snapshot!(
        diagnostics.render(),
        @"main.ol:12: error: procedure `cleanup` is not defined"
    );
}

#[test]
fn standard_pattern_message() {
    let kind = DiagnosticKind::InvalidCardinality;
    assert_eq!(kind.message(None), "invalid cardinality");
    assert_eq!(
        kind.message(Some("type `T` has a negative minimum")),
        "invalid cardinality: type `T` has a negative minimum"
    );
}

#[test]
fn unknown_context_is_dropped() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UndefinedOutputPort,
            &ParsingContext::default(),
        )
        .message("Printer")
        .emit();

    let message = diagnostics.iter().next().unwrap();
    assert!(message.context().is_none());
    insta::assert_snapshot!(diagnostics.render(), @"error: output port `Printer` is not defined");
}

#[test]
fn builder_with_hint_and_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::DuplicatePortDefinition,
            &ParsingContext::new("main.ol", 9),
        )
        .message("input port `In`")
        .related_to("first defined here", &ParsingContext::new("main.ol", 3))
        .hint("rename one of the ports")
        .emit();

    insta::assert_snapshot!(
        diagnostics.render(),
        @"main.ol:9: error: input port `In` is already defined (related: first defined here at main.ol:3) (hint: rename one of the ports)"
    );
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report_unlocated(DiagnosticKind::UnthrownFault)
        .message("fault Bad is never thrown by operation op even if it is declared in the interface")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.error_count(), 0);
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn printer_plain_multiple() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UndefinedProcedureCall,
            &ParsingContext::new("main.ol", 4),
        )
        .message("a")
        .emit();
    diagnostics
        .report_unlocated(DiagnosticKind::MainProcedureMissing)
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    main.ol:4: error: procedure `a` is not defined
    error: main procedure not defined
    ");
}

#[test]
fn printer_with_source() {
    let source = indoc! {"
        main {
            cleanup
        }
    "};
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UndefinedProcedureCall,
            &ParsingContext::new("main.ol", 2),
        )
        .message("cleanup")
        .emit();

    let result = diagnostics.printer().source(source).path("main.ol").render();
    insta::assert_snapshot!(result, @r"
    error: procedure `cleanup` is not defined
     --> main.ol:2:5
      |
    2 |     cleanup
      |     ^^^^^^^
    ");
}

#[test]
fn printer_with_source_falls_back_outside_it() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UndefinedProcedureCall,
            &ParsingContext::new("other.ol", 1),
        )
        .message("cleanup")
        .emit();
    diagnostics
        .report_unlocated(DiagnosticKind::MainProcedureMissing)
        .emit();

    let result = diagnostics.printer().source("cleanup").path("main.ol").render();
    insta::assert_snapshot!(result, @r"
    other.ol:1: error: procedure `cleanup` is not defined
    error: main procedure not defined
    ");
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(
            DiagnosticKind::UndefinedProcedureCall,
            &ParsingContext::new("main.ol", 1),
        )
        .message("cleanup")
        .emit();

    let result = diagnostics.printer().source("cleanup").colored(true).render();
    assert!(result.contains("cleanup"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    assert!(diagnostics.printer().source("source").render().is_empty());
    assert!(diagnostics.render().is_empty());
}

#[test]
fn diagnostics_collection_methods() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report_unlocated(DiagnosticKind::MainProcedureMissing)
        .emit();
    diagnostics
        .report_unlocated(DiagnosticKind::UndeclaredFault)
        .emit();

    let mut other = Diagnostics::new();
    other
        .report_unlocated(DiagnosticKind::MainProcedureMissing)
        .emit();
    diagnostics.extend(other);

    assert_eq!(diagnostics.len(), 3);
    assert_eq!(diagnostics.count(DiagnosticKind::MainProcedureMissing), 2);
    assert_eq!(
        diagnostics.kinds(),
        [
            DiagnosticKind::MainProcedureMissing,
            DiagnosticKind::UndeclaredFault,
            DiagnosticKind::MainProcedureMissing,
        ]
    );
}
