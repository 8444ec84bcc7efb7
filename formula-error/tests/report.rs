use ariadne::Fmt;
use formula_attrs::ErrorKind;
use formula_error::{Error, EXPR};

/// A closing delimiter is missing.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unclosed group",
    labels = ["this group is never closed", ""],
    help = format!("add a closing {}", delimiter.fg(EXPR)),
)]
pub struct Unclosed {
    pub delimiter: char,
}

/// A plain error without labels.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(message = format!("nothing to do with `{}`", name))]
pub struct Nothing {
    pub name: String,
}

fn render(err: &Error, input: &str) -> String {
    let mut buf = Vec::new();
    err.write_report("input", input, &mut buf).unwrap();
    String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap()
}

#[test]
fn display_uses_message() {
    let err = Error::new(vec![0..1], Unclosed { delimiter: ')' });
    assert_eq!(err.to_string(), "unclosed group");

    let err = Error::spanless(Nothing { name: "x".to_string() });
    assert_eq!(err.to_string(), "nothing to do with `x`");
}

#[test]
fn downcast_kind() {
    let err = Error::new(vec![0..1], Unclosed { delimiter: ']' });
    assert!(err.is::<Unclosed>());
    assert!(!err.is::<Nothing>());
    assert_eq!(err.downcast_ref::<Unclosed>(), Some(&Unclosed { delimiter: ']' }));
}

#[test]
fn report_contains_labels_and_help() {
    let input = "\\frac{1}{x";
    let err = Error::new(vec![5..10], Unclosed { delimiter: '}' });
    let report = render(&err, input);
    assert!(report.contains("unclosed group"));
    assert!(report.contains("this group is never closed"));
    assert!(report.contains("add a closing }"));
}

#[test]
fn report_without_spans() {
    let err = Error::spanless(Nothing { name: "y".to_string() });
    let report = render(&err, "y");
    assert!(report.contains("nothing to do with `y`"));
}
