use livestyle::catalog::Platform;
use livestyle::errors::{DecodeError, WireError};
use livestyle::native::{Alignment, Color, EdgeSet, FontWeight, Modifier, Paint};
use livestyle::{Element, Environment, Registry, ResolutionContext, Stylesheet};

const SHEET: &str = r##"{
    "card": [
        ["padding", {"line": 2}, [null, 12]],
        ["background", {"line": 3}, [null, [null, null, ["solid", [null, null, ["Color", "#FF0000"]]]]]],
        ["cornerRadius", {"line": 4}, [null, 8]]
    ],
    "title": [
        ["fontWeight", null, [null, ["__attr__", null, "weight"]]],
        ["foregroundStyle", null, [null, "blue"]]
    ],
    "broken": [
        ["blur", {"line": 9, "source": "blur(3)"}, [null, 3]],
        ["opacity", null, [null, 0.5]]
    ]
}"##;

fn parse() -> (Stylesheet, Vec<livestyle::stylesheet::Diagnostic>) {
    Stylesheet::parse(SHEET.as_bytes(), &Registry::builtin(Platform::Ios)).unwrap()
}

#[test]
fn parse_keeps_decodable_modifiers_and_reports_the_rest() {
    let (sheet, diagnostics) = parse();

    assert_eq!(sheet.len(), 3);
    assert_eq!(sheet.class("card").unwrap().len(), 3);
    assert_eq!(sheet.class("broken").unwrap().len(), 1);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].class, "broken");
    assert_eq!(diagnostics[0].index, 0);
    assert_eq!(
        diagnostics[0].failures.entries[0].error,
        DecodeError::UnknownModifier("blur".into())
    );
    assert!(diagnostics[0].failures.report().contains("blur(3)"));
}

#[test]
fn resolve_class_returns_modifiers_in_source_order() {
    let (sheet, _) = parse();
    let element = Element::new();
    let env = Environment::default();
    let ctx = ResolutionContext::new(&element, &env);

    let card: Vec<Modifier> = sheet
        .resolve_class("card", &ctx)
        .into_iter()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        card,
        vec![
            Modifier::Padding {
                edges: EdgeSet::ALL,
                length: Some(12.0)
            },
            Modifier::Background(Paint::Solid(Color::RED)),
            Modifier::CornerRadius(8.0),
        ]
    );
    assert!(sheet.resolve_class("missing", &ctx).is_empty());
}

#[test]
fn failed_attribute_only_drops_its_own_modifier() {
    let (sheet, _) = parse();
    let env = Environment::default();

    let unset = Element::new();
    let results = sheet.resolve_class("title", &ResolutionContext::new(&unset, &env));
    assert!(results[0].is_err());
    assert_eq!(
        results[1],
        Ok(Modifier::ForegroundStyle(Paint::Solid(Color::BLUE)))
    );

    let bold = Element::new().with("weight", "bold");
    let resolved = sheet.modifiers("title card", &ResolutionContext::new(&bold, &env));
    assert_eq!(resolved.len(), 5);
    assert_eq!(resolved[0], Modifier::FontWeight(FontWeight::Bold));
    assert_eq!(sheet.attribute_names("title"), vec!["weight"]);
}

#[test]
fn modifiers_skip_unknown_classes() {
    let (sheet, _) = parse();
    let element = Element::new();
    let env = Environment::default();
    let resolved = sheet.modifiers("nope broken", &ResolutionContext::new(&element, &env));
    assert_eq!(resolved, vec![Modifier::Opacity(0.5)]);
}

#[test]
fn frame_accepts_infinite_lengths() {
    let sheet_json = r#"{"fill": [["frame", null, [null,
        {"label": "maxWidth", "value": [null, null, ["infinity"]]},
        {"label": "alignment", "value": [null, null, ["leading"]]}
    ]]]}"#;
    let (sheet, diagnostics) =
        Stylesheet::parse(sheet_json.as_bytes(), &Registry::builtin(Platform::Ios)).unwrap();
    assert!(diagnostics.is_empty());

    let element = Element::new();
    let env = Environment::default();
    let resolved = sheet.modifiers("fill", &ResolutionContext::new(&element, &env));
    assert_eq!(
        resolved,
        vec![Modifier::FlexFrame {
            max_width: Some(f64::INFINITY),
            max_height: None,
            alignment: Alignment::Leading,
        }]
    );
}

#[test]
fn attribute_padding_binds_as_an_amount() {
    let sheet_json = r#"{"c": [
        ["padding", null, [null, ["__attr__", null, "p"]]],
        ["padding", null, [null, [null, null, ["horizontal"]]]]
    ]}"#;
    let (sheet, diagnostics) =
        Stylesheet::parse(sheet_json.as_bytes(), &Registry::builtin(Platform::Ios)).unwrap();
    assert!(diagnostics.is_empty());

    let element = Element::new().with("p", "16");
    let env = Environment::default();
    assert_eq!(
        sheet.modifiers("c", &ResolutionContext::new(&element, &env)),
        vec![
            Modifier::Padding {
                edges: EdgeSet::ALL,
                length: Some(16.0)
            },
            Modifier::Padding {
                edges: EdgeSet::HORIZONTAL,
                length: None
            },
        ]
    );

    let results = sheet.resolve_class("c", &ResolutionContext::new(&Element::new(), &env));
    assert!(results[0].is_err());
}

#[test]
fn wire_errors_abort_the_whole_document() {
    let registry = Registry::builtin(Platform::Ios);
    assert!(matches!(
        Stylesheet::parse(br#"{"card": [["padding", null, 12]]}"#, &registry),
        Err(WireError::MalformedNode { .. })
    ));
    assert!(matches!(
        Stylesheet::parse(br#"["padding"]"#, &registry),
        Err(WireError::MalformedNode { .. })
    ));
    assert!(matches!(
        Stylesheet::parse(b"{", &registry),
        Err(WireError::Json(_))
    ));
}
