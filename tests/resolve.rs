use livestyle::ast::{AstReader, CallNode};
use livestyle::catalog::{leaf, CandidateShape, Catalog, Param, Platform, Version};
use livestyle::errors::ResolveError;
use livestyle::native::{Color, Font, FontDesign, Modifier, Native, Paint};
use livestyle::resolvable::{Args, Resolvable};
use livestyle::{Decoder, Element, Environment, Registry, ResolutionContext};

fn read(json: &str) -> CallNode {
    AstReader::read_str(json).unwrap()
}

fn decode(registry: &Registry, json: &str, type_id: &str) -> Resolvable {
    Decoder::new(registry).decode_type(&read(json), type_id).unwrap()
}

fn resolve(value: &Resolvable, element: &Element, environment: &Environment) -> Result<Native, ResolveError> {
    value.resolve(&ResolutionContext::new(element, environment))
}

fn echo_int(args: &Args<'_>) -> Result<Native, ResolveError> {
    Ok(Native::Int(args.value(0)?))
}

// ── attributes ──────────────────────────────────────────────────────

#[test]
fn attribute_falls_back_to_parameter_default() {
    let mut registry = Registry::new(Platform::Ios);
    registry.register(Catalog::new("Counter").shape(CandidateShape::initializer(
        vec![Param::labeled("count", leaf::INT).with_default(0_i64)],
        echo_int,
    )));
    let value = decode(
        &registry,
        r#"[null, null, [{"label": "count", "value": ["__attr__", null, "n"]}]]"#,
        "Counter",
    );
    let env = Environment::default();

    assert_eq!(resolve(&value, &Element::new(), &env), Ok(Native::Int(0)));
    assert_eq!(resolve(&value, &Element::new().with("n", "5"), &env), Ok(Native::Int(5)));
    assert_eq!(resolve(&value, &Element::new().with("n", "five"), &env), Ok(Native::Int(0)));
}

#[test]
fn required_attribute_failure_propagates() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(&registry, r#"[null, null, ["solid", ["__attr__", null, "tint"]]]"#, "Paint");
    let env = Environment::default();

    assert!(matches!(
        resolve(&value, &Element::new(), &env),
        Err(ResolveError::MissingOrInvalidAttribute { ref name, .. }) if name == "tint"
    ));
    assert_eq!(
        resolve(&value, &Element::new().with("tint", "#00FF00"), &env),
        Ok(Native::Paint(Paint::Solid(Color::GREEN)))
    );
}

#[test]
fn resolution_is_pure() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(
        &registry,
        r#"[null, null, ["opacity", ["__attr__", null, "tint"], ["__attr__", null, "alpha"]]]"#,
        "Color",
    );
    let snapshot = value.clone();
    let env = Environment::default();
    let half_red = Element::new().with("tint", "red").with("alpha", "0.5");
    let blue = Element::new().with("tint", "blue").with("alpha", "1");

    let first = resolve(&value, &half_red, &env);
    assert_eq!(first, Ok(Native::Color(Color::rgba(1.0, 0.0, 0.0, 0.5))));
    assert_eq!(resolve(&value, &blue, &env), Ok(Native::Color(Color::BLUE)));
    assert_eq!(resolve(&value, &half_red, &env), first);
    assert_eq!(value, snapshot);
}

#[test]
fn attribute_names_cover_the_whole_tree() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(
        &registry,
        r#"[null, null, ["opacity", ["__attr__", null, "tint"], ["__attr__", null, "alpha"]]]"#,
        "Color",
    );
    assert_eq!(value.attribute_names(), vec!["tint", "alpha"]);
    assert!(Resolvable::constant(Color::RED).attribute_names().is_empty());
}

// ── failure locality ────────────────────────────────────────────────

#[test]
fn optional_sibling_failure_does_not_fail_the_node() {
    let registry = Registry::builtin(Platform::Ios);
    let value = Decoder::new(&registry)
        .decode_modifier(&read(
            r#"["frame", null, [null,
                {"label": "width", "value": ["__attr__", null, "w"]},
                {"label": "height", "value": 40}
            ]]"#,
        ))
        .unwrap();

    let resolved = value
        .resolve_as::<Modifier>(&ResolutionContext::new(
            &Element::new().with("w", "wide"),
            &Environment::default(),
        ))
        .unwrap();
    assert!(matches!(
        resolved,
        Modifier::Frame { width: None, height: Some(h), .. } if h == 40.0
    ));
}

#[test]
fn list_children_resolve_in_order() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(
        &registry,
        r#"[null, null, ["gradient", {"label": "stops", "value": [
            [null, null, ["red"]],
            ["__attr__", null, "accent"]
        ]}]]"#,
        "Paint",
    );
    let env = Environment::default();

    assert_eq!(
        resolve(&value, &Element::new().with("accent", "#0000FF"), &env),
        Ok(Native::Paint(Paint::Gradient(vec![Color::RED, Color::BLUE])))
    );
    assert!(resolve(&value, &Element::new(), &env).is_err());
}

#[test]
fn typed_extraction_reports_the_resolved_kind() {
    let ctx_env = Environment::default();
    let element = Element::new();
    let err = Resolvable::constant(Native::Int(1))
        .resolve_as::<Color>(&ResolutionContext::new(&element, &ctx_env))
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::UnexpectedValue {
            expected: "Color",
            found: "Int"
        }
    );
}

// ── environment ─────────────────────────────────────────────────────

#[test]
fn runtime_gate_uses_fallback_on_older_runtime() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(
        &registry,
        r#"[null, null, ["system",
            {"label": "size", "value": 17},
            {"label": "design", "value": [null, null, ["rounded"]]}
        ]]"#,
        "Font",
    );
    let element = Element::new();

    let old = Environment::new(Platform::Ios, Version::new(16, 0, 0));
    assert_eq!(
        resolve(&value, &element, &old),
        Ok(Native::Font(Font::System {
            size: 17.0,
            weight: None,
            design: None
        }))
    );

    let current = Environment::new(Platform::Ios, Version::new(17, 0, 0));
    assert_eq!(
        resolve(&value, &element, &current),
        Ok(Native::Font(Font::System {
            size: 17.0,
            weight: None,
            design: Some(FontDesign::Rounded)
        }))
    );

    let unlisted = Environment::new(Platform::Tvos, Version::new(10, 0, 0));
    assert!(matches!(
        resolve(&value, &element, &unlisted),
        Ok(Native::Font(Font::System { design: Some(_), .. }))
    ));
}

#[test]
fn runtime_gate_without_fallback_is_unsupported() {
    let registry = Registry::builtin(Platform::Macos);
    let value = decode(&registry, r#"[null, null, ["windowBackground"]]"#, "Paint");
    let element = Element::new();

    assert_eq!(
        resolve(&value, &element, &Environment::new(Platform::Macos, Version::new(13, 5, 0))),
        Err(ResolveError::UnsupportedOnRuntime {
            shape: ".windowBackground".into(),
            platform: Platform::Macos,
            required: Version::new(14, 0, 0),
            actual: Version::new(13, 5, 0),
        })
    );
    assert_eq!(
        resolve(&value, &element, &Environment::new(Platform::Macos, Version::new(14, 0, 0))),
        Ok(Native::Paint(Paint::WindowBackground))
    );
}

#[test]
fn contextual_colors_follow_the_color_scheme() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(&registry, r#"[null, null, ["primary"]]"#, "Color");
    let element = Element::new();

    assert_eq!(
        resolve(&value, &element, &Environment::default()),
        Ok(Native::Color(Color::BLACK))
    );
    assert_eq!(
        resolve(&value, &element, &Environment::default().with_value("colorScheme", "dark")),
        Ok(Native::Color(Color::WHITE))
    );
}

#[test]
fn own_type_selector_reaches_contextual_colors() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(&registry, r#"[null, null, ["Color", "primary"]]"#, "Color");
    let dark = Environment::default().with_value("colorScheme", "dark");

    assert_eq!(
        resolve(&value, &Element::new(), &dark),
        Ok(Native::Color(Color::WHITE))
    );
}

#[test]
fn solid_hex_paint_resolves() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(
        &registry,
        r##"[null, null, ["solid", [null, null, ["Color", "#FF0000"]]]]"##,
        "Paint",
    );

    assert_eq!(
        resolve(&value, &Element::new(), &Environment::default()),
        Ok(Native::Paint(Paint::Solid(Color::RED)))
    );
}

#[test]
fn shared_tree_resolves_from_many_threads() {
    let registry = Registry::builtin(Platform::Ios);
    let value = decode(&registry, r#"[null, null, ["solid", ["__attr__", null, "tint"]]]"#, "Paint");
    let env = Environment::default();
    let elements: Vec<Element> = ["red", "green", "blue"]
        .iter()
        .map(|tint| Element::new().with("tint", *tint))
        .collect();

    let (value, env) = (&value, &env);
    let results: Vec<Native> = std::thread::scope(|scope| {
        let handles: Vec<_> = elements
            .iter()
            .map(|element| scope.spawn(move || resolve(value, element, env).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![
            Native::Paint(Paint::Solid(Color::RED)),
            Native::Paint(Paint::Solid(Color::GREEN)),
            Native::Paint(Paint::Solid(Color::BLUE)),
        ]
    );
}
