use livestyle::ast::AstReader;
use livestyle::catalog::{
    builtin, filter_for_platform, Availability, CandidateShape, Platform, Version,
};
use livestyle::errors::{DecodeError, ResolveError};
use livestyle::native::Native;
use livestyle::resolvable::Args;
use livestyle::{Decoder, Environment, Registry};

fn build(_: &Args<'_>) -> Result<Native, ResolveError> {
    Ok(Native::None)
}

fn paint_shapes() -> Vec<CandidateShape> {
    builtin::paint::paint().shapes().to_vec()
}

#[test]
fn platform_only_shapes_are_dropped_at_load() {
    let all = paint_shapes();
    let ios = Registry::builtin(Platform::Ios);
    let paint = ios.catalog("Paint").unwrap();

    assert_eq!(paint.len(), all.len() - 1);
    assert!(paint
        .shapes()
        .iter()
        .all(|shape| shape.case_name() != Some("windowBackground")));

    let macos = Registry::builtin(Platform::Macos);
    assert_eq!(macos.catalog("Paint").unwrap().len(), all.len());
}

#[test]
fn filtered_shape_cannot_be_decoded() {
    let registry = Registry::builtin(Platform::Ios);
    let node = AstReader::read_str(r#"[null, null, ["windowBackground"]]"#).unwrap();
    let failures = Decoder::new(&registry).decode_type(&node, "Paint").unwrap_err();

    assert!(matches!(
        &failures.entries.last().unwrap().error,
        DecodeError::UnknownCase { name, expected }
            if name == "windowBackground" && !expected.iter().any(|case| case == "windowBackground")
    ));
}

#[test]
fn filter_keeps_order_of_remaining_shapes() {
    let shapes = vec![
        CandidateShape::case("a", build),
        CandidateShape::case("b", build).available(Availability::only([Platform::Watchos])),
        CandidateShape::case("c", build),
        CandidateShape::case("d", build).available(Availability::only([Platform::Ios, Platform::Tvos])),
    ];

    let kept: Vec<_> = filter_for_platform(shapes, Platform::Tvos)
        .iter()
        .filter_map(|shape| shape.case_name().map(str::to_string))
        .collect();
    assert_eq!(kept, vec!["a", "c", "d"]);
}

#[test]
fn runtime_gate_compares_against_the_current_platform_only() {
    let gate = Availability::everywhere()
        .introduced(Platform::Ios, Version::new(16, 1, 0))
        .runtime_gate()
        .unwrap();

    assert_eq!(
        gate.check(&Environment::new(Platform::Ios, Version::new(16, 0, 9))),
        Err(Version::new(16, 1, 0))
    );
    assert_eq!(gate.check(&Environment::new(Platform::Ios, Version::new(16, 1, 0))), Ok(()));
    assert_eq!(gate.check(&Environment::new(Platform::Macos, Version::new(1, 0, 0))), Ok(()));
    assert!(Availability::everywhere().runtime_gate().is_none());
}

#[test]
fn versions_and_platforms_parse() {
    assert_eq!("17".parse::<Version>(), Ok(Version::new(17, 0, 0)));
    assert_eq!("16.1.2".parse::<Version>(), Ok(Version::new(16, 1, 2)));
    assert!("16.x".parse::<Version>().is_err());
    assert!(Version::new(16, 10, 0) > Version::new(16, 9, 0));
    assert_eq!(Version::new(14, 0, 0).to_string(), "14.0");

    assert_eq!("macOS".parse::<Platform>(), Ok(Platform::Macos));
    assert_eq!("visionos".parse::<Platform>(), Ok(Platform::Visionos));
    assert!("android".parse::<Platform>().is_err());
    assert_eq!(Platform::Watchos.to_string(), "watchOS");
}
