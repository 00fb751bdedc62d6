//! Custom dialects and render options from TOML settings.

use transql::config::{Settings, SettingsError};
use transql::dialect::DialectError;
use transql::render::{RenderError, UnsupportedLevel};
use transql::transpile::{transpile_named, TranspileError};

const CONFIG: &str = r#"
[render]
unsupported_level = "ignore"

[dialects.strict_sqlite]
base = "sqlite"

[dialects.strict_sqlite.types]
boolean = "BOOLEAN"

[dialects.strict_sqlite.functions]
EDIT_DISTANCE = "levenshtein"

[dialects.strict_sqlite.transforms]
levenshtein = { rename = "EDIT_DISTANCE" }
least = "default"
"#;

#[test]
fn configured_dialect_transpiles() {
    let settings = Settings::from_toml_str(CONFIG).unwrap();
    let registry = settings.registry().unwrap();

    let out = transpile_named(
        &registry,
        "SELECT EDITDIST3(a, b), LEAST(x, y), CAST(flag AS BOOLEAN) FROM [t]",
        "sqlite",
        "strict_sqlite",
        settings.render_options(),
    )
    .unwrap();
    assert_eq!(
        out[0].sql,
        r#"SELECT EDIT_DISTANCE(a, b), LEAST(x, y), CAST(flag AS BOOLEAN) FROM "t""#
    );

    // The custom function name reads back as the canonical node
    let back = transpile_named(
        &registry,
        "SELECT edit_distance(a, b) FROM t",
        "strict_sqlite",
        "sqlite",
        settings.render_options(),
    )
    .unwrap();
    assert_eq!(back[0].sql, "SELECT EDITDIST3(a, b) FROM t");
}

#[test]
fn render_level_comes_from_settings() {
    let settings = Settings::from_toml_str(
        r#"
[render]
unsupported_level = "raise"
"#,
    )
    .unwrap();
    assert_eq!(settings.render.unsupported_level, UnsupportedLevel::Raise);

    let err = transpile_named(
        &settings.registry().unwrap(),
        "SELECT a FROM t WHERE a ILIKE 'x%'",
        "generic",
        "sqlite",
        settings.render_options(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        TranspileError::Render(RenderError::Unsupported { .. })
    ));
}

#[test]
fn ignore_level_still_collects_diagnostics() {
    let settings = Settings::from_toml_str(CONFIG).unwrap();
    let out = transpile_named(
        &settings.registry().unwrap(),
        "SELECT TRY_CAST(a AS INT) FROM t",
        "generic",
        "strict_sqlite",
        settings.render_options(),
    )
    .unwrap();
    assert_eq!(out[0].sql, "SELECT CAST(a AS INTEGER) FROM t");
    assert_eq!(out[0].diagnostics.len(), 1);
}

#[test]
fn unknown_names_fail_at_construction() {
    let settings = Settings::from_toml_str(
        r#"
[dialects.broken]
base = "sqlite"
transforms = { json_extract = { rename = "JSON_GET" }, levenshtien = "inner" }
"#,
    )
    .unwrap();
    match settings.registry().unwrap_err() {
        SettingsError::InvalidDialect { name, source } => {
            assert_eq!(name, "broken");
            assert_eq!(source, DialectError::UnknownNodeKind("levenshtien".into()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = Settings::from_toml_str("[render\nidentify = true");
    assert!(matches!(result, Err(SettingsError::ParseError(_))));

    let result = Settings::from_toml_str("[render]\nunsupported_level = \"loud\"");
    assert!(matches!(result, Err(SettingsError::ParseError(_))));
}
