use crate::error::{Error, Result};
use crate::rtl_plugin::SheetOptions;
use crate::sheet::{Rule, StyleSheet};
use crate::style::declarations::Declarations;
use crate::style::value::Value;
use log::warn;
use serde_json::{Map, Value as Json};

const CONDITIONAL_PREFIXES: &[&str] = &["@media", "@supports", "@container", "@layer"];

/// Reads a JSON style object (`{ ".a": { "padding-left": "1px" } }`) into a
/// style sheet. Keys keep their order.
pub fn parse_str(json: &str, options: SheetOptions) -> Result<StyleSheet> {
    let root: Json = serde_json::from_str(json)?;
    from_json(&root, options)
}

pub fn from_json(root: &Json, options: SheetOptions) -> Result<StyleSheet> {
    let rules = as_object("<root>", root)?;
    let mut sheet = StyleSheet::new(options);
    for (key, body) in rules {
        for rule in parse_rule(key, body)? {
            sheet.add_rule(rule);
        }
    }
    Ok(sheet)
}

fn parse_rule(key: &str, body: &Json) -> Result<Vec<Rule>> {
    if key == "@font-face" {
        // one block or a list of them
        return match body {
            Json::Array(faces) => faces
                .iter()
                .map(|face| {
                    Ok(Rule::FontFace {
                        declarations: parse_declarations(key, face)?,
                    })
                })
                .collect(),
            face => Ok(vec![Rule::FontFace {
                declarations: parse_declarations(key, face)?,
            }]),
        };
    }

    if CONDITIONAL_PREFIXES.iter().any(|p| key.starts_with(p)) {
        let mut rules = Vec::new();
        for (nested_key, nested_body) in as_object(key, body)? {
            rules.extend(parse_rule(nested_key, nested_body)?);
        }
        return Ok(vec![Rule::Conditional {
            query: key.to_string(),
            rules,
        }]);
    }

    if key.starts_with("@keyframes") {
        let frames = as_object(key, body)?
            .iter()
            .map(|(frame, decls)| {
                let at = format!("{} {}", key, frame);
                Ok((frame.clone(), parse_declarations(&at, decls)?))
            })
            .collect::<Result<_>>()?;
        return Ok(vec![Rule::Keyframes {
            name: key.to_string(),
            frames,
        }]);
    }

    let declarations = parse_declarations(key, body)?;
    if key.starts_with('@') {
        Ok(vec![Rule::AtRule {
            name: key.to_string(),
            declarations,
        }])
    } else {
        Ok(vec![Rule::style(key, declarations)])
    }
}

fn parse_declarations(at: &str, body: &Json) -> Result<Declarations> {
    let mut declarations = Declarations::new();
    for (name, value) in as_object(at, body)? {
        if name == "flip" {
            match value {
                Json::Bool(flip) => declarations.set_flip(*flip),
                other => warn!("ignoring non-boolean `flip` in `{}`: {}", at, other),
            }
            continue;
        }
        let value = parse_value(&format!("{} {}", at, name), value)?;
        declarations.set(name.as_str(), value);
    }
    Ok(declarations)
}

fn parse_value(at: &str, value: &Json) -> Result<Value> {
    match value {
        Json::String(s) => Ok(Value::Str(s.clone())),
        Json::Number(n) => n
            .as_f64()
            .map(Value::Num)
            .ok_or_else(|| Error::invalid_style(at, "number out of range")),
        Json::Array(items) => items
            .iter()
            .map(|item| parse_value(at, item))
            .collect::<Result<Vec<_>>>()
            .map(Value::List),
        Json::Object(_) => Err(Error::invalid_style(at, "nested rules are not supported")),
        Json::Bool(_) | Json::Null => Err(Error::invalid_style(
            at,
            format!("expected a string, number or array, found `{}`", value),
        )),
    }
}

fn as_object<'a>(at: &str, body: &'a Json) -> Result<&'a Map<String, Json>> {
    body.as_object()
        .ok_or_else(|| Error::invalid_style(at, "expected an object"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::declarations::Flip;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keys_keep_order() {
        let sheet = parse_str(
            r#"{ "b": { "z-index": 1, "color": "red" }, "a": { "margin": 0 } }"#,
            SheetOptions::default(),
        )
        .unwrap();
        let keys: Vec<_> = sheet.rules().iter().map(Rule::key).collect();
        assert_eq!(keys, vec!["b", "a"]);
        let names: Vec<_> = sheet.rules()[0].declarations().unwrap().names().collect();
        assert_eq!(names, vec!["z-index", "color"]);
    }

    #[test]
    fn test_flip_marker() {
        let sheet = parse_str(
            r#"{ "a": { "flip": false, "padding-left": "1px" }, "b": { "flip": "yes" } }"#,
            SheetOptions::default(),
        )
        .unwrap();
        let a = sheet.get_rule("a").and_then(Rule::declarations).unwrap();
        assert_eq!(a.flip(), Flip::Off);
        assert!(!a.contains("flip"));

        let b = sheet.get_rule("b").and_then(Rule::declarations).unwrap();
        assert_eq!(b.flip(), Flip::Unset);
        assert!(b.is_empty());
    }

    #[test]
    fn test_font_face_list() {
        let sheet = parse_str(
            r#"{ "@font-face": [ { "font-family": "A" }, { "font-family": "B" } ] }"#,
            SheetOptions::default(),
        )
        .unwrap();
        assert_eq!(sheet.len(), 2);
        assert!(sheet
            .rules()
            .iter()
            .all(|rule| matches!(rule, Rule::FontFace { .. })));
    }

    #[test]
    fn test_at_rules() {
        let sheet = parse_str(
            r#"{
                "@media print": { ".a": { "float": "left" } },
                "@keyframes spin": { "from": { "left": 0 }, "to": { "left": "10px" } },
                "@viewport": { "width": "device-width" }
            }"#,
            SheetOptions::default(),
        )
        .unwrap();
        assert!(matches!(&sheet.rules()[0], Rule::Conditional { rules, .. } if rules.len() == 1));
        assert!(matches!(&sheet.rules()[1], Rule::Keyframes { frames, .. } if frames.len() == 2));
        assert!(matches!(&sheet.rules()[2], Rule::AtRule { name, .. } if name == "@viewport"));
    }

    #[test]
    fn test_list_values() {
        let sheet = parse_str(
            r#"{ "a": { "padding": [[1, "2px"], "!important"] } }"#,
            SheetOptions::default(),
        )
        .unwrap();
        let decls = sheet.get_rule("a").and_then(Rule::declarations).unwrap();
        assert_eq!(decls.get("padding").unwrap().to_css(), "1 2px !important");
    }

    #[test]
    fn test_rejects_nested_rules() {
        let err = parse_str(
            r#"{ "a": { "&:hover": { "color": "red" } } }"#,
            SheetOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidStyle { .. }));
    }

    #[test]
    fn test_rejects_non_object_root() {
        assert!(parse_str("[]", SheetOptions::default()).is_err());
        assert!(matches!(
            parse_str("{", SheetOptions::default()),
            Err(Error::Json(_))
        ));
    }
}
