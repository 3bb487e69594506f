//! Left-to-right / right-to-left conversion of declarations.
//!
//! Property names swap their `left`/`right` parts. Values are only touched
//! for properties where a direction is encoded in the value itself: box
//! shorthands, radii, shadows, translations, background positions, cursors.

use crate::rtl_plugin::Mirror;
use crate::style::declarations::Declarations;
use crate::style::value::{Value, IMPORTANT};
use log::debug;
use std::convert::Infallible;

const NOFLIP: &str = "@noflip";

const LEFT_RIGHT: &[(&str, &str)] = &[("left", "right")];
const DIRECTIONS: &[(&str, &str)] = &[("ltr", "rtl")];
const CURSORS: &[(&str, &str)] = &[
    ("e-resize", "w-resize"),
    ("ne-resize", "nw-resize"),
    ("se-resize", "sw-resize"),
    ("nesw-resize", "nwse-resize"),
];

/// The bundled mirror. Stateless and total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RtlConverter;

impl RtlConverter {
    pub fn convert(&self, declarations: Declarations) -> Declarations {
        let mut converted = Declarations::new().with_flip(declarations.flip());
        for (name, value) in declarations {
            let (name, value) = convert_property(&name, value);
            converted.set(name, value);
        }
        converted
    }
}

impl Mirror for RtlConverter {
    type Error = Infallible;

    fn mirror(&self, declarations: Declarations) -> Result<Declarations, Infallible> {
        Ok(self.convert(declarations))
    }
}

/// Converts one `name: value` pair.
pub fn convert_property(name: &str, value: Value) -> (String, Value) {
    match value {
        Value::Str(raw) if raw.contains(NOFLIP) => (name.to_string(), Value::Str(raw)),
        Value::Str(raw) => {
            let converted = convert_value(&to_kebab(name), &raw);
            (flip_property_name(name), Value::Str(converted))
        }
        Value::List(items) => {
            debug!("`{}` has an unresolved list value, mirroring the name only", name);
            (flip_property_name(name), Value::List(items))
        }
        num => (flip_property_name(name), num),
    }
}

/// `padding-left` -> `padding-right`, `marginLeft` -> `marginRight`.
pub fn flip_property_name(name: &str) -> String {
    name.split('-')
        .map(|segment| match segment {
            "left" => "right".to_string(),
            "right" => "left".to_string(),
            other => swap_camel(other),
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn swap_camel(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len() + 1);
    let mut rest = segment;
    loop {
        let left = rest.find("Left");
        let right = rest.find("Right");
        let (at, from, to) = match (left, right) {
            (Some(l), Some(r)) if r < l => (r, "Right", "Left"),
            (Some(l), _) => (l, "Left", "Right"),
            (None, Some(r)) => (r, "Right", "Left"),
            (None, None) => break,
        };
        out.push_str(&rest[..at]);
        out.push_str(to);
        rest = &rest[at + from.len()..];
    }
    out.push_str(rest);
    out
}

fn to_kebab(name: &str) -> String {
    let mut kebab = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            kebab.push('-');
            kebab.push(ch.to_ascii_lowercase());
        } else {
            kebab.push(ch);
        }
    }
    kebab
}

fn convert_value(property: &str, raw: &str) -> String {
    let (body, important) = match raw.trim_end().strip_suffix(IMPORTANT) {
        Some(body) => (body.trim_end(), true),
        None => (raw, false),
    };

    let converted = match property {
        "direction" => swap_words(body, DIRECTIONS),
        "float" | "clear" | "text-align" => swap_words(body, LEFT_RIGHT),
        "margin" | "padding" | "border-width" | "border-style" | "border-color" | "inset" => {
            four_sides(body)
        }
        "border-radius" => border_radius(body),
        "box-shadow" | "text-shadow" => shadows(body),
        "transform" => transform(body),
        "background-position" | "background-position-x" => background_position(body),
        "cursor" => swap_words(body, CURSORS),
        "transition" | "transition-property" | "will-change" => map_words(body, |word| {
            let flipped = flip_property_name(word);
            (flipped != word).then_some(flipped)
        }),
        _ => return raw.to_string(),
    };

    if important {
        format!("{} {}", converted, IMPORTANT)
    } else {
        converted
    }
}

/// Rewrites every word outside of parentheses for which `f` returns a
/// replacement. A word is a run of alphanumerics, `-` and `_`.
fn map_words(value: &str, f: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(value.len());
    let mut depth = 0usize;
    let mut word_start: Option<usize> = None;

    let flush = |out: &mut String, word: &str| match f(word) {
        Some(replacement) => out.push_str(&replacement),
        None => out.push_str(word),
    };

    for (i, ch) in value.char_indices() {
        let is_word = ch.is_alphanumeric() || ch == '-' || ch == '_';
        if depth == 0 && is_word {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            flush(&mut out, &value[start..i]);
        }
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        out.push(ch);
    }
    if let Some(start) = word_start {
        flush(&mut out, &value[start..]);
    }
    out
}

fn swap_words(value: &str, pairs: &[(&str, &str)]) -> String {
    map_words(value, |word| {
        pairs.iter().find_map(|(a, b)| {
            if word.eq_ignore_ascii_case(a) {
                Some(b.to_string())
            } else if word.eq_ignore_ascii_case(b) {
                Some(a.to_string())
            } else {
                None
            }
        })
    })
}

/// Splits on `separator` outside of parentheses. Empty pieces are dropped
/// when splitting on whitespace.
fn split_top_level(value: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if depth == 0 && (c == separator || (separator == ' ' && c.is_whitespace())) => {
                parts.push(&value[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    if separator == ' ' {
        parts.retain(|p| !p.is_empty());
    }
    parts
}

fn four_sides(value: &str) -> String {
    let parts = split_top_level(value, ' ');
    match parts.as_slice() {
        [top, right, bottom, left] => [*top, *left, *bottom, *right].join(" "),
        _ => value.to_string(),
    }
}

fn border_radius(value: &str) -> String {
    let sides = split_top_level(value, '/');
    if sides.len() > 1 {
        return sides
            .iter()
            .map(|side| radius_corners(side.trim()))
            .collect::<Vec<_>>()
            .join(" / ");
    }
    radius_corners(value)
}

fn radius_corners(value: &str) -> String {
    let parts = split_top_level(value, ' ');
    let swapped = match parts.as_slice() {
        [a, b] => vec![*b, *a],
        [a, b, c] => vec![*b, *a, *b, *c],
        [a, b, c, d] => vec![*b, *a, *d, *c],
        _ => return value.to_string(),
    };
    swapped.join(" ")
}

fn shadows(value: &str) -> String {
    split_top_level(value, ',')
        .iter()
        .map(|shadow| {
            let mut parts: Vec<String> = split_top_level(shadow.trim(), ' ')
                .into_iter()
                .map(str::to_string)
                .collect();
            if let Some(x) = parts.iter_mut().find(|p| is_length(p)) {
                *x = negate(x);
            }
            parts.join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn transform(value: &str) -> String {
    split_top_level(value, ' ')
        .iter()
        .map(|function| translate_x(function))
        .collect::<Vec<_>>()
        .join(" ")
}

fn translate_x(function: &str) -> String {
    let (Some(open), Some(close)) = (function.find('('), function.rfind(')')) else {
        return function.to_string();
    };
    let name = &function[..open];
    if !["translate", "translatex", "translate3d"]
        .iter()
        .any(|t| name.eq_ignore_ascii_case(t))
    {
        return function.to_string();
    }

    let args = &function[open + 1..close];
    let first_end = args.find(',').unwrap_or(args.len());
    let first = &args[..first_end];
    let trimmed = first.trim();
    if !is_length(trimmed) {
        return function.to_string();
    }
    let leading = &first[..first.len() - first.trim_start().len()];
    let trailing = &first[first.trim_end().len()..];
    format!(
        "{}({}{}{}{}){}",
        name,
        leading,
        negate(trimmed),
        trailing,
        &args[first_end..],
        &function[close + 1..]
    )
}

fn background_position(value: &str) -> String {
    split_top_level(value, ',')
        .iter()
        .map(|layer| {
            let parts = split_top_level(layer.trim(), ' ');
            parts
                .iter()
                .enumerate()
                .map(|(i, part)| match *part {
                    "left" => "right".to_string(),
                    "right" => "left".to_string(),
                    p if i == 0 => complement_percent(p).unwrap_or_else(|| p.to_string()),
                    p => p.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// `25%` -> `75%`. The result keeps the input's number of decimals so the
/// conversion is its own inverse.
fn complement_percent(value: &str) -> Option<String> {
    let digits = value.strip_suffix('%')?;
    if digits.contains(&['e', 'E'][..]) {
        return None;
    }
    let number: f64 = digits.parse().ok()?;
    let decimals = digits.split_once('.').map_or(0, |(_, fraction)| fraction.len());
    Some(format!("{:.*}%", decimals, 100.0 - number))
}

fn is_length(token: &str) -> bool {
    let unsigned = token.strip_prefix(&['-', '+'][..]).unwrap_or(token);
    unsigned
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.')
}

/// Flips the sign of a length. An explicit `+` is written as `-` and comes
/// back unsigned, the same as a bare positive length.
fn negate(token: &str) -> String {
    if let Some(positive) = token.strip_prefix('-') {
        return positive.to_string();
    }
    let unsigned = token.strip_prefix('+').unwrap_or(token);
    let is_zero = unsigned
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .all(|c| c == '0' || c == '.');
    if is_zero {
        unsigned.to_string()
    } else {
        format!("-{}", unsigned)
    }
}
