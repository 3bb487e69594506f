use std::fmt;

pub const IMPORTANT: &str = "!important";

/// A single declaration value as a host hands it over.
///
/// `List` is the array syntax for multi-value properties: a flat list is a
/// comma separated value (`font-family`, `transition`), a list of lists is a
/// comma separated list of space separated groups (`padding`, `box-shadow`).
/// Either form may end with the literal `"!important"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Resolves the value into the text that ends up after the colon.
    pub fn to_css(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => format_number(*n),
            Value::List(items) => list_to_css(items),
        }
    }

    /// Resolves a `List` into a `Str`; scalars are returned as they are.
    pub fn resolved(self) -> Value {
        match self {
            Value::List(items) => Value::Str(list_to_css(&items)),
            scalar => scalar,
        }
    }
}

fn is_important(value: &Value) -> bool {
    matches!(value, Value::Str(s) if s == IMPORTANT)
}

fn list_to_css(items: &[Value]) -> String {
    let important = items.last().is_some_and(is_important);
    let body = if important {
        &items[..items.len() - 1]
    } else {
        items
    };

    let nested = matches!(body.first(), Some(Value::List(_)));
    let mut css = if nested {
        body.iter()
            .map(|group| match group {
                Value::List(inner) => join(inner, " "),
                scalar => scalar.to_css(),
            })
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        join(body, ", ")
    };

    if important {
        if !css.is_empty() {
            css.push(' ');
        }
        css.push_str(IMPORTANT);
    }
    css
}

fn join(items: &[Value], separator: &str) -> String {
    items
        .iter()
        .take_while(|v| !is_important(v))
        .map(|v| match v {
            Value::List(inner) => join(inner, " "),
            scalar => scalar.to_css(),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn format_number(n: f64) -> String {
    // f64's Display already drops a trailing ".0"
    format!("{}", n)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n as f64)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
