use crate::rtl_plugin::{ResolveLists, RuleDescriptor, RuleKind, SheetOptions, StyleHook};
use crate::style::declarations::Declarations;
use log::debug;
use rayon::prelude::*;
use std::fmt;

/// A minimal host style sheet: rules in declaration order plus the sheet
/// options handed to the hook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSheet {
    options: SheetOptions,
    rules: Vec<Rule>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// e.g. `.button { ... }`
    Style {
        selector: String,
        declarations: Declarations,
    },
    FontFace {
        declarations: Declarations,
    },
    /// An at-rule with a plain declaration body, e.g. `@viewport`.
    AtRule {
        name: String,
        declarations: Declarations,
    },
    /// `@media` / `@supports` wrapping nested rules.
    Conditional {
        query: String,
        rules: Vec<Rule>,
    },
    Keyframes {
        name: String,
        frames: Vec<(String, Declarations)>,
    },
}

impl Rule {
    pub fn style(selector: impl Into<String>, declarations: Declarations) -> Self {
        Rule::Style {
            selector: selector.into(),
            declarations,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Style { .. } => RuleKind::Style,
            Rule::FontFace { .. } => RuleKind::FontFace,
            Rule::AtRule { name, .. } => RuleKind::AtRule(name.clone()),
            Rule::Conditional { query, .. } => RuleKind::Conditional(query.clone()),
            Rule::Keyframes { .. } => RuleKind::Keyframes,
        }
    }

    /// The key the rule was declared under.
    pub fn key(&self) -> &str {
        match self {
            Rule::Style { selector, .. } => selector,
            Rule::FontFace { .. } => "@font-face",
            Rule::AtRule { name, .. } => name,
            Rule::Conditional { query, .. } => query,
            Rule::Keyframes { name, .. } => name,
        }
    }

    pub fn declarations(&self) -> Option<&Declarations> {
        match self {
            Rule::Style { declarations, .. }
            | Rule::FontFace { declarations }
            | Rule::AtRule { declarations, .. } => Some(declarations),
            Rule::Conditional { .. } | Rule::Keyframes { .. } => None,
        }
    }

    /// Runs the hook over every declaration block in this rule.
    fn compile<H: StyleHook>(self, hook: &H, sheet: &SheetOptions) -> Result<Rule, H::Error> {
        let kind = self.kind();
        // font-face blocks pass through untouched
        let descriptor = match kind {
            RuleKind::FontFace => RuleDescriptor::new(&kind),
            _ => RuleDescriptor::new(&kind).with_canonicalizer(&ResolveLists),
        };
        Ok(match self {
            Rule::Style {
                selector,
                declarations,
            } => Rule::Style {
                selector,
                declarations: hook.on_process_style(declarations, &descriptor, sheet)?,
            },
            Rule::FontFace { declarations } => Rule::FontFace {
                declarations: hook.on_process_style(declarations, &descriptor, sheet)?,
            },
            Rule::AtRule { name, declarations } => {
                let declarations = hook.on_process_style(declarations, &descriptor, sheet)?;
                Rule::AtRule { name, declarations }
            }
            Rule::Conditional { query, rules } => Rule::Conditional {
                query,
                rules: rules
                    .into_iter()
                    .map(|rule| rule.compile(hook, sheet))
                    .collect::<Result<_, _>>()?,
            },
            Rule::Keyframes { name, frames } => {
                let mut compiled = Vec::with_capacity(frames.len());
                for (selector, declarations) in frames {
                    let declarations = hook.on_process_style(declarations, &descriptor, sheet)?;
                    compiled.push((selector, declarations));
                }
                Rule::Keyframes {
                    name,
                    frames: compiled,
                }
            }
        })
    }

    fn write_css(&self, out: &mut Vec<String>, indent: usize) {
        match self {
            Rule::Style {
                selector,
                declarations,
            } => write_block(out, selector, declarations, indent),
            Rule::FontFace { declarations } => write_block(out, "@font-face", declarations, indent),
            Rule::AtRule { name, declarations } => write_block(out, name, declarations, indent),
            Rule::Conditional { query, rules } => {
                let mut inner = Vec::new();
                for rule in rules {
                    rule.write_css(&mut inner, indent + 1);
                }
                write_container(out, query, inner, indent);
            }
            Rule::Keyframes { name, frames } => {
                let mut inner = Vec::new();
                for (selector, declarations) in frames {
                    write_block(&mut inner, selector, declarations, indent + 1);
                }
                write_container(out, name, inner, indent);
            }
        }
    }
}

fn pad(indent: usize) -> String {
    "  ".repeat(indent)
}

fn write_block(out: &mut Vec<String>, selector: &str, declarations: &Declarations, indent: usize) {
    if declarations.is_empty() {
        return;
    }
    let mut lines = vec![format!("{}{} {{", pad(indent), selector)];
    for (name, value) in declarations.iter() {
        lines.push(format!("{}{}: {};", pad(indent + 1), name, value.to_css()));
    }
    lines.push(format!("{}}}", pad(indent)));
    out.push(lines.join("\n"));
}

fn write_container(out: &mut Vec<String>, header: &str, inner: Vec<String>, indent: usize) {
    if inner.is_empty() {
        return;
    }
    out.push(format!(
        "{}{} {{\n{}\n{}}}",
        pad(indent),
        header,
        inner.join("\n"),
        pad(indent)
    ));
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks = Vec::new();
        self.write_css(&mut blocks, 0);
        f.write_str(&blocks.join("\n"))
    }
}

impl StyleSheet {
    pub fn new(options: SheetOptions) -> Self {
        StyleSheet {
            options,
            rules: Vec::new(),
        }
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule declared under `key` (a selector or an at-rule name).
    pub fn get_rule(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.key() == key)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Calls the hook once per declaration block. Top level rules are
    /// processed in parallel; the result keeps the original order.
    pub fn compile<H>(self, hook: &H) -> Result<StyleSheet, H::Error>
    where
        H: StyleHook + Sync,
        H::Error: Send,
    {
        debug!("compiling {} rules", self.rules.len());
        let options = self.options;
        let rules = self
            .rules
            .into_par_iter()
            .map(|rule| rule.compile(hook, &options))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StyleSheet { options, rules })
    }

    pub fn to_css(&self) -> String {
        let mut blocks = Vec::new();
        for rule in &self.rules {
            rule.write_css(&mut blocks, 0);
        }
        blocks.join("\n")
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}
