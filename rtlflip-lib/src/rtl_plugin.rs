//! The flip decision hook.
//!
//! A host calls [`StyleHook::on_process_style`] once per rule. The hook
//! decides from the rule, the sheet and its own options whether the rule's
//! declarations get mirrored, and hands them to a [`Mirror`] if so.

use crate::style::declarations::{Declarations, Flip};
use crate::style::rtl_convert::RtlConverter;
use log::trace;
use serde::Deserialize;
use std::fmt;

/// Default policy when neither the rule nor the sheet says anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opt {
    /// Only rules or sheets that ask for it are flipped.
    In,
    /// Everything is flipped unless a rule or sheet opts out.
    #[default]
    Out,
}

/// Plugin options, fixed when the hook is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RtlOptions {
    pub enabled: bool,
    pub opt: Opt,
}

impl Default for RtlOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            opt: Opt::Out,
        }
    }
}

impl RtlOptions {
    fn default_flip(&self) -> bool {
        self.opt == Opt::Out
    }
}

/// Sheet level options the host passes along with every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SheetOptions {
    pub flip: Flip,
}

impl SheetOptions {
    pub fn new(flip: impl Into<Flip>) -> Self {
        Self { flip: flip.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// Plain selector rule.
    Style,
    /// `@font-face`; descriptors only, nothing directional.
    FontFace,
    /// A frame inside `@keyframes`.
    Keyframes,
    /// `@media`, `@supports` and similar containers.
    Conditional(String),
    /// Any other at-rule with a declaration body, e.g. `@viewport`.
    AtRule(String),
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Style => f.write_str("style"),
            RuleKind::FontFace => f.write_str("@font-face"),
            RuleKind::Keyframes => f.write_str("@keyframes"),
            RuleKind::Conditional(name) | RuleKind::AtRule(name) => f.write_str(name),
        }
    }
}

/// Produces the resolved form of a rule's declarations before mirroring.
pub trait Canonicalize: Sync {
    fn canonicalize(&self, declarations: Declarations) -> Declarations;
}

/// Resolves array valued properties to their CSS text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveLists;

impl Canonicalize for ResolveLists {
    fn canonicalize(&self, declarations: Declarations) -> Declarations {
        declarations.map_values(|v| v.resolved())
    }
}

/// What the host knows about the rule being processed.
#[derive(Clone, Copy)]
pub struct RuleDescriptor<'a> {
    pub kind: &'a RuleKind,
    pub canonicalizer: Option<&'a dyn Canonicalize>,
}

impl<'a> RuleDescriptor<'a> {
    pub fn new(kind: &'a RuleKind) -> Self {
        Self {
            kind,
            canonicalizer: None,
        }
    }

    pub fn with_canonicalizer(mut self, canonicalizer: &'a dyn Canonicalize) -> Self {
        self.canonicalizer = Some(canonicalizer);
        self
    }
}

impl fmt::Debug for RuleDescriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("kind", self.kind)
            .field("canonicalizer", &self.canonicalizer.is_some())
            .finish()
    }
}

/// Directional conversion of a declaration set.
pub trait Mirror {
    type Error;

    fn mirror(&self, declarations: Declarations) -> Result<Declarations, Self::Error>;
}

impl<F, E> Mirror for F
where
    F: Fn(Declarations) -> Result<Declarations, E>,
{
    type Error = E;

    fn mirror(&self, declarations: Declarations) -> Result<Declarations, E> {
        self(declarations)
    }
}

/// A per-rule style processing hook.
pub trait StyleHook {
    type Error;

    fn on_process_style(
        &self,
        declarations: Declarations,
        rule: &RuleDescriptor<'_>,
        sheet: &SheetOptions,
    ) -> Result<Declarations, Self::Error>;
}

/// Mirrors rules for right-to-left layouts.
#[derive(Debug, Clone)]
pub struct RtlPlugin<M = RtlConverter> {
    options: RtlOptions,
    mirror: M,
}

/// Builds the hook with the bundled converter.
pub fn rtl(options: RtlOptions) -> RtlPlugin<RtlConverter> {
    RtlPlugin::with_mirror(options, RtlConverter)
}

impl Default for RtlPlugin<RtlConverter> {
    fn default() -> Self {
        rtl(RtlOptions::default())
    }
}

impl<M: Mirror> RtlPlugin<M> {
    pub fn with_mirror(options: RtlOptions, mirror: M) -> Self {
        Self { options, mirror }
    }

    pub fn options(&self) -> &RtlOptions {
        &self.options
    }

    /// Rule marker first, then the sheet, then the plugin default.
    pub fn should_flip(&self, declarations: &Declarations, sheet: &SheetOptions) -> bool {
        declarations
            .flip()
            .as_bool()
            .or(sheet.flip.as_bool())
            .unwrap_or_else(|| self.options.default_flip())
    }

    /// Same as [`StyleHook::on_process_style`].
    pub fn process(
        &self,
        mut declarations: Declarations,
        rule: &RuleDescriptor<'_>,
        sheet: &SheetOptions,
    ) -> Result<Declarations, M::Error> {
        // font-face passes through untouched, marker included
        if *rule.kind == RuleKind::FontFace {
            trace!("skipping {}", rule.kind);
            return Ok(declarations);
        }

        if !self.options.enabled {
            declarations.take_flip();
            return Ok(declarations);
        }

        let flip = self.should_flip(&declarations, sheet);
        declarations.take_flip();
        trace!("{} rule: flip = {}", rule.kind, flip);

        if !flip {
            return Ok(declarations);
        }

        let canonical = match rule.canonicalizer {
            Some(canonicalizer) => canonicalizer.canonicalize(declarations),
            None => declarations,
        };
        self.mirror.mirror(canonical)
    }
}

impl<M: Mirror> StyleHook for RtlPlugin<M> {
    type Error = M::Error;

    fn on_process_style(
        &self,
        declarations: Declarations,
        rule: &RuleDescriptor<'_>,
        sheet: &SheetOptions,
    ) -> Result<Declarations, Self::Error> {
        self.process(declarations, rule, sheet)
    }
}
