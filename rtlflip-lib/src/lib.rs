pub mod config;
pub mod error;
pub mod rtl_generate;
pub mod rtl_plugin;
pub mod sheet;

pub mod parser {
    pub mod style_object;
}

pub mod style {
    pub mod declarations;
    pub mod minify;
    pub mod rtl_convert;
    pub mod value;
}

pub use error::{Error, Result};
pub use rtl_plugin::{
    rtl, Canonicalize, Mirror, Opt, ResolveLists, RtlOptions, RtlPlugin, RuleDescriptor,
    RuleKind, SheetOptions, StyleHook,
};
pub use style::declarations::{Declarations, Flip};
pub use style::rtl_convert::RtlConverter;
pub use style::value::Value;
