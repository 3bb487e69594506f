use crate::parser::style_object;
use crate::rtl_plugin::{rtl, RtlOptions, SheetOptions};
use crate::style::minify;

pub mod rtl_css {
    use super::*;
    use crate::error::Result;

    /// JSON style object in, CSS out.
    pub fn generate(style_json: &str, options: RtlOptions, sheet: SheetOptions) -> Result<String> {
        let sheet = style_object::parse_str(style_json, sheet)?;
        let compiled = sheet
            .compile(&rtl(options))
            .unwrap_or_else(|never| match never {});
        Ok(compiled.to_css())
    }

    pub fn generate_minified(
        style_json: &str,
        options: RtlOptions,
        sheet: SheetOptions,
    ) -> Result<String> {
        minify::minify(&generate(style_json, options, sheet)?)
    }
}
