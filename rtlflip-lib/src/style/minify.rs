use crate::error::{Error, Result};
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{ParserOptions, StyleSheet as LightningStyleSheet};

/// Re-prints compiled CSS through LightningCSS, minified. Also serves as a
/// check that the output is CSS a browser will accept.
pub fn minify(css: &str) -> Result<String> {
    let sheet = LightningStyleSheet::parse(css, ParserOptions::default())
        .map_err(|e| Error::Css(e.to_string()))?;
    let printed = sheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| Error::Css(e.to_string()))?;
    Ok(printed.code)
}
