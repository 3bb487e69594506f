use rtlflip_lib::parser::style_object;
use rtlflip_lib::sheet::{Rule, StyleSheet};
use rtlflip_lib::{
    rtl, Declarations, Flip, Opt, RtlConverter, RtlOptions, RtlPlugin, RuleDescriptor,
    RuleKind, SheetOptions, StyleHook, Value,
};

#[cfg(test)]
pub mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_style_sheet(json: &str, sheet_flip: Flip) -> StyleSheet {
        style_object::parse_str(json, SheetOptions::new(sheet_flip)).unwrap()
    }

    fn compile(plugin: &RtlPlugin, json: &str, sheet_flip: Flip) -> String {
        create_style_sheet(json, sheet_flip)
            .compile(plugin)
            .unwrap()
            .to_css()
    }

    fn lines(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_simple_usage() {
        let plugin = rtl(RtlOptions::default());
        let sheet = create_style_sheet(r#"{ ".a": { "padding-left": "1px" } }"#, Flip::Unset);
        assert!(sheet.get_rule(".a").is_some());

        let css = sheet.compile(&plugin).unwrap().to_css();
        assert_eq!(css, lines(&[".a {", "  padding-right: 1px;", "}"]));
    }

    #[test]
    fn test_global_disable() {
        let plugin = rtl(RtlOptions {
            enabled: false,
            ..Default::default()
        });
        let css = compile(&plugin, r#"{ ".a": { "padding-left": "1px" } }"#, Flip::Unset);
        assert_eq!(css, lines(&[".a {", "  padding-left: 1px;", "}"]));
    }

    #[test]
    fn test_global_disable_still_strips_flip() {
        let plugin = rtl(RtlOptions {
            enabled: false,
            ..Default::default()
        });
        let css = compile(
            &plugin,
            r#"{ ".a": { "flip": true, "padding-left": "1px" } }"#,
            Flip::Unset,
        );
        assert_eq!(css, lines(&[".a {", "  padding-left: 1px;", "}"]));
    }

    #[test]
    fn test_sheet_opt_out() {
        let plugin = rtl(RtlOptions::default());
        let css = compile(&plugin, r#"{ ".a": { "padding-left": "1px" } }"#, Flip::Off);
        assert_eq!(css, lines(&[".a {", "  padding-left: 1px;", "}"]));
    }

    #[test]
    fn test_rule_beats_sheet_opt_out() {
        let plugin = rtl(RtlOptions::default());
        let css = compile(
            &plugin,
            r#"{ ".a": { "flip": true, "padding-left": "1px" } }"#,
            Flip::Off,
        );
        assert_eq!(css, lines(&[".a {", "  padding-right: 1px;", "}"]));
    }

    #[test]
    fn test_rule_opt_out() {
        let plugin = rtl(RtlOptions::default());
        let css = compile(
            &plugin,
            r#"{
                ".a": { "padding-left": "1px" },
                ".b": { "flip": false, "padding-left": "1px" }
            }"#,
            Flip::Unset,
        );
        assert_eq!(
            css,
            lines(&[
                ".a {",
                "  padding-right: 1px;",
                "}",
                ".b {",
                "  padding-left: 1px;",
                "}",
            ])
        );
    }

    #[test]
    fn test_rule_opt_in() {
        let plugin = rtl(RtlOptions {
            opt: Opt::In,
            ..Default::default()
        });
        let css = compile(
            &plugin,
            r#"{
                ".a": { "padding-left": "1px" },
                ".b": { "flip": true, "padding-left": "1px" }
            }"#,
            Flip::Unset,
        );
        assert_eq!(
            css,
            lines(&[
                ".a {",
                "  padding-left: 1px;",
                "}",
                ".b {",
                "  padding-right: 1px;",
                "}",
            ])
        );
    }

    #[test]
    fn test_font_face_rules() {
        let plugin = rtl(RtlOptions::default());
        let sheet = create_style_sheet(
            r#"{
                "@font-face": [
                    {
                        "font-family": "Roboto",
                        "font-style": "normal",
                        "font-wieght": "normal",
                        "src": "url(/fonts/Roboto.woff2) format(\"woff2\")"
                    },
                    {
                        "font-family": "Roboto",
                        "font-style": "normal",
                        "font-wieght": 300,
                        "src": "url(/fonts/Roboto-Light.woff2) format(\"woff2\")"
                    }
                ]
            }"#,
            Flip::Unset,
        );
        assert!(sheet.get_rule("@font-face").is_some());

        let css = sheet.compile(&plugin).unwrap().to_css();
        assert_eq!(
            css,
            lines(&[
                "@font-face {",
                "  font-family: Roboto;",
                "  font-style: normal;",
                "  font-wieght: normal;",
                "  src: url(/fonts/Roboto.woff2) format(\"woff2\");",
                "}",
                "@font-face {",
                "  font-family: Roboto;",
                "  font-style: normal;",
                "  font-wieght: 300;",
                "  src: url(/fonts/Roboto-Light.woff2) format(\"woff2\");",
                "}",
            ])
        );
    }

    #[test]
    fn test_font_face_keeps_flip_marker() {
        let kind = RuleKind::FontFace;
        let rule = RuleDescriptor::new(&kind);
        let decls: Declarations = [("font-family", "Roboto"), ("src", "url(left.woff2)")]
            .into_iter()
            .collect();
        let decls = decls.with_flip(false);

        let out = rtl(RtlOptions::default())
            .on_process_style(decls.clone(), &rule, &SheetOptions::new(Flip::On))
            .unwrap();
        assert_eq!(out, decls);
        assert_eq!(out.flip(), Flip::Off);
    }

    #[test]
    fn test_round_trip_through_hook() {
        let plugin = rtl(RtlOptions::default());
        let kind = RuleKind::Style;
        let rule = RuleDescriptor::new(&kind);
        let sheet = SheetOptions::default();
        let original: Declarations = [
            ("padding-left", "1px"),
            ("margin-right", "2px"),
            ("border-top-left-radius", "3px"),
            ("float", "right"),
            ("text-align", "left"),
            ("padding", "1px 2px 3px 4px"),
            ("box-shadow", "-1px 2px 3px black"),
            ("background-position", "10.1% 0"),
            ("background-position-x", "0.3%"),
        ]
        .into_iter()
        .collect();

        let once = plugin.process(original.clone(), &rule, &sheet).unwrap();
        assert_ne!(once, original);
        let twice = plugin.process(once, &rule, &sheet).unwrap();
        assert_eq!(twice, original);
    }

    #[test]
    fn test_list_values_are_resolved_before_mirroring() {
        let plugin = rtl(RtlOptions::default());
        let css = compile(
            &plugin,
            r#"{ ".a": {
                "margin": [["1px", "2px", "3px", "4px"], "!important"],
                "box-shadow": [["2px", "0", "red"], ["inset", "-1px", "0", "blue"]]
            } }"#,
            Flip::Unset,
        );
        assert_eq!(
            css,
            lines(&[
                ".a {",
                "  margin: 1px 4px 3px 2px !important;",
                "  box-shadow: -2px 0 red, inset 1px 0 blue;",
                "}",
            ])
        );
    }

    #[test]
    fn test_list_values_are_resolved_in_keyframes_and_at_rules() {
        let plugin = rtl(RtlOptions::default());
        let css = compile(
            &plugin,
            r#"{
                ".a": { "padding": [["1px", "2px", "3px", "4px"]] },
                "@keyframes k": {
                    "to": { "padding": [["1px", "2px", "3px", "4px"]], "margin": "1px 2px 3px 4px" }
                },
                "@page": { "margin": [["1px", "2px", "3px", "4px"]] }
            }"#,
            Flip::Unset,
        );
        assert_eq!(
            css,
            lines(&[
                ".a {",
                "  padding: 1px 4px 3px 2px;",
                "}",
                "@keyframes k {",
                "  to {",
                "    padding: 1px 4px 3px 2px;",
                "    margin: 1px 4px 3px 2px;",
                "  }",
                "}",
                "@page {",
                "  margin: 1px 4px 3px 2px;",
                "}",
            ])
        );
    }

    #[test]
    fn test_custom_mirror_through_sheet() {
        // any Mirror plugs in; this one only renames
        let plugin = RtlPlugin::with_mirror(RtlOptions::default(), |d: Declarations| {
            Ok::<_, std::convert::Infallible>(
                d.into_iter()
                    .map(|(name, value)| (format!("rtl-{}", name), value))
                    .collect::<Declarations>(),
            )
        });
        let mut sheet = StyleSheet::default();
        sheet.add_rule(Rule::style(".a", [("left", Value::from(0))].into_iter().collect()));

        let css = sheet.compile(&plugin).unwrap().to_css();
        assert_eq!(css, lines(&[".a {", "  rtl-left: 0;", "}"]));
    }

    #[test]
    fn test_default_plugin_uses_bundled_converter() {
        let plugin: RtlPlugin = RtlPlugin::with_mirror(RtlOptions::default(), RtlConverter);
        assert_eq!(plugin.options(), &RtlOptions::default());
    }
}
