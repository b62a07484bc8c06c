//! Delivery message rendering
//!
//! Templates carry `{{NAME}}` placeholders. Rendering replaces every
//! occurrence of each supplied variable with plain, non-overlapping string
//! substitution. Unknown placeholders stay verbatim; no escaping, no
//! recursive substitution.

/// Placeholder for the delivered ledger payload
pub const VAR_PRODUCT_DATA: &str = "PRODUK";
/// Placeholder for the product display name
pub const VAR_PRODUCT_NAME: &str = "NAMAPRODUK";

/// Fallback template when a config has no template attached: the message is
/// the raw payload.
pub const DEFAULT_TEMPLATE: &str = "{{PRODUK}}";

/// Render a template against the supplied variables
///
/// Single left-to-right scan, so substituted values are never re-expanded
/// even when they contain placeholder syntax themselves.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = &after[..end];
                match vars.iter().find(|(n, _)| *n == name) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(name);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            // Unterminated opener, keep the tail verbatim
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_all_occurrences() {
        let out = render(
            "Code: {{PRODUK}} for {{NAMAPRODUK}}. Again: {{PRODUK}}",
            &[("PRODUK", "X1,X2"), ("NAMAPRODUK", "Widget")],
        );
        assert_eq!(out, "Code: X1,X2 for Widget. Again: X1,X2");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{{MISSING}}", &[]), "{{MISSING}}");
        assert_eq!(
            render("{{PRODUK}} {{OTHER}}", &[("PRODUK", "v")]),
            "v {{OTHER}}"
        );
    }

    #[test]
    fn test_render_no_recursive_substitution() {
        // A value that itself looks like a placeholder is not re-expanded
        let out = render(
            "{{A}} {{B}}",
            &[("A", "{{B}}"), ("B", "done")],
        );
        assert_eq!(out, "{{B}} done");
    }

    #[test]
    fn test_render_unterminated_opener_kept() {
        assert_eq!(render("hi {{PRODUK", &[("PRODUK", "v")]), "hi {{PRODUK");
    }

    #[test]
    fn test_default_template_is_payload() {
        assert_eq!(render(DEFAULT_TEMPLATE, &[("PRODUK", "acc:pw")]), "acc:pw");
    }
}
