//! HTML and JSON renditions of a [`FeatureMatrix`].
//!
//! The HTML fragment is included by the documentation site (Jekyll), so the
//! banner is wrapped in a Liquid comment and the markup uses the site's
//! Bootstrap and Font Awesome classes. Rows are features in table order and
//! columns are providers in name order.

use crate::error::{MatrixError, Result};
use crate::matrix::{FeatureEntry, FeatureMatrix};
use std::collections::BTreeSet;
use std::fmt::Write;

const TOOLTIP_ATTRS: &str = r#"data-toggle="tooltip" data-container="body" data-placement="top""#;

/// Immutable layout settings for the HTML table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixTemplate {
    banner: String,
    table_class: String,
}

impl Default for MatrixTemplate {
    fn default() -> Self {
        Self::new(
            "Matrix generated by feature-matrix from catalogs/providers.json. DO NOT HAND EDIT!",
            "table-header-rotated",
        )
    }
}

impl MatrixTemplate {
    /// `banner` lands inside a Liquid comment block, so any tag delimiters
    /// in it are broken up to keep the block closed.
    pub fn new(banner: &str, table_class: &str) -> Self {
        Self {
            banner: neutralize_liquid(banner),
            table_class: table_class.to_string(),
        }
    }

    /// Render the full fragment. Fails if a provider map names a feature
    /// that is not one of the matrix rows.
    pub fn render(&self, matrix: &FeatureMatrix) -> Result<String> {
        check_feature_names(matrix)?;

        let mut out = String::new();
        writeln!(out, "{{% comment %}}")?;
        writeln!(out, "    {}", self.banner)?;
        writeln!(out, "{{% endcomment %}}")?;
        writeln!(out, "<table class=\"{}\">", escape_html(&self.table_class))?;

        writeln!(out, "<thead>")?;
        writeln!(out, "\t<tr>")?;
        writeln!(out, "\t<th></th>")?;
        for name in matrix.providers.keys() {
            writeln!(
                out,
                "\t<th class=\"rotate\"><div><span>{}</span></div></th>",
                escape_html(name)
            )?;
        }
        writeln!(out, "\t</tr>")?;
        writeln!(out, "</thead>")?;

        writeln!(out, "<tbody>")?;
        for feature in &matrix.features {
            writeln!(out, "\t<tr>")?;
            writeln!(
                out,
                "\t\t<th class=\"row-header\" style=\"text-decoration: underline;\" {} title=\"{}\">{}</th>",
                TOOLTIP_ATTRS,
                escape_html(feature.description),
                escape_html(feature.name)
            )?;
            for features in matrix.providers.values() {
                write_cell(&mut out, features.get(feature.name))?;
            }
            writeln!(out, "\t</tr>")?;
        }
        writeln!(out, "</tbody>")?;
        writeln!(out, "</table>")?;
        Ok(out)
    }
}

fn write_cell(out: &mut String, entry: Option<&FeatureEntry>) -> std::fmt::Result {
    let Some(entry) = entry else {
        return writeln!(out, "\t\t<td><i class=\"fa fa-minus dim\"></i></td>");
    };

    let tooltip = match entry.comment.as_deref().filter(|c| !c.is_empty()) {
        Some(comment) => format!(" {} title=\"{}\"", TOOLTIP_ATTRS, escape_html(comment)),
        None => String::new(),
    };
    let has_tooltip = if tooltip.is_empty() { "" } else { "has-tooltip " };
    let (class, icon) = match entry.has_feature {
        Some(true) => (" class=\"success\"", "fa-check text-success"),
        Some(false) => (" class=\"danger\"", "fa-times text-danger"),
        None => ("", "fa-minus dim"),
    };

    writeln!(out, "\t\t<td{class}{tooltip}>")?;
    writeln!(
        out,
        "\t\t\t<i class=\"fa {has_tooltip}{icon}\" aria-hidden=\"true\"></i>"
    )?;
    writeln!(out, "\t\t</td>")
}

fn check_feature_names(matrix: &FeatureMatrix) -> Result<()> {
    let known: BTreeSet<&str> = matrix.features.iter().map(|def| def.name).collect();
    for (provider, features) in &matrix.providers {
        if let Some(feature) = features.feature_names().find(|name| !known.contains(name)) {
            return Err(MatrixError::UnknownFeature {
                provider: provider.clone(),
                feature: feature.to_string(),
            });
        }
    }
    Ok(())
}

fn neutralize_liquid(raw: &str) -> String {
    raw.replace("{%", "{ %").replace("%}", "% }")
}

/// Pretty JSON rendition, for tooling that wants the data instead of markup.
pub fn render_json(matrix: &FeatureMatrix) -> Result<String> {
    let mut out = serde_json::to_string_pretty(matrix)?;
    out.push('\n');
    Ok(out)
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{FEATURES, ProviderFeatureMap};
    use std::collections::BTreeMap;

    fn matrix_with(provider: &str, map: ProviderFeatureMap) -> FeatureMatrix {
        let mut providers = BTreeMap::new();
        providers.insert(provider.to_string(), map);
        FeatureMatrix {
            features: FEATURES.to_vec(),
            providers,
        }
    }

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<b>"A" & 'B'</b>"#),
            "&lt;b&gt;&#34;A&#34; &amp; &#39;B&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn banner_cannot_close_the_liquid_comment() {
        let template = MatrixTemplate::new("done {% endcomment %} <b>leak</b>", "matrix");
        let html = template
            .render(&matrix_with("FOO", ProviderFeatureMap::default()))
            .unwrap();
        assert_eq!(html.matches("{% endcomment %}").count(), 1);
        assert!(html.contains("done { % endcomment % } <b>leak</b>"));
        assert!(html.find("{% endcomment %}") < html.find("<table"));
    }

    #[test]
    fn absent_entry_renders_plain_dash() {
        let html = MatrixTemplate::default()
            .render(&matrix_with("FOO", ProviderFeatureMap::default()))
            .unwrap();
        let dashes = html
            .matches("<td><i class=\"fa fa-minus dim\"></i></td>")
            .count();
        assert_eq!(dashes, FEATURES.len());
    }

    #[test]
    fn commented_entry_gets_tooltip() {
        let mut map = ProviderFeatureMap::default();
        map.insert(
            "SRV",
            FeatureEntry {
                has_feature: Some(false),
                comment: Some("needs <zone> support".to_string()),
            },
        );
        let html = MatrixTemplate::default()
            .render(&matrix_with("FOO", map))
            .unwrap();
        assert!(html.contains("<td class=\"danger\" data-toggle=\"tooltip\""));
        assert!(html.contains("title=\"needs &lt;zone&gt; support\""));
        assert!(html.contains("fa has-tooltip fa-times text-danger"));
    }

    #[test]
    fn undecided_note_renders_as_dash_not_cross() {
        let mut map = ProviderFeatureMap::default();
        map.insert(
            "CAA",
            FeatureEntry {
                has_feature: None,
                comment: Some("pending".to_string()),
            },
        );
        let html = MatrixTemplate::default()
            .render(&matrix_with("FOO", map))
            .unwrap();
        assert!(html.contains("fa has-tooltip fa-minus dim"));
        assert!(!html.contains("fa-times"));
    }

    #[test]
    fn unknown_feature_is_a_render_error() {
        let mut map = ProviderFeatureMap::default();
        map.insert("MX", FeatureEntry::simple(true));
        let err = MatrixTemplate::default()
            .render(&matrix_with("FOO", map))
            .unwrap_err();
        assert!(matches!(err, MatrixError::UnknownFeature { ref feature, .. } if feature == "MX"));
    }
}
