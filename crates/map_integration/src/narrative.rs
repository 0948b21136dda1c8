//! Turn-by-turn narrative table for a computed route.

use serde::Serialize;

use crate::route::{Maneuver, Route};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NarrativeRow {
    /// Icon first, then sign images, in response order.
    pub images: Vec<String>,
    pub narrative: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NarrativeTable {
    pub rows: Vec<NarrativeRow>,
}

/// One row per maneuver, legs in order and maneuvers in order within a leg.
pub fn render_narrative(route: &Route) -> NarrativeTable {
    NarrativeTable {
        rows: route.maneuvers().map(narrative_row).collect(),
    }
}

fn narrative_row(maneuver: &Maneuver) -> NarrativeRow {
    let images = maneuver
        .icon_url
        .iter()
        .map(String::as_str)
        .chain(maneuver.signs.iter().map(|sign| sign.url.as_str()))
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .collect();

    NarrativeRow {
        images,
        narrative: maneuver.narrative.clone(),
    }
}

impl NarrativeTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<table class=\"narrative\">\n");
        for row in &self.rows {
            html.push_str("  <tr>\n    <td class=\"images\">");
            for url in &row.images {
                html.push_str(&format!("<img src=\"{}\">", escape_html(url)));
            }
            html.push_str(&format!(
                "</td>\n    <td class=\"text\">{}</td>\n  </tr>\n",
                escape_html(&row.narrative)
            ));
        }
        html.push_str("</table>\n");
        html
    }

    /// Plain listing for terminals: step number, narrative, then image count.
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for (idx, row) in self.rows.iter().enumerate() {
            text.push_str(&format!("{:>3}. {}", idx + 1, row.narrative));
            if !row.images.is_empty() {
                text.push_str(&format!(" [{} image(s)]", row.images.len()));
            }
            text.push('\n');
        }
        text
    }
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
