use crate::color::assigner::{ColorAssigner, OverrideTable};
use crate::color::hex::HexColor;

/// Supplies the color a name is drawn in. Rendering takes the source as a
/// parameter so callers choose between hashed colors and a fixed preview.
pub trait NameColorSource {
    fn name_color(&mut self, name: &str) -> String;
}

impl NameColorSource for ColorAssigner {
    fn name_color(&mut self, name: &str) -> String {
        self.color_for(name)
    }
}

/// Draws every name in one color.
#[derive(Debug, Clone)]
pub struct FixedColor(pub HexColor);

impl NameColorSource for FixedColor {
    fn name_color(&mut self, _name: &str) -> String {
        self.0.as_str().to_string()
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_name(name: &str, source: &mut dyn NameColorSource) -> String {
    let color = source.name_color(name);
    format!(
        "<strong style=\"color:{}\">{}</strong>",
        color,
        escape_html(name.trim())
    )
}

pub fn render_preview(name: &str, color: &HexColor) -> String {
    let mut source = FixedColor(color.clone());
    format!(
        "<b>Preview:</b> {} <small>({})</small>",
        render_name(name, &mut source),
        escape_html(color.as_str())
    )
}

pub fn render_override_list(table: &OverrideTable) -> String {
    if table.is_empty() {
        return "There are no custom colors.".to_string();
    }
    let mut out = format!("<b>Custom colors ({}):</b><br />", table.len());
    let rows: Vec<String> = table
        .iter()
        .map(|(id, color)| {
            let mut source = FixedColor(color.clone());
            format!(
                "{} <small>{}</small>",
                render_name(id.as_str(), &mut source),
                escape_html(color.as_str())
            )
        })
        .collect();
    out.push_str(&rows.join("<br />"));
    out
}

pub fn render_usage() -> String {
    [
        "<b>/customcolor</b> commands:",
        "<code>/customcolor set <i>user</i>, <i>hex</i></code> - give a user a custom name color",
        "<code>/customcolor delete <i>user</i></code> - remove a user's custom color",
        "<code>/customcolor preview <i>user</i>, <i>hex</i></code> - preview a color",
        "<code>/customcolor color <i>user</i></code> - show the color a user currently has",
        "<code>/customcolor list</code> - list all custom colors",
        "<code>/customcolor reload</code> - reload custom colors from disk",
        "<code>/customcolor stats</code> - show color cache statistics",
    ]
    .join("<br />")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_handles_markup() {
        assert_eq!(
            escape_html("<b>\"Tom\" & 'Jerry'</b>"),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#039;Jerry&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn render_name_uses_hashed_source() {
        let mut assigner = ColorAssigner::default();
        assert_eq!(
            render_name("Ash", &mut assigner),
            "<strong style=\"color:#27a836\">Ash</strong>"
        );
    }

    #[test]
    fn render_name_uses_fixed_source() {
        let mut source = FixedColor(HexColor::parse("#abc").unwrap());
        assert_eq!(
            render_name(" <Ash> ", &mut source),
            "<strong style=\"color:#abc\">&lt;Ash&gt;</strong>"
        );
    }

    #[test]
    fn preview_shows_the_color() {
        let preview = render_preview("Ash", &HexColor::parse("#FF0000").unwrap());
        assert!(preview.contains("<strong style=\"color:#FF0000\">Ash</strong>"));
        assert!(preview.ends_with("<small>(#FF0000)</small>"));
    }

    #[test]
    fn override_list_renders_each_entry() {
        let mut assigner = ColorAssigner::default();
        assert_eq!(
            render_override_list(assigner.overrides()),
            "There are no custom colors."
        );
        assigner.set_override("ash", HexColor::parse("#FF0000").unwrap());
        assigner.set_override("misty", HexColor::parse("#00F").unwrap());
        let list = render_override_list(assigner.overrides());
        assert!(list.starts_with("<b>Custom colors (2):</b>"));
        assert!(list.contains("color:#FF0000\">ash</strong>"));
        assert!(list.contains("color:#00F\">misty</strong>"));
    }
}
