use crate::calendar::{CalendarGrid, MONTH_NAMES, WEEKDAY_LETTERS};
use crate::picker::Placement;

pub fn render_panel(grid: &CalendarGrid, placement: &Placement) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str(&format!(
        "<div class=\"mdp-panel\" style=\"top:{}px;left:{}px;min-width:{}px\">\n",
        placement.top, placement.left, placement.min_width
    ));

    html.push_str("  <div class=\"mdp-header\">\n");
    html.push_str(
        "    <button type=\"button\" class=\"mdp-arrow\" data-action=\"prev-year\" aria-label=\"Anterior\">&#10094;</button>\n",
    );
    html.push_str(&format!(
        "    <span class=\"mdp-year\">{}</span>\n",
        grid.year
    ));
    html.push_str(
        "    <button type=\"button\" class=\"mdp-arrow\" data-action=\"next-year\" aria-label=\"Siguiente\">&#10095;</button>\n",
    );
    html.push_str("  </div>\n");

    html.push_str("  <select class=\"mdp-month\">\n");
    for (index, name) in MONTH_NAMES.iter().enumerate() {
        let month = index as u32 + 1;
        let selected = if month == grid.month { " selected" } else { "" };
        html.push_str(&format!(
            "    <option value=\"{month}\"{selected}>{}</option>\n",
            escape(name)
        ));
    }
    html.push_str("  </select>\n");

    html.push_str("  <div class=\"mdp-weekdays\">");
    for letter in WEEKDAY_LETTERS {
        html.push_str(&format!("<span>{}</span>", escape(letter)));
    }
    html.push_str("</div>\n");

    html.push_str("  <div class=\"mdp-days\">\n");
    for _ in 0..grid.leading_blanks {
        html.push_str("    <span class=\"mdp-empty\"></span>\n");
    }
    for cell in &grid.days {
        let class = if cell.active { "mdp-day active" } else { "mdp-day" };
        html.push_str(&format!(
            "    <button type=\"button\" class=\"{class}\" data-day=\"{}\">{}</button>\n",
            cell.day, cell.day
        ));
    }
    html.push_str("  </div>\n");

    html.push_str("</div>\n");
    html
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
