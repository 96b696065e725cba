//! Dashboard markup. Sensor-provided text is escaped before it lands in the page.

use std::fmt::Write;

use super::{MoodReport, SensorRow};
use crate::mood::Mood;

pub const PAGE_TITLE: &str = "DevX Mood Analyzer";

const HAPPY_DOG: &str = "https://raw.githubusercontent.com/dektlong/devx-mood/main/happy-dog.jpg";
const SAD_DOG: &str = "https://raw.githubusercontent.com/dektlong/devx-mood/main/sad-dog.jpg";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn header(title: &str) -> String {
    format!("<H1><font color='navy'>{}</font></H1>", escape(title))
}

/// What a viewer gets when the pipeline aborts: the header and nothing else
pub fn header_only_page() -> String {
    header(PAGE_TITLE)
}

pub fn mood_panel(report: &MoodReport) -> String {
    let (color, verdict, closing, image) = match report.mood {
        Mood::Happy => ("green", "exceeds", "Keep it that way!", HAPPY_DOG),
        Mood::Sad => (
            "red",
            "does not meet",
            "We hope it will get better.",
            SAD_DOG,
        ),
    };
    format!(
        "<H2><font color='{color}'>The team's true happiness is at {percent} percent. \
         It {verdict} the {threshold} percent threshold. <BR>{closing}</font>\
         <BR><BR><img src='{image}' alt=''></H2>",
        percent = report.happy_percent,
        threshold = report.happy_threshold,
    )
}

pub fn data_title(title: &str) -> String {
    format!("<BR><BR><font color='purple'>{}</font><BR>", escape(title))
}

/// `content` is inserted as-is; callers escape anything untrusted
pub fn data_content(content: &str) -> String {
    format!("<font color='gray'>{}</font>", content)
}

pub fn results_table(rows: &[SensorRow]) -> String {
    let mut out = String::from("<table border='1'>");
    out.push_str("<tr style='color:grey' align='center'>");
    out.push_str("<th>Sensor</th><th>Role</th><th>Current Mood</th><th>Pre-Existing</th>");
    out.push_str("</tr>");

    for row in rows {
        let _ = write!(
            out,
            "<tr style='color:grey' align='left'><td>{}</td><td>{}&nbsp;</td><td>{}&nbsp;</td><td>{}</td></tr>",
            row.id,
            escape(&row.role),
            escape(&row.mood),
            escape(&row.legacy),
        );
    }

    out.push_str("</table>");
    out
}

pub fn render_page(report: &MoodReport) -> String {
    let mut page = header(PAGE_TITLE);
    page.push_str(&mood_panel(report));
    page.push_str(&data_title("/activate"));
    page.push_str(&data_content("All sensors activated successfully"));
    page.push_str(&data_title("/measure"));
    page.push_str(&data_content(&results_table(&report.rows)));
    page
}
