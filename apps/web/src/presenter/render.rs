//! HTML rendering of the page: the submission form, the inline error area and
//! the analysis report.

use std::fmt::Write;

use crate::models::analysis::{Dimension, MAX_SCORE};
use crate::models::{AnalysisResult, Company};
use crate::page::Page;
use crate::selection::{Selection, SUGGESTED_MAX_FILES};

const DOCUMENT_ACCEPT: &str = ".pdf,.doc,.docx,.txt,application/pdf";
const SUBMIT_LABEL: &str = "Analyze";
const SUBMIT_BUSY_LABEL: &str = "Analyzing…";
/// Disables and relabels the submit button in the browser as the form is sent.
const DISABLE_ON_SUBMIT: &str = "var b=this.querySelector('button[type=submit]');\
                                 b.disabled=true;b.textContent='Analyzing…';";

pub fn render_page(page: &Page) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Scorecard</title>\n</head>\n<body>\n<main>\n<h1>Scorecard</h1>\n",
    );

    render_form(&mut html, &page.selection, page.is_in_flight());

    if let Some(message) = page.error() {
        let _ = writeln!(
            html,
            "<p class=\"error\" role=\"alert\">{}</p>",
            escape(message)
        );
    }
    if let Some(result) = page.result() {
        render_result(&mut html, result);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_form(html: &mut String, selection: &Selection, in_flight: bool) {
    let _ = writeln!(
        html,
        "<form method=\"post\" action=\"/analyze\" enctype=\"multipart/form-data\" \
         onsubmit=\"{DISABLE_ON_SUBMIT}\">\n\
         <label for=\"ticker\">Company</label>\n<select id=\"ticker\" name=\"ticker\">"
    );
    for company in Company::ALL {
        let selected = if company == selection.company() {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            html,
            "<option value=\"{}\"{selected}>{}</option>",
            company.ticker(),
            company.label()
        );
    }
    html.push_str("</select>\n");

    let _ = writeln!(
        html,
        "<label for=\"files\">Documents</label>\n\
         <input id=\"files\" type=\"file\" name=\"files\" multiple accept=\"{DOCUMENT_ACCEPT}\">\n\
         <p class=\"hint\">Attach up to {SUGGESTED_MAX_FILES} documents.</p>"
    );

    if !selection.is_empty() {
        html.push_str("<ul class=\"selected-files\">\n");
        for file in selection.files() {
            let _ = writeln!(html, "<li>{}</li>", escape(&file.file_name));
        }
        html.push_str("</ul>\n");
    }
    if selection.exceeds_guidance() {
        let _ = writeln!(
            html,
            "<p class=\"notice\">{} documents selected; more than {SUGGESTED_MAX_FILES} may slow the analysis.</p>",
            selection.files().len()
        );
    }

    if in_flight {
        let _ = writeln!(html, "<button type=\"submit\" disabled>{SUBMIT_BUSY_LABEL}</button>");
    } else {
        let _ = writeln!(html, "<button type=\"submit\">{SUBMIT_LABEL}</button>");
    }
    html.push_str("</form>\n");
}

fn render_result(html: &mut String, result: &AnalysisResult) {
    let _ = writeln!(
        html,
        "<section class=\"result\">\n<h2>Analysis for {}</h2>",
        escape(&result.ticker)
    );
    for dimension in result.dimensions() {
        render_dimension(html, &dimension);
    }
    let _ = writeln!(
        html,
        "<h3>Summary</h3>\n<p>{}</p>\n<p class=\"run-id\">Run {}</p>\n\
         <a href=\"/export\" download>Export JSON</a>\n</section>",
        escape(&result.summary),
        escape(&result.run_id)
    );
}

fn render_dimension(html: &mut String, dimension: &Dimension<'_>) {
    let _ = writeln!(
        html,
        "<h3>{} score: {}/{MAX_SCORE}</h3>\n<p>{}</p>",
        dimension.title,
        dimension.score,
        escape(dimension.justification)
    );
    // Heading is omitted along with an empty list.
    if dimension.recommendations.is_empty() {
        return;
    }
    html.push_str("<h4>Recommendations</h4>\n<ul>\n");
    for item in dimension.recommendations {
        let _ = writeln!(html, "<li>{}</li>", escape(item));
    }
    html.push_str("</ul>\n");
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
