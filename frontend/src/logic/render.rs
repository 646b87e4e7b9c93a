//! HTML rendering
//!
//! One page: engine parameter form and prediction result side by side, CSV
//! upload and batch table below.

use std::fmt::Write;

use super::backend::SinglePrediction;
use super::batch::CsvTable;
use super::form::{FormValues, ENGINE_FIELDS};
use crate::constants::{APP_NAME, APP_VERSION};

/// Outcome shown in the single-record panel
#[derive(Debug, Clone, PartialEq)]
pub enum SingleView {
    Empty,
    Result(SinglePrediction),
    Error(String),
}

/// Outcome shown in the batch panel
#[derive(Debug, Clone, PartialEq)]
pub enum BatchView {
    Empty,
    Table(CsvTable),
    Error(String),
}

pub fn verdict(prediction: &SinglePrediction) -> &'static str {
    if prediction.prediction == 1 {
        "⚠️ Engine needs maintenance"
    } else {
        "✅ Engine operating normally"
    }
}

/// Probability as a percentage with two decimals
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

pub fn page(values: &FormValues, single: &SingleView, batch: &BatchView) -> String {
    let mut html = String::new();

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{name}</title>
<style>{style}</style>
</head>
<body>
<h1>🏖️ {name}</h1>
<p>The Predict Maintenance app helps to predict if an engine needs maintenance based on operating sensor parameters.<br>
<em>Suggested ranges are based on known information - input is not restricted to the specified range</em></p>
<div class="columns">
"#,
        name = APP_NAME,
        style = STYLE,
    );

    render_form(&mut html, values);
    render_single(&mut html, single);
    html.push_str("</div>\n<hr>\n");
    render_batch(&mut html, batch);

    let _ = write!(html, "<footer>v{}</footer>\n</body>\n</html>\n", APP_VERSION);
    html
}

fn render_form(html: &mut String, values: &FormValues) {
    html.push_str(
        "<section class=\"card input-card\">\n<h2>🔧 Engine Parameters</h2>\n\
         <form method=\"post\" action=\"/predict\">\n<div class=\"grid\">\n",
    );

    for field in ENGINE_FIELDS {
        let value = values.get(field.key).map(String::as_str).unwrap_or("");
        let _ = write!(
            html,
            "<label>{label} ({hint})<input type=\"text\" inputmode=\"decimal\" name=\"{key}\" value=\"{value}\"></label>\n",
            label = escape(field.label),
            hint = escape(field.hint),
            key = field.key,
            value = escape(value),
        );
    }

    html.push_str("</div>\n<button type=\"submit\">🚀 Check Maintenance</button>\n</form>\n</section>\n");
}

fn render_single(html: &mut String, single: &SingleView) {
    html.push_str("<section class=\"card output-card\">\n<h2>🧠 Prediction Result</h2>\n");

    match single {
        SingleView::Empty => {}
        SingleView::Result(prediction) => {
            let class = if prediction.prediction == 1 { "alert error" } else { "alert success" };
            let _ = write!(
                html,
                "<div class=\"{class}\">{verdict}</div>\n\
                 <div class=\"metric\"><span>Failure Probability</span><strong>{probability}</strong></div>\n\
                 <p><em>Model :</em> XGBoost<br><em>Inference :</em> Real-time<br>\
                 <em>Note :</em> Probability of 50% and above is considered as Maintenance Needed.</p>\n",
                class = class,
                verdict = verdict(prediction),
                probability = format_probability(prediction.probability),
            );
        }
        SingleView::Error(message) => {
            let _ = writeln!(html, "<div class=\"alert error\">⚠️ {}</div>", escape(message));
        }
    }

    html.push_str("</section>\n");
}

fn render_batch(html: &mut String, batch: &BatchView) {
    html.push_str(
        "<section>\n<h2>Batch Prediction for Engine Maintenance</h2>\n\
         <p><em>Select csv file with engine sensor parameters to find prediction for all readings</em></p>\n\
         <form method=\"post\" action=\"/predict-batch\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"file\" accept=\".csv\">\n\
         <button type=\"submit\">🚀 Check Maintenance</button>\n</form>\n",
    );

    match batch {
        BatchView::Empty => {}
        BatchView::Table(table) => {
            html.push_str(
                "<div class=\"alert success\">Batch prediction completed successfully</div>\n\
                 <p><em>Prediction : 1 denotes Maintenance is needed</em></p>\n\
                 <p><em>Probability : This column indicates failure probability. Value ranges from 0 to 1. \
                 Value of 0.5 (50%) and above is considered as Maintenance Needed</em></p>\n",
            );
            render_table(html, table);
        }
        BatchView::Error(message) => {
            let _ = writeln!(html, "<div class=\"alert error\">{}</div>", escape(message));
        }
    }

    html.push_str("</section>\n");
}

fn render_table(html: &mut String, table: &CsvTable) {
    html.push_str("<table>\n<thead><tr>");
    for header in &table.headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");
}

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 1rem 2rem; background: #0b1220; color: #e5e7eb; }
.columns { display: grid; grid-template-columns: 3fr 1.5fr; gap: 20px; }
.card { border-radius: 16px; padding: 22px; margin-bottom: 20px; }
.input-card { background: linear-gradient(145deg, #0f172a, #111827); border: 1px solid #334155; }
.output-card { background: linear-gradient(145deg, #111827, #0b1220); border: 1px solid #16a34a; }
.grid { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
label { display: flex; flex-direction: column; gap: 4px; }
button { width: 100%; margin-top: 12px; border-radius: 10px; height: 3em; font-weight: 600;
         background: linear-gradient(90deg, #2563eb, #1d4ed8); color: white; border: none; }
.alert { padding: 12px; border-radius: 8px; margin: 8px 0; }
.alert.error { background: #7f1d1d; }
.alert.success { background: #14532d; }
.metric { display: flex; flex-direction: column; margin: 12px 0; }
.metric strong { font-size: 2rem; }
table { border-collapse: collapse; width: 100%; margin-top: 12px; }
th, td { border: 1px solid #334155; padding: 4px 8px; text-align: right; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::form::default_values;

    #[test]
    fn test_verdict_follows_backend_class() {
        // A low probability with class 1 still reads as maintenance needed
        let flagged = SinglePrediction { prediction: 1, probability: 0.2 };
        let normal = SinglePrediction { prediction: 0, probability: 0.9 };

        assert_eq!(verdict(&flagged), "⚠️ Engine needs maintenance");
        assert_eq!(verdict(&normal), "✅ Engine operating normally");
    }

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(0.5), "50.00%");
        assert_eq!(format_probability(0.87314), "87.31%");
        assert_eq!(format_probability(1.0), "100.00%");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"x\" & 'y'</b>"), "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;");
    }

    #[test]
    fn test_page_renders_result_and_defaults() {
        let single = SingleView::Result(SinglePrediction { prediction: 1, probability: 0.8731 });
        let html = page(&default_values(), &single, &BatchView::Empty);

        assert!(html.contains("name=\"Engine_rpm\" value=\"735.00\""));
        assert!(html.contains("Engine needs maintenance"));
        assert!(html.contains("87.31%"));
        assert!(!html.contains("Batch prediction completed"));
    }

    #[test]
    fn test_page_escapes_errors_and_cells() {
        let table = CsvTable {
            headers: vec!["<script>".to_string()],
            rows: vec![vec!["a&b".to_string()]],
        };
        let html = page(
            &default_values(),
            &SingleView::Error("bad <input>".to_string()),
            &BatchView::Table(table),
        );

        assert!(html.contains("bad &lt;input&gt;"));
        assert!(html.contains("<th>&lt;script&gt;</th>"));
        assert!(html.contains("<td>a&amp;b</td>"));
    }
}
