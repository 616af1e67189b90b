//! HTML rendering: self-contained pages, no template engine.
//!
//! Every dynamic value goes through [`escape_html`] before it lands in
//! markup.

use crate::config;
use crate::prediction::PredictionResult;

/// Notice shown when the form was submitted without symptoms.
pub const ENTER_SYMPTOMS: &str = "Please enter symptoms";
/// Notice shown when the prediction pipeline failed.
pub const ANALYSIS_FAILED: &str = "We could not analyse those symptoms. Please try again.";

/// Inputs to the analysis page.
#[derive(Debug, Default)]
pub struct AnalysisView<'a> {
    pub symptoms: &'a str,
    pub result: Option<&'a PredictionResult>,
    pub notice: Option<&'a str>,
}

pub fn escape_html(text: &str) -> String {
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

fn layout(title: &str, body: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · {app}</title>
<style>
*,*::before,*::after{{box-sizing:border-box}}
body{{margin:0;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:#fafaf9;color:#1c1917}}
nav{{display:flex;gap:16px;padding:16px 24px;background:#fff;box-shadow:0 1px 4px rgba(0,0,0,.06)}}
nav a{{color:#0f766e;text-decoration:none;font-weight:600}}
main{{max-width:560px;margin:32px auto;padding:0 24px}}
.card{{background:#fff;border-radius:16px;box-shadow:0 4px 24px rgba(0,0,0,.08);padding:32px;margin-bottom:24px}}
label{{display:block;font-weight:600;margin:12px 0 4px}}
input,textarea{{width:100%;padding:12px;border:1px solid #d6d3d1;border-radius:8px;font:inherit}}
textarea{{min-height:120px}}
.btn{{display:inline-block;margin-top:16px;padding:12px 24px;border:none;border-radius:12px;background:#2DD4BF;color:#fff;font-weight:600;cursor:pointer;text-decoration:none}}
.notice{{background:#fef3c7;border:1px solid #fde68a;border-radius:12px;padding:12px 16px;margin-bottom:16px}}
dt{{font-weight:600;margin-top:12px}}
dd{{margin:4px 0 0}}
.note{{font-size:.8rem;color:#78716c;margin-top:16px}}
</style>
</head>
<body>
<nav><a href="/">Home</a><a href="/analysis.html">Analysis</a><a href="/reminder.html">Reminders</a><a href="/signin.html">Sign in</a></nav>
<main>
{body}
</main>
</body>
</html>
"##,
        title = escape_html(title),
        app = config::APP_NAME,
    )
}

pub fn render_home() -> String {
    layout(
        "Home",
        r#"<div class="card">
  <h1>Describe how you feel</h1>
  <p>Type your symptoms in plain words and get a likely condition, related minor conditions, precautions and common medicines.</p>
  <a class="btn" href="/analysis.html">Start analysis</a>
  <p class="note">Results are informational only and do not replace a medical consultation.</p>
</div>"#,
    )
}

pub fn render_signin() -> String {
    layout(
        "Sign in",
        r#"<div class="card">
  <h1>Sign in</h1>
  <form method="post" action="/login">
    <label for="email">Email</label>
    <input id="email" name="email" type="email" required>
    <label for="password">Password</label>
    <input id="password" name="password" type="password" required>
    <button class="btn" type="submit">Sign in</button>
  </form>
  <p class="note">No account yet? <a href="/signup.html">Create one</a>.</p>
</div>"#,
    )
}

pub fn render_signup() -> String {
    layout(
        "Sign up",
        r#"<div class="card">
  <h1>Create an account</h1>
  <form method="post" action="/register">
    <label for="name">Name</label>
    <input id="name" name="name" required>
    <label for="email">Email</label>
    <input id="email" name="email" type="email" required>
    <label for="password">Password</label>
    <input id="password" name="password" type="password" required>
    <button class="btn" type="submit">Sign up</button>
  </form>
</div>"#,
    )
}

pub fn render_reminder() -> String {
    layout(
        "Reminders",
        r#"<div class="card">
  <h1>Medicine reminders</h1>
  <p>Keep a note of when to take each medicine. Reminders stay in this browser only.</p>
  <label for="medicine">Medicine</label>
  <input id="medicine" name="medicine">
  <label for="time">Time</label>
  <input id="time" name="time" type="time">
</div>"#,
    )
}

pub fn render_analysis(view: &AnalysisView<'_>) -> String {
    let notice = view
        .notice
        .map(|n| format!(r#"<div class="notice">{}</div>"#, escape_html(n)))
        .unwrap_or_default();

    let result = view.result.map(render_result).unwrap_or_default();

    let body = format!(
        r#"<div class="card">
  <h1>Symptom analysis</h1>
  {notice}
  <form method="post" action="/analysis.html">
    <label for="symptoms">Describe your symptoms</label>
    <textarea id="symptoms" name="symptoms">{symptoms}</textarea>
    <button class="btn" type="submit">Analyse</button>
  </form>
</div>
{result}"#,
        symptoms = escape_html(view.symptoms),
    );
    layout("Analysis", &body)
}

fn render_result(result: &PredictionResult) -> String {
    format!(
        r#"<div class="card" id="result">
  <h2>Result</h2>
  <dl>
    <dt>Major disease</dt><dd>{major}</dd>
    <dt>Minor disease</dt><dd>{minor}</dd>
    <dt>Precautions</dt><dd>{precautions}</dd>
    <dt>Medicines</dt><dd>{medicines}</dd>
  </dl>
  <p class="note">Please confirm with a doctor before taking any medicine.</p>
</div>"#,
        major = escape_html(result.major.as_str()),
        minor = escape_html(result.minor()),
        precautions = escape_html(result.precautions()),
        medicines = escape_html(result.medicines()),
    )
}
