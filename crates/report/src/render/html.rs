//! Styled, self-contained HTML representation

use std::path::Path;

use crate::render::{html_escape, humanize_key, Footer};
use crate::types::FailureReport;

const STYLE: &str = r#"        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 1200px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        h1 {
            color: #dc2626;
            border-bottom: 3px solid #dc2626;
            padding-bottom: 10px;
        }
        h2 {
            color: #1f2937;
            margin-top: 30px;
            border-bottom: 2px solid #e5e7eb;
            padding-bottom: 5px;
        }
        .badge {
            display: inline-block;
            padding: 4px 12px;
            border-radius: 4px;
            font-size: 14px;
            font-weight: bold;
        }
        .badge-failed {
            background-color: #fee2e2;
            color: #991b1b;
        }
        .info-box {
            background-color: #f9fafb;
            border-left: 4px solid #3b82f6;
            padding: 15px;
            margin: 15px 0;
        }
        .error-box {
            background-color: #fef2f2;
            border-left: 4px solid #dc2626;
            padding: 15px;
            margin: 15px 0;
            font-family: 'Courier New', monospace;
            white-space: pre-wrap;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin: 15px 0;
        }
        table td {
            padding: 10px;
            border-bottom: 1px solid #e5e7eb;
        }
        table td:first-child {
            width: 200px;
            font-weight: 600;
        }
        code {
            background-color: #f3f4f6;
            padding: 2px 6px;
            border-radius: 3px;
            font-family: 'Courier New', monospace;
            font-size: 0.9em;
        }
        .screenshot img {
            max-width: 100%;
            border: 1px solid #ddd;
            border-radius: 4px;
            margin: 10px 0;
        }
        ol, ul {
            margin: 10px 0;
            padding-left: 30px;
        }
        .footer {
            margin-top: 40px;
            padding-top: 20px;
            border-top: 1px solid #e5e7eb;
            color: #6b7280;
            font-size: 0.9em;
        }
"#;

pub fn render(report: &FailureReport, footer: Footer<'_>) -> String {
    let test_name = html_escape(&report.test_name);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("    <title>Bug Report: {}</title>\n", test_name));
    html.push_str("    <style>\n");
    html.push_str(STYLE);
    html.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");

    html.push_str(&format!("        <h1>🐛 Bug Report: {}</h1>\n", test_name));
    html.push_str(&format!(
        r#"        <div class="info-box">
            <p><strong>Report ID:</strong> {}</p>
            <p><strong>Date:</strong> {}</p>
            <p><strong>Status:</strong> <span class="badge badge-failed">{}</span></p>
        </div>
"#,
        html_escape(report.report_id.as_str()),
        html_escape(&report.timestamp),
        report.status
    ));

    html.push_str(&format!(
        r#"        <h2>Test Information</h2>
        <div class="info-box">
            <p><strong>Test Name:</strong> <code>{}</code></p>
        </div>
"#,
        test_name
    ));

    html.push_str("        <h2>Failure Message</h2>\n");
    html.push_str(&format!(
        "        <div class=\"error-box\">{}</div>\n",
        html_escape(&report.failure_message)
    ));

    html.push_str("        <h2>Test Steps</h2>\n");
    if report.test_steps.is_empty() {
        html.push_str("        <p>No steps provided.</p>\n");
    } else {
        html.push_str("        <ol>");
        for step in &report.test_steps {
            html.push_str(&format!("<li>{}</li>", html_escape(step)));
        }
        html.push_str("</ol>\n");
    }

    html.push_str(&format!(
        r#"        <h2>Expected vs Actual Results</h2>
        <table>
            <tr>
                <td>Expected Result</td>
                <td>{}</td>
            </tr>
            <tr>
                <td>Actual Result</td>
                <td>{}</td>
            </tr>
        </table>
"#,
        html_escape(&report.expected_result),
        html_escape(&report.actual_result)
    ));

    if let Some(path) = &report.screenshot {
        html.push_str(&format!(
            r#"        <div class="screenshot">
            <h3>Screenshot</h3>
            <img src="{}" alt="Test Failure Screenshot">
            <p><strong>Screenshot Path:</strong> <code>{}</code></p>
        </div>
"#,
            html_escape(&absolute_display(path)),
            html_escape(path)
        ));
    }

    html.push_str("        <h2>Environment Information</h2>\n        <table>\n");
    for (key, value) in &report.environment {
        html.push_str(&format!(
            "            <tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
            html_escape(&humanize_key(key)),
            html_escape(value)
        ));
    }
    html.push_str("        </table>\n");

    if !report.additional_info.is_empty() {
        html.push_str("        <h2>Additional Information</h2>\n        <table>\n");
        for (key, value) in &report.additional_info {
            html.push_str(&format!(
                "            <tr><td><strong>{}</strong></td><td>{}</td></tr>\n",
                html_escape(key),
                html_escape(&value.to_string())
            ));
        }
        html.push_str("        </table>\n");
    }

    html.push_str(
        r#"        <h2>Reproduction Steps</h2>
        <ol><li>Navigate to the application</li><li>Follow the test steps mentioned above</li><li>Observe the failure</li></ol>
"#,
    );

    html.push_str(&format!(
        r#"        <div class="footer">
            <p><strong>Generated by:</strong> {}</p>
            <p><strong>Report Location:</strong> <code>{}</code></p>
        </div>
"#,
        html_escape(footer.framework_name),
        html_escape(&footer.location.display().to_string())
    ));

    html.push_str("    </div>\n</body>\n</html>\n");
    html
}

/// Absolute form of the screenshot path for the `<img>` source. Resolved
/// against the working directory only; the file itself is not touched.
fn absolute_display(path: &str) -> String {
    std::path::absolute(Path::new(path))
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    fn footer() -> Footer<'static> {
        Footer {
            framework_name: "StyleZone Test Automation Framework",
            location: Path::new("bug_reports/BUG_20261015_101112.html"),
        }
    }

    #[test]
    fn test_badge_and_error_box() {
        let html = render(&fixtures::report(), footer());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<span class="badge badge-failed">FAILED</span>"#));
        assert!(html.contains(
            r#"<div class="error-box">AssertionError: expected cart count 2, got 0</div>"#
        ));
        assert!(html.contains("<ol><li>Add two items</li><li>Open cart</li></ol>"));
        assert!(html.contains("<tr><td><strong>Browser Version</strong></td><td>129.0</td></tr>"));
    }

    #[test]
    fn test_self_contained() {
        let html = render(&fixtures::report(), footer());
        assert!(html.contains("<style>"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut report = fixtures::report();
        report.failure_message = "expected <div class=\"cart\"> & got nothing".to_string();

        let html = render(&report, footer());
        assert!(html.contains("expected &lt;div class=&quot;cart&quot;&gt; &amp; got nothing"));
        assert!(!html.contains("<div class=\"cart\">"));
    }

    #[test]
    fn test_placeholders_when_empty() {
        let mut report = fixtures::report();
        report.test_steps.clear();
        report.additional_info.clear();

        let html = render(&report, footer());
        assert!(html.contains("<p>No steps provided.</p>"));
        assert!(!html.contains("class=\"screenshot\""));
        assert!(!html.contains("Additional Information"));
    }

    #[test]
    fn test_screenshot_uses_absolute_path() {
        let mut report = fixtures::report();
        report.screenshot = Some("screenshots/failure.png".to_string());

        let html = render(&report, footer());
        let expected = std::env::current_dir().unwrap().join("screenshots/failure.png");
        assert!(html.contains(&format!("<img src=\"{}\"", expected.display())));
        assert!(html.contains("<code>screenshots/failure.png</code>"));
    }
}
