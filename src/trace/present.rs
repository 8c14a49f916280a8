//! Trace presentation.
//!
//! The JSON form is just [`Trace`]'s `Serialize` impl; this module holds the
//! HTML rendering for browser clients. Both forms keep hops in chronological
//! order and keep every header value in arrival order.

use std::fmt::Write;

use crate::trace::Trace;

/// Render a trace as a standalone HTML document.
///
/// Everything upstream-controlled (URLs, header names and values) is
/// escaped before interpolation.
pub fn render_html(trace: &Trace) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str("<!DOCTYPE html>\n<html>\n<head><title>Redirect trace</title></head>\n<body>\n");

    if trace.is_empty() {
        out.push_str("<p>No redirects: the target answered directly.</p>\n");
    } else {
        let _ = write!(out, "<h1>{} redirect hop(s)</h1>\n<ol>\n", trace.len());
        for hop in trace.hops() {
            let _ = write!(
                out,
                "<li><strong>{}</strong> <code>{}</code>\n<ul>\n",
                hop.status,
                escape(&hop.url)
            );
            for (name, values) in &hop.headers {
                for value in values {
                    let _ = write!(
                        out,
                        "<li><code>{}: {}</code></li>\n",
                        escape(name),
                        escape(value)
                    );
                }
            }
            out.push_str("</ul>\n</li>\n");
        }
        out.push_str("</ol>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Minimal HTML escaping for text interpolated into the document.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
