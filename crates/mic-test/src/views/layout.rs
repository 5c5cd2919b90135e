/// Wrap a page body in the shared document shell.
pub(crate) fn page(title: &str, body: &str, script: Option<&str>) -> String {
    let script = script
        .map(|src| format!(r#"<script src="{}" defer></script>"#, escape(src)))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/assets/style.css">
{script}
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
    )
}

/// Escape text for use in HTML content and quoted attributes.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
