use dioxus::document::eval;

/// Copy plain text through the webview clipboard. Returns whether it worked.
pub async fn write_clipboard_text(text: &str) -> bool {
    let script = write_clipboard_script(text);
    eval(&script).join::<bool>().await.unwrap_or(false)
}

fn write_clipboard_script(text: &str) -> String {
    let text_literal = js_string_literal(text);
    format!(
        r#"
        const text = {text_literal};
        try {{
            if (navigator.clipboard && navigator.clipboard.writeText) {{
                await navigator.clipboard.writeText(text);
                return true;
            }}
        }} catch (_) {{}}
        const area = document.getElementById("manual-export-text");
        if (area) {{
            area.select();
            return document.execCommand("copy");
        }}
        return false;
        "#
    )
}

fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_text_is_escaped_for_script() {
        let literal = js_string_literal("Timestamp,\"Jane\"\nrow");
        assert_eq!(literal, r#""Timestamp,\"Jane\"\nrow""#);
        assert!(write_clipboard_script("a").contains("const text = \"a\";"));
    }
}
