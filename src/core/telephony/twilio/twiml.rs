//! TwiML documents returned to Twilio when the outbound call is answered.

/// Escape a value for use inside a quoted XML attribute.
///
/// Only attribute values are escaped with it: the documents built here carry
/// no element text, and no other XML context is handled.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// `<Connect><Stream>` document: on answer, Twilio opens a bidirectional
/// media stream to `stream_url`.
pub fn connect_stream(stream_url: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><Response><Connect><Stream url="{}" /></Connect></Response>"#,
        escape_attr(stream_url)
    )
}
