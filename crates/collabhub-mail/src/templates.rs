//! Invitation email template.

/// Rendered invitation email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationEmail {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

impl InvitationEmail {
    /// Render the invitation sent by `sender_email` pointing at `link`.
    ///
    /// The personal `message` and every interpolated value are HTML-escaped.
    pub fn new(
        subject: &str,
        sender_email: &str,
        access_type: &str,
        link: &str,
        message: Option<&str>,
    ) -> Self {
        let note = message
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(|m| format!(r#"<p class="note">{}</p>"#, escape_html(m)))
            .unwrap_or_default();

        let html = format!(
            r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{subject}</title></head>
<body>
    <p><strong>{sender}</strong> invited you to collaborate with <strong>{access}</strong> access.</p>
    {note}
    <p><a href="{link}">Accept invitation</a></p>
    <p>If the button does not work, open this address in your browser:<br>{link}</p>
</body>
</html>"#,
            subject = escape_html(subject),
            sender = escape_html(sender_email),
            access = escape_html(access_type),
            note = note,
            link = escape_html(link),
        );

        Self {
            subject: subject.to_string(),
            html,
        }
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
