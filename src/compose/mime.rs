use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;

use super::composer::FinalizedMessage;
use super::options::TextFormat;
use super::part::Part;

pub fn render(message: &FinalizedMessage) -> Vec<u8> {
    let boundary = random_boundary();
    let mut out = String::new();

    out.push_str(&format!("From: {}\r\n", escape_header_value(&message.from)));
    out.push_str(&format!("To: {}\r\n", message.to.join(", ")));
    out.push_str(&format!(
        "Subject: {}\r\n",
        escape_header_value(&message.subject)
    ));
    out.push_str("MIME-Version: 1.0\r\n");
    out.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{boundary}\"\r\n\r\n"
    ));

    for part in &message.parts {
        out.push_str(&format!("--{boundary}\r\n"));
        render_part(&mut out, part);
    }
    out.push_str(&format!("--{boundary}--\r\n"));

    out.into_bytes()
}

fn render_part(out: &mut String, part: &Part) {
    match part {
        Part::Text { content, format } => {
            let subtype = match format {
                TextFormat::Plain => "plain",
                TextFormat::Markup => "html",
            };
            out.push_str(&format!("Content-Type: text/{subtype}; charset=utf-8\r\n\r\n"));
            out.push_str(content);
            out.push_str("\r\n");
        }
        Part::Separator { lines } => {
            out.push_str("Content-Type: text/plain; charset=utf-8\r\n\r\n");
            out.push_str(&"\n".repeat(*lines as usize));
            out.push_str("\r\n");
        }
        Part::File {
            filename,
            mime_type,
            data,
        } => {
            out.push_str(&format!(
                "Content-Type: {}; name=\"{}\"\r\n",
                mime_type,
                escape_header_value(filename)
            ));
            out.push_str("Content-Transfer-Encoding: base64\r\n");
            out.push_str(&format!(
                "Content-Disposition: attachment; filename=\"{}\"\r\n\r\n",
                escape_header_value(filename)
            ));
            out.push_str(&fold_base64_lines(&STANDARD.encode(data)));
        }
        Part::Image {
            content_id,
            subtype,
            data,
            inline,
        } => {
            out.push_str(&format!("Content-Type: image/{subtype}\r\n"));
            out.push_str("Content-Transfer-Encoding: base64\r\n");
            out.push_str(&format!(
                "Content-Disposition: attachment; filename=\"{}\"\r\n",
                escape_header_value(content_id)
            ));
            if *inline {
                out.push_str(&format!(
                    "Content-ID: <{}>\r\n",
                    escape_header_value(content_id)
                ));
            }
            out.push_str("\r\n");
            out.push_str(&fold_base64_lines(&STANDARD.encode(data)));
        }
    }
}

fn fold_base64_lines(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 76 + 8);
    let mut start = 0;
    while start < input.len() {
        let end = (start + 76).min(input.len());
        out.push_str(&input[start..end]);
        out.push_str("\r\n");
        start = end;
    }
    out
}

fn random_boundary() -> String {
    let mut bytes = [0_u8; 12];
    rand::thread_rng().fill(&mut bytes);
    let token = STANDARD.encode(bytes);
    format!("mailforge-{token}")
}

fn escape_header_value(value: &str) -> String {
    value
        .chars()
        .filter(|value| *value != '\r' && *value != '\n' && *value != '"')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_with(parts: Vec<Part>) -> FinalizedMessage {
        FinalizedMessage {
            from: "Sender <sender@example.com>".to_string(),
            to: vec!["dev@example.com".to_string()],
            subject: "Report".to_string(),
            parts,
        }
    }

    fn rendered(parts: Vec<Part>) -> String {
        String::from_utf8(render(&message_with(parts))).expect("utf8 payload")
    }

    #[test]
    fn renders_headers_and_multipart_frame() {
        let raw = rendered(vec![Part::plain("hello")]);

        assert!(raw.contains("From: Sender <sender@example.com>"));
        assert!(raw.contains("To: dev@example.com"));
        assert!(raw.contains("Subject: Report"));
        assert!(raw.contains("MIME-Version: 1.0"));
        assert!(raw.contains("multipart/mixed; boundary=\"mailforge-"));
        assert!(raw.contains("Content-Type: text/plain; charset=utf-8\r\n\r\nhello"));
    }

    #[test]
    fn markup_parts_render_as_html() {
        let raw = rendered(vec![Part::markup("<b>hi</b>")]);

        assert!(raw.contains("Content-Type: text/html; charset=utf-8\r\n\r\n<b>hi</b>"));
    }

    #[test]
    fn separator_renders_blank_lines() {
        let raw = rendered(vec![Part::Separator { lines: 2 }]);

        assert!(raw.contains("text/plain; charset=utf-8\r\n\r\n\n\n\r\n"));
    }

    #[test]
    fn file_part_carries_disposition_and_base64() {
        let raw = rendered(vec![Part::File {
            filename: "report.csv".to_string(),
            mime_type: "text/csv".to_string(),
            data: b"a,b\n1,2\n".to_vec(),
        }]);

        assert!(raw.contains("Content-Type: text/csv; name=\"report.csv\""));
        assert!(raw.contains("Content-Transfer-Encoding: base64"));
        assert!(raw.contains("Content-Disposition: attachment; filename=\"report.csv\""));
        assert!(raw.contains(&STANDARD.encode(b"a,b\n1,2\n")));
    }

    #[test]
    fn content_id_present_only_for_inline_images() {
        let inline = rendered(vec![Part::Image {
            content_id: "chart".to_string(),
            subtype: "png".to_string(),
            data: vec![1, 2, 3],
            inline: true,
        }]);
        assert!(inline.contains("Content-Type: image/png"));
        assert!(inline.contains("Content-ID: <chart>"));
        assert!(inline.contains("Content-Disposition: attachment; filename=\"chart\""));

        let detached = rendered(vec![Part::Image {
            content_id: "chart".to_string(),
            subtype: "png".to_string(),
            data: vec![1, 2, 3],
            inline: false,
        }]);
        assert!(!detached.contains("Content-ID"));
    }

    #[test]
    fn folds_base64_at_76_columns() {
        let raw = rendered(vec![Part::File {
            filename: "blob.bin".to_string(),
            mime_type: "application/octet-stream".to_string(),
            data: vec![0_u8; 300],
        }]);

        let has_long_line = raw
            .lines()
            .any(|line| line.len() > 76 && !line.starts_with("Content-"));
        assert!(!has_long_line);
    }

    #[test]
    fn strips_line_breaks_from_header_values() {
        assert_eq!(escape_header_value("a\r\nb\"c"), "abc");
    }
}
