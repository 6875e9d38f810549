use serde::{Deserialize, Serialize};

/// Tabular attachment input: named columns plus string rows.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<table border=\"1\">\n<thead>\n<tr>");
        for column in &self.columns {
            out.push_str("<th>");
            out.push_str(&html_escape::encode_text(column));
            out.push_str("</th>");
        }
        out.push_str("</tr>\n</thead>\n<tbody>\n");

        for row in &self.rows {
            out.push_str("<tr>");
            for cell in row {
                out.push_str("<td>");
                out.push_str(&html_escape::encode_text(cell));
                out.push_str("</td>");
            }
            out.push_str("</tr>\n");
        }

        out.push_str("</tbody>\n</table>");
        out
    }
}
