//! Reply post-processing
//!
//! Models sometimes answer with an HTML `<table>` despite being asked for
//! markdown. [`TableNormalizer`] rewrites such replies into a pipe-delimited
//! markdown table; [`Passthrough`] leaves replies alone. This is a row/cell
//! walk over the tags that matter, not a general HTML parser.

use regex::Regex;
use std::sync::LazyLock;

pub const NO_TABLE_DATA: &str = "No table data found.";

const TABLE_MARKER: &str = "<table";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)\b[^>]*>").expect("valid tag regex")
});

pub trait ReplyPostProcessor: Send + Sync {
    fn process(&self, reply: String) -> String;
}

/// Leaves the reply exactly as received.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl ReplyPostProcessor for Passthrough {
    fn process(&self, reply: String) -> String {
        reply
    }
}

/// Converts an HTML table reply into a markdown table.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableNormalizer;

impl ReplyPostProcessor for TableNormalizer {
    fn process(&self, reply: String) -> String {
        if !reply.contains(TABLE_MARKER) {
            return reply;
        }

        let rows = extract_rows(&reply);
        tracing::debug!("Normalizing HTML table reply ({} row(s))", rows.len());
        if rows.is_empty() {
            NO_TABLE_DATA.to_string()
        } else {
            rows_to_markdown(&rows)
        }
    }
}

pub fn post_processor_for(normalize_tables: bool) -> Box<dyn ReplyPostProcessor> {
    if normalize_tables {
        Box::new(TableNormalizer)
    } else {
        Box::new(Passthrough)
    }
}

#[derive(Default)]
struct RowWalker {
    rows: Vec<Vec<String>>,
    row: Option<Vec<String>>,
    cell: Option<Vec<String>>,
}

impl RowWalker {
    fn text(&mut self, raw: &str) {
        if let Some(fragments) = self.cell.as_mut() {
            let decoded = html_escape::decode_html_entities(raw);
            let fragment = decoded.trim();
            if !fragment.is_empty() {
                fragments.push(fragment.to_string());
            }
        }
    }

    fn close_cell(&mut self) {
        if let Some(fragments) = self.cell.take() {
            if let Some(row) = self.row.as_mut() {
                row.push(fragments.concat());
            }
        }
    }

    fn close_row(&mut self) {
        self.close_cell();
        if let Some(row) = self.row.take() {
            self.rows.push(row);
        }
    }

    fn tag(&mut self, closing: bool, name: &str) {
        match (closing, name) {
            (false, "tr") => {
                self.close_row();
                self.row = Some(Vec::new());
            }
            (true, "tr") | (true, "table") => self.close_row(),
            (false, "td") | (false, "th") => {
                self.close_cell();
                // Cells outside a row are not part of any row.
                if self.row.is_some() {
                    self.cell = Some(Vec::new());
                }
            }
            (true, "td") | (true, "th") => self.close_cell(),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        self.close_row();
        self.rows
    }
}

/// One entry per `<tr>`, holding the text of each `<td>`/`<th>` in it.
pub fn extract_rows(html: &str) -> Vec<Vec<String>> {
    let mut walker = RowWalker::default();
    let mut last = 0;

    for caps in TAG_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else { continue };
        walker.text(&html[last..whole.start()]);
        last = whole.end();

        if let Some(name) = caps.get(2) {
            let closing = caps.get(1).is_some_and(|slash| !slash.as_str().is_empty());
            walker.tag(closing, &name.as_str().to_ascii_lowercase());
        }
    }
    walker.text(&html[last..]);

    walker.finish()
}

/// First row is the header; the separator has one `---` per header column.
pub fn rows_to_markdown(rows: &[Vec<String>]) -> String {
    let Some((header, body)) = rows.split_first() else {
        return String::new();
    };

    let mut table = format!("| {} |\n", header.join(" | "));
    table.push_str(&format!("| {} |\n", vec!["---"; header.len()].join(" | ")));
    for row in body {
        table.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_row_table_becomes_markdown() {
        let reply = "<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>2</td></tr></table>";
        assert_eq!(
            TableNormalizer.process(reply.to_string()),
            "| A | B |\n| --- | --- |\n| 1 | 2 |\n"
        );
    }

    #[test]
    fn test_reply_without_table_is_unchanged() {
        let reply = "| Item | Qty |\n| --- | --- |\n| Pipe <tr> | 3 |";
        assert_eq!(TableNormalizer.process(reply.to_string()), reply);
    }

    #[test]
    fn test_table_without_rows_uses_placeholder() {
        assert_eq!(
            TableNormalizer.process("<table></table>".to_string()),
            NO_TABLE_DATA
        );
        assert_eq!(
            TableNormalizer.process("Here you go: <table".to_string()),
            NO_TABLE_DATA
        );
    }

    #[test]
    fn test_surrounding_prose_is_dropped() {
        let reply = "Sure! Here is the take-off:\n<table>\n  <thead><tr><th>Item</th><th>Qty</th></tr></thead>\n  <tbody>\n    <tr><td>Door</td><td>4</td></tr>\n    <tr><td>Window</td><td>9</td></tr>\n  </tbody>\n</table>\nLet me know if you need more.";
        assert_eq!(
            TableNormalizer.process(reply.to_string()),
            "| Item | Qty |\n| --- | --- |\n| Door | 4 |\n| Window | 9 |\n"
        );
    }

    #[test]
    fn test_cell_text_is_stripped_and_joined() {
        let reply = "<table><tr><td>  Steel <b> beam </b>\n</td><td>12<br/>m</td></tr></table>";
        assert_eq!(extract_rows(reply), vec![vec!["Steelbeam", "12m"]]);
    }

    #[test]
    fn test_entities_are_decoded() {
        let reply = "<table><tr><td>2&quot; &amp; 3&#34;</td><td>100&times;50</td><td>&#x41;&bogus;</td></tr></table>";
        assert_eq!(
            extract_rows(reply),
            vec![vec!["2\" & 3\"", "100×50", "A&bogus;"]]
        );
    }

    #[test]
    fn test_named_entities_for_units_and_ranges() {
        let reply = "<table><tr><th>Item</th><th>Qty</th></tr><tr><td>Slab</td><td>12 m&sup2; &plusmn;&frac12; 5&ndash;6</td></tr></table>";
        assert_eq!(
            TableNormalizer.process(reply.to_string()),
            "| Item | Qty |\n| --- | --- |\n| Slab | 12 m² ±½ 5–6 |\n"
        );
    }

    // An open cell or row ends at the next sibling tag instead of nesting.
    #[test]
    fn test_next_sibling_tag_closes_open_cell_and_row() {
        let reply = "<table><tr><th>Item<th>Qty<tr><td>Slab<td>2</table>";
        assert_eq!(
            TableNormalizer.process(reply.to_string()),
            "| Item | Qty |\n| --- | --- |\n| Slab | 2 |\n"
        );
    }

    #[test]
    fn test_uppercase_tags_and_attributes() {
        let reply = "<table border=\"1\"><TR class=\"h\"><TH>Part</TH></TR><TR><TD align=\"right\">Bolt</TD></TR></table>";
        assert_eq!(
            TableNormalizer.process(reply.to_string()),
            "| Part |\n| --- |\n| Bolt |\n"
        );
    }

    #[test]
    fn test_separator_follows_header_width() {
        let rows = vec![
            vec!["A".to_string()],
            vec!["1".to_string(), "2".to_string(), "3".to_string()],
        ];
        assert_eq!(rows_to_markdown(&rows), "| A |\n| --- |\n| 1 | 2 | 3 |\n");
    }

    #[test]
    fn test_empty_row_keeps_pipes() {
        let reply = "<table><tr></tr><tr><td>x</td></tr></table>";
        assert_eq!(
            TableNormalizer.process(reply.to_string()),
            "|  |\n|  |\n| x |\n"
        );
    }

    #[test]
    fn test_comments_and_cells_outside_rows_are_ignored() {
        let reply = "<table><td>stray</td><!-- <tr><td>hidden</td></tr> --><tr><td>kept</td></tr></table>";
        assert_eq!(extract_rows(reply), vec![vec!["kept"]]);
    }

    #[test]
    fn test_passthrough_keeps_html() {
        let reply = "<table><tr><td>1</td></tr></table>";
        assert_eq!(Passthrough.process(reply.to_string()), reply);
    }

    #[test]
    fn test_post_processor_selection() {
        let html = "<table><tr><td>1</td></tr></table>".to_string();
        assert_eq!(post_processor_for(true).process(html.clone()), "| 1 |\n| --- |\n");
        assert_eq!(post_processor_for(false).process(html.clone()), html);
    }
}
