//! First-table extraction from an HTML document.
//!
//! Tag matching runs on an ASCII-lowercased copy of the document so byte
//! offsets line up with the original text.

use super::model::RawTable;
use crate::error::LoadError;

/// Extract the first `<table>` of `doc`.
///
/// The first `<tr>` is the header row; every following `<tr>` is a data row,
/// whatever section (`thead`, `tbody`, `tfoot`) it sits in. Commented-out
/// markup is ignored. `colspan` repeats the cell's text across the span.
pub fn first_table(doc: &str) -> Result<RawTable, LoadError> {
    let doc = strip_comments(doc);
    let lc = doc.to_ascii_lowercase();

    let start = find_tag(&lc, "table", 0).ok_or(LoadError::NoTable)?;
    let end = lc[start..]
        .find("</table")
        .map(|e| e + start)
        .unwrap_or(lc.len());
    let table = &doc[start..end];
    let lct = &lc[start..end];

    let mut rows = Vec::new();
    let mut pos = 0usize;
    while let Some(tr_s) = find_tag(lct, "tr", pos) {
        let body_s = tr_s + 3;
        let tr_e = [lct[body_s..].find("</tr"), find_tag(&lct[body_s..], "tr", 0)]
            .into_iter()
            .flatten()
            .min()
            .map(|e| e + body_s)
            .unwrap_or(lct.len());
        rows.push(read_cells(&table[tr_s..tr_e], &lct[tr_s..tr_e]));
        pos = tr_e;
    }

    let mut rows = rows.into_iter();
    let headers: Vec<String> = rows
        .next()
        .filter(|r| !r.is_empty())
        .ok_or(LoadError::EmptyTable)?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect();

    Ok(RawTable {
        headers,
        rows: rows.filter(|r| !r.is_empty()).collect(),
    })
}

/// Cells (`td` and `th`) of one row.
fn read_cells(row: &str, lc: &str) -> Vec<Option<String>> {
    let mut cells = Vec::new();
    let mut pos = 0usize;
    loop {
        let next = [find_tag(lc, "td", pos), find_tag(lc, "th", pos)]
            .into_iter()
            .flatten()
            .min();
        let Some(open) = next else { break };
        let Some(open_end) = lc[open..].find('>').map(|e| e + open + 1) else {
            break;
        };
        let close = [
            lc[open_end..].find("</td"),
            lc[open_end..].find("</th"),
            find_tag(&lc[open_end..], "td", 0),
            find_tag(&lc[open_end..], "th", 0),
        ]
        .into_iter()
        .flatten()
        .min()
        .map(|e| e + open_end)
        .unwrap_or(lc.len());

        let text = normalize_ws(&decode_entities(&strip_tags(&row[open_end..close])));
        let span = colspan(&lc[open..open_end]);
        let cell = (!text.is_empty()).then_some(text);
        cells.extend(std::iter::repeat(cell).take(span));
        pos = close;
    }
    cells
}

/// Position of the next `<name` opening tag at or after `from`, requiring a tag-name boundary
/// (so `th` does not match `<thead>`).
fn find_tag(lc: &str, name: &str, from: usize) -> Option<usize> {
    let pat = format!("<{name}");
    let mut at = from;
    loop {
        let hit = lc.get(at..)?.find(&pat)? + at;
        let after = hit + pat.len();
        match lc.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(hit),
            None => return None,
            _ => at = after,
        }
    }
}

fn colspan(open_tag: &str) -> usize {
    let Some(i) = open_tag.find("colspan=") else {
        return 1;
    };
    open_tag[i + "colspan=".len()..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

fn strip_comments(doc: &str) -> String {
    let mut out = String::with_capacity(doc.len());
    let mut rest = doc;
    while let Some(s) = rest.find("<!--") {
        out.push_str(&rest[..s]);
        match rest[s + 4..].find("-->") {
            Some(e) => rest = &rest[s + 4 + e + 3..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode the named entities the source emits plus numeric references.
fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let ch = match &tail[1..semi] {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" | "#39" => Some('\''),
                "nbsp" => Some(' '),
                num if num.starts_with("#x") || num.starts_with("#X") => {
                    u32::from_str_radix(&num[2..], 16).ok().and_then(char::from_u32)
                }
                num if num.starts_with('#') => num[1..].parse().ok().and_then(char::from_u32),
                _ => None,
            };
            ch.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, len)) => {
                out.push(c);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    const PAGE: &str = r#"
<html><body>
<!-- <table id="hidden"><tr><th>Nope</th></tr></table> -->
<table class="sortable stats_table" id="per_game_stats">
<caption>Per Game Table</caption>
<thead><tr><th data-stat="ranker">Rk</th><th>Player</th><th>Age</th><th>Team</th></tr></thead>
<tbody>
<tr><th scope="row">1</th><td><a href="/players/x.html">Nikola Joki&#263;</a></td><td>28</td><td>DEN</td></tr>
<tr class="thead"><th>Rk</th><th>Player</th><th>Age</th><th>Team</th></tr>
<tr><th>2</th><td>Shai  Gilgeous-Alexander</td><td></td><td>OKC</td></tr>
</tbody>
</table>
<table><tr><td>second</td></tr></table>
</body></html>"#;

    #[test]
    fn reads_first_visible_table() {
        let t = first_table(PAGE).unwrap();
        assert_eq!(t.headers, ["Rk", "Player", "Age", "Team"]);
        assert_eq!(t.rows.len(), 3);
        assert_eq!(t.rows[0][1].as_deref(), Some("Nikola Jokić"));
        assert_eq!(t.rows[1][2].as_deref(), Some("Age"));
        assert_eq!(t.rows[2][1].as_deref(), Some("Shai Gilgeous-Alexander"));
        assert_eq!(t.rows[2][2], None);
    }

    #[test]
    fn missing_table_is_an_error() {
        assert!(matches!(
            first_table("<html><p>moved</p></html>"),
            Err(LoadError::NoTable)
        ));
        assert!(matches!(
            first_table("<table></table>"),
            Err(LoadError::EmptyTable)
        ));
    }

    #[test]
    fn th_does_not_match_thead() {
        assert_eq!(find_tag("<thead><th>", "th", 0), Some(7));
    }

    #[test]
    fn colspan_repeats_cell() {
        let t = first_table(r#"<table><tr><th colspan="2">Shooting</th><th>X</th></tr></table>"#)
            .unwrap();
        assert_eq!(t.headers, ["Shooting", "Shooting", "X"]);
    }

    #[test]
    fn footer_rows_follow_body_and_long_rows_are_cut() {
        let page = "<table>\
            <thead><tr><th>Player</th><th>PTS</th></tr></thead>\
            <tbody><tr><td>A</td><td>1</td><td>extra</td></tr></tbody>\
            <tfoot><tr><td>League Average</td><td>2</td></tr></tfoot>\
            </table>";
        let raw = first_table(page).unwrap();
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[0].len(), 3);
        assert_eq!(raw.rows[1][0].as_deref(), Some("League Average"));

        let t = crate::data::clean::clean(raw);
        assert_eq!(t.shape(), (2, 2));
        assert_eq!(t.rows[0], [CellValue::Text("A".into()), CellValue::Integer(1)]);
        assert_eq!(t.get(1, "player"), Some(&CellValue::Text("League Average".into())));
    }

    #[test]
    fn entities() {
        assert_eq!(decode_entities("A&amp;M &nbsp;x &#x41; &bogus"), "A&M  x A &bogus");
    }
}
