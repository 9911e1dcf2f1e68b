//! Reusable cell and element callbacks.
//!
//! Every callback takes the target by value and hands it back, possibly
//! rewritten. Parameterless callbacks are plain functions; the rest are
//! constructors that capture their arguments and return a closure, so they
//! can be registered directly:
//!
//! ```rust
//! use tableau::{callbacks, Tableau};
//! use serde_json::json;
//!
//! let mut table = Tableau::new();
//! table
//!     .set_data(json!([{ "message": "a fairly long message body" }]))
//!     .unwrap();
//! table
//!     .add_column("message", None, None)
//!     .add_callback(callbacks::max_length(8, true, 4, " ..."))
//!     .add_callback(callbacks::capitalize_first);
//! table.add_row_callback(callbacks::zebra);
//!
//! let html = table.render().unwrap();
//! assert!(html.contains(r#"<tr class="even"><td class="message">A fairly ...</td></tr>"#));
//! ```
//!
//! ## Cell callbacks
//!
//! | Callback | Effect |
//! |----------|--------|
//! | [`uppercase`], [`lowercase`] | Case conversion |
//! | [`capitalize_first`], [`capitalize_words`] | Uppercase the first letter / each word |
//! | [`trim`] | Strip a character set from both ends |
//! | [`wordwrap`] | Break long lines at spaces |
//! | [`nl2br`] | Insert `<br />` before newlines |
//! | [`number_format`] | Group thousands, fix decimals |
//! | [`format_date`] | Unix timestamp to formatted date |
//! | [`max_length`] | Truncate with an ellipsis |
//! | [`if_empty`] | Placeholder plus class for empty content |
//! | [`str_replace`] | Substring replacement |
//! | [`implode`] | Join list content |
//!
//! ## Element callbacks
//!
//! [`alternating_class`] and [`zebra`] work on anything implementing
//! [`Element`], so the same callback serves rows and cells.
//!
//! Callbacks that produce markup ([`nl2br`], or [`if_empty`] with the default
//! `&nbsp;`) need escaping turned off on their column, because escaping runs
//! after the whole pipeline.

use std::fmt::Write;

use chrono::DateTime;
use serde_json::Value;

use crate::error::{Result, TableError};
use crate::html::{value_text, Cell, Element};

/// Characters stripped by [`trim`] when no set is given.
pub const DEFAULT_TRIM_CHARS: &str = " \t\n\r\0\x0B";

/// Date format used by [`format_date`] callers that want the classic layout.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Line width for [`wordwrap`].
pub const DEFAULT_WRAP_WIDTH: usize = 75;

/// How far past `max` [`max_length`] may look for a word boundary.
pub const DEFAULT_MAX_LENGTH_PADDING: usize = 20;

pub const DEFAULT_ELLIPSIS: &str = " ...";

/// Placeholder and class for [`if_empty`]. The placeholder is markup, so the
/// column must not escape.
pub const DEFAULT_EMPTY_PLACEHOLDER: &str = "&nbsp;";
pub const DEFAULT_EMPTY_CLASS: &str = "empty";

/// Most decimal places [`number_format`] accepts. An `f64` carries no more
/// precision than this.
pub const MAX_DECIMALS: usize = 20;

/// Uppercase the content.
pub fn uppercase(mut cell: Cell) -> Result<Cell> {
    cell.set_text(cell.text().to_uppercase());
    Ok(cell)
}

/// Lowercase the content.
pub fn lowercase(mut cell: Cell) -> Result<Cell> {
    cell.set_text(cell.text().to_lowercase());
    Ok(cell)
}

/// Uppercase the first character, leaving the rest alone.
pub fn capitalize_first(mut cell: Cell) -> Result<Cell> {
    let text = cell.text();
    let mut chars = text.chars();
    if let Some(first) = chars.next() {
        cell.set_text(first.to_uppercase().chain(chars).collect::<String>());
    }
    Ok(cell)
}

/// Uppercase the first character of every whitespace-separated word.
pub fn capitalize_words(mut cell: Cell) -> Result<Cell> {
    let mut out = String::new();
    let mut at_word_start = true;
    for c in cell.text().chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    cell.set_text(out);
    Ok(cell)
}

/// Strip characters in `charset` from both ends. `None` strips
/// [`DEFAULT_TRIM_CHARS`].
pub fn trim(charset: Option<&str>) -> impl Fn(Cell) -> Result<Cell> + Send + Sync + 'static {
    let charset: Vec<char> = charset.unwrap_or(DEFAULT_TRIM_CHARS).chars().collect();
    move |mut cell| {
        let text = cell.text();
        let trimmed = text.trim_matches(|c: char| charset.contains(&c)).to_string();
        cell.set_text(trimmed);
        Ok(cell)
    }
}

/// Wrap the content at `width` characters, joining lines with `line_break`.
///
/// Lines only break at spaces unless `cut` is set, in which case words longer
/// than `width` are split as well. Existing `line_break` sequences are kept
/// and restart the count.
pub fn wordwrap(
    width: usize,
    line_break: &str,
    cut: bool,
) -> impl Fn(Cell) -> Result<Cell> + Send + Sync + 'static {
    let line_break = line_break.to_string();
    move |mut cell| {
        if cut && width == 0 {
            return Err(TableError::callback("wordwrap cannot cut at width 0"));
        }
        let text = cell.text();
        if line_break.is_empty() {
            return Ok(cell);
        }
        let wrapped: Vec<String> = text
            .split(line_break.as_str())
            .map(|segment| wrap_segment(segment, width, cut).join(&line_break))
            .collect();
        cell.set_text(wrapped.join(&line_break));
        Ok(cell)
    }
}

fn wrap_segment(segment: &str, width: usize, cut: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line: Option<String> = None;

    for word in segment.split(' ') {
        let mut word = word.to_string();
        if cut {
            while word.chars().count() > width {
                if let Some(done) = line.take() {
                    lines.push(done);
                }
                let head: String = word.chars().take(width).collect();
                word = word.chars().skip(width).collect();
                lines.push(head);
            }
        }
        line = Some(match line.take() {
            None => word,
            Some(current) if current.chars().count() + 1 + word.chars().count() <= width => {
                format!("{current} {word}")
            }
            Some(current) => {
                lines.push(current);
                word
            }
        });
    }

    lines.extend(line);
    lines
}

/// Insert `<br />` before every newline (`\r\n`, `\n\r`, `\n` or `\r`).
pub fn nl2br(mut cell: Cell) -> Result<Cell> {
    let text = cell.text();
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' || c == '\r' {
            out.push_str("<br />");
            out.push(c);
            if let Some(&next) = chars.peek() {
                if (next == '\n' || next == '\r') && next != c {
                    out.push(next);
                    chars.next();
                }
            }
        } else {
            out.push(c);
        }
    }
    cell.set_text(out);
    Ok(cell)
}

/// Format numeric content with `decimals` places, a decimal point and a
/// thousands separator. Rounds half away from zero. Empty content counts as
/// zero; anything non-numeric is an error, as is `decimals` above
/// [`MAX_DECIMALS`].
pub fn number_format(
    decimals: usize,
    decimal_point: &str,
    thousands_separator: &str,
) -> impl Fn(Cell) -> Result<Cell> + Send + Sync + 'static {
    let decimal_point = decimal_point.to_string();
    let thousands_separator = thousands_separator.to_string();
    move |mut cell| {
        if decimals > MAX_DECIMALS {
            return Err(TableError::callback(format!(
                "number_format supports at most {MAX_DECIMALS} decimals, got {decimals}"
            )));
        }
        let number = numeric_content(&cell)?;
        cell.set_text(format_number(
            number,
            decimals,
            &decimal_point,
            &thousands_separator,
        ));
        Ok(cell)
    }
}

fn numeric_content(cell: &Cell) -> Result<f64> {
    match &cell.content {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| TableError::callback(format!("number out of range: {n}"))),
        Value::Null => Ok(0.0),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| TableError::callback(format!("not a number: {s:?}"))),
        other => Err(TableError::callback(format!("not a number: {other}"))),
    }
}

fn format_number(number: f64, decimals: usize, decimal_point: &str, separator: &str) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (number * factor).round() / factor;
    let fixed = format!("{:.*}", decimals, rounded.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if rounded < 0.0 {
        out.push('-');
    }
    let digits = integer.len();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push_str(decimal_point);
        out.push_str(fraction);
    }
    out
}

/// Interpret the content as a Unix timestamp (seconds, UTC) and format it
/// with a strftime-style `format` such as [`DEFAULT_DATE_FORMAT`].
pub fn format_date(format: &str) -> impl Fn(Cell) -> Result<Cell> + Send + Sync + 'static {
    let format = format.to_string();
    move |mut cell| {
        let seconds = numeric_content(&cell)? as i64;
        let datetime = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| TableError::callback(format!("timestamp out of range: {seconds}")))?;
        let mut out = String::new();
        write!(out, "{}", datetime.format(&format))
            .map_err(|_| TableError::callback(format!("invalid date format: {format:?}")))?;
        cell.set_text(out);
        Ok(cell)
    }
}

/// Truncate content longer than `max` characters and append `ellipsis`.
///
/// With `break_on_words` the cut moves forward to the next whitespace, but
/// never past `max + padding`. Content of `max` characters or fewer is left
/// untouched and gets no ellipsis.
pub fn max_length(
    max: usize,
    break_on_words: bool,
    padding: usize,
    ellipsis: &str,
) -> impl Fn(Cell) -> Result<Cell> + Send + Sync + 'static {
    let ellipsis = ellipsis.to_string();
    move |mut cell| {
        let text = cell.text();
        if let Some(truncated) = truncate_chars(&text, max, break_on_words, padding) {
            cell.set_text(truncated + &ellipsis);
        }
        Ok(cell)
    }
}

/// The truncated prefix of `text`, or `None` if it already fits.
fn truncate_chars(text: &str, max: usize, break_on_words: bool, padding: usize) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max {
        return None;
    }
    let cut = if break_on_words {
        let run = chars[max..]
            .iter()
            .take_while(|c| !matches!(c, ' ' | '\n' | '\t' | '\r'))
            .count();
        max.saturating_add(run).min(max.saturating_add(padding))
    } else {
        max
    };
    Some(chars[..cut].iter().collect())
}

/// Replace empty content with `placeholder` and tag the cell with `class`
/// (skipped when `class` is empty).
pub fn if_empty(
    placeholder: &str,
    class: &str,
) -> impl Fn(Cell) -> Result<Cell> + Send + Sync + 'static {
    let placeholder = placeholder.to_string();
    let class = class.to_string();
    move |mut cell| {
        if cell.is_empty() {
            cell.set_text(placeholder.clone());
            cell.add_class(&class);
        }
        Ok(cell)
    }
}

/// Replace every occurrence of `search` with `replace`.
pub fn str_replace(
    search: &str,
    replace: &str,
) -> impl Fn(Cell) -> Result<Cell> + Send + Sync + 'static {
    let search = search.to_string();
    let replace = replace.to_string();
    move |mut cell| {
        if !search.is_empty() {
            cell.set_text(cell.text().replace(&search, &replace));
        }
        Ok(cell)
    }
}

/// Join list (or map) content into a string with `glue`. Scalar content is
/// left as is.
pub fn implode(glue: &str) -> impl Fn(Cell) -> Result<Cell> + Send + Sync + 'static {
    let glue = glue.to_string();
    move |mut cell| {
        let joined = match &cell.content {
            Value::Array(items) => items.iter().map(value_text).collect::<Vec<_>>(),
            Value::Object(map) => map.values().map(value_text).collect::<Vec<_>>(),
            _ => return Ok(cell),
        };
        cell.set_text(joined.join(&glue));
        Ok(cell)
    }
}

/// Add `classes[index % classes.len()]` to the element's class attribute.
///
/// Fails at call time if `classes` is empty.
pub fn alternating_class<E, I, S>(classes: I) -> impl Fn(E) -> Result<E> + Send + Sync + 'static
where
    E: Element + 'static,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let classes: Vec<String> = classes.into_iter().map(Into::into).collect();
    move |mut elem| {
        if classes.is_empty() {
            return Err(TableError::callback("alternating_class needs at least one class"));
        }
        let class = &classes[elem.index() % classes.len()];
        elem.add_class(class);
        Ok(elem)
    }
}

/// `even` for even positions, `odd` for odd ones.
pub fn zebra<E: Element>(mut elem: E) -> Result<E> {
    let class = if elem.index() % 2 == 0 { "even" } else { "odd" };
    elem.add_class(class);
    Ok(elem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{Attributes, Row};
    use serde_json::json;

    fn cell(content: impl Into<Value>) -> Cell {
        Cell::td(0, Some("c".into()), 0, content, Attributes::new())
    }

    fn text(result: Result<Cell>) -> String {
        result.unwrap().text()
    }

    #[test]
    fn case_conversion() {
        assert_eq!(text(uppercase(cell("MiXed"))), "MIXED");
        assert_eq!(text(lowercase(cell("MiXed"))), "mixed");
        assert_eq!(text(capitalize_first(cell("hello WORLD"))), "Hello WORLD");
        assert_eq!(text(capitalize_first(cell(""))), "");
        assert_eq!(
            text(capitalize_words(cell("hello big\tworld"))),
            "Hello Big\tWorld"
        );
    }

    #[test]
    fn trim_default_and_custom() {
        assert_eq!(text(trim(None)(cell("  padded\n"))), "padded");
        assert_eq!(text(trim(Some("-*"))(cell("--*x*--"))), "x");
    }

    #[test]
    fn wordwrap_breaks_at_spaces() {
        let wrap = wordwrap(10, "\n", false);
        assert_eq!(
            text(wrap(cell("The quick brown fox"))),
            "The quick\nbrown fox"
        );
    }

    #[test]
    fn wordwrap_keeps_long_words_without_cut() {
        let wrap = wordwrap(5, "<br>", false);
        assert_eq!(
            text(wrap(cell("A very incredibly long word"))),
            "A<br>very<br>incredibly<br>long<br>word"
        );
    }

    #[test]
    fn wordwrap_cuts_long_words() {
        let wrap = wordwrap(4, "\n", true);
        assert_eq!(text(wrap(cell("abcdefghij kl"))), "abcd\nefgh\nij\nkl");
    }

    #[test]
    fn wordwrap_restarts_at_existing_breaks() {
        let wrap = wordwrap(8, "\n", false);
        assert_eq!(text(wrap(cell("one two\nthree four"))), "one two\nthree\nfour");
    }

    #[test]
    fn wordwrap_zero_width_cut_fails() {
        assert!(wordwrap(0, "\n", true)(cell("abc")).is_err());
    }

    #[test]
    fn nl2br_variants() {
        assert_eq!(text(nl2br(cell("a\nb"))), "a<br />\nb");
        assert_eq!(text(nl2br(cell("a\r\nb"))), "a<br />\r\nb");
        assert_eq!(text(nl2br(cell("a\n\nb"))), "a<br />\n<br />\nb");
    }

    #[test]
    fn number_format_groups_and_rounds() {
        let fmt = number_format(2, ".", ",");
        assert_eq!(text(fmt(cell(1234567.891))), "1,234,567.89");
        assert_eq!(text(fmt(cell("-1234.5"))), "-1,234.50");

        let fmt = number_format(0, ".", ",");
        assert_eq!(text(fmt(cell(999.5))), "1,000");
        assert_eq!(text(fmt(cell(Value::Null))), "0");
        assert_eq!(text(fmt(cell(-0.2))), "0");

        let fmt = number_format(1, ",", ".");
        assert_eq!(text(fmt(cell(1234.56))), "1.234,6");
    }

    #[test]
    fn number_format_rejects_text() {
        let fmt = number_format(0, ".", ",");
        assert!(matches!(fmt(cell("abc")), Err(TableError::Callback(_))));
    }

    #[test]
    fn number_format_limits_decimals() {
        let fmt = number_format(MAX_DECIMALS, ".", "");
        assert_eq!(text(fmt(cell(1))), format!("1.{}", "0".repeat(MAX_DECIMALS)));

        let fmt = number_format(usize::MAX, ".", ",");
        assert!(matches!(fmt(cell(1)), Err(TableError::Callback(_))));
    }

    #[test]
    fn format_date_from_timestamp() {
        let fmt = format_date(DEFAULT_DATE_FORMAT);
        assert_eq!(text(fmt(cell(0))), "01/01/1970 00:00");
        let fmt = format_date("%Y-%m-%d");
        assert_eq!(text(fmt(cell("1700000000"))), "2023-11-14");
    }

    #[test]
    fn format_date_rejects_bad_format() {
        let fmt = format_date("%Q");
        assert!(fmt(cell(0)).is_err());
    }

    #[test]
    fn max_length_short_content_untouched() {
        let trunc = max_length(10, true, 5, "...");
        assert_eq!(text(trunc(cell("short"))), "short");
        assert_eq!(text(trunc(cell("exactly 10"))), "exactly 10");
    }

    #[test]
    fn max_length_hard_cut() {
        let trunc = max_length(5, false, 0, "...");
        assert_eq!(text(trunc(cell("abcdefgh"))), "abcde...");
    }

    #[test]
    fn max_length_extends_to_word_boundary() {
        let trunc = max_length(5, true, 10, " ...");
        assert_eq!(text(trunc(cell("hello wonderful world"))), "hello ...");
        let trunc = max_length(7, true, 10, "…");
        assert_eq!(text(trunc(cell("hello wonderful world"))), "hello wonderful…");
    }

    #[test]
    fn max_length_caps_at_padding() {
        let trunc = max_length(3, true, 2, "~");
        assert_eq!(text(trunc(cell("abcdefghij"))), "abcde~");
    }

    #[test]
    fn max_length_unbounded_padding() {
        let trunc = max_length(2, true, usize::MAX, "...");
        assert_eq!(text(trunc(cell("abcdef ghi"))), "abcdef...");
    }

    #[test]
    fn max_length_counts_characters() {
        let trunc = max_length(2, false, 0, "");
        assert_eq!(text(trunc(cell("héllo"))), "hé");
    }

    #[test]
    fn if_empty_sets_placeholder_and_class() {
        let placeholder = if_empty("n/a", "empty");
        let mut base = cell("");
        base.attributes.insert("class".into(), "name".into());
        let out = placeholder(base).unwrap();
        assert_eq!(out.text(), "n/a");
        assert_eq!(out.attributes["class"], "name empty");

        let out = placeholder(cell("x")).unwrap();
        assert_eq!(out.text(), "x");
        assert!(!out.attributes.contains_key("class"));
    }

    #[test]
    fn default_arguments() {
        let placeholder = if_empty(DEFAULT_EMPTY_PLACEHOLDER, DEFAULT_EMPTY_CLASS);
        let out = placeholder(cell(Value::Null)).unwrap();
        assert_eq!(out.text(), "&nbsp;");
        assert!(out.has_class("empty"));

        let long = "word ".repeat(40);
        let limit = max_length(10, true, DEFAULT_MAX_LENGTH_PADDING, DEFAULT_ELLIPSIS);
        assert_eq!(text(limit(cell(long.as_str()))), "word word word ...");

        let wrap = wordwrap(DEFAULT_WRAP_WIDTH, "\n", false);
        let wrapped = text(wrap(cell(long.as_str())));
        assert!(wrapped.lines().all(|line| line.chars().count() <= DEFAULT_WRAP_WIDTH));
    }

    #[test]
    fn str_replace_and_implode() {
        assert_eq!(text(str_replace("_", " ")(cell("a_b_c"))), "a b c");
        assert_eq!(text(implode(", ")(cell(json!(["x", 2, true])))), "x, 2, 1");
        assert_eq!(text(implode("-")(cell("scalar"))), "scalar");
    }

    #[test]
    fn alternating_class_cycles() {
        let cycle = alternating_class::<Row, _, _>(["a", "b", "c"]);
        let classes: Vec<String> = (0..4)
            .map(|i| cycle(Row::new(i, Vec::new())).unwrap().attributes["class"].clone())
            .collect();
        assert_eq!(classes, ["a", "b", "c", "a"]);
    }

    #[test]
    fn alternating_class_empty_list_fails() {
        let cycle = alternating_class::<Row, _, String>(Vec::new());
        assert!(cycle(Row::new(0, Vec::new())).is_err());
    }

    #[test]
    fn zebra_on_cells_uses_column_index() {
        let mut c = cell("x");
        c.index = 3;
        assert_eq!(zebra(c).unwrap().attributes["class"], "odd");
    }
}
