//! Markup neutralization for remote text.
//!
//! Category names and reference URLs come from a remote API and end up in
//! rendered HTML, so they are stripped of markup on the way in and entity-
//! escaped on the way out. Nothing executable may reach the output.

/// Remove HTML tags from `input`, including the contents of `script` and
/// `style` elements.
///
/// This is a plain-text field sanitizer, not an HTML parser: anything
/// between `<` and the next `>` is discarded, and everything between a
/// `<script`/`<style` open tag and its matching close tag is discarded
/// wholesale. An unterminated tag swallows the rest of the input.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        let tail = &rest[lt + 1..];

        rest = if let Some(after) =
            skip_container(tail, "script").or_else(|| skip_container(tail, "style"))
        {
            after
        } else {
            // Plain tag: discard through the closing '>'.
            match tail.find('>') {
                Some(gt) => &tail[gt + 1..],
                None => return out,
            }
        };
    }

    out.push_str(rest);
    out
}

/// If `tail` (the text following a `<`) opens the given container element,
/// return the text after its closing tag. An unterminated container
/// swallows the rest of the input.
fn skip_container<'a>(tail: &'a str, elem: &str) -> Option<&'a str> {
    let n = elem.len();
    if tail.len() < n || !tail.is_char_boundary(n) || !tail[..n].eq_ignore_ascii_case(elem) {
        return None;
    }
    // `<styles>` is not a style container: the name must end here.
    if !name_boundary(&tail[n..]) {
        return None;
    }

    let mut idx = 0;
    while let Some(p) = tail[idx..].find("</") {
        let name_start = idx + p + 2;
        let name_end = name_start + n;
        if tail.len() >= name_end
            && tail.is_char_boundary(name_end)
            && tail[name_start..name_end].eq_ignore_ascii_case(elem)
            && name_boundary(&tail[name_end..])
        {
            return Some(match tail[name_end..].find('>') {
                Some(gt) => &tail[name_end + gt + 1..],
                None => "",
            });
        }
        idx = name_start;
    }

    Some("")
}

/// True when the text following an element name cannot extend the name:
/// tag end, attributes, self-close, or end of input.
fn name_boundary(rest: &str) -> bool {
    match rest.chars().next() {
        None => true,
        Some(c) => c == '>' || c == '/' || c.is_whitespace(),
    }
}

/// Escape `& < > " '` for safe interpolation into HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
