use std::sync::LazyLock;

use regex::Regex;

/// `[text](http(s):...)` on a single line
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<text>[^\]\n]+?)\]\((?P<href>https?:\S+?)\)").expect("valid link pattern")
});

/// A piece of text produced by [`segments`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Link {
        text: &'a str,
        href: &'a str,
        /// The full `[text](href)` span as it appeared in the input
        source: &'a str,
    },
}

impl<'a> Segment<'a> {
    /// What a reader sees: the plain text, or the link's label
    pub fn text(&self) -> &'a str {
        match self {
            Segment::Text(t) => t,
            Segment::Link { text, .. } => text,
        }
    }

    /// The slice of the input this segment covers
    pub fn source(&self) -> &'a str {
        match self {
            Segment::Text(t) => t,
            Segment::Link { source, .. } => source,
        }
    }
}

/// Iterator over the plain-text and link segments of a string.
///
/// Every call to [`segments`] scans from the start of its input; cloning
/// the iterator restarts from the clone's position.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    input: &'a str,
    pos: usize,
    pending: Option<Segment<'a>>,
    done: bool,
}

/// Split `input` into text and link segments. Input without links, the
/// empty string included, yields a single text segment equal to the input.
pub fn segments(input: &str) -> Segments<'_> {
    Segments {
        input,
        pos: 0,
        pending: None,
        done: false,
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(link) = self.pending.take() {
            return Some(link);
        }
        if self.done {
            return None;
        }

        let Some(caps) = LINK_RE.captures_at(self.input, self.pos) else {
            self.done = true;
            let rest = &self.input[self.pos..];
            // Nothing after a trailing link
            if rest.is_empty() && self.pos > 0 {
                return None;
            }
            return Some(Segment::Text(rest));
        };

        let whole = caps.get(0)?;
        let link = Segment::Link {
            text: caps.name("text").map_or("", |m| m.as_str()),
            href: caps.name("href").map_or("", |m| m.as_str()),
            source: whole.as_str(),
        };
        let before = &self.input[self.pos..whole.start()];
        self.pos = whole.end();

        if before.is_empty() {
            Some(link)
        } else {
            self.pending = Some(link);
            Some(Segment::Text(before))
        }
    }
}

/// Render links as `text <href>` for plain-text output
pub fn to_plain(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for seg in segments(input) {
        match seg {
            Segment::Text(t) => out.push_str(t),
            Segment::Link { text, href, .. } => {
                out.push_str(text);
                out.push_str(" <");
                out.push_str(href);
                out.push('>');
            }
        }
    }
    out
}
