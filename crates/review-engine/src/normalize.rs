//! Plain-text rendering of card HTML.
//!
//! Anki renders each card side as HTML with the note type's `<style>` block
//! prepended and `[sound:...]` tags inline. [`normalize`] reduces that to the
//! text a reader would see, one visual line per output line.

use std::sync::LazyLock;

use regex_lite::{Captures, Regex};

static STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style(?:\s[^>]*)?>.*?</style\s*>").expect("valid style pattern")
});

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</?(?:div|p|li|tr|h[1-6])(?:\s[^>]*)?>")
        .expect("valid line break pattern")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

static MEDIA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:sound|anki:play):[^\]]*\]").expect("valid media pattern")
});

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(nbsp|amp|lt|gt|quot);").expect("valid entity pattern"));

/// Strip markup from card HTML while keeping its line structure.
///
/// Style blocks and media tags disappear entirely, line-breaking tags become
/// newlines, every other tag becomes a space, and the common named entities
/// are decoded. Each line is trimmed and blank lines are dropped.
///
/// ```
/// use review_engine::normalize;
///
/// assert_eq!(normalize("<style>.a{color:red}</style>Hi"), "Hi");
/// assert_eq!(normalize("A<div>B</div>"), "A\nB");
/// assert_eq!(normalize("to eat[sound:comer.mp3]"), "to eat");
/// ```
///
/// The result is a fixed point: `normalize(&normalize(x)) == normalize(x)`.
/// Getting there means decoded `&lt;`/`&gt;` are read as markup on the next
/// pass, so escaped angle brackets in card text are lost along with whatever
/// sits between them:
///
/// ```
/// use review_engine::normalize;
///
/// assert_eq!(normalize("Vec&lt;String&gt; holds strings"), "Vec  holds strings");
/// assert_eq!(normalize("1 &lt; 2 and 3 &gt; 2"), "1   2");
/// ```
///
/// Cards on programming or math decks that write `&lt;` and `&gt;` should be
/// read with the raw `question`/`answer` from `get_cards_info` instead.
pub fn normalize(raw: &str) -> String {
    let mut text = single_pass(raw);
    // Decoded entities can spell new tags or entities; a changed pass is always shorter.
    loop {
        let next = single_pass(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn single_pass(raw: &str) -> String {
    let text = STYLE_BLOCK.replace_all(raw, "");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, " ");
    let text = MEDIA.replace_all(&text, "");
    let text = ENTITY.replace_all(&text, |caps: &Captures<'_>| match &caps[1] {
        "nbsp" => " ",
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        _ => "\"",
    });

    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
