use regex::Regex;
use std::sync::LazyLock;

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//.*").expect("line comment pattern compiles"));

/// Strips `//` line comments. Every extraction rule expects comment-free text.
///
/// This is lexical: a `//` inside a string literal also starts a comment.
pub fn remove_comments(contents: &str) -> String {
    LINE_COMMENT.replace_all(contents, "").into_owned()
}
