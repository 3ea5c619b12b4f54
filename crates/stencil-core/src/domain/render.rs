//! Token substitution for paths and file content.
//!
//! A token is a delimited marker, `{{ name }}`, whose inner name (after
//! trimming whitespace) must match a [`ParameterSet`] key. Substitution is a
//! single left-to-right pass over raw bytes:
//!
//! - matching is greedy and non-overlapping — after a token is replaced,
//!   scanning resumes past the replacement, so a value is never re-scanned
//!   for tokens (no recursive expansion);
//! - non-token bytes are preserved exactly, including line endings and any
//!   non-UTF-8 sequences between tokens;
//! - `{{` without a closing `}}`, or with inner text that is not a valid
//!   token name, is emitted literally (so `{{{name}}}` keeps its outer
//!   braces and substitutes the inner token);
//! - a well-formed token naming an undefined parameter aborts the render
//!   with [`DomainError::UnresolvedToken`], carrying the token and the path
//!   it appeared in.
//!
//! Files whose extension is on the binary deny list skip substitution
//! entirely and are copied verbatim.

use crate::domain::{
    entities::common::RelativePath, error::DomainError, params::ParameterSet,
};

/// Extensions treated as opaque binary content — copied verbatim, never
/// scanned for tokens. Seeded with the asset types that show up in mobile
/// project templates (images, archives, signing material, native libs).
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "ico", "icns", "webp", "jar", "aar", "keystore", "jks", "zip",
    "gz", "tar", "7z", "so", "dylib", "dll", "a", "o", "class", "ttf", "otf", "woff", "woff2",
    "pdf", "bin", "dat",
];

/// `true` if the path's extension marks it as binary (deny-list check,
/// case-insensitive).
pub fn is_binary_path(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .is_some_and(|(stem, ext)| {
            !stem.is_empty() && BINARY_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
}

/// Render a tokenized relative path into a concrete [`RelativePath`].
pub fn render_path(raw: &str, params: &ParameterSet) -> Result<RelativePath, DomainError> {
    let rendered = substitute(raw.as_bytes(), raw, params)?;

    // raw is valid UTF-8 and replacement values are Strings, so the result
    // is structurally valid UTF-8; the error arm guards the invariant.
    let rendered = String::from_utf8(rendered).map_err(|_| DomainError::InvalidRenderedPath {
        path: raw.to_string(),
        reason: "rendered path is not valid UTF-8".into(),
    })?;

    RelativePath::try_new(rendered)
}

/// Render file content, substituting tokens unless the path is binary.
///
/// `origin` is the template-relative path, used only for error context.
pub fn render_content(
    raw: &[u8],
    origin: &str,
    params: &ParameterSet,
) -> Result<Vec<u8>, DomainError> {
    if is_binary_path(origin) {
        return Ok(raw.to_vec());
    }
    substitute(raw, origin, params)
}

/// Single-pass byte-level token substitution.
fn substitute(input: &[u8], origin: &str, params: &ParameterSet) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if input[i] == b'{' && input.get(i + 1) == Some(&b'{') {
            if let Some((name, end)) = parse_token(&input[i..]) {
                match params.get(name) {
                    Some(value) => {
                        out.extend_from_slice(value.as_bytes());
                        i += end;
                        continue;
                    }
                    None => {
                        return Err(DomainError::UnresolvedToken {
                            token: name.to_string(),
                            origin: origin.to_string(),
                        });
                    }
                }
            }
        }
        out.push(input[i]);
        i += 1;
    }

    Ok(out)
}

/// Try to parse a token at the start of `input` (which begins with `{{`).
///
/// Returns the trimmed token name and the total byte length consumed
/// (including both delimiters), or `None` if no well-formed token starts
/// here — the caller then emits one literal byte and rescans, which is what
/// keeps `{{{name}}}`-style nesting working.
fn parse_token(input: &[u8]) -> Option<(&str, usize)> {
    let close = input
        .windows(2)
        .skip(2)
        .position(|w| w == b"}}")
        .map(|p| p + 2)?;

    let inner = std::str::from_utf8(&input[2..close]).ok()?;
    let name = inner.trim();

    if name.is_empty() || !is_token_name(name) {
        return None;
    }

    Some((name, close + 2))
}

/// Token names are restricted to the identifier-ish characters that appear
/// in parameter names; anything else means "not a token, emit literally".
fn is_token_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ParameterSet {
        ParameterSet::resolve(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>(),
            &[],
        )
        .unwrap()
    }

    // ── paths ─────────────────────────────────────────────────────────────

    #[test]
    fn path_tokens_are_substituted() {
        let p = params(&[("name", "myapp")]);
        let rendered = render_path("{{name}}/App.java", &p).unwrap();
        assert_eq!(rendered.as_str(), "myapp/App.java");
    }

    #[test]
    fn path_token_with_inner_whitespace() {
        let p = params(&[("name", "myapp")]);
        assert_eq!(render_path("{{ name }}/x", &p).unwrap().as_str(), "myapp/x");
    }

    #[test]
    fn multi_segment_value_expands_into_nested_path() {
        let p = params(&[("bundle_path", "com/example/app")]);
        let rendered = render_path("src/{{bundle_path}}/Main.java", &p).unwrap();
        assert_eq!(rendered.as_str(), "src/com/example/app/Main.java");
    }

    #[test]
    fn unknown_path_token_names_token_and_origin() {
        let p = params(&[]);
        let err = render_path("{{missing}}/x", &p).unwrap_err();
        match err {
            DomainError::UnresolvedToken { token, origin } => {
                assert_eq!(token, "missing");
                assert_eq!(origin, "{{missing}}/x");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // ── content ───────────────────────────────────────────────────────────

    #[test]
    fn content_substitution_preserves_surrounding_bytes() {
        let p = params(&[("bundle_id", "com.example.app")]);
        let out = render_content(b"package {{bundle_id}};\r\n", "App.java", &p).unwrap();
        assert_eq!(out, b"package com.example.app;\r\n");
    }

    #[test]
    fn adjacent_tokens_both_replaced() {
        let p = params(&[("a", "1"), ("b", "2")]);
        let out = render_content(b"{{a}}{{b}}", "f.txt", &p).unwrap();
        assert_eq!(out, b"12");
    }

    #[test]
    fn replacement_value_is_not_rescanned() {
        // Token-like text cannot enter via parameters (resolution rejects
        // "{{"), but a replacement producing '}' next to template braces
        // must not confuse the scanner.
        let p = params(&[("v", "x}")]);
        let out = render_content(b"{{v}}{{v}}", "f.txt", &p).unwrap();
        assert_eq!(out, b"x}x}");
    }

    #[test]
    fn triple_braces_keep_outer_brace() {
        let p = params(&[("name", "app")]);
        let out = render_content(b"{{{name}}}", "f.txt", &p).unwrap();
        assert_eq!(out, b"{app}");
    }

    #[test]
    fn unclosed_marker_is_literal() {
        let p = params(&[("name", "app")]);
        let out = render_content(b"{{name", "f.txt", &p).unwrap();
        assert_eq!(out, b"{{name");
    }

    #[test]
    fn non_token_braces_are_literal() {
        let p = params(&[]);
        let out = render_content(b"if (x) {{ y(); }}", "f.c", &p).unwrap();
        // inner text "y();" is not a token name, so everything is literal
        assert_eq!(out, b"if (x) {{ y(); }}");
    }

    #[test]
    fn unknown_content_token_fails() {
        let p = params(&[]);
        let err = render_content(b"hello {{ghost}}", "f.txt", &p).unwrap_err();
        assert!(matches!(err, DomainError::UnresolvedToken { .. }));
    }

    #[test]
    fn non_utf8_bytes_between_tokens_survive() {
        let p = params(&[("name", "app")]);
        let input = [b"\xffbefore {{name}} after\xfe".as_slice()].concat();
        let out = render_content(&input, "f.txt", &p).unwrap();
        assert_eq!(out, [b"\xffbefore app after\xfe".as_slice()].concat());
    }

    // ── binary handling ───────────────────────────────────────────────────

    #[test]
    fn binary_extension_detection() {
        assert!(is_binary_path("res/icon.png"));
        assert!(is_binary_path("libs/native.SO"));
        assert!(!is_binary_path("src/Main.java"));
        assert!(!is_binary_path("Makefile"));
        // dotfiles have no extension
        assert!(!is_binary_path(".gitignore"));
    }

    #[test]
    fn binary_content_is_copied_verbatim() {
        let p = params(&[]);
        // token-like bytes inside a .png are data, not markers
        let raw = b"\x89PNG{{not_a_param}}".to_vec();
        let out = render_content(&raw, "res/icon.png", &p).unwrap();
        assert_eq!(out, raw);
    }
}
