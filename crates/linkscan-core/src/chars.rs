//! Character classifiers shared by the markup scanner and the match engine.
//!
//! Each classifier is a pure `fn(char) -> bool` that is the fast, branchy
//! equivalent of a documented reference character class. The engines run a
//! classifier on every input character, so these are plain comparisons and
//! table lookups rather than regex evaluation. The equivalence between each
//! classifier and its reference class is asserted by the
//! `classifier_equivalence` integration test.

/// ASCII letter. Reference class: `[A-Za-z]`.
#[inline(always)]
pub fn is_ascii_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// ASCII decimal digit. Reference class: `[0-9]`.
#[inline(always)]
pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Single or double quote. Reference class: `['"]`.
#[inline(always)]
pub fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}

/// Whitespace. Reference class: `\s` (Unicode `White_Space`).
#[inline(always)]
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Unicode letter, number, or combining mark.
///
/// Reference class: `[\p{Alphabetic}\p{N}]` plus the combining-mark ranges
/// in [`COMBINING_MARK_RANGES`]. This is the identifier-ish class used for
/// domain labels, email local parts, hashtag and mention text; marks are
/// included so accented text composed with combining characters stays inside
/// a candidate instead of splitting it.
#[inline]
pub fn is_alphanumeric_or_mark(c: char) -> bool {
    c.is_alphanumeric() || is_combining_mark(c)
}

/// Unicode combining mark (categories Mn, Mc, Me) in the Basic Multilingual
/// Plane. Reference class: a character class built from
/// [`COMBINING_MARK_RANGES`].
#[inline]
pub fn is_combining_mark(c: char) -> bool {
    let cp = c as u32;
    // Fast reject: first mark is U+0300, last BMP mark block ends at U+FE2F.
    if !(0x0300..=0xFE2F).contains(&cp) {
        return false;
    }
    COMBINING_MARK_RANGES
        .binary_search_by(|&(lo, hi)| {
            if cp < lo {
                core::cmp::Ordering::Greater
            } else if cp > hi {
                core::cmp::Ordering::Less
            } else {
                core::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

/// Character that can begin a URL scheme. Reference class: `[A-Za-z]`.
#[inline(always)]
pub fn is_scheme_start_char(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Character allowed inside a URL scheme. Reference class: `[-+.A-Za-z0-9]`.
#[inline(always)]
pub fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '+' || c == '.'
}

/// Character that can begin a domain label.
///
/// Reference class: same as [`is_alphanumeric_or_mark`].
#[inline(always)]
pub fn is_domain_label_start_char(c: char) -> bool {
    is_alphanumeric_or_mark(c)
}

/// Character allowed inside a domain label (hyphens and dots are handled by
/// dedicated states, not by this class).
///
/// Reference class: same as [`is_alphanumeric_or_mark`].
#[inline(always)]
pub fn is_domain_label_char(c: char) -> bool {
    is_alphanumeric_or_mark(c)
}

/// Character that begins the suffix (path/query/fragment) of a URL.
/// Reference class: `[/?#]`.
#[inline(always)]
pub fn is_url_suffix_start_char(c: char) -> bool {
    c == '/' || c == '?' || c == '#'
}

/// Character allowed inside a URL path/query/fragment.
///
/// Reference class: `[^\s'"]`. Deliberately permissive; unbalanced trailing
/// braces and sentence punctuation are stripped at capture time instead of
/// being excluded here.
#[inline(always)]
pub fn is_path_char(c: char) -> bool {
    !c.is_whitespace() && !is_quote(c)
}

/// Character that can begin an email local part.
///
/// Reference class: same as [`is_alphanumeric_or_mark`]. This is narrower
/// than RFC 5321 permits: the RFC special characters are accepted only as
/// continuation characters so that a stray `{` or `!` never starts a match.
#[inline(always)]
pub fn is_email_local_part_start_char(c: char) -> bool {
    is_alphanumeric_or_mark(c)
}

/// Character allowed inside an email local part (dots are handled by a
/// dedicated state).
///
/// Reference class: [`is_alphanumeric_or_mark`] plus `` [!#$%&'*+/=?^_`{|}~-] ``.
#[inline]
pub fn is_email_local_part_char(c: char) -> bool {
    is_alphanumeric_or_mark(c)
        || matches!(
            c,
            '!' | '#'
                | '$'
                | '%'
                | '&'
                | '\''
                | '*'
                | '+'
                | '/'
                | '='
                | '?'
                | '^'
                | '_'
                | '`'
                | '{'
                | '|'
                | '}'
                | '~'
                | '-'
        )
}

/// Character allowed in hashtag text after the `#`.
///
/// Reference class: [`is_alphanumeric_or_mark`] plus `_`.
#[inline(always)]
pub fn is_hashtag_text_char(c: char) -> bool {
    is_alphanumeric_or_mark(c) || c == '_'
}

/// Character allowed in mention handle text after the `@`.
///
/// Reference class: [`is_alphanumeric_or_mark`] plus `[-._]`. Per-service
/// handle rules are applied at capture time, not here.
#[inline(always)]
pub fn is_mention_text_char(c: char) -> bool {
    is_alphanumeric_or_mark(c) || c == '-' || c == '.' || c == '_'
}

/// Phone number digit-group separator. Reference class: `[-. ]`.
#[inline(always)]
pub fn is_phone_separator(c: char) -> bool {
    c == '-' || c == '.' || c == ' '
}

/// Phone number dial-control character (`,` pause, `;` wait).
/// Reference class: `[,;]`.
#[inline(always)]
pub fn is_phone_control_char(c: char) -> bool {
    c == ',' || c == ';'
}

/// Opening brace tracked by the trailing-brace trimmer.
/// Reference class: `[({\[]`.
#[inline(always)]
pub fn is_open_brace(c: char) -> bool {
    c == '(' || c == '{' || c == '['
}

/// Closing brace tracked by the trailing-brace trimmer.
/// Reference class: `[)}\]]`.
#[inline(always)]
pub fn is_close_brace(c: char) -> bool {
    c == ')' || c == '}' || c == ']'
}

/// Return the opening brace corresponding to a closing one.
#[inline]
pub fn open_brace_for(close: char) -> char {
    match close {
        ')' => '(',
        '}' => '{',
        ']' => '[',
        _ => unreachable!("not a closing brace: {close:?}"),
    }
}

/// Inclusive code point ranges of the Unicode combining marks (general
/// categories Mn, Mc, Me) within the Basic Multilingual Plane.
///
/// Generated once from the Unicode character database; sorted and
/// non-overlapping so [`is_combining_mark`] can binary search it.
pub const COMBINING_MARK_RANGES: &[(u32, u32)] = &[
    (0x0300, 0x036F), (0x0483, 0x0489), (0x0591, 0x05BD), (0x05BF, 0x05BF),
    (0x05C1, 0x05C2), (0x05C4, 0x05C5), (0x05C7, 0x05C7), (0x0610, 0x061A),
    (0x064B, 0x065F), (0x0670, 0x0670), (0x06D6, 0x06DC), (0x06DF, 0x06E4),
    (0x06E7, 0x06E8), (0x06EA, 0x06ED), (0x0711, 0x0711), (0x0730, 0x074A),
    (0x07A6, 0x07B0), (0x07EB, 0x07F3), (0x07FD, 0x07FD), (0x0816, 0x0819),
    (0x081B, 0x0823), (0x0825, 0x0827), (0x0829, 0x082D), (0x0859, 0x085B),
    (0x0898, 0x089F), (0x08CA, 0x08E1), (0x08E3, 0x0903), (0x093A, 0x093C),
    (0x093E, 0x094F), (0x0951, 0x0957), (0x0962, 0x0963), (0x0981, 0x0983),
    (0x09BC, 0x09BC), (0x09BE, 0x09C4), (0x09C7, 0x09C8), (0x09CB, 0x09CD),
    (0x09D7, 0x09D7), (0x09E2, 0x09E3), (0x09FE, 0x09FE), (0x0A01, 0x0A03),
    (0x0A3C, 0x0A3C), (0x0A3E, 0x0A42), (0x0A47, 0x0A48), (0x0A4B, 0x0A4D),
    (0x0A51, 0x0A51), (0x0A70, 0x0A71), (0x0A75, 0x0A75), (0x0A81, 0x0A83),
    (0x0ABC, 0x0ABC), (0x0ABE, 0x0AC5), (0x0AC7, 0x0AC9), (0x0ACB, 0x0ACD),
    (0x0AE2, 0x0AE3), (0x0AFA, 0x0AFF), (0x0B01, 0x0B03), (0x0B3C, 0x0B3C),
    (0x0B3E, 0x0B44), (0x0B47, 0x0B48), (0x0B4B, 0x0B4D), (0x0B55, 0x0B57),
    (0x0B62, 0x0B63), (0x0B82, 0x0B82), (0x0BBE, 0x0BC2), (0x0BC6, 0x0BC8),
    (0x0BCA, 0x0BCD), (0x0BD7, 0x0BD7), (0x0C00, 0x0C04), (0x0C3C, 0x0C3C),
    (0x0C3E, 0x0C44), (0x0C46, 0x0C48), (0x0C4A, 0x0C4D), (0x0C55, 0x0C56),
    (0x0C62, 0x0C63), (0x0C81, 0x0C83), (0x0CBC, 0x0CBC), (0x0CBE, 0x0CC4),
    (0x0CC6, 0x0CC8), (0x0CCA, 0x0CCD), (0x0CD5, 0x0CD6), (0x0CE2, 0x0CE3),
    (0x0D00, 0x0D03), (0x0D3B, 0x0D3C), (0x0D3E, 0x0D44), (0x0D46, 0x0D48),
    (0x0D4A, 0x0D4D), (0x0D57, 0x0D57), (0x0D62, 0x0D63), (0x0D81, 0x0D83),
    (0x0DCA, 0x0DCA), (0x0DCF, 0x0DD4), (0x0DD6, 0x0DD6), (0x0DD8, 0x0DDF),
    (0x0DF2, 0x0DF3), (0x0E31, 0x0E31), (0x0E34, 0x0E3A), (0x0E47, 0x0E4E),
    (0x0EB1, 0x0EB1), (0x0EB4, 0x0EBC), (0x0EC8, 0x0ECD), (0x0F18, 0x0F19),
    (0x0F35, 0x0F35), (0x0F37, 0x0F37), (0x0F39, 0x0F39), (0x0F3E, 0x0F3F),
    (0x0F71, 0x0F84), (0x0F86, 0x0F87), (0x0F8D, 0x0F97), (0x0F99, 0x0FBC),
    (0x0FC6, 0x0FC6), (0x102B, 0x103E), (0x1056, 0x1059), (0x105E, 0x1060),
    (0x1062, 0x1064), (0x1067, 0x106D), (0x1071, 0x1074), (0x1082, 0x108D),
    (0x108F, 0x108F), (0x109A, 0x109D), (0x135D, 0x135F), (0x1712, 0x1715),
    (0x1732, 0x1734), (0x1752, 0x1753), (0x1772, 0x1773), (0x17B4, 0x17D3),
    (0x17DD, 0x17DD), (0x180B, 0x180D), (0x180F, 0x180F), (0x1885, 0x1886),
    (0x18A9, 0x18A9), (0x1920, 0x192B), (0x1930, 0x193B), (0x1A17, 0x1A1B),
    (0x1A55, 0x1A5E), (0x1A60, 0x1A7C), (0x1A7F, 0x1A7F), (0x1AB0, 0x1ACE),
    (0x1B00, 0x1B04), (0x1B34, 0x1B44), (0x1B6B, 0x1B73), (0x1B80, 0x1B82),
    (0x1BA1, 0x1BAD), (0x1BE6, 0x1BF3), (0x1C24, 0x1C37), (0x1CD0, 0x1CD2),
    (0x1CD4, 0x1CE8), (0x1CED, 0x1CED), (0x1CF4, 0x1CF4), (0x1CF7, 0x1CF9),
    (0x1DC0, 0x1DFF), (0x20D0, 0x20F0), (0x2CEF, 0x2CF1), (0x2D7F, 0x2D7F),
    (0x2DE0, 0x2DFF), (0x302A, 0x302F), (0x3099, 0x309A), (0xA66F, 0xA672),
    (0xA674, 0xA67D), (0xA69E, 0xA69F), (0xA6F0, 0xA6F1), (0xA802, 0xA802),
    (0xA806, 0xA806), (0xA80B, 0xA80B), (0xA823, 0xA827), (0xA82C, 0xA82C),
    (0xA880, 0xA881), (0xA8B4, 0xA8C5), (0xA8E0, 0xA8F1), (0xA8FF, 0xA8FF),
    (0xA926, 0xA92D), (0xA947, 0xA953), (0xA980, 0xA983), (0xA9B3, 0xA9C0),
    (0xA9E5, 0xA9E5), (0xAA29, 0xAA36), (0xAA43, 0xAA43), (0xAA4C, 0xAA4D),
    (0xAA7B, 0xAA7D), (0xAAB0, 0xAAB0), (0xAAB2, 0xAAB4), (0xAAB7, 0xAAB8),
    (0xAABE, 0xAABF), (0xAAC1, 0xAAC1), (0xAAEB, 0xAAEF), (0xAAF5, 0xAAF6),
    (0xABE3, 0xABEA), (0xABEC, 0xABED), (0xFB1E, 0xFB1E), (0xFE00, 0xFE0F),
    (0xFE20, 0xFE2F),
];
