//! Cleanup of recognized Japanese text
//!
//! Tesseract separates CJK glyphs with spaces and mixes half-width forms into
//! its output. These helpers normalize it into the compact full-width form
//! Japanese text is normally written in.

/// Normalize recognized text.
///
/// Whitespace is removed within each line and empty lines are dropped;
/// ellipses become runs of full-width periods; half-width ASCII and katakana
/// become full-width.
pub fn post_process(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<String>())
        .filter(|line| !line.is_empty())
        .map(|line| to_full_width(&collapse_dots(&line.replace('…', "..."))))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace each run of two or more `・`/`.` with as many `.`
fn collapse_dots(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut run = 0usize;
    let mut pending: Option<char> = None;

    let flush = |out: &mut String, run: usize, pending: Option<char>| match (run, pending) {
        (0, _) => {}
        (1, Some(c)) => out.push(c),
        (n, _) => out.extend(std::iter::repeat('.').take(n)),
    };

    for c in line.chars() {
        if c == '.' || c == '・' {
            run += 1;
            pending = Some(c);
        } else {
            flush(&mut out, run, pending);
            run = 0;
            pending = None;
            out.push(c);
        }
    }
    flush(&mut out, run, pending);

    out
}

/// Convert half-width ASCII and katakana to their full-width forms
fn to_full_width(line: &str) -> String {
    let mut out = String::with_capacity(line.len() * 3);

    for c in line.chars() {
        match c {
            '!'..='~' => out.push(shift(c, 0xFEE0)),
            '\u{FF9E}' | '\u{FF9F}' => {
                let semi = c == '\u{FF9F}';
                match out.pop() {
                    Some(prev) => match compose(prev, semi) {
                        Some(composed) => out.push(composed),
                        None => {
                            out.push(prev);
                            out.push(half_width_kana(c));
                        }
                    },
                    None => out.push(half_width_kana(c)),
                }
            }
            '\u{FF61}'..='\u{FF9D}' => out.push(half_width_kana(c)),
            _ => out.push(c),
        }
    }

    out
}

fn shift(c: char, offset: u32) -> char {
    char::from_u32(c as u32 + offset).unwrap_or(c)
}

/// Full-width forms of U+FF61..=U+FF9F, in code point order
const HALF_WIDTH_KANA: [char; 63] = [
    '。', '「', '」', '、', '・', 'ヲ', 'ァ', 'ィ', 'ゥ', 'ェ', 'ォ', 'ャ', 'ュ', 'ョ', 'ッ', 'ー',
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ン', '゛', '゜',
];

fn half_width_kana(c: char) -> char {
    let index = (c as u32).wrapping_sub(0xFF61) as usize;
    HALF_WIDTH_KANA.get(index).copied().unwrap_or(c)
}

/// Combine a full-width kana with a following (semi-)voiced sound mark
fn compose(base: char, semi_voiced: bool) -> Option<char> {
    const VOICEABLE: &str = "カキクケコサシスセソタチツテトハヒフヘホ";
    const SEMI_VOICEABLE: &str = "ハヒフヘホ";

    if semi_voiced {
        return SEMI_VOICEABLE.contains(base).then(|| shift(base, 2));
    }
    if base == 'ウ' {
        return Some('ヴ');
    }
    VOICEABLE.contains(base).then(|| shift(base, 1))
}
