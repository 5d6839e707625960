use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// How an ASCII byte is treated by the normalizer.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ByteClass {
    /// Letter, digit or underscore; kept (lowercased).
    Word,
    /// Token separator.
    Space,
    /// Punctuation and control characters; removed.
    Drop,
}

const fn build_ascii_classes() -> [ByteClass; 128] {
    let mut table = [ByteClass::Drop; 128];
    let mut b = 0usize;
    while b < 128 {
        let c = b as u8;
        table[b] = if c.is_ascii_alphanumeric() || c == b'_' {
            ByteClass::Word
        } else if is_ascii_separator(c) {
            ByteClass::Space
        } else {
            ByteClass::Drop
        };
        b += 1;
    }
    table
}

static ASCII_CLASSES: [ByteClass; 128] = build_ascii_classes();

/// ASCII whitespace, including vertical tab, form feed and the information
/// separators 0x1C..=0x1F.
#[inline(always)]
const fn is_ascii_separator(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r' | 0x1c..=0x1f)
}

/// Letters (L*), numbers (N*) and `_`. Combining marks and letter-like
/// symbols such as `Ⓐ` are not word characters.
#[inline(always)]
fn is_word_char(c: char) -> bool {
    c == '_'
        || matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Letter | GeneralCategoryGroup::Number
        )
}

#[inline(always)]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Commit message normalizer.
///
/// Performs the following operations:
/// - Converts all characters to lowercase (Unicode-aware, including the
///   final-sigma rule)
/// - Removes every character that is neither a word character (Unicode
///   letter or number, or `_`) nor whitespace
/// - Collapses whitespace runs into single ASCII spaces
/// - Removes leading/trailing whitespace
///
/// The output is a space-separated word list ready for [`Tokenizer`].
/// Punctuation inside a word is removed without splitting it, so
/// `"don't"` becomes `"dont"`.
///
/// # Examples
///
/// ```
/// use commitgram_core::analyzer::MessageNormalizer;
///
/// let normalizer = MessageNormalizer::default();
/// assert_eq!(normalizer.normalize("Fix the bug."), "fix the bug");
/// assert_eq!(normalizer.normalize("  Merge   branch 'main'\n"), "merge branch main");
/// ```
///
/// [`Tokenizer`]: super::Tokenizer
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageNormalizer;

impl MessageNormalizer {
    /// Creates a new normalizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Reuses the buffer's capacity if sufficient, growing only when necessary.
    /// Clears the buffer before writing.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        if input.is_ascii() {
            normalize_ascii(input.as_bytes(), out);
        } else {
            normalize_unicode(&input.to_lowercase(), out);
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Normalizes text and splits it into owned tokens.
    pub fn tokens(&self, input: &str) -> Vec<String> {
        self.normalize(input)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Appends a kept character, emitting a single separator first if one is pending.
#[inline(always)]
fn push_word_char(out: &mut String, c: char, pending_space: &mut bool) {
    if *pending_space && !out.is_empty() {
        out.push(' ');
    }
    *pending_space = false;
    out.push(c);
}

fn normalize_ascii(bytes: &[u8], out: &mut String) {
    let mut pending_space = false;

    for &b in bytes {
        match ASCII_CLASSES[b as usize] {
            ByteClass::Word => {
                push_word_char(out, b.to_ascii_lowercase() as char, &mut pending_space)
            }
            ByteClass::Space => pending_space = true,
            ByteClass::Drop => {}
        }
    }
}

/// Filters already-lowercased text. Lowercasing happens on the whole string
/// so that context-dependent mappings (final sigma) see the original
/// punctuation.
fn normalize_unicode(lowered: &str, out: &mut String) {
    let mut pending_space = false;

    for c in lowered.chars() {
        if c.is_ascii() {
            match ASCII_CLASSES[c as usize] {
                ByteClass::Word => push_word_char(out, c, &mut pending_space),
                ByteClass::Space => pending_space = true,
                ByteClass::Drop => {}
            }
        } else if is_word_char(c) {
            push_word_char(out, c, &mut pending_space);
        } else if is_separator(c) {
            pending_space = true;
        }
    }
}
