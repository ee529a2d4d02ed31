//! Devanagari to phonetic transcription for speech synthesis.
//!
//! Pure functions, no I/O. Converts Devanagari text into an ITRANS-style
//! romanization that the synthesis model can pronounce. One left-to-right
//! pass with single-character lookahead; characters outside the glyph
//! table pass through unchanged, so the conversion is total over any
//! Unicode input.
//!
//! Input must be in the same normalization form as the table keys
//! (precomposed, no NFD decomposition is applied).

use std::collections::HashMap;
use std::sync::LazyLock;

/// Virama (halant) — mutes the preceding consonant's inherent vowel.
const VIRAMA: char = '\u{094D}';

/// Consonant graphemes. Membership here decides inherent-vowel handling;
/// the mapped output string is never inspected for classification.
const CONSONANTS: [char; 33] = [
    'क', 'ख', 'ग', 'घ', 'ङ',
    'च', 'छ', 'ज', 'झ', 'ञ',
    'ट', 'ठ', 'ड', 'ढ', 'ण',
    'त', 'थ', 'द', 'ध', 'न',
    'प', 'फ', 'ब', 'भ', 'म',
    'य', 'र', 'ल', 'व',
    'श', 'ष', 'स', 'ह',
];

/// Dependent vowel signs (matras). A matra after a consonant replaces the
/// consonant's inherent vowel.
const MATRAS: [char; 10] = ['ा', 'ि', 'ी', 'ु', 'ू', 'ृ', 'े', 'ै', 'ो', 'ौ'];

// Glyph table — built once, read-only afterwards.
static GLYPHS: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Independent vowels
        ('अ', "a"), ('आ', "aa"), ('इ', "i"), ('ई', "ee"),
        ('उ', "u"), ('ऊ', "oo"), ('ऋ', "ri"),
        ('ए', "e"), ('ऐ', "ai"), ('ओ', "o"), ('औ', "au"),
        // Consonants (inherent vowel included)
        ('क', "ka"), ('ख', "kha"), ('ग', "ga"), ('घ', "gha"), ('ङ', "nga"),
        ('च', "cha"), ('छ', "chha"), ('ज', "ja"), ('झ', "jha"), ('ञ', "jna"),
        ('ट', "ta"), ('ठ', "tha"), ('ड', "da"), ('ढ', "dha"), ('ण', "na"),
        ('त', "ta"), ('थ', "tha"), ('द', "da"), ('ध', "dha"), ('न', "na"),
        ('प', "pa"), ('फ', "pha"), ('ब', "ba"), ('भ', "bha"), ('म', "ma"),
        ('य', "ya"), ('र', "ra"), ('ल', "la"), ('व', "va"),
        ('श', "sha"), ('ष', "sha"), ('स', "sa"), ('ह', "ha"),
        // Vowel signs (matras)
        ('ा', "aa"), ('ि', "i"), ('ी', "ee"),
        ('ु', "u"), ('ू', "oo"), ('ृ', "ri"),
        ('े', "e"), ('ै', "ai"), ('ो', "o"), ('ौ', "au"),
        // Marks: anusvara, visarga, candrabindu, virama
        ('ं', "m"), ('ः', "h"), ('ँ', "n"), (VIRAMA, ""),
        // Sacred syllable
        ('ॐ', "om"),
        // Punctuation and whitespace
        ('।', "."), ('॥', "."), (' ', " "), ('\n', " "),
    ])
});

fn is_consonant(c: char) -> bool {
    CONSONANTS.contains(&c)
}

fn is_matra(c: char) -> bool {
    MATRAS.contains(&c)
}

/// Strip the inherent-vowel portion from a consonant's phonetic unit.
fn bare(unit: &str) -> &str {
    unit.strip_suffix('a').unwrap_or(unit)
}

/// Convert Devanagari text to a phonetic string for the synthesis engine.
///
/// Elision rules, decided by the immediately following character only:
/// consonant + virama → bare consonant (virama consumed, emits nothing);
/// consonant + matra → bare consonant (the matra supplies the vowel);
/// otherwise a consonant keeps its inherent vowel. Everything that is not
/// a consonant maps straight through the table, and unmapped characters
/// are copied verbatim.
///
/// Never fails. Deterministic. Safe to call from any number of threads.
pub fn transliterate(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        let Some(&unit) = GLYPHS.get(&c) else {
            // Unknown character — pass through unchanged
            out.push(c);
            i += 1;
            continue;
        };

        if is_consonant(c) {
            match chars.get(i + 1) {
                Some(&next) if next == VIRAMA => {
                    // Muted consonant; the virama is consumed here and
                    // never visited on its own.
                    out.push_str(bare(unit));
                    i += 2;
                    continue;
                }
                Some(&next) if is_matra(next) => out.push_str(bare(unit)),
                // End of input, or followed by anything else: the
                // inherent vowel stays.
                _ => out.push_str(unit),
            }
        } else {
            out.push_str(unit);
        }

        i += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── elision rules ───────────────────────────────────────────────

    #[test]
    fn halant_strips_inherent_vowel() {
        assert_eq!(transliterate("क्"), "k");
    }

    #[test]
    fn matra_replaces_inherent_vowel() {
        assert_eq!(transliterate("नि"), "ni");
        assert_eq!(transliterate("ने"), "ne");
        assert_eq!(transliterate("नू"), "noo");
    }

    #[test]
    fn bare_consonant_keeps_inherent_vowel() {
        assert_eq!(transliterate("क"), "ka");
    }

    #[test]
    fn consonant_before_consonant_keeps_vowel() {
        assert_eq!(transliterate("नम"), "nama");
    }

    #[test]
    fn consonant_before_visarga_keeps_vowel() {
        // Visarga is not a matra — the preceding consonant stays full
        assert_eq!(transliterate("नमः"), "namah");
    }

    #[test]
    fn anusvara_after_consonant() {
        assert_eq!(transliterate("संस्कृत"), "samskrita");
    }

    #[test]
    fn conjunct_cluster() {
        assert_eq!(transliterate("नमस्ते"), "namaste");
    }

    #[test]
    fn stray_virama_emits_nothing() {
        // A virama with no preceding consonant maps to the empty unit
        assert_eq!(transliterate("्क"), "ka");
    }

    #[test]
    fn independent_vowel_never_elided() {
        // आ maps to "aa"; only consonant identity, not output shape,
        // triggers elision — a following matra must not strip it.
        assert_eq!(transliterate("आू"), "aaoo");
        assert_eq!(transliterate("उवाच"), "uvaacha");
    }

    // ── literals, punctuation, whitespace ───────────────────────────

    #[test]
    fn om_is_a_fixed_literal() {
        assert_eq!(transliterate("ॐ"), "om");
    }

    #[test]
    fn danda_maps_to_period() {
        assert_eq!(transliterate("।"), ".");
        assert_eq!(transliterate("॥"), ".");
    }

    #[test]
    fn newline_normalizes_to_space() {
        assert_eq!(transliterate("नम\nते"), "nama te");
    }

    #[test]
    fn space_maps_to_single_space() {
        assert_eq!(transliterate("न म"), "na ma");
    }

    // ── totality and pass-through ───────────────────────────────────

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(transliterate("hello"), "hello");
        assert_eq!(transliterate("123"), "123");
        assert_eq!(transliterate("verse 2.47: नमस्ते!"), "verse 2.47: namaste!");
    }

    #[test]
    fn empty_input() {
        assert_eq!(transliterate(""), "");
    }

    #[test]
    fn arbitrary_unicode_does_not_panic() {
        let out = transliterate("🙏 ¿que? \u{0000} కన్నడ");
        assert!(!out.is_empty());
    }

    #[test]
    fn deterministic() {
        let text = "धर्मक्षेत्रे कुरुक्षेत्रे";
        assert_eq!(transliterate(text), transliterate(text));
    }

    // ── full verses ─────────────────────────────────────────────────

    #[test]
    fn two_word_verse_opening() {
        assert_eq!(transliterate("धृतराष्ट्र उवाच"), "dhritaraashtra uvaacha");
    }

    #[test]
    fn invocation_with_om() {
        assert_eq!(transliterate("ॐ नमः शिवाय"), "om namah shivaaya");
    }
}
