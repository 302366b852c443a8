//! BCP 47 language tag normalization.
//!
//! Tags are compared by their normalized form when they become `hreflang`
//! values, so `en_us`, `EN-us` and `en-US` all emit `en-US`.
//!
//! Normalization steps:
//!
//! 1. `_` separators become `-`
//! 2. Grandfathered and irregular tags are replaced (`i-klingon` → `tlh`)
//! 3. Extlang forms collapse to their language (`zh-cmn` → `cmn`), then
//!    deprecated language and region subtags are replaced (`iw` → `he`,
//!    `sh` → `sr-Latn`, `cmn` → `zh`, `BU` → `MM`)
//! 4. Canonical casing: language lower, script title, region upper,
//!    everything else lower
//! 5. Scripts implied by the language are dropped (`en-Latn` → `en`)
//!
//! Tags that cannot be parsed are returned trimmed but otherwise as given.

/// Grandfathered and irregular tags with a modern replacement.
const GRANDFATHERED: &[(&str, &str)] = &[
    ("art-lojban", "jbo"),
    ("en-gb-oed", "en-GB-oxendict"),
    ("i-ami", "ami"),
    ("i-bnn", "bnn"),
    ("i-hak", "hak"),
    ("i-klingon", "tlh"),
    ("i-lux", "lb"),
    ("i-navajo", "nv"),
    ("i-pwn", "pwn"),
    ("i-tao", "tao"),
    ("i-tay", "tay"),
    ("i-tsu", "tsu"),
    ("no-bok", "nb"),
    ("no-nyn", "nn"),
    ("sgn-be-fr", "sfb"),
    ("sgn-be-nl", "vgt"),
    ("sgn-ch-de", "sgg"),
    ("zh-guoyu", "cmn"),
    ("zh-hakka", "hak"),
    ("zh-min-nan", "nan"),
    ("zh-xiang", "hsn"),
];

/// Language subtag replacements from the CLDR alias data: legacy codes,
/// encompassed codes of a macrolanguage, and overlong ISO 639-2 codes.
///
/// A replacement may carry a script or region; those only fill slots the tag
/// leaves empty (`sh-Cyrl` → `sr-Cyrl`, `sh-BA` → `sr-Latn-BA`).
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    // Legacy
    ("bh", "bho"),
    ("in", "id"),
    ("iw", "he"),
    ("ji", "yi"),
    ("jw", "jv"),
    ("mo", "ro"),
    ("sh", "sr-Latn"),
    ("tl", "fil"),
    ("tw", "ak"),
    ("cnr", "sr-ME"),
    ("prs", "fa-AF"),
    ("swc", "sw-CD"),
    // Macrolanguage
    ("arb", "ar"),
    ("ayr", "ay"),
    ("azj", "az"),
    ("cmn", "zh"),
    ("ekk", "et"),
    ("emk", "man"),
    ("esk", "ik"),
    ("gaz", "om"),
    ("khk", "mn"),
    ("lvs", "lv"),
    ("npi", "ne"),
    ("ory", "or"),
    ("pbu", "ps"),
    ("pes", "fa"),
    ("plt", "mg"),
    ("quz", "qu"),
    ("swh", "sw"),
    ("uzn", "uz"),
    ("ydd", "yi"),
    ("zsm", "ms"),
    // Overlong
    ("afr", "af"),
    ("alb", "sq"),
    ("amh", "am"),
    ("ara", "ar"),
    ("arm", "hy"),
    ("aze", "az"),
    ("baq", "eu"),
    ("bel", "be"),
    ("ben", "bn"),
    ("bos", "bs"),
    ("bul", "bg"),
    ("bur", "my"),
    ("cat", "ca"),
    ("ces", "cs"),
    ("chi", "zh"),
    ("cym", "cy"),
    ("cze", "cs"),
    ("dan", "da"),
    ("deu", "de"),
    ("dut", "nl"),
    ("ell", "el"),
    ("eng", "en"),
    ("est", "et"),
    ("eus", "eu"),
    ("fas", "fa"),
    ("fin", "fi"),
    ("fra", "fr"),
    ("fre", "fr"),
    ("geo", "ka"),
    ("ger", "de"),
    ("gle", "ga"),
    ("glg", "gl"),
    ("gre", "el"),
    ("guj", "gu"),
    ("heb", "he"),
    ("hin", "hi"),
    ("hrv", "hr"),
    ("hun", "hu"),
    ("hye", "hy"),
    ("ice", "is"),
    ("ind", "id"),
    ("isl", "is"),
    ("ita", "it"),
    ("jpn", "ja"),
    ("kat", "ka"),
    ("kaz", "kk"),
    ("khm", "km"),
    ("kor", "ko"),
    ("lav", "lv"),
    ("lit", "lt"),
    ("mac", "mk"),
    ("mal", "ml"),
    ("mar", "mr"),
    ("may", "ms"),
    ("mkd", "mk"),
    ("mon", "mn"),
    ("msa", "ms"),
    ("mya", "my"),
    ("nep", "ne"),
    ("nld", "nl"),
    ("nno", "nn"),
    ("nob", "nb"),
    ("nor", "no"),
    ("per", "fa"),
    ("pol", "pl"),
    ("por", "pt"),
    ("ron", "ro"),
    ("rum", "ro"),
    ("rus", "ru"),
    ("sin", "si"),
    ("slk", "sk"),
    ("slo", "sk"),
    ("slv", "sl"),
    ("spa", "es"),
    ("sqi", "sq"),
    ("srp", "sr"),
    ("swa", "sw"),
    ("swe", "sv"),
    ("tam", "ta"),
    ("tel", "te"),
    ("tha", "th"),
    ("tur", "tr"),
    ("ukr", "uk"),
    ("urd", "ur"),
    ("uzb", "uz"),
    ("vie", "vi"),
    ("wel", "cy"),
    ("zho", "zh"),
    ("zul", "zu"),
];

/// Deprecated region subtags.
const REGION_ALIASES: &[(&str, &str)] = &[
    ("AN", "CW"),
    ("BU", "MM"),
    ("CS", "RS"),
    ("DD", "DE"),
    ("FX", "FR"),
    ("NT", "SA"),
    ("QU", "EU"),
    ("SU", "RU"),
    ("TP", "TL"),
    ("UK", "GB"),
    ("YD", "YE"),
    ("YU", "RS"),
    ("ZR", "CD"),
];

/// Scripts that are implied by their language.
const SUPPRESS_SCRIPTS: &[(&str, &str)] = &[
    ("ar", "Arab"),
    ("be", "Cyrl"),
    ("bg", "Cyrl"),
    ("cs", "Latn"),
    ("da", "Latn"),
    ("de", "Latn"),
    ("el", "Grek"),
    ("en", "Latn"),
    ("es", "Latn"),
    ("et", "Latn"),
    ("fa", "Arab"),
    ("fi", "Latn"),
    ("fr", "Latn"),
    ("he", "Hebr"),
    ("hi", "Deva"),
    ("hu", "Latn"),
    ("hy", "Armn"),
    ("id", "Latn"),
    ("is", "Latn"),
    ("it", "Latn"),
    ("ja", "Jpan"),
    ("ka", "Geor"),
    ("ko", "Kore"),
    ("lt", "Latn"),
    ("lv", "Latn"),
    ("nb", "Latn"),
    ("nl", "Latn"),
    ("nn", "Latn"),
    ("pl", "Latn"),
    ("pt", "Latn"),
    ("ro", "Latn"),
    ("ru", "Cyrl"),
    ("sk", "Latn"),
    ("sl", "Latn"),
    ("sv", "Latn"),
    ("th", "Thai"),
    ("tr", "Latn"),
    ("uk", "Cyrl"),
    ("vi", "Latn"),
];

/// Normalize a BCP 47 language tag.
pub fn normalize(tag: &str) -> String {
    let trimmed = tag.trim();
    let lower = trimmed.replace('_', "-").to_ascii_lowercase();

    if let Some(replacement) = lookup(GRANDFATHERED, &lower) {
        let replacement = replacement.to_ascii_lowercase();
        return canonicalize(&replacement).unwrap_or(replacement);
    }

    canonicalize(&lower).unwrap_or_else(|| trimmed.to_string())
}

/// Position of a subtag within the tag, used to decide its casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Part {
    Language,
    Extlang,
    Script,
    Region,
    Variant,
    /// Inside an extension or private-use sequence.
    Extension,
}

fn canonicalize(lower: &str) -> Option<String> {
    let mut subtags = lower.split('-');
    let first = subtags.next()?;

    // Tags made only of private use (`x-...`) are kept lowercase.
    if first == "x" {
        let rest: Vec<&str> = subtags.collect();
        if rest.is_empty() || !rest.iter().all(|s| is_subtag(s, 1, 8)) {
            return None;
        }
        return Some(lower.to_string());
    }

    if !(is_alpha(first, 2, 3) || is_alpha(first, 5, 8)) {
        return None;
    }

    let mut language = first;
    let mut script = None;
    let mut region = None;
    let mut rest = Vec::new();
    let mut part = Part::Language;

    for subtag in subtags {
        if !is_subtag(subtag, 1, 8) {
            return None;
        }

        part = classify(subtag, part)?;
        match part {
            // `zh-cmn` is the extlang form of `cmn`.
            Part::Extlang => language = subtag,
            Part::Script => script = Some(title_case(subtag)),
            Part::Region => region = Some(subtag.to_ascii_uppercase()),
            Part::Language | Part::Variant | Part::Extension => rest.push(subtag),
        }
    }

    // A singleton must be followed by at least one subtag.
    if rest.last().is_some_and(|s| s.len() == 1) {
        return None;
    }

    let mut language = language.to_string();
    if let Some(replacement) = lookup(LANGUAGE_ALIASES, &language) {
        let mut parts = replacement.split('-');
        language = parts.next().unwrap_or(replacement).to_string();
        for subtag in parts {
            let slot = if subtag.len() == 4 { &mut script } else { &mut region };
            slot.get_or_insert_with(|| subtag.to_string());
        }
    }

    let script = script.filter(|s| lookup(SUPPRESS_SCRIPTS, &language) != Some(s.as_str()));
    let region = region.map(|r| lookup(REGION_ALIASES, &r).map_or(r, str::to_string));

    let mut out = vec![language];
    out.extend(script);
    out.extend(region);
    out.extend(rest.into_iter().map(str::to_string));
    Some(out.join("-"))
}

/// Decide what `subtag` is, given the kind of the previous subtag.
fn classify(subtag: &str, previous: Part) -> Option<Part> {
    if previous == Part::Extension {
        return Some(Part::Extension);
    }
    if subtag.len() == 1 {
        return Some(Part::Extension);
    }

    let part = match subtag.len() {
        3 if is_alpha(subtag, 3, 3) && matches!(previous, Part::Language | Part::Extlang) => {
            Part::Extlang
        }
        4 if is_alpha(subtag, 4, 4) && previous < Part::Script => Part::Script,
        2 if is_alpha(subtag, 2, 2) && previous < Part::Region => Part::Region,
        3 if subtag.bytes().all(|b| b.is_ascii_digit()) && previous < Part::Region => Part::Region,
        4 if subtag.as_bytes()[0].is_ascii_digit() => Part::Variant,
        5..=8 => Part::Variant,
        _ => return None,
    };
    Some(part)
}

fn lookup<'a>(table: &'a [(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn is_alpha(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_subtag(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple() {
        assert_eq!(normalize("en"), "en");
        assert_eq!(normalize("NL"), "nl");
        assert_eq!(normalize(" fr "), "fr");
    }

    #[test]
    fn test_normalize_region_casing() {
        assert_eq!(normalize("en-gb"), "en-GB");
        assert_eq!(normalize("EN-us"), "en-US");
        assert_eq!(normalize("es-419"), "es-419");
    }

    #[test]
    fn test_normalize_underscore() {
        assert_eq!(normalize("en_us"), "en-US");
        assert_eq!(normalize("zh_hant_tw"), "zh-Hant-TW");
    }

    #[test]
    fn test_normalize_script_casing() {
        assert_eq!(normalize("zh-hans"), "zh-Hans");
        assert_eq!(normalize("sr-LATN-rs"), "sr-Latn-RS");
    }

    #[test]
    fn test_normalize_suppresses_implied_script() {
        assert_eq!(normalize("en-Latn"), "en");
        assert_eq!(normalize("en-latn-us"), "en-US");
        assert_eq!(normalize("ru-Cyrl"), "ru");
        assert_eq!(normalize("ru-Latn"), "ru-Latn");
    }

    #[test]
    fn test_normalize_deprecated_language() {
        assert_eq!(normalize("iw"), "he");
        assert_eq!(normalize("in-ID"), "id-ID");
        assert_eq!(normalize("mo"), "ro");
    }

    #[test]
    fn test_normalize_replacement_fills_empty_slots() {
        assert_eq!(normalize("sh"), "sr-Latn");
        assert_eq!(normalize("sh-BA"), "sr-Latn-BA");
        assert_eq!(normalize("sh-Cyrl"), "sr-Cyrl");
        assert_eq!(normalize("cnr"), "sr-ME");
        assert_eq!(normalize("prs-IR"), "fa-IR");
    }

    #[test]
    fn test_normalize_macrolanguage_and_overlong() {
        assert_eq!(normalize("cmn"), "zh");
        assert_eq!(normalize("cmn-Hant-TW"), "zh-Hant-TW");
        assert_eq!(normalize("arb"), "ar");
        assert_eq!(normalize("eng-US"), "en-US");
        assert_eq!(normalize("deu-latn"), "de");
    }

    #[test]
    fn test_normalize_extlang() {
        assert_eq!(normalize("zh-cmn-Hans"), "zh-Hans");
        assert_eq!(normalize("zh-cmn-hans-cn"), "zh-Hans-CN");
        assert_eq!(normalize("zh-yue-HK"), "yue-HK");
        assert_eq!(normalize("ar-arb"), "ar");
    }

    #[test]
    fn test_normalize_deprecated_region() {
        assert_eq!(normalize("my-BU"), "my-MM");
        assert_eq!(normalize("de-dd"), "de-DE");
        assert_eq!(normalize("en-UK"), "en-GB");
        assert_eq!(normalize("sr-YU"), "sr-RS");
    }

    #[test]
    fn test_normalize_grandfathered() {
        assert_eq!(normalize("i-klingon"), "tlh");
        assert_eq!(normalize("en-GB-oed"), "en-GB-oxendict");
        assert_eq!(normalize("zh-min-nan"), "nan");
        assert_eq!(normalize("zh-guoyu"), "zh");
    }

    #[test]
    fn test_normalize_variants_and_extensions() {
        assert_eq!(normalize("de-CH-1996"), "de-CH-1996");
        assert_eq!(normalize("sl-ROZAJ-biske"), "sl-rozaj-biske");
        assert_eq!(normalize("en-US-u-CA-gregory"), "en-US-u-ca-gregory");
        assert_eq!(normalize("en-x-US"), "en-x-us");
        assert_eq!(normalize("x-Private"), "x-private");
    }

    #[test]
    fn test_normalize_invalid_returns_input() {
        assert_eq!(normalize("not a tag"), "not a tag");
        assert_eq!(normalize("e"), "e");
        assert_eq!(normalize("en-"), "en-");
        assert_eq!(normalize("en-u"), "en-u");
        assert_eq!(normalize(""), "");
    }
}
