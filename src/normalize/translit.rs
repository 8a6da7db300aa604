//! Cyrillic to Latin transliteration following the Bulgarian streamlined
//! system, so that e.g. "София" becomes "sofiya" and "България" becomes
//! "balgariya". Input is expected to be lowercased already; uppercase
//! Cyrillic letters are handled anyway for totality. Characters outside the
//! table pass through unchanged.

/// Transliterate any Cyrillic characters in `text` to their Latin
/// equivalents. Latin-script text comes back unchanged.
pub fn to_latin(text: &str) -> String {
    // Most addresses are already Latin; reserve a little extra for the
    // multi-character expansions (zh, sht, ...) when they are not.
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match latin_of(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

/// True when the text contains at least one transliterable Cyrillic letter.
pub fn has_cyrillic(text: &str) -> bool {
    text.chars().any(|c| latin_of(c).is_some())
}

fn latin_of(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' | 'А' => "a",
        'б' | 'Б' => "b",
        'в' | 'В' => "v",
        'г' | 'Г' => "g",
        'д' | 'Д' => "d",
        'е' | 'Е' => "e",
        'ж' | 'Ж' => "zh",
        'з' | 'З' => "z",
        'и' | 'И' => "i",
        'й' | 'Й' => "y",
        'к' | 'К' => "k",
        'л' | 'Л' => "l",
        'м' | 'М' => "m",
        'н' | 'Н' => "n",
        'о' | 'О' => "o",
        'п' | 'П' => "p",
        'р' | 'Р' => "r",
        'с' | 'С' => "s",
        'т' | 'Т' => "t",
        'у' | 'У' => "u",
        'ф' | 'Ф' => "f",
        'х' | 'Х' => "h",
        'ц' | 'Ц' => "ts",
        'ч' | 'Ч' => "ch",
        'ш' | 'Ш' => "sh",
        'щ' | 'Щ' => "sht",
        'ъ' | 'Ъ' => "a",
        'ь' | 'Ь' => "y",
        'ю' | 'Ю' => "yu",
        'я' | 'Я' => "ya",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_text_unchanged() {
        assert_eq!(to_latin("ul. shipka 34"), "ul. shipka 34");
        assert_eq!(to_latin("frankfurt am main"), "frankfurt am main");
    }

    #[test]
    fn test_bulgarian_cities() {
        assert_eq!(to_latin("софия"), "sofiya");
        assert_eq!(to_latin("българия"), "balgariya");
        assert_eq!(to_latin("шипка"), "shipka");
        assert_eq!(to_latin("ул."), "ul.");
    }

    #[test]
    fn test_uppercase_handled() {
        assert_eq!(to_latin("София"), "sofiya");
    }

    #[test]
    fn test_multi_char_expansions() {
        assert_eq!(to_latin("жп гара"), "zhp gara");
        assert_eq!(to_latin("площад"), "ploshtad");
    }

    #[test]
    fn test_has_cyrillic() {
        assert!(has_cyrillic("ул. Шипка 34"));
        assert!(!has_cyrillic("ul. shipka 34"));
    }

    #[test]
    fn test_non_bulgarian_chars_pass_through() {
        // German umlauts and digits are not in the table
        assert_eq!(to_latin("müller 7"), "müller 7");
    }
}
