//! Turkish-aware case folding and string ordering.
//!
//! Record names are Turkish, so neither byte order nor Unicode default
//! lowercasing gives the right answer: `I` lowers to `ı`, `İ` to `i`, and
//! `ç ğ ı ö ş ü` each sort right after their base letter.

use std::cmp::Ordering;

/// Turkish alphabet, extended with `q w x` in their Latin positions.
const ALPHABET: [char; 32] = [
    'a', 'b', 'c', 'ç', 'd', 'e', 'f', 'g', 'ğ', 'h', 'ı', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'ö',
    'p', 'q', 'r', 's', 'ş', 't', 'u', 'ü', 'v', 'w', 'x', 'y', 'z',
];

/// Lowercase a single character using Turkish rules.
fn lower(c: char) -> char {
    match c {
        'I' => 'ı',
        'İ' => 'i',
        _ => c.to_lowercase().next().unwrap_or(c),
    }
}

/// Lowercase a string using Turkish rules (`I → ı`, `İ → i`).
pub fn turkish_lowercase(s: &str) -> String {
    s.chars().map(lower).collect()
}

/// Primary collation weight: (class, rank). Punctuation and spaces sort
/// first, then digits, then the alphabet, then any other letters.
fn primary(c: char) -> (u8, u32) {
    let c = match lower(c) {
        'â' => 'a',
        'î' => 'i',
        'û' => 'u',
        other => other,
    };
    if let Some(pos) = ALPHABET.iter().position(|&a| a == c) {
        return (2, pos as u32);
    }
    if c.is_ascii_digit() {
        (1, c as u32)
    } else if c.is_alphabetic() {
        (3, c as u32)
    } else {
        (0, c as u32)
    }
}

/// Compare two strings in Turkish dictionary order.
///
/// Case and circumflex differences only break ties: `ağaç` < `Ağaç` <
/// `ağaçlar`.
pub fn turkish_cmp(a: &str, b: &str) -> Ordering {
    let by_letter = a.chars().map(primary).cmp(b.chars().map(primary));
    if by_letter != Ordering::Equal {
        return by_letter;
    }
    let by_case = a
        .chars()
        .map(|c| c.is_uppercase())
        .cmp(b.chars().map(|c| c.is_uppercase()));
    by_case.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = words.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| turkish_cmp(a, b));
        v
    }

    #[test]
    fn turkish_letters_follow_their_base() {
        assert_eq!(sorted(&["çam", "Ağaç", "elma"]), ["Ağaç", "çam", "elma"]);
        assert_eq!(sorted(&["dut", "çilek", "cevi z"]), ["cevi z", "çilek", "dut"]);
        assert_eq!(sorted(&["ördek", "ot", "pul"]), ["ot", "ördek", "pul"]);
        assert_eq!(sorted(&["şeker", "su", "tuz"]), ["su", "şeker", "tuz"]);
    }

    #[test]
    fn dotless_i_before_dotted_i() {
        assert_eq!(sorted(&["inek", "ılık", "Irmak"]), ["ılık", "Irmak", "inek"]);
        assert_eq!(sorted(&["İzmir", "Isparta"]), ["Isparta", "İzmir"]);
    }

    #[test]
    fn case_only_breaks_ties() {
        assert_eq!(turkish_cmp("ağaç", "Ağaç"), Ordering::Less);
        assert_eq!(turkish_cmp("Ağaç", "ağaçlar"), Ordering::Less);
        assert_eq!(turkish_cmp("Zeytin", "çınar"), Ordering::Greater);
    }

    #[test]
    fn digits_before_letters() {
        assert_eq!(sorted(&["palet", "120x80", "Euro"]), ["120x80", "Euro", "palet"]);
    }

    #[test]
    fn lowercase_rules() {
        assert_eq!(turkish_lowercase("IRMAK"), "ırmak");
        assert_eq!(turkish_lowercase("İZMİR"), "izmir");
        assert_eq!(turkish_lowercase("ÇAM Ağacı"), "çam ağacı");
    }
}
