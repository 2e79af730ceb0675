//! Rule-based French/English lemmatization.
//!
//! An exception table catches high-frequency irregular forms; everything
//! else goes through conservative suffix rules. Every rule output is a
//! fixpoint (`lemma(lemma(w)) == lemma(w)`), which is what makes the whole
//! cleaning pipeline idempotent.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static EXCEPTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let pairs: &[(&str, &str)] = &[
        // English irregulars
        ("am", "be"),
        ("is", "be"),
        ("are", "be"),
        ("was", "be"),
        ("were", "be"),
        ("been", "be"),
        ("being", "be"),
        ("has", "have"),
        ("had", "have"),
        ("having", "have"),
        ("does", "do"),
        ("did", "do"),
        ("done", "do"),
        ("doing", "do"),
        ("goes", "go"),
        ("went", "go"),
        ("gone", "go"),
        ("going", "go"),
        ("said", "say"),
        ("says", "say"),
        ("saying", "say"),
        ("made", "make"),
        ("makes", "make"),
        ("making", "make"),
        ("got", "get"),
        ("gotten", "get"),
        ("gets", "get"),
        ("getting", "get"),
        ("took", "take"),
        ("taken", "take"),
        ("takes", "take"),
        ("taking", "take"),
        ("came", "come"),
        ("comes", "come"),
        ("coming", "come"),
        ("loved", "love"),
        ("loves", "love"),
        ("loving", "love"),
        ("better", "good"),
        ("best", "good"),
        ("worse", "bad"),
        ("worst", "bad"),
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("feet", "foot"),
        // -ing forms that are lexicalized words, not inflections
        ("amazing", "amazing"),
        ("interesting", "interesting"),
        ("something", "something"),
        ("nothing", "nothing"),
        ("anything", "anything"),
        ("everything", "everything"),
        ("morning", "morning"),
        ("evening", "evening"),
        // French irregulars (common conversational forms)
        ("sommes", "être"),
        ("êtes", "être"),
        ("sont", "être"),
        ("était", "être"),
        ("étaient", "être"),
        ("avons", "avoir"),
        ("avez", "avoir"),
        ("ont", "avoir"),
        ("avait", "avoir"),
        ("fais", "faire"),
        ("faites", "faire"),
        ("font", "faire"),
        ("faisait", "faire"),
        ("vais", "aller"),
        ("vas", "aller"),
        ("va", "aller"),
        ("vont", "aller"),
        ("allé", "aller"),
        ("dis", "dire"),
        ("dit", "dire"),
        ("disent", "dire"),
        ("peux", "pouvoir"),
        ("peut", "pouvoir"),
        ("peuvent", "pouvoir"),
        ("pu", "pouvoir"),
        ("veux", "vouloir"),
        ("veut", "vouloir"),
        ("veulent", "vouloir"),
        ("voulu", "vouloir"),
        ("aime", "aimer"),
        ("aimes", "aimer"),
        ("aiment", "aimer"),
        ("aimé", "aimer"),
        ("aimait", "aimer"),
        ("adore", "adorer"),
        ("adores", "adorer"),
        ("adorent", "adorer"),
        ("adoré", "adorer"),
        ("prend", "prendre"),
        ("prends", "prendre"),
        ("prennent", "prendre"),
        ("pris", "prendre"),
        ("vient", "venir"),
        ("viens", "venir"),
        ("viennent", "venir"),
        ("venu", "venir"),
        ("sais", "savoir"),
        ("sait", "savoir"),
        ("savent", "savoir"),
        ("su", "savoir"),
        ("vois", "voir"),
        ("voit", "voir"),
        ("voient", "voir"),
        ("vu", "voir"),
        ("déçu", "décevoir"),
        ("déçue", "décevoir"),
        ("déçus", "décevoir"),
    ];
    pairs.iter().copied().collect()
});

/// Maps a lowercased token to its base form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lemmatizer;

impl Lemmatizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the base form of `token`.
    ///
    /// Each step consults the exception table first, then the suffix rules,
    /// and the steps are iterated to a fixpoint ("dits" -> "dit" -> "dire").
    /// Termination holds because every step output is either a table value
    /// (itself a fixpoint) or strictly shorter. The output is always
    /// lowercase.
    #[must_use]
    pub fn lemma(&self, token: &str) -> String {
        let mut current = token.to_lowercase();
        loop {
            let next = match EXCEPTIONS.get(current.as_str()) {
                Some(base) => (*base).to_string(),
                None => match suffix_lemma(&current) {
                    Some(stemmed) => stemmed,
                    None => break,
                },
            };
            if next == current {
                break;
            }
            current = next;
        }
        current
    }
}

/// Conservative suffix rules shared by both languages.
///
/// All suffixes are ASCII, so byte slicing below always lands on a char
/// boundary. Guards keep each rule's output out of every rule's input set.
fn suffix_lemma(lower: &str) -> Option<String> {
    let len = lower.len();

    // French plural families first: chapeaux -> chapeau, journaux -> journal.
    if lower.ends_with("eaux") && len > 4 {
        return Some(lower[..len - 1].to_string());
    }
    if lower.ends_with("aux") && len > 4 {
        return Some(format!("{}al", &lower[..len - 3]));
    }

    if lower.ends_with("ies") && len > 4 {
        return Some(format!("{}y", &lower[..len - 3]));
    }
    if lower.ends_with("es") && len > 3 {
        let stem = &lower[..len - 2];
        if stem.ends_with("ss")
            || stem.ends_with("sh")
            || stem.ends_with("ch")
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with('o')
        {
            return Some(stem.to_string());
        }
    }
    if lower.ends_with('s')
        && len > 3
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
        && !lower.ends_with("ès")
    {
        return Some(lower[..len - 1].to_string());
    }
    if lower.ends_with("ing") && len > 5 {
        let stem = &lower[..len - 3];
        return Some(undouble(stem));
    }
    if lower.ends_with("ied") && len > 4 {
        return Some(format!("{}y", &lower[..len - 3]));
    }
    if lower.ends_with("ed") && len > 4 {
        let stem = &lower[..len - 2];
        return Some(undouble(stem));
    }
    // French adverbs: rapidement -> rapide, vraiment -> vrai.
    if lower.ends_with("ment") && len > 6 {
        return Some(lower[..len - 4].to_string());
    }

    None
}

/// Reduces a doubled final consonant (running -> run stem).
fn undouble(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    if chars.len() >= 2 && chars[chars.len() - 1] == chars[chars.len() - 2] {
        return chars[..chars.len() - 1].iter().collect();
    }
    stem.to_string()
}
