//! Bilingual (French + English) stop-word set.

use std::collections::HashSet;

use once_cell::sync::Lazy;

static ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "couldn", "did", "didn", "do", "does", "doesn", "doing", "don", "down",
    "during", "each", "few", "for", "from", "further", "had", "hadn", "has", "hasn", "have",
    "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "me", "more", "most",
    "mustn", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once", "only", "or",
    "other", "our", "ours", "ourselves", "out", "over", "own", "re", "same", "she", "should",
    "shouldn", "so", "some", "such", "than", "that", "the", "their", "theirs", "them",
    "themselves", "then", "there", "these", "they", "this", "those", "through", "to", "too",
    "under", "until", "up", "very", "was", "wasn", "we", "were", "weren", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "won", "wouldn", "you",
    "your", "yours", "yourself", "yourselves",
];

static FRENCH: &[&str] = &[
    "ai", "aie", "aient", "aies", "ait", "alors", "as", "au", "aura", "aurai", "auraient",
    "aurais", "aurait", "auras", "aurez", "auriez", "aurions", "aurons", "auront", "autre",
    "autres", "aux", "avaient", "avais", "avait", "avec", "avez", "aviez", "avions", "avoir",
    "avons", "ayant", "ayez", "ayons", "ce", "ceci", "cela", "ces", "cet", "cette", "chez",
    "comme", "comment", "dans", "de", "des", "donc", "du", "elle", "elles", "en", "encore",
    "es", "est", "et", "étaient", "étais", "était", "étant", "été", "êtes", "étiez", "étions",
    "être", "eu", "eurent", "eut", "eux", "faire", "fait", "font", "furent", "fut", "il",
    "ils", "je", "la", "le", "les", "leur", "leurs", "lui", "ma", "mais", "me", "même", "mes",
    "moi", "moins", "mon", "ne", "nos", "notre", "nous", "on", "ont", "ou", "où", "par",
    "pas", "plus", "pour", "qu", "quand", "que", "qui", "sa", "sans", "se", "sera", "serai",
    "seraient", "serais", "serait", "seras", "serez", "seriez", "serions", "serons", "seront",
    "ses", "si", "soient", "sois", "soit", "sommes", "son", "sont", "sous", "soyez", "soyons",
    "suis", "sur", "ta", "te", "tes", "toi", "ton", "tous", "tout", "toute", "toutes", "très",
    "tu", "un", "une", "vos", "votre", "vous", "y", "ça",
];

/// The merged French + English stop-word set, built once per process.
#[must_use]
pub fn stop_words() -> &'static HashSet<&'static str> {
    static SET: Lazy<HashSet<&'static str>> =
        Lazy::new(|| ENGLISH.iter().chain(FRENCH.iter()).copied().collect());
    &SET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_both_languages() {
        let set = stop_words();
        assert!(set.contains("the"));
        assert!(set.contains("les"));
        assert!(set.contains("être"));
        assert!(set.contains("this"));
    }

    #[test]
    fn content_words_are_not_stop_words() {
        let set = stop_words();
        assert!(!set.contains("love"));
        assert!(!set.contains("produit"));
        assert!(!set.contains("great"));
    }
}
