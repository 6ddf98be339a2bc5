//! Lemma and morphological features from the `af` bundle.
//!
//! `af` is a comma-separated positional bundle:
//!
//! ```text
//! af='root,category,gender,number,person,case,tam,suffix'
//!      0    1        2      3      4      5    6   7
//! ```
//!
//! Only root, gender, number and person are carried into CoNLL-U.

use super::attrs::extract_attribute;

const NO_FEATURES: &str = "_";

/// Lemma = first `af` field, falling back to the surface form.
///
/// ```
/// use ssfconv::extract_lemma;
///
/// assert_eq!(extract_lemma("<fs af='जा,v,m,sg,3,,या,ya'>", "गया"), "जा");
/// assert_eq!(extract_lemma("<fs name='VGF'>", "गया"), "गया");
/// ```
pub fn extract_lemma(bundle: &str, fallback_form: &str) -> String {
    extract_attribute(bundle, "af")
        .and_then(|af| af.split(',').next())
        .filter(|root| !root.is_empty())
        .unwrap_or(fallback_form)
        .to_string()
}

/// `Gender`, `Number` and `Person` from `af`, `|`-joined, or `_`.
///
/// ```
/// use ssfconv::extract_features;
///
/// assert_eq!(extract_features("<fs af='राम,n,m,sg,3,d,0,0'>"), "Gender=Masc|Number=Sing|Person=3");
/// assert_eq!(extract_features("<fs af='और,avy,,,,,,'>"), "_");
/// ```
pub fn extract_features(bundle: &str) -> String {
    let Some(af) = extract_attribute(bundle, "af") else {
        return NO_FEATURES.to_string();
    };

    let fields: Vec<&str> = af.split(',').collect();
    let field = |idx: usize| fields.get(idx).copied().filter(|v| !v.is_empty());

    let mut feats = Vec::with_capacity(3);
    if let Some(g) = field(2) {
        feats.push(format!("Gender={}", gender(g)));
    }
    if let Some(n) = field(3) {
        feats.push(format!("Number={}", number(n)));
    }
    if let Some(p) = field(4) {
        feats.push(format!("Person={p}"));
    }

    if feats.is_empty() { NO_FEATURES.to_string() } else { feats.join("|") }
}

fn gender(value: &str) -> &str {
    match value {
        "m" => "Masc",
        "f" => "Fem",
        "any" => "Any",
        other => other,
    }
}

fn number(value: &str) -> &str {
    match value {
        "sg" => "Sing",
        "pl" => "Plur",
        "any" => "Any",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_examples() {
        let cases = [
            ("<fs af='लड़की,n,f,pl,3,d,0,0'>", "Gender=Fem|Number=Plur|Person=3"),
            ("<fs af='वह,pn,any,any,3,d,0,0'>", "Gender=Any|Number=Any|Person=3"),
            ("<fs af='x,n,n,du,2'>", "Gender=n|Number=du|Person=2"),
            ("<fs af='x,n,m'>", "Gender=Masc"),
            ("<fs af='x,n,,sg'>", "Number=Sing"),
            ("<fs af='x'>", "_"),
            ("<fs name='NP'>", "_"),
            ("", "_"),
        ];
        for (bundle, expected) in cases {
            assert_eq!(extract_features(bundle), expected, "bundle {bundle}");
        }
    }

    #[test]
    fn lemma_falls_back_on_empty_root() {
        assert_eq!(extract_lemma("<fs af=',n,m,sg,3'>", "घर"), "घर");
        assert_eq!(extract_lemma("<fs af='घर'>", "घरों"), "घर");
    }
}
