//! Source tag → Universal POS mapping.
//!
//! Covers the flat ILMT tags (`NN`, `VM`, ...) and the hierarchical BIS tags
//! (`N_NN`, `V_VM`, ...). Anything not listed maps to `X`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const UNKNOWN_POS: &str = "X";

const POS_TABLE: &[(&str, &str)] = &[
    // nouns
    ("NN", "NOUN"),
    ("NNC", "NOUN"),
    ("NST", "NOUN"),
    ("N_NN", "NOUN"),
    ("N_NST", "NOUN"),
    ("NNP", "PROPN"),
    ("NNPC", "PROPN"),
    ("N_NNP", "PROPN"),
    // pronouns
    ("PRP", "PRON"),
    ("PRPC", "PRON"),
    ("WQ", "PRON"),
    ("PR_PRP", "PRON"),
    ("PR_PRF", "PRON"),
    ("PR_PRL", "PRON"),
    ("PR_PRC", "PRON"),
    ("PR_PRQ", "PRON"),
    // verbs
    ("VM", "VERB"),
    ("VMC", "VERB"),
    ("V_VM", "VERB"),
    ("V_VM_VF", "VERB"),
    ("V_VM_VINF", "VERB"),
    ("V_VM_VNF", "VERB"),
    ("V_VM_VNG", "VERB"),
    ("VAUX", "AUX"),
    ("V_VAUX", "AUX"),
    // modifiers
    ("JJ", "ADJ"),
    ("JJC", "ADJ"),
    ("QO", "ADJ"),
    ("RB", "ADV"),
    ("RBC", "ADV"),
    ("INTF", "ADV"),
    ("RP_INTF", "ADV"),
    // function words
    ("PSP", "ADP"),
    ("CC", "CCONJ"),
    ("CC_CCD", "CCONJ"),
    ("UT", "SCONJ"),
    ("CC_CCS", "SCONJ"),
    ("CC_CCS_UT", "SCONJ"),
    ("DEM", "DET"),
    ("QF", "DET"),
    ("DM_DMD", "DET"),
    ("DM_DMR", "DET"),
    ("DM_DMQ", "DET"),
    ("RP", "PART"),
    ("NEG", "PART"),
    ("RP_RPD", "PART"),
    ("RP_NEG", "PART"),
    ("INJ", "INTJ"),
    ("RP_INJ", "INTJ"),
    // numerals
    ("QC", "NUM"),
    ("QT_QTC", "NUM"),
    ("QT_QTF", "NUM"),
    ("QT_QTO", "NUM"),
    // residuals
    ("SYM", "PUNCT"),
    ("RD_PUNC", "PUNCT"),
    ("RD_SYM", "SYM"),
    ("RD_RDF", "X"),
    ("RD_ECH", "X"),
    ("RD_UNK", "X"),
];

static POS_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| POS_TABLE.iter().copied().collect());

/// Map a source tag to its Universal POS category. Total; unknown tags give `X`.
///
/// ```
/// use ssfconv::map_pos;
///
/// assert_eq!(map_pos("NNP"), "PROPN");
/// assert_eq!(map_pos("V_VAUX"), "AUX");
/// assert_eq!(map_pos("FOO"), "X");
/// ```
pub fn map_pos(xpos: &str) -> &'static str {
    POS_MAP.get(xpos).copied().unwrap_or(UNKNOWN_POS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_examples() {
        let cases = [
            ("NN", "NOUN"),
            ("N_NN", "NOUN"),
            ("PR_PRP", "PRON"),
            ("VM", "VERB"),
            ("PSP", "ADP"),
            ("CC_CCD", "CCONJ"),
            ("CC_CCS", "SCONJ"),
            ("QT_QTO", "NUM"),
            ("RD_PUNC", "PUNCT"),
            ("RD_SYM", "SYM"),
            ("DM_DMD", "DET"),
            ("NEG", "PART"),
        ];
        for (xpos, upos) in cases {
            assert_eq!(map_pos(xpos), upos, "xpos {xpos}");
        }
    }

    #[test]
    fn unknown_and_case_sensitive() {
        assert_eq!(map_pos(""), "X");
        assert_eq!(map_pos("nn"), "X");
        assert_eq!(map_pos("NN "), "X");
    }

    #[test]
    fn table_has_no_duplicate_tags() {
        assert_eq!(POS_MAP.len(), POS_TABLE.len());
    }
}
