//! Attribute lookup inside SSF feature structures.

/// Return the value of `name` in a feature-structure string.
///
/// Values may be single- or double-quoted. The name must match a whole
/// attribute name, so `drel` does not pick up `xdrel='..'`. Empty values are
/// treated as absent.
///
/// ```
/// use ssfconv::extract_attribute;
///
/// let fs = "<fs af='राम,n,m,sg,3,d,0,0' name='NP1' drel='k1:VGF'>";
/// assert_eq!(extract_attribute(fs, "drel"), Some("k1:VGF"));
/// assert_eq!(extract_attribute(fs, "head"), None);
/// ```
pub fn extract_attribute<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let re = regex!(r#"([\w.-]+)=(?:'([^']*)'|"([^"]*)")"#);

    re.captures_iter(text)
        .filter(|caps| &caps[1] == name)
        .filter_map(|caps| caps.get(2).or_else(|| caps.get(3)))
        .map(|m| m.as_str())
        .find(|value| !value.is_empty())
}
