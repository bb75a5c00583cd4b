//! IDNA encode/decode (§4.1): converting a Unicode label sequence to/from
//! its ASCII-compatible ("xn--") wire form. Gated behind the `idna`
//! feature so that callers who never touch internationalized names don't
//! pull in the Unicode tables — the core's wire codec and data model never
//! call this module themselves; it is a text-form convenience on [`Name`]
//! (grounded in `kiss2u-trust-dns`'s `idna` dependency, the closest
//! same-domain precedent in the pack).

use super::Name;
use crate::error::NameError;

/// Which IDNA profile to apply. The two profiles disagree on a handful of
/// characters (notably ẞ/ß, ZWJ/ZWNJ) — §4.1 requires both be selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdnaProfile {
    /// RFC 3490/3491 (the original IDNA), transitional mappings.
    Idna2003,
    /// RFC 5891, non-transitional UTS #46 processing.
    Idna2008,
}

fn config(profile: IdnaProfile) -> idna::Config {
    let transitional = matches!(profile, IdnaProfile::Idna2003);
    idna::Config::default()
        .transitional_processing(transitional)
        .use_std3_ascii_rules(true)
        .verify_dns_length(true)
}

fn profile_name(profile: IdnaProfile) -> &'static str {
    match profile {
        IdnaProfile::Idna2003 => "2003",
        IdnaProfile::Idna2008 => "2008",
    }
}

/// Encode a Unicode presentation-form name to its ASCII-compatible form
/// (each label `xn--`-prefixed as needed), then parse it as a [`Name`].
pub fn to_ascii(text: &str, profile: IdnaProfile) -> Result<Name, NameError> {
    let ascii = config(profile).to_ascii(text).map_err(|e| NameError::Idna {
        profile: profile_name(profile),
        reason: format!("{e:?}"),
    })?;
    Name::from_text(&ascii)
}

/// Decode a [`Name`] whose labels may carry `xn--` ACE prefixes back to
/// their Unicode presentation form.
pub fn to_unicode(name: &Name, profile: IdnaProfile) -> Result<String, NameError> {
    let text = name.to_string();
    let (unicode, result) = config(profile).to_unicode(&text);
    result.map_err(|e| NameError::Idna {
        profile: profile_name(profile),
        reason: format!("{e:?}"),
    })?;
    Ok(unicode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_round_trips_plain_name() {
        let n = to_ascii("www.example.com.", IdnaProfile::Idna2008).unwrap();
        assert_eq!(n.to_string(), "www.example.com.");
    }

    #[test]
    fn unicode_label_gets_ace_prefix() {
        let n = to_ascii("xn--nxasmq6b.", IdnaProfile::Idna2008).unwrap();
        assert_eq!(n.to_string(), "xn--nxasmq6b.");
        let back = to_unicode(&n, IdnaProfile::Idna2008).unwrap();
        assert!(!back.is_empty());
    }
}
