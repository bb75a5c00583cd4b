use super::RecordData;
use crate::error::{RdataTextError, WireError};
use crate::name::Name;
use crate::wire::{Reader, Renderer};

/// SVCB/HTTPS service parameter key (RFC 9460 §14.3). Unknown keys are
/// preserved numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvcbParamKey {
    Mandatory,
    Alpn,
    NoDefaultAlpn,
    Port,
    Ipv4Hint,
    Ech,
    Ipv6Hint,
    DohPath,
    Other(u16),
}

impl SvcbParamKey {
    fn from_u16(v: u16) -> Self {
        match v {
            0 => SvcbParamKey::Mandatory,
            1 => SvcbParamKey::Alpn,
            2 => SvcbParamKey::NoDefaultAlpn,
            3 => SvcbParamKey::Port,
            4 => SvcbParamKey::Ipv4Hint,
            5 => SvcbParamKey::Ech,
            6 => SvcbParamKey::Ipv6Hint,
            7 => SvcbParamKey::DohPath,
            other => SvcbParamKey::Other(other),
        }
    }

    fn to_u16(self) -> u16 {
        match self {
            SvcbParamKey::Mandatory => 0,
            SvcbParamKey::Alpn => 1,
            SvcbParamKey::NoDefaultAlpn => 2,
            SvcbParamKey::Port => 3,
            SvcbParamKey::Ipv4Hint => 4,
            SvcbParamKey::Ech => 5,
            SvcbParamKey::Ipv6Hint => 6,
            SvcbParamKey::DohPath => 7,
            SvcbParamKey::Other(v) => v,
        }
    }

    fn name(self) -> String {
        match self {
            SvcbParamKey::Mandatory => "mandatory".into(),
            SvcbParamKey::Alpn => "alpn".into(),
            SvcbParamKey::NoDefaultAlpn => "no-default-alpn".into(),
            SvcbParamKey::Port => "port".into(),
            SvcbParamKey::Ipv4Hint => "ipv4hint".into(),
            SvcbParamKey::Ech => "ech".into(),
            SvcbParamKey::Ipv6Hint => "ipv6hint".into(),
            SvcbParamKey::DohPath => "dohpath".into(),
            SvcbParamKey::Other(v) => format!("key{v}"),
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "mandatory" => SvcbParamKey::Mandatory,
            "alpn" => SvcbParamKey::Alpn,
            "no-default-alpn" => SvcbParamKey::NoDefaultAlpn,
            "port" => SvcbParamKey::Port,
            "ipv4hint" => SvcbParamKey::Ipv4Hint,
            "ech" => SvcbParamKey::Ech,
            "ipv6hint" => SvcbParamKey::Ipv6Hint,
            "dohpath" => SvcbParamKey::DohPath,
            other => other
                .strip_prefix("key")
                .and_then(|n| n.parse::<u16>().ok())
                .map(SvcbParamKey::Other)
                .unwrap_or(SvcbParamKey::Other(0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvcbParam {
    pub key: SvcbParamKey,
    pub value: Vec<u8>,
}

/// Shared SVCB/HTTPS rdata layout (RFC 9460). The target name is never
/// compressed; params are always emitted in ascending key order on the
/// wire (spec §4.2 `I-SVCB-ORDER`), regardless of the order `from_text`
/// received them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvcbData {
    pub svc_priority: u16,
    pub target_name: Name,
    pub params: Vec<SvcbParam>,
}

impl SvcbData {
    /// `mandatory` must not list its own key, and `no-default-alpn`
    /// requires `alpn` to also be present (spec §4.2 SVCB/HTTPS rules).
    pub fn validate(&self) -> Result<(), RdataTextError> {
        let has_alpn = self.params.iter().any(|p| p.key == SvcbParamKey::Alpn);
        for p in &self.params {
            if p.key == SvcbParamKey::Mandatory {
                let listed = decode_mandatory(&p.value);
                if listed.contains(&SvcbParamKey::Mandatory.to_u16()) {
                    return Err(RdataTextError::new("SVCB mandatory must not list its own key"));
                }
            }
            if p.key == SvcbParamKey::NoDefaultAlpn && !has_alpn {
                return Err(RdataTextError::new(
                    "SVCB no-default-alpn requires alpn to also be present",
                ));
            }
        }
        Ok(())
    }

    fn decode(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        let start = reader.pos();
        let svc_priority = reader.read_u16()?;
        let target_name = reader.read_name()?;
        let mut params = Vec::new();
        let consumed = reader.pos() - start;
        let stop = start + rdlength;
        let _ = consumed;
        while reader.pos() < stop {
            let key = SvcbParamKey::from_u16(reader.read_u16()?);
            let len = reader.read_u16()? as usize;
            let value = reader.read_bytes(len)?.to_vec();
            params.push(SvcbParam { key, value });
        }
        Ok(SvcbData {
            svc_priority,
            target_name,
            params,
        })
    }

    fn sorted_params(&self) -> Vec<&SvcbParam> {
        let mut v: Vec<&SvcbParam> = self.params.iter().collect();
        v.sort_by_key(|p| p.key.to_u16());
        v
    }

    fn encode(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        renderer.write_u16(self.svc_priority);
        renderer.write_name(&self.target_name, false)?;
        for p in self.sorted_params() {
            renderer.write_u16(p.key.to_u16());
            renderer.write_u16(p.value.len() as u16);
            renderer.write_bytes(&p.value);
        }
        Ok(())
    }

    fn canonical(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.svc_priority.to_be_bytes());
        out.extend_from_slice(self.target_name.canonical_bytes());
        for p in self.sorted_params() {
            out.extend_from_slice(&p.key.to_u16().to_be_bytes());
            out.extend_from_slice(&(p.value.len() as u16).to_be_bytes());
            out.extend_from_slice(&p.value);
        }
    }

    fn text(&self) -> String {
        let mut s = format!("{} {}", self.svc_priority, self.target_name);
        for p in self.sorted_params() {
            s.push(' ');
            s.push_str(&param_to_text(p));
        }
        s
    }

    fn parse(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        let svc_priority = super::parse_num(super::next_token(tokens, 0, "SVCB priority")?, "SVCB priority")?;
        let target_name = super::parse_name_token(super::next_token(tokens, 1, "SVCB target name")?, origin)?;
        let mut params = Vec::new();
        for tok in &tokens[2..] {
            params.push(param_from_text(tok)?);
        }
        let data = SvcbData {
            svc_priority,
            target_name,
            params,
        };
        data.validate()?;
        Ok(data)
    }
}

fn decode_mandatory(value: &[u8]) -> Vec<u16> {
    value
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect()
}

fn encode_mandatory(keys: &[SvcbParamKey]) -> Vec<u8> {
    let mut sorted: Vec<u16> = keys.iter().map(|k| k.to_u16()).collect();
    sorted.sort_unstable();
    sorted.iter().flat_map(|v| v.to_be_bytes()).collect()
}

fn param_to_text(p: &SvcbParam) -> String {
    match p.key {
        SvcbParamKey::NoDefaultAlpn => "no-default-alpn".to_string(),
        SvcbParamKey::Mandatory => {
            let keys: Vec<String> = decode_mandatory(&p.value)
                .into_iter()
                .map(|k| SvcbParamKey::from_u16(k).name())
                .collect();
            format!("mandatory={}", keys.join(","))
        }
        SvcbParamKey::Alpn => format!("alpn={}", String::from_utf8_lossy(&p.value)),
        SvcbParamKey::Port => {
            let port = p.value.get(0..2).map(|b| u16::from_be_bytes([b[0], b[1]])).unwrap_or(0);
            format!("port={port}")
        }
        _ => format!(
            "{}={}",
            p.key.name(),
            data_encoding::HEXLOWER.encode(&p.value)
        ),
    }
}

/// Parse one `key` or `key=value` token (RFC 9460 §2.1 presentation
/// format).
fn param_from_text(tok: &str) -> Result<SvcbParam, RdataTextError> {
    let (name, value) = match tok.split_once('=') {
        Some((n, v)) => (n, Some(v)),
        None => (tok, None),
    };
    let key = SvcbParamKey::from_name(name);
    let bytes = match (key, value) {
        (SvcbParamKey::NoDefaultAlpn, _) => Vec::new(),
        (SvcbParamKey::Port, Some(v)) => {
            let port: u16 = v
                .parse()
                .map_err(|_| RdataTextError::new(format!("invalid SVCB port: {v:?}")))?;
            port.to_be_bytes().to_vec()
        }
        (SvcbParamKey::Alpn, Some(v)) => v.as_bytes().to_vec(),
        (SvcbParamKey::Mandatory, Some(v)) => {
            let keys: Vec<SvcbParamKey> = v.split(',').map(SvcbParamKey::from_name).collect();
            encode_mandatory(&keys)
        }
        (_, Some(v)) => super::parse_hex(v, "SVCB param value")?,
        (_, None) => {
            return Err(RdataTextError::new(format!(
                "SVCB param {name:?} requires a value"
            )))
        }
    };
    Ok(SvcbParam { key, value: bytes })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Svcb(pub SvcbData);

impl RecordData for Svcb {
    const RDTYPE: u16 = super::TYPE_SVCB;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        Ok(Svcb(SvcbData::decode(reader, rdlength)?))
    }
    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        self.0.encode(renderer)
    }
    fn to_canonical(&self, out: &mut Vec<u8>) {
        self.0.canonical(out)
    }
    fn to_text(&self) -> String {
        self.0.text()
    }
    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        Ok(Svcb(SvcbData::parse(tokens, origin)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Https(pub SvcbData);

impl RecordData for Https {
    const RDTYPE: u16 = super::TYPE_HTTPS;

    fn from_wire(reader: &mut Reader<'_>, rdlength: usize) -> Result<Self, WireError> {
        Ok(Https(SvcbData::decode(reader, rdlength)?))
    }
    fn to_wire(&self, renderer: &mut Renderer) -> Result<(), WireError> {
        self.0.encode(renderer)
    }
    fn to_canonical(&self, out: &mut Vec<u8>) {
        self.0.canonical(out)
    }
    fn to_text(&self) -> String {
        self.0.text()
    }
    fn from_text(tokens: &[String], origin: Option<&Name>) -> Result<Self, RdataTextError> {
        Ok(Https(SvcbData::parse(tokens, origin)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_emit_in_ascending_key_order() {
        let data = SvcbData {
            svc_priority: 1,
            target_name: Name::from_text("svc.example.").unwrap(),
            params: vec![
                SvcbParam {
                    key: SvcbParamKey::Port,
                    value: 443u16.to_be_bytes().to_vec(),
                },
                SvcbParam {
                    key: SvcbParamKey::Alpn,
                    value: b"h2".to_vec(),
                },
            ],
        };
        let mut r = Renderer::new();
        data.encode(&mut r).unwrap();
        let mut reader = Reader::new(r.bytes());
        let decoded = SvcbData::decode(&mut reader, r.len()).unwrap();
        assert_eq!(decoded.params[0].key, SvcbParamKey::Alpn);
        assert_eq!(decoded.params[1].key, SvcbParamKey::Port);
    }

    #[test]
    fn no_default_alpn_without_alpn_is_rejected() {
        let data = SvcbData {
            svc_priority: 1,
            target_name: Name::from_text("svc.example.").unwrap(),
            params: vec![SvcbParam {
                key: SvcbParamKey::NoDefaultAlpn,
                value: Vec::new(),
            }],
        };
        assert!(data.validate().is_err());
    }

    #[test]
    fn text_round_trip() {
        let tokens: Vec<String> = "1 svc.example. alpn=h2 port=443"
            .split_whitespace()
            .map(String::from)
            .collect();
        let svcb = Svcb::from_text(&tokens, None).unwrap();
        assert_eq!(svcb.0.svc_priority, 1);
        assert_eq!(svcb.0.params.len(), 2);
    }
}
