//! Message framing: header, question, and the four RR sections (spec
//! §4.5). Grounded in the teacher's bit-level `Header`
//! (`src/dns/header.rs`) for flag-field layout, generalized onto the
//! new [`crate::wire`] reader/renderer and [`crate::name::Name`].

mod header;
mod question;

pub use header::{Header, Opcode, Rcode};
pub use question::Question;

use crate::error::{MessageError, WireError};
use crate::name::Name;
use crate::rdata::{Opt, OptOption, RData, TYPE_OPT, TYPE_TSIG};
use crate::wire::{Reader, Renderer};

/// EDNS option code for RFC 7830 PADDING.
const EDNS_OPTION_PADDING: u16 = 12;

/// One resource record as it appears in a message section: owner name,
/// type/class/ttl, and rdata (spec §4.2, §4.5).
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: Name,
    pub rdclass: u16,
    pub ttl: u32,
    pub rdata: RData,
}

/// The EDNS pseudo-record layout (RFC 6891 §6.1), decoded out of the
/// OPT RR's class (UDP payload size) and TTL (extended RCODE / version
/// / flags) fields plus its rdata (option list).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Edns {
    pub udp_payload_size: u16,
    pub extended_rcode: u8,
    pub version: u8,
    pub dnssec_ok: bool,
    pub options: Vec<crate::rdata::OptOption>,
}

const DO_BIT: u32 = 0x8000;

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub header: Header,
    pub question: Vec<Question>,
    pub answer: Vec<Record>,
    pub authority: Vec<Record>,
    pub additional: Vec<Record>,
    pub edns: Option<Edns>,
    pub tsig: Option<Record>,
}

/// Result of following a CNAME chain (spec §4.5 `resolve_chaining`).
#[derive(Debug, Clone, PartialEq)]
pub struct ChainResult {
    pub canonical_name: Name,
    pub answer_rrset: Option<Record>,
    pub minimum_ttl: Option<u32>,
    pub cnames: Vec<Record>,
}

impl Message {
    pub fn new(id: Option<u16>) -> Self {
        Message {
            header: Header::new(id),
            question: Vec::new(),
            answer: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
            edns: None,
            tsig: None,
        }
    }

    /// `self.is_response(other)` (spec §4.5): same id and opcode, `other`
    /// carries `QR`, and the two question sections match.
    pub fn is_response(&self, other: &Message) -> bool {
        self.header.id == other.header.id
            && self.header.opcode == other.header.opcode
            && other.header.qr
            && self.question == other.question
    }

    /// Decode a complete message. `edns`/`tsig` are peeled out of the
    /// additional section as they're read (spec §4.5 `I-EDNS-LAST`,
    /// `I-TSIG-LAST`): an OPT not in the additional section, more than
    /// one OPT, or a TSIG that is not the section's final record, is a
    /// [`WireError::BadEDNS`]/[`WireError::BadTSIG`]. Once the header's
    /// section counts are satisfied, any bytes left unread are rejected
    /// as [`WireError::TrailingJunk`] (spec §4.5 step on `from_wire`,
    /// §7 "format errors").
    pub fn from_wire(buf: &[u8]) -> Result<Self, MessageError> {
        if buf.len() < 12 {
            return Err(WireError::ShortHeader.into());
        }
        let mut reader = Reader::new(buf);
        let header = Header::from_wire(&mut reader)?;
        let mut question = Vec::with_capacity(header.qdcount as usize);
        for _ in 0..header.qdcount {
            question.push(Question::from_wire(&mut reader)?);
        }
        let answer = read_section(&mut reader, header.ancount)?;
        let authority = read_section(&mut reader, header.nscount)?;
        let (additional, edns, tsig) = read_additional(&mut reader, header.arcount)?;
        if reader.remaining() > 0 {
            return Err(WireError::TrailingJunk.into());
        }
        Ok(Message {
            header,
            question,
            answer,
            authority,
            additional,
            edns,
            tsig,
        })
    }

    /// Encode this message. EDNS (if present) and TSIG (if present) are
    /// appended as the final record(s) of the additional section,
    /// regardless of what's already in `self.additional` (spec §4.5).
    ///
    /// `max_size`, if given, bounds the rendered length: when exceeded,
    /// `prefer_truncation` rolls back to the last record boundary that
    /// fits, drops everything after it (answer/authority/additional, in
    /// that trailing order) and sets `TC=1`, rather than raising
    /// [`MessageError`] (`WireError::TooBig`) (spec §4.5 step 4).
    ///
    /// `pad_to`, if given, requests the RFC 7830 PADDING EDNS option be
    /// sized so the *total* rendered length (OPT and TSIG included, per
    /// spec §9) is a multiple of `pad_to`; this requires `self.edns` to
    /// already be set; `MessageError::PaddingRequiresEdns` otherwise
    /// (spec §4.5 step 3).
    ///
    /// `prepend_length` prefixes the rendered message with its own
    /// 16-bit big-endian length, for stream transports (spec §4.5 step
    /// 7; see [`crate::transport::StreamTransport`]).
    pub fn to_wire(
        &self,
        max_size: Option<usize>,
        prefer_truncation: bool,
        pad_to: Option<usize>,
        prepend_length: bool,
    ) -> Result<Vec<u8>, MessageError> {
        if pad_to.is_some() && self.edns.is_none() {
            return Err(MessageError::PaddingRequiresEdns);
        }

        let mut out = self.render(max_size, prefer_truncation, 0)?;
        if let Some(pad) = pad_to.filter(|&pad| pad > 0) {
            // The PADDING option's own 4-byte header (code + length)
            // joins the total that must land on a `pad` boundary.
            let padded_len = (out.len() + 4 + pad - 1) / pad * pad;
            let fill = padded_len - out.len() - 4;
            out = self.render(max_size, prefer_truncation, fill)?;
        }

        if prepend_length {
            let len = u16::try_from(out.len()).map_err(|_| WireError::TooBig)?;
            let mut framed = Vec::with_capacity(2 + out.len());
            framed.extend_from_slice(&len.to_be_bytes());
            framed.extend_from_slice(&out);
            out = framed;
        }
        Ok(out)
    }

    /// One rendering pass. `pad_fill` is the number of zero bytes to
    /// stuff into a PADDING option appended to `self.edns`'s options
    /// (0 when no padding was requested); `to_wire` calls this once to
    /// measure and, if padding was requested, a second time with the
    /// size now known, since the pad length depends on the rendered
    /// length of the very record it lives in.
    fn render(
        &self,
        max_size: Option<usize>,
        prefer_truncation: bool,
        pad_fill: usize,
    ) -> Result<Vec<u8>, MessageError> {
        let mut renderer = Renderer::new();
        renderer.write_bytes(&[0u8; 12]);

        let mut header = self.header.clone();
        header.tc = false;

        for q in &self.question {
            q.to_wire(&mut renderer)?;
        }
        header.qdcount = self.question.len() as u16;

        let mut truncated = false;
        for r in &self.answer {
            let checkpoint = renderer.len();
            write_record(&mut renderer, r)?;
            header.ancount += 1;
            if over_budget(&renderer, max_size) {
                if !prefer_truncation {
                    return Err(WireError::TooBig.into());
                }
                renderer.rollback(checkpoint);
                header.ancount -= 1;
                truncated = true;
                break;
            }
        }

        if !truncated {
            for r in &self.authority {
                let checkpoint = renderer.len();
                write_record(&mut renderer, r)?;
                header.nscount += 1;
                if over_budget(&renderer, max_size) {
                    if !prefer_truncation {
                        return Err(WireError::TooBig.into());
                    }
                    renderer.rollback(checkpoint);
                    header.nscount -= 1;
                    truncated = true;
                    break;
                }
            }
        }

        if !truncated {
            for r in &self.additional {
                let checkpoint = renderer.len();
                write_record(&mut renderer, r)?;
                header.arcount += 1;
                if over_budget(&renderer, max_size) {
                    if !prefer_truncation {
                        return Err(WireError::TooBig.into());
                    }
                    renderer.rollback(checkpoint);
                    header.arcount -= 1;
                    truncated = true;
                    break;
                }
            }
        }

        if truncated {
            header.tc = true;
        } else {
            if let Some(edns) = &self.edns {
                let edns = if pad_fill > 0 {
                    let mut padded = edns.clone();
                    padded.options.push(OptOption {
                        code: EDNS_OPTION_PADDING,
                        data: vec![0u8; pad_fill],
                    });
                    std::borrow::Cow::Owned(padded)
                } else {
                    std::borrow::Cow::Borrowed(edns)
                };
                write_edns(&mut renderer, &edns)?;
                header.arcount += 1;
            }
            if let Some(tsig) = &self.tsig {
                write_record(&mut renderer, tsig)?;
                header.arcount += 1;
            }
            if over_budget(&renderer, max_size) {
                if !prefer_truncation {
                    return Err(WireError::TooBig.into());
                }
                header.tc = true;
            }
        }

        let mut out = renderer.into_bytes();
        let mut header_bytes = Renderer::new();
        header.to_wire(&mut header_bytes);
        out[0..12].copy_from_slice(header_bytes.bytes());
        Ok(out)
    }

    /// Follow a CNAME chain in `self.answer` starting from the first
    /// question name (spec §4.5 `resolve_chaining`), bounded at 16
    /// hops (`E-CHAIN-LIMIT`).
    pub fn resolve_chaining(&self) -> Result<ChainResult, MessageError> {
        let mut current = self
            .question
            .first()
            .map(|q| q.qname.clone())
            .ok_or(MessageError::NoQuestion)?;
        let mut cnames = Vec::new();
        for _ in 0..16 {
            let hop = self
                .answer
                .iter()
                .find(|r| r.name == current && matches!(r.rdata, RData::Cname(_)));
            match hop {
                Some(rec @ Record {
                    rdata: RData::Cname(c),
                    ..
                }) => {
                    cnames.push(rec.clone());
                    current = c.cname.clone();
                }
                _ => {
                    let answer_rrset = self.answer.iter().find(|r| r.name == current).cloned();
                    let minimum_ttl = cnames
                        .iter()
                        .map(|r| r.ttl)
                        .chain(answer_rrset.as_ref().map(|r| r.ttl))
                        .chain(
                            self.authority
                                .iter()
                                .filter_map(|r| match &r.rdata {
                                    RData::Soa(soa) => Some(r.ttl.min(soa.minimum)),
                                    _ => None,
                                }),
                        )
                        .min();
                    return Ok(ChainResult {
                        canonical_name: current,
                        answer_rrset,
                        minimum_ttl,
                        cnames,
                    });
                }
            }
        }
        Err(MessageError::ChainTooLong)
    }
}

fn over_budget(renderer: &Renderer, max_size: Option<usize>) -> bool {
    max_size.is_some_and(|limit| renderer.len() > limit)
}

fn read_section(reader: &mut Reader<'_>, count: u16) -> Result<Vec<Record>, MessageError> {
    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        out.push(read_record(reader)?);
    }
    Ok(out)
}

fn read_record(reader: &mut Reader<'_>) -> Result<Record, MessageError> {
    let name = reader.read_name()?;
    let rdtype = reader.read_u16()?;
    let rdclass = reader.read_u16()?;
    let ttl = reader.read_u32()?;
    let rdlength = reader.read_u16()? as usize;
    let rdata = reader.restrict_to(rdlength, |r| RData::from_wire(rdtype, r, rdlength))?;
    Ok(Record {
        name,
        rdclass,
        ttl,
        rdata,
    })
}

fn read_additional(
    reader: &mut Reader<'_>,
    count: u16,
) -> Result<(Vec<Record>, Option<Edns>, Option<Record>), MessageError> {
    let mut additional = Vec::new();
    let mut edns = None;
    let mut tsig = None;
    for i in 0..count {
        let start = reader.pos();
        let name = reader.read_name()?;
        let rdtype = reader.read_u16()?;
        let rdclass = reader.read_u16()?;
        let ttl = reader.read_u32()?;
        let rdlength = reader.read_u16()? as usize;
        if rdtype == TYPE_OPT {
            if edns.is_some() {
                return Err(WireError::BadEDNS.into());
            }
            let opt: Opt = reader.restrict_to(rdlength, |r| {
                <Opt as crate::rdata::RecordData>::from_wire(r, rdlength)
            })?;
            edns = Some(Edns {
                udp_payload_size: rdclass,
                extended_rcode: (ttl >> 24) as u8,
                version: (ttl >> 16) as u8,
                dnssec_ok: ttl & DO_BIT != 0,
                options: opt.options,
            });
            continue;
        }
        if rdtype == TYPE_TSIG {
            if i != count - 1 {
                return Err(WireError::BadTSIG.into());
            }
            let rdata = reader.restrict_to(rdlength, |r| RData::from_wire(rdtype, r, rdlength))?;
            tsig = Some(Record {
                name,
                rdclass,
                ttl,
                rdata,
            });
            continue;
        }
        let _ = start;
        let rdata = reader.restrict_to(rdlength, |r| RData::from_wire(rdtype, r, rdlength))?;
        additional.push(Record {
            name,
            rdclass,
            ttl,
            rdata,
        });
    }
    Ok((additional, edns, tsig))
}

fn write_record(renderer: &mut Renderer, record: &Record) -> Result<(), WireError> {
    renderer.write_name(&record.name, true)?;
    renderer.write_u16(record.rdata.rdtype());
    renderer.write_u16(record.rdclass);
    renderer.write_u32(record.ttl);
    let rdlen_pos = renderer.len();
    renderer.write_u16(0);
    let start = renderer.len();
    record.rdata.to_wire(renderer)?;
    let len = (renderer.len() - start) as u16;
    renderer.patch_u16(rdlen_pos, len);
    Ok(())
}

fn write_edns(renderer: &mut Renderer, edns: &Edns) -> Result<(), WireError> {
    renderer.write_name(&Name::root(), false)?;
    renderer.write_u16(TYPE_OPT);
    renderer.write_u16(edns.udp_payload_size);
    let ttl = ((edns.extended_rcode as u32) << 24)
        | ((edns.version as u32) << 16)
        | if edns.dnssec_ok { DO_BIT } else { 0 };
    renderer.write_u32(ttl);
    let rdlen_pos = renderer.len();
    renderer.write_u16(0);
    let start = renderer.len();
    let opt = Opt {
        options: edns.options.clone(),
    };
    crate::rdata::RecordData::to_wire(&opt, renderer)?;
    let len = (renderer.len() - start) as u16;
    renderer.patch_u16(rdlen_pos, len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdata::{Cname, A};

    fn a_record(name: &str, addr: [u8; 4]) -> Record {
        Record {
            name: Name::from_text(name).unwrap(),
            rdclass: crate::rdata::CLASS_IN,
            ttl: 300,
            rdata: RData::A(A {
                address: std::net::Ipv4Addr::from(addr),
            }),
        }
    }

    #[test]
    fn scenario_decode_minimal_a_response() {
        let mut bytes = vec![
            0x00, 0x01, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x01, b'a',
            0x00, 0x00, 0x01, 0x00, 0x01, 0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00,
            0x3c, 0x00, 0x04,
        ];
        bytes.extend_from_slice(&[127, 0, 0, 1]);
        let msg = Message::from_wire(&bytes).unwrap();
        assert_eq!(msg.header.id, 1);
        assert!(msg.header.qr);
        assert!(msg.header.rd);
        assert!(msg.header.ra);
        assert_eq!(msg.question.len(), 1);
        assert_eq!(msg.question[0].qname.to_string(), "a.");
        assert_eq!(msg.answer.len(), 1);
        assert_eq!(msg.answer[0].ttl, 60);
        match &msg.answer[0].rdata {
            RData::A(a) => assert_eq!(a.address.to_string(), "127.0.0.1"),
            other => panic!("unexpected rdata {other:?}"),
        }
    }

    #[test]
    fn to_wire_from_wire_round_trip() {
        let mut msg = Message::new(Some(42));
        msg.header.qr = true;
        msg.question.push(Question::new(
            Name::from_text("example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        msg.answer.push(a_record("example.", [192, 0, 2, 1]));
        let bytes = msg.to_wire(None, false, None, false).unwrap();
        let decoded = Message::from_wire(&bytes).unwrap();
        assert_eq!(decoded.header.id, 42);
        assert_eq!(decoded.answer.len(), 1);
        assert_eq!(decoded.question, msg.question);
    }

    #[test]
    fn truncation_sets_tc_and_drops_trailing_answers() {
        let mut msg = Message::new(Some(7));
        msg.header.qr = true;
        msg.question.push(Question::new(
            Name::from_text("example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        for i in 0..20u8 {
            msg.answer.push(a_record("example.", [192, 0, 2, i]));
        }
        let full = msg.to_wire(None, false, None, false).unwrap();
        let bounded = msg.to_wire(Some(full.len() - 1), true, None, false).unwrap();
        assert!(bounded.len() < full.len());
        let decoded = Message::from_wire(&bounded).unwrap();
        assert!(decoded.header.tc);
        assert!(decoded.answer.len() < 20);
    }

    #[test]
    fn to_wire_without_truncation_flag_errors_when_over_budget() {
        let mut msg = Message::new(Some(7));
        msg.question.push(Question::new(
            Name::from_text("example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        msg.answer.push(a_record("example.", [192, 0, 2, 1]));
        let full = msg.to_wire(None, false, None, false).unwrap();
        let err = msg.to_wire(Some(full.len() - 1), false, None, false).unwrap_err();
        assert!(matches!(err, MessageError::Wire(WireError::TooBig)));
    }

    #[test]
    fn resolve_chaining_follows_cname_to_answer() {
        let mut msg = Message::new(Some(1));
        msg.question.push(Question::new(
            Name::from_text("alias.example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        msg.answer.push(Record {
            name: Name::from_text("alias.example.").unwrap(),
            rdclass: crate::rdata::CLASS_IN,
            ttl: 100,
            rdata: RData::Cname(Cname {
                cname: Name::from_text("target.example.").unwrap(),
            }),
        });
        msg.answer.push(a_record("target.example.", [192, 0, 2, 9]));
        let chain = msg.resolve_chaining().unwrap();
        assert_eq!(chain.canonical_name.to_string(), "target.example.");
        assert_eq!(chain.cnames.len(), 1);
        assert!(chain.answer_rrset.is_some());
        assert_eq!(chain.minimum_ttl, Some(100));
    }

    #[test]
    fn resolve_chaining_rejects_loops_past_limit() {
        let mut msg = Message::new(Some(1));
        msg.question.push(Question::new(
            Name::from_text("a0.example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        for i in 0..17 {
            msg.answer.push(Record {
                name: Name::from_text(&format!("a{i}.example.")).unwrap(),
                rdclass: crate::rdata::CLASS_IN,
                ttl: 300,
                rdata: RData::Cname(Cname {
                    cname: Name::from_text(&format!("a{}.example.", i + 1)).unwrap(),
                }),
            });
        }
        assert!(matches!(
            msg.resolve_chaining(),
            Err(MessageError::ChainTooLong)
        ));
    }

    #[test]
    fn is_response_matches_id_opcode_qr_and_question() {
        let mut query = Message::new(Some(55));
        query.question.push(Question::new(
            Name::from_text("example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        let mut response = Message::new(Some(55));
        response.header.qr = true;
        response.question = query.question.clone();
        assert!(query.is_response(&response));

        let mut wrong_id = response.clone();
        wrong_id.header.id = 56;
        assert!(!query.is_response(&wrong_id));

        let mut not_qr = response.clone();
        not_qr.header.qr = false;
        assert!(!query.is_response(&not_qr));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut msg = Message::new(Some(9));
        msg.question.push(Question::new(
            Name::from_text("example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        let mut bytes = msg.to_wire(None, false, None, false).unwrap();
        bytes.push(0xff);
        let err = Message::from_wire(&bytes).unwrap_err();
        assert!(matches!(err, MessageError::Wire(WireError::TrailingJunk)));
    }

    #[test]
    fn padding_rounds_total_length_up_to_a_multiple() {
        let mut msg = Message::new(Some(10));
        msg.question.push(Question::new(
            Name::from_text("example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        msg.edns = Some(Edns {
            udp_payload_size: 4096,
            ..Default::default()
        });
        let bytes = msg.to_wire(None, false, Some(128), false).unwrap();
        assert_eq!(bytes.len() % 128, 0);
        let decoded = Message::from_wire(&bytes).unwrap();
        assert_eq!(decoded.edns.unwrap().options.len(), 1);
    }

    #[test]
    fn padding_without_edns_is_rejected() {
        let msg = Message::new(Some(11));
        let err = msg.to_wire(None, false, Some(128), false).unwrap_err();
        assert!(matches!(err, MessageError::PaddingRequiresEdns));
    }

    #[test]
    fn prepend_length_prefixes_a_16_bit_length() {
        let mut msg = Message::new(Some(12));
        msg.question.push(Question::new(
            Name::from_text("example.").unwrap(),
            crate::rdata::TYPE_A,
            crate::rdata::CLASS_IN,
        ));
        let plain = msg.to_wire(None, false, None, false).unwrap();
        let framed = msg.to_wire(None, false, None, true).unwrap();
        assert_eq!(framed.len(), plain.len() + 2);
        let len = u16::from_be_bytes([framed[0], framed[1]]) as usize;
        assert_eq!(len, plain.len());
        assert_eq!(&framed[2..], &plain[..]);
    }
}
