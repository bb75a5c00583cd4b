use anyhow::Context;
use dnscore::message::Question;
use dnscore::name::Name;
use dnscore::rdata::{CLASS_IN, TYPE_A};
use dnscore::Message;
use std::net::UdpSocket;
use std::time::Duration;

/// A minimal stub query: build an A query for a name, send it over
/// UDP, and decode whatever comes back. Real retry/rotation/TCP
/// fallback policy is a resolver collaborator's job (spec §6), not the
/// core's — this is just enough to exercise the wire codec end to end.
fn main() -> anyhow::Result<()> {
    let qname = std::env::args().nth(1).unwrap_or_else(|| "example.com.".to_string());
    let name = Name::from_text(&qname).context("invalid query name")?;

    let mut query = Message::new(None);
    query.header.rd = true;
    query.question.push(Question::new(name, TYPE_A, CLASS_IN));

    let wire = query.to_wire(Some(512), false, None, false)?;
    println!("query ({} bytes): {wire:02x?}", wire.len());

    let socket = UdpSocket::bind("0.0.0.0:0").context("failed to bind udp socket")?;
    socket.set_read_timeout(Some(Duration::from_secs(2)))?;
    socket.send_to(&wire, "1.1.1.1:53").context("failed to send query")?;

    let mut buf = [0u8; 512];
    let (n, _) = socket.recv_from(&mut buf).context("failed to receive response")?;
    let response = Message::from_wire(&buf[..n])?;

    if !query.is_response(&response) {
        anyhow::bail!("response does not match query (id/opcode/question mismatch)");
    }

    for record in &response.answer {
        println!("{} {} {:?}", record.name, record.ttl, record.rdata);
    }

    Ok(())
}
