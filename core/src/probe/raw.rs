//! Structured reachability probing over a raw ICMP socket.
//!
//! Unlike the [`system`](super::system) prober this never parses
//! human-readable text: echo requests are built and matched packet by
//! packet, so the verdict comes from the protocol itself. Requires
//! **root privileges** to open the Layer 4 socket.

use std::net::{IpAddr, Ipv4Addr};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use opskit_common::error::ProbeError;
use pnet::packet::Packet;
use pnet::packet::icmp::echo_reply::EchoReplyPacket;
use pnet::packet::icmp::echo_request::MutableEchoRequestPacket;
use pnet::packet::icmp::{self, IcmpCode, IcmpPacket, IcmpTypes};
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::transport::{
    self, TransportChannelType, TransportProtocol, TransportSender,
};
use tracing::trace;

use super::{Prober, Verdict};

const TRANSPORT_BUFFER_SIZE: usize = 4096;
const CHANNEL_TYPE_ICMP: TransportChannelType =
    TransportChannelType::Layer4(TransportProtocol::Ipv4(IpNextHeaderProtocols::Icmp));

// 8 byte ICMP header plus a small payload.
const ECHO_REQ_LEN: usize = 16;

pub struct RawIcmpProber {
    /// Budget for the whole host, shared across all attempts.
    timeout: Duration,
}

impl RawIcmpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Prober for RawIcmpProber {
    async fn probe(&self, host: &str, count: u32) -> Result<Verdict, ProbeError> {
        let addr = resolve_v4(host).await?;
        let timeout = self.timeout;

        // pnet transport receivers block, so the whole exchange runs
        // off the async executor.
        tokio::task::spawn_blocking(move || probe_blocking(addr, count, timeout))
            .await
            .map_err(|e| ProbeError::Inconclusive(format!("probe task panicked: {e}")))?
    }
}

async fn resolve_v4(host: &str) -> Result<Ipv4Addr, ProbeError> {
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Ok(ip);
    }

    let addrs = tokio::net::lookup_host((host, 0u16))
        .await
        .map_err(|e| ProbeError::Inconclusive(format!("cannot resolve {host}: {e}")))?;

    addrs
        .filter_map(|sock| match sock.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .next()
        .ok_or_else(|| ProbeError::Inconclusive(format!("no IPv4 address for {host}")))
}

fn probe_blocking(addr: Ipv4Addr, count: u32, timeout: Duration) -> Result<Verdict, ProbeError> {
    let (mut tx, mut rx) = transport::transport_channel(TRANSPORT_BUFFER_SIZE, CHANNEL_TYPE_ICMP)
        .map_err(|e| ProbeError::Unavailable(format!("raw ICMP socket: {e}")))?;

    let mut reply_iter = transport::icmp_packet_iter(&mut rx);
    let ident: u16 = rand::random();
    let attempts = count.max(1);
    let per_attempt = timeout / attempts;

    for seq in 0..attempts {
        send_echo_request(&mut tx, addr, ident, seq as u16)?;
        trace!(%addr, seq, "echo request sent");

        let deadline = Instant::now() + per_attempt;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }

            match reply_iter.next_with_timeout(remaining) {
                Ok(Some((packet, from))) => {
                    if from == IpAddr::V4(addr) && is_matching_reply(&packet, ident) {
                        return Ok(Verdict::Reachable);
                    }
                    // Someone else's traffic, keep waiting.
                }
                Ok(None) => break,
                Err(e) => {
                    return Err(ProbeError::Inconclusive(format!(
                        "error reading ICMP replies: {e}"
                    )));
                }
            }
        }
    }

    Ok(Verdict::Unreachable)
}

fn send_echo_request(
    tx: &mut TransportSender,
    addr: Ipv4Addr,
    ident: u16,
    seq: u16,
) -> Result<(), ProbeError> {
    let mut buf = [0u8; ECHO_REQ_LEN];
    let mut request = MutableEchoRequestPacket::new(&mut buf)
        .ok_or_else(|| ProbeError::Inconclusive("echo request buffer too small".to_string()))?;

    request.set_icmp_type(IcmpTypes::EchoRequest);
    request.set_icmp_code(IcmpCode(0));
    request.set_identifier(ident);
    request.set_sequence_number(seq);

    request.set_checksum(0);
    let view = IcmpPacket::new(request.packet())
        .ok_or_else(|| ProbeError::Inconclusive("failed to view echo request".to_string()))?;
    let checksum = icmp::checksum(&view);
    request.set_checksum(checksum);

    tx.send_to(request, IpAddr::V4(addr))
        .map_err(|e| ProbeError::Inconclusive(format!("failed to send echo request: {e}")))?;

    Ok(())
}

fn is_matching_reply(packet: &IcmpPacket, ident: u16) -> bool {
    if packet.get_icmp_type() != IcmpTypes::EchoReply {
        return false;
    }

    EchoReplyPacket::new(packet.packet())
        .map(|reply| reply.get_identifier() == ident)
        .unwrap_or(false)
}
