//! client for sending DNS queries to upstream servers
//!
//! Every exchange gets its own socket: the probing strategy upstairs
//! runs many exchanges against different servers at once, and per
//! socket deadlines are the only timeouts that compose sanely with
//! that. The client is purely transport; it never inspects rcodes or
//! retries.

use std::fmt;
use std::io::Write;
use std::net::{IpAddr, SocketAddr, TcpStream, UdpSocket};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use derive_more::{Display, Error, From};

use crate::dns::buffer::{BytePacketBuffer, StreamPacketBuffer};
use crate::dns::netutil::{read_packet_length, write_packet_length};
use crate::dns::protocol::DnsPacket;

#[derive(Debug, Display, From, Error)]
pub enum ClientError {
    Protocol(crate::dns::protocol::ProtocolError),
    Io(std::io::Error),
    TimeOut,
}

type Result<T> = std::result::Result<T, ClientError>;

/// Which transport an exchange runs over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transport {
    Udp,
    Tcp,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Transport::Udp => write!(f, "udp"),
            Transport::Tcp => write!(f, "tcp"),
        }
    }
}

/// Deadlines and source binding applied to every exchange.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub outbound_ip: Option<IpAddr>,
}

impl Default for TransportConfig {
    fn default() -> TransportConfig {
        TransportConfig {
            connect_timeout: Duration::from_secs(2),
            timeout: Duration::from_secs(2),
            outbound_ip: None,
        }
    }
}

pub trait DnsClient {
    fn get_sent_count(&self) -> usize;
    fn get_failed_count(&self) -> usize;

    /// Perform one request/response exchange with one server. A
    /// truncated UDP response is returned as-is; deciding whether to
    /// retry over TCP belongs to the caller.
    fn exchange(
        &self,
        transport: Transport,
        request: &DnsPacket,
        server: SocketAddr,
    ) -> Result<DnsPacket>;
}

pub struct DnsNetworkClient {
    config: TransportConfig,

    total_sent: AtomicUsize,
    total_failed: AtomicUsize,
}

impl DnsNetworkClient {
    pub fn new(config: TransportConfig) -> DnsNetworkClient {
        DnsNetworkClient {
            config,
            total_sent: AtomicUsize::new(0),
            total_failed: AtomicUsize::new(0),
        }
    }

    fn bind_addr(&self, server: SocketAddr) -> SocketAddr {
        match self.config.outbound_ip {
            Some(ip) => SocketAddr::new(ip, 0),
            None if server.is_ipv4() => "0.0.0.0:0".parse().unwrap(),
            None => "[::]:0".parse().unwrap(),
        }
    }

    fn udp_exchange(&self, request: &DnsPacket, server: SocketAddr) -> Result<DnsPacket> {
        let socket = UdpSocket::bind(self.bind_addr(server))?;
        socket.set_read_timeout(Some(self.config.timeout))?;
        socket.set_write_timeout(Some(self.config.timeout))?;
        socket.connect(server)?;

        let mut req_buffer = BytePacketBuffer::new();
        request.clone().write(&mut req_buffer, 512)?;
        socket.send(&req_buffer.buf[0..req_buffer.pos])?;

        loop {
            let mut res_buffer = BytePacketBuffer::new();
            socket.recv(&mut res_buffer.buf).map_err(|e| match e.kind() {
                std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut => {
                    ClientError::TimeOut
                }
                _ => ClientError::Io(e),
            })?;

            let response = match DnsPacket::from_buffer(&mut res_buffer) {
                Ok(response) => response,
                Err(e) => {
                    log::debug!("Dropping unparseable datagram from {}: {}", server, e);
                    continue;
                }
            };

            // Stray datagrams for older exchanges on a reused port
            // are possible; only the matching id ends the wait.
            if response.header.id == request.header.id {
                return Ok(response);
            }

            log::debug!("Dropping mismatched response id from {}", server);
        }
    }

    fn tcp_exchange(&self, request: &DnsPacket, server: SocketAddr) -> Result<DnsPacket> {
        let mut stream = TcpStream::connect_timeout(&server, self.config.connect_timeout)?;
        stream.set_read_timeout(Some(self.config.timeout))?;
        stream.set_write_timeout(Some(self.config.timeout))?;

        let mut req_buffer = BytePacketBuffer::new();
        request.clone().write(&mut req_buffer, 0xFFFF)?;

        write_packet_length(&mut stream, req_buffer.pos)?;
        stream.write_all(&req_buffer.buf[0..req_buffer.pos])?;
        stream.flush()?;

        let _ = read_packet_length(&mut stream)?;

        let mut stream_buffer = StreamPacketBuffer::new(&mut stream);
        let response = DnsPacket::from_buffer(&mut stream_buffer)?;

        Ok(response)
    }
}

impl DnsClient for DnsNetworkClient {
    fn get_sent_count(&self) -> usize {
        self.total_sent.load(Ordering::Acquire)
    }

    fn get_failed_count(&self) -> usize {
        self.total_failed.load(Ordering::Acquire)
    }

    fn exchange(
        &self,
        transport: Transport,
        request: &DnsPacket,
        server: SocketAddr,
    ) -> Result<DnsPacket> {
        let _ = self.total_sent.fetch_add(1, Ordering::Release);

        let result = match transport {
            Transport::Udp => self.udp_exchange(request, server),
            Transport::Tcp => self.tcp_exchange(request, server),
        };

        if result.is_err() {
            let _ = self.total_failed.fetch_add(1, Ordering::Release);
        }

        result
    }
}
