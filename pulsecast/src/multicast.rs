//! UDP multicast datagram channel.
//!
//! ```rust,no_run
//! use pulsecast::MulticastChannel;
//! use std::net::Ipv4Addr;
//!
//! let group = Ipv4Addr::new(239, 0, 0, 1);
//! let mut channel = MulticastChannel::sender(group, 5000).unwrap();
//! channel.set_ttl(1).unwrap();
//! ```
//!
//! The channel owns group membership for its lifetime and leaves the
//! group on drop. Interface selection stays with the OS
//! (`Ipv4Addr::UNSPECIFIED`); enumerating and picking interfaces is the
//! caller's concern, not this crate's.

use crate::channel::DatagramChannel;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};
use std::time::Duration;

/// Socket buffer size (4MB, generous for a sub-kHz telemetry stream)
const SOCKET_BUFFER_SIZE: usize = 4 * 1024 * 1024;

/// Create multicast socket with SO_REUSEADDR.
fn create_multicast_socket(bind_port: u16, group: Ipv4Addr) -> io::Result<UdpSocket> {
    if !group.is_multicast() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a multicast address", group),
        ));
    }

    let socket2 = socket2::Socket::new(
        socket2::Domain::IPV4,
        socket2::Type::DGRAM,
        Some(socket2::Protocol::UDP),
    )?;
    socket2.set_reuse_address(true)?;
    socket2.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket2.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;

    let addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, bind_port);
    socket2.bind(&addr.into())?;

    let socket: UdpSocket = socket2.into();
    socket.join_multicast_v4(&group, &Ipv4Addr::UNSPECIFIED)?;
    socket.set_multicast_ttl_v4(1)?;

    Ok(socket)
}

/// UDP multicast endpoint implementing [`DatagramChannel`].
#[derive(Debug)]
pub struct MulticastChannel {
    socket: UdpSocket,
    group: Ipv4Addr,
    port: u16,
}

impl MulticastChannel {
    /// Join `group` for sending. Binds an ephemeral local port; sends go
    /// to `group:port`.
    pub fn sender(group: Ipv4Addr, port: u16) -> io::Result<Self> {
        let socket = create_multicast_socket(0, group)?;
        Ok(Self {
            socket,
            group,
            port,
        })
    }

    /// Join `group` for receiving on `port`.
    ///
    /// `read_timeout` bounds each blocking read so the listener loop can
    /// poll its stop flag between packets.
    pub fn listener(group: Ipv4Addr, port: u16, read_timeout: Duration) -> io::Result<Self> {
        let socket = create_multicast_socket(port, group)?;
        socket.set_read_timeout(Some(read_timeout))?;
        Ok(Self {
            socket,
            group,
            port,
        })
    }

    /// Set TTL (hop limit). 1 = local network.
    pub fn set_ttl(&self, ttl: u32) -> io::Result<()> {
        self.socket.set_multicast_ttl_v4(ttl)
    }

    /// Enable/disable receiving own messages (useful for single-host runs).
    pub fn set_loopback(&self, enable: bool) -> io::Result<()> {
        self.socket.set_multicast_loop_v4(enable)
    }

    /// Get multicast group.
    pub fn group(&self) -> Ipv4Addr {
        self.group
    }
}

impl DatagramChannel for MulticastChannel {
    fn send(&mut self, data: &[u8]) -> io::Result<usize> {
        self.socket
            .send_to(data, SocketAddr::new(self.group.into(), self.port))
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let (len, _from) = self.socket.recv_from(buf)?;
        Ok(len)
    }
}

impl Drop for MulticastChannel {
    fn drop(&mut self) {
        let _ = self
            .socket
            .leave_multicast_v4(&self.group, &Ipv4Addr::UNSPECIFIED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_multicast_group() {
        let err = MulticastChannel::sender(Ipv4Addr::new(192, 168, 1, 1), 5000).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_join_group() {
        let group = Ipv4Addr::new(239, 255, 0, 9);
        // May fail in sandboxed environments
        if let Ok(channel) = MulticastChannel::sender(group, 5000) {
            assert_eq!(channel.group(), group);
        }
    }
}
