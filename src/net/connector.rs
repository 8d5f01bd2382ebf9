//! # Resilient multi-address connection establishment.
//!
//! One call to [`Connector::connect`] performs:
//! 1. name resolution via [`tokio::net::lookup_host`] (both address families);
//! 2. a uniformly random shuffle of the resolved addresses, so repeated calls
//!    and concurrent components spread load across every backend behind the
//!    name instead of pinning the resolver's first answer;
//! 3. a sequential walk over the permutation: first successful connect wins,
//!    each failed attempt drops its socket before moving on.
//!
//! Resolution failure fails the call immediately — retrying is the caller's
//! concern ([`connect_forever`](super::connect_forever)), not this layer's. No partial
//! state survives the call in either branch: the address list and every
//! unsuccessful socket are owned values dropped on exit.

use std::net::SocketAddr;

use rand::seq::SliceRandom;
use tokio::net::{lookup_host, TcpStream};

use crate::error::ConnectError;
use crate::events::{Bus, Event, EventKind};

/// Multi-address, shuffled, sequential-fallback connector.
///
/// One instance per consuming component; the label identifies the component
/// in connection events.
///
/// ## Example
/// ```no_run
/// # use skyvisor::{Bus, Connector};
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let bus = Bus::new(64);
/// let connector = Connector::new("relay", bus);
/// let stream = connector.connect("feed.example.net", 30005).await?;
/// # let _ = stream; Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Connector {
    label: &'static str,
    bus: Bus,
}

impl Connector {
    /// Creates a connector publishing events under `label`.
    pub fn new(label: &'static str, bus: Bus) -> Self {
        Self { label, bus }
    }

    /// Resolves `host` and connects to the first reachable address.
    ///
    /// Publishes [`EventKind::Connected`] with the peer address on success,
    /// [`EventKind::ConnectFailed`] with the reason otherwise.
    pub async fn connect(&self, host: &str, port: u16) -> Result<TcpStream, ConnectError> {
        let result = match self.resolve(host, port).await {
            Ok(addrs) => self.connect_to_any(host, addrs).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            self.bus.publish(
                Event::now(EventKind::ConnectFailed)
                    .with_component(self.label)
                    .with_reason(e.to_string()),
            );
        }
        result
    }

    /// Walks a shuffled permutation of `addrs`; first success wins.
    ///
    /// Factored out of [`connect`](Self::connect) so the fallback policy is
    /// exercisable with crafted address lists, without DNS.
    pub async fn connect_to_any(
        &self,
        host: &str,
        mut addrs: Vec<SocketAddr>,
    ) -> Result<TcpStream, ConnectError> {
        if addrs.is_empty() {
            return Err(ConnectError::NoAddresses {
                host: host.to_string(),
            });
        }

        addrs.shuffle(&mut rand::rng());

        let attempts = addrs.len();
        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    self.bus.publish(
                        Event::now(EventKind::Connected)
                            .with_component(self.label)
                            .with_peer(addr),
                    );
                    return Ok(stream);
                }
                // The half-open socket for this attempt is dropped here.
                Err(e) => last_err = Some(e),
            }
        }

        Err(ConnectError::Exhausted {
            host: host.to_string(),
            attempts,
            source: last_err.expect("non-empty address list yields at least one error"),
        })
    }

    async fn resolve(&self, host: &str, port: u16) -> Result<Vec<SocketAddr>, ConnectError> {
        let addrs: Vec<SocketAddr> = lookup_host((host, port))
            .await
            .map_err(|source| ConnectError::Resolve {
                host: host.to_string(),
                source,
            })?
            .collect();

        if addrs.is_empty() {
            return Err(ConnectError::NoAddresses {
                host: host.to_string(),
            });
        }
        Ok(addrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};
    use tokio::net::TcpListener;

    fn test_connector() -> (Connector, tokio::sync::broadcast::Receiver<Event>) {
        let bus = Bus::new(64);
        let rx = bus.subscribe();
        (Connector::new("test", bus), rx)
    }

    /// Binds and immediately drops a listener, yielding an address that
    /// refuses connections (nothing is listening on the freed port).
    async fn refused_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    }

    #[tokio::test]
    async fn test_first_reachable_address_wins() {
        let (connector, _rx) = test_connector();

        let accepting = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let good = accepting.local_addr().unwrap();
        let addrs = vec![refused_addr().await, refused_addr().await, good];

        // Shuffle order varies per call; the accepting address must win every time.
        for _ in 0..8 {
            let stream = connector
                .connect_to_any("test-host", addrs.clone())
                .await
                .expect("one address accepts");
            assert_eq!(stream.peer_addr().unwrap(), good);
        }
    }

    #[tokio::test]
    async fn test_all_addresses_refused() {
        let (connector, _rx) = test_connector();
        let addrs = vec![refused_addr().await, refused_addr().await];

        let err = connector
            .connect_to_any("test-host", addrs)
            .await
            .unwrap_err();
        match err {
            ConnectError::Exhausted { attempts, .. } => assert_eq!(attempts, 2),
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_address_list() {
        let (connector, _rx) = test_connector();
        let err = connector
            .connect_to_any("test-host", Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::NoAddresses { .. }));
    }

    #[tokio::test]
    async fn test_success_publishes_connected_event() {
        let (connector, mut rx) = test_connector();
        let accepting = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let good = accepting.local_addr().unwrap();

        let _stream = connector
            .connect_to_any("test-host", vec![good])
            .await
            .unwrap();

        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::Connected);
        assert_eq!(ev.component.as_deref(), Some("test"));
        assert_eq!(ev.peer.as_deref(), Some(good.to_string().as_str()));
    }

    #[tokio::test]
    async fn test_resolution_failure_is_not_retried_here() {
        let (connector, mut rx) = test_connector();
        // RFC 2606 reserves .invalid; resolution must fail.
        let err = connector.connect("does-not-exist.invalid", 30005).await;
        assert!(err.is_err());
        // The failure is published, and nothing else.
        assert_eq!(rx.recv().await.unwrap().kind, EventKind::ConnectFailed);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_localhost_resolves_and_connects() {
        let (connector, _rx) = test_connector();
        let accepting = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = accepting.local_addr().unwrap().port();

        let stream = connector.connect("localhost", port).await.unwrap();
        assert_eq!(
            stream.peer_addr().unwrap().ip(),
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        );
    }
}
