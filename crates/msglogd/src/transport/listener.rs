//! Listener implementation for collector TCP sockets.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use msglog_config::ListenEndpoint;

use super::{ConnectionHandler, ConnectionStream, LISTENER_TARGET, ListenerError};

const ACCEPT_BACKOFF: Duration = Duration::from_millis(25);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Listener bound to a TCP endpoint.
#[derive(Debug)]
pub struct SocketListener {
    endpoint: ListenEndpoint,
    local_addr: SocketAddr,
    listener: TcpListener,
}

impl SocketListener {
    /// Resolves and binds the endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the host does not resolve or the bind fails.
    pub fn bind(endpoint: &ListenEndpoint) -> Result<Self, ListenerError> {
        let listener = bind_tcp(endpoint.host(), endpoint.port())?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ListenerError::LocalAddr { source })?;
        Ok(Self {
            endpoint: endpoint.clone(),
            local_addr,
            listener,
        })
    }

    /// Address the socket is bound to, with any ephemeral port resolved.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Starts accepting connections on a background thread.
    ///
    /// Every accepted connection is handed to `handler` on a dedicated thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be made non-blocking or the
    /// accept thread cannot be spawned.
    pub fn start(
        self,
        handler: Arc<dyn ConnectionHandler>,
    ) -> Result<ListenerHandle, ListenerError> {
        self.listener
            .set_nonblocking(true)
            .map_err(|source| ListenerError::NonBlocking { source })?;
        let shutdown = Arc::new(AtomicBool::new(false));
        let sessions = Arc::new(AtomicUsize::new(0));
        let accept_state = (Arc::clone(&shutdown), Arc::clone(&sessions));
        let local_addr = self.local_addr;
        let handle = thread::Builder::new()
            .name(String::from("msglogd-accept"))
            .spawn(move || {
                let (shutdown, sessions) = accept_state;
                run_accept_loop(&self, &shutdown, &sessions, &handler);
            })
            .map_err(|source| ListenerError::Spawn { source })?;
        Ok(ListenerHandle {
            shutdown,
            sessions,
            local_addr,
            handle: Some(handle),
        })
    }
}

/// Handle to the background listener thread.
///
/// Dropping the handle stops the accept loop without waiting for it.
#[derive(Debug)]
pub struct ListenerHandle {
    shutdown: Arc<AtomicBool>,
    sessions: Arc<AtomicUsize>,
    local_addr: SocketAddr,
    handle: Option<thread::JoinHandle<()>>,
}

impl ListenerHandle {
    /// Address the listener accepts connections on.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Number of sessions whose handler has not returned yet.
    #[must_use]
    pub fn open_sessions(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }

    /// Asks the accept loop to stop. Sessions already running are unaffected.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Waits for the accept loop to exit.
    ///
    /// # Errors
    ///
    /// Returns [`ListenerError::ThreadPanic`] if the accept thread panicked.
    pub fn join(mut self) -> Result<(), ListenerError> {
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(()) => Ok(()),
                Err(_) => Err(ListenerError::ThreadPanic),
            }
        } else {
            Ok(())
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

fn run_accept_loop(
    listener: &SocketListener,
    shutdown: &AtomicBool,
    sessions: &Arc<AtomicUsize>,
    handler: &Arc<dyn ConnectionHandler>,
) {
    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.endpoint,
        local_addr = %listener.local_addr,
        "socket listener active"
    );
    let connection_ids = AtomicU64::new(0);
    let mut last_error = None::<io::ErrorKind>;
    while !shutdown.load(Ordering::SeqCst) {
        match accept_connection(&listener.listener) {
            Ok(Some(stream)) => {
                last_error = None;
                let id = connection_ids.fetch_add(1, Ordering::Relaxed);
                let slot = SessionSlot::claim(sessions);
                spawn_session(id, stream, slot, Arc::clone(handler));
            }
            Ok(None) => {
                thread::sleep(ACCEPT_BACKOFF);
            }
            Err(error) => {
                let kind = error.kind();
                if last_error != Some(kind) {
                    warn!(
                        target: LISTENER_TARGET,
                        error = %error,
                        "socket accept error"
                    );
                }
                last_error = Some(kind);
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }
    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.endpoint,
        "socket listener stopped"
    );
}

/// Counts one running session until dropped.
struct SessionSlot(Arc<AtomicUsize>);

impl SessionSlot {
    fn claim(sessions: &Arc<AtomicUsize>) -> Self {
        sessions.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(sessions))
    }
}

impl Drop for SessionSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

fn spawn_session(
    id: u64,
    stream: ConnectionStream,
    slot: SessionSlot,
    handler: Arc<dyn ConnectionHandler>,
) {
    let peer = stream.peer_addr();
    debug!(
        target: LISTENER_TARGET,
        connection = id,
        peer = ?peer,
        "connection accepted"
    );
    let spawned = thread::Builder::new()
        .name(format!("msglogd-conn-{id}"))
        .spawn(move || {
            let _slot = slot;
            handler.handle(stream);
        });
    if let Err(error) = spawned {
        // The stream and slot moved into the failed closure and are released
        // on drop.
        warn!(
            target: LISTENER_TARGET,
            connection = id,
            error = %error,
            "failed to spawn connection thread"
        );
    }
}

fn accept_connection(listener: &TcpListener) -> Result<Option<ConnectionStream>, io::Error> {
    match listener.accept() {
        Ok((stream, _)) => {
            stream.set_nonblocking(false)?;
            Ok(Some(ConnectionStream::new(stream)))
        }
        Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
        Err(error) => Err(error),
    }
}

fn bind_tcp(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let mut addrs = (host, port)
        .to_socket_addrs()
        .map_err(|source| ListenerError::Resolve {
            host: host.to_string(),
            port,
            source,
        })?;
    let addr = addrs.next().ok_or_else(|| ListenerError::ResolveEmpty {
        host: host.to_string(),
        port,
    })?;
    TcpListener::bind(addr).map_err(|source| ListenerError::BindTcp { addr, source })
}
