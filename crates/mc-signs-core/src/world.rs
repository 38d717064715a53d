//! Live sign reads marshaled to the world thread.
//!
//! The packet thread never touches world state. It sends a
//! [`SignReadRequest`] over a bounded channel and blocks on the oneshot
//! reply, which the world thread answers from its tick loop.

use std::sync::Arc;
use std::thread::{self, ThreadId};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

use crate::error::SignError;
use crate::lines::SignLines;
use crate::location::SignLocation;
use crate::services::SignReader;

/// World state access, only called on the thread that owns the world.
pub trait WorldAccess {
    /// Lines of the sign at `location`, or `None` if the world is not
    /// loaded or the block there is not a sign.
    fn sign_lines_at(&self, location: &SignLocation) -> Option<SignLines>;
}

/// A pending live read, with the channel to send the result back.
pub struct SignReadRequest {
    pub location: SignLocation,
    response_tx: oneshot::Sender<SignLines>,
}

impl SignReadRequest {
    /// Answer from world state. Non-signs answer four empty lines.
    pub fn respond<W: WorldAccess + ?Sized>(self, world: &W) {
        let lines = world.sign_lines_at(&self.location).unwrap_or_default();
        // The requester may have given up; nothing to do then.
        let _ = self.response_tx.send(lines);
    }
}

/// Packet-thread handle for live sign reads.
///
/// Requests made on the world thread itself never go through the channel:
/// they read the local world handle directly, or fail when none was
/// attached.
#[derive(Clone)]
pub struct WorldBridge {
    request_tx: mpsc::Sender<SignReadRequest>,
    world_thread: ThreadId,
    local: Option<Arc<dyn WorldAccess + Send + Sync>>,
}

impl WorldBridge {
    /// Create a bridge and the receiver the world thread serves.
    ///
    /// The calling thread is taken to be the world thread; use
    /// [`WorldBridge::on_thread`] when the world runs elsewhere.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<SignReadRequest>) {
        let (request_tx, request_rx) = mpsc::channel(capacity);
        let bridge = Self {
            request_tx,
            world_thread: thread::current().id(),
            local: None,
        };
        (bridge, request_rx)
    }

    pub fn on_thread(mut self, world_thread: ThreadId) -> Self {
        self.world_thread = world_thread;
        self
    }

    /// World handle read directly when a request is made on the world thread.
    pub fn with_local_access(mut self, world: Arc<dyn WorldAccess + Send + Sync>) -> Self {
        self.local = Some(world);
        self
    }

    /// Read of the sign at `location`, blocking until the world thread
    /// answers.
    ///
    /// On the world thread this reads the local handle instead. Inside an
    /// async runtime it refuses to block and fails.
    pub fn request(&self, location: &SignLocation) -> Result<SignLines, SignError> {
        if thread::current().id() == self.world_thread {
            return match &self.local {
                Some(world) => Ok(world.sign_lines_at(location).unwrap_or_default()),
                None => Err(SignError::OnWorldThread),
            };
        }
        if Handle::try_current().is_ok() {
            return Err(SignError::InsideRuntime);
        }

        let (response_tx, response_rx) = oneshot::channel();
        let request = SignReadRequest {
            location: location.clone(),
            response_tx,
        };
        self.request_tx
            .blocking_send(request)
            .map_err(|_| SignError::WorldUnavailable)?;
        response_rx
            .blocking_recv()
            .map_err(|_| SignError::WorldUnavailable)
    }
}

impl SignReader for WorldBridge {
    fn read_sign(&self, location: &SignLocation) -> SignLines {
        match self.request(location) {
            Ok(lines) => lines,
            Err(e) => {
                warn!("Live read of sign at {location} failed: {e}");
                SignLines::empty()
            }
        }
    }
}

/// Answer every request already queued. Returns how many were served.
///
/// Meant to be called once per world tick.
pub fn drain_requests<W: WorldAccess + ?Sized>(
    rx: &mut mpsc::Receiver<SignReadRequest>,
    world: &W,
) -> usize {
    let mut served = 0;
    while let Ok(request) = rx.try_recv() {
        request.respond(world);
        served += 1;
    }
    served
}

/// Answer requests until every [`WorldBridge`] has been dropped.
pub fn serve_requests<W: WorldAccess + ?Sized>(mut rx: mpsc::Receiver<SignReadRequest>, world: &W) {
    while let Some(request) = rx.blocking_recv() {
        request.respond(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestWorld {
        signs: HashMap<SignLocation, SignLines>,
    }

    impl TestWorld {
        fn new() -> Self {
            let mut signs = HashMap::new();
            signs.insert(
                SignLocation::new("world", 0, 64, 0),
                SignLines::from_lines(["Live", "text"]),
            );
            Self { signs }
        }
    }

    impl WorldAccess for TestWorld {
        fn sign_lines_at(&self, location: &SignLocation) -> Option<SignLines> {
            self.signs.get(location).cloned()
        }
    }

    #[test]
    fn request_answered_by_world_thread() {
        let (bridge, rx) = WorldBridge::channel(4);
        let requester = thread::spawn(move || {
            let found = bridge.read_sign(&SignLocation::new("world", 0, 64, 0));
            let missing = bridge.read_sign(&SignLocation::new("world", 5, 5, 5));
            (found, missing)
        });

        serve_requests(rx, &TestWorld::new());

        let (found, missing) = requester.join().unwrap();
        assert_eq!(found, SignLines::from_lines(["Live", "text"]));
        assert_eq!(missing, SignLines::empty());
    }

    #[test]
    fn closed_world_degrades_to_empty() {
        let (bridge, rx) = WorldBridge::channel(1);
        drop(rx);

        let requester = thread::spawn(move || {
            let result = bridge.request(&SignLocation::new("world", 0, 64, 0));
            let lines = bridge.read_sign(&SignLocation::new("world", 0, 64, 0));
            (result, lines)
        });
        let (result, lines) = requester.join().unwrap();
        assert!(matches!(result, Err(SignError::WorldUnavailable)));
        assert_eq!(lines, SignLines::empty());
    }

    #[test]
    fn drain_serves_queued_requests() {
        let (bridge, mut rx) = WorldBridge::channel(4);
        let requester = thread::spawn(move || bridge.read_sign(&SignLocation::new("world", 0, 64, 0)));

        let world = TestWorld::new();
        let mut served = 0;
        while served == 0 {
            served = drain_requests(&mut rx, &world);
            thread::yield_now();
        }

        assert_eq!(served, 1);
        assert_eq!(&requester.join().unwrap()[0], "Live");
    }

    #[test]
    fn world_thread_reads_local_handle() {
        let (bridge, mut rx) = WorldBridge::channel(4);
        let bridge = bridge.with_local_access(Arc::new(TestWorld::new()));

        let lines = bridge.read_sign(&SignLocation::new("world", 0, 64, 0));
        assert_eq!(lines, SignLines::from_lines(["Live", "text"]));
        assert_eq!(drain_requests(&mut rx, &TestWorld::new()), 0);
    }

    #[test]
    fn world_thread_without_local_handle_does_not_block() {
        let (bridge, mut rx) = WorldBridge::channel(4);

        assert!(matches!(
            bridge.request(&SignLocation::new("world", 0, 64, 0)),
            Err(SignError::OnWorldThread)
        ));
        assert_eq!(
            bridge.read_sign(&SignLocation::new("world", 0, 64, 0)),
            SignLines::empty()
        );
        assert_eq!(drain_requests(&mut rx, &TestWorld::new()), 0);
    }

    #[test]
    fn refuses_to_block_inside_runtime() {
        let (bridge, _rx) = WorldBridge::channel(4);
        let bridge = bridge.on_thread(thread::spawn(|| ()).thread().id());

        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let result = runtime.block_on(async { bridge.request(&SignLocation::new("world", 0, 64, 0)) });
        assert!(matches!(result, Err(SignError::InsideRuntime)));
    }
}
