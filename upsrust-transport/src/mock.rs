//! Test-support mock transport
//!
//! Always compiled so downstream crates can drive protocol tests without
//! hardware; hidden from public docs.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use bytes::BytesMut;

use crate::{error::Result, DeviceIdentity, Error, Transport};

#[derive(Debug, Default)]
struct State {
    open: bool,
    fail_open: bool,
    native_opens: usize,
    writes: Vec<Vec<u8>>,
    reads: VecDeque<Vec<u8>>,
}

/// Scripted in-memory transport
///
/// Records every write and serves reads from a queue of scripted chunks.
/// Clones share the underlying state, so a test can keep one handle while
/// the code under test owns the other.
#[derive(Debug, Clone)]
pub struct MockTransport {
    identity: DeviceIdentity,
    state: Rc<RefCell<State>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            identity: DeviceIdentity::new(0x0665, 0x5161),
            state: Rc::new(RefCell::new(State::default())),
        }
    }

    /// Override the reported identity
    pub fn with_identity(mut self, identity: DeviceIdentity) -> Self {
        self.identity = identity;
        self
    }

    /// Queue one read chunk
    pub fn push_read(&self, chunk: &[u8]) {
        self.state.borrow_mut().reads.push_back(chunk.to_vec());
    }

    /// Queue a textual reply split into fixed-size read chunks
    pub fn script_reply(&self, text: &str, chunk_len: usize) {
        let mut state = self.state.borrow_mut();
        for chunk in text.as_bytes().chunks(chunk_len) {
            state.reads.push_back(chunk.to_vec());
        }
    }

    /// Make every open fail as if enumeration found no device
    pub fn refuse_open(&self) {
        self.state.borrow_mut().fail_open = true;
    }

    /// Writes recorded so far, oldest first
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.borrow().writes.clone()
    }

    /// Number of native opens performed
    pub fn native_opens(&self) -> usize {
        self.state.borrow().native_opens
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn open(&mut self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.open {
            return Ok(());
        }
        if state.fail_open {
            return Err(Error::DeviceNotFound(self.identity));
        }
        state.native_opens += 1;
        state.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.state.borrow_mut().open = false;
    }

    fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    fn read(&mut self, max_len: usize) -> Result<BytesMut> {
        let mut state = self.state.borrow_mut();
        if !state.open {
            return Ok(BytesMut::new());
        }

        let chunk = state.reads.pop_front().unwrap_or_default();
        let take = chunk.len().min(max_len);
        let mut report = BytesMut::with_capacity(take);
        report.extend_from_slice(&chunk[..take]);
        Ok(report)
    }

    fn write(&mut self, payload: &[u8]) -> Result<usize> {
        let mut state = self.state.borrow_mut();
        if !state.open {
            return Ok(0);
        }

        state.writes.push(payload.to_vec());
        Ok(payload.len())
    }

    fn identity(&self) -> DeviceIdentity {
        self.identity
    }
}
