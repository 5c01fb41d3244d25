//! Packet framing on top of the byte pipes
//!
//! Each end owns a parser and a small reassembly buffer. Bytes read past
//! the end of one packet stay buffered for the next call, so reads can be
//! abandoned at any await point without losing data.
//!
//! The controller never waits on the frontend. Outgoing messages sit in a
//! local queue that keeps only the newest frame and the newest LED colors,
//! and [`ControllerLink::pump`] moves as many bytes as the pipe accepts.

use std::collections::VecDeque;
use std::mem;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::{Pipe, TryReadError, TryWriteError};
use log::{debug, trace};
use thiserror::Error;

use weightloss_protocol::{
    ControllerMessage, FrontendMessage, Packet, PacketError, PacketParser, MAX_PACKET_SIZE,
};

use crate::channels::{ControllerPipe, FrontendPipe};

/// Bytes pulled from a pipe per read
const READ_CHUNK: usize = 256;

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("protocol violation: {0}")]
    Protocol(#[from] PacketError),
}

#[derive(Debug, Default)]
struct Reassembly {
    parser: PacketParser,
    pending: Vec<u8>,
    offset: usize,
}

impl Reassembly {
    fn push(&mut self, bytes: &[u8]) {
        if self.offset == self.pending.len() {
            self.pending.clear();
            self.offset = 0;
        }
        self.pending.extend_from_slice(bytes);
    }

    fn next_packet(&mut self) -> Result<Option<Packet>, PacketError> {
        let (packet, used) = self.parser.feed_bytes(&self.pending[self.offset..])?;
        self.offset += used;
        Ok(packet)
    }
}

async fn write_packet<const N: usize>(
    pipe: &Pipe<CriticalSectionRawMutex, N>,
    packet: &Packet,
) -> Result<(), LinkError> {
    let mut buf = [0u8; MAX_PACKET_SIZE];
    let len = packet.encode(&mut buf)?;
    pipe.write_all(&buf[..len]).await;
    trace!("sent type 0x{:02X}, {} bytes", packet.msg_type, len);
    Ok(())
}

/// Controller end: queues frames, polls for input, never blocks
pub struct ControllerLink<'a> {
    outbound: &'a FrontendPipe,
    inbound: &'a ControllerPipe,
    rx: Reassembly,
    queue: VecDeque<ControllerMessage>,
    /// Encoded packet being written, possibly only partly through
    in_flight: Vec<u8>,
    written: usize,
}

impl<'a> ControllerLink<'a> {
    pub fn new(outbound: &'a FrontendPipe, inbound: &'a ControllerPipe) -> Self {
        Self {
            outbound,
            inbound,
            rx: Reassembly::default(),
            queue: VecDeque::new(),
            in_flight: Vec::with_capacity(MAX_PACKET_SIZE),
            written: 0,
        }
    }

    /// Queue `message`, replacing an unsent one of the same kind
    pub fn queue(&mut self, message: ControllerMessage) {
        let kind = mem::discriminant(&message);
        let before = self.queue.len();
        self.queue.retain(|queued| mem::discriminant(queued) != kind);
        if self.queue.len() < before {
            debug!("frontend is behind, dropped a stale {:?}", kind);
        }
        self.queue.push_back(message);
    }

    /// Write queued packets until the pipe is full or the queue is empty
    pub fn pump(&mut self) -> Result<(), LinkError> {
        loop {
            if self.written == self.in_flight.len() {
                let Some(message) = self.queue.pop_front() else {
                    return Ok(());
                };
                let packet = message.to_packet()?;
                self.in_flight.resize(MAX_PACKET_SIZE, 0);
                let len = packet.encode(&mut self.in_flight)?;
                self.in_flight.truncate(len);
                self.written = 0;
                trace!("sending type 0x{:02X}, {} bytes", packet.msg_type, len);
            }
            match self.outbound.try_write(&self.in_flight[self.written..]) {
                Ok(n) => self.written += n,
                Err(TryWriteError::Full) => return Ok(()),
            }
        }
    }

    /// Nothing queued and nothing half written
    pub fn is_flushed(&self) -> bool {
        self.queue.is_empty() && self.written == self.in_flight.len()
    }

    /// Next complete message, or `None` when nothing has fully arrived yet
    pub fn try_receive(&mut self) -> Result<Option<FrontendMessage>, LinkError> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            if let Some(packet) = self.rx.next_packet()? {
                return Ok(Some(FrontendMessage::from_packet(&packet)?));
            }
            match self.inbound.try_read(&mut buf) {
                Ok(n) => self.rx.push(&buf[..n]),
                Err(TryReadError::Empty) => return Ok(None),
            }
        }
    }
}

/// Frontend end: forwards input, waits for frames
pub struct FrontendLink<'a> {
    outbound: &'a ControllerPipe,
    inbound: &'a FrontendPipe,
    rx: Reassembly,
}

impl<'a> FrontendLink<'a> {
    pub fn new(outbound: &'a ControllerPipe, inbound: &'a FrontendPipe) -> Self {
        Self {
            outbound,
            inbound,
            rx: Reassembly::default(),
        }
    }

    pub async fn send(&mut self, message: FrontendMessage) -> Result<(), LinkError> {
        write_packet(self.outbound, &message.to_packet()?).await
    }

    pub async fn receive(&mut self) -> Result<ControllerMessage, LinkError> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            if let Some(packet) = self.rx.next_packet()? {
                return Ok(ControllerMessage::from_packet(&packet)?);
            }
            let n = self.inbound.read(&mut buf).await;
            self.rx.push(&buf[..n]);
        }
    }

    /// Next complete message, or `None` when nothing has fully arrived yet
    pub fn try_receive(&mut self) -> Result<Option<ControllerMessage>, LinkError> {
        let mut buf = [0u8; READ_CHUNK];
        loop {
            if let Some(packet) = self.rx.next_packet()? {
                return Ok(Some(ControllerMessage::from_packet(&packet)?));
            }
            match self.inbound.try_read(&mut buf) {
                Ok(n) => self.rx.push(&buf[..n]),
                Err(TryReadError::Empty) => return Ok(None),
            }
        }
    }
}
