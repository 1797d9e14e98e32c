//! # Channel Sink
//!
//! Forwards drained bins to an async listener over an unbounded tokio
//! channel. The queue never awaits; the listener decides when to run.

use crate::domain::{Bin, SinkError};
use crate::ports::{BinSink, DeliveryFailure};
use tokio::sync::mpsc;
use tracing::debug;

/// `BinSink` backed by `tokio::sync::mpsc::UnboundedSender`.
#[derive(Debug)]
pub struct ChannelSink<K, V> {
    sender: mpsc::UnboundedSender<Bin<K, V>>,
}

impl<K, V> ChannelSink<K, V> {
    /// Wraps an existing sender.
    #[must_use]
    pub fn new(sender: mpsc::UnboundedSender<Bin<K, V>>) -> Self {
        Self { sender }
    }

    /// Creates a sink and the receiver the listener reads bins from.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Bin<K, V>>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    /// Returns true once the receiver has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<K, V> Clone for ChannelSink<K, V> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<K, V> BinSink<K, V> for ChannelSink<K, V> {
    fn deliver(&mut self, bin: Bin<K, V>) -> Result<(), DeliveryFailure<K, V>> {
        self.sender.send(bin).map_err(|mpsc::error::SendError(bin)| {
            debug!("Bin listener gone, delivery refused");
            DeliveryFailure::new(bin, SinkError::Closed)
        })
    }
}
