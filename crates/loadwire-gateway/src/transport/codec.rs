//! Decode-once codec for the transport layer.
//!
//! - Text frames => `Frame` (event + lazily-parsed data)
//! - Binary frames are not part of the protocol and are surfaced as such
//! - Ping/Pong/Close are surfaced for lifecycle management

use axum::extract::ws::Message;
use loadwire_core::{error::Result, protocol::Frame};

#[derive(Debug)]
pub enum Inbound {
    Event { frame: Frame, bytes_len: usize },
    Binary { bytes_len: usize },
    Ping(Vec<u8>),
    Pong(Vec<u8>),
    Close,
}

pub fn decode(msg: Message) -> Result<Inbound> {
    match msg {
        Message::Text(s) => {
            let bytes_len = s.len();
            let frame = Frame::decode(&s)?;
            Ok(Inbound::Event { frame, bytes_len })
        }
        Message::Binary(b) => Ok(Inbound::Binary { bytes_len: b.len() }),
        Message::Ping(v) => Ok(Inbound::Ping(v)),
        Message::Pong(v) => Ok(Inbound::Pong(v)),
        Message::Close(_) => Ok(Inbound::Close),
    }
}
