//! Protocol module containing the frame type and the JSON codec.

pub mod frame;

pub use frame::{decode_frame, encode_frame, Frame, ProtocolError};
