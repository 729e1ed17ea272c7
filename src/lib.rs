//! A word-aligned, no-std, no-alloc binary pack codec, paired with an
//! HDLC-style byte framer and a small request/response dispatcher built on
//! top of both.
//!
//! - [`pack`] is the encoding: a cursor over a buffer of 32-bit words that
//!   reads and writes self-describing typed elements in place.
//! - [`framer`] turns a byte stream into discrete, CRC-checked frames so
//!   packed buffers can travel over a serial link.
//! - [`postman`] routes a packed request to a registered handler and writes
//!   its packed response into the same buffer.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod framer;
pub mod pack;
pub mod postman;

pub use framer::{Framer, FramerError, FramerMode};
pub use pack::{ContainerKind, Pack};
pub use postman::Postman;
