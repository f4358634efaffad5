//! DVB-S channel coding core library
//!
//! Implements the outer/inner channel coding chain from ETSI EN 300 421:
//! PRBS energy dispersal, systematic RS(204,188,t=8), a depth-12 Forney
//! convolutional byte interleaver, and a punctured rate-1/2 K=7 convolutional
//! code. [`DvbsEncoder`] composes all four stages behind a single
//! packet-at-a-time API; the individual stage modules are public for callers
//! who need to drive or inspect one in isolation.

pub mod config;
pub mod convolutional;
pub mod encoder;
pub mod errors;
pub mod gf;
pub mod interleaver;
pub mod logging;
pub mod packet;
pub mod reed_solomon;
pub mod scrambler;
pub mod tables;
pub mod utils;

pub use config::EncoderConfig;
pub use convolutional::CodeRate;
pub use encoder::{DvbsEncoder, EncoderStats};
pub use errors::{DvbsError, Result};
pub use logging::{LogConfig, LogLevel, SignalLogger};
pub use packet::{RS_PACKET_LEN, RS_PARITY_LEN, TS_PACKET_LEN, TS_SYNC, TsPacket};
