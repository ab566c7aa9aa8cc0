//! Report module for rendercheckr

mod result;

pub use result::{ChannelReport, Features, GlobalReport, SignalReport};
