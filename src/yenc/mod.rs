//! yEnc binary decoding for Usenet bodies
//!
//! yEnc shifts every byte by 42 and escapes the few results that would
//! break line-oriented transport. Only single-part bodies are handled and
//! checksums in the trailer are not verified.
//!
//! Reference: http://www.yenc.org/yenc-draft.1.3.txt

pub mod decode;
pub mod encode;
mod params;
pub mod types;

pub use decode::{YencDecoder, decode, decode_in_place};
pub use encode::encode;
pub use types::{YencHeader, YencState, YencStep};
