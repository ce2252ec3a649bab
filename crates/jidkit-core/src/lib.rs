//! XMPP address (JID) value objects.
//!
//! Raw strings are split by [`parser`], each part goes through the
//! [`Stringprep`] strategy the process was configured with, and the result is an
//! immutable [`BareJid`] or [`Jid`] carrying its canonical string.

pub mod bare;
pub mod cache;
pub mod error;
pub mod jid;
pub mod legacy;
pub mod parser;
pub mod prep;

pub use bare::BareJid;
pub use cache::{BareJidCache, DEFAULT_CACHE_CAPACITY};
pub use error::{JidError, JidPart, NormalizationError, ParseError};
pub use jid::Jid;
pub use parser::{parse_jid, split_jid, JidParts};
pub use prep::{BasicPrep, JidPrep, NoopPrep, PrepProfile, Stringprep, UnknownProfile};
