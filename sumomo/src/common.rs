//! Common settings in Sumomo.
use bincode::config::{self, Fixint, LittleEndian};

/// Connection id of BOS/EOS.
pub const BOS_EOS_CONNECTION_ID: u16 = 0;

pub(crate) fn bincode_config() -> config::Configuration<LittleEndian, Fixint> {
    config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
}
