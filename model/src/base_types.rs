pub type UnixTimestamp = u32;
pub type Workchain = i32;

pub const WORKCHAIN_BASE: Workchain = 0;
pub const WORKCHAIN_MASTER: Workchain = -1;

/// `msg_type` of an internal message, i.e. a value transfer between accounts.
pub const MSG_TYPE_INTERNAL: u8 = 0;
pub const MSG_TYPE_EXT_IN: u8 = 1;
pub const MSG_TYPE_EXT_OUT: u8 = 2;

/// Nano units in one coin.
pub const NANO_PER_COIN: u64 = 1_000_000_000;
