//! Fixed-width integer packing shared by instruction data and account state

/// Width of a packed `u64`
pub const U64_LEN: usize = 8;

/// Packs `value` into 8 little-endian bytes, low byte first
pub fn encode_u64(value: u64) -> [u8; U64_LEN] {
    let mut bytes = [0u8; U64_LEN];
    let mut remaining = value;
    for byte in bytes.iter_mut() {
        *byte = (remaining & 0xff) as u8;
        remaining >>= 8;
    }
    bytes
}

/// Inverse of [`encode_u64`]
pub fn decode_u64(bytes: &[u8; U64_LEN]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}
