/// Generate a fresh account id: 12 random bytes, hex encoded
pub fn new_account_id() -> String {
    let bytes: [u8; 12] = rand::random();
    hex::encode(bytes)
}

/// Ids are exactly 24 lowercase hex characters
pub fn is_valid_account_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
