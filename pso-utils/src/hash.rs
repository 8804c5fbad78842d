/// Derives a 32-byte seed from free-form text, so a run can be replayed
/// from a memorable name.
pub fn seed_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}
