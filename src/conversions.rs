/// Copies the first `N` bytes of `source` into an array, or `None` if `source` is shorter.
pub fn leading_bytes<const N: usize>(source: &[u8]) -> Option<[u8; N]> {
    source.get(..N)?.try_into().ok()
}

/// Uppercase hex pairs separated by single spaces, in slice order.
pub fn format_hex_pretty(data: &[u8]) -> String {
    data.iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}
