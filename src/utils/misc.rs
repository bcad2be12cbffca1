use itertools::Itertools;

/// Space separated upper-case hex, e.g. `1E 6A 2C 48`.
pub fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).join(" ")
}

/// File size with a megabyte figure, as shown in reports.
pub fn format_size(bytes: usize) -> String {
    format!(
        "{} bytes ({:.1} MB)",
        bytes.to_string()
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .join(","),
        bytes as f64 / 1024.0 / 1024.0
    )
}
