const UNITS: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Renders a byte count with decimal magnitudes, e.g. `0 bytes`, `512 bytes`,
/// `1.5 KB`, `3.2 GB`. Rounds half up to one decimal.
pub fn display_size(bytes: u64) -> String {
    if bytes < 1000 {
        return format!("{} bytes", bytes);
    }

    let scaled = u128::from(bytes) * 10;
    let mut divisor: u128 = 1000;
    let mut unit = 0;
    let mut tenths = (scaled + divisor / 2) / divisor;
    while tenths >= 10_000 && unit + 1 < UNITS.len() {
        divisor *= 1000;
        unit += 1;
        tenths = (scaled + divisor / 2) / divisor;
    }
    format!("{}.{} {}", tenths / 10, tenths % 10, UNITS[unit])
}
