use alloy::primitives::Address;

/// Countdown in the dashboard's format: `1d 2h 3m`, `2h 3m 4s` or `3m 4s`.
pub fn format_countdown(total_seconds: u64) -> String {
    let seconds = total_seconds % 60;
    let minutes = total_seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{days}d {}h {}m", hours % 24, minutes % 60)
    } else if hours > 0 {
        format!("{hours}h {}m {seconds}s", minutes % 60)
    } else {
        format!("{minutes}m {seconds}s")
    }
}

/// EVM addresses are shown EIP-55 checksummed; any other identifier as-is.
pub fn token_label(token: &str) -> String {
    token
        .parse::<Address>()
        .map(|address| address.to_checksum(None))
        .unwrap_or_else(|_| token.to_string())
}
