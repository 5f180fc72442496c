//! Display labels for the small codes the directory API reports.

/// Label for a Steam master-server region code.
///
/// Unknown codes (including the upstream's 255 "rest of world") map to
/// `"World"`.
pub fn region_label(code: i64) -> &'static str {
    match code {
        0 => "US - East",
        1 => "US - West",
        2 => "South America",
        3 => "Europe",
        4 => "Asia",
        5 => "Australia",
        6 => "Middle East",
        7 => "Africa",
        _ => "World",
    }
}

/// Label for the single-letter platform code of a server.
pub fn platform_label(code: &str) -> &'static str {
    match code {
        "w" => "Windows",
        "m" => "Mac",
        "l" => "Linux",
        _ => "Other",
    }
}
