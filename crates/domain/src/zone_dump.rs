/// File name `rndc dumpdb` writes into the zone directory.
pub const DUMP_FILE_NAME: &str = "named_dump.db";

/// Last line of a finished dump.
pub const DUMP_COMPLETE_MARKER: &str = "; Dump complete";

const ZONE_HEADER: &str = "Zone dump of '";
const CLASS_TAG: &str = "/IN";

pub fn is_dump_complete(contents: &str) -> bool {
    contents
        .lines()
        .last()
        .map(|line| line.trim_end() == DUMP_COMPLETE_MARKER)
        .unwrap_or(false)
}

/// Extracts the zone name from a `; Zone dump of 'example.com/IN/view'` comment.
pub fn zone_from_header(line: &str) -> Option<&str> {
    let start = line.find(ZONE_HEADER)? + ZONE_HEADER.len();
    let token = line[start..].split_whitespace().next()?;
    let end = token.rfind(CLASS_TAG)?;
    let zone = &token[..end];
    if zone.is_empty() {
        None
    } else {
        Some(zone)
    }
}

/// Zone names in dump order, taken from comment lines only.
pub fn parse_zone_names(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with(';'))
        .filter_map(zone_from_header)
        .map(str::to_string)
        .collect()
}
