use ferrous_zone_domain::zone_dump::{is_dump_complete, parse_zone_names, zone_from_header};

const DUMP: &str = ";
; Start view _default
;
;
; Zone dump of 'team1.example.com/IN'
;
team1.example.com.\t3600\tIN SOA\tns1.example.com. hostmaster.example.com. 1 86400 7200 2419200 3600
;
; Zone dump of 'core.example.com/IN'
;
core.example.com.\t3600\tIN NS\tns1.example.com.
;
; Zone dump of 'version.bind/CH'
;
; Zone dump of 'internal.example.com/IN/internal'
;
; Dump complete
";

#[test]
fn test_dump_complete_marker() {
    assert!(is_dump_complete(DUMP));
    assert!(!is_dump_complete("; Zone dump of 'a.example.com/IN'\n"));
    assert!(!is_dump_complete(""));
}

#[test]
fn test_parse_zone_names_in_order() {
    assert_eq!(
        parse_zone_names(DUMP),
        vec!["team1.example.com", "core.example.com", "internal.example.com"]
    );
}

#[test]
fn test_non_comment_lines_are_ignored() {
    let dump = "record with Zone dump of 'fake.example.com/IN'\n; Dump complete\n";

    assert!(parse_zone_names(dump).is_empty());
}

#[test]
fn test_zone_from_header() {
    assert_eq!(
        zone_from_header("; Zone dump of 'a.example.com/IN'"),
        Some("a.example.com")
    );
    assert_eq!(
        zone_from_header("; Zone dump of 'a.example.com/IN/view1'"),
        Some("a.example.com")
    );
    assert_eq!(zone_from_header("; Zone dump of 'version.bind/CH'"), None);
    assert_eq!(zone_from_header("; Start view _default"), None);
}
