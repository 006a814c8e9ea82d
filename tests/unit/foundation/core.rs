use super::*;

#[test]
fn resolution_parses_plain_and_suffixed_heights() {
    assert_eq!("720".parse::<Resolution>().unwrap().height(), 720);
    assert_eq!(" 480p ".parse::<Resolution>().unwrap().height(), 480);
    assert!("0".parse::<Resolution>().is_err());
    assert!("hd".parse::<Resolution>().is_err());
}

#[test]
fn resolution_deserializes_from_int_or_string() {
    let a: Resolution = serde_json::from_str("1080").unwrap();
    let b: Resolution = serde_json::from_str("\"1080\"").unwrap();
    assert_eq!(a, b);
    assert!(serde_json::from_str::<Resolution>("0").is_err());
    assert_eq!(serde_json::to_string(&a).unwrap(), "1080");
}

#[test]
fn track_id_display_is_readable() {
    assert_eq!(TrackId(3).to_string(), "track#3");
}
