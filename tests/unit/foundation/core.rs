use super::*;

#[test]
fn size_rejects_zero_dimensions() {
    assert!(Size::new(0, 10).is_err());
    assert!(Size::new(10, 0).is_err());
    let s = Size::new(1000, 400).unwrap();
    assert_eq!(s.area(), 400_000);
    assert_eq!(Size::square(40).unwrap(), Size::new(40, 40).unwrap());
}

#[test]
fn parse_hex_accepts_rgb_and_rgba_forms() {
    assert_eq!(
        Rgba8::parse_hex("#253142").unwrap(),
        Rgba8::rgb(0x25, 0x31, 0x42)
    );
    assert_eq!(
        Rgba8::parse_hex("FF000080").unwrap(),
        Rgba8::rgba(255, 0, 0, 128)
    );
    assert_eq!(Rgba8::parse_hex(" #aBcDeF ").unwrap().to_hex(), "#abcdef");
}

#[test]
fn parse_hex_rejects_bad_input() {
    assert!(Rgba8::parse_hex("#12345").is_err());
    assert!(Rgba8::parse_hex("#gg0000").is_err());
    assert!(Rgba8::parse_hex("#ééé").is_err());
}

#[test]
fn color_serde_accepts_hex_and_arrays() {
    let c: Rgba8 = serde_json::from_str("\"#253142\"").unwrap();
    assert_eq!(c, Rgba8::rgb(0x25, 0x31, 0x42));
    let c: Rgba8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    let c: Rgba8 = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c.a, 4);
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());

    assert_eq!(
        serde_json::to_string(&Rgba8::rgba(0, 0, 0, 0)).unwrap(),
        "\"#00000000\""
    );
}

#[test]
fn placement_position_roundtrips() {
    let p = Placement::new((-5, 12), 90);
    assert_eq!(p.position(), (-5, 12));
    assert_eq!(p.rotation_deg, 90);
}
