//! ensure serde is working as expected

use super::*;

#[test]
fn test_serde() {
    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
    struct MyTypes {
        f1: Fixed,
        f2: F2Dot14,
        gid: GlyphId,
        date: LongDateTime,
        fword: FWord,
        tag: Tag,
        version1: MajorMinor,
        version2: Version16Dot16,
    }

    let my_instance = MyTypes {
        f1: Fixed::from_f64(521.5),
        f2: F2Dot14::from_f32(1.25),
        gid: GlyphId::new(69),
        date: LongDateTime::new(1_234_569_101),
        fword: FWord::new(-420),
        tag: Tag::new(b"cool"),
        version1: MajorMinor::new(10, 5),
        version2: Version16Dot16::VERSION_2_5,
    };

    let dumped = serde_json::to_string(&my_instance).unwrap();
    let loaded: MyTypes = serde_json::from_str(&dumped).unwrap();
    assert_eq!(my_instance, loaded)
}
