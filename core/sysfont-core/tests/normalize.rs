use proptest::prelude::*;

use sysfont_core::normalize::{normalize, simple_name, StyleHint};

#[test]
fn mac_file_name_example() {
    let name = normalize("ArialBoldItalic", &StyleHint::FileStem);
    assert_eq!(name.family_key, "arial");
    assert!(name.bold);
    assert!(name.italic);
}

#[test]
fn windows_registry_example() {
    let name = normalize("Courier New Bold Italic (TrueType)", &StyleHint::Embedded);
    assert_eq!(name.family_key, "couriernew");
    assert!(name.bold && name.italic);
}

fn hint_strategy() -> impl Strategy<Value = StyleHint> {
    prop_oneof![
        Just(StyleHint::Embedded),
        Just(StyleHint::FileStem),
        "[A-Za-z =]{0,16}".prop_map(StyleHint::Fontconfig),
    ]
}

fn name_strategy() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        Just("Bold".to_string()),
        Just("Italic".to_string()),
        Just("Regular".to_string()),
        Just("Light".to_string()),
        Just("Narrow".to_string()),
        Just("MT".to_string()),
        Just("(TrueType)".to_string()),
        "[A-Za-z0-9&.-]{1,8}",
    ];
    prop::collection::vec(word, 0..6).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn normalizing_a_family_key_is_a_no_op(name in name_strategy(), hint in hint_strategy()) {
        let once = normalize(&name, &hint);
        let twice = normalize(&once.family_key, &hint);
        prop_assert_eq!(&twice.family_key, &once.family_key);
    }

    #[test]
    fn family_keys_are_lowercase_alphanumeric(name in "\\PC{0,24}", hint in hint_strategy()) {
        let key = normalize(&name, &hint).family_key;
        prop_assert!(key.chars().all(char::is_alphanumeric));
        prop_assert_eq!(simple_name(&key), key.clone());
    }
}
