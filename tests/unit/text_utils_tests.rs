/*!
 * Tests for normalization and char offset helpers
 */

use runloc::text_utils::{Occurrence, TextRange, locate_unique, normalize_content, slice_chars};

#[test]
fn test_normalize_withLineBreaksAndSpaceVariants_shouldCollapseToOneSpace() {
    assert_eq!(normalize_content("Hello\nworld"), "Hello world");
    assert_eq!(normalize_content("Hello\r\n\r\nworld"), "Hello world");
    assert_eq!(normalize_content("a\u{2028}b\u{00A0}c\u{202F}d"), "a b c d");
    assert_eq!(normalize_content("a  \n  b"), "a b");
}

#[test]
fn test_normalize_shouldNotTrimOrTouchOtherWhitespace() {
    assert_eq!(normalize_content(" Hello  "), " Hello ");
    assert_eq!(normalize_content("a\tb"), "a\tb");
    assert_eq!(normalize_content("Hello World"), "Hello World");
}

#[test]
fn test_sliceChars_withCyrillic_shouldUseCharOffsets() {
    assert_eq!(slice_chars("Привет мир", TextRange::new(7, 10)), "мир");
}

#[test]
fn test_locateUnique_shouldDistinguishAllThreeOutcomes() {
    assert_eq!(
        locate_unique("Bonjour monde", "monde"),
        Occurrence::Unique(TextRange::new(8, 13))
    );
    assert_eq!(locate_unique("Bonjour monde", "Monde"), Occurrence::NotFound);
    assert_eq!(locate_unique("monde ou monde", "monde"), Occurrence::Ambiguous);
    assert_eq!(locate_unique("anything", ""), Occurrence::NotFound);
}
