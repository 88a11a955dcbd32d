//! Property tests: every parse covers its input exactly and is
//! deterministic, no matter how broken the input is.

use proptest::prelude::*;

use arbor_text::Length;
use arbor_tree::Symbol;

use super::fixtures;
use crate::Parser;

proptest! {
    #[test]
    fn parse_always_covers_the_input(text in "[abcxz \n]{0,32}") {
        let language = fixtures::language();
        let mut parser = Parser::new(language);
        let tree = fixtures::parse_text(&mut parser, &text);

        prop_assert_eq!(tree.symbol(), Symbol::DOCUMENT);
        prop_assert_eq!(tree.total_size(), Length::of_text(&text));
        fixtures::assert_covers(&tree, &text);
    }

    #[test]
    fn padded_parse_always_covers_the_input(text in "[abcxz \n]{0,32}") {
        let language = fixtures::padded_language();
        let mut parser = Parser::new(language);
        let tree = fixtures::parse_text(&mut parser, &text);

        prop_assert_eq!(tree.total_size(), Length::of_text(&text));
        fixtures::assert_covers(&tree, &text);
    }

    #[test]
    fn parse_is_deterministic(text in "[abcx ]{0,24}") {
        let language = fixtures::language();
        let mut first = Parser::new(language.clone());
        let mut second = Parser::new(language.clone());

        let tree_a = fixtures::parse_text(&mut first, &text);
        let tree_b = fixtures::parse_text(&mut second, &text);

        prop_assert_eq!(
            fixtures::sexp(&language, &tree_a),
            fixtures::sexp(&language, &tree_b)
        );
        prop_assert_eq!(tree_a.total_size(), tree_b.total_size());
    }

    #[test]
    fn incremental_reparse_matches_full_parse(
        base in "[abc ]{0,16}",
        insert in "[abc ]{1,4}",
        split in 0usize..16,
    ) {
        let position = split.min(base.chars().count());
        let mut edited = String::new();
        edited.extend(base.chars().take(position));
        edited.push_str(&insert);
        edited.extend(base.chars().skip(position));
        let edit = arbor_text::InputEdit::insert(position, insert.chars().count());

        let language = fixtures::language();

        let mut incremental = Parser::new(language.clone());
        let base_tree = fixtures::parse_text(&mut incremental, &base);
        let reparsed = fixtures::reparse_text(&mut incremental, &edited, edit);

        // Coverage holds no matter what the base looked like.
        fixtures::assert_covers(&reparsed, &edited);

        // Tree equivalence with a from-scratch parse is only promised
        // when the reused prefix contains no recovery artifacts; two
        // recovery runs may split skipped input differently.
        if !base_tree.has_error() {
            let mut fresh = Parser::new(language.clone());
            let full = fixtures::parse_text(&mut fresh, &edited);
            prop_assert_eq!(
                fixtures::sexp(&language, &reparsed),
                fixtures::sexp(&language, &full)
            );
            prop_assert_eq!(reparsed.total_size(), full.total_size());
        }
    }
}
