#[cfg(test)]
mod verify {
    use plastix::language::*;
    use plastix::parsing::parser::{map, Parser, Rule};
    use plastix::parsing::{self, ParsingError};
    use std::time::{Duration, Instant};

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    #[test]
    fn engine_primitives_compose() {
        fn digit<'i>(input: &mut Parser<'i>) -> Result<char, ParsingError> {
            input.satisfy(|c| c.is_ascii_digit(), "a digit")
        }

        fn letter<'i>(input: &mut Parser<'i>) -> Result<char, ParsingError> {
            input.satisfy(|c| c.is_ascii_alphabetic(), "a letter")
        }

        let mut input = Parser::new();
        input.initialize("a1b2!");

        let result = input.many(|input| input.choice(&[digit as Rule<'_, _>, letter as Rule<'_, _>]));
        assert_eq!(result, vec!['a', '1', 'b', '2']);
        assert_eq!(input.offset(), 4);
        assert_eq!(
            input.end_of_input(),
            Err(ParsingError::InvalidCharacter(4, '!'))
        );
    }

    #[test]
    fn sequence_rewinds_on_failure() {
        let mut input = Parser::new();
        input.initialize("abc");

        let result = input.sequence(|input| {
            input.literal("ab")?;
            input.literal("x")
        });
        assert_eq!(result, Err(ParsingError::ExpectedToken(2, "x")));
        assert_eq!(input.offset(), 0);

        let result = input.sequence(|input| {
            input.literal("ab")?;
            input.literal("c")
        });
        assert_eq!(result, Ok("c"));
        assert!(input.is_finished());
    }

    #[test]
    fn map_transforms_results() {
        fn digits<'i>(input: &mut Parser<'i>) -> Result<&'i str, ParsingError> {
            input.take_while1(|c| c.is_ascii_digit(), "a number")
        }

        let mut input = Parser::new();
        input.initialize("1234rest");

        let number = map(digits, |digits: &str| digits.len());
        assert_eq!(number(&mut input), Ok(4));
        assert_eq!(input.entire(), "rest");
    }

    #[test]
    fn overview_document() {
        let content = trim(
            r#"
= Title

Some *bold* text^#.

#: A footnote.
"#,
        );

        let document = parsing::parse(content).unwrap();
        assert_eq!(
            document.blocks,
            vec![
                Block::Section {
                    level: 1,
                    content: vec![Inline::Text("Title")]
                },
                Block::BlankRun(1),
                Block::Paragraph {
                    lines: vec![vec![
                        Inline::Text("Some "),
                        Inline::Bold(vec![Inline::Text("bold")]),
                        Inline::Text(" text"),
                        Inline::Footnote,
                        Inline::Text(".")
                    ]],
                    blank: Some(1)
                },
                Block::FootnoteRef(vec![Inline::Text("A footnote.")]),
            ]
        );
        assert_eq!(document.footnote_markers(), 1);
    }

    #[test]
    fn block_kinds_in_sequence() {
        let content = trim(
            r#"
[ref]: A reference
!img.png fig:img
---
|x|
---
* item
"#,
        );

        let document = parsing::parse(content).unwrap();
        assert_eq!(document.blocks.len(), 4);
        assert!(matches!(document.blocks[0], Block::ReferenceDef { .. }));
        assert!(matches!(
            document.blocks[1],
            Block::Figure {
                caption: None,
                ..
            }
        ));
        assert!(matches!(document.blocks[2], Block::Table(_)));
        assert!(matches!(document.blocks[3], Block::List { .. }));
    }

    #[test]
    fn comments_do_not_reach_the_grammar() {
        let content = parsing::strip_comments("% notes to self\n= Title\n%more\nBody\n");
        let document = parsing::parse(&content).unwrap();
        assert_eq!(document.blocks.len(), 2);
    }

    #[test]
    fn failures_point_at_the_problem() {
        let error = parsing::parse("= Fine\n\nA *broken line\n").unwrap_err();
        assert_eq!(error, ParsingError::ExpectedToken(22, "*"));
        assert_eq!(error.message(), "expected '*'");

        let error = parsing::parse("ok\nhis/her\n").unwrap_err();
        assert_eq!(error, ParsingError::InvalidCharacter(6, '/'));
    }

    #[test]
    fn rgb_component_too_large() {
        let error = parsing::parse("<x:(1,2,999)>").unwrap_err();
        assert_eq!(error, ParsingError::InvalidByte(8));
    }

    #[test]
    fn unclosed_markers_parse_quickly() {
        let content = "*a ".repeat(60) + "\n";
        let started = Instant::now();
        let result = parsing::parse(&content);
        assert!(result.is_ok());
        assert!(started.elapsed() < Duration::from_secs(2));

        let content = "*a ".repeat(200) + "\n";
        let started = Instant::now();
        let result = parsing::parse(&content);
        assert!(matches!(result, Err(ParsingError::TooDeep(_))));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn deep_nesting_is_refused() {
        let content = "<".repeat(20000) + "x" + &":red>".repeat(20000) + "\n";
        let error = parsing::parse(&content).unwrap_err();
        assert_eq!(error, ParsingError::TooDeep(100));
        assert_eq!(error.message(), "styled spans nested too deeply");

        let content = "<".repeat(50) + "x" + &":red>".repeat(50) + "\n";
        assert!(parsing::parse(&content).is_ok());
    }

    #[test]
    fn windows_line_endings() {
        let document = parsing::parse("first\r\nsecond\r\n\r\nnext\r\n").unwrap();
        assert_eq!(
            document.blocks,
            vec![
                Block::Paragraph {
                    lines: vec![vec![Inline::Text("first")], vec![Inline::Text("second")]],
                    blank: Some(1),
                },
                Block::Paragraph {
                    lines: vec![vec![Inline::Text("next")]],
                    blank: None,
                },
            ]
        );

        let document = parsing::parse("---\r\n|a|b|\r\n---\r\n").unwrap();
        assert_eq!(
            document.blocks,
            vec![Block::Table(vec![TableRow(vec![
                TableCell(vec![Inline::Text("a")]),
                TableCell(vec![Inline::Text("b")]),
            ])])]
        );

        let error = parsing::parse("one\rtwo\n").unwrap_err();
        assert_eq!(error, ParsingError::ExpectedToken(3, "\r\n"));
    }
}
