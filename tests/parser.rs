#[cfg(test)]
mod parser_tests {
    use arbor::ast::{BinaryOp, Block, Expr, LoopSource, Stmt};
    use arbor::error::ArborError;
    use arbor::parse;
    use arbor::token::TokenKind;

    fn statements(source: &str) -> Vec<Stmt> {
        match parse(source) {
            Ok(program) => program.statements,
            Err(e) => panic!("failed to parse {:?}: {}", source, e),
        }
    }

    fn syntax_error(source: &str) -> (Vec<TokenKind>, String) {
        match parse(source) {
            Err(ArborError::Syntax {
                expected, found, ..
            }) => (expected.0, found),
            other => panic!("expected a syntax error for {:?}, got {:?}", source, other),
        }
    }

    #[test]
    fn test_declaration_with_and_without_initializer() {
        let stmts = statements("seed x\nseed y = 3\n");

        assert_eq!(
            stmts,
            vec![
                Stmt::Declaration {
                    name: "x".into(),
                    initializer: None
                },
                Stmt::Declaration {
                    name: "y".into(),
                    initializer: Some(Expr::Int(3))
                },
            ]
        );
    }

    #[test]
    fn test_precedence_multiplicative_binds_tighter() {
        let stmts = statements("print 1 + 2 * 3");

        let expected = Expr::binary(
            BinaryOp::Add,
            Expr::Int(1),
            Expr::binary(BinaryOp::Mul, Expr::Int(2), Expr::Int(3)),
        );
        assert_eq!(stmts, vec![Stmt::Print(expected)]);
    }

    #[test]
    fn test_operators_are_left_associative() {
        let stmts = statements("x = 10 - 4 - 3");

        let expected = Expr::binary(
            BinaryOp::Sub,
            Expr::binary(BinaryOp::Sub, Expr::Int(10), Expr::Int(4)),
            Expr::Int(3),
        );
        assert_eq!(
            stmts,
            vec![Stmt::Assignment {
                name: "x".into(),
                value: expected
            }]
        );
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let stmts = statements("print (1 + 2) * 3");

        let expected = Expr::binary(
            BinaryOp::Mul,
            Expr::binary(BinaryOp::Add, Expr::Int(1), Expr::Int(2)),
            Expr::Int(3),
        );
        assert_eq!(stmts, vec![Stmt::Print(expected)]);
    }

    #[test]
    fn test_list_literal_elements() {
        let stmts = statements("seed l = [1, \"a\", x]");

        assert_eq!(
            stmts,
            vec![Stmt::Declaration {
                name: "l".into(),
                initializer: Some(Expr::List(vec![
                    Expr::Int(1),
                    Expr::Str("a".into()),
                    Expr::Identifier("x".into()),
                ])),
            }]
        );
        assert_eq!(
            statements("print []"),
            vec![Stmt::Print(Expr::List(vec![]))]
        );
    }

    #[test]
    fn test_list_elements_must_be_atoms() {
        let (expected, found) = syntax_error("print [1 + 2]");
        assert_eq!(expected, vec![TokenKind::RBRACKET]);
        assert_eq!(found, "PLUS");

        let (expected, _) = syntax_error("print [(1)]");
        assert_eq!(
            expected,
            vec![TokenKind::NUMBER, TokenKind::STRING, TokenKind::IDENTIFIER]
        );
    }

    #[test]
    fn test_conditional_multiline() {
        let source = "branch x > 1 then {\n  print 1\n} else {\n  print 2\n}\n";
        let stmts = statements(source);

        assert_eq!(
            stmts,
            vec![Stmt::Conditional {
                condition: Expr::binary(BinaryOp::Gt, Expr::Identifier("x".into()), Expr::Int(1)),
                then_branch: Block::new(vec![Stmt::Print(Expr::Int(1))]),
                else_branch: Some(Block::new(vec![Stmt::Print(Expr::Int(2))])),
            }]
        );
    }

    #[test]
    fn test_one_line_blocks() {
        let stmts = statements("branch 1 < 2 then { print \"yes\" } else { print \"no\" }");

        assert!(matches!(
            &stmts[..],
            [Stmt::Conditional {
                else_branch: Some(_),
                ..
            }]
        ));
    }

    #[test]
    fn test_else_on_following_line() {
        let stmts = statements("branch 1 == 1 then {\n}\nelse {\n}\n");

        assert!(matches!(
            &stmts[..],
            [Stmt::Conditional {
                else_branch: Some(b),
                ..
            }] if b.is_empty()
        ));
    }

    #[test]
    fn test_condition_requires_comparison() {
        let (expected, found) = syntax_error("branch x then {\n}");

        assert_eq!(
            expected,
            vec![
                TokenKind::GT,
                TokenKind::LT,
                TokenKind::EQ,
                TokenKind::LE,
                TokenKind::GE,
                TokenKind::NE
            ]
        );
        assert_eq!(found, "THEN");
    }

    #[test]
    fn test_parenthesized_condition() {
        let stmts = statements("grow while (x < 3) {\n  x = x + 1\n}");

        assert!(matches!(
            &stmts[..],
            [Stmt::While {
                condition: Expr::Binary { op: BinaryOp::Lt, .. },
                ..
            }]
        ));
    }

    #[test]
    fn test_chained_comparison_is_rejected() {
        assert!(parse("branch 1 < 2 < 3 then {\n}").is_err());
    }

    #[test]
    fn test_for_each_over_name_and_literal() {
        let stmts = statements("grow x in xs {\n  print x\n}\ngrow y in [1, 2] { print y }\n");

        assert_eq!(
            stmts,
            vec![
                Stmt::ForEach {
                    binding: "x".into(),
                    source: LoopSource::Name("xs".into()),
                    body: Block::new(vec![Stmt::Print(Expr::Identifier("x".into()))]),
                },
                Stmt::ForEach {
                    binding: "y".into(),
                    source: LoopSource::Literal(vec![Expr::Int(1), Expr::Int(2)]),
                    body: Block::new(vec![Stmt::Print(Expr::Identifier("y".into()))]),
                },
            ]
        );
    }

    #[test]
    fn test_grow_requires_identifier_or_while() {
        let (expected, found) = syntax_error("grow 1");

        assert_eq!(expected, vec![TokenKind::IDENTIFIER, TokenKind::WHILE]);
        assert_eq!(found, "NUMBER 1");
    }

    #[test]
    fn test_nested_blocks_close_on_one_line() {
        let stmts = statements("grow x in [1] { grow y in [2] { print y } }");

        let Stmt::ForEach { body, .. } = &stmts[0] else {
            panic!("expected a for-each loop");
        };
        assert!(matches!(&body.statements[..], [Stmt::ForEach { .. }]));
    }

    #[test]
    fn test_simple_statements_need_a_terminator() {
        let (expected, found) = syntax_error("print 1 print 2");

        assert_eq!(expected, vec![TokenKind::NEWLINE, TokenKind::EOF]);
        assert_eq!(found, "PRINT");
    }

    #[test]
    fn test_stray_closing_brace_at_top_level() {
        let (expected, found) = syntax_error("print 1 }");

        assert_eq!(expected, vec![TokenKind::NEWLINE, TokenKind::EOF]);
        assert_eq!(found, "RBRACE");
    }

    #[test]
    fn test_unclosed_block() {
        let (expected, found) = syntax_error("grow while 1 < 2 {\n  print 1\n");

        assert_eq!(expected, vec![TokenKind::RBRACE]);
        assert_eq!(found, "EOF");
    }

    #[test]
    fn test_block_must_be_followed_by_newline() {
        let (expected, _) = syntax_error("branch 1 < 2 then {\n} print 1");

        assert_eq!(
            expected,
            vec![TokenKind::NEWLINE, TokenKind::EOF, TokenKind::ELSE]
        );
    }

    #[test]
    fn test_statement_start_error_message() {
        let err = parse("then").unwrap_err();

        assert_eq!(
            err.to_string(),
            "[line 1] Syntax error: expected SEED, IDENTIFIER, BRANCH, GROW, PRINT or NEWLINE, found THEN"
        );
    }

    #[test]
    fn test_lexical_errors_surface_through_parse() {
        assert!(matches!(parse("seed x = #"), Err(ArborError::Lex { .. })));
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        assert!(statements("\n\n\n").is_empty());
        assert_eq!(statements("\nprint 1\n\n\nprint 2\n").len(), 2);
    }
}
