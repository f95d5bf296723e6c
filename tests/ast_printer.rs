#[cfg(test)]
mod ast_printer_tests {
    use arbor::ast::{BinaryOp, Expr};
    use arbor::ast_printer::AstPrinter;
    use arbor::parse;

    fn dump(source: &str) -> String {
        AstPrinter::print(&parse(source).expect("source should parse"))
    }

    #[test]
    fn test_declaration_and_print() {
        assert_eq!(
            dump("seed x = 1 + 2\nprint x"),
            "Block\n\
             \x20 Declaration\n\
             \x20   Identifier(x)\n\
             \x20   BinOp(+)\n\
             \x20     IntVal(1)\n\
             \x20     IntVal(2)\n\
             \x20 Print\n\
             \x20   Identifier(x)\n"
        );
    }

    #[test]
    fn test_conditional_sections() {
        let out = dump("branch a == \"b\" then { print 1 } else { x = [1] }");

        let expected = [
            "Block",
            "  Conditional",
            "    Condition:",
            "      BinOp(==)",
            "        Identifier(a)",
            "        StrVal(b)",
            "    Then:",
            "      Block",
            "        Print",
            "          IntVal(1)",
            "    Else:",
            "      Block",
            "        Assignment",
            "          Identifier(x)",
            "          ListVal",
            "            IntVal(1)",
        ];
        assert_eq!(out.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_loops() {
        let out = dump("grow while i < 2 {\n}\ngrow v in xs {\n}\ngrow w in [3] {\n}");

        let expected = [
            "Block",
            "  WhileLoop",
            "    Condition:",
            "      BinOp(<)",
            "        Identifier(i)",
            "        IntVal(2)",
            "    Body:",
            "      Block",
            "  InLoop(var: v, list: xs)",
            "    Body:",
            "      Block",
            "  InLoop(var: w)",
            "    List:",
            "      ListVal",
            "        IntVal(3)",
            "    Body:",
            "      Block",
        ];
        assert_eq!(out.lines().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_single_expression() {
        let expr = Expr::binary(BinaryOp::Div, Expr::Int(4), Expr::Identifier("d".into()));

        assert_eq!(
            AstPrinter::print_expr(&expr),
            "BinOp(/)\n  IntVal(4)\n  Identifier(d)\n"
        );
    }
}
