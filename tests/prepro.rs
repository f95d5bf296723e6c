#[cfg(test)]
mod prepro_tests {
    use arbor::prepro::filter;

    #[test]
    fn test_strips_line_comments() {
        assert_eq!(
            filter("seed x = 1 // the seed\n// whole line\nprint x"),
            "seed x = 1 \n\nprint x"
        );
    }

    #[test]
    fn test_collapses_tab_runs() {
        assert_eq!(filter("\t\tprint\t1"), " print 1");
    }

    #[test]
    fn test_trims_trailing_whitespace() {
        assert_eq!(filter("print 1\n\n  \n"), "print 1");
    }

    #[test]
    fn test_slashes_in_strings_are_comments_too() {
        assert_eq!(filter("print \"http://x\""), "print \"http:");
    }

    #[test]
    fn test_filtered_program_runs() {
        let source = "seed n = 2 // two\n\tgrow while n > 0 {\n\t\tprint n\n\t\tn = n - 1\n\t}\n\n";
        let out = arbor::run(&filter(source), Vec::new()).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "2\n1\n");
    }
}
