#[cfg(test)]
mod verify {
    use plastix::parsing;
    use plastix::rendering::{self, Diagnostic, Output, GRAPHICX};
    use plastix::templating::{self, Article};

    fn convert(content: &str) -> Output {
        let document = parsing::parse(content).unwrap();
        rendering::render(&document)
    }

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    #[test]
    fn footnote_bodies_before_markers() {
        let output = convert("#: First.\n#: Second.\nOne^# two^#\n");
        assert_eq!(
            output.body,
            "One\\footnote{First.} two\\footnote{Second.}\n"
        );
        assert!(output
            .diagnostics
            .is_empty());
    }

    #[test]
    fn footnote_bodies_after_markers() {
        let output = convert("One^# two^#\n#: First.\n#: Second.\n");
        assert_eq!(
            output.body,
            "One\\footnote{First.} two\\footnote{Second.}\n"
        );
    }

    #[test]
    fn more_markers_than_bodies() {
        let output = convert("a^# b^#\n#: only\n");
        assert_eq!(output.body, "a\\footnote{only} b\n");
        assert_eq!(output.diagnostics, vec![Diagnostic::FootnoteUnderflow(2)]);
    }

    #[test]
    fn missing_reference_renders_empty() {
        let output = convert("See [nowhere].\n");
        assert_eq!(output.body, "See .\n");
        assert_eq!(
            output.diagnostics,
            vec![Diagnostic::UndefinedReference("nowhere".to_string())]
        );
    }

    #[test]
    fn citation_from_definition() {
        let output = convert("As shown [knuth].\n\n[knuth]: The *TeXbook*\n");
        assert_eq!(output.body, "As shown \\cite{The \\textbf{TeXbook}}.\n\n");
    }

    #[test]
    fn definition_before_use() {
        let output = convert("[note]: some text\n\nSee [note]\n");
        assert_eq!(output.body, "\nSee \\cite{some text}\n");
        assert!(output
            .diagnostics
            .is_empty());
    }

    #[test]
    fn footnote_cites_later_definition() {
        let output = convert("Claim^#.\n#: As in [knuth].\n[knuth]: The TeXbook\n");
        assert_eq!(output.body, "Claim\\footnote{As in \\cite{The TeXbook}}.\n");
        assert!(output
            .diagnostics
            .is_empty());
    }

    #[test]
    fn overview_sample_resolves_cleanly() {
        let content = parsing::load(std::path::Path::new("tests/samples/overview.px")).unwrap();
        let output = convert(&content);
        assert!(output
            .body
            .contains("\\footnote{The second footnote, pointing at \\cite{Donald Knuth, \\textit{The TeXbook}, Addison Wesley}.}"));
        assert!(output
            .diagnostics
            .is_empty());
    }

    #[test]
    fn plain_text_unchanged() {
        let content = "Costs 5% more, (roughly) $3 & change.\nSecond line!\n";
        let output = convert(content);
        assert_eq!(
            output.body,
            "Costs 5% more, (roughly) $3 & change. Second line!\n"
        );
    }

    #[test]
    fn figure_label_reference() {
        let output = convert("!plot.png fig:plot\nThe plot.\n\nSee [fig:plot].\n");
        assert_eq!(
            output.body,
            trim(
                r#"
\begin{figure}[h]
\centering
\includegraphics{plot.png}
\caption{The plot.}
\label{fig:plot}
\end{figure}

See \ref{fig:plot}.
"#
            )
        );
        assert_eq!(output.preamble, vec![GRAPHICX]);
    }

    #[test]
    fn escaped_characters() {
        assert_eq!(convert("a \\* b\n").body, "a * b\n");
        assert_eq!(convert("x\\_y\n").body, "x\\_y\n");
        assert_eq!(convert("\\[not a ref\\]\n").body, "[not a ref]\n");
    }

    #[test]
    fn nested_styling() {
        assert_eq!(convert("*//x//*\n").body, "\\textbf{\\textit{x}}\n");
        assert_eq!(
            convert("_a <b:green>_\n").body,
            "\\underline{a \\textcolor{green}{b}}\n"
        );
    }

    #[test]
    fn nested_list_environments() {
        let output = convert("# item1\n  * sub1\n# item2\n");
        assert_eq!(
            output.body,
            trim(
                r#"
\begin{enumerate}
\item item1
\begin{itemize}
\item sub1
\end{itemize}
\item item2
\end{enumerate}
"#
            )
        );
    }

    #[test]
    fn table_environment() {
        let output = convert("---\n|a|b|\n---\n|c|d|\n---\n");
        assert_eq!(
            output.body,
            trim(
                r#"
\begin{tabular}{|l|l|}
\hline
a & b \\
\hline
c & d \\
\hline
\end{tabular}
"#
            )
        );
    }

    #[test]
    fn complete_document() {
        let output = convert("= Title\n\nHello.\n");
        let result = templating::fill(&Article::default(), &output).unwrap();

        assert_eq!(
            result,
            trim(
                r#"
\documentclass{article}
\usepackage[utf8]{inputenc}
\usepackage[T1]{fontenc}
\usepackage{lmodern}
\usepackage[english]{babel}
\begin{document}
\section{Title}

Hello.
\end{document}
"#
            )
        );
    }

    #[test]
    fn colour_package_added_once() {
        let output = convert("<a:red> <b:#00ff00> <c:(1,2,3)>\n");
        let result = templating::fill(&Article::default(), &output).unwrap();

        assert_eq!(
            result
                .matches("\\usepackage{xcolor}")
                .count(),
            1
        );
        assert!(result.contains("\\textcolor[HTML]{00FF00}{b}"));
    }
}
