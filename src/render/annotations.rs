/// Annotation set rendering.
use std::fmt::Write as _;

use super::{COLUMN_GAP, ListFormat, pretty_tabs};
use crate::api::AnnotationSet;

/// Render every process type's annotations in `format`.
///
/// Process types and keys come out in lexicographic order. The oneline layout
/// is `<type>: k=v k=v`, which [`parse_key_values`](crate::parse::parse_key_values)
/// reads back as long as values contain no whitespace.
#[must_use]
pub fn render_annotations(set: &AnnotationSet, format: ListFormat) -> String {
    let mut out = String::new();
    for (proc_type, annotations) in set {
        match format {
            ListFormat::Oneline => {
                let _ = write!(out, "{proc_type}:");
                for (key, value) in annotations {
                    let _ = write!(out, " {key}={value}");
                }
                out.push('\n');
            }
            ListFormat::Diff => {
                let _ = writeln!(out, "{proc_type}:");
                for (key, value) in annotations {
                    let _ = writeln!(out, "    {key}={value}");
                }
            }
            ListFormat::Pretty => {
                let _ = writeln!(out, "=== {proc_type} Annotations");
                out.push_str(&pretty_tabs(annotations, COLUMN_GAP));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::parse::parse_key_values;

    fn set(entries: &[(&str, &str, &str)]) -> AnnotationSet {
        let mut set = AnnotationSet::new();
        for (group, key, value) in entries {
            set.entry((*group).to_owned())
                .or_default()
                .insert((*key).to_owned(), (*value).to_owned());
        }
        set
    }

    fn fixture() -> AnnotationSet {
        set(&[
            ("cmd", "k8s.json/annotation", r#"{"hello":"world"}"#),
            ("cmd", "k8s.annotation", "testing"),
            ("cmd", "k8s.another/annotation", "anotherone"),
        ])
    }

    #[test]
    fn test_pretty_simple() {
        let s = set(&[("cmd", "b", "2"), ("cmd", "a", "1")]);
        assert_eq!(
            render_annotations(&s, ListFormat::Pretty),
            "=== cmd Annotations\na      1\nb      2\n"
        );
    }

    #[test]
    fn test_oneline_simple() {
        let s = set(&[("cmd", "b", "2"), ("cmd", "a", "1")]);
        assert_eq!(render_annotations(&s, ListFormat::Oneline), "cmd: a=1 b=2\n");
    }

    #[test]
    fn test_pretty_fixture() {
        assert_eq!(
            render_annotations(&fixture(), ListFormat::Pretty),
            "=== cmd Annotations\n\
             k8s.annotation              testing\n\
             k8s.another/annotation      anotherone\n\
             k8s.json/annotation         {\"hello\":\"world\"}\n"
        );
    }

    #[test]
    fn test_oneline_fixture() {
        assert_eq!(
            render_annotations(&fixture(), ListFormat::Oneline),
            "cmd: k8s.annotation=testing k8s.another/annotation=anotherone k8s.json/annotation={\"hello\":\"world\"}\n"
        );
    }

    #[test]
    fn test_diff_fixture() {
        assert_eq!(
            render_annotations(&fixture(), ListFormat::Diff),
            "cmd:\n    k8s.annotation=testing\n    k8s.another/annotation=anotherone\n    k8s.json/annotation={\"hello\":\"world\"}\n"
        );
    }

    #[test]
    fn test_groups_sorted_in_every_format() {
        let s = set(&[("worker", "z", "1"), ("web", "y", "2"), ("cmd", "x", "3")]);
        for format in [ListFormat::Pretty, ListFormat::Oneline, ListFormat::Diff] {
            let out = render_annotations(&s, format);
            let cmd = out.find("cmd").unwrap();
            let web = out.find("web").unwrap();
            let worker = out.find("worker").unwrap();
            assert!(cmd < web && web < worker, "{format:?}: {out}");
        }
    }

    #[test]
    fn test_oneline_reparses() {
        let s = set(&[
            ("cmd", "b", "2"),
            ("cmd", "a", "1"),
            ("cmd", "url", "http://x?y=z"),
        ]);
        let line = render_annotations(&s, ListFormat::Oneline);
        let body = line.trim_end().strip_prefix("cmd:").unwrap();
        let tokens: Vec<&str> = body.split_whitespace().collect();
        let parsed: BTreeMap<String, String> = parse_key_values(&tokens).unwrap();
        assert_eq!(&parsed, &s["cmd"]);
    }

    #[test]
    fn test_empty_set() {
        let s = AnnotationSet::new();
        assert_eq!(render_annotations(&s, ListFormat::Pretty), "");
    }

    proptest! {
        #[test]
        fn prop_oneline_reparses(
            set in prop::collection::btree_map(
                "[a-z][a-z0-9-]{0,8}",
                prop::collection::btree_map("[A-Za-z_][A-Za-z0-9_./-]{0,12}", "[!-~]{1,16}", 1..8),
                0..4,
            )
        ) {
            let rendered = render_annotations(&set, ListFormat::Oneline);
            let mut parsed = AnnotationSet::new();
            for line in rendered.lines() {
                let (proc_type, body) = line.split_once(':').unwrap();
                let tokens: Vec<&str> = body.split_whitespace().collect();
                parsed.insert(proc_type.to_owned(), parse_key_values(&tokens).unwrap());
            }
            prop_assert_eq!(parsed, set);
        }
    }
}
