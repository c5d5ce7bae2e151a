/// Toleration set rendering.
///
/// An absent `toleration_seconds` leaves out the `Toleration Seconds` row of
/// the pretty layout and renders as an empty `TolerationSeconds=` in the
/// oneline and diff layouts, so their field order stays fixed.
use std::collections::BTreeMap;
use std::fmt::Write as _;

use super::{COLUMN_GAP, ListFormat, pretty_tabs};
use crate::api::{Toleration, TolerationSet};

/// Render every process type's tolerations in `format`.
#[must_use]
pub fn render_tolerations(set: &TolerationSet, format: ListFormat) -> String {
    let mut out = String::new();
    for (proc_type, tolerations) in set {
        match format {
            ListFormat::Oneline => {
                let _ = write!(out, "{proc_type}:");
                for (identifier, t) in tolerations {
                    let _ = write!(
                        out,
                        " {identifier}|Key={},Operator={},Value={},Effect={},TolerationSeconds={}",
                        t.key,
                        t.operator,
                        t.value,
                        t.effect,
                        seconds(t)
                    );
                }
                out.push_str(";\n");
            }
            ListFormat::Diff => {
                let _ = writeln!(out, "{proc_type}:");
                for (identifier, t) in tolerations {
                    let _ = writeln!(out, "---- {identifier}");
                    let _ = writeln!(out, "    Key={}", t.key);
                    let _ = writeln!(out, "    Operator={}", t.operator);
                    let _ = writeln!(out, "    Value={}", t.value);
                    let _ = writeln!(out, "    Effect={}", t.effect);
                    let _ = writeln!(out, "    TolerationSeconds={}", seconds(t));
                }
            }
            ListFormat::Pretty => {
                let _ = writeln!(out, "=== {proc_type} Tolerations");
                for (identifier, t) in tolerations {
                    let _ = writeln!(out, "---- {identifier}");
                    out.push_str(&pretty_tabs(&rows(t), COLUMN_GAP));
                }
            }
        }
    }
    out
}

fn seconds(t: &Toleration) -> String {
    t.toleration_seconds.map(|s| s.to_string()).unwrap_or_default()
}

/// Flatten a toleration into the rows of its pretty table. `Operator` is
/// always present, the rest only when set.
fn rows(t: &Toleration) -> BTreeMap<&'static str, String> {
    let mut rows = BTreeMap::new();
    if !t.key.is_empty() {
        rows.insert("Key", t.key.clone());
    }
    rows.insert("Operator", t.operator.clone());
    if !t.value.is_empty() {
        rows.insert("Value", t.value.clone());
    }
    if !t.effect.is_empty() {
        rows.insert("Effect", t.effect.clone());
    }
    if let Some(s) = t.toleration_seconds {
        rows.insert("Toleration Seconds", s.to_string());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> Toleration {
        Toleration {
            key: "somekey".to_owned(),
            operator: "Equal".to_owned(),
            value: "somevalue".to_owned(),
            effect: "NoSchedule".to_owned(),
            toleration_seconds: Some(300),
        }
    }

    fn set(entries: Vec<(&str, &str, Toleration)>) -> TolerationSet {
        let mut set = TolerationSet::new();
        for (group, id, t) in entries {
            set.entry(group.to_owned())
                .or_default()
                .insert(id.to_owned(), t);
        }
        set
    }

    #[test]
    fn test_pretty() {
        let s = set(vec![("cmd", "toleration-test", full())]);
        assert_eq!(
            render_tolerations(&s, ListFormat::Pretty),
            "=== cmd Tolerations\n\
             ---- toleration-test\n\
             Effect                  NoSchedule\n\
             Key                     somekey\n\
             Operator                Equal\n\
             Toleration Seconds      300\n\
             Value                   somevalue\n"
        );
    }

    #[test]
    fn test_oneline() {
        let s = set(vec![("cmd", "toleration-test", full())]);
        assert_eq!(
            render_tolerations(&s, ListFormat::Oneline),
            "cmd: toleration-test|Key=somekey,Operator=Equal,Value=somevalue,Effect=NoSchedule,TolerationSeconds=300;\n"
        );
    }

    #[test]
    fn test_diff() {
        let s = set(vec![("cmd", "toleration-test", full())]);
        assert_eq!(
            render_tolerations(&s, ListFormat::Diff),
            "cmd:\n---- toleration-test\n    Key=somekey\n    Operator=Equal\n    Value=somevalue\n    Effect=NoSchedule\n    TolerationSeconds=300\n"
        );
    }

    #[test]
    fn test_pretty_skips_empty_fields_but_keeps_operator() {
        let t = Toleration {
            operator: "Exists".to_owned(),
            toleration_seconds: Some(0),
            ..Toleration::default()
        };
        let s = set(vec![("web", "any", t)]);
        assert_eq!(
            render_tolerations(&s, ListFormat::Pretty),
            "=== web Tolerations\n---- any\nOperator                Exists\nToleration Seconds      0\n"
        );
    }

    #[test]
    fn test_absent_seconds_differs_from_zero() {
        let t = Toleration {
            key: "dedicated".to_owned(),
            operator: "Equal".to_owned(),
            ..Toleration::default()
        };
        let s = set(vec![("web", "gpu", t)]);

        assert_eq!(
            render_tolerations(&s, ListFormat::Pretty),
            "=== web Tolerations\n---- gpu\nKey           dedicated\nOperator      Equal\n"
        );
        assert_eq!(
            render_tolerations(&s, ListFormat::Oneline),
            "web: gpu|Key=dedicated,Operator=Equal,Value=,Effect=,TolerationSeconds=;\n"
        );
        assert!(
            render_tolerations(&s, ListFormat::Diff).ends_with("    TolerationSeconds=\n")
        );
    }

    #[test]
    fn test_identifiers_and_groups_sorted() {
        let s = set(vec![
            ("worker", "b", full()),
            ("cmd", "z", full()),
            ("cmd", "a", full()),
        ]);
        let out = render_tolerations(&s, ListFormat::Oneline);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("cmd: a|"));
        assert!(lines[0].contains(" z|"));
        assert!(lines[1].starts_with("worker: b|"));
    }
}
