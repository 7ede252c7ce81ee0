//! Prometheus text exposition format (version 0.0.4).
//!
//! Rendering is a pure function of a [`RegistrySnapshot`]: the same snapshot
//! always yields the same bytes.

use std::fmt::Write;

use super::RegistrySnapshot;

/// `Content-Type` of the `/metrics` response.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render every family as `# HELP`, `# TYPE ... gauge`, then one line per
/// series. Output is `\n`-terminated; an empty snapshot renders as "".
pub fn render(snapshot: &RegistrySnapshot) -> String {
    let mut out = String::new();

    for family in snapshot.families() {
        let _ = writeln!(out, "# HELP {} {}", family.name, escape_help(family.help));
        let _ = writeln!(out, "# TYPE {} gauge", family.name);

        for series in &family.series {
            out.push_str(family.name);
            if !series.labels.is_empty() {
                let label_str = series
                    .labels
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                let _ = write!(out, "{{{}}}", label_str);
            }
            let _ = writeln!(out, " {}", format_value(series.value));
        }
    }

    out
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Shortest round-trip form: `100`, `0.5`, `-3`. Non-finite values use the
/// spellings Prometheus parses.
fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::catalog::{SUBSCRIBERS, UP};
    use crate::metrics::{Labels, MetricDesc, Registry};

    #[test]
    fn render_empty() {
        assert_eq!(render(&Registry::new().snapshot()), "");
    }

    #[test]
    fn render_matches_reference_layout() {
        let reg = Registry::new();
        reg.set(SUBSCRIBERS, &Labels::subreddit("technology"), 17_234_567.0)
            .unwrap();
        reg.set(UP, &Labels::none(), 1.0).unwrap();

        let expected = "\
# HELP reddit_subscribers Number of subreddit subscribers
# TYPE reddit_subscribers gauge
reddit_subscribers{subreddit=\"technology\"} 17234567
# HELP up Exporter status: 1 = healthy, 0 = error
# TYPE up gauge
up 1
";
        assert_eq!(render(&reg.snapshot()), expected);
    }

    #[test]
    fn label_values_are_escaped() {
        let reg = Registry::new();
        reg.set(SUBSCRIBERS, &Labels::subreddit("a\\b\"c\nd"), 1.0)
            .unwrap();
        let out = render(&reg.snapshot());
        assert!(out.contains(r#"reddit_subscribers{subreddit="a\\b\"c\nd"} 1"#));
    }

    #[test]
    fn help_newlines_are_escaped() {
        let reg = Registry::new();
        let odd = MetricDesc {
            name: "odd",
            help: "line one\nline two",
        };
        reg.set(odd, &Labels::none(), 0.5).unwrap();
        let out = render(&reg.snapshot());
        assert!(out.starts_with("# HELP odd line one\\nline two\n"));
        assert!(out.ends_with("odd 0.5\n"));
    }

    #[test]
    fn multiple_labels_render_in_key_order() {
        let reg = Registry::new();
        let m = MetricDesc {
            name: "multi",
            help: "h",
        };
        let labels = Labels::none().with("zone", "eu").with("app", "x");
        reg.set(m, &labels, 2.0).unwrap();
        let out = render(&reg.snapshot());
        assert!(out.contains("multi{app=\"x\",zone=\"eu\"} 2\n"));
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_value(20.0), "20");
        assert_eq!(format_value(6.5), "6.5");
        assert_eq!(format_value(-3.0), "-3");
    }

    #[test]
    fn identical_snapshots_render_identically() {
        let reg = Registry::new();
        for name in ["c", "a", "b"] {
            reg.set(SUBSCRIBERS, &Labels::subreddit(name), 1.0).unwrap();
        }
        reg.set(UP, &Labels::none(), 1.0).unwrap();

        let first = render(&reg.snapshot());
        let second = render(&reg.snapshot());
        assert_eq!(first, second);

        let a = first.find("subreddit=\"a\"").unwrap();
        let b = first.find("subreddit=\"b\"").unwrap();
        let c = first.find("subreddit=\"c\"").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn every_sample_line_has_name_and_value() {
        let reg = Registry::new();
        reg.set(SUBSCRIBERS, &Labels::subreddit("rust"), 3.0).unwrap();
        reg.set(UP, &Labels::none(), 0.0).unwrap();

        for line in render(&reg.snapshot()).lines() {
            if line.starts_with('#') {
                continue;
            }
            let (series, value) = line.rsplit_once(' ').unwrap();
            assert!(!series.is_empty());
            assert!(value.parse::<f64>().is_ok(), "bad value in: {line}");
        }
    }
}
