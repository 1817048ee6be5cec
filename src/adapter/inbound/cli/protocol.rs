//! Munin plugin protocol text.
//!
//! Field labels (including the `Comitted` spelling) are part of the graph
//! definitions already stored by existing Munin masters and must not change.

use crate::domain::{MemoryPoolUsageSnapshot, SnapshotField};

/// Graph declaration printed in `config` mode.
pub const SCHEMA: &str = "\
graph_title PeakUsageTenuredGen
graph_vlabel Bytes
graph_category Tomcat
graph_info The peak memory usage of this memory pool since the Java virtual machine was started or since the peak was reset.
Comitted.label Comitted
Comitted.info The amount of memory (in bytes) that is guaranteed to be available for use by the Java virtual machine.
Comitted.draw AREA
Max.label Max
Max.info The maximum amount of memory (in bytes) that can be used for memory management.
Max.draw AREA
Used.label Used
Used.info The amount of memory currently used (in bytes).
Init.label Init
Init.info The initial amount of memory (in bytes) that the Java virtual machine requests from the operating system for memory management during startup.
Init.draw AREA
Threshold.label Threshold
Threshold.info  The usage threshold value of this memory pool in bytes.
";

/// Value lines in emission order. Munin matches fields by label, but the
/// order is kept stable for consumers that read lines positionally.
pub const METRICS: [(&str, SnapshotField); 5] = [
    ("Max", SnapshotField::Max),
    ("Comitted", SnapshotField::Committed),
    ("Used", SnapshotField::Used),
    ("Init", SnapshotField::Init),
    ("Threshold", SnapshotField::UsageThreshold),
];

/// Munin's marker for an unknown value.
pub const UNKNOWN_VALUE: &str = "U";

/// Render the five `<Label>.value N` lines for `snapshot`.
#[must_use]
pub fn render_values(snapshot: &MemoryPoolUsageSnapshot) -> String {
    let fields = snapshot.fields();
    let mut out = String::new();
    for (label, wanted) in METRICS {
        let value = fields
            .iter()
            .find(|(field, _)| *field == wanted)
            .and_then(|(_, value)| *value)
            .map_or_else(|| UNKNOWN_VALUE.to_string(), |v| v.to_string());
        out.push_str(label);
        out.push_str(".value ");
        out.push_str(&value);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemoryUsage;

    fn snapshot(threshold: Option<u64>) -> MemoryPoolUsageSnapshot {
        MemoryPoolUsageSnapshot::new(
            MemoryUsage {
                committed: 536_870_912,
                init: 268_435_456,
                max: 1_073_741_824,
                used: 402_653_184,
            },
            threshold,
        )
    }

    #[test]
    fn values_follow_label_order() {
        assert_eq!(
            render_values(&snapshot(Some(900_000_000))),
            "Max.value 1073741824\n\
             Comitted.value 536870912\n\
             Used.value 402653184\n\
             Init.value 268435456\n\
             Threshold.value 900000000\n"
        );
    }

    #[test]
    fn unsupported_threshold_renders_unknown() {
        let rendered = render_values(&snapshot(None));
        assert!(rendered.ends_with("Threshold.value U\n"));
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn every_snapshot_field_is_rendered_once() {
        let rendered = render_values(&snapshot(Some(1)));
        for (field, value) in snapshot(Some(1)).fields() {
            let labels: Vec<&str> = METRICS
                .iter()
                .filter(|(_, metric)| *metric == field)
                .map(|(label, _)| *label)
                .collect();
            assert_eq!(labels.len(), 1, "{field:?}");
            let line = format!("{}.value {}\n", labels[0], value.unwrap());
            assert!(rendered.contains(&line), "{line}");
        }
    }

    #[test]
    fn schema_declares_every_value_label() {
        for (label, _) in METRICS {
            assert!(SCHEMA.contains(&format!("\n{label}.label {label}\n")));
        }
        assert!(SCHEMA.starts_with("graph_title PeakUsageTenuredGen\n"));
        assert!(SCHEMA.ends_with("Threshold.info  The usage threshold value of this memory pool in bytes.\n"));
        assert_eq!(SCHEMA.lines().count(), 17);
    }
}
