//! Property-based tests for the result alignment table

use brv_results::alignment::{BenchmarkKeyed, ResultAlignmentTable};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    name: String,
    tool: usize,
}

impl BenchmarkKeyed for Entry {
    fn benchmark_name(&self) -> &str {
        &self.name
    }
}

proptest! {
    /// After N tools every row has exactly N slots, filled where reported
    #[test]
    fn rows_are_dense(tools in proptest::collection::vec(
        proptest::collection::btree_set("[a-e]", 0..4),
        0..6,
    )) {
        let mut table = ResultAlignmentTable::new();
        for (tool, names) in tools.iter().enumerate() {
            table.add(names.iter().map(|name| Entry { name: name.clone(), tool }));
        }

        let n = tools.len();
        for (name, row) in table.get_rows() {
            prop_assert_eq!(row.len(), n);
            for (tool, slot) in row.iter().enumerate() {
                let reported = tools[tool].contains(name);
                prop_assert_eq!(slot.is_some(), reported);
                if let Some(entry) = slot {
                    prop_assert_eq!(entry.tool, tool);
                }
            }
        }

        let all: BTreeSet<&String> = tools.iter().flatten().collect();
        prop_assert_eq!(table.len(), all.len());
    }
}
