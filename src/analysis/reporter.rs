use crate::error::Result;
use crate::models::{Category, ExportEntry, FailureRecord, Report};

const RULE_WIDTH: usize = 60;

pub struct Reporter {
    example_limit: usize,
}

impl Reporter {
    pub fn new(example_limit: usize) -> Self {
        Self { example_limit }
    }

    /// Groups classified records by category, keeping log order inside
    /// each group.
    pub fn build<'a, I>(&self, assignments: I) -> Report
    where
        I: IntoIterator<Item = (&'a FailureRecord, Category)>,
    {
        let mut report = Report::empty();

        for (record, category) in assignments {
            report.push(
                category,
                ExportEntry {
                    sequence_number: record.sequence_number,
                    title: record.title.clone(),
                },
            );
        }

        report
    }

    pub fn render_summary(&self, report: &Report) -> String {
        let mut output = String::new();

        output.push_str(&format!("Failure categories (total: {})\n", report.total()));
        output.push_str(&"=".repeat(RULE_WIDTH));
        output.push('\n');

        if report.is_empty() {
            output.push_str("\nNo failures found.\n");
            return output;
        }

        for group in report.ranked() {
            let percentage = report.percentage(group.category).unwrap_or(0.0);
            output.push_str(&format!(
                "\n{}: {} ({:.1}%)\n",
                group.category,
                group.count(),
                percentage
            ));

            for entry in group.entries.iter().take(self.example_limit) {
                output.push_str(&format!("   {}) {}\n", entry.sequence_number, entry.title));
            }

            if group.count() > self.example_limit {
                output.push_str(&format!(
                    "   ... and {} more\n",
                    group.count() - self.example_limit
                ));
            }
        }

        output
    }

    pub fn render_export(&self, report: &Report) -> Result<String> {
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXAMPLE_LIMIT)
    }
}
