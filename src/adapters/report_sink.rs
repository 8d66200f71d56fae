use crate::domain::model::{MarkReport, ReportLine};
use crate::domain::ports::ReportSink;
use crate::utils::error::Result;
use crate::utils::text::{dot_or_colon, plural_suffix};

/// Writes the report to the diagnostic log, one event per line.
#[derive(Debug, Clone)]
pub struct TracingReportSink {
    noun: String,
}

impl TracingReportSink {
    pub fn new(noun: impl Into<String>) -> Self {
        Self { noun: noun.into() }
    }

    pub fn summary(&self, report: &MarkReport) -> String {
        let n = report.total_elements;
        let groups = report.group_count();
        format!(
            "{} {}{} found, {} {} mark{}{}",
            n,
            self.noun,
            plural_suffix(n),
            groups,
            self.noun,
            plural_suffix(groups),
            dot_or_colon(groups)
        )
    }

    pub fn line(&self, line: &ReportLine) -> String {
        format!(
            "  {}: {} {}{}",
            line.mark,
            line.count,
            self.noun,
            plural_suffix(line.count)
        )
    }

    pub fn render(&self, report: &MarkReport) -> Vec<String> {
        std::iter::once(self.summary(report))
            .chain(report.lines.iter().map(|line| self.line(line)))
            .collect()
    }
}

impl ReportSink for TracingReportSink {
    fn emit(&mut self, report: &MarkReport) -> Result<()> {
        for line in self.render(report) {
            tracing::info!("{}", line);
        }
        Ok(())
    }
}

/// Collects reports in memory.
impl ReportSink for Vec<MarkReport> {
    fn emit(&mut self, report: &MarkReport) -> Result<()> {
        self.push(report.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> MarkReport {
        MarkReport {
            total_elements: 3,
            lines: vec![
                ReportLine {
                    mark: "A".to_string(),
                    count: 2,
                },
                ReportLine {
                    mark: "B".to_string(),
                    count: 1,
                },
            ],
        }
    }

    #[test]
    fn test_render_lines() {
        let sink = TracingReportSink::new("door");
        assert_eq!(
            sink.render(&report()),
            vec![
                "3 doors found, 2 door marks:",
                "  A: 2 doors",
                "  B: 1 door",
            ]
        );
    }

    #[test]
    fn test_single_group_summary() {
        let sink = TracingReportSink::new("window");
        let report = MarkReport {
            total_elements: 1,
            lines: vec![ReportLine {
                mark: String::new(),
                count: 1,
            }],
        };
        assert_eq!(sink.summary(&report), "1 window found, 1 window mark:");
        assert_eq!(sink.line(&report.lines[0]), "  : 1 window");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<MarkReport> = Vec::new();
        sink.emit(&report()).unwrap();
        assert_eq!(sink, vec![report()]);
    }
}
