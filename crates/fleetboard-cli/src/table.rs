use fleetboard_engine::{
    CoverageCell, DeltaCell, DerivedCell, DerivedRow, ExpandState, PipelineCell, UnitTestCell,
};
use fleetboard_model::DashboardSchema;

const NOT_AVAILABLE: &str = "N/A";

/// Renders derived rows as an aligned text table. Which view a
/// list-valued cell shows is read from the expand state, exactly as a
/// graphical renderer would.
#[must_use]
pub fn render_table(
    schema: &DashboardSchema,
    rows: &[DerivedRow],
    expand: &ExpandState,
) -> String {
    let defs = schema.field_defs();
    let headers: Vec<String> = defs.iter().map(|d| d.title.clone()).collect();
    let mut body: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in rows {
        let mut line = Vec::with_capacity(defs.len());
        for (def, cell) in defs.iter().zip(&row.cells) {
            let expanded = expand.is_expanded(&row.project, &def.id);
            line.push(cell_text(cell, expanded));
        }
        body.push(line);
    }

    let mut widths: Vec<usize> = headers.iter().map(String::len).collect();
    for line in &body {
        for (idx, text) in line.iter().enumerate() {
            widths[idx] = widths[idx].max(text.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for line in &body {
        push_row(&mut out, line, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(text, width)| format!("{text:<width$}"))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

fn cell_text(cell: &DerivedCell, expanded: bool) -> String {
    match cell {
        DerivedCell::Repository { name, .. } => {
            name.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())
        }
        DerivedCell::Tags { tags } => tags.join(", "),
        DerivedCell::Delta(delta) => match delta {
            DeltaCell::NeedsAction { count, .. } => count.to_string(),
            DeltaCell::Clean => "0".to_string(),
            DeltaCell::NotAvailable => NOT_AVAILABLE.to_string(),
        },
        DerivedCell::Coverage(coverage) => match coverage {
            CoverageCell::Healthy { percent } | CoverageCell::NeedsAttention { percent } => {
                format_percent(*percent)
            }
            CoverageCell::NotAvailable => NOT_AVAILABLE.to_string(),
        },
        DerivedCell::UnitTests(unit) => match unit {
            UnitTestCell::Counts {
                passed,
                skipped,
                failed,
                total,
            } => format!("{passed} / {skipped} / {failed} / {total}"),
            UnitTestCell::NotAvailable => NOT_AVAILABLE.to_string(),
        },
        DerivedCell::Branches(branches) => {
            if expanded {
                branches
                    .expanded
                    .iter()
                    .map(|b| b.name.clone())
                    .collect::<Vec<_>>()
                    .join(", ")
            } else if branches.count == 1 {
                "1 branch".to_string()
            } else {
                format!("{} branches", branches.count)
            }
        }
        DerivedCell::PullRequests(prs) => {
            if prs.count == 0 {
                String::new()
            } else if expanded {
                prs.expanded
                    .iter()
                    .map(|pr| {
                        let fields = pr
                            .fields
                            .iter()
                            .filter(|f| f.label != "Pull Request ID")
                            .map(|f| format!("{}={}", f.label, f.value))
                            .collect::<Vec<_>>()
                            .join(", ");
                        format!("{}: {fields}", pr.id)
                    })
                    .collect::<Vec<_>>()
                    .join("; ")
            } else {
                prs.collapsed
                    .iter()
                    .map(|pr| pr.id.clone())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        DerivedCell::Pipeline(pipeline) => match pipeline {
            PipelineCell::Single { status, .. } => status.as_str().to_string(),
            PipelineCell::Group { summary, detail } => {
                if expanded {
                    detail
                        .iter()
                        .map(|p| format!("{}={}", p.name, p.status))
                        .collect::<Vec<_>>()
                        .join(", ")
                } else {
                    format!("{} [{}]", summary.label, summary.rollup)
                }
            }
            PipelineCell::NotAvailable => NOT_AVAILABLE.to_string(),
        },
    }
}

fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{percent:.0}%")
    } else {
        format!("{percent}%")
    }
}
