use anyhow::Context;
use owo_colors::OwoColorize;

use bcd_planner::planner;
use bcd_planner::scenario::Scenario;

use crate::output::{use_color, OutputConfig};

pub fn plan(scenario_path: Option<&std::path::Path>, demo: bool, out: &OutputConfig) -> anyhow::Result<()> {
    let scenario = load_scenario(scenario_path, demo)?;
    let output = planner::plan(&scenario).context("planning failed")?;

    if !out.quiet {
        for diagnostic in &output.degenerate_cells {
            eprintln!("warning: {diagnostic}");
        }
    }

    let human = format_summary(&output);
    let json = serde_json::to_value(&output).context("failed to serialize plan output")?;
    out.emit(&human, &json)
}

pub fn demo(out: &OutputConfig) -> anyhow::Result<()> {
    let scenario = Scenario::demo();
    let human = format!(
        "{} x {} workspace, {} obstacle(s), start {:?} in cell {}, robot radius {}",
        scenario.width,
        scenario.height,
        scenario.polygons.len(),
        scenario.start,
        scenario.start_cell_index,
        scenario.robot_radius
    );
    let json = serde_json::to_value(&scenario).context("failed to serialize scenario")?;
    out.emit(&human, &json)
}

fn load_scenario(path: Option<&std::path::Path>, demo: bool) -> anyhow::Result<Scenario> {
    if demo {
        return Ok(Scenario::demo());
    }
    let path = path.context("either a scenario path or --demo is required")?;
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Scenario::from_json(&data).with_context(|| format!("failed to parse {}", path.display()))
}

fn format_summary(output: &planner::PlanOutput) -> String {
    let header = if use_color() {
        "coverage plan".bold().to_string()
    } else {
        "coverage plan".to_string()
    };
    format!(
        "{header}\n  cells: {}\n  trajectory points: {}\n  degenerate cells: {}",
        output.cell_graph.len(),
        output.trajectory.len(),
        output.degenerate_cells.len(),
    )
}
