//! CLI command implementations.

use colored::Colorize;
use deptree_core::DependencySource;
use deptree_graph::PatternGraph;
use deptree_model::{
    DependencyTreeModel, ExpansionState, ItemRole, ModelConfig, ModelEvent, ModelIndex,
    Orientation, RootFilter, TreeStateManager,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub struct ShowOptions<'a> {
    pub graph: &'a Path,
    pub depth: usize,
    pub filter: Option<&'a str>,
    pub state: Option<&'a Path>,
    pub config: Option<&'a Path>,
    pub json: bool,
}

/// A row as printed: its nesting level and index.
struct Row {
    level: usize,
    index: ModelIndex,
}

/// Print the dependency tree of a graph.
pub fn show(options: &ShowOptions<'_>) -> Result<()> {
    let config = match options.config {
        Some(path) => ModelConfig::load(path)?,
        None => ModelConfig::default(),
    };
    let mut model = load_model(options.graph, config)?;

    let expanded = expand_to_depth(&mut model, options.depth);
    let restored = match options.state {
        Some(path) => restore_state(&mut model, path)?,
        None => 0,
    };
    debug!("Expanded {} rows, restored {}", expanded, restored);

    let filter = RootFilter::new(options.filter.unwrap_or(""));
    let rows = collect_rows(&model, &filter);

    if options.json {
        let rows: Vec<_> = rows.iter().map(|row| row_json(&model, row)).collect();
        let header = model
            .header_data(0, Orientation::Horizontal, ItemRole::Display)
            .as_text()
            .map(str::to_string);
        let output = serde_json::json!({
            "header": header,
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(header) = model
        .header_data(0, Orientation::Horizontal, ItemRole::Display)
        .as_text()
    {
        println!("{}", header.cyan().bold());
    }

    if rows.is_empty() {
        println!("  {}", "(empty)".dimmed());
        return Ok(());
    }

    for row in &rows {
        print_row(&model, row);
    }

    Ok(())
}

/// Show the structural changes between two versions of a graph.
pub fn diff(old: &Path, new: &Path, depth: usize, json: bool) -> Result<()> {
    let events = diff_events(old, new, depth)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("{} No structural changes", "✓".green());
        return Ok(());
    }

    println!("{} {} changes:\n", "Δ".cyan(), events.len());
    for event in &events {
        let label = event.to_string();
        let label = match event {
            ModelEvent::RowsInserted { .. } => label.green(),
            ModelEvent::RowsRemoved { .. } => label.red(),
            ModelEvent::RowsMoved { .. } => label.yellow(),
            _ => label.normal(),
        };
        println!("  {}", label);
    }

    Ok(())
}

/// Print the path of every materialized row.
pub fn paths(graph: &Path, depth: usize) -> Result<()> {
    let mut model = load_model(graph, ModelConfig::default())?;
    expand_to_depth(&mut model, depth);

    for row in collect_rows(&model, &RootFilter::default()) {
        if let Some(path) = model.path(&row.index) {
            println!("{}", path);
        }
    }

    Ok(())
}

fn load_model(path: &Path, config: ModelConfig) -> Result<DependencyTreeModel<PatternGraph>> {
    let graph = PatternGraph::load(path)?;
    let stats = graph.stats();
    info!(
        "Loaded {} objects, {} dependencies, {} pieces from {}",
        stats.object_count,
        stats.dependency_count,
        stats.pieces,
        path.display()
    );

    let roots = graph.roots();
    let mut model = DependencyTreeModel::with_config(graph, config);
    model.set_root_objects(&roots);
    model.take_events();

    Ok(model)
}

/// Expands every row down to `depth` levels the way a view would.
fn expand_to_depth<D: DependencySource>(model: &mut DependencyTreeModel<D>, depth: usize) -> usize {
    let mut expanded = 0;
    let mut pending = vec![(ModelIndex::invalid(), 0)];

    while let Some((parent, level)) = pending.pop() {
        if level >= depth {
            continue;
        }
        for row in 0..model.row_count(&parent) {
            let index = model.index(row, 0, &parent);
            if model.can_fetch_more(&index) {
                model.fetch_more(&index);
                expanded += 1;
            }
            pending.push((index, level + 1));
        }
    }

    expanded
}

fn restore_state<D: DependencySource>(model: &mut DependencyTreeModel<D>, path: &Path) -> Result<usize> {
    let json = fs::read_to_string(path)?;
    let state: ExpansionState = serde_json::from_str(&json)?;
    model.set_expanded_nodes(state);

    let mut manager = TreeStateManager::new();
    manager.sync_from_model(model);
    Ok(manager.restore_state(model, |_| {}))
}

fn diff_events(old: &Path, new: &Path, depth: usize) -> Result<Vec<ModelEvent>> {
    let mut model = load_model(old, ModelConfig::default())?;
    expand_to_depth(&mut model, depth);
    model.take_events();

    let graph = PatternGraph::load(new)?;
    let roots = graph.roots();
    model.set_document(graph);
    model.update_tree(&roots);

    Ok(model.take_events())
}

/// Rows in display order, skipping top-level rows the filter rejects.
fn collect_rows<D: DependencySource>(model: &DependencyTreeModel<D>, filter: &RootFilter) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut pending: Vec<Row> = filter
        .visible_rows(model)
        .into_iter()
        .rev()
        .map(|row| Row {
            level: 0,
            index: model.index(row, 0, &ModelIndex::invalid()),
        })
        .collect();

    while let Some(row) = pending.pop() {
        for child in (0..model.row_count(&row.index)).rev() {
            pending.push(Row {
                level: row.level + 1,
                index: model.index(child, 0, &row.index),
            });
        }
        rows.push(row);
    }

    rows
}

fn print_row<D: DependencySource>(model: &DependencyTreeModel<D>, row: &Row) {
    let marker = if model.can_fetch_more(&row.index) && model.has_children(&row.index) {
        "▸"
    } else if model.row_count(&row.index) > 0 {
        "▾"
    } else {
        "•"
    };
    let name = model
        .data(&row.index, ItemRole::Display)
        .as_text()
        .unwrap_or_default()
        .to_string();
    let id = model
        .object_id(&row.index)
        .map(|id| format!("#{}", id))
        .unwrap_or_default();

    print!("{}{} {} {}", "  ".repeat(row.level + 1), marker, name.cyan(), id.dimmed());
    if let Some(tooltip) = model
        .data(&row.index, ItemRole::ToolTip)
        .as_text()
        .filter(|t| !t.is_empty())
    {
        print!("  {}", tooltip.dimmed());
    }
    println!();
}

fn row_json<D: DependencySource>(model: &DependencyTreeModel<D>, row: &Row) -> serde_json::Value {
    serde_json::json!({
        "path": model.path(&row.index),
        "name": model.data(&row.index, ItemRole::Display).as_text(),
        "tooltip": model.data(&row.index, ItemRole::ToolTip).as_text(),
        "level": row.level,
        "has_children": model.has_children(&row.index),
        "loaded": !model.can_fetch_more(&row.index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const OLD: &str = r#"{
        "objects": [
            { "id": 1, "type": "tool", "tool": "base_point", "name": "A" },
            { "id": 2, "type": "tool", "tool": "base_point", "name": "B" },
            { "id": 3, "type": "tool", "tool": "line", "points": ["A", "B"] },
            { "id": 4, "type": "piece", "name": "Front" }
        ],
        "edges": [
            { "object": 1, "dependent": 3 },
            { "object": 3, "dependent": 4 }
        ],
        "roots": [1, 2]
    }"#;

    const NEW: &str = r#"{
        "objects": [
            { "id": 1, "type": "tool", "tool": "base_point", "name": "A" },
            { "id": 2, "type": "tool", "tool": "base_point", "name": "B" },
            { "id": 3, "type": "tool", "tool": "line", "points": ["A", "B"] },
            { "id": 4, "type": "piece", "name": "Front" },
            { "id": 5, "type": "piece", "name": "Back" }
        ],
        "edges": [
            { "object": 1, "dependent": 3 },
            { "object": 3, "dependent": 4 },
            { "object": 3, "dependent": 5 }
        ],
        "roots": [2, 1]
    }"#;

    fn write_graph(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_expand_to_depth() {
        let file = write_graph(OLD);
        let mut model = load_model(file.path(), ModelConfig::default()).unwrap();

        assert_eq!(expand_to_depth(&mut model, 0), 0);
        assert_eq!(expand_to_depth(&mut model, 2), 3);

        let rows = collect_rows(&model, &RootFilter::default());
        let paths: Vec<_> = rows
            .iter()
            .filter_map(|row| model.path(&row.index))
            .collect();
        assert_eq!(paths, vec!["1", "1/3", "1/3/4", "2"]);
        assert!(!model.can_fetch_more(&model.find_index_by_path("1/3")));
        assert!(model.can_fetch_more(&model.find_index_by_path("1/3/4")));
    }

    #[test]
    fn test_collect_rows_applies_filter() {
        let file = write_graph(OLD);
        let mut model = load_model(file.path(), ModelConfig::default()).unwrap();
        expand_to_depth(&mut model, 3);

        let rows = collect_rows(&model, &RootFilter::new("a"));
        let names: Vec<_> = rows
            .iter()
            .map(|row| {
                model
                    .data(&row.index, ItemRole::Display)
                    .as_text()
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();
        assert_eq!(names, vec!["A", "Line_A_B", "Front"]);
        assert_eq!(rows[2].level, 2);
    }

    #[test]
    fn test_restore_state_from_file() {
        let file = write_graph(OLD);
        let state = write_graph(r#"["1", "1/3", "9/9"]"#);
        let mut model = load_model(file.path(), ModelConfig::default()).unwrap();

        let restored = restore_state(&mut model, state.path()).unwrap();

        assert_eq!(restored, 2);
        assert!(model.find_index_by_path("1/3/4").is_valid());
    }

    #[test]
    fn test_diff_events() {
        let old = write_graph(OLD);
        let new = write_graph(NEW);

        let events = diff_events(old.path(), new.path(), 2).unwrap();

        assert_eq!(
            events,
            vec![
                ModelEvent::RowsMoved {
                    parent: None,
                    from: 1,
                    to: 0
                },
                ModelEvent::RowsInserted {
                    parent: Some("1/3".to_string()),
                    first: 1,
                    last: 1
                },
            ]
        );
    }

    #[test]
    fn test_load_model_missing_file() {
        assert!(load_model(Path::new("/nonexistent/graph.json"), ModelConfig::default()).is_err());
    }
}
