//! Building a page from its cells: the id table and absolute positioning.

use std::collections::{HashMap, HashSet};

use log::debug;

use drawdeck_core::geometry::{Bounds, Point};

use crate::{
    error::FormatError,
    model::{Cell, CellKind, Edge, EdgeLabel, Page, Vertex},
};

/// Per-page cell arena with an id index.
struct CellTable {
    cells: Vec<Cell>,
    index: HashMap<String, usize>,
}

impl CellTable {
    /// Indexes cells by id. A later cell with an id already seen replaces the
    /// earlier one in its slot.
    fn new(cells: Vec<Cell>) -> Self {
        let mut table = Self {
            cells: Vec::with_capacity(cells.len()),
            index: HashMap::with_capacity(cells.len()),
        };
        for cell in cells {
            match table.index.get(&cell.id) {
                Some(&slot) => {
                    debug!(cell_id = cell.id; "Duplicate cell id, keeping the later cell");
                    table.cells[slot] = cell;
                }
                None => {
                    table.index.insert(cell.id.clone(), table.cells.len());
                    table.cells.push(cell);
                }
            }
        }
        table
    }

    fn get(&self, id: &str) -> Option<&Cell> {
        self.index.get(id).map(|&slot| &self.cells[slot])
    }

    /// The top-left corner of `cell` in page coordinates.
    ///
    /// Walks up the parent chain adding each vertex ancestor's local origin.
    /// The walk ends at the first ancestor that is not a vertex or that is
    /// missing from the page.
    fn absolute_origin(&self, cell: &Cell) -> Result<Point, FormatError> {
        let mut origin = cell.geometry.map(|g| g.origin()).unwrap_or_default();
        let mut visited = HashSet::from([cell.id.as_str()]);
        let mut parent = cell.parent.as_deref();

        while let Some(parent_id) = parent {
            if !visited.insert(parent_id) {
                return Err(FormatError::CyclicParent {
                    cell_id: cell.id.clone(),
                    span: cell.span,
                });
            }
            let Some(ancestor) = self.get(parent_id) else {
                break;
            };
            if ancestor.kind != CellKind::Vertex {
                break;
            }
            if let Some(geometry) = ancestor.geometry {
                origin = origin.add_point(geometry.origin());
            }
            parent = ancestor.parent.as_deref();
        }

        Ok(origin)
    }

    fn parent_is_edge(&self, cell: &Cell) -> bool {
        cell.parent
            .as_deref()
            .and_then(|id| self.get(id))
            .is_some_and(|parent| parent.kind == CellKind::Edge)
    }
}

/// Builds a page from its cells in document order.
///
/// Vertices get absolute bounds; vertices without geometry are dropped. A
/// vertex with relative geometry under an edge becomes an extra label of that
/// edge. Edges are kept with their raw source and target ids.
pub(crate) fn build_page(name: String, cells: Vec<Cell>) -> Result<Page, FormatError> {
    let table = CellTable::new(cells);
    let mut page = Page {
        name,
        ..Page::default()
    };

    for cell in &table.cells {
        match cell.kind {
            CellKind::Vertex => {
                let Some(geometry) = cell.geometry else {
                    debug!(cell_id = cell.id; "Skipping vertex without geometry");
                    continue;
                };
                if geometry.relative() && table.parent_is_edge(cell) {
                    let edge_id = cell.parent.clone().unwrap_or_default();
                    page.edge_labels.push(EdgeLabel::new(edge_id, cell.clone()));
                    continue;
                }
                let origin = table.absolute_origin(cell)?;
                let bounds = Bounds::new_from_top_left(origin, geometry.size());
                page.vertices.push(Vertex::new(cell.clone(), bounds));
            }
            CellKind::Edge => page.edges.push(Edge::new(cell.clone())),
            CellKind::Container => {}
        }
    }

    debug!(
        page = page.name,
        vertices = page.vertices.len(),
        edges = page.edges.len(),
        edge_labels = page.edge_labels.len();
        "Page built"
    );
    Ok(page)
}

#[cfg(test)]
mod tests {
    use drawdeck_core::style::Style;

    use super::*;
    use crate::{model::Geometry, span::Span};

    fn cell(id: &str, kind: CellKind, parent: Option<&str>, geometry: Option<Geometry>) -> Cell {
        Cell {
            id: id.to_string(),
            value: String::new(),
            style_raw: String::new(),
            style: Style::default(),
            geometry,
            kind,
            parent: parent.map(str::to_string),
            source: None,
            target: None,
            span: Span::default(),
        }
    }

    fn vertex(id: &str, parent: &str, x: f32, y: f32) -> Cell {
        cell(
            id,
            CellKind::Vertex,
            Some(parent),
            Some(Geometry::new(x, y, 10.0, 10.0)),
        )
    }

    fn layers() -> Vec<Cell> {
        vec![
            cell("0", CellKind::Container, None, None),
            cell("1", CellKind::Container, Some("0"), None),
        ]
    }

    #[test]
    fn test_nested_origins_accumulate() {
        let mut cells = layers();
        cells.push(vertex("group", "1", 100.0, 50.0));
        cells.push(vertex("inner", "group", 10.0, 5.0));
        cells.push(vertex("leaf", "inner", 1.0, 2.0));

        let page = build_page("p".into(), cells).unwrap();
        let leaf = page.vertex("leaf").unwrap();
        assert_eq!(leaf.bounds().min_point(), Point::new(111.0, 57.0));
        assert_eq!(page.vertex("group").unwrap().bounds().min_point(), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_ancestor_without_geometry_contributes_zero() {
        let mut cells = layers();
        cells.push(vertex("outer", "1", 20.0, 20.0));
        cells.push(cell("bare", CellKind::Vertex, Some("outer"), None));
        cells.push(vertex("leaf", "bare", 1.0, 1.0));

        let page = build_page("p".into(), cells).unwrap();
        assert_eq!(page.vertex("leaf").unwrap().bounds().min_point(), Point::new(21.0, 21.0));
        assert!(page.vertex("bare").is_none());
    }

    #[test]
    fn test_missing_parent_stops_walk() {
        let cells = vec![vertex("orphan", "nowhere", 7.0, 8.0)];
        let page = build_page("p".into(), cells).unwrap();
        assert_eq!(page.vertex("orphan").unwrap().bounds().min_point(), Point::new(7.0, 8.0));
    }

    #[test]
    fn test_cycle_detected() {
        let mut cells = layers();
        cells.push(vertex("a", "b", 0.0, 0.0));
        cells.push(vertex("b", "a", 0.0, 0.0));

        let err = build_page("p".into(), cells).unwrap_err();
        assert!(matches!(err, FormatError::CyclicParent { ref cell_id, .. } if cell_id == "a"));
    }

    #[test]
    fn test_self_parent_is_cycle() {
        let cells = vec![vertex("loop", "loop", 0.0, 0.0)];
        assert!(matches!(
            build_page("p".into(), cells),
            Err(FormatError::CyclicParent { .. })
        ));
    }

    #[test]
    fn test_duplicate_id_later_wins() {
        let mut cells = layers();
        cells.push(vertex("dup", "1", 1.0, 1.0));
        cells.push(vertex("other", "1", 5.0, 5.0));
        cells.push(vertex("dup", "1", 9.0, 9.0));

        let page = build_page("p".into(), cells).unwrap();
        let ids: Vec<_> = page.vertices().iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["dup", "other"]);
        assert_eq!(page.vertex("dup").unwrap().bounds().min_point(), Point::new(9.0, 9.0));
    }

    #[test]
    fn test_edge_label_children() {
        let mut cells = layers();
        cells.push(vertex("a", "1", 0.0, 0.0));
        cells.push(cell("e", CellKind::Edge, Some("1"), None));
        cells.push(cell(
            "lbl",
            CellKind::Vertex,
            Some("e"),
            Some(Geometry::new(-0.5, 0.0, 0.0, 0.0).with_relative(true)),
        ));

        let page = build_page("p".into(), cells).unwrap();
        assert_eq!(page.vertices().len(), 1);
        assert_eq!(page.edges().len(), 1);
        let labels: Vec<_> = page.labels_of("e").map(|l| l.cell().id()).collect();
        assert_eq!(labels, vec!["lbl"]);
    }
}
