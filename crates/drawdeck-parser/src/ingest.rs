//! Reading pages and cells out of the XML tree.

use log::{debug, trace, warn};
use roxmltree::Node;

use drawdeck_core::{geometry::Point, style::Style};

use crate::{
    error::FormatError,
    model::{Cell, CellKind, Geometry},
    span::Span,
};

const GRAPH_MODEL: &str = "mxGraphModel";

/// A graph model found in the document, with the name of its page.
pub(crate) struct ModelRef<'a, 'input> {
    pub name: String,
    pub model: Node<'a, 'input>,
}

/// Finds the graph models of a document.
///
/// A root `mxGraphModel` is a single page. Otherwise every `diagram` child of
/// the root that holds a model becomes a page, and failing that a direct model
/// child of the root is used.
pub(crate) fn locate_models<'a, 'input>(
    root: Node<'a, 'input>,
) -> Result<Vec<ModelRef<'a, 'input>>, FormatError> {
    if root.has_tag_name(GRAPH_MODEL) {
        return Ok(vec![ModelRef {
            name: default_page_name(0),
            model: root,
        }]);
    }

    let mut models = Vec::new();
    let diagrams = root.children().filter(|node| node.has_tag_name("diagram"));
    for (index, diagram) in diagrams.enumerate() {
        let name = diagram
            .attribute("name")
            .filter(|name| !name.is_empty())
            .map_or_else(|| default_page_name(index), str::to_string);

        match child_element(diagram, GRAPH_MODEL) {
            Some(model) => models.push(ModelRef { name, model }),
            None => warn!(page = name; "Skipping diagram without an inline graph model"),
        }
    }

    if models.is_empty() {
        let model = child_element(root, GRAPH_MODEL).ok_or(FormatError::MissingGraphModel)?;
        models.push(ModelRef {
            name: default_page_name(0),
            model,
        });
    }

    Ok(models)
}

fn default_page_name(index: usize) -> String {
    format!("Page-{}", index + 1)
}

/// Reads the cells under the model's `<root>` element in document order.
///
/// A model without `<root>` has no cells.
pub(crate) fn read_cells(model: Node) -> Vec<Cell> {
    let Some(root) = child_element(model, "root") else {
        debug!("Graph model has no root element");
        return Vec::new();
    };

    root.children()
        .filter(Node::is_element)
        .filter_map(read_cell)
        .collect()
}

fn read_cell(node: Node) -> Option<Cell> {
    let span = Span::new(node.range());
    match node.tag_name().name() {
        "mxCell" => cell_from(node, node.attribute("id"), node.attribute("value"), span),
        "UserObject" | "object" => {
            let inner = child_element(node, "mxCell")?;
            cell_from(inner, node.attribute("id"), node.attribute("label"), span)
        }
        other => {
            trace!(tag = other; "Ignoring element inside root");
            None
        }
    }
}

fn cell_from(node: Node, id: Option<&str>, value: Option<&str>, span: Span) -> Option<Cell> {
    let Some(id) = id else {
        debug!("Ignoring cell without id");
        return None;
    };

    let kind = if is_set(node, "vertex") {
        CellKind::Vertex
    } else if is_set(node, "edge") {
        CellKind::Edge
    } else {
        CellKind::Container
    };

    let style_raw = node.attribute("style").unwrap_or_default().to_string();
    let style = Style::parse(&style_raw);

    Some(Cell {
        id: id.to_string(),
        value: value.unwrap_or_default().to_string(),
        style_raw,
        style,
        geometry: child_element(node, "mxGeometry").map(read_geometry),
        kind,
        parent: non_empty(node.attribute("parent")),
        source: non_empty(node.attribute("source")),
        target: non_empty(node.attribute("target")),
        span,
    })
}

fn read_geometry(node: Node) -> Geometry {
    let offset = node
        .children()
        .find(|child| child.has_tag_name("mxPoint") && child.attribute("as") == Some("offset"))
        .map(|point| Point::new(number(point, "x"), number(point, "y")));

    Geometry::new(
        number(node, "x"),
        number(node, "y"),
        number(node, "width"),
        number(node, "height"),
    )
    .with_relative(is_set(node, "relative"))
    .with_offset(offset)
}

/// Reads a numeric attribute; missing or unparseable values are 0.
fn number(node: Node, name: &str) -> f32 {
    let Some(raw) = node.attribute(name) else {
        return 0.0;
    };
    match raw.trim().parse::<f32>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            debug!(attribute = name, value = raw; "Unparseable geometry number, using 0");
            0.0
        }
    }
}

fn is_set(node: Node, name: &str) -> bool {
    node.attribute(name) == Some("1")
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_string)
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(name))
}
