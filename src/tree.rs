// Keybot - A key-binding script compiler targeting the BASIC Stamp 2p
// Copyright (C) 2026  Keybot contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Plain-text rendering of the parse tree.
//!
//! Two-pass layout: a measuring pass computes the column width of each
//! subtree, then a painting pass writes labels and box-drawing
//! connectors into a character grid. Every node level occupies two
//! grid rows (label row plus connector row). The same tree always
//! renders to the same text.

use crate::ast::AstNode;

/// Columns of blank space between adjacent sibling subtrees.
const SIBLING_SPACING: usize = 2;

/// Render a parse tree as ASCII art, one subtree column per node.
pub fn render_tree(root: &AstNode) -> String {
    let width = measure_width(root);
    let depth = measure_depth(root);
    let mut grid = vec![vec![' '; width]; depth * 2 - 1];

    paint(root, &mut grid, 0, 0, width);

    let mut lines: Vec<String> = grid
        .iter()
        .map(|row| {
            row.iter()
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

/// Columns needed by a subtree: the label, or the children side by
/// side with spacing, whichever is wider.
fn measure_width(node: &AstNode) -> usize {
    let label_width = node.label().chars().count();
    if node.is_leaf() {
        return label_width.max(1);
    }
    let children_width: usize = node.children.iter().map(measure_width).sum::<usize>()
        + SIBLING_SPACING * (node.children.len() - 1);
    label_width.max(children_width)
}

fn measure_depth(node: &AstNode) -> usize {
    1 + node
        .children
        .iter()
        .map(measure_depth)
        .max()
        .unwrap_or(0)
}

/// Paint a subtree into the grid, centered within `[start_x, start_x + width)`
/// with its label on row `y`.
///
/// Returns the column of the label's center, where a connector from
/// the parent should attach.
fn paint(node: &AstNode, grid: &mut [Vec<char>], start_x: usize, y: usize, width: usize) -> usize {
    let label: Vec<char> = node.label().chars().collect();
    let label_x = start_x + (width - label.len()) / 2;
    for (i, ch) in label.iter().enumerate() {
        grid[y][label_x + i] = *ch;
    }
    let center = label_x + (label.len() - 1) / 2;

    if node.is_leaf() {
        return center;
    }

    // Lay the children out left to right, the whole row centered
    // under this node.
    let children_width: usize = node.children.iter().map(measure_width).sum::<usize>()
        + SIBLING_SPACING * (node.children.len() - 1);
    let mut child_x = start_x + (width - children_width) / 2;

    let mut child_centers = Vec::with_capacity(node.children.len());
    for child in &node.children {
        let child_width = measure_width(child);
        let child_center = paint(child, grid, child_x, y + 2, child_width);
        child_centers.push(child_center);
        child_x += child_width + SIBLING_SPACING;
    }

    let connector_y = y + 1;
    if child_centers.len() == 1 {
        grid[connector_y][child_centers[0]] = '│';
        return center;
    }

    let leftmost = child_centers[0];
    let rightmost = child_centers[child_centers.len() - 1];
    for x in leftmost..=rightmost {
        grid[connector_y][x] = '─';
    }
    for (i, &child_center) in child_centers.iter().enumerate() {
        grid[connector_y][child_center] = if i == 0 {
            '┌'
        } else if i == child_centers.len() - 1 {
            '┐'
        } else {
            '┬'
        };
    }
    grid[connector_y][center] = if child_centers.contains(&center) {
        '┼'
    } else {
        '┴'
    };

    center
}
