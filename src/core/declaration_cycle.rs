//! Detects `type` declarations that contain themselves through plain
//! (non-list, non-map) property references and so can never be constructed.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::core::ast::{Object, ObjectKind};
use crate::core::error::{Diagnostic, SemanticErrorKind};
use crate::core::token::TokenKind;

struct Frame {
    node: usize,
    next_edge: usize,
}

/// Walks every type declaration depth-first and reports each cycle once, at
/// the type where the cycle closes.
pub fn detect(objects: &[Object]) -> Vec<Diagnostic> {
    let nodes: Vec<&Object> = objects.iter().filter(|o| o.kind == ObjectKind::Type).collect();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, o) in nodes.iter().enumerate() {
        index.entry(o.name.as_str()).or_insert(i);
    }
    let edges: Vec<Vec<usize>> = nodes
        .iter()
        .map(|o| {
            o.properties
                .iter()
                .filter_map(|p| p.ty.as_ref())
                .filter(|ty| ty.kind() == TokenKind::Identifier)
                .filter_map(|ty| index.get(ty.token.lexeme.as_str()).copied())
                .collect()
        })
        .collect();

    let mut diags = Vec::new();
    let mut reported = vec![false; nodes.len()];
    let mut seen_cycles: HashSet<Vec<usize>> = HashSet::new();

    for root in 0..nodes.len() {
        let mut on_path = vec![false; nodes.len()];
        let mut path: Vec<usize> = vec![root];
        let mut stack = vec![Frame { node: root, next_edge: 0 }];
        on_path[root] = true;

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            let Some(&target) = edges[node].get(frame.next_edge) else {
                on_path[node] = false;
                path.pop();
                stack.pop();
                continue;
            };
            frame.next_edge += 1;

            if !on_path[target] {
                on_path[target] = true;
                path.push(target);
                stack.push(Frame { node: target, next_edge: 0 });
                continue;
            }

            let Some(start) = path.iter().position(|&n| n == target) else { continue };
            let cycle = &path[start..];
            if reported[target] || !seen_cycles.insert(canonical(cycle)) {
                continue;
            }
            reported[target] = true;

            let rendered = cycle
                .iter()
                .chain(std::iter::once(&target))
                .map(|&n| nodes[n].name.as_str())
                .collect::<Vec<_>>()
                .join("->");
            debug!("declaration cycle: {}", rendered);
            if let Some(token) = &nodes[target].name_token {
                diags.push(Diagnostic::semantic(
                    SemanticErrorKind::DeclarationCycle,
                    token,
                    format!("Declaration cycle detected: {}", rendered),
                ));
            }
        }
    }
    diags
}

// Rotation of the cycle that starts at its smallest node, so A->B->A and
// B->A->B compare equal.
fn canonical(cycle: &[usize]) -> Vec<usize> {
    let pivot = cycle
        .iter()
        .enumerate()
        .min_by_key(|&(_, n)| *n)
        .map(|(i, _)| i)
        .unwrap_or(0);
    cycle[pivot..].iter().chain(&cycle[..pivot]).copied().collect()
}
