//! Traversal helpers.
//!
//! All traversals use explicit stacks and visit nodes in the same order a recursive depth-first
//! search would.

use super::{Graph, NodeId};

fn navigation<N, E, G>(g: &Graph<N, E, G>, v: NodeId) -> Vec<NodeId> {
    if g.is_directed() {
        g.successors(v)
    } else {
        g.neighbors(v)
    }
}

pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[NodeId]) -> Vec<NodeId> {
    let mut visited = vec![false; g.node_bound()];
    let mut out: Vec<NodeId> = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    for &root in roots {
        stack.push(root);
        while let Some(v) = stack.pop() {
            if !g.contains_node(v) || std::mem::replace(&mut visited[v.index()], true) {
                continue;
            }
            out.push(v);
            stack.extend(navigation(g, v).into_iter().rev());
        }
    }
    out
}

pub fn postorder<N, E, G>(g: &Graph<N, E, G>, roots: &[NodeId]) -> Vec<NodeId> {
    let mut visited = vec![false; g.node_bound()];
    let mut out: Vec<NodeId> = Vec::new();
    let mut stack: Vec<(NodeId, Vec<NodeId>, usize)> = Vec::new();
    for &root in roots {
        if !g.contains_node(root) || std::mem::replace(&mut visited[root.index()], true) {
            continue;
        }
        stack.push((root, navigation(g, root), 0));
        while let Some((v, next, i)) = stack.last_mut() {
            if let Some(&w) = next.get(*i) {
                *i += 1;
                if !std::mem::replace(&mut visited[w.index()], true) {
                    stack.push((w, navigation(g, w), 0));
                }
                continue;
            }
            out.push(*v);
            stack.pop();
        }
    }
    out
}

/// Weakly connected components, each in discovery order.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<NodeId>> {
    let mut visited = vec![false; g.node_bound()];
    let mut out: Vec<Vec<NodeId>> = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    for start in g.nodes() {
        let mut component: Vec<NodeId> = Vec::new();
        stack.push(start);
        while let Some(v) = stack.pop() {
            if std::mem::replace(&mut visited[v.index()], true) {
                continue;
            }
            component.push(v);
            let mut next = g.successors(v);
            next.extend(g.predecessors(v));
            stack.extend(next.into_iter().rev());
        }
        if !component.is_empty() {
            out.push(component);
        }
    }
    out
}

/// Strongly connected components that contain a cycle: every component with more than one
/// node, plus single nodes carrying a self-loop.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<NodeId>> {
    let bound = g.node_bound();
    let mut index: Vec<Option<usize>> = vec![None; bound];
    let mut low: Vec<usize> = vec![0; bound];
    let mut on_stack = vec![false; bound];
    let mut stack: Vec<NodeId> = Vec::new();
    let mut counter = 0usize;
    let mut sccs: Vec<Vec<NodeId>> = Vec::new();

    for root in g.nodes() {
        if index[root.index()].is_some() {
            continue;
        }
        let mut calls: Vec<(NodeId, Vec<NodeId>, usize)> = Vec::new();
        index[root.index()] = Some(counter);
        low[root.index()] = counter;
        counter += 1;
        stack.push(root);
        on_stack[root.index()] = true;
        calls.push((root, g.successors(root), 0));

        while let Some((v, next, i)) = calls.last_mut() {
            let v = *v;
            if let Some(&w) = next.get(*i) {
                *i += 1;
                match index[w.index()] {
                    None => {
                        index[w.index()] = Some(counter);
                        low[w.index()] = counter;
                        counter += 1;
                        stack.push(w);
                        on_stack[w.index()] = true;
                        calls.push((w, g.successors(w), 0));
                    }
                    Some(w_index) if on_stack[w.index()] => {
                        low[v.index()] = low[v.index()].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            if let Some((parent, _, _)) = calls.last() {
                low[parent.index()] = low[parent.index()].min(low[v.index()]);
            }
            if Some(low[v.index()]) == index[v.index()] {
                let mut scc: Vec<NodeId> = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w.index()] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                sccs.push(scc);
            }
        }
    }

    sccs.into_iter()
        .filter(|scc| scc.len() > 1 || has_self_loop(g, scc[0]))
        .collect()
}

fn has_self_loop<N, E, G>(g: &Graph<N, E, G>, v: NodeId) -> bool {
    g.out_edges_to(v, v).next().is_some()
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool {
    find_cycles(g).is_empty()
}
