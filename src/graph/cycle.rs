/// DFS state of a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    /// On the current DFS stack.
    Open,
    /// Fully explored; no cycle is reachable through it.
    Visited,
}

/// Three-color DFS over `edges`, rooted in vertex order.
///
/// Stops at the first back edge and returns the vertices along that cycle,
/// starting and ending with the vertex the back edge points to. The search
/// keeps its own stack of `(vertex, next edge)` frames.
pub(super) fn first_cycle(edges: &[Vec<usize>]) -> Option<Vec<usize>> {
    let mut marks = vec![Mark::Unvisited; edges.len()];
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..edges.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        log::trace!("Cycle search from vertex {}", root);
        marks[root] = Mark::Open;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (vertex, cursor) = *frame;
            let Some(&next) = edges[vertex].get(cursor) else {
                marks[vertex] = Mark::Visited;
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match marks[next] {
                Mark::Open => {
                    let start = stack.iter().position(|&(v, _)| v == next).unwrap_or(0);
                    let mut cycle: Vec<usize> = stack[start..].iter().map(|&(v, _)| v).collect();
                    cycle.push(next);
                    return Some(cycle);
                }
                Mark::Unvisited => {
                    marks[next] = Mark::Open;
                    stack.push((next, 0));
                }
                Mark::Visited => {}
            }
        }
    }
    None
}
