use tracing::trace;

use super::context::{SearchContext, SearchSession};
use super::node::{NodeArena, NodeId, SearchNode};
use crate::plan::{ActionPlan, PlannedStep};
use crate::{ActionPlanner, Result, WorldState};

/// Number of goal-constrained conditions `state` gets wrong.
///
/// Admissible as long as no action fixes more goal conditions than it costs.
pub fn heuristic(state: &WorldState, goal: &WorldState) -> u32 {
    let care = goal.cared_mask();
    ((state.values() & care) ^ (goal.values() & care)).count_ones()
}

/// Run A* from `start` until a state matching `goal` is closed.
///
/// The viable action list must already be loaded into the session.
pub(crate) fn search(
    planner: &ActionPlanner,
    session: &mut SearchSession<'_>,
    start: WorldState,
    goal: WorldState,
    selected: Option<&mut Vec<SearchNode>>,
) -> Result<Option<ActionPlan>> {
    let SearchContext {
        arena,
        storage,
        transitions,
        viable,
        ..
    } = &mut **session;

    let root = arena.obtain(SearchNode::root(start, heuristic(&start, &goal)));
    storage.add_to_open(root)?;

    loop {
        let Some(current) = storage.remove_cheapest_open(arena) else {
            return Ok(None);
        };
        storage.add_to_closed(current)?;

        let node = *arena.get(current);
        if goal.matches(&node.state) {
            return reconstruct(planner, arena, current, selected).map(Some);
        }

        trace!(
            depth = node.depth,
            cost = node.cost_so_far,
            heuristic = node.heuristic,
            state = %node.state,
            "Expanding node"
        );

        planner.transitions_into(viable.as_slice(), &node.state, transitions);
        for transition in transitions.iter() {
            let cost = node.cost_so_far.saturating_add(transition.cost);

            let mut opened = storage.find_opened(arena, &transition.state);
            if let Some(id) = opened {
                if cost < arena.get(id).cost_so_far {
                    storage.remove_opened(id);
                    opened = None;
                }
            }

            let mut closed = storage.find_closed(arena, &transition.state);
            if let Some(id) = closed {
                if cost < arena.get(id).cost_so_far {
                    storage.remove_closed(id);
                    closed = None;
                }
            }

            if opened.is_some() || closed.is_some() {
                continue;
            }

            let h = heuristic(&transition.state, &goal);
            let id = arena.obtain(SearchNode {
                state: transition.state,
                parent_state: node.state,
                cost_so_far: cost,
                heuristic: h,
                total_cost: cost.saturating_add(h),
                action: Some(transition.action),
                parent: Some(current),
                depth: node.depth + 1,
            });
            storage.add_to_open(id)?;
        }
    }
}

/// Walk parent links from the goal node, stacking actions so the one nearest
/// the root ends up on top.
fn reconstruct(
    planner: &ActionPlanner,
    arena: &NodeArena,
    goal_node: NodeId,
    selected: Option<&mut Vec<SearchNode>>,
) -> Result<ActionPlan> {
    let goal = arena.get(goal_node);
    let mut plan = ActionPlan::new(goal.cost_so_far);
    let mut path = selected
        .is_some()
        .then(|| Vec::with_capacity(goal.depth as usize));

    let mut cursor = Some(goal_node);
    while let Some(id) = cursor {
        let node = arena.get(id);
        if let Some(action) = node.action {
            plan.push(PlannedStep {
                id: action,
                action: planner.action(action)?.clone(),
            });
        }
        if let Some(path) = path.as_mut() {
            path.push(*node);
        }
        cursor = node.parent;
    }

    if let (Some(selected), Some(mut path)) = (selected, path) {
        path.reverse();
        selected.clear();
        selected.extend(path);
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_counts_only_goal_bits() {
        let goal = WorldState::new().with(0, true).with(1, false);
        let state = WorldState::new().with(0, false).with(1, true).with(2, true);
        assert_eq!(heuristic(&state, &goal), 2);

        let unconstrained = WorldState::new();
        assert_eq!(heuristic(&state, &unconstrained), 0);
    }
}
