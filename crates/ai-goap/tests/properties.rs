use ai_goap::{Action, ActionId, ActionPlanner, WorldState};
use proptest::prelude::*;

const CONDITIONS: usize = 3;
const NAMES: [&str; CONDITIONS] = ["c0", "c1", "c2"];

#[derive(Debug, Clone)]
struct ActionShape {
    pre: Vec<(usize, bool)>,
    post: (usize, bool),
    cost: u32,
    valid: bool,
}

fn action_shape() -> impl Strategy<Value = ActionShape> {
    (
        prop::collection::vec((0..CONDITIONS, any::<bool>()), 0..=2),
        (0..CONDITIONS, any::<bool>()),
        1u32..=5,
        prop::bool::weighted(0.8),
    )
        .prop_map(|(pre, post, cost, valid)| ActionShape {
            pre,
            post,
            cost,
            valid,
        })
}

fn build(shapes: &[ActionShape]) -> (ActionPlanner, Vec<ActionId>) {
    let mut planner = ActionPlanner::new();
    for name in NAMES {
        planner.find_or_create_condition_index(name).unwrap();
    }
    let ids = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| {
            let mut action = Action::new(format!("a{i}")).with_cost(shape.cost);
            for (cond, value) in &shape.pre {
                action.set_precondition(NAMES[*cond], *value);
            }
            action.set_postcondition(NAMES[shape.post.0], shape.post.1);
            let valid = shape.valid;
            planner
                .add_action(action.with_validator(move || valid))
                .unwrap()
        })
        .collect();
    (planner, ids)
}

fn full_state(bits: u64) -> WorldState {
    (0..CONDITIONS).fold(WorldState::new(), |state, i| {
        state.with(i, bits & (1 << i) != 0)
    })
}

/// Exact cheapest cost to reach `goal` over all fully specified states.
fn brute_force_cost(
    planner: &ActionPlanner,
    usable: &[ActionId],
    start: WorldState,
    goal: WorldState,
) -> Option<u32> {
    let states: Vec<WorldState> = (0..(1u64 << CONDITIONS)).map(full_state).collect();
    let index_of = |s: &WorldState| states.iter().position(|x| x == s);

    let mut best = vec![u32::MAX; states.len()];
    best[index_of(&start)?] = 0;
    // Bellman-Ford: at most |states| - 1 rounds.
    for _ in 0..states.len() {
        for from in 0..states.len() {
            if best[from] == u32::MAX {
                continue;
            }
            for &id in usable {
                let pre = planner.preconditions(id).unwrap();
                if !pre.matches(&states[from]) {
                    continue;
                }
                let next = planner.apply_postconditions(id, &states[from]).unwrap();
                let to = index_of(&next)?;
                let cost = best[from] + planner.action(id).unwrap().cost();
                if cost < best[to] {
                    best[to] = cost;
                }
            }
        }
    }

    states
        .iter()
        .zip(&best)
        .filter(|(state, cost)| **cost != u32::MAX && goal.matches(state))
        .map(|(_, cost)| *cost)
        .min()
}

proptest! {
    #[test]
    fn planner_cost_matches_exhaustive_search(
        shapes in prop::collection::vec(action_shape(), 0..6),
        start_bits in 0u64..(1 << CONDITIONS),
        goal_pairs in prop::collection::vec((0..CONDITIONS, any::<bool>()), 0..=CONDITIONS),
    ) {
        let (mut planner, ids) = build(&shapes);
        let start = full_state(start_bits);
        let goal = goal_pairs
            .iter()
            .fold(WorldState::new(), |goal, (i, v)| goal.with(*i, *v));

        let usable: Vec<ActionId> = ids
            .iter()
            .zip(&shapes)
            .filter(|(_, shape)| shape.valid)
            .map(|(id, _)| *id)
            .collect();
        let expected = brute_force_cost(&planner, &usable, start, goal);
        let plan = planner.plan(start, goal, None).unwrap();

        prop_assert_eq!(plan.as_ref().map(|p| p.cost()), expected);

        if let Some(plan) = plan {
            // Replaying the plan reaches the goal and only uses valid actions.
            let mut state = start;
            let mut total = 0;
            for step in plan.iter() {
                prop_assert!(usable.contains(&step.id));
                prop_assert!(planner.preconditions(step.id).unwrap().matches(&state));
                state = planner.apply_postconditions(step.id, &state).unwrap();
                total += step.action.cost();
            }
            prop_assert!(goal.matches(&state));
            prop_assert_eq!(total, plan.cost());
        }
    }

    #[test]
    fn unconstrained_goal_matches_every_state(values in any::<u64>(), dont_care in any::<u64>()) {
        let goal = WorldState::from_raw(values, u64::MAX);
        let state = WorldState::from_raw(dont_care ^ values, dont_care);
        prop_assert!(goal.matches(&state));
    }

    #[test]
    fn cared_bit_disagreement_never_matches(
        goal_values in any::<u64>(),
        goal_dont_care in any::<u64>(),
        state_values in any::<u64>(),
        bit in 0usize..64,
    ) {
        let mask = 1u64 << bit;
        let goal = WorldState::from_raw(goal_values, goal_dont_care & !mask);
        let state = WorldState::from_raw((state_values & !mask) | (!goal_values & mask), 0);
        prop_assert!(!goal.matches(&state));
    }
}
