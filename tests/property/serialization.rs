//! Property tests for the task wire types.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use termtodo_api::task::{Task, TaskPatch};

fn arb_task() -> impl Strategy<Value = Task> {
    ("[a-z0-9-]{1,16}", ".{0,64}", any::<bool>()).prop_map(|(id, title, completed)| Task {
        id,
        title,
        completed,
    })
}

fn arb_patch() -> impl Strategy<Value = TaskPatch> {
    (
        proptest::option::of("[a-z0-9-]{1,16}"),
        proptest::option::of(".{0,64}"),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(id, title, completed)| TaskPatch {
            id,
            title,
            completed,
        })
}

proptest! {
    #[test]
    fn task_json_round_trips(task in arb_task()) {
        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(task, back);
    }

    #[test]
    fn patch_json_round_trips(patch in arb_patch()) {
        let json = serde_json::to_string(&patch).unwrap();
        let back: TaskPatch = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(patch.id, back.id);
        prop_assert_eq!(patch.title, back.title);
        prop_assert_eq!(patch.completed, back.completed);
    }

    #[test]
    fn unset_patch_fields_are_omitted_from_the_wire(patch in arb_patch()) {
        let json = serde_json::to_string(&patch).unwrap();
        if patch.title.is_none() {
            prop_assert!(!json.contains("\"title\""));
        }
        if patch.completed.is_none() {
            prop_assert!(!json.contains("\"completed\""));
        }
    }

    #[test]
    fn full_patch_applied_to_any_task_reproduces_the_source(
        source in arb_task(),
        mut target in arb_task(),
    ) {
        let patch = TaskPatch::full(&source);
        let original_id = target.id.clone();
        patch.apply_to(&mut target);
        // The id is never patched; title and completion follow the source.
        prop_assert_eq!(target.id, original_id);
        prop_assert_eq!(target.title, source.title);
        prop_assert_eq!(target.completed, source.completed);
    }

    #[test]
    fn empty_patch_is_a_noop(mut task in arb_task()) {
        let before = task.clone();
        TaskPatch::default().apply_to(&mut task);
        prop_assert_eq!(task, before);
    }
}
